use manuscript_core::{ArticleId, SiteConfig};
use pretty_assertions::assert_eq;

#[test]
fn derived_urls_follow_site_conventions() {
    let site = SiteConfig::default();
    let id = ArticleId::new("how-to-give-meaningful-names");
    let urls = site.derived_urls(&id);

    assert_eq!(urls.hero_image, "/hero-images/how-to-give-meaningful-names.jpg");
    assert_eq!(
        urls.edit,
        "https://github.com/manu-unter/manuscript/edit/master/src/articles/how-to-give-meaningful-names/index.md"
    );
    assert_eq!(
        urls.discuss,
        "https://mobile.twitter.com/search?q=https%3A%2F%2Fmanuscript.blog%2Fhow-to-give-meaningful-names"
    );
}

#[test]
fn article_and_feed_urls_ignore_trailing_slash() {
    let mut site = SiteConfig::default();
    let id = ArticleId::new("post");
    assert_eq!(site.article_url(&id), "https://manuscript.blog/post");
    assert_eq!(site.feed_url(), "https://manuscript.blog/rss.xml");

    site.site_url = "https://example.org".into();
    assert_eq!(site.article_url(&id), "https://example.org/post");
    assert_eq!(site.host().as_deref(), Some("example.org"));
}

#[test]
fn discuss_url_encodes_like_encode_uri_component() {
    let site = SiteConfig {
        site_url: "https://example.org/blog/".into(),
        ..SiteConfig::default()
    };
    let id = ArticleId::new("what's-up (part 1)");
    assert_eq!(
        site.discuss_url(&id),
        "https://mobile.twitter.com/search?q=https%3A%2F%2Fexample.org%2Fblog%2Fwhat's-up%20(part%201)"
    );
}
