use manuscript_core::absolutize_root_links;
use pretty_assertions::assert_eq;

const SITE: &str = "https://manuscript.blog/";

#[test]
fn root_relative_href_and_src_become_absolute() {
    let html = r#"<a href="/about">About</a><img src="/hero-images/x.jpg">"#;
    assert_eq!(
        absolutize_root_links(html, SITE),
        r#"<a href="https://manuscript.blog/about">About</a><img src="https://manuscript.blog/hero-images/x.jpg">"#
    );
}

#[test]
fn static_paths_in_other_attributes_and_srcsets_are_rewritten() {
    let html = r#"<img data-src="/static/a.png" srcset="/static/a.png 1x, /static/b.png 2x">"#;
    assert_eq!(
        absolutize_root_links(html, SITE),
        r#"<img data-src="https://manuscript.blog/static/a.png" srcset="https://manuscript.blog/static/a.png 1x,https://manuscript.blog/static/b.png 2x">"#
    );
}

#[test]
fn absolute_urls_are_untouched() {
    let html = r#"<a href="https://example.com/x">x</a><img src="https://cdn.example.com/y.png">"#;
    assert_eq!(absolutize_root_links(html, SITE), html);
}

#[test]
fn single_quoted_attributes_are_not_rewritten() {
    let html = "<a href='/about'>About</a>";
    assert_eq!(absolutize_root_links(html, SITE), html);
}

#[test]
fn fragment_links_are_untouched() {
    let html = r##"<h2 id="intro"><a href="#intro">Intro</a></h2>"##;
    assert_eq!(absolutize_root_links(html, SITE), html);
}

#[test]
fn site_url_without_trailing_slash_gives_same_result() {
    let html = r#"<a href="/about">About</a>"#;
    assert_eq!(
        absolutize_root_links(html, "https://manuscript.blog"),
        absolutize_root_links(html, SITE)
    );
}
