use std::fs;
use std::path::Path;

use manuscript_core::{ArticleId, SiteConfig};
use manuscript_engine::{
    ArticleAssembler, AssembleError, FrontMatterError, FsArticleStore, PulldownRenderer,
    StoreError,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write_article(root: &Path, id: &str, title: &str, date: &str, body: &str) {
    let dir = root.join(id);
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("index.md"),
        format!("---\ntitle: {title}\ndate: {date}\nspoiler: About {title}\n---\n{body}"),
    )
    .unwrap();
}

fn assembler(root: &Path) -> ArticleAssembler {
    site_logging::initialize_for_tests();
    let site = SiteConfig::default();
    let renderer = PulldownRenderer::for_site(&site);
    ArticleAssembler::new(site, FsArticleStore::new(root), renderer)
}

#[test]
fn assembles_one_article_with_derived_fields() {
    let temp = TempDir::new().unwrap();
    write_article(
        temp.path(),
        "hello",
        "Hello",
        "2020-01-01",
        "# Heading\n\nSome *text*.",
    );

    let article = assembler(temp.path())
        .assemble(&ArticleId::new("hello"))
        .unwrap();

    assert_eq!(article.title(), "Hello");
    assert_eq!(article.slug, ArticleId::new("hello"));
    assert_eq!(article.time_to_read, 0);
    assert_eq!(article.hero_image_url, "/hero-images/hello.jpg");
    assert_eq!(
        article.edit_url,
        "https://github.com/manu-unter/manuscript/edit/master/src/articles/hello/index.md"
    );
    assert_eq!(
        article.discuss_url,
        "https://mobile.twitter.com/search?q=https%3A%2F%2Fmanuscript.blog%2Fhello"
    );
    assert!(article
        .content_html
        .contains(r##"<h1 id="heading"><a href="#heading">Heading</a></h1>"##));
    assert!(article.content_html.contains("<em>text</em>"));
}

#[tokio::test(flavor = "multi_thread")]
async fn assemble_all_sorts_newest_first() {
    let temp = TempDir::new().unwrap();
    write_article(temp.path(), "a-older", "Older", "2020-01-01", "old");
    write_article(temp.path(), "b-newer", "Newer", "2021-06-01", "new");
    write_article(temp.path(), "c-middle", "Middle", "2020-12-31T23:00:00+01:00", "mid");

    let articles = assembler(temp.path()).assemble_all().await.unwrap();
    let slugs: Vec<&str> = articles.iter().map(|a| a.slug.as_str()).collect();

    assert_eq!(slugs, vec!["b-newer", "c-middle", "a-older"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_directory_yields_no_articles() {
    let temp = TempDir::new().unwrap();
    let articles = assembler(temp.path()).assemble_all().await.unwrap();
    assert!(articles.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn every_failure_is_reported_and_nothing_is_returned() {
    let temp = TempDir::new().unwrap();
    write_article(temp.path(), "good", "Good", "2020-01-01", "fine");
    write_article(temp.path(), "bad-date", "Bad", "sometime soon", "body");
    fs::create_dir_all(temp.path().join("no-source")).unwrap();

    let err = assembler(temp.path()).assemble_all().await.unwrap_err();

    assert_eq!(err.failures.len(), 2);
    assert!(err.failures.iter().any(|failure| matches!(
        failure,
        AssembleError::Store(StoreError::Parse {
            id,
            source: FrontMatterError::InvalidDate(_),
        }) if id.as_str() == "bad-date"
    )));
    assert!(err.failures.iter().any(|failure| matches!(
        failure,
        AssembleError::Store(StoreError::NotFound { id, .. }) if id.as_str() == "no-source"
    )));
    assert_eq!(err.to_string(), "2 article(s) failed to assemble");
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_articles_directory_is_a_single_failure() {
    let temp = TempDir::new().unwrap();
    let err = assembler(&temp.path().join("missing"))
        .assemble_all()
        .await
        .unwrap_err();

    assert_eq!(err.failures.len(), 1);
    assert!(matches!(
        err.failures[0],
        AssembleError::Store(StoreError::Io { .. })
    ));
}
