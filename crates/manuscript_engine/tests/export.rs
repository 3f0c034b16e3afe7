use std::fs;

use manuscript_core::{ArticleId, FrontMatter, PublishDate, RenderedArticle, SiteConfig};
use manuscript_engine::{write_page_data, OutputDir, PAGE_DATA_FILE_NAME};
use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::TempDir;

fn article(id: &str) -> RenderedArticle {
    let site = SiteConfig::default();
    let slug = ArticleId::new(id);
    let urls = site.derived_urls(&slug);
    let mut front_matter =
        FrontMatter::new("Hello", PublishDate::parse("2020-01-01").unwrap()).with_spoiler("Hi");
    front_matter
        .extra
        .insert("tags".into(), serde_json::json!(["rust"]));
    RenderedArticle {
        front_matter,
        slug,
        time_to_read: 3,
        hero_image_url: urls.hero_image,
        edit_url: urls.edit,
        discuss_url: urls.discuss,
        content_html: "<p>hi</p>".into(),
    }
}

#[test]
fn page_data_lists_articles_in_camel_case() {
    let temp = TempDir::new().unwrap();
    let path = write_page_data(&OutputDir::new(temp.path()), &[article("hello")]).unwrap();
    assert_eq!(path, temp.path().join(PAGE_DATA_FILE_NAME));

    let document: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(document["articleCount"], 1);

    let record = &document["articles"][0];
    assert_eq!(record["title"], "Hello");
    assert_eq!(record["date"], "2020-01-01");
    assert_eq!(record["spoiler"], "Hi");
    assert_eq!(record["slug"], "hello");
    assert_eq!(record["timeToRead"], 3);
    assert_eq!(record["heroImageUrl"], "/hero-images/hello.jpg");
    assert_eq!(record["contentHtml"], "<p>hi</p>");
    assert_eq!(record["tags"], serde_json::json!(["rust"]));
}

#[test]
fn articles_array_keeps_the_given_order() {
    let temp = TempDir::new().unwrap();
    let articles = [article("newest"), article("middle"), article("oldest")];
    let path = write_page_data(&OutputDir::new(temp.path()), &articles).unwrap();

    let document: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(document["articleCount"], 3);
    let slugs: Vec<&str> = document["articles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["newest", "middle", "oldest"]);
}
