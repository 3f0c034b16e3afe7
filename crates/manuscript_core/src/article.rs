use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::date::PublishDate;

/// Name of the directory holding one article's source; doubles as its URL slug.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ArticleId(String);

impl ArticleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ArticleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ArticleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ArticleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Metadata block at the top of an article source.
///
/// Keys other than the ones modelled here are kept in `extra` and serialized
/// next to the known fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontMatter {
    pub title: String,
    pub date: PublishDate,
    pub spoiler: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image_alt: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl FrontMatter {
    pub fn new(title: impl Into<String>, date: PublishDate) -> Self {
        Self {
            title: title.into(),
            date,
            spoiler: String::new(),
            hero_image_alt: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_spoiler(mut self, spoiler: impl Into<String>) -> Self {
        self.spoiler = spoiler.into();
        self
    }
}

/// One fully built article, as handed to the page layer and the feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedArticle {
    #[serde(flatten)]
    pub front_matter: FrontMatter,
    pub slug: ArticleId,
    pub time_to_read: u32,
    pub hero_image_url: String,
    pub edit_url: String,
    pub discuss_url: String,
    pub content_html: String,
}

impl RenderedArticle {
    pub fn title(&self) -> &str {
        &self.front_matter.title
    }

    pub fn date(&self) -> &PublishDate {
        &self.front_matter.date
    }
}

/// Newest first. Stable, so equal dates keep their incoming order.
pub fn sort_by_date_desc(articles: &mut [RenderedArticle]) {
    articles.sort_by(|a, b| b.date().instant().cmp(&a.date().instant()));
}
