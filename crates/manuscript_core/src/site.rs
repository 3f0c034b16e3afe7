use std::path::PathBuf;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::article::ArticleId;

/// File name of an article's source inside its directory.
pub const ARTICLE_FILE_NAME: &str = "index.md";

/// Characters `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Static site settings read once per build.
///
/// Every field has a default, so a config file only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    pub description: String,
    /// Public base URL, e.g. `https://manuscript.blog/`.
    pub site_url: String,
    pub author: String,
    /// Source repository the edit links point into.
    pub repository_url: String,
    pub repository_branch: String,
    /// Search URL the encoded article URL is appended to.
    pub discuss_search_url: String,
    pub articles_dir: PathBuf,
    pub public_dir: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "manuscript".to_string(),
            description: "A personal blog about building software for the web".to_string(),
            site_url: "https://manuscript.blog/".to_string(),
            author: "manu-unter".to_string(),
            repository_url: "https://github.com/manu-unter/manuscript".to_string(),
            repository_branch: "master".to_string(),
            discuss_search_url: "https://mobile.twitter.com/search?q=".to_string(),
            articles_dir: PathBuf::from("src").join("articles"),
            public_dir: PathBuf::from("public"),
        }
    }
}

/// Links computed from an article id alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedUrls {
    pub hero_image: String,
    pub edit: String,
    pub discuss: String,
}

impl SiteConfig {
    /// Site URL without the trailing slash.
    pub fn root_url(&self) -> &str {
        self.site_url.trim_end_matches('/')
    }

    pub fn host(&self) -> Option<String> {
        Url::parse(&self.site_url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
    }

    pub fn feed_url(&self) -> String {
        format!("{}/rss.xml", self.root_url())
    }

    pub fn article_url(&self, id: &ArticleId) -> String {
        format!("{}/{}", self.root_url(), id)
    }

    pub fn hero_image_url(&self, id: &ArticleId) -> String {
        format!("/hero-images/{id}.jpg")
    }

    pub fn edit_url(&self, id: &ArticleId) -> String {
        format!(
            "{}/edit/{}/src/articles/{}/{}",
            self.repository_url.trim_end_matches('/'),
            self.repository_branch,
            id,
            ARTICLE_FILE_NAME
        )
    }

    pub fn discuss_url(&self, id: &ArticleId) -> String {
        let article_url = self.article_url(id);
        format!(
            "{}{}",
            self.discuss_search_url,
            utf8_percent_encode(&article_url, URI_COMPONENT)
        )
    }

    pub fn derived_urls(&self, id: &ArticleId) -> DerivedUrls {
        DerivedUrls {
            hero_image: self.hero_image_url(id),
            edit: self.edit_url(id),
            discuss: self.discuss_url(id),
        }
    }
}
