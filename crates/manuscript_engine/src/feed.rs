use std::path::PathBuf;
use std::string::FromUtf8Error;

use manuscript_core::{absolutize_root_links, RenderedArticle, SiteConfig};
use rss::extension::atom::{AtomExtension, Link};
use rss::{ChannelBuilder, GuidBuilder, Item, ItemBuilder};
use site_logging::site_info;
use thiserror::Error;

use crate::persist::{OutputDir, PersistError};

pub const FEED_FILE_NAME: &str = "rss.xml";

const GENERATOR: &str = concat!("manuscript ", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to serialize feed")]
    Serialize(#[from] rss::Error),
    #[error("serialized feed is not valid UTF-8")]
    Encoding(#[from] FromUtf8Error),
    #[error("failed to write feed")]
    Persist(#[from] PersistError),
}

/// Writes the site's RSS 2.0 feed into the output directory.
#[derive(Debug, Clone)]
pub struct FeedGenerator {
    site: SiteConfig,
    output: OutputDir,
}

impl FeedGenerator {
    pub fn new(site: SiteConfig, output: OutputDir) -> Self {
        Self { site, output }
    }

    pub fn build(&self, articles: &[RenderedArticle]) -> Result<String, FeedError> {
        build_feed(&self.site, articles)
    }

    /// Build the feed for `articles` (already sorted) and replace `rss.xml` with it.
    pub fn generate(&self, articles: &[RenderedArticle]) -> Result<PathBuf, FeedError> {
        let xml = self.build(articles)?;
        let path = self.output.write_atomic(FEED_FILE_NAME, xml.as_bytes())?;
        site_info!("wrote feed with {} items to {:?}", articles.len(), path);
        Ok(path)
    }
}

/// Serialize `articles` as an RSS 2.0 document, items in the given order.
pub fn build_feed(site: &SiteConfig, articles: &[RenderedArticle]) -> Result<String, FeedError> {
    let items: Vec<Item> = articles
        .iter()
        .map(|article| feed_item(site, article))
        .collect();

    let mut self_link = Link::default();
    self_link.set_href(site.feed_url());
    self_link.set_rel("self");
    self_link.set_mime_type(Some("application/rss+xml".to_string()));
    let mut atom = AtomExtension::default();
    atom.set_links(vec![self_link]);

    let last_build_date = articles
        .iter()
        .map(RenderedArticle::date)
        .max_by_key(|date| date.instant())
        .map(|date| date.to_rfc2822());

    let channel = ChannelBuilder::default()
        .title(site.title.clone())
        .link(site.site_url.clone())
        .description(site.description.clone())
        .managing_editor(Some(site.author.clone()))
        .webmaster(Some(site.author.clone()))
        .generator(Some(GENERATOR.to_string()))
        .last_build_date(last_build_date)
        .atom_ext(Some(atom))
        .items(items)
        .build();

    let bytes = channel.write_to(Vec::new())?;
    Ok(String::from_utf8(bytes)?)
}

/// Closing note appended to every item, linking back to the article on the site.
pub fn promotional_footer(site: &SiteConfig, article_url: &str) -> String {
    let site_name = site.host().unwrap_or_else(|| site.root_url().to_string());
    format!(
        "\n<div style=\"margin-top=55px; font-style: italic;\">(This is an article posted to my blog at {site_name}. You can read it online by <a href=\"{article_url}\">clicking here</a>.)</div>\n"
    )
}

fn feed_item(site: &SiteConfig, article: &RenderedArticle) -> Item {
    let url = site.article_url(&article.slug);
    let content = format!(
        "{}{}",
        absolutize_root_links(&article.content_html, &site.site_url),
        promotional_footer(site, &url)
    );
    let spoiler = &article.front_matter.spoiler;

    ItemBuilder::default()
        .title(Some(article.title().to_string()))
        .description((!spoiler.is_empty()).then(|| spoiler.clone()))
        .pub_date(Some(article.date().to_rfc2822()))
        .link(Some(url.clone()))
        .guid(Some(GuidBuilder::default().value(url).permalink(true).build()))
        .content(Some(content))
        .build()
}
