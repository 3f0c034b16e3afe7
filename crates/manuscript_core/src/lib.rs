//! Manuscript core: pure article model, URL conventions and text helpers.
//!
//! Nothing in this crate touches the filesystem; the build pipeline in
//! `manuscript_engine` feeds it parsed sources and consumes its records.
mod article;
mod date;
mod links;
mod site;
mod slug;
mod theme;

pub use article::{sort_by_date_desc, ArticleId, FrontMatter, RenderedArticle};
pub use date::{DateParseError, PublishDate};
pub use links::{absolutize_root_links, is_external_link};
pub use site::{DerivedUrls, SiteConfig, ARTICLE_FILE_NAME};
pub use slug::{slugify, Slugger};
pub use theme::{SubscriptionId, Theme, ThemeStore};
