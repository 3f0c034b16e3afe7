use std::path::PathBuf;

use manuscript_core::RenderedArticle;
use serde_json::json;
use site_logging::site_info;

use crate::persist::{OutputDir, PersistError};

pub const PAGE_DATA_FILE_NAME: &str = "articles.json";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to serialize page data")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write page data")]
    Persist(#[from] PersistError),
}

/// Write the assembled articles, in order, as the page layer's data file.
///
/// The document is `{"articleCount": n, "articles": [...]}` with each record
/// in its camelCase form.
pub fn write_page_data(
    output: &OutputDir,
    articles: &[RenderedArticle],
) -> Result<PathBuf, ExportError> {
    let document = json!({
        "articleCount": articles.len(),
        "articles": articles,
    });
    let text = serde_json::to_string_pretty(&document)?;
    let path = output.write_atomic(PAGE_DATA_FILE_NAME, text.as_bytes())?;
    site_info!("wrote page data for {} articles to {:?}", articles.len(), path);
    Ok(path)
}
