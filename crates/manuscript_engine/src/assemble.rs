use std::error::Error as _;
use std::sync::Arc;
use std::time::Instant;

use futures_util::future::join_all;
use manuscript_core::{sort_by_date_desc, ArticleId, RenderedArticle, SiteConfig};
use site_logging::{site_debug, site_info, site_warn};
use thiserror::Error;

use crate::reading_time::ReadingTimeEstimator;
use crate::render::{MarkdownRenderer, RenderError};
use crate::store::{ArticleSource, StoreError};

#[derive(Debug, Error)]
pub enum AssembleError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to render article {id}")]
    Render {
        id: ArticleId,
        #[source]
        source: RenderError,
    },
    #[error("assembly of article {id} did not complete: {message}")]
    Task { id: ArticleId, message: String },
}

/// One or more articles failed; the batch produced nothing.
#[derive(Debug, Error)]
#[error("{} article(s) failed to assemble", .failures.len())]
pub struct AggregateError {
    pub failures: Vec<AssembleError>,
}

impl AggregateError {
    pub fn new(failures: Vec<AssembleError>) -> Self {
        Self { failures }
    }
}

/// Builds [`RenderedArticle`]s from an [`ArticleSource`].
///
/// Cloning is cheap; clones share the source, renderer and estimator.
#[derive(Clone)]
pub struct ArticleAssembler {
    site: Arc<SiteConfig>,
    source: Arc<dyn ArticleSource>,
    renderer: Arc<dyn MarkdownRenderer>,
    estimator: Arc<ReadingTimeEstimator>,
}

impl ArticleAssembler {
    pub fn new(
        site: SiteConfig,
        source: impl ArticleSource + 'static,
        renderer: impl MarkdownRenderer + 'static,
    ) -> Self {
        Self {
            site: Arc::new(site),
            source: Arc::new(source),
            renderer: Arc::new(renderer),
            estimator: Arc::new(ReadingTimeEstimator::default()),
        }
    }

    pub fn with_estimator(mut self, estimator: ReadingTimeEstimator) -> Self {
        self.estimator = Arc::new(estimator);
        self
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// Load, render and measure one article, then attach its derived URLs.
    pub fn assemble(&self, id: &ArticleId) -> Result<RenderedArticle, AssembleError> {
        let started = Instant::now();
        let (front_matter, markdown) = self.source.load_article_source(id)?;
        let content_html = self
            .renderer
            .render(&markdown)
            .map_err(|source| AssembleError::Render {
                id: id.clone(),
                source,
            })?;
        let time_to_read = self.estimator.estimate(&content_html);
        let urls = self.site.derived_urls(id);

        site_debug!(
            "assembled {} in {:?} ({} min read, {} bytes html)",
            id,
            started.elapsed(),
            time_to_read,
            content_html.len()
        );

        Ok(RenderedArticle {
            front_matter,
            slug: id.clone(),
            time_to_read,
            hero_image_url: urls.hero_image,
            edit_url: urls.edit,
            discuss_url: urls.discuss,
            content_html,
        })
    }

    /// Assemble every listed article concurrently, newest first.
    ///
    /// All articles are attempted; if any fails, every failure is returned
    /// together and no articles are. Must run inside a tokio runtime.
    pub async fn assemble_all(&self) -> Result<Vec<RenderedArticle>, AggregateError> {
        let ids = self
            .source
            .list_article_ids()
            .map_err(|err| AggregateError::new(vec![err.into()]))?;
        site_info!("assembling {} articles", ids.len());

        let tasks = ids.into_iter().map(|id| {
            let assembler = self.clone();
            async move {
                let task_id = id.clone();
                tokio::task::spawn_blocking(move || assembler.assemble(&id))
                    .await
                    .unwrap_or_else(|err| {
                        Err(AssembleError::Task {
                            id: task_id,
                            message: err.to_string(),
                        })
                    })
            }
        });

        let mut articles = Vec::new();
        let mut failures = Vec::new();
        for result in join_all(tasks).await {
            match result {
                Ok(article) => articles.push(article),
                Err(err) => {
                    site_warn!("{}", with_causes(&err));
                    failures.push(err);
                }
            }
        }
        if !failures.is_empty() {
            return Err(AggregateError::new(failures));
        }

        sort_by_date_desc(&mut articles);
        Ok(articles)
    }
}

/// `err` followed by each underlying cause, joined with `: `.
fn with_causes(err: &AssembleError) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
