use std::io;
use std::path::PathBuf;
use std::time::Instant;

use manuscript_core::{ArticleId, SiteConfig};
use manuscript_engine::{
    write_page_data, AggregateError, ArticleAssembler, ArticleSource, ExportError, FeedError,
    FeedGenerator, FsArticleStore, OutputDir, PulldownRenderer, StoreError,
};
use site_logging::{site_debug, site_info};
use thiserror::Error;

use crate::cli::{BuildArgs, SourceArgs};
use crate::config::{load_site_config, ConfigError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to start the async runtime")]
    Runtime(#[source] io::Error),
    #[error("failed to list articles")]
    List(#[from] StoreError),
    #[error(transparent)]
    Assemble(#[from] AggregateError),
    #[error(transparent)]
    Feed(#[from] FeedError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// What a successful build produced.
#[derive(Debug)]
pub struct BuildReport {
    pub article_count: usize,
    pub feed_path: PathBuf,
    pub page_data_path: Option<PathBuf>,
}

fn resolve_site(args: &SourceArgs) -> Result<SiteConfig, ConfigError> {
    let mut site = load_site_config(args.config.as_deref())?;
    if let Some(dir) = &args.articles_dir {
        site.articles_dir = dir.clone();
    }
    Ok(site)
}

/// Assemble every article, then write the feed and (unless disabled) the page data.
///
/// Nothing is written when any article fails.
pub fn run_build(args: &BuildArgs) -> Result<BuildReport, AppError> {
    let started = Instant::now();
    let mut site = resolve_site(&args.source)?;
    if let Some(dir) = &args.public_dir {
        site.public_dir = dir.clone();
    }
    site_info!(
        "building {} from {:?} into {:?}",
        site.site_url,
        site.articles_dir,
        site.public_dir
    );

    let store = FsArticleStore::new(&site.articles_dir);
    let renderer = PulldownRenderer::for_site(&site);
    let assembler = ArticleAssembler::new(site.clone(), store, renderer);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(AppError::Runtime)?;
    let articles = runtime.block_on(assembler.assemble_all())?;

    let output = OutputDir::new(&site.public_dir);
    let feed_path = FeedGenerator::new(site, output.clone()).generate(&articles)?;
    let page_data_path = if args.no_page_data {
        site_debug!("page data disabled");
        None
    } else {
        Some(write_page_data(&output, &articles)?)
    };

    site_info!(
        "built {} articles in {:?}",
        articles.len(),
        started.elapsed()
    );
    Ok(BuildReport {
        article_count: articles.len(),
        feed_path,
        page_data_path,
    })
}

pub fn run_list(args: &SourceArgs) -> Result<Vec<ArticleId>, AppError> {
    let site = resolve_site(args)?;
    let ids = FsArticleStore::new(&site.articles_dir).list_article_ids()?;
    Ok(ids)
}
