use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use manuscript_core::{ArticleId, FrontMatter, ARTICLE_FILE_NAME};
use site_logging::{site_debug, site_warn};
use thiserror::Error;

use crate::frontmatter::{parse_front_matter, split_front_matter, FrontMatterError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("article {id} has no source file at {path:?}")]
    NotFound { id: ArticleId, path: PathBuf },
    #[error("malformed front matter in article {id}")]
    Parse {
        id: ArticleId,
        #[source]
        source: FrontMatterError,
    },
    #[error("failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where article sources come from.
pub trait ArticleSource: Send + Sync {
    fn list_article_ids(&self) -> Result<Vec<ArticleId>, StoreError>;

    /// Front matter and the raw markdown body of one article.
    fn load_article_source(&self, id: &ArticleId) -> Result<(FrontMatter, String), StoreError>;
}

/// Articles laid out as `{root}/{id}/index.md`.
#[derive(Debug, Clone)]
pub struct FsArticleStore {
    root: PathBuf,
}

impl FsArticleStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn source_path(&self, id: &ArticleId) -> PathBuf {
        self.root.join(id.as_str()).join(ARTICLE_FILE_NAME)
    }
}

impl ArticleSource for FsArticleStore {
    /// Every subdirectory of the root, sorted by name. Files are skipped and
    /// nothing below the first level is visited.
    fn list_article_ids(&self) -> Result<Vec<ArticleId>, StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.root.clone(),
            source,
        };

        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            if !entry.path().is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => ids.push(ArticleId::new(name)),
                Err(name) => site_warn!("skipping article directory with non-UTF-8 name {:?}", name),
            }
        }
        ids.sort();
        site_debug!("found {} article directories in {:?}", ids.len(), self.root);
        Ok(ids)
    }

    fn load_article_source(&self, id: &ArticleId) -> Result<(FrontMatter, String), StoreError> {
        let path = self.source_path(id);
        let source = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound {
                    id: id.clone(),
                    path,
                });
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let parse_err = |source| StoreError::Parse {
            id: id.clone(),
            source,
        };
        let (yaml, body) = split_front_matter(&source).map_err(parse_err)?;
        let front_matter = parse_front_matter(yaml).map_err(parse_err)?;
        Ok((front_matter, body.to_string()))
    }
}
