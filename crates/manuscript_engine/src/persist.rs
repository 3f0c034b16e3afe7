use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use site_logging::site_debug;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory {path:?} is unusable: {reason}")]
    OutputDir { path: PathBuf, reason: String },
    #[error("failed to write {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Directory that receives build artifacts (`./public` by default).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDir {
    path: PathBuf,
}

impl OutputDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the directory (and parents) if missing; fail if the path is not a directory.
    pub fn prepare(&self) -> Result<(), PersistError> {
        if self.path.exists() {
            if !self.path.is_dir() {
                return Err(self.unusable("path is not a directory"));
            }
            return Ok(());
        }
        fs::create_dir_all(&self.path).map_err(|e| self.unusable(e.to_string()))?;
        site_debug!("created output directory {:?}", self.path);
        Ok(())
    }

    /// Write `contents` to `{dir}/{file_name}` through a temp file and a rename,
    /// replacing any previous file. Readers never see a partial artifact.
    pub fn write_atomic(&self, file_name: &str, contents: &[u8]) -> Result<PathBuf, PersistError> {
        self.prepare()?;

        let target = self.path.join(file_name);
        let io_err = |source: io::Error| PersistError::Io {
            path: target.clone(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(&self.path).map_err(io_err)?;
        tmp.write_all(contents).map_err(io_err)?;
        tmp.flush().map_err(io_err)?;
        tmp.as_file_mut().sync_all().map_err(io_err)?;
        tmp.persist(&target).map_err(|e| io_err(e.error))?;

        Ok(target)
    }

    fn unusable(&self, reason: impl Into<String>) -> PersistError {
        PersistError::OutputDir {
            path: self.path.clone(),
            reason: reason.into(),
        }
    }
}
