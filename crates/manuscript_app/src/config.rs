use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use manuscript_core::SiteConfig;
use site_logging::site_info;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Built-in site settings, overridden by whatever fields `path` sets.
pub fn load_site_config(path: Option<&Path>) -> Result<SiteConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(SiteConfig::default());
    };
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_site_config(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    site_info!("loaded site config from {:?}", path);
    Ok(config)
}

fn parse_site_config(text: &str) -> Result<SiteConfig, ron::error::SpannedError> {
    ron::from_str(text)
}
