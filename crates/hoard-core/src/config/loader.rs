//! Configuration file discovery and parsing

use super::{ColumnLayouts, HoardConfigFile, StoreSettings};
use crate::error::{Error, Result};
use crate::utils::get_home_dir;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tracing::debug;

/// Configuration file names searched in the working directory
const CONFIG_FILE_NAMES: &[&str] = &["secret-hoard.yaml", "secret-hoard.yml"];

/// Loaded and validated configuration
#[derive(Debug, Clone, Default)]
pub struct HoardConfig {
    /// The parsed configuration
    pub config: HoardConfigFile,

    /// Where it came from, `None` when running on defaults
    pub config_path: Option<Utf8PathBuf>,

    columns: ColumnLayouts,
}

impl HoardConfig {
    /// Load configuration from the given path, or search the usual locations.
    ///
    /// An explicit path must exist. Without one, a missing file means defaults.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self> {
        let found = match path {
            Some(p) => {
                let content = fs::read_to_string(p).map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        Error::config_not_found(p.as_str())
                    } else {
                        Error::io(p, e)
                    }
                })?;
                Some((p.to_owned(), content))
            }
            None => Self::find_config()?,
        };

        match found {
            Some((config_path, content)) => {
                debug!(path = %config_path, "loading configuration");
                let mut config = Self::from_yaml(&content)?;
                config.config_path = Some(config_path);
                Ok(config)
            }
            None => {
                debug!("no configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse and validate configuration text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: HoardConfigFile = if content.trim().is_empty() {
            HoardConfigFile::default()
        } else {
            serde_yaml_ng::from_str(content)?
        };
        let columns = ColumnLayouts::with_overrides(&config.columns)?;

        Ok(Self {
            config,
            config_path: None,
            columns,
        })
    }

    /// Candidate locations, in search order
    pub fn search_paths() -> Result<Vec<Utf8PathBuf>> {
        let mut paths: Vec<Utf8PathBuf> = CONFIG_FILE_NAMES.iter().map(Utf8PathBuf::from).collect();

        if let Ok(home) = get_home_dir() {
            let home = Utf8PathBuf::try_from(home)
                .map_err(|_| Error::invalid_config("Home directory path is not valid UTF-8"))?;
            paths.push(home.join(".config").join("secret-hoard").join("config.yaml"));
        }

        Ok(paths)
    }

    fn find_config() -> Result<Option<(Utf8PathBuf, String)>> {
        for path in Self::search_paths()? {
            if path.exists() {
                let content = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
                return Ok(Some((path, content)));
            }
        }
        Ok(None)
    }

    pub fn store(&self) -> &StoreSettings {
        &self.config.store
    }

    pub fn columns(&self) -> &ColumnLayouts {
        &self.columns
    }
}
