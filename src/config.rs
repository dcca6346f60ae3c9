//! Where the ledger keeps its files. The library never hardcodes a location:
//! front-ends either call [`Config::resolve`] for the per-user defaults or
//! build a [`Config`] with explicit directories.

use std::env;
use std::path::{Path, PathBuf};

use directories::{BaseDirs, UserDirs};

use crate::error::{Error, Result};

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".shop-ledger";
/// Folder name used beneath the user's documents directory for exports.
const EXPORT_DIR_NAME: &str = "ShopLedger";
/// SQLite file name stored inside the data directory.
const DB_FILE_NAME: &str = "ledger.sqlite";
const LOG_FILE_NAME: &str = "shop-ledger.log";

/// Overrides the data directory (database and log file).
pub const DATA_DIR_ENV: &str = "SHOP_LEDGER_DATA_DIR";
/// Overrides the directory exported reports are written to.
pub const EXPORT_DIR_ENV: &str = "SHOP_LEDGER_EXPORT_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub export_dir: PathBuf,
    pub log_path: PathBuf,
}

impl Config {
    /// Lay out every file inside the two given directories.
    pub fn new(data_dir: impl Into<PathBuf>, export_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            db_path: data_dir.join(DB_FILE_NAME),
            log_path: data_dir.join(LOG_FILE_NAME),
            export_dir: export_dir.into(),
            data_dir,
        }
    }

    /// Per-user defaults, with environment overrides taking priority:
    /// data lives in `~/.shop-ledger`, exports in `~/Documents/ShopLedger`
    /// (or the data directory when the platform has no documents folder).
    pub fn resolve() -> Result<Self> {
        let data_dir = match env_path(DATA_DIR_ENV) {
            Some(path) => path,
            None => default_data_dir()?,
        };
        let export_dir = env_path(EXPORT_DIR_ENV)
            .or_else(default_export_dir)
            .unwrap_or_else(|| data_dir.join("exports"));
        Ok(Self::new(data_dir, export_dir))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn default_data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| Error::DataDir {
        path: PathBuf::from("~"),
        source: std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "could not locate home directory",
        ),
    })?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

fn default_export_dir() -> Option<PathBuf> {
    let user_dirs = UserDirs::new()?;
    user_dirs
        .document_dir()
        .map(|documents| documents.join(EXPORT_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_are_laid_out_inside_the_data_dir() {
        let config = Config::new("/tmp/ledger-data", "/tmp/ledger-out");
        assert_eq!(config.db_path, PathBuf::from("/tmp/ledger-data/ledger.sqlite"));
        assert_eq!(config.log_path, PathBuf::from("/tmp/ledger-data/shop-ledger.log"));
        assert_eq!(config.export_dir, PathBuf::from("/tmp/ledger-out"));
        assert_eq!(config.data_dir(), Path::new("/tmp/ledger-data"));
    }
}
