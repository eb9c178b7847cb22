use crate::error::{ContribError, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_DIR_ENV: &str = "GIT_CONTRIB_APP_DIR";
const DEFAULT_APP_DIR_NAME: &str = ".git-contrib";
const CACHE_FILE_NAME: &str = "scanned.txt";

/// Settings shared by every command, resolved once by the CLI layer.
#[derive(Debug, Clone)]
pub struct Config {
    pub app_dir: PathBuf,
}

impl Config {
    pub fn new<P: AsRef<Path>>(app_dir: P) -> Self {
        Self {
            app_dir: app_dir.as_ref().to_path_buf(),
        }
    }

    /// Uses `app_dir` when given, otherwise `~/.git-contrib`.
    pub fn resolve(app_dir: Option<PathBuf>) -> Result<Self> {
        let app_dir = match app_dir {
            Some(dir) => dir,
            None => default_app_dir()?,
        };
        Ok(Self { app_dir })
    }

    pub fn cache_file(&self) -> PathBuf {
        self.app_dir.join(CACHE_FILE_NAME)
    }

    pub fn ensure_app_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.app_dir)?;
        Ok(())
    }
}

fn default_app_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_APP_DIR_NAME))
        .ok_or_else(|| ContribError::Other("could not determine user home directory".to_string()))
}
