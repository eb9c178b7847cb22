use crate::error::Result;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Flat text store of discovered repository roots, one path per line.
pub struct PathCache {
    path: PathBuf,
}

impl PathCache {
    pub fn new<P: AsRef<Path>>(store_path: P) -> Self {
        Self {
            path: store_path.as_ref().to_path_buf(),
        }
    }

    /// Returns cached repository paths. A missing or blank store is an empty cache.
    pub fn load(&self) -> Result<Vec<String>> {
        match fs::read_to_string(&self.path) {
            Ok(data) => Ok(parse_entries(&data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Merges `repos` in front of the existing entries and rewrites the store.
    /// With `clear` set the existing entries are dropped first.
    pub fn save(&self, repos: &[String], clear: bool) -> Result<()> {
        if clear {
            self.clear()?;
        }
        let existing = self.load()?;
        let merged = join_unique(repos, &existing);
        fs::write(&self.path, merged.join("\n"))?;
        log::info!(
            "Saved {} repositories to {} ({} new)",
            merged.len(),
            self.path.display(),
            merged.len().saturating_sub(existing.len())
        );
        Ok(())
    }

    /// Truncates the store. A missing store is left missing.
    pub fn clear(&self) -> Result<()> {
        match fs::OpenOptions::new().write(true).truncate(true).open(&self.path) {
            Ok(_) => {
                log::debug!("Cleared repository cache {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn parse_entries(data: &str) -> Vec<String> {
    let trimmed = data.trim_end();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('\n').map(str::to_string).collect()
}

/// Concatenates `a` and `b`, keeping the first occurrence of every entry.
pub fn join_unique(a: &[String], b: &[String]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(a.len() + b.len());
    let mut result = Vec::with_capacity(a.len() + b.len());
    for entry in a.iter().chain(b.iter()) {
        if seen.insert(entry.as_str()) {
            result.push(entry.clone());
        }
    }
    result
}
