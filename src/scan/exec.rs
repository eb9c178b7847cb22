use super::{default_ignore, scan_repos};
use crate::cache::PathCache;
use crate::config::Config;
use anyhow::Context;
use std::path::Path;

pub fn exec_run(config: &Config, dir: &Path, clear: bool, extra_ignore: &[String]) -> anyhow::Result<()> {
    let root = dir
        .canonicalize()
        .with_context(|| format!("Failed to resolve directory {}", dir.display()))?;

    let mut ignore = default_ignore();
    ignore.extend(extra_ignore.iter().cloned());

    let repos = scan_repos(&root, &ignore)
        .with_context(|| format!("Failed to scan {}", root.display()))?;

    PathCache::new(config.cache_file())
        .save(&repos, clear)
        .context("Failed to save repository cache")?;

    Ok(())
}

pub fn exec_show(config: &Config, json: bool) -> anyhow::Result<()> {
    let repos = PathCache::new(config.cache_file())
        .load()
        .context("Failed to load repository cache")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&repos)?);
    } else {
        for repo in &repos {
            println!("{repo}");
        }
    }
    Ok(())
}
