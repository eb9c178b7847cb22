use super::{collect_day_buckets, output_json, render_heatmap};
use crate::cache::PathCache;
use crate::config::Config;
use crate::util::{one_year_before, snap_to_sunday_midnight};
use anyhow::Context;
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};

pub fn exec(config: &Config, email: &str, json: bool) -> anyhow::Result<()> {
    let repos = PathCache::new(config.cache_file())
        .load()
        .context("Failed to load repository cache")?;

    let now = Local::now();
    let since = snap_to_sunday_midnight(&one_year_before(&now));

    let pb = if json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(repos.len() as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{pos}/{len}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let buckets = collect_day_buckets(&repos, email, &since, Some(&pb));
    pb.finish_and_clear();
    let buckets = buckets.context("Failed to collect commits")?;

    if json {
        output_json(&buckets, email, &now, &since, repos.len())?;
    } else {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        render_heatmap(&buckets, &now, &since, &mut out).context("Failed to render heatmap")?;
        out.flush()?;
    }

    Ok(())
}
