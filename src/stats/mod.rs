pub mod aggregate;
pub mod exec;
pub mod output;
pub mod render;

pub use aggregate::{bucket_commits, collect_day_buckets};
pub use exec::exec;
pub use output::{build_output, output_json};
pub use render::{cell_key, render_heatmap, week_count, HeatLevel, DAY_BLOCK};
