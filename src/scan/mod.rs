pub mod exec;
pub mod walk;

pub use exec::{exec_run, exec_show};
pub use walk::{default_ignore, scan_repos, DEFAULT_IGNORE, GIT_DIR_NAME};
