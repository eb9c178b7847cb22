pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod model;
pub mod scan;
pub mod stats;
pub mod util;
