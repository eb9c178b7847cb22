use crate::config::{Config, APP_DIR_ENV};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "git-contrib")]
#[command(about = "Visualize your git commit history across multiple repositories")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, global = true, env = APP_DIR_ENV, help = "Working app directory (default: ~/.git-contrib)")]
    pub app_dir: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, conflicts_with = "verbose", help = "Only log errors")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage scanning and caching of git repositories
    Scan {
        #[command(subcommand)]
        command: ScanCommands,
    },
    /// Print a commit heatmap from previously scanned repositories
    Stats {
        #[arg(long, help = "Email to filter commits by")]
        email: String,

        #[arg(long, help = "Output daily counts as JSON")]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ScanCommands {
    /// Scan a directory for git repositories
    Run {
        #[arg(help = "Directory to scan")]
        dir: PathBuf,

        #[arg(long, help = "Override saved git repositories")]
        clear: bool,

        #[arg(long = "ignore", value_name = "NAME", help = "Additional directory name to skip (repeatable)")]
        ignore: Vec<String>,
    },
    /// Print cached git repositories
    Show {
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn log_level(&self) -> Option<log::LevelFilter> {
        if self.common.verbose {
            Some(log::LevelFilter::Debug)
        } else if self.common.quiet {
            Some(log::LevelFilter::Error)
        } else {
            None
        }
    }

    pub fn execute(self) -> Result<()> {
        let config = Config::resolve(self.common.app_dir.clone())?;
        config
            .ensure_app_dir()
            .with_context(|| format!("error creating app directory {}", config.app_dir.display()))?;

        match self.command {
            Commands::Scan { command } => match command {
                ScanCommands::Run { dir, clear, ignore } => {
                    crate::scan::exec_run(&config, &dir, clear, &ignore)
                }
                ScanCommands::Show { json } => crate::scan::exec_show(&config, json),
            },
            Commands::Stats { email, json } => crate::stats::exec(&config, &email, json),
        }
    }
}
