use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hs-resources")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Resolve health service CPU and memory settings")]
#[command(long_about = "Turns loosely formatted CPU and memory requests/limits into normalized quantities (millicores and bytes), falling back to the built-in defaults when any field cannot be parsed.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a resource specification into quantities
    Resolve {
        /// YAML manifest containing the resources block
        #[arg(short, long, value_name = "MANIFEST")]
        file: Option<PathBuf>,

        /// CPU request, e.g. 100m (digits are read as millicores)
        #[arg(long, env = "HS_REQUESTS_CPU")]
        requests_cpu: Option<String>,

        /// Memory request, e.g. 128Mi (digits are read as MiB)
        #[arg(long, env = "HS_REQUESTS_MEMORY")]
        requests_memory: Option<String>,

        /// CPU limit, e.g. 500m
        #[arg(long, env = "HS_LIMITS_CPU")]
        limits_cpu: Option<String>,

        /// Memory limit, e.g. 512Mi
        #[arg(long, env = "HS_LIMITS_MEMORY")]
        limits_memory: Option<String>,

        /// Output format (overrides the configuration file)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Fail instead of falling back to the default resources
        #[arg(long)]
        strict: bool,
    },

    /// Show the default resources used as fallback
    Defaults {
        /// Output format (overrides the configuration file)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}
