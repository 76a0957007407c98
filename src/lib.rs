//! # Health Service Resources
//!
//! Resolves the loosely formatted CPU and memory settings of a health service
//! custom resource into normalized Kubernetes quantities.
//!
//! ## Features
//!
//! - **Lenient Parsing**: Only the leading digits of each field are read; suffixes are ignored
//! - **Unit Normalization**: CPU digits are millicores, memory digits are MiB
//! - **Safe Fallback**: Any unparseable field yields the built-in defaults plus the error
//! - **Kubernetes Output**: Resolved values render as `ResourceRequirements`
//!
//! ## Example
//!
//! ```rust
//! use healthservice_resources::{ResourceSpec, resolve_or_default};
//!
//! let spec = ResourceSpec::new("100m", "128Mi", "200m", "256Mi");
//! let (resources, error) = resolve_or_default(&spec);
//! assert!(error.is_none());
//! assert_eq!(resources.requests_memory.bytes(), 128 * 1024 * 1024);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod resources;

// Re-export commonly used types and functions
pub use error::{HealthServiceError, Result};
pub use resources::{
    DEFAULT_RESOURCES, DigitsError, ResolveError, ResolvedResources, ResourceField, ResourceSpec,
    extract_digits, resolve, resolve_or_default,
};
use cli::Commands;
use config::Config;

pub fn run_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Resolve {
            file,
            requests_cpu,
            requests_memory,
            limits_cpu,
            limits_memory,
            format,
            strict,
        } => {
            let options = handlers::ResolveOptions {
                file,
                requests_cpu,
                requests_memory,
                limits_cpu,
                limits_memory,
                format,
                strict,
            };
            handlers::handle_resolve(options, config).map(|_| ())
        }
        Commands::Defaults { format } => handlers::handle_defaults(format, config).map(|_| ()),
    }
}
