// Handler modules
pub mod resolve;

// Re-export all handler functions
pub use resolve::{
    ResolutionReport, ResolveOptions, handle_defaults, handle_resolve, render_report,
};
