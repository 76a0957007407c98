//! Resource resolution for the health service workload.
//!
//! Turns free-form CPU and memory strings into normalized quantities:
//!
//! - [`digits`]: leading-digit extraction
//! - [`resolver`]: all-or-nothing resolution with a default fallback
//! - [`types`]: input spec, resolved quantities and the default set
//! - [`parser`]: reading specs from YAML manifests

pub mod digits;
pub mod parser;
pub mod resolver;
pub mod types;

pub use digits::{DigitsError, extract_digits, leading_digits};
pub use parser::{load_resource_spec, parse_resource_spec};
pub use resolver::{ResolveError, resolve, resolve_or_default};
pub use types::{
    CpuQuantity, DEFAULT_RESOURCES, MIB, MemoryQuantity, ResolvedResources, ResourceField,
    ResourceList, ResourceSpec,
};
