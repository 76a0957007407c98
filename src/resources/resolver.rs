//! Resolution of a [`ResourceSpec`] into [`ResolvedResources`].
//!
//! Fields are resolved in a fixed order (requests.cpu, requests.memory,
//! limits.cpu, limits.memory) and the first failure aborts the whole
//! resolution. There are no partial results: a caller gets either four
//! resolved quantities or [`super::DEFAULT_RESOURCES`] plus the error.

use super::digits::{DigitsError, extract_digits};
use super::types::{CpuQuantity, MemoryQuantity, ResolvedResources, ResourceField, ResourceSpec};
use thiserror::Error;

/// A field that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {kind}")]
pub struct ResolveError {
    field: ResourceField,
    kind: DigitsError,
}

impl ResolveError {
    pub fn new(field: ResourceField, kind: DigitsError) -> Self {
        Self { field, kind }
    }

    /// The field that failed.
    pub fn field(&self) -> ResourceField {
        self.field
    }

    /// The underlying extraction error, unchanged.
    pub fn kind(&self) -> &DigitsError {
        &self.kind
    }

    /// Resources the caller should fall back to.
    pub fn fallback(&self) -> &'static ResolvedResources {
        ResolvedResources::defaults()
    }
}

/// Resolve all four fields or fail on the first one that does not parse.
pub fn resolve(spec: &ResourceSpec) -> Result<ResolvedResources, ResolveError> {
    let requests_cpu = resolve_field(ResourceField::RequestsCpu, spec)?;
    let requests_memory = resolve_field(ResourceField::RequestsMemory, spec)?;
    let limits_cpu = resolve_field(ResourceField::LimitsCpu, spec)?;
    let limits_memory = resolve_field(ResourceField::LimitsMemory, spec)?;

    Ok(ResolvedResources {
        requests_cpu: CpuQuantity::from_millis(requests_cpu),
        requests_memory: MemoryQuantity::from_bytes(requests_memory),
        limits_cpu: CpuQuantity::from_millis(limits_cpu),
        limits_memory: MemoryQuantity::from_bytes(limits_memory),
    })
}

/// Resolve, substituting [`super::DEFAULT_RESOURCES`] on failure.
///
/// The error is still handed back so the caller can log it or abort.
pub fn resolve_or_default(spec: &ResourceSpec) -> (ResolvedResources, Option<ResolveError>) {
    match resolve(spec) {
        Ok(resources) => (resources, None),
        Err(err) => {
            log::debug!("Falling back to default resources: {}", err);
            (*err.fallback(), Some(err))
        }
    }
}

fn resolve_field(field: ResourceField, spec: &ResourceSpec) -> Result<i64, ResolveError> {
    let raw = spec.get(field);
    let value = extract_digits(raw).map_err(|kind| ResolveError::new(field, kind))?;

    let multiplier = field.unit_multiplier();
    let scaled = value.checked_mul(multiplier).ok_or_else(|| {
        ResolveError::new(field, DigitsError::ScaledOverflow { value, multiplier })
    })?;

    log::debug!("Resolved {} from {:?} to {}", field, raw, scaled);
    Ok(scaled)
}
