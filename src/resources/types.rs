//! Core types for health service resource resolution.
//!
//! [`ResourceSpec`] is the raw, string-typed input taken from the custom
//! resource. [`ResolvedResources`] is the normalized output with CPU in
//! millicores and memory in bytes.

use k8s_openapi::api::core::v1::ResourceRequirements;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Bytes in one mebibyte.
pub const MIB: i64 = 1024 * 1024;

// ============================================================================
// Raw input
// ============================================================================

/// CPU and memory strings for one side (requests or limits).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceList {
    #[serde(default)]
    pub cpu: String,
    #[serde(default)]
    pub memory: String,
}

/// Resource configuration as written by the user.
///
/// No validation happens here; any text is accepted and only interpreted
/// by [`crate::resources::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSpec {
    #[serde(default)]
    pub requests: ResourceList,
    #[serde(default)]
    pub limits: ResourceList,
}

impl ResourceSpec {
    /// Build a spec from the four raw strings, in resolution order.
    pub fn new(
        requests_cpu: impl Into<String>,
        requests_memory: impl Into<String>,
        limits_cpu: impl Into<String>,
        limits_memory: impl Into<String>,
    ) -> Self {
        Self {
            requests: ResourceList {
                cpu: requests_cpu.into(),
                memory: requests_memory.into(),
            },
            limits: ResourceList {
                cpu: limits_cpu.into(),
                memory: limits_memory.into(),
            },
        }
    }

    /// Raw text for a single field.
    pub fn get(&self, field: ResourceField) -> &str {
        match field {
            ResourceField::RequestsCpu => &self.requests.cpu,
            ResourceField::RequestsMemory => &self.requests.memory,
            ResourceField::LimitsCpu => &self.limits.cpu,
            ResourceField::LimitsMemory => &self.limits.memory,
        }
    }

    /// Replace the raw text of a single field.
    pub fn set(&mut self, field: ResourceField, value: impl Into<String>) {
        let slot = match field {
            ResourceField::RequestsCpu => &mut self.requests.cpu,
            ResourceField::RequestsMemory => &mut self.requests.memory,
            ResourceField::LimitsCpu => &mut self.limits.cpu,
            ResourceField::LimitsMemory => &mut self.limits.memory,
        };
        *slot = value.into();
    }
}

// ============================================================================
// Fields
// ============================================================================

/// One of the four resource fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceField {
    RequestsCpu,
    RequestsMemory,
    LimitsCpu,
    LimitsMemory,
}

impl ResourceField {
    /// All fields in resolution order.
    pub const ALL: [Self; 4] = [
        Self::RequestsCpu,
        Self::RequestsMemory,
        Self::LimitsCpu,
        Self::LimitsMemory,
    ];

    /// Dotted path as it appears in the custom resource.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RequestsCpu => "requests.cpu",
            Self::RequestsMemory => "requests.memory",
            Self::LimitsCpu => "limits.cpu",
            Self::LimitsMemory => "limits.memory",
        }
    }

    /// Factor applied to the parsed digits.
    ///
    /// CPU digits are already millicores; memory digits are MiB.
    pub fn unit_multiplier(&self) -> i64 {
        match self {
            Self::RequestsCpu | Self::LimitsCpu => 1,
            Self::RequestsMemory | Self::LimitsMemory => MIB,
        }
    }
}

impl fmt::Display for ResourceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Quantities
// ============================================================================

/// CPU amount in millicores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CpuQuantity(i64);

impl CpuQuantity {
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub const fn millis(&self) -> i64 {
        self.0
    }
}

/// Renders Kubernetes CPU notation.
///
/// - 100 -> "100m"
/// - 1000 -> "1"
/// - 1500 -> "1500m"
impl fmt::Display for CpuQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let millis = self.0;
        if millis >= 1000 && millis % 1000 == 0 {
            write!(f, "{}", millis / 1000)
        } else {
            write!(f, "{}m", millis)
        }
    }
}

/// Memory amount in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryQuantity(i64);

impl MemoryQuantity {
    pub const fn from_bytes(bytes: i64) -> Self {
        Self(bytes)
    }

    pub const fn bytes(&self) -> i64 {
        self.0
    }
}

/// Renders binary-unit Kubernetes memory notation, e.g. 134217728 -> "128Mi".
impl fmt::Display for MemoryQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const KI: i64 = 1024;
        const GI: i64 = MIB * 1024;
        const TI: i64 = GI * 1024;

        let bytes = self.0;
        if bytes >= TI && bytes % TI == 0 {
            write!(f, "{}Ti", bytes / TI)
        } else if bytes >= GI && bytes % GI == 0 {
            write!(f, "{}Gi", bytes / GI)
        } else if bytes >= MIB && bytes % MIB == 0 {
            write!(f, "{}Mi", bytes / MIB)
        } else if bytes >= KI && bytes % KI == 0 {
            write!(f, "{}Ki", bytes / KI)
        } else {
            write!(f, "{}", bytes)
        }
    }
}

// ============================================================================
// Resolved output
// ============================================================================

/// Fully resolved compute resources for the health service workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedResources {
    pub requests_cpu: CpuQuantity,
    pub requests_memory: MemoryQuantity,
    pub limits_cpu: CpuQuantity,
    pub limits_memory: MemoryQuantity,
}

/// Fallback used whenever any field fails to resolve:
/// 50m / 64Mi requests, 500m / 512Mi limits.
pub static DEFAULT_RESOURCES: ResolvedResources = ResolvedResources {
    requests_cpu: CpuQuantity::from_millis(50),
    requests_memory: MemoryQuantity::from_bytes(64 * MIB),
    limits_cpu: CpuQuantity::from_millis(500),
    limits_memory: MemoryQuantity::from_bytes(512 * MIB),
};

impl ResolvedResources {
    /// The shared default set.
    pub fn defaults() -> &'static Self {
        &DEFAULT_RESOURCES
    }

    pub fn is_default(&self) -> bool {
        *self == DEFAULT_RESOURCES
    }

    /// Requests as a Kubernetes resource list.
    pub fn requests(&self) -> BTreeMap<String, Quantity> {
        resource_list(self.requests_cpu, self.requests_memory)
    }

    /// Limits as a Kubernetes resource list.
    pub fn limits(&self) -> BTreeMap<String, Quantity> {
        resource_list(self.limits_cpu, self.limits_memory)
    }

    /// Container resource requirements carrying both requests and limits.
    pub fn to_resource_requirements(&self) -> ResourceRequirements {
        ResourceRequirements {
            requests: Some(self.requests()),
            limits: Some(self.limits()),
            ..Default::default()
        }
    }
}

fn resource_list(cpu: CpuQuantity, memory: MemoryQuantity) -> BTreeMap<String, Quantity> {
    BTreeMap::from([
        ("cpu".to_string(), Quantity(cpu.to_string())),
        ("memory".to_string(), Quantity(memory.to_string())),
    ])
}

impl From<ResolvedResources> for ResourceRequirements {
    fn from(resources: ResolvedResources) -> Self {
        resources.to_resource_requirements()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_resources() {
        let defaults = ResolvedResources::defaults();
        assert_eq!(defaults.requests_cpu.millis(), 50);
        assert_eq!(defaults.requests_memory.bytes(), 67_108_864);
        assert_eq!(defaults.limits_cpu.millis(), 500);
        assert_eq!(defaults.limits_memory.bytes(), 536_870_912);
        assert!(defaults.is_default());
    }

    #[test]
    fn test_cpu_display() {
        assert_eq!(CpuQuantity::from_millis(0).to_string(), "0m");
        assert_eq!(CpuQuantity::from_millis(100).to_string(), "100m");
        assert_eq!(CpuQuantity::from_millis(1000).to_string(), "1");
        assert_eq!(CpuQuantity::from_millis(2000).to_string(), "2");
        assert_eq!(CpuQuantity::from_millis(1500).to_string(), "1500m");
    }

    #[test]
    fn test_memory_display() {
        assert_eq!(MemoryQuantity::from_bytes(0).to_string(), "0");
        assert_eq!(MemoryQuantity::from_bytes(128 * MIB).to_string(), "128Mi");
        assert_eq!(MemoryQuantity::from_bytes(1024 * MIB).to_string(), "1Gi");
        assert_eq!(MemoryQuantity::from_bytes(2048).to_string(), "2Ki");
        assert_eq!(MemoryQuantity::from_bytes(1000).to_string(), "1000");
    }

    #[test]
    fn test_spec_field_access() {
        let mut spec = ResourceSpec::new("100m", "128Mi", "200m", "256Mi");
        assert_eq!(spec.get(ResourceField::RequestsCpu), "100m");
        assert_eq!(spec.get(ResourceField::LimitsMemory), "256Mi");

        spec.set(ResourceField::LimitsCpu, "1");
        assert_eq!(spec.limits.cpu, "1");
    }

    #[test]
    fn test_unit_multiplier() {
        assert_eq!(ResourceField::RequestsCpu.unit_multiplier(), 1);
        assert_eq!(ResourceField::LimitsMemory.unit_multiplier(), 1_048_576);
    }

    #[test]
    fn test_resource_requirements() {
        let reqs = DEFAULT_RESOURCES.to_resource_requirements();
        let requests = reqs.requests.unwrap();
        let limits = reqs.limits.unwrap();
        assert_eq!(requests["cpu"], Quantity("50m".to_string()));
        assert_eq!(requests["memory"], Quantity("64Mi".to_string()));
        assert_eq!(limits["cpu"], Quantity("500m".to_string()));
        assert_eq!(limits["memory"], Quantity("512Mi".to_string()));
    }

    #[test]
    fn test_spec_deserialize_missing_fields() {
        let spec: ResourceSpec =
            serde_json::from_str(r#"{"requests": {"cpu": "100m"}}"#).unwrap();
        assert_eq!(spec.requests.cpu, "100m");
        assert_eq!(spec.requests.memory, "");
        assert_eq!(spec.limits, ResourceList::default());
    }

    #[test]
    fn test_resolved_serializes_camel_case() {
        let json = serde_json::to_value(DEFAULT_RESOURCES).unwrap();
        assert_eq!(json["requestsCpu"], 50);
        assert_eq!(json["limitsMemory"], 536_870_912);
    }
}
