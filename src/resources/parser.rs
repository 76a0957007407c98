//! Reading a [`ResourceSpec`] out of YAML manifests.
//!
//! Accepts the health service custom resource, a bare `resources:` block,
//! or a document that is itself a `requests`/`limits` map.
//!
//! Values are deserialized straight into `String` fields so that scalars
//! keep their text as written: `cpu: +5` stays `"+5"`, `cpu: 0x10` stays
//! `"0x10"`. Going through `serde_yaml::Value` would reformat numbers.

use super::types::{ResourceList, ResourceSpec};
use crate::error::{HealthServiceError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A `requests`/`limits` map.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ResourcesBlock {
    requests: Option<ResourceList>,
    limits: Option<ResourceList>,
}

impl ResourcesBlock {
    fn is_present(&self) -> bool {
        self.requests.is_some() || self.limits.is_some()
    }

    fn into_spec(self) -> ResourceSpec {
        ResourceSpec {
            requests: self.requests.unwrap_or_default(),
            limits: self.limits.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CustomResourceSpec {
    resources: Option<ResourcesBlock>,
}

/// The three supported layouts; unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ManifestDocument {
    requests: Option<ResourceList>,
    limits: Option<ResourceList>,
    resources: Option<ResourcesBlock>,
    spec: Option<CustomResourceSpec>,
}

impl ManifestDocument {
    fn into_resources(self) -> Option<ResourcesBlock> {
        let root = ResourcesBlock {
            requests: self.requests,
            limits: self.limits,
        };
        let candidates = [
            Some(root),
            self.resources,
            self.spec.and_then(|s| s.resources),
        ];

        candidates
            .into_iter()
            .flatten()
            .find(ResourcesBlock::is_present)
    }
}

/// Load a resource spec from a YAML file.
pub fn load_resource_spec(path: &Path) -> Result<ResourceSpec> {
    let content = fs::read_to_string(path)?;
    let spec = parse_resource_spec(&content)?;
    log::debug!("Loaded resource spec from {}", path.display());
    Ok(spec)
}

/// Parse a resource spec from YAML text.
///
/// Missing entries are left empty and fail later during resolution.
pub fn parse_resource_spec(content: &str) -> Result<ResourceSpec> {
    let doc: ManifestDocument = serde_yaml::from_str(content)
        .map_err(|e| HealthServiceError::Manifest(e.to_string()))?;

    let resources = doc.into_resources().ok_or_else(|| {
        HealthServiceError::Manifest(
            "no `requests` or `limits` found at the root, `resources` or `spec.resources`"
                .to_string(),
        )
    })?;

    Ok(resources.into_spec())
}
