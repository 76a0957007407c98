//! Handlers for the `resolve` and `defaults` commands.

use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::resources::{
    ResolveError, ResolvedResources, ResourceField, ResourceSpec, load_resource_spec,
    resolve_or_default,
};
use colored::Colorize;
use k8s_openapi::api::core::v1::ResourceRequirements;
use serde::Serialize;
use std::path::PathBuf;

/// Options for the resolve command
#[derive(Debug, Default)]
pub struct ResolveOptions {
    /// Manifest to read the base spec from
    pub file: Option<PathBuf>,
    pub requests_cpu: Option<String>,
    pub requests_memory: Option<String>,
    pub limits_cpu: Option<String>,
    pub limits_memory: Option<String>,
    pub format: Option<OutputFormat>,
    pub strict: bool,
}

impl ResolveOptions {
    /// Build the input spec: manifest first, flags on top.
    pub fn build_spec(&self) -> Result<ResourceSpec> {
        let mut spec = match &self.file {
            Some(path) => load_resource_spec(path)?,
            None => ResourceSpec::default(),
        };

        let overrides = [
            (ResourceField::RequestsCpu, &self.requests_cpu),
            (ResourceField::RequestsMemory, &self.requests_memory),
            (ResourceField::LimitsCpu, &self.limits_cpu),
            (ResourceField::LimitsMemory, &self.limits_memory),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                spec.set(field, value.as_str());
            }
        }

        Ok(spec)
    }
}

/// Outcome of one resolution, as printed by the CLI.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionReport {
    pub input: ResourceSpec,
    pub resources: ResolvedResources,
    pub requirements: ResourceRequirements,
    pub used_defaults: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResolutionReport {
    pub fn new(
        input: ResourceSpec,
        resources: ResolvedResources,
        error: Option<&ResolveError>,
    ) -> Self {
        Self {
            input,
            resources,
            requirements: resources.into(),
            used_defaults: error.is_some(),
            failed_field: error.map(|e| e.field().to_string()),
            error: error.map(|e| e.to_string()),
        }
    }
}

/// Handle `hs-resources resolve`.
pub fn handle_resolve(options: ResolveOptions, config: &Config) -> Result<String> {
    let spec = options.build_spec()?;
    let (resources, error) = resolve_or_default(&spec);

    if let Some(err) = error.as_ref() {
        if options.strict || config.resolve.strict {
            return Err(err.clone().into());
        }
        log::warn!("Using default resources: {}", err);
    } else {
        log::info!("Resolved resources for {:?}", spec);
    }

    let format = options.format.unwrap_or(config.output.format);
    let report = ResolutionReport::new(spec, resources, error.as_ref());
    let output = render_report(&report, format)?;
    println!("{}", output);
    Ok(output)
}

/// Handle `hs-resources defaults`.
pub fn handle_defaults(format: Option<OutputFormat>, config: &Config) -> Result<String> {
    let defaults = ResolvedResources::defaults();
    let output = match format.unwrap_or(config.output.format) {
        OutputFormat::Json => serde_json::to_string_pretty(defaults)?,
        OutputFormat::Table => render_table(defaults),
    };
    println!("{}", output);
    Ok(output)
}

pub fn render_report(report: &ResolutionReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Table => {
            let mut out = String::new();
            if let Some(error) = &report.error {
                out.push_str(&format!("{}\n", "Using default resources".yellow().bold()));
                out.push_str(&format!("  {}\n\n", error.yellow()));
            }
            out.push_str(&render_table(&report.resources));
            Ok(out)
        }
    }
}

fn render_table(resources: &ResolvedResources) -> String {
    let rows = [
        (
            ResourceField::RequestsCpu,
            resources.requests_cpu.to_string(),
            format!("{} millicores", resources.requests_cpu.millis()),
        ),
        (
            ResourceField::RequestsMemory,
            resources.requests_memory.to_string(),
            format!("{} bytes", resources.requests_memory.bytes()),
        ),
        (
            ResourceField::LimitsCpu,
            resources.limits_cpu.to_string(),
            format!("{} millicores", resources.limits_cpu.millis()),
        ),
        (
            ResourceField::LimitsMemory,
            resources.limits_memory.to_string(),
            format!("{} bytes", resources.limits_memory.bytes()),
        ),
    ];

    rows.iter()
        .map(|(field, quantity, raw)| {
            format!(
                "{:<16} {:<10} {}",
                field.as_str().cyan(),
                quantity.bold(),
                raw.dimmed()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
