//! Command handlers for CLI operations
//!
//! This module implements the handlers for all CLI commands:
//! - rate: Score an add-on descriptor
//! - info: Show metadata for an installed add-on
//! - repo-id / hash: Resolve repository ids
//! - purge: Remove an add-on's data directory

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use std::path::{Component, Path};
use std::sync::Arc;

use sdk::{AddonDescriptor, AddonErrorExt, EngineError};

use crate::config::Config;
use crate::guard::{guard_installed, AddonOperation};
use crate::purge::DataPurger;
use crate::repository::{extract_repository_id, hash_repository_name};
use crate::security::{assess, rate_security, RATING_BASELINE};
use crate::telemetry::TracingSink;

/// Output format for command results
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for machine consumption
    Json,
}

/// Read and parse an add-on descriptor file
pub fn load_descriptor(path: &Path) -> Result<AddonDescriptor> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read descriptor {}", path.display()))?;
    let addon = AddonDescriptor::from_json(&contents)
        .with_context(|| format!("Failed to parse descriptor {}", path.display()))?;
    Ok(addon)
}

/// Score an add-on descriptor
pub fn handle_rate(descriptor: &Path, explain: bool, format: OutputFormat) -> Result<()> {
    let addon = load_descriptor(descriptor)?;
    let rating = assess(&addon);

    match format {
        OutputFormat::Text => {
            println!("{}: {}", addon.slug, rating.score);
            if explain {
                println!("  baseline: {}", RATING_BASELINE);
                for adjustment in &rating.adjustments {
                    println!("  {:+} {}", adjustment.delta, adjustment.factor.label());
                }
                if rating.runtime_override {
                    println!("  container runtime API access: forced to 1");
                }
            }
        }
        OutputFormat::Json => {
            let output = if explain {
                json!({ "slug": addon.slug, "rating": rating })
            } else {
                json!({ "slug": addon.slug, "rating": rating.score })
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

/// Metadata shown for an installed add-on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddonSummary {
    pub slug: String,
    pub rating: u8,
}

/// Lifecycle operation that reports an add-on's metadata
pub struct DescribeAddon;

#[async_trait]
impl AddonOperation for DescribeAddon {
    type Args = ();
    type Output = AddonSummary;
    type Error = EngineError;

    async fn call(&self, addon: &AddonDescriptor, _args: ()) -> Result<AddonSummary, EngineError> {
        Ok(AddonSummary {
            slug: addon.slug.clone(),
            rating: rate_security(addon),
        })
    }
}

/// Show metadata for an installed add-on
pub async fn handle_info(descriptor: &Path, format: OutputFormat) -> Result<()> {
    let addon = load_descriptor(descriptor)?;
    let describe = guard_installed(DescribeAddon, Arc::new(TracingSink));

    let summary = match describe.call(&addon, ()).await {
        Ok(summary) => summary,
        Err(e) => anyhow::bail!("{}. {}", e, e.user_hint()),
    };

    match format {
        OutputFormat::Text => {
            println!("Add-on: {}", summary.slug);
            println!("  Security rating: {}", summary.rating);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

/// Print the canonical id of a repository directory
pub fn handle_repo_id(path: &Path, format: OutputFormat) -> Result<()> {
    let id = extract_repository_id(path);
    print_repository_id(&id, format)
}

/// Print the id of a repository name
pub fn handle_hash(name: &str, format: OutputFormat) -> Result<()> {
    let id = hash_repository_name(name);
    print_repository_id(&id, format)
}

fn print_repository_id(id: &str, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => println!("{}", id),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ "id": id }))?);
        }
    }
    Ok(())
}

/// Remove an add-on's data directory
///
/// Always succeeds once the slug is accepted; deletion failures are logged.
pub async fn handle_purge(slug: &str, config: &Config, format: OutputFormat) -> Result<()> {
    validate_slug(slug)?;

    let folder = config.addon_data_dir(slug);
    let purger = DataPurger::from_config(&config.purge, Arc::new(TracingSink));
    purger.purge(&folder).await;

    match format {
        OutputFormat::Text => println!("Purged data for {}", slug),
        OutputFormat::Json => {
            let output = json!({ "slug": slug, "folder": folder });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

/// A slug must name exactly one folder inside the data directory
fn validate_slug(slug: &str) -> Result<()> {
    let mut components = Path::new(slug).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => anyhow::bail!("Invalid add-on slug '{}'", slug),
    }
}
