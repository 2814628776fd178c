//! Load policy overrides from a file on disk.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use log::warn;

use super::overrides::PolicyOverrides;

/// Read a JSON or YAML overrides document.
///
/// The format is picked from the extension (`.json`, `.yml`, `.yaml`). Files
/// with any other extension are tried as JSON first, then as YAML.
pub fn load_policy_file(path: &Path) -> Result<PolicyOverrides> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read policy file {:?}", path))?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let overrides = match extension.as_deref() {
        Some("json") => PolicyOverrides::from_json(&content)
            .with_context(|| format!("Invalid JSON policy in {:?}", path))?,
        Some("yml") | Some("yaml") => PolicyOverrides::from_yaml(&content)
            .with_context(|| format!("Invalid YAML policy in {:?}", path))?,
        _ => {
            warn!(
                "Policy file {:?} has no recognized extension, guessing format",
                path
            );
            PolicyOverrides::from_json(&content)
                .or_else(|_| PolicyOverrides::from_yaml(&content))
                .map_err(|e| anyhow!("Policy file {:?} is neither JSON nor YAML: {}", path, e))?
        }
    };

    Ok(overrides)
}
