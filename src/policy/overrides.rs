//! Caller-supplied partial policy.
//!
//! Overrides are either deserialized from a JSON/YAML document using the
//! camelCase option names (`allowedTags`, `allowedAttributes`,
//! `allowedClasses`, `allowedSchemes`, `discardContentTags`) or assembled in
//! code through [`PolicyOverridesBuilder`]. Every entry point validates before
//! handing the overrides out, so a `PolicyOverrides` obtained from this module
//! is always mergeable.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use derive_builder::Builder;
use regex::Regex;
use serde::Deserialize;

use crate::error::SanitizeError;

/// Tag and attribute names: a letter followed by name characters.
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_:.\-]*$").unwrap());

/// URL scheme names per RFC 3986.
static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*$").unwrap());

/// Partial policy merged over the defaults.
///
/// `allowed_tags`, `allowed_schemes` and `discard_content_tags` replace the
/// default list wholesale when present. `allowed_attributes` and
/// `allowed_classes` replace the default entry of each tag they mention and
/// leave every other tag alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder, Deserialize)]
#[builder(build_fn(skip))]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PolicyOverrides {
    #[builder(setter(into, strip_option))]
    #[serde(default)]
    pub allowed_tags: Option<Vec<String>>,
    #[builder(setter(into))]
    #[serde(default)]
    pub allowed_attributes: BTreeMap<String, Vec<String>>,
    #[builder(setter(into))]
    #[serde(default)]
    pub allowed_classes: BTreeMap<String, Vec<String>>,
    #[builder(setter(into, strip_option))]
    #[serde(default)]
    pub allowed_schemes: Option<Vec<String>>,
    #[builder(setter(into, strip_option))]
    #[serde(default)]
    pub discard_content_tags: Option<Vec<String>>,
}

impl PolicyOverridesBuilder {
    /// Set the attribute allow-list of a single tag.
    pub fn tag_attributes(&mut self, tag: &str, attributes: &[&str]) -> &mut Self {
        self.allowed_attributes
            .get_or_insert_with(BTreeMap::new)
            .insert(tag.to_string(), to_owned_list(attributes));
        self
    }

    /// Set the class allow-list of a single tag.
    pub fn tag_classes(&mut self, tag: &str, classes: &[&str]) -> &mut Self {
        self.allowed_classes
            .get_or_insert_with(BTreeMap::new)
            .insert(tag.to_string(), to_owned_list(classes));
        self
    }

    pub fn build(&self) -> Result<PolicyOverrides, SanitizeError> {
        let overrides = PolicyOverrides {
            allowed_tags: self.allowed_tags.clone().flatten(),
            allowed_attributes: self.allowed_attributes.clone().unwrap_or_default(),
            allowed_classes: self.allowed_classes.clone().unwrap_or_default(),
            allowed_schemes: self.allowed_schemes.clone().flatten(),
            discard_content_tags: self.discard_content_tags.clone().flatten(),
        };
        overrides.validate()?;
        Ok(overrides)
    }
}

impl PolicyOverrides {
    /// Parse overrides from a JSON document.
    pub fn from_json(content: &str) -> Result<Self, SanitizeError> {
        let overrides: Self = serde_json::from_str(content)?;
        overrides.validate()?;
        Ok(overrides)
    }

    /// Convert an already-parsed JSON value, e.g. one section of a larger
    /// configuration document.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, SanitizeError> {
        let overrides: Self = serde_json::from_value(value)?;
        overrides.validate()?;
        Ok(overrides)
    }

    /// Parse overrides from a YAML document.
    pub fn from_yaml(content: &str) -> Result<Self, SanitizeError> {
        let overrides: Self = serde_yaml::from_str(content)?;
        overrides.validate()?;
        Ok(overrides)
    }

    /// Check that every name in the overrides can actually match markup.
    pub fn validate(&self) -> Result<(), SanitizeError> {
        if let Some(tags) = &self.allowed_tags {
            validate_names("allowedTags", tags)?;
        }
        if let Some(tags) = &self.discard_content_tags {
            validate_names("discardContentTags", tags)?;
        }

        for (tag, attributes) in &self.allowed_attributes {
            validate_name("allowedAttributes", tag)?;
            validate_names("allowedAttributes", attributes)?;
        }

        for (tag, classes) in &self.allowed_classes {
            validate_name("allowedClasses", tag)?;
            for class in classes {
                if class.is_empty() || class.chars().any(char::is_whitespace) {
                    return Err(SanitizeError::invalid_policy(format!(
                        "allowedClasses.{}: '{}' is not a single class token",
                        tag, class
                    )));
                }
            }
        }

        if let Some(schemes) = &self.allowed_schemes {
            for scheme in schemes {
                if !SCHEME_RE.is_match(scheme) {
                    return Err(SanitizeError::invalid_policy(format!(
                        "allowedSchemes: '{}' is not a URL scheme",
                        scheme
                    )));
                }
            }
        }

        Ok(())
    }
}

fn validate_names(field: &str, names: &[String]) -> Result<(), SanitizeError> {
    names.iter().try_for_each(|name| validate_name(field, name))
}

fn validate_name(field: &str, name: &str) -> Result<(), SanitizeError> {
    if NAME_RE.is_match(name) {
        Ok(())
    } else {
        Err(SanitizeError::invalid_policy(format!(
            "{}: '{}' is not a valid name",
            field, name
        )))
    }
}

fn to_owned_list(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
