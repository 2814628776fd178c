//! Sanitizer policy.
//!
//! A [`Policy`] is the immutable, fully-resolved allow-list one sanitize call
//! runs against. It starts from the built-in defaults in [`defaults`] and is
//! refined by merging caller [`PolicyOverrides`] over it. All names are stored
//! lowercase except class tokens, which are case-sensitive in HTML. The
//! sanitizer turns a policy into an `ammonia::Builder` per call (see
//! `builder.rs`).

mod builder;
pub mod defaults;
mod loader;
mod overrides;

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::error::SanitizeError;

pub use loader::load_policy_file;
pub use overrides::{PolicyOverrides, PolicyOverridesBuilder};

/// Callback run on every attribute that passed the allow-list.
///
/// Receives the element name, the attribute name and the decoded value.
/// Returning `None` removes the attribute; returning a value replaces it.
pub type AttributeFilter =
    Arc<dyn for<'u> Fn(&str, &str, &'u str) -> Option<Cow<'u, str>> + Send + Sync>;

#[derive(Clone)]
pub struct Policy {
    allowed_tags: BTreeSet<String>,
    allowed_attributes: BTreeMap<String, BTreeSet<String>>,
    allowed_classes: BTreeMap<String, BTreeSet<String>>,
    allowed_schemes: BTreeSet<String>,
    discard_content_tags: BTreeSet<String>,
    attribute_filter: Option<AttributeFilter>,
}

impl Default for Policy {
    fn default() -> Self {
        Policy {
            allowed_tags: lowercase_set(defaults::DEFAULT_ALLOWED_TAGS),
            allowed_attributes: defaults::DEFAULT_ALLOWED_ATTRIBUTES
                .iter()
                .map(|(tag, attributes)| (tag.to_string(), lowercase_set(attributes)))
                .collect(),
            allowed_classes: BTreeMap::new(),
            allowed_schemes: lowercase_set(defaults::DEFAULT_ALLOWED_SCHEMES),
            discard_content_tags: lowercase_set(defaults::DEFAULT_DISCARD_CONTENT_TAGS),
            attribute_filter: None,
        }
    }
}

impl fmt::Debug for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Policy")
            .field("allowed_tags", &self.allowed_tags)
            .field("allowed_attributes", &self.allowed_attributes)
            .field("allowed_classes", &self.allowed_classes)
            .field("allowed_schemes", &self.allowed_schemes)
            .field("discard_content_tags", &self.discard_content_tags)
            .field("attribute_filter", &self.attribute_filter.is_some())
            .finish()
    }
}

impl Policy {
    /// Merge caller overrides over this policy, returning a new policy.
    ///
    /// List-valued options replace the current list; per-tag maps replace only
    /// the entries for the tags they mention. The attribute filter carries
    /// over unchanged.
    pub fn merge(&self, overrides: &PolicyOverrides) -> Result<Policy, SanitizeError> {
        overrides.validate()?;

        let mut merged = self.clone();

        if let Some(tags) = &overrides.allowed_tags {
            merged.allowed_tags = lowercase_set(tags);
        }
        if let Some(schemes) = &overrides.allowed_schemes {
            merged.allowed_schemes = lowercase_set(schemes);
        }
        if let Some(tags) = &overrides.discard_content_tags {
            merged.discard_content_tags = lowercase_set(tags);
        }

        for (tag, attributes) in &overrides.allowed_attributes {
            merged
                .allowed_attributes
                .insert(tag.to_ascii_lowercase(), lowercase_set(attributes));
        }
        for (tag, classes) in &overrides.allowed_classes {
            merged.allowed_classes.insert(
                tag.to_ascii_lowercase(),
                classes.iter().cloned().collect(),
            );
        }

        Ok(merged)
    }

    /// Attach an attribute filter, run after the allow-list and the URL
    /// check.
    pub fn with_attribute_filter<F>(mut self, filter: F) -> Self
    where
        F: for<'u> Fn(&str, &str, &'u str) -> Option<Cow<'u, str>> + Send + Sync + 'static,
    {
        self.attribute_filter = Some(Arc::new(filter));
        self
    }

    pub fn allows_tag(&self, tag: &str) -> bool {
        self.allowed_tags.contains(&tag.to_ascii_lowercase())
    }

    pub fn allows_attribute(&self, tag: &str, attribute: &str) -> bool {
        self.allowed_attributes
            .get(&tag.to_ascii_lowercase())
            .is_some_and(|allowed| allowed.contains(&attribute.to_ascii_lowercase()))
    }

    pub fn allows_class(&self, tag: &str, class: &str) -> bool {
        self.allowed_classes
            .get(&tag.to_ascii_lowercase())
            .is_some_and(|allowed| allowed.contains(class))
    }

    /// Whether a disallowed `tag` is removed together with its content.
    /// Allowed tags are never discarded.
    pub fn discards_content(&self, tag: &str) -> bool {
        let tag = tag.to_ascii_lowercase();
        self.discard_content_tags.contains(&tag) && !self.allowed_tags.contains(&tag)
    }

    /// Whether a URI-valued attribute may carry `url`.
    ///
    /// Relative references are always accepted. Absolute URLs must use an
    /// allowed scheme; anything that fails to parse as a URL is rejected.
    pub fn allows_url(&self, url: &str) -> bool {
        match Url::parse(url) {
            Ok(parsed) => self.allowed_schemes.contains(parsed.scheme()),
            Err(url::ParseError::RelativeUrlWithoutBase) => true,
            Err(_) => false,
        }
    }

    pub fn allowed_tags(&self) -> impl Iterator<Item = &str> {
        self.allowed_tags.iter().map(String::as_str)
    }
}

fn lowercase_set<S: AsRef<str>>(values: &[S]) -> BTreeSet<String> {
    values
        .iter()
        .map(|v| v.as_ref().to_ascii_lowercase())
        .collect()
}
