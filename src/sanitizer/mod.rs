//! HTML sanitization.
//!
//! The input is parsed as an HTML fragment by `ammonia` (html5ever's
//! tokenizer and tree builder), filtered against the effective [`Policy`] and
//! serialized again. Parsing never fails: unclosed elements are closed where
//! the HTML parsing rules close them, and a tag still unterminated at the end
//! of the input is dropped along with its attributes.

#[cfg(test)]
mod sanitizer_test;


use std::sync::LazyLock;

use log::trace;

use crate::error::SanitizeError;
use crate::policy::{Policy, PolicyOverrides};

static DEFAULT_SANITIZER: LazyLock<Sanitizer> = LazyLock::new(Sanitizer::default);

/// A sanitizer bound to one effective policy. Cheap to share across threads.
#[derive(Debug, Clone, Default)]
pub struct Sanitizer {
    policy: Policy,
}

impl Sanitizer {
    pub fn new(policy: Policy) -> Self {
        Sanitizer { policy }
    }

    /// Sanitizer for the default policy with `overrides` merged over it.
    pub fn with_overrides(overrides: &PolicyOverrides) -> Result<Self, SanitizeError> {
        Ok(Sanitizer::new(Policy::default().merge(overrides)?))
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Sanitize `input`. Never fails: malformed markup is repaired or dropped.
    pub fn clean(&self, input: &str) -> String {
        let cleaned = self.policy.to_builder().clean(input).to_string();
        trace!("Sanitized {} bytes into {} bytes", input.len(), cleaned.len());
        cleaned
    }
}

/// Sanitize `input` with the default policy.
pub fn sanitize(input: &str) -> String {
    DEFAULT_SANITIZER.clean(input)
}

/// Sanitize `input` with `overrides` merged over the default policy.
///
/// Fails only when the overrides are invalid, before any parsing happens.
pub fn sanitize_with(input: &str, overrides: &PolicyOverrides) -> Result<String, SanitizeError> {
    Ok(Sanitizer::with_overrides(overrides)?.clean(input))
}
