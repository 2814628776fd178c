//! Conversion of a [`Policy`] into an `ammonia::Builder`.
//!
//! `class` never goes through the plain attribute allow-list. It is allowed
//! on exactly the tags that have an `allowed_classes` entry, and its tokens
//! are filtered in the attribute filter so that an attribute left without
//! tokens is removed rather than emitted empty.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use ammonia::{Builder, UrlRelative};
use log::debug;

use super::Policy;

impl Policy {
    /// An ammonia builder enforcing this policy. Borrows the policy's names.
    pub(crate) fn to_builder(&self) -> Builder<'_> {
        let tags: HashSet<&str> = self.allowed_tags.iter().map(String::as_str).collect();

        let clean_content_tags: HashSet<&str> = self
            .discard_content_tags
            .iter()
            .map(String::as_str)
            .filter(|tag| {
                let allowed = tags.contains(tag);
                if allowed {
                    debug!("<{}> is allowed, keeping its content", tag);
                }
                !allowed
            })
            .collect();

        let mut tag_attributes: HashMap<&str, HashSet<&str>> = self
            .allowed_attributes
            .iter()
            .map(|(tag, attributes)| {
                let attributes = attributes
                    .iter()
                    .map(String::as_str)
                    .filter(|attribute| *attribute != "class")
                    .collect();
                (tag.as_str(), attributes)
            })
            .collect();
        for tag in self.allowed_classes.keys() {
            tag_attributes.entry(tag.as_str()).or_default().insert("class");
        }

        let url_schemes: HashSet<&str> = self.allowed_schemes.iter().map(String::as_str).collect();

        let allowed_classes = self.allowed_classes.clone();
        let user_filter = self.attribute_filter.clone();

        let mut builder = Builder::empty();
        builder
            .tags(tags)
            .clean_content_tags(clean_content_tags)
            .tag_attributes(tag_attributes)
            .url_schemes(url_schemes)
            .url_relative(UrlRelative::PassThrough)
            .link_rel(None)
            .strip_comments(true)
            .attribute_filter(move |element, attribute, value| {
                let value = match &user_filter {
                    Some(filter) => filter(element, attribute, value)?,
                    None => Cow::Borrowed(value),
                };
                if attribute != "class" {
                    return Some(value);
                }

                let allowed = allowed_classes.get(element)?;
                let kept: Vec<&str> = value
                    .split_ascii_whitespace()
                    .filter(|class| allowed.contains(*class))
                    .collect();
                if kept.is_empty() {
                    None
                } else {
                    Some(Cow::Owned(kept.join(" ")))
                }
            });
        builder
    }
}
