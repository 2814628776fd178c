//! Allow-list HTML sanitizer for markdown-rendered content.
//!
//! ```
//! use sanitize_markdown::sanitize;
//!
//! let clean = sanitize(r#"<p onclick="x()">Hello <font>world</font><script>x()</script>"#);
//! assert_eq!(clean, "<p>Hello world</p>");
//! ```

pub mod error;
pub mod policy;
pub mod sanitizer;

pub use error::SanitizeError;
pub use policy::{
    AttributeFilter, Policy, PolicyOverrides, PolicyOverridesBuilder, load_policy_file,
};
pub use sanitizer::{Sanitizer, sanitize, sanitize_with};
