//! Built-in allow-list for markdown-rendered HTML.
//!
//! Covers what common markdown renderers emit (headings, lists, tables,
//! emphasis, code, links, images, details/summary) and nothing else.

/// Tags a markdown renderer produces.
pub const DEFAULT_ALLOWED_TAGS: &[&str] = &[
    "a",
    "abbr",
    "article",
    "b",
    "blockquote",
    "br",
    "caption",
    "code",
    "del",
    "details",
    "div",
    "em",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "hr",
    "i",
    "img",
    "ins",
    "kbd",
    "li",
    "main",
    "mark",
    "ol",
    "p",
    "pre",
    "section",
    "span",
    "strike",
    "strong",
    "sub",
    "summary",
    "sup",
    "table",
    "tbody",
    "td",
    "th",
    "thead",
    "tr",
    "u",
    "ul",
];

/// Per-tag attribute allow-list.
pub const DEFAULT_ALLOWED_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("a", &["href", "name", "target", "title", "aria-label"]),
    ("iframe", &["allowfullscreen", "frameborder", "src"]),
    ("img", &["src", "alt", "title", "aria-label"]),
];

/// Schemes accepted in URI-valued attributes.
pub const DEFAULT_ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Disallowed tags whose content is removed along with them.
pub const DEFAULT_DISCARD_CONTENT_TAGS: &[&str] = &[
    "embed", "iframe", "noscript", "object", "script", "select", "style", "template", "textarea",
    "title",
];
