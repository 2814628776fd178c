//! Recovery behavior on malformed and hostile markup.

use super::{Sanitizer, sanitize, sanitize_with};
use crate::policy::PolicyOverrides;

#[test]
fn test_unterminated_quoted_value_is_dropped() {
    assert_eq!(sanitize(r#"before<a title="never closed>after"#), "before");
}

#[test]
fn test_unterminated_end_tag_is_dropped() {
    assert_eq!(sanitize("<b>x</b"), "<b>x</b>");
}

#[test]
fn test_lone_less_than_is_escaped() {
    assert_eq!(sanitize("1 < 2 <3"), "1 &lt; 2 &lt;3");
    assert_eq!(sanitize("tail<"), "tail&lt;");
}

#[test]
fn test_comments_are_removed() {
    assert_eq!(sanitize("a<!-- hidden <b>bold</b> -->b<!---->c<!-->d"), "abcd");
    assert_eq!(sanitize("keep<!-- lost"), "keep");
}

#[test]
fn test_doctype_and_processing_instructions_are_removed() {
    assert_eq!(sanitize("<!DOCTYPE html><?xml version=\"1.0\"?>x"), "x");
}

#[test]
fn test_bogus_end_tags() {
    assert_eq!(sanitize("a</>b</ 3>c"), "abc");
    assert_eq!(sanitize("Trailing text</span> here"), "Trailing text here");
}

#[test]
fn test_duplicate_attribute_keeps_first() {
    assert_eq!(
        sanitize(r#"<a href="one" href="two">x</a>"#),
        r#"<a href="one">x</a>"#
    );
}

#[test]
fn test_bare_attribute_gets_empty_value() {
    let overrides = PolicyOverrides::from_json(r#"{ "allowedAttributes": { "a": ["download"] } }"#)
        .unwrap();
    assert_eq!(
        sanitize_with("<a download>f</a>", &overrides).unwrap(),
        r#"<a download="">f</a>"#
    );
}

#[test]
fn test_entities_are_normalized() {
    assert_eq!(
        sanitize("Tom &amp; Jerry &lt;3 caf&eacute; a&nbsp;b"),
        "Tom &amp; Jerry &lt;3 café a&nbsp;b"
    );
}

#[test]
fn test_multibyte_text() {
    assert_eq!(
        sanitize("<span title=\"ünïcødé\">日本語</span>"),
        "<span>日本語</span>"
    );
}

#[test]
fn test_implied_paragraph_end() {
    assert_eq!(sanitize("<p>one<p>two"), "<p>one</p><p>two</p>");
}

#[test]
fn test_implied_list_item_end() {
    assert_eq!(
        sanitize("<ul><li>one<li>two</ul>"),
        "<ul><li>one</li><li>two</li></ul>"
    );
}

#[test]
fn test_implied_table_structure() {
    assert_eq!(
        sanitize("<table><tr><td>a<td>b</table>"),
        "<table><tbody><tr><td>a</td><td>b</td></tr></tbody></table>"
    );
}

#[test]
fn test_disallowed_element_promotes_children() {
    assert_eq!(
        sanitize("<p><font size=3>a<em>b</em></font>c</p>"),
        "<p>a<em>b</em>c</p>"
    );
}

#[test]
fn test_content_removal_tags() {
    assert_eq!(
        sanitize(r#"a<script>alert(1)</script><iframe src="https://x">fallback</iframe>b"#),
        "ab"
    );
}

#[test]
fn test_script_content_is_raw_text() {
    assert_eq!(
        sanitize("<script>if (a<b) { x = '</b>'; }</SCRIPT >after"),
        "after"
    );

    let keep_content = PolicyOverrides::from_json(r#"{ "discardContentTags": [] }"#).unwrap();
    assert_eq!(
        sanitize_with("<script>if (a<b) { x = '</b>'; }</SCRIPT >after", &keep_content).unwrap(),
        "if (a&lt;b) { x = '&lt;/b&gt;'; }after"
    );
}

#[test]
fn test_deeply_nested_input() {
    const DEPTH: usize = 100_000;
    let input = format!("{}x", "<b>".repeat(DEPTH));

    let output = sanitize(&input);

    assert_eq!(output.matches("<b>").count(), DEPTH);
    assert_eq!(output.matches("</b>").count(), DEPTH);
    assert!(output.starts_with("<b><b>"));
    assert!(output.contains("<b>x</b>"));
}

#[test]
fn test_deeply_nested_disallowed_input() {
    const DEPTH: usize = 100_000;
    let input = format!("{}x", "<font>".repeat(DEPTH));
    assert_eq!(sanitize(&input), "x");
}

#[test]
fn test_sanitizer_output_is_stable() {
    let sanitizer = Sanitizer::default();
    let inputs = [
        "<p>one<p>two<ul><li>a<li>b</ul>",
        "<table><tr><td>a<td>b</table>trailing",
        "<b><i>x</b>y</i>",
        "<a href=\"/x\"><p>block in link</p></a>",
    ];
    for input in inputs {
        let once = sanitizer.clean(input);
        assert_eq!(sanitizer.clean(&once), once, "input: {input}");
    }
}
