//! Small roxmltree helpers for the XML-based codecs.
//!
//! Element and attribute names are matched case-insensitively and by local
//! name, since real-world ASX/WPL/XSPF producers disagree on both.

use roxmltree::{Document, Node, ParsingOptions};

use crate::error::FormatError;

pub(crate) fn parse_xml(text: &str) -> Result<Document<'_>, FormatError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Ok(Document::parse_with_options(text, options)?)
}

pub(crate) fn is_named(node: Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().name().eq_ignore_ascii_case(name)
}

pub(crate) fn is_named_any(node: Node<'_, '_>, names: &[&str]) -> bool {
    names.iter().any(|n| is_named(node, n))
}

pub(crate) fn attr<'a>(node: Node<'a, '_>, names: &[&str]) -> Option<&'a str> {
    names.iter().find_map(|name| {
        node.attributes()
            .find(|a| a.name().eq_ignore_ascii_case(name))
            .map(|a| a.value())
    })
}

/// Concatenated text content of `node`, trimmed.
pub(crate) fn text_of(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Trimmed text of the first direct child named one of `names`, if non-empty.
pub(crate) fn child_text(node: Node<'_, '_>, names: &[&str]) -> Option<String> {
    node.children()
        .find(|c| is_named_any(*c, names))
        .map(text_of)
        .filter(|t| !t.is_empty())
}
