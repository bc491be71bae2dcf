//! Navigation helpers over a parsed XML tree.
//!
//! FB2 files in the wild are namespaced inconsistently (or not at all), so
//! every lookup here matches on local names only and degrades to "absent"
//! instead of failing.

use roxmltree::Node;

/// Strip a namespace qualifier from a tag or attribute name.
///
/// Handles both Clark notation (`{uri}body` -> `body`) and prefix form
/// (`l:href` -> `href`). Names without a qualifier pass through unchanged.
pub fn local_name(tag: &str) -> &str {
    let name = tag.rsplit_once('}').map_or(tag, |(_, n)| n);
    name.rsplit_once(':').map_or(name, |(_, n)| n)
}

/// First direct element child whose local name matches.
pub fn first_child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|c| c.is_element() && local_name(c.tag_name().name()) == name)
}

/// All direct element children matching a local name, in source order.
pub fn children_named<'a, 'input>(
    node: Node<'a, 'input>,
    name: &str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |c| c.is_element() && local_name(c.tag_name().name()) == name)
}

/// Full text content of an element, including text inside nested inline
/// markup, concatenated in document order.
pub fn text_content(node: Node) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}
