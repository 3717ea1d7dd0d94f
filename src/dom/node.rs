//! Typed read-only access to document nodes.

use std::fmt;

use super::arena::{Attribute, Document, NodeData, NodeId};

/// Borrowed handle to one node of a [`Document`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub(crate) fn new(doc: &'a Document, id: NodeId) -> Self {
        Self { doc, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn data(&self) -> Option<&'a NodeData> {
        self.doc.get(self.id).map(|n| &n.data)
    }

    pub fn is_element(&self) -> bool {
        matches!(self.data(), Some(NodeData::Element { .. }))
    }

    /// Element local name, lower-cased by the parser. `None` for non-elements.
    pub fn tag_name(&self) -> Option<&'a str> {
        match self.data() {
            Some(NodeData::Element { name, .. }) => Some(&*name.local),
            _ => None,
        }
    }

    fn attrs(&self) -> &'a [Attribute] {
        match self.data() {
            Some(NodeData::Element { attrs, .. }) => attrs.as_slice(),
            _ => &[],
        }
    }

    /// Value of the first attribute with this local name, if present.
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.attrs()
            .iter()
            .find(|a| a.name.local.as_ref() == name)
            .map(|a| a.value.as_str())
    }

    /// All attributes as (name, value) pairs, in source order.
    pub fn attributes(self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.attrs()
            .iter()
            .map(|a| (&*a.name.local, a.value.as_str()))
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        let parent = self.doc.get(self.id)?.parent;
        self.doc.node(parent)
    }

    /// Direct children, in document order.
    pub fn children(&self) -> Children<'a> {
        let first = self
            .doc
            .get(self.id)
            .map(|n| n.first_child)
            .unwrap_or(NodeId::NONE);
        Children {
            doc: self.doc,
            current: first,
        }
    }

    /// This node and everything below it, depth-first pre-order.
    pub fn descendants(&self) -> Descendants<'a> {
        Descendants::new(self.doc, self.id)
    }

    /// Concatenated text of this node and all of its descendants.
    ///
    /// Whitespace is kept exactly as parsed. Comments do not contribute.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        for node in self.descendants() {
            if let Some(NodeData::Text(t)) = node.data() {
                text.push_str(t);
            }
        }
        text
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("tag", &self.tag_name())
            .finish()
    }
}

/// Iterator over the children of a node.
pub struct Children<'a> {
    doc: &'a Document,
    current: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current;
        let node = self.doc.get(id)?;
        self.current = node.next_sibling;
        Some(NodeRef::new(self.doc, id))
    }
}

/// Depth-first pre-order walk of a subtree, following sibling links.
///
/// Holds no stack; each step is O(depth) at worst.
pub struct Descendants<'a> {
    doc: &'a Document,
    scope: NodeId,
    next: NodeId,
}

impl<'a> Descendants<'a> {
    pub(crate) fn new(doc: &'a Document, scope: NodeId) -> Self {
        Self {
            doc,
            scope,
            next: scope,
        }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next;
        let node = self.doc.get(current)?;
        self.next = if node.first_child.is_some() {
            node.first_child
        } else {
            self.doc.following(current, self.scope)
        };
        Some(NodeRef::new(self.doc, current))
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::parse_html;

    #[test]
    fn test_typed_accessors() {
        let doc = parse_html(r#"<a href="http://x.com" data-x="1">Go <b>now</b></a>"#);
        let a = doc.elements_by_tag("a").next().expect("should find a");

        assert_eq!(a.tag_name(), Some("a"));
        assert_eq!(a.attribute("href"), Some("http://x.com"));
        assert_eq!(a.attribute("title"), None);
        assert_eq!(
            a.attributes().collect::<Vec<_>>(),
            vec![("href", "http://x.com"), ("data-x", "1")]
        );
        assert_eq!(a.text_content(), "Go now");
        assert_eq!(a.children().count(), 2);
        assert_eq!(a.parent().and_then(|p| p.tag_name()), Some("body"));
    }

    #[test]
    fn test_text_content_skips_comments() {
        let doc = parse_html("<p>one<!-- hidden -->two</p>");
        let p = doc.elements_by_tag("p").next().unwrap();
        assert_eq!(p.text_content(), "onetwo");
    }

    #[test]
    fn test_descendants_scoped_to_subtree() {
        let doc = parse_html("<div><span>a</span><i>b</i></div><em>c</em>");
        let div = doc.elements_by_tag("div").next().unwrap();
        let tags: Vec<_> = div.descendants().filter_map(|n| n.tag_name()).collect();
        assert_eq!(tags, vec!["div", "span", "i"]);
    }

    #[test]
    fn test_text_node_has_no_tag() {
        let doc = parse_html("<p>plain</p>");
        let p = doc.elements_by_tag("p").next().unwrap();
        let text = p.children().next().unwrap();
        assert!(!text.is_element());
        assert_eq!(text.tag_name(), None);
        assert_eq!(text.attribute("href"), None);
        assert_eq!(text.text_content(), "plain");
    }
}
