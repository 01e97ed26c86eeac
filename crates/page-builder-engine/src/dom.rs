//! Portable mirror of a rendered DOM subtree.
//!
//! The content codec reads and writes this shape, and the render registry
//! keeps one per leaf so the edit controller can find a block's content
//! element by id instead of walking the live document.

use std::fmt::Write as _;

/// Attribute carrying the block type marker in edit mode
pub const ATTR_TYPE: &str = "data-pe-type";
/// Attribute carrying the block id in edit mode
pub const ATTR_ID: &str = "data-pe-id";
/// Attribute marking the content element inside a leaf
pub const ATTR_CONTENT: &str = "data-pe-content";
/// Prefix distinguishing leaf type markers from container markers
pub const LEAF_MARKER_PREFIX: &str = "ELEMENT-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomNode {
    Element(DomElement),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomElement {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<DomNode>,
}

impl DomElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn with_children(mut self, children: Vec<DomNode>) -> Self {
        self.children = children;
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl From<DomElement> for DomNode {
    fn from(element: DomElement) -> Self {
        DomNode::Element(element)
    }
}

impl DomNode {
    pub fn text(text: impl Into<String>) -> Self {
        DomNode::Text(text.into())
    }

    pub fn element(tag: impl Into<String>, children: Vec<DomNode>) -> Self {
        DomNode::Element(DomElement::new(tag).with_children(children))
    }

    pub fn as_element(&self) -> Option<&DomElement> {
        match self {
            DomNode::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Lower-cased tag name for elements
    pub fn tag(&self) -> Option<String> {
        self.as_element().map(|e| e.tag.to_ascii_lowercase())
    }

    pub fn children(&self) -> &[DomNode] {
        match self {
            DomNode::Element(element) => &element.children,
            _ => &[],
        }
    }

    /// Same semantics as the DOM `textContent` property: descendant text
    /// concatenated, comments excluded
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            DomNode::Text(text) => out.push_str(text),
            DomNode::Comment(_) => {}
            DomNode::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Depth-first search for the first element with `name="value"`
    pub fn find_by_attr(&self, name: &str, value: &str) -> Option<&DomElement> {
        let element = self.as_element()?;
        if element.attr(name) == Some(value) {
            return Some(element);
        }
        element
            .children
            .iter()
            .find_map(|child| child.find_by_attr(name, value))
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            DomNode::Text(text) => out.push_str(&html_escape::encode_text(text)),
            DomNode::Comment(text) => {
                let _ = write!(out, "<!--{text}-->");
            }
            DomNode::Element(element) => {
                let _ = write!(out, "<{}", element.tag);
                for (name, value) in &element.attrs {
                    if value.is_empty() {
                        let _ = write!(out, " {name}");
                    } else {
                        let _ = write!(
                            out,
                            " {name}=\"{}\"",
                            html_escape::encode_double_quoted_attribute(value)
                        );
                    }
                }
                out.push('>');
                for child in &element.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", element.tag);
            }
        }
    }
}

/// Serialize a list of sibling nodes to markup
pub fn nodes_to_html(nodes: &[DomNode]) -> String {
    nodes.iter().map(DomNode::to_html).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_content_skips_comments() {
        let node = DomNode::element(
            "div",
            vec![
                DomNode::text("a"),
                DomNode::Comment("hidden".to_string()),
                DomNode::element("em", vec![DomNode::text("b")]),
            ],
        );
        assert_eq!(node.text_content(), "ab");
    }

    #[test]
    fn test_to_html_escapes_text_and_attributes() {
        let node: DomNode = DomElement::new("div")
            .with_attr(ATTR_ID, "a\"b")
            .with_attr(ATTR_CONTENT, "")
            .with_children(vec![DomNode::text("<x> & y")])
            .into();

        insta::assert_snapshot!(
            node.to_html(),
            @r#"<div data-pe-id="a&quot;b" data-pe-content>&lt;x&gt; &amp; y</div>"#
        );
    }

    #[test]
    fn test_find_by_attr_is_depth_first() {
        let tree: DomNode = DomElement::new("div")
            .with_children(vec![
                DomElement::new("span").with_attr(ATTR_ID, "x").into(),
                DomElement::new("div")
                    .with_attr(ATTR_ID, "y")
                    .with_children(vec![DomElement::new("p").with_attr(ATTR_ID, "x").into()])
                    .into(),
            ])
            .into();

        assert_eq!(tree.find_by_attr(ATTR_ID, "x").unwrap().tag, "span");
        assert_eq!(tree.find_by_attr(ATTR_ID, "y").unwrap().tag, "div");
        assert!(tree.find_by_attr(ATTR_ID, "z").is_none());
    }
}
