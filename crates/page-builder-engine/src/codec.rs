//! Content codec: structured [`RichText`] ⇄ DOM subtree.
//!
//! `serialize` produces what a leaf shows when it is not being edited.
//! `deserialize` reads a content element back when an edit session opens.
//!
//! Run markup:
//!
//! | flags            | markup               |
//! |------------------|----------------------|
//! | none             | `<span>text</span>`  |
//! | italic           | `<em>text</em>`      |
//! | underScore       | `<u>text</u>`        |
//! | both             | `<u><em>text</em></u>` |
//!
//! Deserializing a run wrapper flattens everything below it to plain text.
//! Only a chain of single-child run wrappers contributes flags, so markup
//! like `<em>a<u>b</u></em>` comes back as one italic run `"ab"`.

use crate::dom::DomNode;
use crate::models::{ElementNode, MarkSet, Node, RichText, TextRun};

const RUN_TAG: &str = "span";
const ITALIC_TAG: &str = "em";
const UNDERLINE_TAG: &str = "u";
const ELEMENT_TAG: &str = "div";

pub fn serialize(content: &RichText) -> Vec<DomNode> {
    content.elements().iter().map(serialize_element).collect()
}

fn serialize_element(element: &ElementNode) -> DomNode {
    DomNode::element(ELEMENT_TAG, element.children.iter().map(serialize_node).collect())
}

fn serialize_node(node: &Node) -> DomNode {
    match node {
        Node::Element(element) => serialize_element(element),
        Node::Text(run) => serialize_run(run),
    }
}

fn serialize_run(run: &TextRun) -> DomNode {
    let text = DomNode::text(run.text.clone());
    match (run.italic, run.under_score) {
        (false, false) => DomNode::element(RUN_TAG, vec![text]),
        (true, false) => DomNode::element(ITALIC_TAG, vec![text]),
        (false, true) => DomNode::element(UNDERLINE_TAG, vec![text]),
        (true, true) => DomNode::element(
            UNDERLINE_TAG,
            vec![DomNode::element(ITALIC_TAG, vec![text])],
        ),
    }
}

/// Classify a DOM node. Comments and other non-element, non-text nodes
/// yield `None` and are dropped by the caller.
pub fn deserialize(node: &DomNode) -> Option<Node> {
    match node {
        DomNode::Text(text) => Some(Node::Text(TextRun::plain(text.clone()))),
        DomNode::Comment(_) => None,
        DomNode::Element(element) => {
            let tag = element.tag.to_ascii_lowercase();
            if run_marks(&tag).is_some() {
                return Some(Node::Text(TextRun::with_marks(
                    node.text_content(),
                    collect_marks(node),
                )));
            }
            let children = element.children.iter().filter_map(deserialize).collect();
            Some(Node::Element(ElementNode::div(children)))
        }
    }
}

/// Deserialize the children of a content element into a document.
/// Runs found directly at the top level are wrapped in their own element.
pub fn deserialize_content(children: &[DomNode]) -> RichText {
    let mut elements = Vec::new();
    for child in children {
        match deserialize(child) {
            Some(Node::Element(element)) => elements.push(element),
            Some(Node::Text(run)) => {
                log::debug!("wrapping top-level run {:?} in an element", run.text);
                elements.push(ElementNode::div(vec![Node::Text(run)]));
            }
            None => log::debug!("dropping unsupported node from content"),
        }
    }
    RichText(elements)
}

fn run_marks(tag: &str) -> Option<MarkSet> {
    let mut marks = MarkSet::default();
    match tag {
        RUN_TAG => {}
        ITALIC_TAG => marks.italic = true,
        UNDERLINE_TAG => marks.under_score = true,
        _ => return None,
    }
    Some(marks)
}

/// Union of the marks of `node` and of the single-child run wrappers
/// nested directly inside it
fn collect_marks(node: &DomNode) -> MarkSet {
    let mut marks = MarkSet::default();
    let mut current = Some(node);
    while let Some(wrapper) = current {
        let Some(own) = wrapper.tag().as_deref().and_then(run_marks) else {
            break;
        };
        marks.italic |= own.italic;
        marks.under_score |= own.under_score;
        current = match wrapper.children() {
            [only] => Some(only),
            _ => None,
        };
    }
    marks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::nodes_to_html;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn run(text: &str, italic: bool, under_score: bool) -> Node {
        Node::Text(TextRun {
            text: text.to_string(),
            italic,
            under_score,
        })
    }

    fn doc(paragraphs: Vec<Vec<Node>>) -> RichText {
        RichText(paragraphs.into_iter().map(ElementNode::div).collect())
    }

    #[test]
    fn test_serialize_markup() {
        let content = doc(vec![vec![
            run("a", false, false),
            run("b", true, false),
            run("c", false, true),
            run("d", true, true),
        ]]);

        insta::assert_snapshot!(
            nodes_to_html(&serialize(&content)),
            @"<div><span>a</span><em>b</em><u>c</u><u><em>d</em></u></div>"
        );
    }

    #[rstest]
    #[case::plain(doc(vec![vec![run("hello", false, false)]]))]
    #[case::every_flag_combination(doc(vec![vec![
        run("a", false, false),
        run("b", true, false),
        run("c", false, true),
        run("d", true, true),
    ]]))]
    #[case::several_paragraphs(doc(vec![
        vec![run("one", false, false)],
        vec![run("two", true, false), run(" three", false, false)],
    ]))]
    #[case::nested_element(doc(vec![vec![
        run("outer", false, false),
        Node::Element(ElementNode::div(vec![run("inner", false, true)])),
    ]]))]
    #[case::empty_paragraph(doc(vec![vec![]]))]
    #[case::empty_run(doc(vec![vec![run("", false, false)]]))]
    #[case::empty_document(RichText::default())]
    fn test_round_trip(#[case] content: RichText) {
        assert_eq!(deserialize_content(&serialize(&content)), content);
    }

    #[test]
    fn test_plain_text_node_becomes_plain_run() {
        assert_eq!(deserialize(&DomNode::text("x")), Some(run("x", false, false)));
    }

    #[test]
    fn test_comment_is_dropped_from_parent() {
        let node = DomNode::element(
            "div",
            vec![DomNode::Comment("c".to_string()), DomNode::text("x")],
        );
        assert_eq!(
            deserialize(&node),
            Some(Node::Element(ElementNode::div(vec![run("x", false, false)])))
        );
    }

    #[test]
    fn test_run_wrapper_flattens_nested_structure() {
        // styling below the top wrapper is lost unless it is a single-child chain
        let node = DomNode::element(
            "em",
            vec![
                DomNode::text("a"),
                DomNode::element("u", vec![DomNode::text("b")]),
            ],
        );
        assert_eq!(deserialize(&node), Some(run("ab", true, false)));
    }

    #[test]
    fn test_unknown_element_recurses() {
        let node = DomNode::element(
            "P",
            vec![DomNode::element("EM", vec![DomNode::text("x")])],
        );
        assert_eq!(
            deserialize(&node),
            Some(Node::Element(ElementNode::div(vec![run("x", true, false)])))
        );
    }

    #[test]
    fn test_top_level_runs_are_wrapped() {
        let content = deserialize_content(&[
            DomNode::text("loose"),
            DomNode::Comment("skip".to_string()),
            DomNode::element("div", vec![DomNode::text("kept")]),
        ]);
        assert_eq!(
            content,
            doc(vec![
                vec![run("loose", false, false)],
                vec![run("kept", false, false)]
            ])
        );
    }
}
