use dioxus::prelude::*;
use page_builder_engine::dom::DomNode;

/// Render serialized leaf content. Comments are dropped; unknown tags fall
/// back to a plain `div`.
#[component]
pub fn ContentView(nodes: Vec<DomNode>) -> Element {
    rsx! {
        for node in nodes.iter() {
            {dom_node(node)}
        }
    }
}

fn dom_node(node: &DomNode) -> Element {
    match node {
        DomNode::Text(text) => rsx! { "{text}" },
        DomNode::Comment(_) => rsx! {},
        DomNode::Element(element) => {
            let children = rsx! {
                for child in element.children.iter() {
                    {dom_node(child)}
                }
            };
            match element.tag.to_ascii_lowercase().as_str() {
                "span" => rsx! { span { {children} } },
                "em" => rsx! { em { {children} } },
                "u" => rsx! { u { {children} } },
                _ => rsx! { div { {children} } },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;
    use dioxus_ssr::render;
    use page_builder_engine::codec;
    use page_builder_engine::{ElementNode, MarkSet, Node, RichText, TextRun};

    fn render_nodes(nodes: Vec<DomNode>) -> String {
        let mut dom = VirtualDom::new_with_props(ContentView, ContentViewProps { nodes });
        dom.rebuild_in_place();
        render(&dom)
    }

    #[test]
    fn test_marks_render_as_inline_tags() {
        let both = MarkSet {
            italic: true,
            under_score: true,
        };
        let content = RichText::from(vec![ElementNode::div(vec![
            Node::Text(TextRun::plain("a")),
            Node::Text(TextRun::with_marks("b", MarkSet { italic: true, under_score: false })),
            Node::Text(TextRun::with_marks("c", both)),
        ])]);

        let html = render_nodes(codec::serialize(&content));

        assert!(html.starts_with("<div>"));
        assert!(html.contains("<span>a</span>"));
        assert!(html.contains("<em>b</em>"));
        assert!(html.contains("<u><em>c</em></u>"));
    }

    #[test]
    fn test_comments_are_dropped() {
        let nodes = vec![DomNode::element(
            "div",
            vec![DomNode::Comment("hidden note".to_string()), DomNode::text("kept")],
        )];

        let html = render_nodes(nodes);

        assert!(html.contains("kept"));
        assert!(!html.contains("hidden note"));
    }
}
