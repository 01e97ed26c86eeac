use super::{LeafBlock, PageBlock, SectionBlock};
use dioxus::prelude::*;
use page_builder_engine::RenderNode;

/// Dispatch a render node to the component for its block type.
/// `placed` is true when the parent section's grid names this node.
#[component]
pub fn BlockNode(node: RenderNode, placed: bool) -> Element {
    match node {
        RenderNode::Page { children, .. } => rsx! {
            PageBlock { nodes: children }
        },
        RenderNode::Section {
            id,
            grid,
            children,
            markers,
        } => rsx! {
            SectionBlock { id, grid, nodes: children, markers, placed }
        },
        RenderNode::Leaf {
            id,
            kind,
            content,
            markers,
        } => rsx! {
            LeafBlock { id, kind, content, markers, placed }
        },
    }
}
