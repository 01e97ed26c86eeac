use super::BlockNode;
use dioxus::prelude::*;
use page_builder_engine::RenderNode;

#[component]
pub fn PageBlock(nodes: Vec<RenderNode>) -> Element {
    rsx! {
        div {
            class: "pe-page",
            for node in nodes.iter() {
                BlockNode { key: "{node.id()}", node: node.clone(), placed: false }
            }
        }
    }
}
