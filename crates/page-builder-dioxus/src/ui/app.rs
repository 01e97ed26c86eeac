use crate::ui::components::{BlockNode, ErrorScreen, InsertionGuide, Toolbar};
use crate::ui::{UiSettings, use_builder_state};
use dioxus::prelude::*;
use page_builder_engine::BlockMap;
use page_builder_engine::indicator::Guide;

const PAGE_BUILDER_CSS: &str = include_str!("../assets/page-builder.css");

#[component]
pub fn App(map: BlockMap, settings: UiSettings) -> Element {
    let state = use_builder_state(map, settings);
    let tree = use_memo(move || state.render_tree());
    let tree = tree.read().clone();
    let guide = *state.guide.read();
    let color = state.settings.read().indicator_color.clone();

    rsx! {
        style { {PAGE_BUILDER_CSS} }
        div {
            class: "pe-app",
            style: guide.map(|_| format!("cursor: {};", Guide::CURSOR)),
            // runs last for a bubbling mousedown
            onmousedown: move |_| state.pointer_down(),
            // sections stop propagation, so this only sees moves outside them
            onmousemove: move |_| state.clear_guide(),
            Toolbar {}
            div {
                id: "preview",
                {
                    match tree {
                        Ok(node) => rsx! {
                            BlockNode { node, placed: false }
                        },
                        Err(e) => rsx! {
                            ErrorScreen {
                                title: "Cannot Render Page".to_string(),
                                message: e.to_string(),
                                details: None,
                            }
                        },
                    }
                }
            }
            if let Some(guide) = guide {
                InsertionGuide { guide, color }
            }
        }
    }
}
