use super::{ContentView, EditOverlay};
use crate::ui::BuilderState;
use dioxus::prelude::*;
use page_builder_engine::dom::DomNode;
use page_builder_engine::render::{EditMarkers, LeafKind};
use page_builder_engine::{BlockId, PointerOrigin, Visibility};

/// Takes the content element out of flow and paint while the edit overlay
/// is shown in its place; it stays mounted and measurable
pub const HIDDEN_STYLE: &str = "position: absolute !important; top: 0; opacity: 0 !important; clip: rect(1px, 1px, 1px, 1px) !important; overflow: hidden !important; height: 1px !important; width: 1px !important; padding: 0 !important; border: 0 !important;";

/// A `BUTTON` or `TEXT` block. Clicking it in edit mode opens an edit
/// session on it.
#[component]
pub fn LeafBlock(
    id: BlockId,
    kind: LeafKind,
    content: Vec<DomNode>,
    markers: Option<EditMarkers>,
    placed: bool,
) -> Element {
    let state = use_context::<BuilderState>();
    let editing = state.controller.read().is_editing(&id);
    let hidden = state.registry.read().visibility(&id) == Visibility::HiddenButPresent;

    let style = placed.then(|| format!("grid-area: {id};"));
    let marked = markers.is_some();
    let type_marker = markers.as_ref().map(|m| m.type_marker.clone());
    let id_marker = markers.as_ref().map(|m| m.id.to_string());

    let on_mounted = {
        let id = id.clone();
        move |evt: MountedEvent| {
            if marked {
                state.attach_mount(&id, evt.data());
            }
        }
    };
    let on_mouse_down = {
        let id = id.clone();
        move |_: MouseEvent| state.push_origin(PointerOrigin::Block(id.clone()))
    };
    let on_click = {
        let id = id.clone();
        move |_: MouseEvent| {
            if state.edit_mode() {
                state.open(&id);
            }
        }
    };

    let body = rsx! {
        LeafContent { content, hidden }
        if editing {
            EditOverlay {}
        }
    };

    match kind {
        LeafKind::Button => rsx! {
            button {
                class: "pe-leaf",
                style,
                "data-pe-type": type_marker,
                "data-pe-id": id_marker,
                onmounted: on_mounted,
                onmousedown: on_mouse_down,
                onclick: on_click,
                {body}
            }
        },
        LeafKind::Text => rsx! {
            div {
                class: "pe-leaf",
                style,
                "data-pe-type": type_marker,
                "data-pe-id": id_marker,
                onmounted: on_mounted,
                onmousedown: on_mouse_down,
                onclick: on_click,
                {body}
            }
        },
    }
}

/// The `data-pe-content` element of a leaf. Hidden content is also removed
/// from the accessibility tree so only the overlay is announced.
#[component]
fn LeafContent(content: Vec<DomNode>, hidden: bool) -> Element {
    rsx! {
        div {
            "data-pe-content": "",
            style: hidden.then_some(HIDDEN_STYLE),
            "aria-hidden": hidden.then_some("true"),
            ContentView { nodes: content }
        }
    }
}
