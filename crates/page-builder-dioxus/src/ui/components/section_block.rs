use super::BlockNode;
use crate::ui::BuilderState;
use dioxus::prelude::*;
use page_builder_engine::render::{EditMarkers, GridTemplate};
use page_builder_engine::{BlockId, Point, PointerOrigin, RenderNode};

/// A grid container. Children keep their `children` order in the DOM; the
/// grid template decides where each one shows up.
#[component]
pub fn SectionBlock(
    id: BlockId,
    grid: GridTemplate,
    nodes: Vec<RenderNode>,
    markers: Option<EditMarkers>,
    placed: bool,
) -> Element {
    let state = use_context::<BuilderState>();
    let mut style = format!(
        "display: grid; grid-template-areas: {}; grid-template-columns: {}; gap: 10px; padding: 10px;",
        grid.template_areas(),
        grid.template_columns()
    );
    if placed {
        style.push_str(&format!(" grid-area: {id};"));
    }
    let marked = markers.is_some();
    let type_marker = markers.as_ref().map(|m| m.type_marker.clone());
    let id_marker = markers.as_ref().map(|m| m.id.to_string());

    rsx! {
        div {
            class: "pe-section",
            style,
            "data-pe-type": type_marker,
            "data-pe-id": id_marker,
            onmounted: {
                let id = id.clone();
                move |evt: MountedEvent| {
                    if marked {
                        state.attach_mount(&id, evt.data());
                    }
                }
            },
            onmousedown: {
                let id = id.clone();
                move |_| state.push_origin(PointerOrigin::Block(id.clone()))
            },
            onmousemove: {
                let id = id.clone();
                move |evt: MouseEvent| {
                    if !marked {
                        return;
                    }
                    evt.stop_propagation();
                    let at = evt.client_coordinates();
                    state.track_pointer(&id, Point::new(at.x, at.y));
                }
            },
            for node in nodes.iter() {
                BlockNode {
                    key: "{node.id()}",
                    node: node.clone(),
                    placed: grid.placement(node.id()).is_some(),
                }
            }
        }
    }
}

