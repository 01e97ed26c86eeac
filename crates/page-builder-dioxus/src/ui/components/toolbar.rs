use crate::ui::BuilderState;
use dioxus::prelude::*;
use page_builder_engine::{Mark, PointerOrigin};

fn label(mark: Mark) -> &'static str {
    match mark {
        Mark::Italic => "Italic",
        Mark::UnderScore => "Underscore",
    }
}

/// Format toggles for the active session. Pressing them never commits.
#[component]
pub fn Toolbar() -> Element {
    let state = use_context::<BuilderState>();
    let active = state
        .controller
        .read()
        .session()
        .map(|session| session.pending().active_marks());

    rsx! {
        div {
            id: "editor-toolbar",
            class: "pe-toolbar",
            onmousedown: move |evt: MouseEvent| {
                // keep focus in the overlay
                evt.prevent_default();
                state.push_origin(PointerOrigin::Toolbar);
            },
            for mark in Mark::ALL {
                button {
                    key: "{mark.name()}",
                    class: if active.is_some_and(|marks| marks.has(mark)) { "active" },
                    disabled: active.is_none(),
                    onclick: move |_| {
                        if state.toggle_mark(mark) {
                            log::debug!("toggled {}", mark.name());
                        }
                    },
                    {label(mark)}
                }
            }
        }
    }
}

