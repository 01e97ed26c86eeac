use crate::ui::BuilderState;
use crate::ui::keymap::command_for;
use dioxus::prelude::*;
use page_builder_engine::{BlockView, Segment};

/// Editable view of the pending content of the active session.
///
/// Input arrives only as keydown events mapped through the keymap. The
/// overlay is not `contenteditable`, so paste, IME composition and soft
/// keyboards that do not emit per-character keydowns cannot enter text.
#[component]
pub fn EditOverlay() -> Element {
    let state = use_context::<BuilderState>();
    let views: Vec<BlockView> = state
        .controller
        .read()
        .session()
        .map(|session| session.pending().view())
        .unwrap_or_default();

    rsx! {
        div {
            class: "pe-overlay",
            tabindex: 0,
            onmounted: move |evt| {
                spawn(async move {
                    let _ = evt.set_focus(true).await;
                });
            },
            onkeydown: move |evt: KeyboardEvent| {
                if let Some(cmd) = command_for(&evt.key(), evt.modifiers()) {
                    evt.prevent_default();
                    evt.stop_propagation();
                    state.apply(cmd);
                }
            },
            for view in views.iter() {
                div {
                    for segment in view.segments.iter() {
                        {segment_view(segment)}
                    }
                }
            }
        }
    }
}

fn segment_view(segment: &Segment) -> Element {
    let Segment::Text {
        text,
        marks,
        selected,
    } = segment
    else {
        return rsx! { span { class: "pe-caret" } };
    };
    let class = selected.then_some("pe-selected");
    match (marks.italic, marks.under_score) {
        (false, false) => rsx! { span { class, "{text}" } },
        (true, false) => rsx! { em { class, "{text}" } },
        (false, true) => rsx! { u { class, "{text}" } },
        (true, true) => rsx! { u { class, em { "{text}" } } },
    }
}
