use dioxus::prelude::*;
use page_builder_engine::Guide;

/// Vertical insertion line, drawn over everything in client coordinates
#[component]
pub fn InsertionGuide(guide: Guide, color: String) -> Element {
    let style = format!(
        "position: fixed; left: {}px; top: {}px; width: {}px; height: {}px; background-color: {color}; pointer-events: none;",
        guide.left, guide.top, guide.width, guide.height
    );

    rsx! {
        div { class: "pe-insertion-guide", style }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;
    use dioxus_ssr::render;

    #[test]
    fn test_guide_is_positioned_from_geometry() {
        let mut dom = VirtualDom::new_with_props(
            InsertionGuide,
            InsertionGuideProps {
                guide: Guide {
                    left: 99.0,
                    top: 10.0,
                    width: 2.0,
                    height: 80.0,
                },
                color: "blue".to_string(),
            },
        );
        dom.rebuild_in_place();
        let html = render(&dom);

        assert!(html.contains("position: fixed"));
        assert!(html.contains("left: 99px"));
        assert!(html.contains("height: 80px"));
        assert!(html.contains("background-color: blue"));
        assert!(html.contains("pointer-events: none"));
    }
}
