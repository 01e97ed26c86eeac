use dioxus::prelude::*;

/// Full-screen error shown instead of the builder when startup or rendering fails
#[component]
pub fn ErrorScreen(title: String, message: String, details: Option<String>) -> Element {
    rsx! {
        div {
            style: "display: flex; flex-direction: column; align-items: center; justify-content: center; min-height: 100vh; padding: 24px; text-align: center;",
            h1 {
                style: "color: #dc322f;",
                "{title}"
            }
            p { "{message}" }
            if let Some(ref detail_text) = details {
                pre {
                    style: "text-align: left; white-space: pre-wrap; word-break: break-word; margin-top: 16px;",
                    "{detail_text}"
                }
            }
        }
    }
}
