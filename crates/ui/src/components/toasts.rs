//! # Toast Components
//!
//! Transient success/error/info notifications, stacked in the top-right
//! corner. The stack is additive: each mutation pushes its own toast
//! and each toast expires on its own timer (or on click).

use dioxus::prelude::*;

use crate::state::{NoticeLevel, Toasts};

fn toast_style(level: NoticeLevel) -> String {
    format!(
        "display: flex; align-items: center; gap: 8px; padding: 10px 14px; \
         background: #ffffff; border-radius: 6px; border-left: 4px solid {}; \
         box-shadow: 0 4px 12px rgba(0, 0, 0, 0.12); cursor: pointer;",
        level.accent()
    )
}

/// Overlay rendering the toast stack
#[component]
pub fn ToastHost() -> Element {
    let toasts = use_context::<Toasts>();
    let notices = toasts.list();

    rsx! {
        div {
            style: "position: fixed; top: 16px; right: 16px; z-index: 200; display: flex; \
                    flex-direction: column; gap: 8px; max-width: 340px;",

            for notice in notices {
                div {
                    key: "{notice.id}",
                    class: "toast",
                    style: toast_style(notice.level),
                    onclick: {
                        let mut toasts = toasts;
                        let id = notice.id;
                        move |_| toasts.dismiss(id)
                    },

                    span {
                        style: "flex: 1; font-size: 13px; color: #1f2933;",
                        "{notice.text}"
                    }

                    span {
                        style: "color: #9aa5b1; font-size: 12px;",
                        "✕"
                    }
                }
            }
        }
    }
}
