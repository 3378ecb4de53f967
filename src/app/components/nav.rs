//! Navigation bar with the dashboard controls.

use dioxus::prelude::*;

use super::theme::{QuickToggle, ThemeSelect};

#[derive(Props, Clone, PartialEq)]
pub struct NavProps {
    /// Brand text on the left
    pub title: String,
}

/// DaisyUI navbar: brand on the left, layout and theme controls on the right.
#[component]
pub fn Nav(props: NavProps) -> Element {
    rsx! {
        nav { class: "navbar bg-base-200 px-4",
            div { class: "flex-1",
                a { class: "text-xl font-bold", href: "/", "{props.title}" }
            }
            div { class: "flex-none flex items-center gap-4",
                LayoutSwitch {}
                QuickToggle {}
                ThemeSelect {}
            }
        }
    }
}

/// Checked means full width.
#[component]
fn LayoutSwitch() -> Element {
    rsx! {
        label { class: "label cursor-pointer gap-2",
            span { class: "label-text", "Full width" }
            input {
                id: "layoutToggle",
                r#type: "checkbox",
                class: "toggle toggle-sm",
            }
        }
    }
}
