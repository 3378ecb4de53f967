//! Dashboard page: one card per chart.

use dioxus::prelude::*;

use crate::app::components::Layout;
use crate::charts::ChartKind;

#[component]
pub fn Dashboard() -> Element {
    rsx! {
        Layout { title: "Dashboard",
            div { class: "grid gap-4 md:grid-cols-2 xl:grid-cols-4",
                for kind in ChartKind::ALL {
                    ChartCard { key: "{kind.canvas_id()}", kind }
                }
            }
        }
    }
}

#[component]
fn ChartCard(kind: ChartKind) -> Element {
    rsx! {
        div { class: "card bg-base-100 shadow",
            div { class: "card-body p-4",
                h2 { class: "card-title text-base", "{kind.title()}" }
                div { class: "relative h-64",
                    canvas { id: kind.canvas_id() }
                }
            }
        }
    }
}
