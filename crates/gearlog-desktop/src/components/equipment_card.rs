//! Equipment card component

use dioxus::prelude::*;

/// A single equipment row rendered in the list.
#[component]
pub fn EquipmentCard(
    serial: String,
    name: String,
    kind_label: String,
    status_label: String,
    is_selected: bool,
    onclick: EventHandler<MouseEvent>,
) -> Element {
    let bg = if is_selected { "#e3f2fd" } else { "white" };
    let border_left = if is_selected {
        "3px solid #1565c0"
    } else {
        "3px solid transparent"
    };

    rsx! {
        div {
            class: if is_selected { "equipment-item selected" } else { "equipment-item" },
            style: "
                padding: 12px 16px;
                border-bottom: 1px solid #eeeeee;
                border-left: {border_left};
                cursor: pointer;
                background: {bg};
                transition: background 0.15s;
            ",
            onclick: move |evt| onclick.call(evt),

            div {
                class: "equipment-name",
                style: "
                    font-weight: 500;
                    margin-bottom: 4px;
                    overflow: hidden;
                    text-overflow: ellipsis;
                    white-space: nowrap;
                ",
                "{name}"
            }

            div {
                class: "equipment-meta",
                style: "
                    font-size: 12px;
                    color: #607d8b;
                ",
                "{serial} · {kind_label} · {status_label}"
            }
        }
    }
}
