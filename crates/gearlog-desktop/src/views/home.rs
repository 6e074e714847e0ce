//! Home view - main application screen

use dioxus::prelude::*;

use crate::components::{EquipmentDetail, EquipmentList, SyncBanner, Toolbar};
use crate::state::AppState;

/// Home view component - the main application screen
#[component]
pub fn Home() -> Element {
    let _state = use_context::<AppState>();

    rsx! {
        div {
            class: "home-container",
            style: "display: flex; flex-direction: column; height: 100vh;",

            SyncBanner {}
            Toolbar {}

            div {
                class: "content-area",
                style: "flex: 1; display: flex; overflow: hidden;",

                EquipmentList {}
                EquipmentDetail {}
            }
        }
    }
}
