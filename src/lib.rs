mod api;
mod app;
mod components;
mod models;
mod pages;
pub mod scroll_load;
mod state;
mod util;

pub use components::hooks::use_scroll_load;
pub use scroll_load::{
    bind_scroll_load, ScrollDirection, ScrollLoadError, ScrollLoadHandle, ScrollLoadOptions,
    ScrollMetrics, ScrollMonitor,
};

use crate::app::App;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::logging::log!("mounting app");
    mount_to_body(App);
}
