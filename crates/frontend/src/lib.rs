pub mod app;
pub mod domain;
pub mod shared;

use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen]
pub fn hydrate() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    let config = shared::config::config();
    log::info!(
        "Delivery dashboard starting, API base: {}",
        shared::api_utils::api_base()
    );
    log::debug!(
        "Page size {}, timer limit {}s",
        config.dashboard.page_size,
        config.dashboard.timer_limit_secs
    );

    leptos::mount::mount_to_body(app::App);
}

#[wasm_bindgen(start)]
pub fn start() {
    hydrate();
}
