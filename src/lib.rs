//! Folio FX core crate.
//!
//! Client-side behaviour for a single-page portfolio: loading screen,
//! navigation and scroll-spy, decorative effects, entrance animations,
//! project filtering, a simulated contact form and notifications.
//!
//! The controllers in the public modules are plain Rust driven through small
//! traits (`Scheduler`, `ProgressSurface`, `NotificationHost`, ...) so they run
//! and test off-browser. `page` binds them to the live DOM.

use wasm_bindgen::prelude::*;

pub mod anim;
pub mod config;
pub mod effects;
pub mod error;
pub mod filter;
pub mod form;
pub mod konami;
pub mod loader;
pub mod matrix;
pub mod nav;
pub mod notify;
pub mod particles;
pub mod random;
pub mod reveal;
pub mod schedule;
pub mod tilt;
pub mod typing;

mod page;

use std::sync::Once;

use config::SiteConfig;
use notify::NotificationKind;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

/// Wire every page behaviour with the default timings.
#[wasm_bindgen]
pub fn start_site() -> Result<(), JsValue> {
    boot(SiteConfig::default())
}

/// Like `start_site`, with a JSON object overriding any subset of the
/// defaults (camelCase keys, e.g. `{"typing": {"typeMs": 80}}`).
#[wasm_bindgen]
pub fn start_site_with_config(json: &str) -> Result<(), JsValue> {
    boot(SiteConfig::from_json(json)?)
}

static TRACING: Once = Once::new();

fn boot(config: SiteConfig) -> Result<(), JsValue> {
    let level = config.log_level.as_tracing();
    TRACING.call_once(|| {
        let layer = tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(level)
            .build();
        tracing_wasm::set_as_global_default_with_config(layer);
    });
    page::start_when_ready(config)?;
    Ok(())
}

/// Show a toast from page script. `kind` is "success" or anything else for
/// the info style. Returns false if the site has not been started.
#[wasm_bindgen]
pub fn show_notification(message: &str, kind: &str) -> bool {
    page::notify(message, NotificationKind::parse(kind))
}

/// Whether the loading screen has finished.
#[wasm_bindgen]
pub fn page_loaded() -> bool {
    page::is_loaded()
}
