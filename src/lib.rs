//! UTACT guestbook board
//!
//! A message board with a rotating carousel, a rated submission form and an
//! animated constellation backdrop. Runs natively and in the browser.
//!
//! The state modules (`core`, `constellation`, `board`) build without any
//! features; the egui front end needs `native` or `wasm`.

pub mod board;
pub mod config;
pub mod constellation;
pub mod core;
pub mod time;

#[cfg(any(
    all(feature = "native", not(target_arch = "wasm32")),
    all(feature = "wasm", target_arch = "wasm32")
))]
pub mod api;
#[cfg(any(
    all(feature = "native", not(target_arch = "wasm32")),
    all(feature = "wasm", target_arch = "wasm32")
))]
pub mod api_state;
#[cfg(any(
    all(feature = "native", not(target_arch = "wasm32")),
    all(feature = "wasm", target_arch = "wasm32")
))]
pub mod app;
#[cfg(any(
    all(feature = "native", not(target_arch = "wasm32")),
    all(feature = "wasm", target_arch = "wasm32")
))]
pub mod theme;

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
pub mod api_native;
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod api_wasm;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
mod web {
    use tracing::error;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    use crate::app::BoardApp;
    use crate::config::BoardConfig;

    #[wasm_bindgen(start)]
    pub fn main() {
        console_error_panic_hook::set_once();

        // Initialize tracing for browser console
        tracing_wasm::set_as_global_default();

        let web_options = eframe::WebOptions::default();

        wasm_bindgen_futures::spawn_local(async {
            let Some(canvas) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("canvas"))
                .and_then(|e| e.dyn_into::<web_sys::HtmlCanvasElement>().ok())
            else {
                error!("No <canvas id=\"canvas\"> element on the page");
                return;
            };

            let config = BoardConfig::from_window();
            if let Err(e) = eframe::WebRunner::new()
                .start(
                    canvas,
                    web_options,
                    Box::new(|cc| Ok(Box::new(BoardApp::new(cc, config)))),
                )
                .await
            {
                error!(error = ?e, "Failed to start eframe");
            }
        });
    }
}
