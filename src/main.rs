//! Native desktop build of the guestbook board
//!
//! Run with: cargo run --features native

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use utact_board::app::BoardApp;
use utact_board::config::BoardConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,utact_board=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let config = BoardConfig::from_env();
    info!(?config, "Starting board");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("UTACT guestbook")
            .with_inner_size([900.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(
        "utact-board",
        options,
        Box::new(|cc| Ok(Box::new(BoardApp::new(cc, config)))),
    )?;
    Ok(())
}
