mod backend;
mod config;
mod error;
mod ops;
mod types;
mod ui;

use env_logger::{Builder, Target};
use log::LevelFilter;

use crate::config::StoreConfig;
use crate::ops::checkout::LogCheckout;
use crate::types::catalog::Catalog;
use crate::types::session::StoreSession;
use crate::ui::app::BeatStoreApp;

fn init_logger() {
    if std::env::var("RUST_LOG").is_ok() {
        env_logger::init();
        return;
    }
    Builder::new()
        .target(Target::Stdout)
        .filter_level(LevelFilter::Warn)
        .filter_module("beatstore", LevelFilter::Debug)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();

    let config = StoreConfig::load()?;
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load_from_file(path)?,
        None => Catalog::default(),
    }
    .with_cover_dir(&config.cover_dir);
    log::info!("Catalog ready with {} items", catalog.len());

    let backend = backend::default_backend()?;
    let session = StoreSession::new(catalog, &config, backend, Box::new(LogCheckout));
    let app = BeatStoreApp::new(session);

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height]),
        ..Default::default()
    };
    eframe::run_native(
        "Beat Store",
        native_options,
        Box::new(|cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )?;
    Ok(())
}
