//! Data Visualizer - Spreadsheet Charting & Analysis
//!
//! A Rust application for loading spreadsheets and exploring them with charts,
//! a correlation heatmap and descriptive statistics.

mod charts;
mod color;
mod config;
mod data;
mod gui;
mod stats;

use config::AppConfig;
use eframe::egui;
use gui::DataVisualizerApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = AppConfig::load();
    log::info!("Starting with {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Data Visualizer"),
        ..Default::default()
    };

    eframe::run_native(
        "Data Visualizer",
        options,
        Box::new(move |cc| Ok(Box::new(DataVisualizerApp::new(cc, config)))),
    )
}
