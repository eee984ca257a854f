mod analysis;
mod fees;
mod model;
mod parser;
mod stats;
mod ui;

use eframe::egui;
use ui::SoleApp;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sole Market Analyzer",
        options,
        Box::new(|cc| {
            ui::set_custom_style(&cc.egui_ctx);
            Ok(Box::new(SoleApp::new()))
        }),
    )
}
