mod config;
mod core;
mod rendering;
mod sketches;
mod storage;
mod ui;

use ui::app::SketchbookApp;

fn main() {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Dove of Peace — 创意画布")
            .with_inner_size([1280.0, 800.0])
            .with_app_id("dove-sketchbook"),
        ..Default::default()
    };

    eframe::run_native(
        "Dove of Peace — 创意画布",
        options,
        Box::new(|cc| Box::new(SketchbookApp::new(cc))),
    )
    .expect("窗口启动失败");
}
