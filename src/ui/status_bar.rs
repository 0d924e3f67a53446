use egui::Ui;

pub fn show_status_bar(ui: &mut Ui, fps: f32, sketch_status: &str, message: &str) {
    ui.horizontal_wrapped(|ui| {
        if !sketch_status.is_empty() {
            ui.label(sketch_status);
            ui.separator();
        }
        ui.label(format!("FPS: {:.0}", fps));
        if !message.is_empty() {
            ui.separator();
            ui.label(format!("状态: {message}"));
        }
    });
}
