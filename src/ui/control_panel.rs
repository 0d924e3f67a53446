use egui::Ui;

use crate::sketches::SketchKind;

use super::theme;

// ── action returned to the app ──────────────────────────────

#[derive(Debug, Clone)]
pub struct ControlAction {
    pub switch_to: Option<SketchKind>,
    pub export: bool,
    pub gpu_toggled: bool,
}

impl ControlAction {
    pub fn none() -> Self {
        Self {
            switch_to: None,
            export: false,
            gpu_toggled: false,
        }
    }
}

// ── panel rendering ─────────────────────────────────────────

pub fn show_control_panel(
    ui: &mut Ui,
    current: SketchKind,
    hint: &str,
    use_gpu_canvas: &mut bool,
) -> ControlAction {
    let mut action = ControlAction::none();

    ui.heading("草图");
    ui.separator();

    for kind in SketchKind::ALL {
        if ui
            .selectable_label(current == kind, kind.label())
            .clicked()
            && current != kind
        {
            action.switch_to = Some(kind);
        }
    }

    ui.separator();
    ui.label(egui::RichText::new("操作提示").color(theme::TEXT_SECONDARY));
    ui.label(egui::RichText::new(hint).color(theme::TEXT_MUTED).small());

    ui.separator();
    if ui.button("导出 PNG (S)").clicked() {
        action.export = true;
    }

    ui.separator();
    if ui.checkbox(use_gpu_canvas, "GPU 画布").changed() {
        action.gpu_toggled = true;
    }

    action
}
