//! # 橄榄灰白主题
//!
//! 取自画作本身的配色：橄榄绿做强调色，鸽灰做次级色，
//! 深色面板衬托画布。提供一键应用到 egui Style 的函数。

use egui::{Color32, Rounding, Stroke, Visuals};

// ═══════════════════════════════════════════════════════════
// 调色板常量
// ═══════════════════════════════════════════════════════════

/// 橄榄绿（主强调色，与橄榄枝同源）
pub const OLIVE: Color32 = Color32::from_rgb(34, 139, 34);
/// 浅橄榄（hover / 次级）
pub const OLIVE_LIGHT: Color32 = Color32::from_rgb(96, 178, 96);
/// 深橄榄（active / pressed）
pub const OLIVE_DARK: Color32 = Color32::from_rgb(24, 100, 24);

/// 鸽灰（次强调色）
pub const DOVE_GREY: Color32 = Color32::from_rgb(233, 230, 226);
/// 暖白
pub const WARM_WHITE: Color32 = Color32::from_rgb(249, 249, 249);

/// 深色背景（画布外）
pub const BG_DARK: Color32 = Color32::from_rgb(24, 26, 24);
/// 面板背景
pub const BG_PANEL: Color32 = Color32::from_rgb(34, 38, 34);
/// 窗口背景
pub const BG_WINDOW: Color32 = Color32::from_rgb(40, 44, 40);
/// 控件背景（非激活）
pub const BG_WIDGET: Color32 = Color32::from_rgb(48, 54, 48);
/// 控件背景（hover）
pub const BG_WIDGET_HOVER: Color32 = Color32::from_rgb(60, 68, 60);
/// 控件背景（active）
pub const BG_WIDGET_ACTIVE: Color32 = Color32::from_rgb(72, 84, 72);

/// 文字颜色
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(235, 238, 233);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(178, 186, 176);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(118, 128, 116);

// ═══════════════════════════════════════════════════════════
// 应用主题
// ═══════════════════════════════════════════════════════════

/// 将橄榄灰白主题应用到 egui context
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    // ── Visuals (暗色基底) ──
    let mut visuals = Visuals::dark();

    // 背景色
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_WINDOW;
    visuals.extreme_bg_color = BG_DARK;
    visuals.faint_bg_color = Color32::from_rgb(42, 47, 42);

    // 控件样式
    let rounding = Rounding::same(4.0);

    // 非激活 Widget
    visuals.widgets.inactive.bg_fill = BG_WIDGET;
    visuals.widgets.inactive.weak_bg_fill = BG_WIDGET;
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, Color32::from_rgb(66, 76, 66));
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.inactive.rounding = rounding;

    // Hovered Widget
    visuals.widgets.hovered.bg_fill = BG_WIDGET_HOVER;
    visuals.widgets.hovered.weak_bg_fill = BG_WIDGET_HOVER;
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, OLIVE_LIGHT);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.5, WARM_WHITE);
    visuals.widgets.hovered.rounding = rounding;

    // Active (pressed) Widget
    visuals.widgets.active.bg_fill = BG_WIDGET_ACTIVE;
    visuals.widgets.active.weak_bg_fill = BG_WIDGET_ACTIVE;
    visuals.widgets.active.bg_stroke = Stroke::new(1.5, OLIVE);
    visuals.widgets.active.fg_stroke = Stroke::new(2.0, WARM_WHITE);
    visuals.widgets.active.rounding = rounding;

    // Open (dropdown/combo 展开)
    visuals.widgets.open.bg_fill = BG_WIDGET_ACTIVE;
    visuals.widgets.open.weak_bg_fill = BG_WIDGET_ACTIVE;
    visuals.widgets.open.bg_stroke = Stroke::new(1.0, OLIVE_LIGHT);
    visuals.widgets.open.fg_stroke = Stroke::new(1.0, WARM_WHITE);
    visuals.widgets.open.rounding = rounding;

    // 非交互元素（标签等）
    visuals.widgets.noninteractive.bg_fill = BG_PANEL;
    visuals.widgets.noninteractive.weak_bg_fill = BG_PANEL;
    visuals.widgets.noninteractive.bg_stroke = Stroke::NONE;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.noninteractive.rounding = rounding;

    // 选中项强调色
    visuals.selection.bg_fill = Color32::from_rgba_unmultiplied(34, 139, 34, 80);
    visuals.selection.stroke = Stroke::new(1.0, OLIVE_LIGHT);

    // 超链接
    visuals.hyperlink_color = OLIVE_LIGHT;

    // 窗口边框
    visuals.window_stroke = Stroke::new(1.0, Color32::from_rgb(74, 86, 74));
    visuals.window_rounding = Rounding::same(6.0);

    style.visuals = visuals;

    // ── Spacing ──
    style.spacing.item_spacing = egui::vec2(6.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);

    ctx.set_style(style);
}
