//! # 橄榄枝
//!
//! 两种摆放方式：附着在鸽嘴边、随鸽子一起变换的版本（和平鸽草图），
//! 以及按窗口缩放独立摆放的版本（拼贴草图）。叶片是闭合贝塞尔路径。

use egui::Pos2;

use crate::core::color::ColorRgba;
use crate::rendering::painter::ScenePainter;

/// 单片叶子，原点在叶柄、沿 +x 方向展开
pub fn draw_leaf(painter: &mut ScenePainter<'_>, length: f32, color: ColorRgba) {
    painter.fill_bezier_path(
        Pos2::new(0.0, 0.0),
        &[
            [
                Pos2::new(length * 0.25, -length * 0.5),
                Pos2::new(length * 0.75, -length * 0.5),
                Pos2::new(length, 0.0),
            ],
            [
                Pos2::new(length * 0.75, length * 0.5),
                Pos2::new(length * 0.25, length * 0.5),
                Pos2::new(0.0, 0.0),
            ],
        ],
        color.to_color32(),
    );
}

/// 鸽子局部坐标系内的橄榄枝（鸽嘴附近），随当前变换整体缩放
pub fn draw_attached_branch(painter: &mut ScenePainter<'_>, color: ColorRgba) {
    let cx = 752.0;
    let cy = 180.0;

    // 枝干
    painter.bezier(
        Pos2::new(cx, cy + 80.0),
        Pos2::new(cx + 30.0, cy - 25.0),
        Pos2::new(cx - 50.0, cy - 120.0),
        Pos2::new(cx, cy - 155.0),
        8.0,
        color.to_color32(),
    );

    // 叶片
    painter.push();
    painter.translate(cx - 3.0, cy - 150.0);
    painter.rotate((-35.0_f32).to_radians());
    draw_leaf(painter, 80.0, color);
    painter.pop();

    painter.push();
    painter.translate(cx + 5.0, cy - 20.0);
    painter.rotate((-20.0_f32).to_radians());
    draw_leaf(painter, 80.0, color);
    painter.pop();

    painter.push();
    painter.translate(cx - 81.0, cy - 105.0);
    painter.rotate(30.0_f32.to_radians());
    draw_leaf(painter, 80.0, color);
    painter.pop();
}

/// 屏幕空间的独立橄榄枝：按给定缩放与偏移放置（拼贴草图）
pub fn draw_standalone_branch(
    painter: &mut ScenePainter<'_>,
    scale: f32,
    offset: egui::Vec2,
    color: ColorRgba,
) {
    let cx = offset.x + 750.0 * scale;
    let cy = offset.y + 150.0 * scale;

    painter.bezier(
        Pos2::new(cx, cy + 20.0 * scale),
        Pos2::new(cx + 10.0 * scale, cy - 30.0 * scale),
        Pos2::new(cx - 10.0 * scale, cy - 80.0 * scale),
        Pos2::new(cx, cy - 120.0 * scale),
        10.0 * scale,
        color.to_color32(),
    );

    painter.push();
    painter.translate(cx, cy - 125.0 * scale);
    painter.rotate((-59.0_f32).to_radians());
    draw_leaf(painter, 120.0 * scale, color);
    painter.pop();

    painter.push();
    painter.translate(cx + 5.0 * scale, cy - 20.0 * scale);
    painter.rotate((-20.0_f32).to_radians());
    draw_leaf(painter, 100.0 * scale, color);
    painter.pop();

    painter.push();
    painter.translate(cx - 98.0 * scale, cy - 100.0 * scale);
    painter.rotate(30.0_f32.to_radians());
    draw_leaf(painter, 100.0 * scale, color);
    painter.pop();
}
