//! # 鸽子几何
//!
//! 鸽子由 900x900 设计空间内的一组多边形拼成。
//! 顶点坐标是作品的固定几何，颜色由调色板注入——
//! 灰白色系（和平鸽草图）与国旗色系（拼贴草图）共用同一副身体。

use egui::Pos2;

use crate::config::artwork::BirdPalette;
use crate::core::color::ColorRgba;
use crate::rendering::painter::ScenePainter;

fn poly(painter: &mut ScenePainter<'_>, pts: &[(f32, f32)], color: ColorRgba) {
    let mapped: Vec<Pos2> = pts.iter().map(|&(x, y)| Pos2::new(x, y)).collect();
    painter.fill_polygon(&mapped, color.to_color32());
}

/// 在当前变换下绘制整只鸽子（头、颈、躯干、翅、尾、羽）
pub fn draw_bird(painter: &mut ScenePainter<'_>, palette: &BirdPalette) {
    // 头 + 眼
    poly(
        painter,
        &[
            (570.0, 100.0),
            (610.0, 98.0),
            (750.0, 150.0),
            (660.0, 210.0),
            (650.0, 250.0),
            (520.0, 300.0),
        ],
        palette.head,
    );
    painter.ellipse(Pos2::new(605.0, 140.0), 35.0, 35.0, palette.eye.to_color32());

    // 颈背与颈前
    poly(
        painter,
        &[(450.0, 200.0), (520.0, 300.0), (570.0, 100.0)],
        palette.nape,
    );
    poly(
        painter,
        &[(650.0, 250.0), (520.0, 300.0), (680.0, 400.0)],
        palette.neck,
    );

    // 躯干
    poly(
        painter,
        &[(450.0, 200.0), (520.0, 300.0), (340.0, 330.0)],
        palette.breast,
    );
    poly(
        painter,
        &[(340.0, 330.0), (220.0, 455.0), (432.0, 530.0)],
        palette.flank,
    );
    poly(
        painter,
        &[(220.0, 455.0), (340.0, 330.0), (100.0, 300.0)],
        palette.belly,
    );
    poly(
        painter,
        &[(680.0, 400.0), (650.0, 500.0), (520.0, 300.0)],
        palette.shoulder,
    );
    poly(
        painter,
        &[
            (340.0, 330.0),
            (520.0, 300.0),
            (650.0, 500.0),
            (445.0, 560.0),
        ],
        palette.body,
    );

    // 翅膀
    poly(
        painter,
        &[(340.0, 330.0), (230.0, 200.0), (433.0, 220.0)],
        palette.wing_near,
    );
    poly(
        painter,
        &[(230.0, 200.0), (100.0, 50.0), (340.0, 80.0)],
        palette.wing_far,
    );
    poly(
        painter,
        &[
            (340.0, 80.0),
            (450.0, 200.0),
            (433.0, 220.0),
            (230.0, 200.0),
        ],
        palette.wing_edge,
    );

    // 尾
    poly(
        painter,
        &[
            (220.0, 455.0),
            (100.0, 630.0),
            (80.0, 550.0),
            (0.0, 520.0),
            (181.0, 405.0),
        ],
        palette.tail,
    );

    // 尾羽
    poly(
        painter,
        &[
            (445.0, 560.0),
            (500.0, 800.0),
            (150.0, 800.0),
            (170.0, 760.0),
            (350.0, 700.0),
        ],
        palette.feather_main,
    );
    poly(
        painter,
        &[
            (170.0, 760.0),
            (350.0, 700.0),
            (350.0, 501.0),
            (300.0, 483.0),
        ],
        palette.feather_inner,
    );
    poly(
        painter,
        &[
            (350.0, 700.0),
            (350.0, 501.0),
            (432.0, 530.0),
            (445.0, 560.0),
        ],
        palette.feather_edge,
    );
}
