//! # 漂浮背景
//!
//! 两幅纯背景草图：漂移圆点与漂移线条。
//! 每帧对画布做固定 alpha 的黑色淡化，粒子留下短促的拖尾。

use egui::{Color32, Pos2};
use rand::rngs::StdRng;

use crate::core::field::{DotField, LineField};
use crate::rendering::painter::ScenePainter;
use crate::sketches::{FrameInput, Sketch};

/// 拖尾淡化 alpha
const FADE_ALPHA: u8 = 20;

// ═══════════════════════════════════════════════════════════
// 圆点
// ═══════════════════════════════════════════════════════════

pub struct DriftDotsSketch {
    count: usize,
    field: DotField,
    rng: StdRng,
}

impl DriftDotsSketch {
    pub fn new(count: usize, mut rng: StdRng) -> Self {
        let field = DotField::new(count, 0.0, 0.0, &mut rng);
        Self { count, field, rng }
    }
}

impl Sketch for DriftDotsSketch {
    fn resize(&mut self, width: f32, height: f32) {
        self.field
            .regenerate(self.count, width.max(0.0), height.max(0.0), &mut self.rng);
    }

    fn frame(&mut self, input: &FrameInput, painter: &mut ScenePainter<'_>) {
        painter
            .surface_mut()
            .fade(Color32::from_rgba_unmultiplied(0, 0, 0, FADE_ALPHA));

        let color = Color32::from_rgba_unmultiplied(255, 255, 255, 60);
        for dot in self.field.dots() {
            painter.circle(dot.pos, dot.size, color);
        }
        self.field.update(input.width, input.height, &mut self.rng);
    }

    fn hint(&self) -> &'static str {
        "无交互；圆点漂出视口外一圈后在画面内重生"
    }

    fn status(&self) -> String {
        format!("圆点: {}", self.field.dots().len())
    }
}

// ═══════════════════════════════════════════════════════════
// 线条
// ═══════════════════════════════════════════════════════════

pub struct DriftLinesSketch {
    count: usize,
    field: LineField,
    rng: StdRng,
}

impl DriftLinesSketch {
    pub fn new(count: usize, mut rng: StdRng) -> Self {
        let field = LineField::new(count, 0.0, 0.0, &mut rng);
        Self { count, field, rng }
    }
}

impl Sketch for DriftLinesSketch {
    fn resize(&mut self, width: f32, height: f32) {
        self.field
            .regenerate(self.count, width.max(0.0), height.max(0.0), &mut self.rng);
    }

    fn frame(&mut self, input: &FrameInput, painter: &mut ScenePainter<'_>) {
        painter
            .surface_mut()
            .fade(Color32::from_rgba_unmultiplied(0, 0, 0, FADE_ALPHA));

        let color = Color32::from_rgba_unmultiplied(180, 180, 180, 40);
        let len = self.field.length;
        for line in self.field.lines() {
            let end = Pos2::new(
                line.pos.x + line.angle.cos() * len,
                line.pos.y + line.angle.sin() * len,
            );
            painter.line(line.pos, end, 1.5, color);
        }
        self.field.update(input.width, input.height, &mut self.rng);
    }

    fn hint(&self) -> &'static str {
        "无交互；线条沿自身方向漂移"
    }

    fn status(&self) -> String {
        format!("线条: {}", self.field.lines().len())
    }
}
