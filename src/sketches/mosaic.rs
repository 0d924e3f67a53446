//! # 国旗拼贴
//!
//! 静态构图：黑底上散布最小间距约束的装饰（圆点 / 随机旋转的三角形）
//! 与图案圆盘，配色取自多国国旗色组，中央是国旗皮肤的鸽子与
//! 独立摆放的橄榄枝。只在视口尺寸变化后重绘一次。

use std::f32::consts::TAU;

use egui::{Color32, Pos2};
use rand::rngs::StdRng;
use rand::Rng;

use crate::config::artwork::MosaicConfig;
use crate::core::color::ColorRgba;
use crate::core::view::ViewTransform;
use crate::rendering::painter::ScenePainter;
use crate::sketches::{bird, branch, FrameInput, Sketch};

/// 散点尝试上限
const SCATTER_MAX_ATTEMPTS: usize = 10_000;
/// 图案圆盘尝试上限
const PATTERN_MAX_ATTEMPTS: usize = 500;
/// 图案圆盘距视口边缘的留白
const PATTERN_MARGIN: f32 = 60.0;
/// 图案圆盘直径
const PATTERN_DIAMETER: f32 = 60.0;

/// 拒绝采样生成最小间距约束的随机点集。
/// 达到尝试上限后就用已有的点，数量可能少于 `count`。
fn scatter_points(
    count: usize,
    min_dist: f32,
    width: f32,
    height: f32,
    max_attempts: usize,
    rng: &mut StdRng,
) -> Vec<Pos2> {
    let mut points: Vec<Pos2> = Vec::with_capacity(count);
    let mut attempts = 0;
    while points.len() < count && attempts < max_attempts {
        let candidate = Pos2::new(rng.gen_range(0.0..=width), rng.gen_range(0.0..=height));
        let valid = points
            .iter()
            .all(|p| p.distance(candidate) >= min_dist);
        if valid {
            points.push(candidate);
        }
        attempts += 1;
    }
    points
}

/// 同上，但限制在边缘留白以内（图案圆盘用）
fn pattern_centers(
    count: usize,
    min_dist: f32,
    width: f32,
    height: f32,
    rng: &mut StdRng,
) -> Vec<Pos2> {
    if width <= PATTERN_MARGIN * 2.0 || height <= PATTERN_MARGIN * 2.0 {
        return Vec::new();
    }
    let mut centers: Vec<Pos2> = Vec::with_capacity(count);
    let mut attempts = 0;
    while centers.len() < count && attempts < PATTERN_MAX_ATTEMPTS {
        let candidate = Pos2::new(
            rng.gen_range(PATTERN_MARGIN..(width - PATTERN_MARGIN)),
            rng.gen_range(PATTERN_MARGIN..(height - PATTERN_MARGIN)),
        );
        let far_enough = centers.iter().all(|c| c.distance(candidate) >= min_dist);
        if far_enough {
            centers.push(candidate);
        }
        attempts += 1;
    }
    centers
}

/// 半圆扇形（圆盘被直径一分为二的一半），角度为度、y 轴向下
fn half_disc(
    painter: &mut ScenePainter<'_>,
    center: Pos2,
    diameter: f32,
    from_deg: f32,
    to_deg: f32,
    color: Color32,
) {
    const ARC_STEPS: usize = 24;
    let r = diameter / 2.0;
    let mut points = Vec::with_capacity(ARC_STEPS + 2);
    points.push(center);
    for i in 0..=ARC_STEPS {
        let t = from_deg + (to_deg - from_deg) * i as f32 / ARC_STEPS as f32;
        let rad = t.to_radians();
        points.push(Pos2::new(
            center.x + r * rad.cos(),
            center.y + r * rad.sin(),
        ));
    }
    painter.fill_polygon(&points, color);
}

pub struct MosaicSketch {
    cfg: MosaicConfig,
    /// 扁平展开的全部国旗颜色，散点取色用
    flat_colors: Vec<ColorRgba>,
    rng: StdRng,
    needs_redraw: bool,
}

impl MosaicSketch {
    pub fn new(cfg: MosaicConfig, rng: StdRng) -> Self {
        let flat_colors = cfg.flag_palettes.iter().flatten().copied().collect();
        Self {
            cfg,
            flat_colors,
            rng,
            needs_redraw: true,
        }
    }

    fn draw_scatter(&mut self, input: &FrameInput, painter: &mut ScenePainter<'_>) {
        let points = scatter_points(
            self.cfg.scatter_count,
            self.cfg.scatter_min_dist,
            input.width,
            input.height,
            SCATTER_MAX_ATTEMPTS,
            &mut self.rng,
        );
        for p in points {
            let idx = self.rng.gen_range(0..self.flat_colors.len());
            let color = self.flat_colors[idx].to_color32();
            if self.rng.gen_range(0.0..1.0) < 0.5 {
                painter.circle(p, 12.0, color);
            } else {
                painter.push();
                painter.translate(p.x, p.y);
                painter.rotate(self.rng.gen_range(0.0..TAU));
                painter.fill_polygon(
                    &[
                        Pos2::new(-10.0, 8.0),
                        Pos2::new(10.0, 8.0),
                        Pos2::new(0.0, -12.0),
                    ],
                    color,
                );
                painter.pop();
            }
        }
    }

    fn draw_pattern_circles(&mut self, input: &FrameInput, painter: &mut ScenePainter<'_>) {
        let centers = pattern_centers(
            self.cfg.pattern_count,
            self.cfg.pattern_min_dist,
            input.width,
            input.height,
            &mut self.rng,
        );
        for center in centers {
            painter.circle(center, PATTERN_DIAMETER, Color32::BLACK);

            let palette_idx = self.rng.gen_range(0..self.cfg.flag_palettes.len());
            let palette = &self.cfg.flag_palettes[palette_idx];

            if self.rng.gen_range(0.0..1.0) < 0.5 && palette.len() >= 2 {
                // 双色半圆盘：取同一组里两个不同的颜色
                let c1 = palette[self.rng.gen_range(0..palette.len())];
                let mut c2 = palette[self.rng.gen_range(0..palette.len())];
                while c2 == c1 {
                    c2 = palette[self.rng.gen_range(0..palette.len())];
                }
                half_disc(painter, center, PATTERN_DIAMETER, 90.0, 270.0, c1.to_color32());
                half_disc(painter, center, PATTERN_DIAMETER, 270.0, 450.0, c2.to_color32());
            } else {
                let inner = palette[self.rng.gen_range(0..palette.len())];
                painter.circle(center, PATTERN_DIAMETER * 0.8, inner.to_color32());
            }
        }
    }
}

impl Sketch for MosaicSketch {
    fn resize(&mut self, _width: f32, _height: f32) {
        self.needs_redraw = true;
    }

    fn frame(&mut self, input: &FrameInput, painter: &mut ScenePainter<'_>) {
        // 静态构图：仅在尺寸变化后重绘一次
        if !self.needs_redraw {
            return;
        }
        self.needs_redraw = false;

        painter.surface_mut().clear(Color32::BLACK);
        self.draw_scatter(input, painter);
        self.draw_pattern_circles(input, painter);

        // 国旗皮肤的鸽子 + 独立橄榄枝
        let view = ViewTransform::compute(input.width, input.height);
        if view.base_scale <= 0.0 {
            return;
        }
        painter.push();
        painter.translate(view.base_offset.x, view.base_offset.y);
        painter.scale(view.base_scale);
        bird::draw_bird(painter, &self.cfg.palette);
        painter.pop();
        branch::draw_standalone_branch(
            painter,
            view.base_scale,
            view.base_offset,
            self.cfg.branch_color,
        );
    }

    fn hint(&self) -> &'static str {
        "静态构图；调整窗口尺寸可得到一幅新的随机拼贴"
    }

    fn status(&self) -> String {
        "国旗拼贴（静态）".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn scatter_respects_min_distance() {
        let mut rng = StdRng::seed_from_u64(21);
        let points = scatter_points(80, 35.0, 800.0, 600.0, SCATTER_MAX_ATTEMPTS, &mut rng);
        assert!(!points.is_empty());
        for (i, a) in points.iter().enumerate() {
            for b in points.iter().skip(i + 1) {
                assert!(a.distance(*b) >= 35.0, "{a:?} 与 {b:?} 距离过近");
            }
        }
    }

    #[test]
    fn scatter_gives_up_after_attempt_budget() {
        let mut rng = StdRng::seed_from_u64(22);
        // 200 个 35px 间距的点塞不进 100x100，但必须正常返回
        let points = scatter_points(200, 35.0, 100.0, 100.0, SCATTER_MAX_ATTEMPTS, &mut rng);
        assert!(points.len() < 200);
    }

    #[test]
    fn pattern_centers_keep_edge_margin() {
        let mut rng = StdRng::seed_from_u64(23);
        let centers = pattern_centers(20, 70.0, 1000.0, 700.0, &mut rng);
        assert!(!centers.is_empty());
        for c in &centers {
            assert!((PATTERN_MARGIN..=1000.0 - PATTERN_MARGIN).contains(&c.x));
            assert!((PATTERN_MARGIN..=700.0 - PATTERN_MARGIN).contains(&c.y));
        }
    }

    #[test]
    fn tiny_viewport_has_no_pattern_circles() {
        let mut rng = StdRng::seed_from_u64(24);
        let centers = pattern_centers(20, 70.0, 100.0, 100.0, &mut rng);
        assert!(centers.is_empty());
    }
}
