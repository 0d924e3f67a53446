//! # 背景粒子场
//!
//! 两种装饰性粒子场：漂移圆点与漂移线段。
//! 粒子按各自速度匀速移动，越出视口外的宽容边界后在视口内随机重生；
//! 整场仅在视口尺寸变化时整体重建。

use std::f32::consts::TAU;

use egui::{Pos2, Vec2};
use rand::rngs::StdRng;
use rand::Rng;

/// 圆点场的重生边界（视口四周向外延伸的像素数）
const DOT_MARGIN: f32 = 50.0;
/// 线段场的重生边界
const LINE_MARGIN: f32 = 100.0;

/// 随机单位方向乘以给定模长区间的速度
fn random_velocity(rng: &mut StdRng, min_mag: f32, max_mag: f32) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    let mag = rng.gen_range(min_mag..max_mag);
    Vec2::new(angle.cos(), angle.sin()) * mag
}

// ═══════════════════════════════════════════════════════════
// 圆点场
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy)]
pub struct FieldDot {
    pub pos: Pos2,
    /// 直径
    pub size: f32,
    pub vel: Vec2,
}

/// 固定数量的漂移圆点
#[derive(Debug, Clone)]
pub struct DotField {
    dots: Vec<FieldDot>,
}

impl DotField {
    pub fn new(count: usize, width: f32, height: f32, rng: &mut StdRng) -> Self {
        let mut field = Self { dots: Vec::new() };
        field.regenerate(count, width, height, rng);
        field
    }

    /// 整场重建（仅在视口尺寸变化时调用）
    pub fn regenerate(&mut self, count: usize, width: f32, height: f32, rng: &mut StdRng) {
        self.dots.clear();
        for _ in 0..count {
            self.dots.push(FieldDot {
                pos: Pos2::new(rng.gen_range(0.0..=width), rng.gen_range(0.0..=height)),
                size: rng.gen_range(2.0..6.0),
                vel: random_velocity(rng, 0.3, 1.0),
            });
        }
    }

    /// 每帧推进：移动所有点，越界的点在视口内重生并换一个新速度
    pub fn update(&mut self, width: f32, height: f32, rng: &mut StdRng) {
        for dot in &mut self.dots {
            dot.pos += dot.vel;
            let out = dot.pos.x < -DOT_MARGIN
                || dot.pos.x > width + DOT_MARGIN
                || dot.pos.y < -DOT_MARGIN
                || dot.pos.y > height + DOT_MARGIN;
            if out {
                dot.pos = Pos2::new(rng.gen_range(0.0..=width), rng.gen_range(0.0..=height));
                dot.vel = random_velocity(rng, 0.3, 1.0);
            }
        }
    }

    pub fn dots(&self) -> &[FieldDot] {
        &self.dots
    }
}

// ═══════════════════════════════════════════════════════════
// 线段场
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy)]
pub struct FieldLine {
    pub pos: Pos2,
    /// 移动与延伸方向（弧度）
    pub angle: f32,
    pub speed: f32,
}

/// 固定数量的漂移线段，沿自身方向匀速前进
#[derive(Debug, Clone)]
pub struct LineField {
    lines: Vec<FieldLine>,
    /// 线段长度
    pub length: f32,
}

impl LineField {
    pub fn new(count: usize, width: f32, height: f32, rng: &mut StdRng) -> Self {
        let mut field = Self {
            lines: Vec::new(),
            length: 100.0,
        };
        field.regenerate(count, width, height, rng);
        field
    }

    pub fn regenerate(&mut self, count: usize, width: f32, height: f32, rng: &mut StdRng) {
        self.lines.clear();
        for _ in 0..count {
            self.lines.push(FieldLine {
                pos: Pos2::new(rng.gen_range(0.0..=width), rng.gen_range(0.0..=height)),
                angle: rng.gen_range(0.0..TAU),
                speed: rng.gen_range(0.3..1.2),
            });
        }
    }

    /// 每帧推进：沿自身角度前进，越界后重生（速度保留，方向重抽）
    pub fn update(&mut self, width: f32, height: f32, rng: &mut StdRng) {
        for line in &mut self.lines {
            line.pos.x += line.angle.cos() * line.speed;
            line.pos.y += line.angle.sin() * line.speed;
            let out = line.pos.x < -LINE_MARGIN
                || line.pos.x > width + LINE_MARGIN
                || line.pos.y < -LINE_MARGIN
                || line.pos.y > height + LINE_MARGIN;
            if out {
                line.pos = Pos2::new(rng.gen_range(0.0..=width), rng.gen_range(0.0..=height));
                line.angle = rng.gen_range(0.0..TAU);
            }
        }
    }

    pub fn lines(&self) -> &[FieldLine] {
        &self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn dot_field_has_fixed_cardinality() {
        let mut rng = StdRng::seed_from_u64(1);
        let field = DotField::new(300, 800.0, 600.0, &mut rng);
        assert_eq!(field.dots().len(), 300);
    }

    #[test]
    fn out_of_margin_dot_respawns_inside_viewport() {
        let mut rng = StdRng::seed_from_u64(2);
        let (w, h) = (400.0, 300.0);
        let mut field = DotField::new(1, w, h, &mut rng);
        let old_vel = field.dots[0].vel;
        field.dots[0].pos = Pos2::new(w + 60.0, 10.0);
        field.dots[0].vel = Vec2::new(1.0, 0.0);
        field.update(w, h, &mut rng);
        let dot = field.dots()[0];
        assert!((0.0..=w).contains(&dot.pos.x));
        assert!((0.0..=h).contains(&dot.pos.y));
        assert_ne!(dot.vel, old_vel);
    }

    #[test]
    fn in_margin_dot_just_drifts() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut field = DotField::new(1, 400.0, 300.0, &mut rng);
        field.dots[0].pos = Pos2::new(200.0, 150.0);
        field.dots[0].vel = Vec2::new(0.5, -0.25);
        field.update(400.0, 300.0, &mut rng);
        let dot = field.dots()[0];
        assert_eq!(dot.pos, Pos2::new(200.5, 149.75));
    }

    #[test]
    fn velocity_magnitude_in_range() {
        let mut rng = StdRng::seed_from_u64(4);
        let field = DotField::new(200, 800.0, 600.0, &mut rng);
        for dot in field.dots() {
            let mag = dot.vel.length();
            assert!((0.3..1.0).contains(&mag), "速度模长 {mag} 越界");
        }
    }

    #[test]
    fn out_of_margin_line_respawns_inside_viewport() {
        let mut rng = StdRng::seed_from_u64(5);
        let (w, h) = (640.0, 480.0);
        let mut field = LineField::new(1, w, h, &mut rng);
        field.lines[0].pos = Pos2::new(-150.0, 100.0);
        field.update(w, h, &mut rng);
        let line = field.lines()[0];
        assert!((0.0..=w).contains(&line.pos.x));
        assert!((0.0..=h).contains(&line.pos.y));
    }
}
