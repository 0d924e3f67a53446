//! # 四季
//!
//! 季节管理器按固定帧间隔循环 春 → 夏 → 秋 → 冬，
//! 每个季节有自己的底色与装饰：春天的草地、旋转的夏日太阳、
//! 摇摆飘落的秋叶、垂直下落的冬雪。

use std::f32::consts::TAU;

use egui::{Color32, Pos2};
use rand::rngs::StdRng;
use rand::Rng;

use crate::config::artwork::SeasonsConfig;
use crate::rendering::painter::ScenePainter;
use crate::sketches::{FrameInput, Sketch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

const SEASON_CYCLE: [Season; 4] = [
    Season::Spring,
    Season::Summer,
    Season::Autumn,
    Season::Winter,
];

impl Season {
    fn label(&self) -> &'static str {
        match self {
            Season::Spring => "春",
            Season::Summer => "夏",
            Season::Autumn => "秋",
            Season::Winter => "冬",
        }
    }

    fn backdrop(&self) -> Color32 {
        match self {
            Season::Spring => Color32::from_rgb(200, 255, 200),
            Season::Summer => Color32::from_rgb(255, 255, 180),
            Season::Autumn => Color32::from_rgb(255, 200, 150),
            Season::Winter => Color32::from_rgb(180, 220, 255),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct FallingLeaf {
    x: f32,
    y: f32,
    /// 摇摆相位
    phase: f32,
}

pub struct SeasonsSketch {
    cfg: SeasonsConfig,
    season_index: usize,
    /// 上次切换季节的帧号；首帧惰性初始化
    last_change: Option<u64>,
    snowflakes: Vec<Pos2>,
    leaves: Vec<FallingLeaf>,
    rng: StdRng,
}

impl SeasonsSketch {
    pub fn new(cfg: SeasonsConfig, rng: StdRng) -> Self {
        Self {
            cfg,
            season_index: 0,
            last_change: None,
            snowflakes: Vec::new(),
            leaves: Vec::new(),
            rng,
        }
    }

    fn season(&self) -> Season {
        SEASON_CYCLE[self.season_index % SEASON_CYCLE.len()]
    }

    fn advance_season_if_due(&mut self, frame: u64) {
        let last = *self.last_change.get_or_insert(frame);
        if frame - last > self.cfg.change_interval {
            self.season_index = (self.season_index + 1) % SEASON_CYCLE.len();
            self.last_change = Some(frame);
        }
    }

    fn draw_spring(&mut self, input: &FrameInput, painter: &mut ScenePainter<'_>) {
        let ground_y = input.height * 0.85;
        painter.rect_corner(
            Pos2::new(0.0, ground_y),
            input.width,
            input.height * 0.15,
            Color32::from_rgb(100, 200, 100),
        );

        // 草叶逐帧重新随机，近看会轻微闪动，远看是一片草
        let blade = Color32::from_rgb(80, 180, 80);
        let mut x = 0.0;
        while x < input.width {
            let h = self.rng.gen_range(20.0..40.0);
            let angle = self.rng.gen_range(-0.2..0.2);
            painter.push();
            painter.translate(x, ground_y);
            painter.rotate(angle);
            painter.line(Pos2::new(0.0, 0.0), Pos2::new(0.0, -h), 2.0, blade);
            painter.pop();
            x += 8.0;
        }
    }

    fn draw_summer(&self, input: &FrameInput, painter: &mut ScenePainter<'_>) {
        painter.push();
        painter.translate(input.width - 100.0, 100.0);
        painter.rotate(input.frame_count as f32 * 0.02);
        painter.circle(Pos2::new(0.0, 0.0), 80.0, Color32::from_rgb(255, 204, 0));
        let ray = Color32::from_rgb(255, 200, 0);
        for _ in 0..12 {
            painter.line(Pos2::new(0.0, 0.0), Pos2::new(60.0, 0.0), 2.0, ray);
            painter.rotate(std::f32::consts::PI / 6.0);
        }
        painter.pop();
    }

    fn update_autumn(&mut self, input: &FrameInput, painter: &mut ScenePainter<'_>) {
        if input.frame_count % self.cfg.leaf_every == 0 {
            self.leaves.push(FallingLeaf {
                x: self.rng.gen_range(0.0..=input.width.max(1.0)),
                y: 0.0,
                phase: self.rng.gen_range(0.0..TAU),
            });
        }
        let color = Color32::from_rgb(255, 150, 0);
        for leaf in &mut self.leaves {
            let sway = (input.frame_count as f32 * 0.05 + leaf.phase).sin() * 10.0;
            painter.rect_corner(Pos2::new(leaf.x + sway, leaf.y), 10.0, 5.0, color);
            leaf.y += 2.0;
        }
        let h = input.height;
        self.leaves.retain(|l| l.y < h);
    }

    fn update_winter(&mut self, input: &FrameInput, painter: &mut ScenePainter<'_>) {
        if input.frame_count % self.cfg.snow_every == 0 {
            self.snowflakes
                .push(Pos2::new(self.rng.gen_range(0.0..=input.width.max(1.0)), 0.0));
        }
        for flake in &mut self.snowflakes {
            painter.circle(*flake, 5.0, Color32::WHITE);
            flake.y += 2.0;
        }
        let h = input.height;
        self.snowflakes.retain(|f| f.y < h);
    }
}

impl Sketch for SeasonsSketch {
    fn resize(&mut self, _width: f32, _height: f32) {
        // 装饰粒子用视口相对坐标生成，不需要随尺寸重建
    }

    fn frame(&mut self, input: &FrameInput, painter: &mut ScenePainter<'_>) {
        self.advance_season_if_due(input.frame_count);

        let season = self.season();
        painter.surface_mut().clear(season.backdrop());

        match season {
            Season::Spring => {
                self.draw_spring(input, painter);
                self.snowflakes.clear();
                self.leaves.clear();
            }
            Season::Summer => {
                self.draw_summer(input, painter);
                self.snowflakes.clear();
                self.leaves.clear();
            }
            Season::Autumn => {
                self.update_autumn(input, painter);
                self.snowflakes.clear();
            }
            Season::Winter => {
                self.update_winter(input, painter);
                self.leaves.clear();
            }
        }
    }

    fn hint(&self) -> &'static str {
        "无交互；季节每 300 帧自动轮换"
    }

    fn status(&self) -> String {
        format!("季节: {}", self.season().label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::artwork::load_artwork_config;
    use crate::rendering::surface::PixelSurface;
    use rand::SeedableRng;

    fn make_sketch() -> SeasonsSketch {
        let cfg = load_artwork_config().unwrap().seasons;
        SeasonsSketch::new(cfg, StdRng::seed_from_u64(3))
    }

    fn run_frame(sketch: &mut SeasonsSketch, frame: u64) {
        let mut surface = PixelSurface::new(64, 64);
        let mut painter = ScenePainter::new(&mut surface);
        let input = FrameInput {
            width: 64.0,
            height: 64.0,
            frame_count: frame,
            pointer: None,
        };
        sketch.frame(&input, &mut painter);
    }

    #[test]
    fn seasons_cycle_in_order() {
        let mut sketch = make_sketch();
        run_frame(&mut sketch, 0);
        assert_eq!(sketch.season(), Season::Spring);
        run_frame(&mut sketch, 301);
        assert_eq!(sketch.season(), Season::Summer);
        run_frame(&mut sketch, 602);
        assert_eq!(sketch.season(), Season::Autumn);
        run_frame(&mut sketch, 903);
        assert_eq!(sketch.season(), Season::Winter);
        run_frame(&mut sketch, 1204);
        assert_eq!(sketch.season(), Season::Spring);
    }

    #[test]
    fn late_start_does_not_fast_forward_seasons() {
        let mut sketch = make_sketch();
        // 草图在第 5000 帧才被创建：第一帧只做基准校准
        run_frame(&mut sketch, 5000);
        assert_eq!(sketch.season(), Season::Spring);
        run_frame(&mut sketch, 5100);
        assert_eq!(sketch.season(), Season::Spring);
    }

    #[test]
    fn winter_snow_accumulates_and_culls() {
        let mut sketch = make_sketch();
        sketch.season_index = 3; // 冬
        sketch.last_change = Some(0);
        for i in 0..50 {
            run_frame(&mut sketch, i);
        }
        assert!(!sketch.snowflakes.is_empty());
        // 所有存活雪花都在视口内
        assert!(sketch.snowflakes.iter().all(|f| f.y < 64.0));
    }
}
