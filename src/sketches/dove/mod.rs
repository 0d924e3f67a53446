//! # 和平鸽
//!
//! 鸽子与橄榄枝的主草图，三种互斥的显示模式：
//!
//! - **Zoom**：鼠标纵向位置控制目标缩放，画面以视口中心为锚点
//!   指数插值缩放，背景淡化 alpha 随缩放变化产生拖影。
//! - **Float**：鸽子匀速向右漂移、越过右缘后从左侧重新进入，
//!   纵向由 Perlin 噪声驱动上下浮动。
//! - **Pixelate**：在 Float 运动之上叠加半屏像素化故障效果。
//!
//! 模式切换 / 视口变化时的重建顺序见 `resize` 与 `initialize_birds`。

mod pixelate;

use egui::{Color32, Key, Pos2};
use rand::rngs::StdRng;

use crate::config::artwork::DoveConfig;
use crate::core::bobbing::BobbingSignal;
use crate::core::field::DotField;
use crate::core::view::{self, ViewTransform};
use crate::rendering::painter::ScenePainter;
use crate::rendering::surface::PixelSurface;
use crate::sketches::{bird, branch, FrameInput, Sketch};

/// 缩放的下限；上限由视口派生（[`ViewTransform::max_zoom`]）
const ZOOM_MIN: f32 = 0.5;
/// 指针在视口纵向中心时的目标缩放
const ZOOM_AT_CENTER: f32 = 2.0;
/// Zoom 模式拖影 alpha 的映射区间
const ZOOM_FADE_MIN: f32 = 5.0;
const ZOOM_FADE_MAX: f32 = 50.0;
/// Float / Pixelate 模式的固定拖影 alpha
const DRIFT_FADE_ALPHA: u8 = 20;

/// p5 的 map()：线性重映射，不做钳制
fn remap(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    out_min + (value - in_min) / (in_max - in_min) * (out_max - out_min)
}

/// 显示模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Zoom,
    Float,
    Pixelate,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Zoom => "缩放",
            Mode::Float => "漂浮",
            Mode::Pixelate => "像素化",
        }
    }
}

/// 画面上唯一的一只鸽子
#[derive(Debug, Clone, Copy)]
pub struct Bird {
    pub position: Pos2,
    pub scale: f32,
}

/// 缩放插值状态，两个值都始终在 `[0.5, max_zoom]` 内
#[derive(Debug, Clone, Copy)]
pub struct ZoomState {
    pub current: f32,
    pub target: f32,
}

impl ZoomState {
    fn reset(&mut self) {
        self.current = 1.0;
        self.target = 1.0;
    }
}

pub struct DoveSketch {
    cfg: DoveConfig,
    dot_count: usize,
    mode: Mode,
    view: ViewTransform,
    zoom: ZoomState,
    /// 槽位语义：任意时刻至多一只
    bird: Option<Bird>,
    field: DotField,
    bobbing: BobbingSignal,
    /// 像素化效果的离屏表面，尺寸始终跟随视口
    offscreen: PixelSurface,
    rng: StdRng,
}

impl DoveSketch {
    pub fn new(cfg: DoveConfig, dot_count: usize, mut rng: StdRng) -> Self {
        let field = DotField::new(dot_count, 0.0, 0.0, &mut rng);
        let bobbing = BobbingSignal::new(0x0d0e);
        Self {
            cfg,
            dot_count,
            mode: Mode::Zoom,
            view: ViewTransform::compute(0.0, 0.0),
            zoom: ZoomState {
                current: 1.0,
                target: 1.0,
            },
            bird: None,
            field,
            bobbing,
            offscreen: PixelSurface::new(0, 0),
            rng,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn zoom(&self) -> ZoomState {
        self.zoom
    }

    pub fn bird(&self) -> Option<Bird> {
        self.bird
    }

    pub fn view(&self) -> ViewTransform {
        self.view
    }

    /// 模式（重）进入初始化：清空槽位，按模式放置唯一一只鸽子，
    /// 并把噪声游标跳到新的随机位置。
    /// 每次模式切换与每次 resize 后都会调用，调用后恰有一只鸽子。
    fn initialize_birds(&mut self) {
        self.bird = None;
        let position = match self.mode {
            Mode::Zoom => Pos2::new(self.view.base_offset.x, self.view.base_offset.y),
            // 从左侧屏幕外进场
            Mode::Float | Mode::Pixelate => {
                Pos2::new(-self.view.effective_width, self.view.base_offset.y)
            }
        };
        self.bird = Some(Bird {
            position,
            scale: self.view.base_scale,
        });
        self.bobbing.reseed_cursor(&mut self.rng);
    }

    fn draw_field(&self, painter: &mut ScenePainter<'_>) {
        let color = Color32::from_rgba_unmultiplied(255, 255, 255, 60);
        for dot in self.field.dots() {
            painter.circle(dot.pos, dot.size, color);
        }
    }

    /// 在给定画笔下绘制鸽子与附着的橄榄枝
    fn draw_bird_with(bird: &Option<Bird>, cfg: &DoveConfig, painter: &mut ScenePainter<'_>) {
        if let Some(b) = bird {
            painter.push();
            painter.translate(b.position.x, b.position.y);
            painter.scale(b.scale);
            bird::draw_bird(painter, &cfg.palette);
            branch::draw_attached_branch(painter, cfg.branch_color);
            painter.pop();
        }
    }

    // ── Zoom 模式 ───────────────────────────────────────────

    fn frame_zoom(&mut self, input: &FrameInput, painter: &mut ScenePainter<'_>) {
        // 拖影强度随当前缩放变化：放得越大残影越少
        let fade = remap(
            self.zoom.current,
            ZOOM_MIN,
            self.view.max_zoom,
            ZOOM_FADE_MIN,
            ZOOM_FADE_MAX,
        );
        painter
            .surface_mut()
            .fade(Color32::from_rgba_unmultiplied(0, 0, 0, fade.round() as u8));

        // 指针离纵向中心越远目标缩放越小
        if let Some(pointer) = input.pointer {
            let dist = (pointer.y - input.height / 2.0).abs();
            let target = remap(dist, 0.0, input.height / 2.0, ZOOM_AT_CENTER, ZOOM_MIN);
            self.zoom.target = target.clamp(ZOOM_MIN, self.view.max_zoom);
        }
        self.zoom.current += (self.zoom.target - self.zoom.current) * self.cfg.easing;
        self.zoom.current = self.zoom.current.clamp(ZOOM_MIN, self.view.max_zoom);

        // 背景与鸽子都画在以视口中心为锚点的整体缩放里；
        // 鸽子自身保持基准变换，缩放只表达在外层视图上
        let cx = input.width / 2.0;
        let cy = input.height / 2.0;
        painter.push();
        painter.translate(cx, cy);
        painter.scale(self.zoom.current);
        painter.translate(-cx, -cy);
        self.draw_field(painter);
        Self::draw_bird_with(&self.bird, &self.cfg, painter);
        painter.pop();

        self.field.update(input.width, input.height, &mut self.rng);
    }

    // ── Float / Pixelate 共用运动 ───────────────────────────

    fn frame_drift(&mut self, input: &FrameInput, painter: &mut ScenePainter<'_>) {
        // 固定低 alpha：这条路径不做 Zoom 式的强拖影
        painter
            .surface_mut()
            .fade(Color32::from_rgba_unmultiplied(0, 0, 0, DRIFT_FADE_ALPHA));

        self.draw_field(painter);
        self.field.update(input.width, input.height, &mut self.rng);

        self.bobbing.advance(self.cfg.bobbing_step);
        let bob = self.bobbing.offset(self.cfg.bobbing_range);

        if let Some(b) = self.bird.as_mut() {
            // 匀速右移，越过右缘后从左侧重新进入
            b.position.x += self.cfg.horizontal_speed;
            if b.position.x > input.width {
                b.position.x = -self.view.effective_width;
            }

            // 纵向以双倍速率逼近 基准纵坐标 + 噪声位移
            let target_y = self.view.base_offset.y + bob;
            b.position.y += (target_y - b.position.y) * (self.cfg.easing * 2.0);

            // 最终安全钳制：画作上下边缘不越出视口
            let lo = -view::ARTWORK_LOCAL_MIN_Y * self.view.base_scale;
            let hi = input.height - view::ARTWORK_LOCAL_MAX_Y * self.view.base_scale;
            b.position.y = b.position.y.clamp(lo, hi.max(lo));

            b.scale = self.view.base_scale;
        }

        match self.mode {
            Mode::Float => Self::draw_bird_with(&self.bird, &self.cfg, painter),
            Mode::Pixelate => {
                self.offscreen.clear_transparent();
                {
                    let mut off_painter = ScenePainter::new(&mut self.offscreen);
                    Self::draw_bird_with(&self.bird, &self.cfg, &mut off_painter);
                }
                pixelate::composite_pixelated(
                    painter,
                    &self.offscreen,
                    self.cfg.pixel_size,
                    self.cfg.glitch_range,
                    &mut self.rng,
                );
            }
            Mode::Zoom => unreachable!("frame_drift 只在 Float/Pixelate 下调用"),
        }
    }
}

impl Sketch for DoveSketch {
    fn resize(&mut self, width: f32, height: f32) {
        // 顺序即依赖：变换 → 背景场 → 鸽子 → 离屏表面
        self.view = ViewTransform::compute(width, height);
        self.field
            .regenerate(self.dot_count, width.max(0.0), height.max(0.0), &mut self.rng);
        self.initialize_birds();
        self.offscreen
            .resize(width.max(0.0) as usize, height.max(0.0) as usize);
    }

    fn frame(&mut self, input: &FrameInput, painter: &mut ScenePainter<'_>) {
        // 退化视口：缩放为 0，跳过绘制但不报错
        if self.view.base_scale <= 0.0 {
            return;
        }
        match self.mode {
            Mode::Zoom => self.frame_zoom(input, painter),
            Mode::Float | Mode::Pixelate => self.frame_drift(input, painter),
        }
    }

    fn key(&mut self, key: Key) -> bool {
        match key {
            Key::M => {
                self.mode = match self.mode {
                    Mode::Zoom => Mode::Float,
                    Mode::Float | Mode::Pixelate => Mode::Zoom,
                };
                self.zoom.reset();
                self.initialize_birds();
                true
            }
            Key::P => match self.mode {
                Mode::Float => {
                    self.mode = Mode::Pixelate;
                    true
                }
                Mode::Pixelate => {
                    self.mode = Mode::Float;
                    true
                }
                // 缩放模式下像素化不可用：按键吞掉但不生效
                Mode::Zoom => true,
            },
            _ => false,
        }
    }

    fn hint(&self) -> &'static str {
        "M 切换 缩放/漂浮，漂浮中按 P 开关像素化；\n缩放模式下鼠标的纵向位置控制缩放深度"
    }

    fn status(&self) -> String {
        format!("模式: {} | 缩放: {:.2}", self.mode.label(), self.zoom.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::artwork::load_artwork_config;
    use rand::SeedableRng;

    fn make_sketch() -> DoveSketch {
        let cfg = load_artwork_config().unwrap().dove;
        let count = cfg.dot_count;
        DoveSketch::new(cfg, count, StdRng::seed_from_u64(7))
    }

    fn run_frame(sketch: &mut DoveSketch, w: f32, h: f32, pointer: Option<Pos2>, frame: u64) {
        let mut surface = PixelSurface::new(w as usize, h as usize);
        let mut painter = ScenePainter::new(&mut surface);
        let input = FrameInput {
            width: w,
            height: h,
            frame_count: frame,
            pointer,
        };
        sketch.frame(&input, &mut painter);
    }

    #[test]
    fn starts_in_zoom_with_centered_bird() {
        let mut sketch = make_sketch();
        sketch.resize(900.0, 900.0);
        assert_eq!(sketch.mode(), Mode::Zoom);
        let bird = sketch.bird().expect("resize 后必须恰有一只鸽子");
        assert_eq!(bird.position.x, sketch.view().base_offset.x);
        assert_eq!(bird.position.y, sketch.view().base_offset.y);
    }

    #[test]
    fn entering_float_places_bird_off_screen_left_and_resets_zoom() {
        let mut sketch = make_sketch();
        sketch.resize(900.0, 900.0);
        // 先推几帧让缩放偏离 1
        for i in 0..10 {
            run_frame(&mut sketch, 900.0, 900.0, Some(Pos2::new(450.0, 450.0)), i);
        }
        assert!(sketch.key(Key::M));
        assert_eq!(sketch.mode(), Mode::Float);
        let bird = sketch.bird().unwrap();
        assert_eq!(bird.position.x, -sketch.view().effective_width);
        assert_eq!(bird.position.y, sketch.view().base_offset.y);
        assert_eq!(sketch.zoom().current, 1.0);
        assert_eq!(sketch.zoom().target, 1.0);
    }

    #[test]
    fn mode_transition_table_is_exhaustive() {
        let mut sketch = make_sketch();
        sketch.resize(600.0, 600.0);

        // Zoom --M--> Float
        assert!(sketch.key(Key::M));
        assert_eq!(sketch.mode(), Mode::Float);
        // Float --P--> Pixelate
        assert!(sketch.key(Key::P));
        assert_eq!(sketch.mode(), Mode::Pixelate);
        // Pixelate --P--> Float
        assert!(sketch.key(Key::P));
        assert_eq!(sketch.mode(), Mode::Float);
        // Float --M--> Zoom
        assert!(sketch.key(Key::M));
        assert_eq!(sketch.mode(), Mode::Zoom);
        // Zoom --P--> Zoom（静默无操作）
        assert!(sketch.key(Key::P));
        assert_eq!(sketch.mode(), Mode::Zoom);
        // Pixelate --M--> Zoom
        sketch.key(Key::M);
        sketch.key(Key::P);
        assert_eq!(sketch.mode(), Mode::Pixelate);
        assert!(sketch.key(Key::M));
        assert_eq!(sketch.mode(), Mode::Zoom);
        // 未处理按键：模式不变、不消费
        assert!(!sketch.key(Key::A));
        assert_eq!(sketch.mode(), Mode::Zoom);
    }

    #[test]
    fn pointer_at_center_targets_max_allowed_zoom() {
        let mut sketch = make_sketch();
        sketch.resize(900.0, 900.0);
        run_frame(&mut sketch, 900.0, 900.0, Some(Pos2::new(450.0, 450.0)), 0);
        // 纵向距离 0 → 预钳制目标 2.0，被钳到 min(2.0, max_zoom)
        let expected = 2.0_f32.min(sketch.view().max_zoom);
        assert!((sketch.zoom().target - expected).abs() < 1e-5);
    }

    #[test]
    fn zoom_values_stay_in_band_under_pointer_extremes() {
        let mut sketch = make_sketch();
        sketch.resize(300.0, 300.0);
        for i in 0..60 {
            // 指针贴着上缘：距离 = h/2 → 目标 0.5
            run_frame(&mut sketch, 300.0, 300.0, Some(Pos2::new(150.0, 0.0)), i);
            let z = sketch.zoom();
            let max = sketch.view().max_zoom;
            assert!((0.5..=max).contains(&z.current), "current {} 越界", z.current);
            assert!((0.5..=max).contains(&z.target), "target {} 越界", z.target);
        }
    }

    #[test]
    fn drift_keeps_artwork_inside_viewport_vertically() {
        let mut sketch = make_sketch();
        sketch.resize(300.0, 300.0);
        sketch.key(Key::M); // 进入 Float
        for i in 0..120 {
            run_frame(&mut sketch, 300.0, 300.0, None, i);
            let bird = sketch.bird().unwrap();
            let s = sketch.view().base_scale;
            let top = bird.position.y + view::ARTWORK_LOCAL_MIN_Y * s;
            let bottom = bird.position.y + view::ARTWORK_LOCAL_MAX_Y * s;
            assert!(top >= -1e-3, "上缘越界: {top}");
            assert!(bottom <= 300.0 + 1e-3, "下缘越界: {bottom}");
        }
    }

    #[test]
    fn drift_wraps_from_right_edge_to_left_entry() {
        let mut sketch = make_sketch();
        sketch.resize(300.0, 300.0);
        sketch.key(Key::M);
        // 手动把鸽子推到右缘附近
        sketch.bird.as_mut().unwrap().position.x = 299.5;
        run_frame(&mut sketch, 300.0, 300.0, None, 0);
        let bird = sketch.bird().unwrap();
        assert_eq!(bird.position.x, -sketch.view().effective_width);
    }

    #[test]
    fn degenerate_viewport_skips_frame_without_panic() {
        let mut sketch = make_sketch();
        sketch.resize(0.0, 0.0);
        run_frame(&mut sketch, 0.0, 0.0, None, 0);
        assert!(sketch.bird().is_some());
    }
}
