//! # 主应用
//!
//! 宿主循环与草图之间的桥：检测中央画布尺寸变化触发 `resize`，
//! 把键盘事件先交给当前草图（未消费的再做全局快捷键），
//! 每帧驱动 `frame` 并把像素表面送到显示路径。

use std::sync::{Arc, Mutex};

use eframe::egui;
use egui::{Key, TextureHandle};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::artwork::{load_artwork_config, ArtworkConfig};
use crate::rendering::gl_canvas::GlCanvasState;
use crate::rendering::painter::ScenePainter;
use crate::rendering::surface::PixelSurface;
use crate::sketches::dove::DoveSketch;
use crate::sketches::drift::{DriftDotsSketch, DriftLinesSketch};
use crate::sketches::mosaic::MosaicSketch;
use crate::sketches::seasons::SeasonsSketch;
use crate::sketches::{FrameInput, Sketch, SketchKind};
use crate::storage::engine_config::EngineConfig;
use crate::storage::snapshot;
use crate::ui::canvas_view;
use crate::ui::control_panel::show_control_panel;
use crate::ui::status_bar::show_status_bar;
use crate::ui::theme;

pub struct SketchbookApp {
    artwork: ArtworkConfig,
    engine: EngineConfig,
    kind: SketchKind,
    sketch: Box<dyn Sketch>,
    /// 主像素画布，尺寸跟随中央面板
    surface: PixelSurface,
    /// egui 纹理路径的句柄（GPU 路径关闭时使用）
    texture: Option<TextureHandle>,
    gl_state: Option<Arc<Mutex<GlCanvasState>>>,
    canvas_size: (usize, usize),
    frame_count: u64,
    last_status: String,
}

impl SketchbookApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        theme::apply_theme(&cc.egui_ctx);

        let artwork = load_artwork_config().expect("artwork.json 加载失败");
        let engine = EngineConfig::load_or_default();
        let gl_state = engine
            .use_gpu_canvas
            .then(|| Arc::new(Mutex::new(GlCanvasState::new())));

        let kind = SketchKind::Dove;
        let sketch = build_sketch(kind, &artwork, &engine);

        Self {
            artwork,
            engine,
            kind,
            sketch,
            surface: PixelSurface::new(0, 0),
            texture: None,
            gl_state,
            canvas_size: (0, 0),
            frame_count: 0,
            last_status: "就绪".to_string(),
        }
    }

    fn switch_sketch(&mut self, kind: SketchKind) {
        self.kind = kind;
        self.sketch = build_sketch(kind, &self.artwork, &self.engine);
        // 置零触发下一帧的 resize 流程
        self.canvas_size = (0, 0);
        self.last_status = format!("已切换: {}", kind.label());
    }

    fn export_snapshot(&mut self) {
        match snapshot::export_png(&self.surface) {
            Ok(Some(path)) => self.last_status = format!("已导出 {}", path.display()),
            Ok(None) => self.last_status = "导出已取消".to_string(),
            Err(message) => self.last_status = message,
        }
    }

    fn apply_gpu_toggle(&mut self) {
        self.engine.save();
        if self.engine.use_gpu_canvas {
            if self.gl_state.is_none() {
                self.gl_state = Some(Arc::new(Mutex::new(GlCanvasState::new())));
            }
        } else {
            self.gl_state = None;
            self.texture = None;
        }
    }
}

fn build_sketch(kind: SketchKind, artwork: &ArtworkConfig, engine: &EngineConfig) -> Box<dyn Sketch> {
    let rng = StdRng::from_entropy();
    let particle_override = engine.particle_count_override;
    match kind {
        SketchKind::Dove => {
            let cfg = artwork.dove.clone();
            let count = particle_override.unwrap_or(cfg.dot_count);
            Box::new(DoveSketch::new(cfg, count, rng))
        }
        SketchKind::Seasons => Box::new(SeasonsSketch::new(artwork.seasons.clone(), rng)),
        SketchKind::DriftDots => Box::new(DriftDotsSketch::new(
            particle_override.unwrap_or(artwork.drift.dot_count),
            rng,
        )),
        SketchKind::DriftLines => Box::new(DriftLinesSketch::new(
            particle_override.unwrap_or(artwork.drift.line_count),
            rng,
        )),
        SketchKind::Mosaic => Box::new(MosaicSketch::new(artwork.mosaic.clone(), rng)),
    }
}

impl eframe::App for SketchbookApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ── 键盘分发：草图优先，未消费的做全局快捷键 ──
        let pressed: Vec<Key> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        repeat: false,
                        ..
                    } => Some(*key),
                    _ => None,
                })
                .collect()
        });
        for key in pressed {
            if self.sketch.key(key) {
                continue;
            }
            if key == Key::S {
                self.export_snapshot();
            }
        }

        // ── 左侧控制面板 ──
        let mut action = None;
        egui::SidePanel::left("control_panel")
            .resizable(false)
            .default_width(200.0)
            .show(ctx, |ui| {
                action = Some(show_control_panel(
                    ui,
                    self.kind,
                    self.sketch.hint(),
                    &mut self.engine.use_gpu_canvas,
                ));
            });
        if let Some(action) = action {
            if let Some(kind) = action.switch_to {
                self.switch_sketch(kind);
            }
            if action.export {
                self.export_snapshot();
            }
            if action.gpu_toggled {
                self.apply_gpu_toggle();
            }
        }

        // ── 底部状态栏 ──
        egui::TopBottomPanel::bottom("status_bar")
            .resizable(false)
            .min_height(28.0)
            .show(ctx, |ui| {
                let fps = ctx.input(|i| {
                    if i.stable_dt > 0.0 {
                        1.0 / i.stable_dt
                    } else {
                        0.0
                    }
                });
                show_status_bar(ui, fps, &self.sketch.status(), &self.last_status);
            });

        // ── 中央画布 ──
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(theme::BG_DARK))
            .show(ctx, |ui| {
                let available = ui.available_size();
                let (rect, response) = ui.allocate_exact_size(available, egui::Sense::hover());

                let target = (rect.width().round() as usize, rect.height().round() as usize);
                if target.0 == 0 || target.1 == 0 {
                    return;
                }
                if target != self.canvas_size {
                    self.canvas_size = target;
                    self.surface.resize(target.0, target.1);
                    // 草图以不透明黑为画布基准（淡化拖影需要不透明底）
                    self.surface.clear(egui::Color32::BLACK);
                    self.sketch.resize(target.0 as f32, target.1 as f32);
                }

                // 指针换算到画布坐标
                let pointer = response
                    .hover_pos()
                    .map(|p| egui::Pos2::new(p.x - rect.left(), p.y - rect.top()));

                let input = FrameInput {
                    width: target.0 as f32,
                    height: target.1 as f32,
                    frame_count: self.frame_count,
                    pointer,
                };
                {
                    let mut painter = ScenePainter::new(&mut self.surface);
                    self.sketch.frame(&input, &mut painter);
                }

                match &self.gl_state {
                    Some(state) => canvas_view::paint_surface_gl(ui, rect, &self.surface, state),
                    None => canvas_view::paint_surface_texture(
                        ui,
                        rect,
                        &self.surface,
                        &mut self.texture,
                    ),
                }
            });

        self.frame_count += 1;
        // 动画循环：持续请求重绘
        ctx.request_repaint();
    }
}
