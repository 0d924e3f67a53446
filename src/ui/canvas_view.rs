//! # 画布视图
//!
//! 把草图表面显示到中央面板的矩形内。两条显示路径：
//! glow 直接 blit（默认，整帧纹理走 PaintCallback），
//! 或 egui 纹理路径（`TextureHandle::set` + `painter.image`，
//! 作为 GPU 路径关闭时的回退）。

use std::sync::{Arc, Mutex};

use egui::{Color32, Pos2, Rect, TextureHandle, TextureOptions, Ui};

use crate::rendering::gl_canvas::{self, GlCanvasState};
use crate::rendering::surface::PixelSurface;

/// 通过 glow 回调显示表面
pub fn paint_surface_gl(
    ui: &mut Ui,
    rect: Rect,
    surface: &PixelSurface,
    state: &Arc<Mutex<GlCanvasState>>,
) {
    if let Ok(mut st) = state.lock() {
        st.set_frame_pixels(
            surface.to_rgba_bytes(),
            surface.width() as u32,
            surface.height() as u32,
        );
    }
    ui.painter()
        .add(gl_canvas::make_canvas_callback(state.clone(), rect));
}

/// 通过 egui 纹理显示表面；纹理惰性创建、逐帧覆写
pub fn paint_surface_texture(
    ui: &mut Ui,
    rect: Rect,
    surface: &PixelSurface,
    texture_slot: &mut Option<TextureHandle>,
) {
    let image = surface.to_color_image();
    match texture_slot {
        Some(texture) => texture.set(image, TextureOptions::NEAREST),
        None => {
            *texture_slot =
                Some(ui.ctx()
                    .load_texture("sketch_surface", image, TextureOptions::NEAREST))
        }
    }
    if let Some(texture) = texture_slot {
        ui.painter_at(rect).image(
            texture.id(),
            rect,
            Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
            Color32::WHITE,
        );
    }
}
