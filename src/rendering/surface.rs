//! # CPU 像素画布
//!
//! 草图统一绘制到 CPU 侧的 RGBA 像素缓冲，再整块上传为纹理显示。
//! 缓冲在帧之间保留：p5 风格的拖影效果即对上一帧像素做一次
//! 半透明黑色覆盖（逐行 rayon 并行），而非清屏重画。
//! 视口尺寸变化时才重新分配。

use egui::{Color32, ColorImage};
use rayon::prelude::*;

/// 标准 src-over 混合（非预乘 alpha）
pub fn blend_over(dst: Color32, src: Color32) -> Color32 {
    let sa = src.a() as u32;
    if sa == 255 {
        return src;
    }
    if sa == 0 {
        return dst;
    }
    let da = dst.a() as u32;
    let out_a = sa * 255 + da * (255 - sa); // 放大 255 倍的结果 alpha
    if out_a == 0 {
        return Color32::TRANSPARENT;
    }
    let ch = |s: u8, d: u8| -> u8 {
        let num = s as u32 * sa * 255 + d as u32 * da * (255 - sa);
        (num / out_a) as u8
    };
    Color32::from_rgba_unmultiplied(
        ch(src.r(), dst.r()),
        ch(src.g(), dst.g()),
        ch(src.b(), dst.b()),
        (out_a / 255) as u8,
    )
}

pub struct PixelSurface {
    width: usize,
    height: usize,
    pixels: Vec<Color32>,
}

impl PixelSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color32::TRANSPARENT; width * height],
        }
    }

    /// 重新分配为新尺寸并清为全透明（仅在视口变化时调用）
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels = vec![Color32::TRANSPARENT; width * height];
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// 整面填充为给定不透明颜色
    pub fn clear(&mut self, color: Color32) {
        self.pixels.fill(color);
    }

    /// 整面清为全透明（离屏表面每帧重绘前调用）
    pub fn clear_transparent(&mut self) {
        self.pixels.fill(Color32::TRANSPARENT);
    }

    /// 对整面做一次半透明覆盖 — 拖影效果的核心。
    /// alpha 越低上一帧残留越多。逐行并行。
    pub fn fade(&mut self, color: Color32) {
        let w = self.width;
        if w == 0 {
            return;
        }
        self.pixels.par_chunks_mut(w).for_each(|row| {
            for px in row.iter_mut() {
                *px = blend_over(*px, color);
            }
        });
    }

    /// src-over 写入单个像素，越界忽略
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.pixels[idx] = blend_over(self.pixels[idx], color);
    }

    /// 读取像素（含 alpha）；越界返回全透明
    pub fn read_pixel(&self, x: i32, y: i32) -> Color32 {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return Color32::TRANSPARENT;
        }
        self.pixels[y as usize * self.width + x as usize]
    }

    /// 将 `src` 的指定列区间 `[x0, x1)` 按 src-over 合成到自身同位置。
    /// 两个表面尺寸必须一致（调用方在 resize 时保证）。
    pub fn blend_columns_from(&mut self, src: &PixelSurface, x0: usize, x1: usize) {
        if src.width != self.width || src.height != self.height {
            return;
        }
        let w = self.width;
        let x1 = x1.min(w);
        if x0 >= x1 {
            return;
        }
        self.pixels
            .par_chunks_mut(w)
            .zip(src.pixels.par_chunks(w))
            .for_each(|(dst_row, src_row)| {
                for x in x0..x1 {
                    dst_row[x] = blend_over(dst_row[x], src_row[x]);
                }
            });
    }

    pub fn to_color_image(&self) -> ColorImage {
        ColorImage {
            size: [self.width, self.height],
            pixels: self.pixels.clone(),
        }
    }

    /// 打包为 RGBA 字节流（PNG 导出与 GL 上传共用）
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for px in &self.pixels {
            out.extend_from_slice(&[px.r(), px.g(), px.b(), px.a()]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_opaque_replaces() {
        let red = Color32::from_rgb(255, 0, 0);
        assert_eq!(blend_over(Color32::BLACK, red), red);
    }

    #[test]
    fn blend_transparent_keeps_dst() {
        let blue = Color32::from_rgb(0, 0, 255);
        assert_eq!(blend_over(blue, Color32::TRANSPARENT), blue);
    }

    #[test]
    fn fade_darkens_opaque_background() {
        let mut surface = PixelSurface::new(4, 4);
        surface.clear(Color32::from_rgb(200, 200, 200));
        surface.fade(Color32::from_rgba_unmultiplied(0, 0, 0, 51));
        let px = surface.read_pixel(0, 0);
        assert!(px.r() < 200 && px.r() > 140, "r = {}", px.r());
        assert_eq!(px.a(), 255);
    }

    #[test]
    fn read_out_of_bounds_is_transparent() {
        let surface = PixelSurface::new(2, 2);
        assert_eq!(surface.read_pixel(-1, 0), Color32::TRANSPARENT);
        assert_eq!(surface.read_pixel(2, 0), Color32::TRANSPARENT);
    }

    #[test]
    fn blend_columns_copies_left_half_only() {
        let mut dst = PixelSurface::new(4, 2);
        dst.clear(Color32::BLACK);
        let mut src = PixelSurface::new(4, 2);
        src.clear_transparent();
        for y in 0..2 {
            for x in 0..4 {
                src.blend_pixel(x, y, Color32::from_rgb(10, 20, 30));
            }
        }
        dst.blend_columns_from(&src, 0, 2);
        assert_eq!(dst.read_pixel(1, 0), Color32::from_rgb(10, 20, 30));
        assert_eq!(dst.read_pixel(2, 0), Color32::BLACK);
    }
}
