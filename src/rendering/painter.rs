//! # 场景画笔
//!
//! 草图面向的绘制接口：p5 风格的 push/pop 变换栈 + 图元填充。
//! 所有图元先在局部坐标构造，经当前仿射变换映射到像素空间后
//! 交给光栅化例程。主画布与离屏表面共用同一套画笔。

use egui::{Color32, Pos2};

use crate::core::affine::Affine;

use super::raster;
use super::surface::PixelSurface;

/// 椭圆折线化的采样段数
const ELLIPSE_SEGMENTS: usize = 48;
/// 贝塞尔描边的折线化段数
const BEZIER_SEGMENTS: usize = 24;

pub struct ScenePainter<'a> {
    surface: &'a mut PixelSurface,
    stack: Vec<Affine>,
    current: Affine,
}

impl<'a> ScenePainter<'a> {
    pub fn new(surface: &'a mut PixelSurface) -> Self {
        Self {
            surface,
            stack: Vec::new(),
            current: Affine::IDENTITY,
        }
    }

    /// 直接访问底层表面（整面淡化、跨表面合成时使用）
    pub fn surface_mut(&mut self) -> &mut PixelSurface {
        self.surface
    }

    // ── 变换栈 ──────────────────────────────────────────────

    pub fn push(&mut self) {
        self.stack.push(self.current);
    }

    pub fn pop(&mut self) {
        if let Some(prev) = self.stack.pop() {
            self.current = prev;
        }
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.current = self.current.then(&Affine::translation(dx, dy));
    }

    /// 均匀缩放
    pub fn scale(&mut self, factor: f32) {
        self.current = self.current.then(&Affine::scaling(factor, factor));
    }

    pub fn rotate(&mut self, radians: f32) {
        self.current = self.current.then(&Affine::rotation(radians));
    }

    pub fn transform(&self) -> &Affine {
        &self.current
    }

    // ── 图元 ────────────────────────────────────────────────

    pub fn fill_polygon(&mut self, points: &[Pos2], color: Color32) {
        let mapped: Vec<Pos2> = points.iter().map(|p| self.current.apply(*p)).collect();
        raster::fill_polygon(self.surface, &mapped, color);
    }

    /// p5 的 `circle(x, y, d)`：d 为直径
    pub fn circle(&mut self, center: Pos2, diameter: f32, color: Color32) {
        let c = self.current.apply(center);
        let r = diameter / 2.0 * self.current.uniform_scale();
        raster::fill_circle(self.surface, c, r, color);
    }

    /// p5 的 `ellipse(x, y, w, h)`：w/h 为两轴直径。
    /// 在局部空间采样轮廓再整体变换，旋转与非均匀缩放都正确。
    pub fn ellipse(&mut self, center: Pos2, w: f32, h: f32, color: Color32) {
        let rx = w / 2.0;
        let ry = h / 2.0;
        let mut points = Vec::with_capacity(ELLIPSE_SEGMENTS);
        for i in 0..ELLIPSE_SEGMENTS {
            let t = i as f32 / ELLIPSE_SEGMENTS as f32 * std::f32::consts::TAU;
            points.push(Pos2::new(center.x + rx * t.cos(), center.y + ry * t.sin()));
        }
        self.fill_polygon(&points, color);
    }

    /// 中心定位的矩形（p5 rectMode(CENTER)）
    pub fn rect_center(&mut self, center: Pos2, w: f32, h: f32, color: Color32) {
        let hw = w / 2.0;
        let hh = h / 2.0;
        self.fill_polygon(
            &[
                Pos2::new(center.x - hw, center.y - hh),
                Pos2::new(center.x + hw, center.y - hh),
                Pos2::new(center.x + hw, center.y + hh),
                Pos2::new(center.x - hw, center.y + hh),
            ],
            color,
        );
    }

    /// 左上角定位的矩形（p5 默认 rectMode(CORNER)）
    pub fn rect_corner(&mut self, corner: Pos2, w: f32, h: f32, color: Color32) {
        self.fill_polygon(
            &[
                corner,
                Pos2::new(corner.x + w, corner.y),
                Pos2::new(corner.x + w, corner.y + h),
                Pos2::new(corner.x, corner.y + h),
            ],
            color,
        );
    }

    pub fn line(&mut self, a: Pos2, b: Pos2, width: f32, color: Color32) {
        let pa = self.current.apply(a);
        let pb = self.current.apply(b);
        raster::stroke_segment(self.surface, pa, pb, width * self.current.uniform_scale(), color);
    }

    /// 描边三次贝塞尔（p5 的 `bezier`）
    pub fn bezier(&mut self, p0: Pos2, c1: Pos2, c2: Pos2, p1: Pos2, width: f32, color: Color32) {
        let flat = raster::flatten_cubic(p0, c1, c2, p1, BEZIER_SEGMENTS);
        let mapped: Vec<Pos2> = flat.iter().map(|p| self.current.apply(*p)).collect();
        let w = width * self.current.uniform_scale();
        for pair in mapped.windows(2) {
            raster::stroke_segment(self.surface, pair[0], pair[1], w, color);
        }
    }

    /// 由贝塞尔段围成的闭合填充路径
    /// （p5 的 beginShape + bezierVertex + endShape(CLOSE)）。
    /// 每个元素是 `[c1, c2, end]`，起点为 `start`。
    pub fn fill_bezier_path(&mut self, start: Pos2, segments: &[[Pos2; 3]], color: Color32) {
        let mut outline = vec![start];
        let mut cursor = start;
        for seg in segments {
            let flat = raster::flatten_cubic(cursor, seg[0], seg[1], seg[2], BEZIER_SEGMENTS);
            outline.extend_from_slice(&flat[1..]);
            cursor = seg[2];
        }
        self.fill_polygon(&outline, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_restores_previous_transform() {
        let mut surface = PixelSurface::new(10, 10);
        let mut painter = ScenePainter::new(&mut surface);
        painter.push();
        painter.translate(5.0, 5.0);
        painter.scale(2.0);
        painter.pop();
        assert_eq!(*painter.transform(), Affine::IDENTITY);
    }

    #[test]
    fn translated_circle_lands_at_mapped_center() {
        let mut surface = PixelSurface::new(20, 20);
        let mut painter = ScenePainter::new(&mut surface);
        painter.translate(10.0, 10.0);
        painter.circle(Pos2::new(0.0, 0.0), 6.0, Color32::WHITE);
        assert_eq!(surface.read_pixel(10, 10), Color32::WHITE);
        assert_eq!(surface.read_pixel(1, 1), Color32::TRANSPARENT);
    }

    #[test]
    fn scaled_polygon_grows() {
        let mut surface = PixelSurface::new(40, 40);
        let mut painter = ScenePainter::new(&mut surface);
        painter.scale(2.0);
        painter.fill_polygon(
            &[
                Pos2::new(2.0, 2.0),
                Pos2::new(18.0, 2.0),
                Pos2::new(18.0, 18.0),
                Pos2::new(2.0, 18.0),
            ],
            Color32::WHITE,
        );
        // (18, 18) 局部 → (36, 36) 像素
        assert_eq!(surface.read_pixel(34, 34), Color32::WHITE);
    }

    #[test]
    fn bezier_path_fills_closed_region() {
        let mut surface = PixelSurface::new(40, 40);
        let mut painter = ScenePainter::new(&mut surface);
        // 叶片状闭合路径
        painter.fill_bezier_path(
            Pos2::new(4.0, 20.0),
            &[
                [
                    Pos2::new(12.0, 4.0),
                    Pos2::new(28.0, 4.0),
                    Pos2::new(36.0, 20.0),
                ],
                [
                    Pos2::new(28.0, 36.0),
                    Pos2::new(12.0, 36.0),
                    Pos2::new(4.0, 20.0),
                ],
            ],
            Color32::WHITE,
        );
        assert_eq!(surface.read_pixel(20, 20), Color32::WHITE);
        assert_eq!(surface.read_pixel(2, 2), Color32::TRANSPARENT);
    }
}
