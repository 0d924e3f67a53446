//! # 软件光栅化
//!
//! 画布空间的底层填充例程：扫描线多边形填充（奇偶规则）、圆填充、
//! 三次贝塞尔的折线化。输入坐标已经过仿射变换，直接落在像素空间。

use egui::{Color32, Pos2};

use super::surface::PixelSurface;

/// 扫描线填充任意（可凹、可自交）多边形，奇偶规则。
/// 像素中心落在多边形内部即填充。
pub fn fill_polygon(surface: &mut PixelSurface, points: &[Pos2], color: Color32) {
    if points.len() < 3 || surface.is_empty() {
        return;
    }

    let min_y = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
    let max_y = points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
    let y_start = (min_y.floor().max(0.0)) as i32;
    let y_end = (max_y.ceil().min(surface.height() as f32)) as i32;

    let mut crossings: Vec<f32> = Vec::with_capacity(8);
    for y in y_start..y_end {
        let scan_y = y as f32 + 0.5;
        crossings.clear();

        for i in 0..points.len() {
            let a = points[i];
            let b = points[(i + 1) % points.len()];
            // 半开区间规则避免顶点被计入两次
            if (a.y <= scan_y && b.y > scan_y) || (b.y <= scan_y && a.y > scan_y) {
                let t = (scan_y - a.y) / (b.y - a.y);
                crossings.push(a.x + t * (b.x - a.x));
            }
        }
        crossings.sort_unstable_by(|l, r| l.partial_cmp(r).unwrap_or(std::cmp::Ordering::Equal));

        for pair in crossings.chunks_exact(2) {
            // 像素中心 x+0.5 落在 [pair[0], pair[1]) 内
            let x_start = (pair[0] - 0.5).ceil().max(0.0) as i32;
            let x_end = ((pair[1] - 0.5).ceil() as i32).min(surface.width() as i32);
            for x in x_start..x_end {
                surface.blend_pixel(x, y, color);
            }
        }
    }
}

/// 圆填充：包围盒内逐像素距离判定
pub fn fill_circle(surface: &mut PixelSurface, center: Pos2, radius: f32, color: Color32) {
    if radius <= 0.0 || surface.is_empty() {
        return;
    }
    let y_start = ((center.y - radius).floor().max(0.0)) as i32;
    let y_end = ((center.y + radius).ceil().min(surface.height() as f32)) as i32;
    let x_start = ((center.x - radius).floor().max(0.0)) as i32;
    let x_end = ((center.x + radius).ceil().min(surface.width() as f32)) as i32;
    let r2 = radius * radius;

    for y in y_start..y_end {
        let dy = y as f32 + 0.5 - center.y;
        for x in x_start..x_end {
            let dx = x as f32 + 0.5 - center.x;
            if dx * dx + dy * dy <= r2 {
                surface.blend_pixel(x, y, color);
            }
        }
    }
}

/// 有宽度的线段：主体为四边形，两端补圆帽
pub fn stroke_segment(surface: &mut PixelSurface, p0: Pos2, p1: Pos2, width: f32, color: Color32) {
    let dir = p1 - p0;
    let len = dir.length();
    if len < 1e-6 {
        fill_circle(surface, p0, width / 2.0, color);
        return;
    }
    let normal = egui::Vec2::new(-dir.y, dir.x) / len * (width / 2.0);
    let quad = [p0 + normal, p1 + normal, p1 - normal, p0 - normal];
    fill_polygon(surface, &quad, color);
    fill_circle(surface, p0, width / 2.0, color);
    fill_circle(surface, p1, width / 2.0, color);
}

/// 三次贝塞尔的均匀采样折线化（含首尾端点，返回 `segments + 1` 个点）
pub fn flatten_cubic(p0: Pos2, c1: Pos2, c2: Pos2, p1: Pos2, segments: usize) -> Vec<Pos2> {
    let n = segments.max(1);
    let mut out = Vec::with_capacity(n + 1);
    for i in 0..=n {
        let t = i as f32 / n as f32;
        let u = 1.0 - t;
        let w0 = u * u * u;
        let w1 = 3.0 * u * u * t;
        let w2 = 3.0 * u * t * t;
        let w3 = t * t * t;
        out.push(Pos2::new(
            w0 * p0.x + w1 * c1.x + w2 * c2.x + w3 * p1.x,
            w0 * p0.y + w1 * c1.y + w2 * c2.y + w3 * p1.y,
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygon_fill_covers_interior_not_exterior() {
        let mut surface = PixelSurface::new(20, 20);
        let tri = [
            Pos2::new(2.0, 2.0),
            Pos2::new(18.0, 2.0),
            Pos2::new(10.0, 18.0),
        ];
        fill_polygon(&mut surface, &tri, Color32::WHITE);
        // 重心附近在内部
        assert_eq!(surface.read_pixel(10, 6), Color32::WHITE);
        // 左下角在外部
        assert_eq!(surface.read_pixel(1, 18), Color32::TRANSPARENT);
    }

    #[test]
    fn concave_polygon_leaves_notch_empty() {
        // 凹形 "U"：两臂填充，凹口中央不填充
        let mut surface = PixelSurface::new(30, 30);
        let u_shape = [
            Pos2::new(2.0, 2.0),
            Pos2::new(10.0, 2.0),
            Pos2::new(10.0, 20.0),
            Pos2::new(20.0, 20.0),
            Pos2::new(20.0, 2.0),
            Pos2::new(28.0, 2.0),
            Pos2::new(28.0, 28.0),
            Pos2::new(2.0, 28.0),
        ];
        fill_polygon(&mut surface, &u_shape, Color32::WHITE);
        assert_eq!(surface.read_pixel(5, 10), Color32::WHITE);
        assert_eq!(surface.read_pixel(25, 10), Color32::WHITE);
        assert_eq!(surface.read_pixel(15, 10), Color32::TRANSPARENT);
        assert_eq!(surface.read_pixel(15, 25), Color32::WHITE);
    }

    #[test]
    fn circle_fill_covers_center() {
        let mut surface = PixelSurface::new(10, 10);
        fill_circle(&mut surface, Pos2::new(5.0, 5.0), 3.0, Color32::WHITE);
        assert_eq!(surface.read_pixel(5, 5), Color32::WHITE);
        assert_eq!(surface.read_pixel(0, 0), Color32::TRANSPARENT);
    }

    #[test]
    fn flatten_cubic_hits_endpoints() {
        let pts = flatten_cubic(
            Pos2::new(0.0, 0.0),
            Pos2::new(10.0, 0.0),
            Pos2::new(20.0, 10.0),
            Pos2::new(30.0, 10.0),
            16,
        );
        assert_eq!(pts.len(), 17);
        assert_eq!(pts[0], Pos2::new(0.0, 0.0));
        assert_eq!(pts[16], Pos2::new(30.0, 10.0));
    }

    #[test]
    fn stroke_segment_marks_midpoint() {
        let mut surface = PixelSurface::new(20, 20);
        stroke_segment(
            &mut surface,
            Pos2::new(2.0, 10.0),
            Pos2::new(18.0, 10.0),
            4.0,
            Color32::WHITE,
        );
        assert_eq!(surface.read_pixel(10, 10), Color32::WHITE);
        assert_eq!(surface.read_pixel(10, 2), Color32::TRANSPARENT);
    }
}
