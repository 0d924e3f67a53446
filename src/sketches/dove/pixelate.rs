//! # 像素化合成
//!
//! 把离屏表面上的鸽子以"半屏故障"的方式叠到主画布：
//! 左半边原样 src-over 合成；右半边按固定边长的网格行走，
//! 每格采样离屏表面左上角像素——全透明的格子跳过（让背景透出来），
//! 否则以采样色画一个矩形，位置与宽高各自带独立的均匀随机抖动。
//! 网格本身是确定的，随机只存在于抖动。

use egui::Pos2;
use rand::rngs::StdRng;
use rand::Rng;

use crate::rendering::painter::ScenePainter;
use crate::rendering::surface::PixelSurface;

pub fn composite_pixelated(
    painter: &mut ScenePainter<'_>,
    offscreen: &PixelSurface,
    pixel_size: i32,
    glitch_range: f32,
    rng: &mut StdRng,
) {
    let w = offscreen.width() as i32;
    let h = offscreen.height() as i32;
    if w == 0 || h == 0 || pixel_size <= 0 {
        return;
    }
    let half = w / 2;

    // 左半边：未经处理的原图
    painter
        .surface_mut()
        .blend_columns_from(offscreen, 0, half as usize);

    // 右半边：故障网格
    let mut x = half;
    while x < w {
        let mut y = 0;
        while y < h {
            let sample = offscreen.read_pixel(x, y);
            if sample.a() > 0 {
                let jx = rng.gen_range(-glitch_range..=glitch_range);
                let jy = rng.gen_range(-glitch_range..=glitch_range);
                let jw = rng.gen_range(-glitch_range..=glitch_range);
                let jh = rng.gen_range(-glitch_range..=glitch_range);
                painter.rect_center(
                    Pos2::new(x as f32 + jx, y as f32 + jy),
                    pixel_size as f32 + jw,
                    pixel_size as f32 + jh,
                    sample,
                );
            }
            y += pixel_size;
        }
        x += pixel_size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Color32;
    use rand::SeedableRng;

    const RED: Color32 = Color32::from_rgb(200, 0, 0);

    /// 在离屏表面的一个网格采样点放一块不透明颜色
    fn offscreen_with_cell(w: usize, h: usize, cx: i32, cy: i32) -> PixelSurface {
        let mut off = PixelSurface::new(w, h);
        off.clear_transparent();
        off.blend_pixel(cx, cy, RED);
        off
    }

    #[test]
    fn transparent_cells_leave_background_untouched() {
        let mut main = PixelSurface::new(100, 50);
        main.clear(Color32::BLACK);
        let off = PixelSurface::new(100, 50);
        let mut rng = StdRng::seed_from_u64(3);

        let mut painter = ScenePainter::new(&mut main);
        composite_pixelated(&mut painter, &off, 25, 5.0, &mut rng);

        for y in 0..50 {
            for x in 0..100 {
                assert_eq!(main.read_pixel(x, y), Color32::BLACK);
            }
        }
    }

    #[test]
    fn opaque_cell_paints_one_jittered_rect_near_its_cell() {
        let (w, h) = (100usize, 50usize);
        // 采样点 (75, 25) 是右半边的一个网格左上角
        let off = offscreen_with_cell(w, h, 75, 25);
        let mut main = PixelSurface::new(w, h);
        main.clear(Color32::BLACK);
        let mut rng = StdRng::seed_from_u64(11);

        let mut painter = ScenePainter::new(&mut main);
        composite_pixelated(&mut painter, &off, 25, 5.0, &mut rng);

        // 色块中心在 (75±5, 25±5)，边长 25±5 → 覆盖范围在中心 ±(12.5+5)+5 内
        let mut painted = 0;
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                if main.read_pixel(x, y) != Color32::BLACK {
                    painted += 1;
                    assert!(
                        (x - 75).abs() <= 23 && (y - 25).abs() <= 23,
                        "抖动色块越出允许范围: ({x}, {y})"
                    );
                }
            }
        }
        // 最小可能的色块也有 20x20 像素（但会被画布边缘裁掉一部分）
        assert!(painted >= 200, "painted = {painted}");
    }

    #[test]
    fn left_half_is_composited_verbatim() {
        let (w, h) = (100usize, 50usize);
        let mut off = PixelSurface::new(w, h);
        off.clear_transparent();
        off.blend_pixel(10, 10, RED);
        let mut main = PixelSurface::new(w, h);
        main.clear(Color32::BLACK);
        let mut rng = StdRng::seed_from_u64(5);

        let mut painter = ScenePainter::new(&mut main);
        composite_pixelated(&mut painter, &off, 25, 5.0, &mut rng);

        assert_eq!(main.read_pixel(10, 10), RED);
        // 周围像素不受影响
        assert_eq!(main.read_pixel(11, 10), Color32::BLACK);
    }
}
