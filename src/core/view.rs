//! # 画作基准变换
//!
//! 鸽子画作定义在 900x900 的设计空间内。每次视口尺寸变化时重新计算
//! 基准缩放 / 偏移 / 有效尺寸，以及保证画作不完全移出屏幕的最大缩放倍率。

use egui::Vec2;

/// 设计空间边长
pub const DESIGN_EXTENT: f32 = 900.0;
/// 画作在设计空间内的纵向范围（由鸽子与橄榄枝的几何决定）
pub const ARTWORK_LOCAL_MIN_Y: f32 = -10.0;
pub const ARTWORK_LOCAL_MAX_Y: f32 = 800.0;
/// 鸽子的局部中心点
pub const BIRD_CENTER_LOCAL_X: f32 = 450.0;
pub const BIRD_CENTER_LOCAL_Y: f32 = 425.0;

/// 最大缩放的允许区间
const MAX_ZOOM_FLOOR: f32 = 1.0;
const MAX_ZOOM_CEIL: f32 = 2.5;

/// 视口派生的基准变换，随窗口尺寸重算
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// 基准缩放：`min(w, h) / 900`
    pub base_scale: f32,
    /// 将鸽子局部中心置于视口中心的平移量
    pub base_offset: Vec2,
    /// 基准缩放后的画作有效宽高
    pub effective_width: f32,
    pub effective_height: f32,
    /// 以视口中心为锚点放大时，画作上下边缘恰好到达视口边界的缩放倍率，
    /// 取两条边中先越界的一条，并钳到 [1, 2.5]
    pub max_zoom: f32,
}

impl ViewTransform {
    /// 由视口尺寸计算。纯函数：同一输入必得同一输出。
    ///
    /// 视口任一维度为 0 时基准缩放退化为 0，画面不绘制但不报错。
    pub fn compute(width: f32, height: f32) -> Self {
        let base_scale = width.min(height).max(0.0) / DESIGN_EXTENT;
        let base_offset = Vec2::new(
            width / 2.0 - BIRD_CENTER_LOCAL_X * base_scale,
            height / 2.0 - BIRD_CENTER_LOCAL_Y * base_scale,
        );
        let effective_width = DESIGN_EXTENT * base_scale;
        let effective_height = (ARTWORK_LOCAL_MAX_Y - ARTWORK_LOCAL_MIN_Y) * base_scale;

        // 画作上下边缘在基准缩放下的视口坐标
        let center_y = height / 2.0;
        let top_y = base_offset.y + ARTWORK_LOCAL_MIN_Y * base_scale;
        let bottom_y = base_offset.y + ARTWORK_LOCAL_MAX_Y * base_scale;

        // 以视口中心放大 z 倍后：y' = cy + (y - cy) * z。
        // 求上边缘到达 y'=0、下边缘到达 y'=h 时的 z，取较小者。
        let zoom_top = if top_y < center_y {
            center_y / (center_y - top_y)
        } else {
            f32::INFINITY
        };
        let zoom_bottom = if bottom_y > center_y {
            (height - center_y) / (bottom_y - center_y)
        } else {
            f32::INFINITY
        };
        let max_zoom = zoom_top.min(zoom_bottom).clamp(MAX_ZOOM_FLOOR, MAX_ZOOM_CEIL);

        Self {
            base_scale,
            base_offset,
            effective_width,
            effective_height,
            max_zoom,
        }
    }
}
