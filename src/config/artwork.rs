//! # 画作配置
//!
//! 鸽子调色板、国旗配色、各草图的调参常量统一放在内嵌的
//! `artwork.json` 里，启动时一次性解析为强类型结构。
//! 颜色在配置中写作十六进制串，加载时转换为 [`ColorRgba`]。

use serde::Deserialize;

use crate::config::ConfigError;
use crate::core::color::ColorRgba;

const ARTWORK_JSON: &str = include_str!("../assets/artwork.json");

// ═══════════════════════════════════════════════════════════
// 原始结构（与 JSON 一一对应）
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
struct RawArtworkConfig {
    dove: RawDoveConfig,
    mosaic: RawMosaicConfig,
    drift: DriftConfig,
    seasons: SeasonsConfig,
}

#[derive(Debug, Clone, Deserialize)]
struct RawDoveConfig {
    palette: RawBirdPalette,
    branch_color: String,
    easing: f32,
    bobbing_range: f32,
    bobbing_step: f64,
    horizontal_speed: f32,
    pixel_size: i32,
    glitch_range: f32,
    dot_count: usize,
}

#[derive(Debug, Clone, Deserialize)]
struct RawMosaicConfig {
    palette: RawBirdPalette,
    branch_color: String,
    flag_palettes: Vec<Vec<String>>,
    scatter_count: usize,
    scatter_min_dist: f32,
    pattern_count: usize,
    pattern_min_dist: f32,
}

/// 鸽子各部位的颜色，按部位命名（两套皮肤共用同一组键）
#[derive(Debug, Clone, Deserialize)]
struct RawBirdPalette {
    head: String,
    eye: String,
    nape: String,
    neck: String,
    breast: String,
    flank: String,
    belly: String,
    shoulder: String,
    body: String,
    wing_near: String,
    wing_far: String,
    wing_edge: String,
    tail: String,
    feather_main: String,
    feather_inner: String,
    feather_edge: String,
}

// ═══════════════════════════════════════════════════════════
// 强类型结构（对外暴露）
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct ArtworkConfig {
    pub dove: DoveConfig,
    pub mosaic: MosaicConfig,
    pub drift: DriftConfig,
    pub seasons: SeasonsConfig,
}

/// 鸽子主草图（Zoom / Float / Pixelate 模式）的全部调参
#[derive(Debug, Clone)]
pub struct DoveConfig {
    pub palette: BirdPalette,
    pub branch_color: ColorRgba,
    /// 缩放插值的平滑系数
    pub easing: f32,
    /// 漂浮模式纵向位移上限
    pub bobbing_range: f32,
    /// 噪声游标每帧步长
    pub bobbing_step: f64,
    /// 漂浮模式横向速度（像素/帧）
    pub horizontal_speed: f32,
    /// 像素化块边长
    pub pixel_size: i32,
    /// 故障抖动幅度（位置与尺寸各自独立取 ±glitch_range）
    pub glitch_range: f32,
    /// 背景圆点数量
    pub dot_count: usize,
}

#[derive(Debug, Clone)]
pub struct MosaicConfig {
    pub palette: BirdPalette,
    pub branch_color: ColorRgba,
    /// 多国旗颜色组
    pub flag_palettes: Vec<Vec<ColorRgba>>,
    pub scatter_count: usize,
    pub scatter_min_dist: f32,
    pub pattern_count: usize,
    pub pattern_min_dist: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DriftConfig {
    pub dot_count: usize,
    pub line_count: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeasonsConfig {
    /// 季节切换间隔（帧）
    pub change_interval: u64,
    /// 冬季每几帧生成一片雪花
    pub snow_every: u64,
    /// 秋季每几帧生成一片落叶
    pub leaf_every: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct BirdPalette {
    pub head: ColorRgba,
    pub eye: ColorRgba,
    pub nape: ColorRgba,
    pub neck: ColorRgba,
    pub breast: ColorRgba,
    pub flank: ColorRgba,
    pub belly: ColorRgba,
    pub shoulder: ColorRgba,
    pub body: ColorRgba,
    pub wing_near: ColorRgba,
    pub wing_far: ColorRgba,
    pub wing_edge: ColorRgba,
    pub tail: ColorRgba,
    pub feather_main: ColorRgba,
    pub feather_inner: ColorRgba,
    pub feather_edge: ColorRgba,
}

// ═══════════════════════════════════════════════════════════
// 转换
// ═══════════════════════════════════════════════════════════

fn parse_color(value: &str) -> Result<ColorRgba, ConfigError> {
    ColorRgba::from_hex(value).ok_or_else(|| ConfigError::Color(value.to_string()))
}

impl RawBirdPalette {
    fn into_palette(self) -> Result<BirdPalette, ConfigError> {
        Ok(BirdPalette {
            head: parse_color(&self.head)?,
            eye: parse_color(&self.eye)?,
            nape: parse_color(&self.nape)?,
            neck: parse_color(&self.neck)?,
            breast: parse_color(&self.breast)?,
            flank: parse_color(&self.flank)?,
            belly: parse_color(&self.belly)?,
            shoulder: parse_color(&self.shoulder)?,
            body: parse_color(&self.body)?,
            wing_near: parse_color(&self.wing_near)?,
            wing_far: parse_color(&self.wing_far)?,
            wing_edge: parse_color(&self.wing_edge)?,
            tail: parse_color(&self.tail)?,
            feather_main: parse_color(&self.feather_main)?,
            feather_inner: parse_color(&self.feather_inner)?,
            feather_edge: parse_color(&self.feather_edge)?,
        })
    }
}

pub fn load_artwork_config() -> Result<ArtworkConfig, ConfigError> {
    let raw: RawArtworkConfig = serde_json::from_str(ARTWORK_JSON)?;

    let dove = DoveConfig {
        palette: raw.dove.palette.into_palette()?,
        branch_color: parse_color(&raw.dove.branch_color)?,
        easing: raw.dove.easing,
        bobbing_range: raw.dove.bobbing_range,
        bobbing_step: raw.dove.bobbing_step,
        horizontal_speed: raw.dove.horizontal_speed,
        pixel_size: raw.dove.pixel_size,
        glitch_range: raw.dove.glitch_range,
        dot_count: raw.dove.dot_count,
    };

    let mut flag_palettes = Vec::with_capacity(raw.mosaic.flag_palettes.len());
    for group in &raw.mosaic.flag_palettes {
        let mut colors = Vec::with_capacity(group.len());
        for hex in group {
            colors.push(parse_color(hex)?);
        }
        flag_palettes.push(colors);
    }

    let mosaic = MosaicConfig {
        palette: raw.mosaic.palette.into_palette()?,
        branch_color: parse_color(&raw.mosaic.branch_color)?,
        flag_palettes,
        scatter_count: raw.mosaic.scatter_count,
        scatter_min_dist: raw.mosaic.scatter_min_dist,
        pattern_count: raw.mosaic.pattern_count,
        pattern_min_dist: raw.mosaic.pattern_min_dist,
    };

    Ok(ArtworkConfig {
        dove,
        mosaic,
        drift: raw.drift,
        seasons: raw.seasons,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_parses() {
        let cfg = load_artwork_config().expect("artwork.json 应当合法");
        assert_eq!(cfg.dove.pixel_size, 25);
        assert_eq!(cfg.dove.dot_count, 300);
        assert_eq!(cfg.mosaic.flag_palettes.len(), 5);
        assert!(cfg.mosaic.flag_palettes.iter().all(|p| p.len() >= 2));
    }

    #[test]
    fn dove_palette_is_greyscale_family() {
        let cfg = load_artwork_config().unwrap();
        let head = cfg.dove.palette.head;
        assert_eq!(head.as_array(), [0xe9, 0xe6, 0xe2, 255]);
    }
}
