//! # 引擎配置（EngineConfig）
//!
//! 与画作内容无关的机器侧调参，持久化到数据目录下的 `engine.json`。
//! 文件缺失或字段缺失时取默认值（`serde(default)`），
//! 读写失败静默降级，不打断绘制。

use serde::{Deserialize, Serialize};

use super::paths;

/// 引擎调参——画布显示与性能相关的可调数值。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 使用 glow 直接上传 / 绘制画布纹理；关闭则走 egui 纹理路径
    pub use_gpu_canvas: bool,
    /// 背景粒子数量覆盖（None 时使用 artwork.json 的值）
    pub particle_count_override: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            use_gpu_canvas: true,
            particle_count_override: None,
        }
    }
}

impl EngineConfig {
    /// 从 engine.json 加载；文件不存在或解析失败时返回默认配置
    pub fn load_or_default() -> Self {
        let path = paths::engine_json_path();
        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// 写回 engine.json（失败静默）
    pub fn save(&self) {
        if let Ok(content) = serde_json::to_string_pretty(self) {
            let _ = std::fs::write(paths::engine_json_path(), content);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_json() {
        let cfg = EngineConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.use_gpu_canvas, cfg.use_gpu_canvas);
        assert_eq!(back.particle_count_override, cfg.particle_count_override);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: EngineConfig = serde_json::from_str("{}").unwrap();
        assert!(cfg.use_gpu_canvas);
        assert_eq!(cfg.particle_count_override, None);
    }
}
