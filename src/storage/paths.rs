//! # 应用路径管理
//!
//! 统一计算应用数据文件的路径。
//! 应用数据目录为 `~/.local/share/dove-sketchbook/`，
//! 快照默认输出到其下的 `snapshots/`。首次使用时自动创建目录。

use std::path::PathBuf;
use std::sync::OnceLock;

/// 全局单例：应用数据根目录
static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

const APP_DIR_NAME: &str = "dove-sketchbook";

/// 获取应用数据根目录，首次调用时初始化（创建目录）。
pub fn data_dir() -> &'static PathBuf {
    DATA_DIR.get_or_init(|| {
        let dir = resolve_data_dir();
        let _ = std::fs::create_dir_all(&dir);
        let _ = std::fs::create_dir_all(dir.join("snapshots"));
        dir
    })
}

/// engine.json 的完整路径
pub fn engine_json_path() -> PathBuf {
    data_dir().join("engine.json")
}

/// 快照默认输出目录
pub fn snapshots_dir() -> PathBuf {
    data_dir().join("snapshots")
}

// ── 内部实现 ────────────────────────────────────────────────

/// 推算数据根目录
fn resolve_data_dir() -> PathBuf {
    // 1) 优先使用 $XDG_DATA_HOME
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        let p = PathBuf::from(xdg).join(APP_DIR_NAME);
        if p.parent().map(|d| d.exists()).unwrap_or(false) {
            return p;
        }
    }
    // 2) 回退 ~/.local/share
    if let Some(home) = home_dir() {
        return home.join(".local").join("share").join(APP_DIR_NAME);
    }
    // 3) 极端 fallback：可执行文件旁边
    exe_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// 获取 $HOME
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

/// 可执行文件所在目录
fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.to_path_buf()))
}
