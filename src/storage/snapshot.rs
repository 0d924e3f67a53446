//! # 画布快照导出
//!
//! 将当前帧的像素画布原样保存为 PNG，文件位置由保存对话框决定。

use std::path::PathBuf;

use crate::rendering::surface::PixelSurface;

use super::paths;

/// 弹出保存对话框并导出当前画布。
///
/// 返回 `Ok(None)` 表示用户取消；`Err` 携带可展示的失败原因。
pub fn export_png(surface: &PixelSurface) -> Result<Option<PathBuf>, String> {
    if surface.is_empty() {
        return Err("画布为空，无可导出内容".to_string());
    }

    let Some(path) = rfd::FileDialog::new()
        .add_filter("PNG 图像", &["png"])
        .set_directory(paths::snapshots_dir())
        .set_file_name("sketch.png")
        .save_file()
    else {
        return Ok(None);
    };

    let (w, h) = (surface.width() as u32, surface.height() as u32);
    let img = image::RgbaImage::from_raw(w, h, surface.to_rgba_bytes())
        .ok_or_else(|| "像素缓冲与画布尺寸不一致".to_string())?;
    img.save(&path).map_err(|e| format!("PNG 写入失败: {e}"))?;

    Ok(Some(path))
}
