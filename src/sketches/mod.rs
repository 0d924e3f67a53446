//! # 草图集
//!
//! 每幅草图是一个独立的 [`Sketch`] 实现，由主循环统一驱动：
//! 启动与每次视口尺寸变化时先调 `resize`，之后每帧调 `frame`，
//! 键盘事件先交给 `key`（返回 true 表示已被草图消费）。
//! 草图之间不共享状态，切换草图即整体重建。

pub mod bird;
pub mod branch;
pub mod dove;
pub mod drift;
pub mod mosaic;
pub mod seasons;

use egui::{Key, Pos2};

use crate::rendering::painter::ScenePainter;

/// 主循环每帧传入的环境输入
#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    pub width: f32,
    pub height: f32,
    pub frame_count: u64,
    /// 画布坐标系下的指针位置；指针不在画布上时为 None
    pub pointer: Option<Pos2>,
}

/// 一幅独立草图
pub trait Sketch {
    /// 启动时与每次视口尺寸变化时调用，先于当帧的 `frame`
    fn resize(&mut self, width: f32, height: f32);

    /// 每帧调用一次；画笔已指向主画布
    fn frame(&mut self, input: &FrameInput, painter: &mut ScenePainter<'_>);

    /// 键盘按下事件；返回 true 表示按键已被草图消费
    fn key(&mut self, _key: Key) -> bool {
        false
    }

    /// 控制面板展示的操作提示
    fn hint(&self) -> &'static str {
        ""
    }

    /// 状态栏展示的单行状态
    fn status(&self) -> String {
        String::new()
    }
}

/// 草图清单（控制面板的切换项）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SketchKind {
    Dove,
    Seasons,
    DriftDots,
    DriftLines,
    Mosaic,
}

impl SketchKind {
    pub const ALL: [SketchKind; 5] = [
        SketchKind::Dove,
        SketchKind::Seasons,
        SketchKind::DriftDots,
        SketchKind::DriftLines,
        SketchKind::Mosaic,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SketchKind::Dove => "和平鸽",
            SketchKind::Seasons => "四季",
            SketchKind::DriftDots => "漂浮圆点",
            SketchKind::DriftLines => "漂浮线条",
            SketchKind::Mosaic => "国旗拼贴",
        }
    }
}
