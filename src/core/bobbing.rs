//! # 上下浮动信号
//!
//! Float / Pixelate 模式下鸽子的纵向漂浮由一维 Perlin 噪声驱动：
//! 游标每帧前进一个固定步长，噪声值映射到 `[-range, range]`。
//! 给定相同种子与游标序列，输出完全可复现。

use noise::{NoiseFn, Perlin};
use rand::rngs::StdRng;
use rand::Rng;

/// 每次进入模式时游标重置到的随机区间上界
const RESEED_SPAN: f64 = 1000.0;

pub struct BobbingSignal {
    perlin: Perlin,
    cursor: f64,
}

impl BobbingSignal {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            cursor: 0.0,
        }
    }

    /// 模式（重）进入时调用：游标跳到一个新的随机位置，
    /// 避免两次进入看到同一段浮动轨迹
    pub fn reseed_cursor(&mut self, rng: &mut StdRng) {
        self.cursor = rng.gen_range(0.0..RESEED_SPAN);
    }

    /// 游标前进固定步长（每帧一次）
    pub fn advance(&mut self, step: f64) {
        self.cursor += step;
    }

    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    /// 当前游标处的纵向位移，落在 `[-range, range]` 内
    pub fn offset(&self, range: f32) -> f32 {
        // Perlin 名义输出 [-1, 1]，钳一下防御边界溢出
        let n = self.perlin.get([self.cursor, 0.0]).clamp(-1.0, 1.0) as f32;
        n * range
    }
}

impl std::fmt::Debug for BobbingSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BobbingSignal")
            .field("cursor", &self.cursor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn offset_is_bounded() {
        let mut sig = BobbingSignal::new(7);
        for _ in 0..2000 {
            sig.advance(0.02);
            let v = sig.offset(50.0);
            assert!((-50.0..=50.0).contains(&v), "位移 {v} 越界");
        }
    }

    #[test]
    fn same_seed_and_cursor_reproduce() {
        let mut a = BobbingSignal::new(42);
        let mut b = BobbingSignal::new(42);
        for _ in 0..100 {
            a.advance(0.02);
            b.advance(0.02);
            assert_eq!(a.offset(50.0), b.offset(50.0));
        }
    }

    #[test]
    fn reseed_moves_cursor() {
        let mut sig = BobbingSignal::new(1);
        let mut rng = StdRng::seed_from_u64(9);
        let before = sig.cursor();
        sig.reseed_cursor(&mut rng);
        assert_ne!(before, sig.cursor());
        assert!((0.0..RESEED_SPAN).contains(&sig.cursor()));
    }
}
