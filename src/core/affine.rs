//! # 二维仿射变换
//!
//! 软件光栅化画笔的变换栈基础：平移 / 缩放 / 旋转的 2x3 矩阵组合。
//! 所有草图坐标先经仿射映射到画布像素空间，再交给光栅化器。

use egui::Pos2;

/// 2x3 仿射矩阵
///
/// ```text
/// | a  c  e |      x' = a*x + c*y + e
/// | b  d  f |      y' = b*x + d*y + f
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn translation(dx: f32, dy: f32) -> Self {
        Self {
            e: dx,
            f: dy,
            ..Self::IDENTITY
        }
    }

    pub fn scaling(sx: f32, sy: f32) -> Self {
        Self {
            a: sx,
            d: sy,
            ..Self::IDENTITY
        }
    }

    /// 绕原点旋转（弧度）
    pub fn rotation(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// 矩阵组合：`(m1.then(m2)).apply(p) == m1.apply(m2.apply(p))`
    ///
    /// 变换栈按局部空间顺序右乘，与 p5 的 translate/scale/rotate 语义一致。
    pub fn then(&self, rhs: &Affine) -> Self {
        Self {
            a: self.a * rhs.a + self.c * rhs.b,
            b: self.b * rhs.a + self.d * rhs.b,
            c: self.a * rhs.c + self.c * rhs.d,
            d: self.b * rhs.c + self.d * rhs.d,
            e: self.a * rhs.e + self.c * rhs.f + self.e,
            f: self.b * rhs.e + self.d * rhs.f + self.f,
        }
    }

    pub fn apply(&self, p: Pos2) -> Pos2 {
        Pos2::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// 近似均匀缩放因子（用于按比例缩放线宽）
    pub fn uniform_scale(&self) -> f32 {
        (self.a * self.d - self.b * self.c).abs().sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Pos2, b: Pos2) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn translate_then_scale_matches_p5_order() {
        // p5: translate(10, 20); scale(2); point(1, 1) → (12, 22)
        let m = Affine::translation(10.0, 20.0).then(&Affine::scaling(2.0, 2.0));
        assert!(close(m.apply(Pos2::new(1.0, 1.0)), Pos2::new(12.0, 22.0)));
    }

    #[test]
    fn rotation_quarter_turn() {
        let m = Affine::rotation(std::f32::consts::FRAC_PI_2);
        assert!(close(m.apply(Pos2::new(1.0, 0.0)), Pos2::new(0.0, 1.0)));
    }

    #[test]
    fn uniform_scale_of_composition() {
        let m = Affine::scaling(3.0, 3.0).then(&Affine::rotation(0.7));
        assert!((m.uniform_scale() - 3.0).abs() < 1e-4);
    }
}
