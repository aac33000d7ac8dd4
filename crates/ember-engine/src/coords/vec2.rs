use core::ops::{Add, Div, Mul, Sub};

/// 2D vector in pixel-matrix coordinates.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Rounds to the nearest integer pixel.
    #[inline]
    pub fn round_to_pixel(self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }

    /// Rotates around `pivot` given precomputed `sin`/`cos` of the angle.
    ///
    /// Positive angles turn clockwise on screen (+Y points down).
    #[inline]
    pub fn rotated_about(self, pivot: Vec2, sin: f32, cos: f32) -> Vec2 {
        let d = self - pivot;
        Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos) + pivot
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotated_about_quarter_turn_is_clockwise() {
        // Screen convention: rotating +X by 90 degrees lands on +Y (down).
        let (sin, cos) = 90.0_f32.to_radians().sin_cos();
        let p = Vec2::new(20.0, 0.0).rotated_about(Vec2::zero(), sin, cos);
        assert!((p.x - 0.0).abs() < 1e-4);
        assert!((p.y - 20.0).abs() < 1e-4);
    }

    #[test]
    fn rotated_about_respects_pivot() {
        let (sin, cos) = 180.0_f32.to_radians().sin_cos();
        let p = Vec2::new(12.0, 10.0).rotated_about(Vec2::new(10.0, 10.0), sin, cos);
        assert!((p.x - 8.0).abs() < 1e-4);
        assert!((p.y - 10.0).abs() < 1e-4);
    }

    #[test]
    fn round_to_pixel_rounds_to_nearest() {
        assert_eq!(Vec2::new(1.4, 2.6).round_to_pixel(), (1, 3));
        assert_eq!(Vec2::new(-0.5, 0.5).round_to_pixel(), (-1, 1));
    }
}
