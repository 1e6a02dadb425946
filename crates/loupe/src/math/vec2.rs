use serde::{Deserialize, Serialize};

/// 2D vector for page positions, offsets and per-axis ratios
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// Zero vector
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Create a new vector
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise multiplication
    pub fn scale(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x * other.x, self.y * other.y)
    }

    /// Round both components towards positive infinity
    pub fn ceil(self) -> Vec2 {
        Vec2::new(self.x.ceil(), self.y.ceil())
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl std::ops::Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, s: f64) -> Vec2 {
        Vec2::new(self.x * s, self.y * s)
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_operations() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, 4.0);

        let sum = a + b;
        assert!((sum.x - 4.0).abs() < 1e-9);
        assert!((sum.y - 6.0).abs() < 1e-9);

        let diff = b - a;
        assert!((diff.x - 2.0).abs() < 1e-9);
        assert!((diff.y - 2.0).abs() < 1e-9);

        let scaled = a * 2.0;
        assert!((scaled.x - 2.0).abs() < 1e-9);
        assert!((scaled.y - 4.0).abs() < 1e-9);

        let neg = -a;
        assert_eq!(neg, Vec2::new(-1.0, -2.0));
    }

    #[test]
    fn test_scale_and_ceil() {
        let local = Vec2::new(20.0, 20.0);
        let ratio = Vec2::new(3.5, 2.5);
        assert_eq!(local.scale(ratio).ceil(), Vec2::new(70.0, 50.0));

        // Negative halves round towards zero
        assert_eq!(Vec2::new(-12.5, -0.3).ceil(), Vec2::new(-12.0, 0.0));
    }
}
