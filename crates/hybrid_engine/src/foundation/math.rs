//! Math utilities and types
//!
//! Provides the 2D math types used for positions, sizes and velocities.

pub use nalgebra::{Rotation2, Vector2};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Rotate a vector counter-clockwise by an angle in degrees
pub fn rotate_degrees(vector: Vec2, degrees: f32) -> Vec2 {
    Rotation2::new(degrees.to_radians()) * vector
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rotate_degrees_counter_clockwise() {
        let down = Vec2::new(0.0, -85.0);
        let turned = rotate_degrees(down, 90.0);
        assert_relative_eq!(turned.x, 85.0, epsilon = 1e-4);
        assert_relative_eq!(turned.y, 0.0, epsilon = 1e-4);

        let unchanged = rotate_degrees(down, 0.0);
        assert_relative_eq!(unchanged, down);
    }

    #[test]
    fn test_rotation_keeps_length() {
        let v = rotate_degrees(Vec2::new(0.0, -85.0), -30.0);
        assert_relative_eq!(v.norm(), 85.0, epsilon = 1e-4);
        assert!(v.x < 0.0);
    }
}
