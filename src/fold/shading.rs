//! Cosmetic shadow derived from the fold angle

use std::f32::consts::PI;

/// Upper bound of the shade intensity
pub const MAX_SHADE: f32 = 0.5;

/// `0.5 - |angle| / 2π`, kept within `[0, 0.5]`
pub fn shade_intensity(angle: f32) -> f32 {
    (MAX_SHADE - angle.abs() / (2.0 * PI)).clamp(0.0, MAX_SHADE)
}

/// A linear gradient from translucent black to transparent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shade {
    pub intensity: f32,
    /// Gradient direction in radians
    pub angle: f32,
}

impl Shade {
    pub fn from_angle(angle: f32) -> Self {
        Self {
            intensity: shade_intensity(angle),
            angle,
        }
    }

    /// Alpha at the opaque end of the gradient
    pub fn alpha(&self) -> f32 {
        MAX_SHADE - self.intensity
    }

    pub fn to_css(&self) -> String {
        format!(
            "linear-gradient({}rad, rgba(0, 0, 0, {}) 0%, rgba(0, 0, 0, 0) 100%)",
            self.angle,
            self.alpha()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_range() {
        assert_eq!(shade_intensity(0.0), 0.5);
        assert!((shade_intensity(PI) - 0.0).abs() < 1e-6);
        assert!((shade_intensity(-PI / 2.0) - 0.25).abs() < 1e-6);
        // Bottom-corner angles can exceed π
        assert_eq!(shade_intensity(1.5 * PI), 0.0);
    }

    #[test]
    fn test_gradient_css() {
        let shade = Shade::from_angle(0.0);
        assert_eq!(shade.alpha(), 0.0);
        assert_eq!(
            shade.to_css(),
            "linear-gradient(0rad, rgba(0, 0, 0, 0) 0%, rgba(0, 0, 0, 0) 100%)"
        );

        let shade = Shade::from_angle(PI / 2.0);
        assert!((shade.alpha() - 0.25).abs() < 1e-6);
    }
}
