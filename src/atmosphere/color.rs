//! Color helpers for sky blending.

/// Types that can be linearly interpolated.
pub trait Lerp: Clone {
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for [f32; 3] {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        [
            self[0] + (other[0] - self[0]) * t,
            self[1] + (other[1] - self[1]) * t,
            self[2] + (other[2] - self[2]) * t,
        ]
    }
}

/// `0xRRGGBB` to RGB in `[0, 1]`.
pub const fn hex_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_rgb() {
        assert_eq!(hex_rgb(0xffffff), [1.0, 1.0, 1.0]);
        assert_eq!(hex_rgb(0x00ff00), [0.0, 1.0, 0.0]);
        let sky = hex_rgb(0x87ceeb);
        assert!((sky[0] - 135.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = [0.0, 0.5, 1.0];
        let b = [1.0, 0.5, 0.0];
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), [1.0, 0.5, 0.0]);
        assert_eq!(2.0f32.lerp(&4.0, 0.5), 3.0);
    }
}
