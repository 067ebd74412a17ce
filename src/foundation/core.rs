use crate::foundation::error::{TermreelError, TermreelResult};

pub use kurbo::{Point, Rect};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    pub start: FrameIndex,
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    pub fn new(start: FrameIndex, end: FrameIndex) -> TermreelResult<Self> {
        if start.0 > end.0 {
            return Err(TermreelError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> TermreelResult<Self> {
        if den == 0 {
            return Err(TermreelError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(TermreelError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Per-frame delay in GIF timebase units (1/100 s), rounded to nearest.
    pub fn frame_delay_centis(self) -> u16 {
        let num = u64::from(self.num);
        let den = u64::from(self.den);
        (((100 * den) + num / 2) / num).min(u64::from(u16::MAX)) as u16
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> TermreelResult<Self> {
        if width == 0 || height == 0 {
            return Err(TermreelError::validation(
                "canvas width/height must be > 0",
            ));
        }
        Ok(Self { width, height })
    }
}

/// Straight-alpha RGBA8 color.
///
/// Banner and hint fades scale the RGB channels against the dark terminal
/// background instead of alpha-compositing; see [`Rgba8::scaled`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Scale the RGB channels by `factor` (clamped to `[0, 1]`), leaving alpha
    /// untouched. Channels always stay within `[0, 255]`.
    pub fn scaled(self, factor: f64) -> Self {
        let f = factor.clamp(0.0, 1.0);
        let scale = |c: u8| -> u8 { (f64::from(c) * f).round().clamp(0.0, 255.0) as u8 };
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
            a: self.a,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_range_contains_boundaries() {
        let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
        assert!(!r.contains(FrameIndex(1)));
        assert!(r.contains(FrameIndex(2)));
        assert!(r.contains(FrameIndex(4)));
        assert!(!r.contains(FrameIndex(5)));
    }

    #[test]
    fn frame_range_rejects_inverted() {
        assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
    }

    #[test]
    fn fps_rejects_zero_parts() {
        assert!(Fps::new(0, 1).is_err());
        assert!(Fps::new(15, 0).is_err());
    }

    #[test]
    fn frame_delay_rounds_to_centiseconds() {
        // 15 fps = 66.7ms -> 7cs, 10 fps = 100ms -> 10cs
        assert_eq!(Fps::new(15, 1).unwrap().frame_delay_centis(), 7);
        assert_eq!(Fps::new(10, 1).unwrap().frame_delay_centis(), 10);
        assert_eq!(Fps::new(30, 1).unwrap().frame_delay_centis(), 3);
    }

    #[test]
    fn canvas_rejects_zero_dims() {
        assert!(Canvas::new(0, 280).is_err());
        assert!(Canvas::new(560, 0).is_err());
        assert_eq!(Canvas::new(560, 280).unwrap().width, 560);
    }

    #[test]
    fn scaled_clamps_factor_and_channels() {
        let c = Rgba8::opaque(200, 120, 255);
        let dimmed = c.scaled(0.5);
        assert_eq!(dimmed, Rgba8::opaque(100, 60, 128));

        // Out-of-range factors clamp instead of overflowing.
        assert_eq!(c.scaled(4.0), c);
        assert_eq!(c.scaled(-1.0), Rgba8::opaque(0, 0, 0));
    }

    #[test]
    fn scaled_preserves_alpha() {
        let c = Rgba8::new(10, 20, 30, 90);
        assert_eq!(c.scaled(0.0).a, 90);
    }
}
