//! Color ramps mapping normalized values to colors.

use serde::{Deserialize, Serialize};

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn transparent() -> Self {
        Self { r: 0, g: 0, b: 0, a: 0 }
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// CSS `rgb(r,g,b)` notation.
    pub fn to_css(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// Maps a normalized value in [0, 1] to a color.
///
/// Callers clamp into [0, 1] before calling; implementations do not.
pub trait ColorRamp: Send + Sync {
    fn color_for(&self, value: f64) -> Color;
}

/// Blue -> cyan -> green -> yellow -> red ramp, four linear segments each
/// spanning a quarter of the domain.
#[derive(Debug, Clone, Copy, Default)]
pub struct HueRamp;

/// Scale a unit fraction to a color channel.
#[inline]
fn channel(fraction: f64) -> u8 {
    (fraction * 255.0).round().clamp(0.0, 255.0) as u8
}

impl ColorRamp for HueRamp {
    #[inline]
    fn color_for(&self, value: f64) -> Color {
        if value < 0.25 {
            let t = value / 0.25;
            Color::opaque(0, channel(t), 255)
        } else if value < 0.5 {
            let t = (value - 0.25) / 0.25;
            Color::opaque(0, 255, channel(1.0 - t))
        } else if value < 0.75 {
            let t = (value - 0.5) / 0.25;
            Color::opaque(channel(t), 255, 0)
        } else {
            let t = (value - 0.75) / 0.25;
            Color::opaque(255, channel(1.0 - t), 0)
        }
    }
}

impl<F> ColorRamp for F
where
    F: Fn(f64) -> Color + Send + Sync,
{
    fn color_for(&self, value: f64) -> Color {
        self(value)
    }
}
