//! Legend generation: a sampled gradient plus min/mid/max scale labels.

use serde::{Deserialize, Serialize};

use crate::ramp::{Color, ColorRamp};

/// Default spacing between legend gradient samples, in percent.
pub const DEFAULT_LEGEND_STEP: u8 = 10;

/// One sampled color of the legend gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendStop {
    /// Position along the gradient, 0-100
    pub percent: u8,
    pub color: Color,
}

/// Sample a ramp every `step_percent` percent from 0 to 100 inclusive.
///
/// Samples are in [0, 1] by construction, so no clamping happens here.
/// A step of 0 is treated as 1.
pub fn legend_gradient<R: ColorRamp + ?Sized>(ramp: &R, step_percent: u8) -> Vec<LegendStop> {
    let step = usize::from(step_percent.max(1));
    let mut stops: Vec<LegendStop> = (0..=100u8)
        .step_by(step)
        .map(|percent| LegendStop {
            percent,
            color: ramp.color_for(f64::from(percent) / 100.0),
        })
        .collect();

    // Always close the gradient at 100% even when the step does not divide it.
    if stops.last().map(|s| s.percent) != Some(100) {
        stops.push(LegendStop {
            percent: 100,
            color: ramp.color_for(1.0),
        });
    }
    stops
}

/// Value labels under the legend gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendScale {
    pub min: f64,
    pub mid: f64,
    pub max: f64,
}

impl LegendScale {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            mid: (min + max) / 2.0,
            max,
        }
    }

    /// Labels formatted with one decimal.
    pub fn labels(&self) -> [String; 3] {
        [
            format!("{:.1}", self.min),
            format!("{:.1}", self.mid),
            format!("{:.1}", self.max),
        ]
    }
}

/// Complete legend for a displayed layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub title: String,
    pub unit: String,
    pub stops: Vec<LegendStop>,
    pub scale: LegendScale,
}

impl Legend {
    pub fn new<R: ColorRamp + ?Sized>(
        title: impl Into<String>,
        unit: impl Into<String>,
        ramp: &R,
        step_percent: u8,
        min: f64,
        max: f64,
    ) -> Self {
        Self {
            title: title.into(),
            unit: unit.into(),
            stops: legend_gradient(ramp, step_percent),
            scale: LegendScale::new(min, max),
        }
    }

    /// CSS `linear-gradient(to right, ...)` for the legend bar.
    pub fn css_linear_gradient(&self) -> String {
        let stops: Vec<String> = self
            .stops
            .iter()
            .map(|s| format!("{} {}%", s.color.to_css(), s.percent))
            .collect();
        format!("linear-gradient(to right, {})", stops.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ramp::HueRamp;

    #[test]
    fn test_gradient_every_ten_percent() {
        let stops = legend_gradient(&HueRamp, 10);
        assert_eq!(stops.len(), 11);
        assert_eq!(stops[0].percent, 0);
        assert_eq!(stops[10].percent, 100);
        assert_eq!(stops[0].color.rgb(), (0, 0, 255));
        assert_eq!(stops[5].color.rgb(), (0, 255, 0));
        assert_eq!(stops[10].color.rgb(), (255, 0, 0));
    }

    #[test]
    fn test_gradient_uneven_step_closes_at_100() {
        let stops = legend_gradient(&HueRamp, 30);
        let percents: Vec<u8> = stops.iter().map(|s| s.percent).collect();
        assert_eq!(percents, vec![0, 30, 60, 90, 100]);
    }

    #[test]
    fn test_gradient_zero_step() {
        assert_eq!(legend_gradient(&HueRamp, 0).len(), 101);
    }

    #[test]
    fn test_scale_labels() {
        let scale = LegendScale::new(3.0, 5.0);
        assert_eq!(scale.labels(), ["3.0".to_string(), "4.0".to_string(), "5.0".to_string()]);
    }

    #[test]
    fn test_css_gradient() {
        let legend = Legend::new("Temp", "°C", &HueRamp, 50, 0.0, 1.0);
        assert_eq!(
            legend.css_linear_gradient(),
            "linear-gradient(to right, rgb(0,0,255) 0%, rgb(0,255,0) 50%, rgb(255,0,0) 100%)"
        );
    }
}
