use scoring_core::coerce::lenient_f64;
use scoring_core::stats::finite;
use serde::{Deserialize, Serialize};

use crate::Window;

/// Relative performance vs. sector (signed %, e.g. `4.2` = +4.2pp) per window.
///
/// `None` means the window has no data, which is different from `Some(0.0)`
/// (flat, no edge). Unknown keys such as `1W` or `YTD` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelativePerformanceInputs {
    #[serde(rename = "1M", default, deserialize_with = "lenient_f64")]
    pub m1: Option<f64>,
    #[serde(rename = "3M", default, deserialize_with = "lenient_f64")]
    pub m3: Option<f64>,
    #[serde(rename = "6M", default, deserialize_with = "lenient_f64")]
    pub m6: Option<f64>,
    #[serde(rename = "1Y", default, deserialize_with = "lenient_f64")]
    pub y1: Option<f64>,
    #[serde(rename = "2Y", default, deserialize_with = "lenient_f64")]
    pub y2: Option<f64>,
    #[serde(rename = "3Y", default, deserialize_with = "lenient_f64")]
    pub y3: Option<f64>,
    #[serde(rename = "5Y", default, deserialize_with = "lenient_f64")]
    pub y5: Option<f64>,
}

impl RelativePerformanceInputs {
    /// Value for a window, or `None` if absent or non-finite.
    pub fn get(&self, window: Window) -> Option<f64> {
        let raw = match window {
            Window::M1 => self.m1,
            Window::M3 => self.m3,
            Window::M6 => self.m6,
            Window::Y1 => self.y1,
            Window::Y2 => self.y2,
            Window::Y3 => self.y3,
            Window::Y5 => self.y5,
        };
        finite(raw)
    }

    pub fn set(&mut self, window: Window, value: Option<f64>) {
        let slot = match window {
            Window::M1 => &mut self.m1,
            Window::M3 => &mut self.m3,
            Window::M6 => &mut self.m6,
            Window::Y1 => &mut self.y1,
            Window::Y2 => &mut self.y2,
            Window::Y3 => &mut self.y3,
            Window::Y5 => &mut self.y5,
        };
        *slot = value;
    }

    /// Builder-style variant of `set`.
    pub fn with(mut self, window: Window, value: f64) -> Self {
        self.set(window, Some(value));
        self
    }

    /// Number of windows carrying data (0..=7).
    pub fn available_windows(&self) -> usize {
        Window::all()
            .iter()
            .filter(|w| self.get(**w).is_some())
            .count()
    }
}
