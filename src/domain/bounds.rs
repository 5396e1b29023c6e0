// Y-axis domain models
use serde::Serialize;

/// Upper bound used when every value is zero: the scale becomes `[0, 10]`.
pub const DEFAULT_Y_SCALE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeBounds {
    pub low: f64,
    pub high: f64,
}

impl RangeBounds {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn default_span() -> Self {
        Self::new(0.0, DEFAULT_Y_SCALE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundsOptions {
    pub force_zero_floor: bool,
    pub alert_value: Option<f64>,
}

impl BoundsOptions {
    pub fn new(force_zero_floor: bool, alert_value: Option<f64>) -> Self {
        Self {
            force_zero_floor,
            alert_value,
        }
    }
}
