//! Stroke Sample Model

use crate::error::StrokeError;
use serde::{Deserialize, Serialize};

/// One recorded signature attempt: synchronized X, Y, and pressure traces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrokeSample {
    /// Pen X coordinates, one per captured point
    x: Vec<f64>,
    /// Pen Y coordinates, one per captured point
    y: Vec<f64>,
    /// Pen pressure values, one per captured point
    pressure: Vec<f64>,
}

impl StrokeSample {
    /// Create a sample, validating that the channels are equal-length and finite
    pub fn new(x: Vec<f64>, y: Vec<f64>, pressure: Vec<f64>) -> Result<Self, StrokeError> {
        if x.len() != y.len() || x.len() != pressure.len() {
            return Err(StrokeError::ChannelMismatch {
                x_len: x.len(),
                y_len: y.len(),
                pressure_len: pressure.len(),
            });
        }

        for (channel, values) in [("x", &x), ("y", &y), ("pressure", &pressure)] {
            if let Some(index) = values.iter().position(|v| !v.is_finite()) {
                return Err(StrokeError::NonFiniteValue { channel, index });
            }
        }

        Ok(Self { x, y, pressure })
    }

    /// X coordinate trace
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Y coordinate trace
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Pressure trace
    pub fn pressure(&self) -> &[f64] {
        &self.pressure
    }

    /// Number of captured points
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the sample has no points
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}
