//! Feature Vector Assembly

use crate::derivatives::{derivatives, first_difference};
use crate::histogram::{hist1d, hist2d, BinRange, FrequencyMode};
use crate::polar::to_polar;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use stroke_capture::StrokeSample;
use tracing::debug;

/// Total number of features in the vector, fixed for every sample
pub const FEATURE_DIMENSION: usize = 1980;

/// Sigma factor for histogram ranges derived from sample statistics
const DYNAMIC_SIGMA: f64 = 3.0;

/// Fixed-length feature vector for one stroke sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Concatenated histogram block values
    pub values: Vec<f64>,
}

impl FeatureVector {
    /// Number of features
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the vector holds no features
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

/// Intermediate series derived from one stroke sample
///
/// Series that need more points than the sample provides are empty; the
/// histogram blocks over them come out zero-filled, keeping the total
/// feature length fixed.
struct DerivedSeries {
    /// First and second derivatives of the coordinate channels
    x1: Vec<f64>,
    x2: Vec<f64>,
    y1: Vec<f64>,
    y2: Vec<f64>,
    /// First and second derivatives of the pressure channel
    p1: Vec<f64>,
    p2: Vec<f64>,
    /// Pen speed and direction from the first derivatives
    r1: Vec<f64>,
    theta1: Vec<f64>,
    /// Acceleration magnitude from the second derivatives
    r2: Vec<f64>,
    /// First and second differences of the direction series
    dtheta: Vec<f64>,
    ddtheta: Vec<f64>,
}

impl DerivedSeries {
    fn from_sample(sample: &StrokeSample) -> Self {
        let x_derivs = derivatives(sample.x(), 2);
        let y_derivs = derivatives(sample.y(), 2);
        let p_derivs = derivatives(sample.pressure(), 2);

        let x1 = x_derivs.order(1).to_vec();
        let x2 = x_derivs.order(2).to_vec();
        let y1 = y_derivs.order(1).to_vec();
        let y2 = y_derivs.order(2).to_vec();

        let velocity = to_polar(&x1, &y1);
        let acceleration = to_polar(&x2, &y2);
        let dtheta = first_difference(&velocity.angle);
        let ddtheta = first_difference(&dtheta);

        Self {
            x1,
            x2,
            y1,
            y2,
            p1: p_derivs.order(1).to_vec(),
            p2: p_derivs.order(2).to_vec(),
            r1: velocity.radius,
            theta1: velocity.angle,
            r2: acceleration.radius,
            dtheta,
            ddtheta,
        }
    }
}

/// One histogram block of the feature vector
struct BlockSpec {
    /// What the block measures
    label: &'static str,
    /// Number of features the block contributes
    len: usize,
    build: fn(&FeatureExtractor, &DerivedSeries) -> Vec<f64>,
}

/// The ordered block layout. Every template is defined over this exact
/// sequence, so order and per-block configuration must never change.
const BLOCKS: [BlockSpec; 21] = [
    BlockSpec {
        label: "direction",
        len: 20,
        build: |e, d| {
            hist1d(
                &d.theta1,
                e.angle_bins,
                BinRange::fixed(-PI, PI),
                FrequencyMode::Relative,
            )
        },
    },
    BlockSpec {
        label: "direction-velocity",
        len: 20,
        build: |e, d| {
            hist1d(
                &d.dtheta,
                e.angle_bins,
                BinRange::fixed(-PI, PI),
                FrequencyMode::Relative,
            )
        },
    },
    BlockSpec {
        label: "direction-vs-curvature",
        len: 400,
        build: |e, d| {
            let valid = &d.theta1[..d.theta1.len().saturating_sub(2)];
            hist2d(
                valid,
                &d.ddtheta,
                e.angle_bins,
                e.angle_bins,
                BinRange::fixed(-PI, PI),
                BinRange::fixed(-PI, PI),
                FrequencyMode::Absolute,
            )
        },
    },
    BlockSpec {
        label: "speed",
        len: 10,
        build: |e, d| {
            hist1d(
                &d.r1,
                e.speed_bins,
                BinRange::dynamic(DYNAMIC_SIGMA),
                FrequencyMode::Absolute,
            )
        },
    },
    BlockSpec {
        label: "acceleration",
        len: 10,
        build: |e, d| {
            hist1d(
                &d.r2,
                e.speed_bins,
                BinRange::dynamic(DYNAMIC_SIGMA),
                FrequencyMode::Absolute,
            )
        },
    },
    BlockSpec {
        label: "x-velocity",
        len: 20,
        build: |e, d| coord_hist(e, &d.x1),
    },
    BlockSpec {
        label: "y-velocity",
        len: 20,
        build: |e, d| coord_hist(e, &d.y1),
    },
    BlockSpec {
        label: "x-acceleration",
        len: 20,
        build: |e, d| coord_hist(e, &d.x2),
    },
    BlockSpec {
        label: "y-acceleration",
        len: 20,
        build: |e, d| coord_hist(e, &d.y2),
    },
    BlockSpec {
        label: "x-velocity-vs-acceleration",
        len: 100,
        build: |e, d| coord_pair_hist(e, &d.x1, &d.x2),
    },
    BlockSpec {
        label: "y-velocity-vs-acceleration",
        len: 100,
        build: |e, d| coord_pair_hist(e, &d.y1, &d.y2),
    },
    BlockSpec {
        label: "direction-speed/1",
        len: 200,
        build: |e, d| angle_speed_half(e, &d.theta1, &d.r1, Half::First),
    },
    BlockSpec {
        label: "direction-speed/2",
        len: 200,
        build: |e, d| angle_speed_half(e, &d.theta1, &d.r1, Half::Second),
    },
    BlockSpec {
        label: "direction-velocity-accel/1",
        len: 200,
        build: |e, d| angle_speed_half(e, &d.dtheta, &d.r2, Half::First),
    },
    BlockSpec {
        label: "direction-velocity-accel/2",
        len: 200,
        build: |e, d| angle_speed_half(e, &d.dtheta, &d.r2, Half::Second),
    },
    BlockSpec {
        label: "direction-accel/1",
        len: 200,
        build: |e, d| angle_speed_half(e, &d.theta1, &d.r2, Half::First),
    },
    BlockSpec {
        label: "direction-accel/2",
        len: 200,
        build: |e, d| angle_speed_half(e, &d.theta1, &d.r2, Half::Second),
    },
    BlockSpec {
        label: "pressure-velocity/1",
        len: 10,
        build: |e, d| pressure_half(e, &d.p1, FrequencyMode::Absolute, Half::First),
    },
    BlockSpec {
        label: "pressure-velocity/2",
        len: 10,
        build: |e, d| pressure_half(e, &d.p1, FrequencyMode::Absolute, Half::Second),
    },
    BlockSpec {
        label: "pressure-accel/1",
        len: 10,
        build: |e, d| pressure_half(e, &d.p2, FrequencyMode::Relative, Half::First),
    },
    BlockSpec {
        label: "pressure-accel/2",
        len: 10,
        build: |e, d| pressure_half(e, &d.p2, FrequencyMode::Relative, Half::Second),
    },
];

/// Which half of a midpoint-split series a block consumes
#[derive(Clone, Copy, PartialEq)]
enum Half {
    First,
    Second,
}

/// Relative histogram of a coordinate derivative with a dynamic range
fn coord_hist(e: &FeatureExtractor, data: &[f64]) -> Vec<f64> {
    hist1d(
        data,
        e.coord_bins,
        BinRange::dynamic(DYNAMIC_SIGMA),
        FrequencyMode::Relative,
    )
}

/// Joint histogram of a velocity/acceleration coordinate pair
fn coord_pair_hist(e: &FeatureExtractor, first: &[f64], second: &[f64]) -> Vec<f64> {
    hist2d(
        first,
        second,
        e.coord_bins / 2,
        e.coord_bins / 2,
        BinRange::dynamic(DYNAMIC_SIGMA),
        BinRange::dynamic(DYNAMIC_SIGMA),
        FrequencyMode::Relative,
    )
}

/// Joint direction/speed histogram over one half of the stroke
///
/// The pair is truncated to equal length, then split at the midpoint
/// (integer division), so the second half keeps the odd element.
fn angle_speed_half(e: &FeatureExtractor, angle: &[f64], speed: &[f64], half: Half) -> Vec<f64> {
    let len = angle.len().min(speed.len());
    let split = len / 2;
    let (angle, speed) = match half {
        Half::First => (&angle[..split], &speed[..split]),
        Half::Second => (&angle[split..len], &speed[split..len]),
    };
    hist2d(
        angle,
        speed,
        e.angle_bins,
        e.speed_bins,
        BinRange::fixed(-PI, PI),
        BinRange::dynamic(DYNAMIC_SIGMA),
        FrequencyMode::Relative,
    )
}

/// Pressure-derivative histogram over one half of the stroke
fn pressure_half(
    e: &FeatureExtractor,
    pressure: &[f64],
    mode: FrequencyMode,
    half: Half,
) -> Vec<f64> {
    let split = pressure.len() / 2;
    let data = match half {
        Half::First => &pressure[..split],
        Half::Second => &pressure[split..],
    };
    hist1d(data, e.pressure_bins, BinRange::dynamic(DYNAMIC_SIGMA), mode)
}

/// Extracts the 1980-dimension feature vector from a stroke sample
pub struct FeatureExtractor {
    /// Bins for direction histograms
    angle_bins: usize,
    /// Bins for speed/acceleration magnitude histograms
    speed_bins: usize,
    /// Bins for coordinate derivative histograms
    coord_bins: usize,
    /// Bins for pressure derivative histograms
    pressure_bins: usize,
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self {
            angle_bins: 20,
            speed_bins: 10,
            coord_bins: 20,
            pressure_bins: 10,
        }
    }
}

impl FeatureExtractor {
    /// Create an extractor with the standard histogram configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract the feature vector for one sample
    ///
    /// The output length is always [`FEATURE_DIMENSION`]; blocks whose
    /// derivative data is unavailable for short strokes come out zero.
    pub fn extract(&self, sample: &StrokeSample) -> FeatureVector {
        let derived = DerivedSeries::from_sample(sample);

        let mut values = Vec::with_capacity(FEATURE_DIMENSION);
        for block in &BLOCKS {
            let contribution = (block.build)(self, &derived);
            debug_assert_eq!(contribution.len(), block.len, "block {}", block.label);
            values.extend(contribution);
        }

        debug!(
            "Extracted {} features from {} captured points",
            values.len(),
            sample.len()
        );
        FeatureVector { values }
    }
}
