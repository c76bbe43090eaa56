//! Template Generation

use crate::VerifyError;
use feature_engine::FeatureVector;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Features below this index get the small epsilon, the rest the large
/// one. Kept exactly as deployed even though it does not line up with
/// the histogram block layout; changing it invalidates every stored
/// template.
const EPSILON_SPLIT: usize = 100;
/// Epsilon for the low-index features
const EPSILON_LOW: f64 = 0.002;
/// Epsilon for the remaining features
const EPSILON_HIGH: f64 = 0.8;

/// Default scaling factor for quantization step sizes
const DEFAULT_BETA: f64 = 1.5;

/// Per-identity template with its quantization steps
///
/// The two vectors are created together and are only meaningful
/// together: a test vector must be quantized with the same steps the
/// template was built with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplatePair {
    /// Elementwise mean of the quantized enrollment vectors
    pub template: Vec<f64>,
    /// Per-feature quantization step sizes
    pub steps: Vec<f64>,
}

impl TemplatePair {
    /// Number of features the pair is defined over
    pub fn dimension(&self) -> usize {
        self.template.len()
    }
}

/// Builds identity templates from enrolled feature vectors
pub struct TemplateGenerator {
    /// Scaling factor for the quantization step sizes
    beta: f64,
}

impl Default for TemplateGenerator {
    fn default() -> Self {
        Self { beta: DEFAULT_BETA }
    }
}

impl TemplateGenerator {
    /// Create a generator with the given step scaling factor
    pub fn new(beta: f64) -> Self {
        Self { beta }
    }

    /// Generate the (template, steps) pair for one identity
    ///
    /// Steps are `beta * sigma + epsilon` per feature, with sigma the
    /// population standard deviation across the enrollment set. The
    /// epsilon keeps every step positive, so quantization stays finite
    /// even when a feature is constant across enrollment.
    pub fn generate(&self, enrolled: &[FeatureVector]) -> Result<TemplatePair, VerifyError> {
        let first = enrolled.first().ok_or(VerifyError::EmptyEnrollment)?;
        let dimension = first.len();
        for vector in enrolled {
            if vector.len() != dimension {
                return Err(VerifyError::DimensionMismatch {
                    expected: dimension,
                    actual: vector.len(),
                });
            }
        }
        let n = enrolled.len() as f64;

        let mut mu = vec![0.0; dimension];
        for vector in enrolled {
            for (m, v) in mu.iter_mut().zip(&vector.values) {
                *m += v;
            }
        }
        for m in &mut mu {
            *m /= n;
        }

        let mut variance = vec![0.0; dimension];
        for vector in enrolled {
            for ((s, v), m) in variance.iter_mut().zip(&vector.values).zip(&mu) {
                *s += (v - m) * (v - m);
            }
        }

        let steps: Vec<f64> = variance
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let epsilon = if i < EPSILON_SPLIT { EPSILON_LOW } else { EPSILON_HIGH };
                self.beta * (s / n).sqrt() + epsilon
            })
            .collect();

        let mut template = vec![0.0; dimension];
        for vector in enrolled {
            for ((t, v), q) in template.iter_mut().zip(&vector.values).zip(&steps) {
                *t += v / q;
            }
        }
        for t in &mut template {
            *t /= n;
        }

        debug!(
            "Generated template over {} features from {} enrollment vectors",
            dimension,
            enrolled.len()
        );
        Ok(TemplatePair { template, steps })
    }
}
