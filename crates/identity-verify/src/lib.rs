//! Identity Verification
//!
//! Signature verification against enrolled identities:
//! - Template generation from enrollment feature vectors
//! - Dissimilarity scoring (Manhattan distance over quantized features)
//! - Registry of enrolled identities with an accept threshold

mod matcher;
mod registry;
mod template;

pub use matcher::score;
pub use registry::{Verifier, VerifyOutcome};
pub use template::{TemplateGenerator, TemplatePair};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Verification error types
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("Enrollment set is empty")]
    EmptyEnrollment,

    #[error("Feature vector has {actual} features, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Identity {0} is not enrolled")]
    NotEnrolled(Uuid),
}

/// Enrolled identity metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub name: String,
    pub enrolled_at: DateTime<Utc>,
}

impl Identity {
    /// Create an identity with a fresh id, stamped now
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            enrolled_at: Utc::now(),
        }
    }
}
