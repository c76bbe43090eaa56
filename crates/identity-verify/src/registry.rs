//! Enrollment Registry

use crate::matcher;
use crate::template::{TemplateGenerator, TemplatePair};
use crate::{Identity, VerifyError};
use feature_engine::{FeatureExtractor, FeatureVector};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use stroke_capture::StrokeSample;
use tracing::{debug, info};
use uuid::Uuid;

/// Outcome of verifying one test sample
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum VerifyOutcome {
    /// Score fell below the accept threshold
    Accepted { score: f64 },
    /// Score met or exceeded the threshold
    Rejected { score: f64 },
}

impl VerifyOutcome {
    /// The dissimilarity score behind the verdict
    pub fn score(&self) -> f64 {
        match self {
            Self::Accepted { score } | Self::Rejected { score } => *score,
        }
    }

    /// Whether the sample was accepted
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Registry of enrolled identities
///
/// Holds each identity's template pair together with the accept
/// threshold applied to dissimilarity scores. Re-enrolling an identity
/// replaces its stored pair with a freshly generated one.
pub struct Verifier {
    extractor: FeatureExtractor,
    generator: TemplateGenerator,
    /// Accept threshold on the dissimilarity score
    threshold: f64,
    enrolled: HashMap<Uuid, (Identity, TemplatePair)>,
}

impl Verifier {
    /// Create a registry with the given threshold and step scaling
    pub fn new(threshold: f64, beta: f64) -> Self {
        Self {
            extractor: FeatureExtractor::new(),
            generator: TemplateGenerator::new(beta),
            threshold,
            enrolled: HashMap::new(),
        }
    }

    /// Enroll an identity from its genuine stroke samples
    pub fn enroll(
        &mut self,
        identity: Identity,
        samples: &[StrokeSample],
    ) -> Result<(), VerifyError> {
        let features: Vec<FeatureVector> = samples
            .iter()
            .map(|sample| self.extractor.extract(sample))
            .collect();
        self.enroll_features(identity, &features)
    }

    /// Enroll an identity from pre-extracted feature vectors
    pub fn enroll_features(
        &mut self,
        identity: Identity,
        features: &[FeatureVector],
    ) -> Result<(), VerifyError> {
        let pair = self.generator.generate(features)?;
        info!(
            "Enrolled identity {} ({}) from {} samples",
            identity.id,
            identity.name,
            features.len()
        );
        self.insert(identity, pair);
        Ok(())
    }

    /// Insert a previously generated template pair, replacing any
    /// existing enrollment of the identity
    pub fn insert(&mut self, identity: Identity, pair: TemplatePair) {
        self.enrolled.insert(identity.id, (identity, pair));
    }

    /// Verify a test sample against an enrolled identity
    pub fn verify(&self, id: Uuid, sample: &StrokeSample) -> Result<VerifyOutcome, VerifyError> {
        let features = self.extractor.extract(sample);
        self.verify_features(id, &features)
    }

    /// Verify a pre-extracted test vector against an enrolled identity
    pub fn verify_features(
        &self,
        id: Uuid,
        features: &FeatureVector,
    ) -> Result<VerifyOutcome, VerifyError> {
        let (identity, pair) = self.enrolled.get(&id).ok_or(VerifyError::NotEnrolled(id))?;
        let score = matcher::score(features, pair)?;
        debug!("Scored sample against {}: {:.2}", identity.name, score);

        if score < self.threshold {
            Ok(VerifyOutcome::Accepted { score })
        } else {
            Ok(VerifyOutcome::Rejected { score })
        }
    }

    /// An enrolled identity and its template pair
    pub fn get(&self, id: Uuid) -> Option<(&Identity, &TemplatePair)> {
        self.enrolled.get(&id).map(|(identity, pair)| (identity, pair))
    }

    /// Number of enrolled identities
    pub fn enrolled_count(&self) -> usize {
        self.enrolled.len()
    }
}
