//! Signature Verification Pipeline
//!
//! Batch driver around the verification crates: enrolls one user from
//! genuine capture records, then scores the genuine and forged test
//! sets against the stored template.

mod config;

pub use config::PipelineConfig;

use feature_engine::{FeatureExtractor, FeatureVector};
use identity_verify::{Identity, Verifier, VerifyError};
use serde::Serialize;
use std::path::{Path, PathBuf};
use stroke_capture::{SignatureReader, StrokeError};
use template_store::{StoreError, TemplateRecord, TemplateStore};
use thiserror::Error;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use uuid::Uuid;

/// Pipeline error types
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Stroke(#[from] StrokeError),

    #[error(transparent)]
    Verify(#[from] VerifyError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Report I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Verdict for one test sample
#[derive(Debug, Clone, Serialize)]
pub struct SampleScore {
    /// Capture record file name
    pub file: String,
    /// Dissimilarity score against the template
    pub score: f64,
    /// Whether the score fell below the accept threshold
    pub accepted: bool,
}

/// Score report for one pipeline run
#[derive(Debug, Serialize)]
pub struct ScoreReport {
    pub user_id: u32,
    pub threshold: f64,
    pub enrollment_count: usize,
    pub genuine: Vec<SampleScore>,
    pub forged: Vec<SampleScore>,
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Extract feature vectors from capture records, one blocking task each
///
/// Extraction per record is independent, so every file gets its own
/// blocking task; results come back in file order.
async fn extract_all(files: &[PathBuf]) -> Result<Vec<FeatureVector>, PipelineError> {
    let mut handles = Vec::with_capacity(files.len());
    for file in files {
        let file = file.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            let sample = SignatureReader::read_signature(&file)?;
            Ok::<FeatureVector, StrokeError>(FeatureExtractor::new().extract(&sample))
        }));
    }

    let mut features = Vec::with_capacity(handles.len());
    for handle in handles {
        features.push(handle.await??);
    }
    Ok(features)
}

/// Score one test set against an enrolled identity
async fn score_set(
    verifier: &Verifier,
    id: Uuid,
    files: &[PathBuf],
    label: &str,
) -> Result<Vec<SampleScore>, PipelineError> {
    let features = extract_all(files).await?;

    let mut scores = Vec::with_capacity(files.len());
    for (file, vector) in files.iter().zip(&features) {
        let outcome = verifier.verify_features(id, vector)?;
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());

        let verdict = if outcome.is_accepted() { "accepted" } else { "rejected" };
        info!("{} {}: score {:.2}, {}", label, name, outcome.score(), verdict);

        scores.push(SampleScore {
            file: name,
            score: outcome.score(),
            accepted: outcome.is_accepted(),
        });
    }
    Ok(scores)
}

/// Run the enroll-then-verify batch flow
pub async fn run(config: &PipelineConfig) -> Result<ScoreReport, PipelineError> {
    let data_dir = Path::new(&config.data_dir);

    info!("Enrolling user {}", config.user_id);
    let genuine_files = SignatureReader::user_files(data_dir, config.user_id, true)?;
    let enrollment_files = &genuine_files[..genuine_files.len().min(config.enrollment_count)];
    info!("Found {} enrollment signatures", enrollment_files.len());

    // Every enrollment vector must exist before template generation,
    // which is the single reduction point of the run.
    let enrolled = extract_all(enrollment_files).await?;

    let mut verifier = Verifier::new(config.threshold, config.beta);
    let identity = Identity::new(format!("USER{}", config.user_id));
    let user = identity.id;
    verifier.enroll_features(identity, &enrolled)?;

    let store = TemplateStore::new();
    let (identity, pair) = verifier.get(user).ok_or(VerifyError::NotEnrolled(user))?;
    store.insert(TemplateRecord {
        identity: identity.clone(),
        pair: pair.clone(),
    })?;
    if let Some(path) = &config.snapshot_path {
        store.save_snapshot(Path::new(path))?;
    }

    info!("Scoring {} genuine test signatures", genuine_files.len());
    let genuine = score_set(&verifier, user, &genuine_files, "genuine").await?;

    let forged_files = SignatureReader::user_files(data_dir, config.user_id, false)?;
    info!("Scoring {} forged test signatures", forged_files.len());
    let forged = score_set(&verifier, user, &forged_files, "forged").await?;

    let report = ScoreReport {
        user_id: config.user_id,
        threshold: config.threshold,
        enrollment_count: enrollment_files.len(),
        genuine,
        forged,
    };

    if let Some(path) = &config.report_path {
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
        info!("Wrote score report to {}", path);
    }
    Ok(report)
}
