//! Pipeline configuration

use serde::{Deserialize, Serialize};

/// Batch driver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory holding the tablet capture records
    pub data_dir: String,

    /// User to enroll and test
    pub user_id: u32,

    /// Genuine samples consumed for enrollment
    pub enrollment_count: usize,

    /// Scaling factor for quantization step sizes
    pub beta: f64,

    /// Accept threshold on the dissimilarity score
    pub threshold: f64,

    /// Optional JSON score report path
    pub report_path: Option<String>,

    /// Optional template snapshot path
    pub snapshot_path: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: "sample".to_string(),
            user_id: 1,
            enrollment_count: 20,
            beta: 1.5,
            threshold: 100.0,
            report_path: None,
            snapshot_path: None,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from an optional file with environment overrides
    ///
    /// Values resolve defaults < file < `SIGPIPE_`-prefixed environment
    /// variables (e.g. `SIGPIPE_USER_ID=3`).
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path));
        }

        builder
            .add_source(config::Environment::with_prefix("SIGPIPE").try_parsing(true))
            .build()?
            .try_deserialize()
    }
}
