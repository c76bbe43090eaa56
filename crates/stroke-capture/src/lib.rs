//! Stroke Capture
//!
//! Provides the stroke sample model and tablet record parsing for
//! online signature data.

mod error;
mod reader;
mod sample;

pub use error::StrokeError;
pub use reader::SignatureReader;
pub use sample::StrokeSample;
