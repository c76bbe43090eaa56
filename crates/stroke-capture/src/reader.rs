//! Tablet Record Parsing

use crate::error::StrokeError;
use crate::sample::StrokeSample;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Column index of the X coordinate in a point row
const X_COLUMN: usize = 0;
/// Column index of the Y coordinate in a point row
const Y_COLUMN: usize = 1;
/// Column index of the pressure value in a point row
const PRESSURE_COLUMN: usize = 6;
/// Minimum columns a point row must carry
const MIN_COLUMNS: usize = 7;

/// Samples per class in the capture corpus (first 20 genuine, next 20 forged)
const SAMPLES_PER_CLASS: usize = 20;

/// Reads stroke samples from tablet capture records
///
/// A record is a text file whose first line is the point count, followed
/// by one whitespace-separated row per point. X, Y, and pressure live in
/// columns 0, 1, and 6; the remaining columns (timestamps, pen angles)
/// are not used by the verification pipeline.
pub struct SignatureReader;

impl SignatureReader {
    /// Parse one capture record into a stroke sample
    pub fn read_signature(path: &Path) -> Result<StrokeSample, StrokeError> {
        let display_path = path.display().to_string();
        let contents = fs::read_to_string(path).map_err(|source| StrokeError::Io {
            path: display_path.clone(),
            source,
        })?;

        let mut lines = contents.lines();
        let count_line = lines.next().unwrap_or("").trim();
        let num_points: usize =
            count_line
                .parse()
                .map_err(|_| StrokeError::InvalidPointCount {
                    path: display_path.clone(),
                    line: count_line.to_string(),
                })?;

        let mut x = Vec::with_capacity(num_points);
        let mut y = Vec::with_capacity(num_points);
        let mut pressure = Vec::with_capacity(num_points);

        for row in 0..num_points {
            let line = lines.next().ok_or(StrokeError::TruncatedRecord {
                path: display_path.clone(),
                expected: num_points,
                actual: row,
            })?;

            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < MIN_COLUMNS {
                return Err(StrokeError::ShortRow {
                    path: display_path.clone(),
                    row,
                    columns: fields.len(),
                    required: MIN_COLUMNS,
                });
            }

            x.push(Self::parse_field(&display_path, row, X_COLUMN, fields[X_COLUMN])?);
            y.push(Self::parse_field(&display_path, row, Y_COLUMN, fields[Y_COLUMN])?);
            pressure.push(Self::parse_field(
                &display_path,
                row,
                PRESSURE_COLUMN,
                fields[PRESSURE_COLUMN],
            )?);
        }

        debug!("Read {} points from {}", num_points, display_path);
        StrokeSample::new(x, y, pressure)
    }

    fn parse_field(
        path: &str,
        row: usize,
        column: usize,
        value: &str,
    ) -> Result<f64, StrokeError> {
        value.parse().map_err(|_| StrokeError::NonNumericField {
            path: path.to_string(),
            row,
            column,
            value: value.to_string(),
        })
    }

    /// List one user's sample files, sorted by signature number
    ///
    /// Files follow the corpus naming `USER<id>_<n>.<ext>`. The first 20
    /// signature numbers are genuine samples, the next 20 are forgeries.
    pub fn user_files(
        data_dir: &Path,
        user_id: u32,
        genuine: bool,
    ) -> Result<Vec<PathBuf>, StrokeError> {
        let prefix = format!("USER{}_", user_id);

        let entries = fs::read_dir(data_dir).map_err(|source| StrokeError::Io {
            path: data_dir.display().to_string(),
            source,
        })?;

        let mut numbered: Vec<(usize, PathBuf)> = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };
            if !name.starts_with(&prefix) {
                continue;
            }
            match Self::signature_number(&name, &prefix) {
                Some(number) => numbered.push((number, path)),
                None => debug!("Skipping unparseable sample name {}", name),
            }
        }

        numbered.sort_by_key(|(number, _)| *number);

        let range = if genuine {
            0..SAMPLES_PER_CLASS.min(numbered.len())
        } else {
            SAMPLES_PER_CLASS.min(numbered.len())..(2 * SAMPLES_PER_CLASS).min(numbered.len())
        };

        Ok(numbered[range].iter().map(|(_, p)| p.clone()).collect())
    }

    /// Extract `<n>` from `USER<id>_<n>.<ext>`
    fn signature_number(name: &str, prefix: &str) -> Option<usize> {
        name.strip_prefix(prefix)?
            .split('.')
            .next()?
            .parse()
            .ok()
    }
}
