//! LibSVM format reader
//!
//! Supports loading datasets in the libsvm format:
//! label index:value index:value ...
//!
//! Example:
//! +1 1:0.5 3:1.2 7:0.8
//! -1 2:0.3 5:2.1
//!
//! Indices are 1-based. Missing indices are zeros once the rows are densified.

use crate::core::{Result, SVMError, TrainingSet};
use crate::data::{is_skipped_line, parse_label};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Largest accepted 1-based feature index. Rows are densified, so every row
/// is allocated at the width of the largest index in the file.
pub const MAX_FEATURE_INDEX: usize = 1 << 20;

/// Sparse row: 0-based `(index, value)` pairs
type SparseRow = Vec<(usize, f64)>;

/// Parsed LibSVM file, still in sparse form
#[derive(Debug, Clone)]
pub struct LibSVMDataset {
    rows: Vec<SparseRow>,
    labels: Vec<f64>,
    dimensions: usize,
}

impl LibSVMDataset {
    /// Load a dataset from a LibSVM format file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load a dataset from a reader
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        let mut dimensions = 0;

        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if is_skipped_line(line) {
                continue;
            }

            let (label, row) = Self::parse_line(line).map_err(|e| match e {
                SVMError::ParseError(msg) => {
                    SVMError::ParseError(format!("Error parsing line {}: {}", line_num + 1, msg))
                }
                other => other,
            })?;

            if let Some(&(last, _)) = row.last() {
                dimensions = dimensions.max(last + 1);
            }
            labels.push(label);
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(SVMError::EmptyDataset);
        }

        Ok(Self {
            rows,
            labels,
            dimensions,
        })
    }

    /// Parse a single line; the returned pairs are sorted by index
    fn parse_line(line: &str) -> Result<(f64, SparseRow)> {
        let mut parts = line.split_whitespace();
        let label_token = parts
            .next()
            .ok_or_else(|| SVMError::ParseError("Empty line".to_string()))?;
        let label = parse_label(label_token)?;

        let mut row = SparseRow::new();
        for feature_str in parts {
            let (index_str, value_str) = feature_str.split_once(':').ok_or_else(|| {
                SVMError::ParseError(format!("Invalid feature format: {feature_str}"))
            })?;

            let index = index_str.parse::<usize>().map_err(|_| {
                SVMError::ParseError(format!("Invalid feature index: {index_str}"))
            })?;
            if index == 0 {
                return Err(SVMError::ParseError(
                    "Feature index must be positive: 0".to_string(),
                ));
            }
            if index > MAX_FEATURE_INDEX {
                return Err(SVMError::ParseError(format!(
                    "Feature index {index} exceeds the maximum of {MAX_FEATURE_INDEX}"
                )));
            }

            let value = value_str.parse::<f64>().map_err(|_| {
                SVMError::ParseError(format!("Invalid feature value: {value_str}"))
            })?;

            row.push((index - 1, value));
        }

        row.sort_by_key(|&(i, _)| i);
        if let Some(pair) = row.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(SVMError::ParseError(format!(
                "Duplicate feature index: {}",
                pair[0].0 + 1
            )));
        }

        Ok((label, row))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Largest 1-based index seen in the file
    pub fn dim(&self) -> usize {
        self.dimensions
    }

    pub fn labels(&self) -> &[f64] {
        &self.labels
    }

    /// Densify to the file's own dimension
    pub fn into_training_set(self) -> Result<TrainingSet> {
        let dim = self.dimensions;
        self.densify(dim)
    }

    /// Densify to `dim` columns, zero-padding narrower files
    pub fn into_training_set_with_dim(self, dim: usize) -> Result<TrainingSet> {
        if self.dimensions > dim {
            return Err(SVMError::DimensionMismatch {
                expected: dim,
                actual: self.dimensions,
            });
        }
        self.densify(dim)
    }

    fn densify(self, dim: usize) -> Result<TrainingSet> {
        let dense_rows = self
            .rows
            .into_iter()
            .map(|row| {
                let mut dense = vec![0.0; dim];
                for (i, value) in row {
                    dense[i] = value;
                }
                dense
            })
            .collect();
        TrainingSet::new(dense_rows, self.labels)
    }
}
