//! Dense text format reader
//!
//! One example per line, the label first and then every feature value:
//! label x1 x2 ... xD
//!
//! Values are separated by whitespace or commas. Every row must have the same
//! number of features.

use crate::core::{Result, SVMError, TrainingSet};
use crate::data::{is_skipped_line, parse_label};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parsed dense file
#[derive(Debug, Clone)]
pub struct DenseDataset {
    rows: Vec<Vec<f64>>,
    labels: Vec<f64>,
}

impl DenseDataset {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut rows: Vec<Vec<f64>> = Vec::new();
        let mut labels = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if is_skipped_line(line) {
                continue;
            }

            let mut fields = line
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|field| !field.is_empty());

            let label = match fields.next() {
                Some(token) => parse_label(token)?,
                None => continue,
            };

            let row = fields
                .map(|field| {
                    field.parse::<f64>().map_err(|_| {
                        SVMError::ParseError(format!(
                            "Error parsing line {}: invalid feature value: {}",
                            line_num + 1,
                            field
                        ))
                    })
                })
                .collect::<Result<Vec<f64>>>()?;

            if let Some(expected) = rows.first().map(Vec::len) {
                if row.len() != expected {
                    return Err(SVMError::DimensionMismatch {
                        expected,
                        actual: row.len(),
                    });
                }
            }

            labels.push(label);
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(SVMError::EmptyDataset);
        }

        Ok(Self { rows, labels })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of features per row
    pub fn dim(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn into_training_set(self) -> Result<TrainingSet> {
        TrainingSet::new(self.rows, self.labels)
    }

    /// Convert for a model of dimension `dim`; the widths must agree
    pub fn into_training_set_with_dim(self, dim: usize) -> Result<TrainingSet> {
        if self.dim() != dim {
            return Err(SVMError::DimensionMismatch {
                expected: dim,
                actual: self.dim(),
            });
        }
        self.into_training_set()
    }
}
