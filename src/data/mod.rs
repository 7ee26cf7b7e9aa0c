//! Data loading
//!
//! Two text formats are understood, both producing a dense [`TrainingSet`]:
//! the sparse LibSVM format (`label index:value ...`) and a dense format
//! (`label x1 x2 ... xD`). Blank lines and lines starting with `#` or `%` are
//! ignored by both.

pub mod dense;
pub mod libsvm;

pub use self::dense::*;
pub use self::libsvm::*;

use crate::core::{Dataset, Result, SVMError, TrainingSet};
use log::{debug, warn};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// On-disk layout of a data file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataFormat {
    /// Decide from the file content, falling back to the extension
    #[default]
    Auto,
    LibSVM,
    Dense,
}

impl FromStr for DataFormat {
    type Err = SVMError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(DataFormat::Auto),
            "libsvm" | "svm" | "sparse" => Ok(DataFormat::LibSVM),
            "dense" => Ok(DataFormat::Dense),
            _ => Err(SVMError::InvalidParameter(format!(
                "Unsupported format: {s}. Use 'auto', 'libsvm' or 'dense'"
            ))),
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataFormat::Auto => "auto",
            DataFormat::LibSVM => "libsvm",
            DataFormat::Dense => "dense",
        };
        f.write_str(name)
    }
}

/// Guess the format from the file extension
pub fn detect_format(path: &Path) -> DataFormat {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("dense") | Some("dat") | Some("txt") => DataFormat::Dense,
        Some("libsvm") | Some("svm") => DataFormat::LibSVM,
        Some(other) => {
            warn!("Unknown file extension '{other}', assuming LibSVM format");
            DataFormat::LibSVM
        }
        None => {
            warn!("No file extension, assuming LibSVM format");
            DataFormat::LibSVM
        }
    }
}

/// Guess the format from the first data line, `None` when there is none
pub fn sniff_format(content: &str) -> Option<DataFormat> {
    content
        .lines()
        .map(str::trim)
        .find(|line| !is_skipped_line(line))
        .map(|line| {
            if line.contains(':') {
                DataFormat::LibSVM
            } else {
                DataFormat::Dense
            }
        })
}

/// Load a training set, densifying sparse input to its largest index
pub fn load_dataset<P: AsRef<Path>>(path: P, format: DataFormat) -> Result<TrainingSet> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let set = match resolve_format(format, path, &content) {
        DataFormat::Dense => DenseDataset::from_reader(content.as_bytes())?.into_training_set(),
        _ => LibSVMDataset::from_reader(content.as_bytes())?.into_training_set(),
    }?;
    debug!(
        "Loaded {} examples of dimension {} from {:?}",
        set.len(),
        set.dim(),
        path
    );
    Ok(set)
}

/// Load a data set for a model of dimension `dim`
///
/// Sparse rows narrower than `dim` are zero-padded. Wider files are rejected.
pub fn load_dataset_for_model<P: AsRef<Path>>(
    path: P,
    format: DataFormat,
    dim: usize,
) -> Result<TrainingSet> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    match resolve_format(format, path, &content) {
        DataFormat::Dense => {
            DenseDataset::from_reader(content.as_bytes())?.into_training_set_with_dim(dim)
        }
        _ => LibSVMDataset::from_reader(content.as_bytes())?.into_training_set_with_dim(dim),
    }
}

fn resolve_format(format: DataFormat, path: &Path, content: &str) -> DataFormat {
    match format {
        DataFormat::Auto => sniff_format(content).unwrap_or_else(|| detect_format(path)),
        explicit => explicit,
    }
}

/// Blank or comment line
pub(crate) fn is_skipped_line(line: &str) -> bool {
    line.is_empty() || line.starts_with('#') || line.starts_with('%')
}

/// Parse a class label, which must be exactly +1 or -1
pub(crate) fn parse_label(token: &str) -> Result<f64> {
    let label = token
        .parse::<f64>()
        .map_err(|_| SVMError::ParseError(format!("Invalid label: {token}")))?;
    if label == 1.0 || label == -1.0 {
        Ok(label)
    } else {
        Err(SVMError::InvalidLabel(label))
    }
}
