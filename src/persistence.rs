//! Model serialization and persistence
//!
//! Trained models are stored as pretty-printed JSON. Any model whose kernel
//! can describe itself as a [`KernelType`] can be saved, and loading always
//! yields a `TrainedModel<KernelType>`.
//!
//! A second, write-only text dump lists every training example with its
//! multiplier:
//!
//! ```text
//! %
//! % SVM dump file
//! % ...
//! %
//! <dimension> <b> 0 ... 0
//! <alpha_1> <y_1> <x_11> ... <x_1d>
//! ...
//! %
//! % eof
//! %
//! ```

use crate::api::TrainedModel;
use crate::core::{Dataset, OptimizerConfig, Result, SVMError, SVMModel, TrainingSet};
use crate::kernel::{Kernel, KernelType};
use crate::optimizer::{SupportVector, TrainedSVM};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

/// Serializable representation of a trained SVM model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableModel {
    /// Kernel configuration
    pub kernel: KernelType,
    /// Number of features
    pub dim: usize,
    /// Threshold subtracted from the kernel expansion
    pub bias: f64,
    /// Weight vector, present for linear models
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<f64>>,
    pub support_vectors: Vec<SupportVector>,
    /// Model metadata
    pub metadata: ModelMetadata,
}

/// Model metadata for tracking and validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Library version used to create the model
    pub library_version: String,
    /// Number of support vectors
    pub n_support_vectors: usize,
    /// Training parameters used
    pub training_params: TrainingParams,
    /// Outer-loop passes used in training
    pub iterations: usize,
    /// Creation timestamp
    pub created_at: String,
}

/// Training parameters for reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingParams {
    pub c: f64,
    pub epsilon: f64,
    pub bound_epsilon: f64,
    pub max_iterations: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl From<&OptimizerConfig> for TrainingParams {
    fn from(config: &OptimizerConfig) -> Self {
        Self {
            c: config.c,
            epsilon: config.epsilon,
            bound_epsilon: config.bound_epsilon,
            max_iterations: config.max_iterations,
            seed: config.seed,
        }
    }
}

impl TrainingParams {
    fn to_config(&self) -> OptimizerConfig {
        OptimizerConfig {
            c: self.c,
            epsilon: self.epsilon,
            bound_epsilon: self.bound_epsilon,
            max_iterations: self.max_iterations,
            seed: self.seed,
            ..OptimizerConfig::default()
        }
    }
}

impl SerializableModel {
    /// Create a serializable model from a trained model
    ///
    /// Fails for kernels that have no [`KernelType`] description.
    pub fn from_trained_model<K: Kernel>(model: &TrainedModel<K>) -> Result<Self> {
        let inner = model.inner();
        let kernel = inner.kernel().descriptor().ok_or_else(|| {
            SVMError::InvalidParameter("Kernel cannot be serialized".to_string())
        })?;

        Ok(Self {
            kernel,
            dim: inner.dim(),
            bias: inner.bias(),
            weights: inner.weights().map(<[f64]>::to_vec),
            support_vectors: inner.support_vectors().to_vec(),
            metadata: ModelMetadata {
                library_version: env!("CARGO_PKG_VERSION").to_string(),
                n_support_vectors: inner.n_support_vectors(),
                training_params: TrainingParams::from(model.config()),
                iterations: inner.iterations(),
                created_at: chrono::Utc::now().to_rfc3339(),
            },
        })
    }

    /// Save model to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| SVMError::SerializationError(e.to_string()))?;
        Ok(())
    }

    /// Load model from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let model: Self = serde_json::from_reader(reader)
            .map_err(|e| SVMError::SerializationError(e.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    /// Check that the stored parts fit together
    pub fn validate(&self) -> Result<()> {
        self.kernel.validate()?;
        if self.dim == 0 {
            return Err(SVMError::SerializationError(
                "Model dimension must be positive".to_string(),
            ));
        }
        if let Some(weights) = &self.weights {
            if weights.len() != self.dim {
                return Err(SVMError::DimensionMismatch {
                    expected: self.dim,
                    actual: weights.len(),
                });
            }
        }
        for sv in &self.support_vectors {
            if sv.features.len() != self.dim {
                return Err(SVMError::DimensionMismatch {
                    expected: self.dim,
                    actual: sv.features.len(),
                });
            }
            if sv.label != 1.0 && sv.label != -1.0 {
                return Err(SVMError::InvalidLabel(sv.label));
            }
            if !sv.alpha.is_finite() || sv.alpha <= 0.0 {
                return Err(SVMError::SerializationError(format!(
                    "Invalid support vector multiplier: {}",
                    sv.alpha
                )));
            }
        }
        Ok(())
    }

    /// Convert back to a trained model
    pub fn to_trained_model(&self) -> Result<TrainedModel<KernelType>> {
        self.validate()?;
        let model = TrainedSVM::from_parts(
            Arc::new(self.kernel),
            self.dim,
            self.support_vectors.clone(),
            self.bias,
            self.weights.clone(),
            self.metadata.iterations,
        );
        Ok(TrainedModel::from_parts(
            model,
            self.metadata.training_params.to_config(),
        ))
    }

    /// Print model summary
    pub fn print_summary(&self) {
        println!("=== SVM Model Summary ===");
        println!("Kernel: {}", self.kernel);
        println!("Dimension: {}", self.dim);
        println!("Support Vectors: {}", self.metadata.n_support_vectors);
        println!("Bias: {:.6}", self.bias);
        println!("Passes: {}", self.metadata.iterations);
        println!("Library Version: {}", self.metadata.library_version);
        println!("Created: {}", self.metadata.created_at);
        println!("Training Parameters:");
        println!("  C: {}", self.metadata.training_params.c);
        println!("  Epsilon: {}", self.metadata.training_params.epsilon);
        println!(
            "  Bound Epsilon: {}",
            self.metadata.training_params.bound_epsilon
        );
        println!(
            "  Max Iterations: {}",
            self.metadata.training_params.max_iterations
        );
        if let Some(seed) = self.metadata.training_params.seed {
            println!("  Seed: {seed}");
        }
    }
}

/// Write the text dump of a model and the set it was trained on
pub fn write_dump<K: Kernel, W: Write>(
    model: &TrainedModel<K>,
    data: &TrainingSet,
    mut writer: W,
) -> Result<()> {
    let inner = model.inner();
    let alphas = inner.alphas();
    if alphas.len() != data.len() {
        return Err(SVMError::InvalidDataset(format!(
            "Model has {} multipliers but the training set has {} examples",
            alphas.len(),
            data.len()
        )));
    }
    if data.dim() != inner.dim() {
        return Err(SVMError::DimensionMismatch {
            expected: inner.dim(),
            actual: data.dim(),
        });
    }

    let dim = data.dim();
    writeln!(writer, "%")?;
    writeln!(writer, "% SVM dump file")?;
    writeln!(writer, "% format:")?;
    writeln!(writer, "%   <dimension> <b> 0 ... 0")?;
    writeln!(writer, "%   <alpha_1> <y_1> <x_11> ... <x_1d>")?;
    writeln!(writer, "%   <alpha_2> <y_2> <x_21> ... <x_2d>")?;
    writeln!(writer, "%   ...")?;
    writeln!(writer, "%   <alpha_N> <y_N> <x_N1> ... <x_Nd>")?;
    writeln!(writer, "%")?;

    write!(writer, "{} {:.6}", dim, inner.bias())?;
    for _ in 0..dim {
        write!(writer, " 0")?;
    }
    writeln!(writer)?;

    for (i, &alpha) in alphas.iter().enumerate() {
        write!(writer, "{:.6} {}", alpha, data.label(i) as i32)?;
        for x in data.point(i) {
            write!(writer, " {x:.6}")?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "%\n% eof\n%")?;
    writer.flush()?;
    Ok(())
}

/// Write the text dump to a file
pub fn save_dump<K: Kernel, P: AsRef<Path>>(
    model: &TrainedModel<K>,
    data: &TrainingSet,
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_dump(model, data, BufWriter::new(file))?;
    info!("Dumped {} examples to {:?}", data.len(), path);
    Ok(())
}
