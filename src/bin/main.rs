//! smo-svm Command Line Interface
//!
//! Train, evaluate and inspect binary SVM models on LibSVM or dense text data.

use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{error, info};
use smo_svm::api::SVM;
use smo_svm::core::{Dataset, Prediction, Result};
use smo_svm::data::{load_dataset, load_dataset_for_model, DataFormat};
use smo_svm::kernel::KernelType;
use smo_svm::persistence::{save_dump, SerializableModel};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "smo-svm")]
#[command(about = "Binary Support Vector Machine trained by Sequential Minimal Optimization")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a new SVM model
    Train(TrainArgs),
    /// Make predictions using a trained model
    Predict(PredictArgs),
    /// Evaluate a model on test data
    Evaluate(EvaluateArgs),
    /// Display model information
    Info(InfoArgs),
}

#[derive(Args)]
struct TrainArgs {
    /// Training data file (LibSVM or dense format)
    #[arg(long)]
    data: PathBuf,

    /// Output model file
    #[arg(short, long)]
    output: PathBuf,

    /// Data format: auto, libsvm, or dense
    #[arg(short, long, default_value = "auto")]
    format: DataFormat,

    /// Regularization parameter C
    #[arg(short = 'C', long, default_value = "1.0")]
    c: f64,

    /// KKT tolerance
    #[arg(short, long, default_value = "0.001")]
    epsilon: f64,

    /// Distance under which a multiplier is snapped onto 0 or C
    #[arg(long, default_value = "1e-8")]
    bound_epsilon: f64,

    /// Maximum number of passes over the training set
    #[arg(short, long, default_value = "10000")]
    max_iterations: usize,

    /// Kernel cache size in MB, 0 disables the cache
    #[arg(long, default_value = "0")]
    cache_size: usize,

    /// Seed for the partner-search permutations
    #[arg(long)]
    seed: Option<u64>,

    /// Kernel function
    #[arg(short, long, default_value = "linear")]
    kernel: CliKernel,

    /// Polynomial degree
    #[arg(long, default_value = "2")]
    degree: u32,

    /// Gamma for the polynomial and gaussian kernels
    #[arg(long, allow_hyphen_values = true)]
    gamma: Option<f64>,

    /// Polynomial offset
    #[arg(long, default_value = "1.0", allow_hyphen_values = true)]
    coef0: f64,

    /// Sigmoid slope
    #[arg(long, default_value = "1.0", allow_hyphen_values = true)]
    sigmoid_v: f64,

    /// Sigmoid offset
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    sigmoid_c: f64,

    /// Also write a text dump of every multiplier and example
    #[arg(long)]
    dump: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CliKernel {
    /// <x, y>
    Linear,
    /// (gamma <x, y> + coef0)^degree
    Polynomial,
    /// exp(-gamma ||x - y||^2)
    Gaussian,
    /// 1 / (1 + exp(-(v <x, y> - c)))
    Sigmoid,
}

impl TrainArgs {
    fn cache_bytes(&self) -> usize {
        self.cache_size.saturating_mul(1024 * 1024)
    }

    fn kernel_type(&self) -> KernelType {
        match self.kernel {
            CliKernel::Linear => KernelType::Linear,
            CliKernel::Polynomial => KernelType::Polynomial {
                degree: self.degree,
                gamma: self.gamma.unwrap_or(1.0),
                coef0: self.coef0,
            },
            CliKernel::Gaussian => KernelType::Gaussian {
                gamma: self.gamma.unwrap_or(0.5),
            },
            CliKernel::Sigmoid => KernelType::Sigmoid {
                v: self.sigmoid_v,
                c: self.sigmoid_c,
            },
        }
    }
}

#[derive(Args)]
struct PredictArgs {
    /// Trained model file
    #[arg(short, long)]
    model: PathBuf,

    /// Input data file
    #[arg(long)]
    data: PathBuf,

    /// Output predictions file (optional, prints to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Data format: auto, libsvm, or dense
    #[arg(short, long, default_value = "auto")]
    format: DataFormat,

    /// Show confidence scores
    #[arg(long)]
    confidence: bool,
}

#[derive(Args)]
struct EvaluateArgs {
    /// Trained model file
    #[arg(short, long)]
    model: PathBuf,

    /// Test data file
    #[arg(long)]
    data: PathBuf,

    /// Data format: auto, libsvm, or dense
    #[arg(short, long, default_value = "auto")]
    format: DataFormat,

    /// Show detailed metrics
    #[arg(long)]
    detailed: bool,
}

#[derive(Args)]
struct InfoArgs {
    /// Model file
    model: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Train(args) => train_command(args),
        Commands::Predict(args) => predict_command(args),
        Commands::Evaluate(args) => evaluate_command(args),
        Commands::Info(args) => info_command(args),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn train_command(args: TrainArgs) -> Result<()> {
    let kernel = args.kernel_type();
    kernel.validate()?;

    info!("Training SVM model...");
    info!("Data file: {:?}", args.data);
    info!(
        "Parameters: kernel={}, C={}, epsilon={}, max_iter={}",
        kernel, args.c, args.epsilon, args.max_iterations
    );

    let dataset = load_dataset(&args.data, args.format)?;
    info!(
        "Loaded {} examples with {} dimensions",
        dataset.len(),
        dataset.dim()
    );

    let mut svm = SVM::with_kernel(kernel)
        .with_c(args.c)
        .with_epsilon(args.epsilon)
        .with_bound_epsilon(args.bound_epsilon)
        .with_max_iterations(args.max_iterations)
        .with_cache_size(args.cache_bytes());
    if let Some(seed) = args.seed {
        svm = svm.with_seed(seed);
    }

    let model = svm.train(&dataset)?;
    info!("Training completed successfully");

    let info = model.info();
    info!("Support vectors: {}", info.n_support_vectors);
    info!("Bias: {:.6}", info.bias);
    info!("Passes: {}", info.iterations);
    info!("Objective: {:.6}", info.objective_value);

    let stats = model.stats();
    info!(
        "Steps: {} successful of {} attempted, cache hit rate {}/{}",
        stats.successful_steps,
        stats.attempted_steps,
        stats.cache_hits,
        stats.cache_hits + stats.cache_misses
    );

    SerializableModel::from_trained_model(&model)?.save_to_file(&args.output)?;
    info!("Model saved to: {:?}", args.output);

    if let Some(dump_path) = &args.dump {
        save_dump(&model, &dataset, dump_path)?;
    }

    let accuracy = model.evaluate(&dataset)?;
    info!("Training accuracy: {:.2}%", accuracy * 100.0);

    Ok(())
}

fn predict_command(args: PredictArgs) -> Result<()> {
    info!("Loading model from: {:?}", args.model);
    let serializable_model = SerializableModel::load_from_file(&args.model)?;
    let model = serializable_model.to_trained_model()?;

    info!("Loading prediction data from: {:?}", args.data);
    info!(
        "Making predictions using model with {} support vectors",
        serializable_model.metadata.n_support_vectors
    );
    let predictions = model.predict_from_file(&args.data, args.format)?;

    if let Some(output_path) = &args.output {
        let file = File::create(output_path)?;
        write_predictions(BufWriter::new(file), &predictions, args.confidence)?;
        info!("Predictions saved to: {output_path:?}");
    } else {
        let stdout = io::stdout();
        write_predictions(stdout.lock(), &predictions, args.confidence)?;
    }

    Ok(())
}

fn write_predictions<W: Write>(
    mut writer: W,
    predictions: &[Prediction],
    confidence: bool,
) -> Result<()> {
    writeln!(writer, "# Predictions for {} examples", predictions.len())?;
    writeln!(
        writer,
        "# Format: example_index predicted_label{}",
        if confidence { " decision_value" } else { "" }
    )?;

    for (i, pred) in predictions.iter().enumerate() {
        if confidence {
            writeln!(writer, "{} {:.0} {:.6}", i, pred.label, pred.decision_value)?;
        } else {
            writeln!(writer, "{} {:.0}", i, pred.label)?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn evaluate_command(args: EvaluateArgs) -> Result<()> {
    info!("Loading model from: {:?}", args.model);
    let serializable_model = SerializableModel::load_from_file(&args.model)?;
    let model = serializable_model.to_trained_model()?;

    info!("Loading test data from: {:?}", args.data);
    let dataset = load_dataset_for_model(&args.data, args.format, model.info().dim)?;

    info!(
        "Evaluating model with {} support vectors",
        serializable_model.metadata.n_support_vectors
    );
    let metrics = model.evaluate_detailed(&dataset)?;

    println!("=== Model Evaluation ===");
    serializable_model.print_summary();

    println!("\nTest Results:");
    println!("  Examples: {}", metrics.total());
    println!("  Accuracy: {:.2}%", metrics.accuracy() * 100.0);

    if args.detailed {
        println!("\nDetailed Metrics:");
        println!("  True Positives:  {}", metrics.true_positives);
        println!("  True Negatives:  {}", metrics.true_negatives);
        println!("  False Positives: {}", metrics.false_positives);
        println!("  False Negatives: {}", metrics.false_negatives);
        println!("  Precision:       {:.4}", metrics.precision());
        println!("  Recall:          {:.4}", metrics.recall());
        println!("  F1 Score:        {:.4}", metrics.f1_score());
        println!("  Specificity:     {:.4}", metrics.specificity());
    }

    Ok(())
}

fn info_command(args: InfoArgs) -> Result<()> {
    info!("Loading model from: {:?}", args.model);
    let serializable_model = SerializableModel::load_from_file(&args.model)?;

    serializable_model.print_summary();

    if let Some(weights) = &serializable_model.weights {
        let n_show = weights.len().min(10);
        println!("\nWeights:");
        for (j, w) in weights.iter().enumerate().take(n_show) {
            println!("  w{j}: {w:.6}");
        }
        if weights.len() > n_show {
            println!("  ... ({} more)", weights.len() - n_show);
        }
    }

    let support_vectors = &serializable_model.support_vectors;
    let n_show = support_vectors.len().min(10);
    println!("\nSupport Vectors:");
    for (i, sv) in support_vectors.iter().enumerate().take(n_show) {
        println!("  α{i}: {:.6} (y = {:+.0})", sv.alpha, sv.label);
    }
    if support_vectors.len() > n_show {
        println!("  ... ({} more)", support_vectors.len() - n_show);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_kernel_arguments() {
        let cli = Cli::parse_from([
            "smo-svm",
            "train",
            "--data",
            "train.libsvm",
            "-o",
            "model.json",
            "--kernel",
            "gaussian",
            "--gamma",
            "0.25",
        ]);
        let Commands::Train(args) = cli.command else {
            panic!("expected train command");
        };
        assert_eq!(args.kernel_type(), KernelType::Gaussian { gamma: 0.25 });
        assert_eq!(args.format, DataFormat::Auto);
        assert!(args.seed.is_none());
    }

    #[test]
    fn test_kernel_defaults() {
        let cli = Cli::parse_from([
            "smo-svm", "train", "--data", "a", "-o", "b", "--kernel", "polynomial",
        ]);
        let Commands::Train(args) = cli.command else {
            panic!("expected train command");
        };
        assert_eq!(
            args.kernel_type(),
            KernelType::Polynomial {
                degree: 2,
                gamma: 1.0,
                coef0: 1.0
            }
        );
    }

    #[test]
    fn test_negative_kernel_parameters() {
        let cli = Cli::parse_from([
            "smo-svm", "train", "--data", "a", "-o", "b", "--kernel", "sigmoid",
            "--sigmoid-v", "-0.5", "--sigmoid-c", "-1.0",
        ]);
        let Commands::Train(args) = cli.command else {
            panic!("expected train command");
        };
        assert_eq!(args.kernel_type(), KernelType::Sigmoid { v: -0.5, c: -1.0 });

        let cli = Cli::parse_from([
            "smo-svm", "train", "--data", "a", "-o", "b", "--kernel", "polynomial",
            "--coef0", "-2", "--gamma", "-0.5",
        ]);
        let Commands::Train(args) = cli.command else {
            panic!("expected train command");
        };
        assert_eq!(
            args.kernel_type(),
            KernelType::Polynomial {
                degree: 2,
                gamma: -0.5,
                coef0: -2.0
            }
        );
        // Parsed, but still rejected before training
        assert!(args.kernel_type().validate().is_err());
    }

    #[test]
    fn test_cache_size_saturates() {
        let huge = usize::MAX.to_string();
        let cli = Cli::parse_from([
            "smo-svm",
            "train",
            "--data",
            "a",
            "-o",
            "b",
            "--cache-size",
            huge.as_str(),
        ]);
        let Commands::Train(args) = cli.command else {
            panic!("expected train command");
        };
        assert_eq!(args.cache_bytes(), usize::MAX);
    }

    #[test]
    fn test_write_predictions() {
        let predictions = vec![
            Prediction::from_decision_value(1.5),
            Prediction::from_decision_value(-0.25),
        ];
        let mut buffer = Vec::new();
        write_predictions(&mut buffer, &predictions, true).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("0 1 1.500000"));
        assert!(text.contains("1 -1 -0.250000"));
    }
}
