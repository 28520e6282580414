//! Command line argument parsing for the symptom-checker CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::model::ClassifierKind;

/// Default location of the trained model artifact.
pub const DEFAULT_MODEL_PATH: &str = "medical_model.bin";

/// symptom-checker - ranked disease predictions from reported symptoms
#[derive(Parser, Debug, Clone)]
#[command(name = "symptom-checker")]
#[command(about = "Predict likely diseases from a list of symptoms")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SymptomCheckerArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "json", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SymptomCheckerArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n + 1,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Predict diseases from a JSON list of symptoms
    Predict(PredictArgs),

    /// Train a model from a CSV dataset
    Train(TrainArgs),

    /// List or search the symptoms a model knows
    Symptoms(SymptomsArgs),

    /// Show model metadata
    Info(InfoArgs),
}

impl Command {
    /// Subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Predict(_) => "predict",
            Command::Train(_) => "train",
            Command::Symptoms(_) => "symptoms",
            Command::Info(_) => "info",
        }
    }
}

/// Arguments for prediction
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Symptoms as a JSON array, e.g. '["fever", "headache"]'
    #[arg(value_name = "SYMPTOMS_JSON")]
    pub symptoms: String,

    /// Path to the trained model artifact
    #[arg(short, long, env = "SYMPTOM_CHECKER_MODEL", default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Diagnosis configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Override the number of ranked predictions
    #[arg(long)]
    pub top_k: Option<usize>,
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// CSV dataset with one label column and one column per symptom
    #[arg(short, long, value_name = "CSV_FILE")]
    pub dataset: PathBuf,

    /// Where to write the artifact (.json for JSON, anything else for bincode)
    #[arg(short, long, default_value = DEFAULT_MODEL_PATH)]
    pub output: PathBuf,

    /// Training configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Classifier family
    #[arg(long)]
    pub classifier: Option<ClassifierKind>,

    /// Fraction of each class held out for scoring
    #[arg(long)]
    pub test_size: Option<f64>,

    /// Seed for the train/test shuffle
    #[arg(long)]
    pub seed: Option<u64>,

    /// Name of the label column
    #[arg(long)]
    pub target_column: Option<String>,
}

/// Arguments for listing symptoms
#[derive(Parser, Debug, Clone)]
pub struct SymptomsArgs {
    /// Path to the trained model artifact
    #[arg(short, long, env = "SYMPTOM_CHECKER_MODEL", default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Only list symptoms containing this text (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Maximum number of symptoms to list
    #[arg(short, long, default_value = "50")]
    pub limit: usize,
}

/// Arguments for model metadata
#[derive(Parser, Debug, Clone)]
pub struct InfoArgs {
    /// Path to the trained model artifact
    #[arg(short, long, env = "SYMPTOM_CHECKER_MODEL", default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
