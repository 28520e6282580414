//! Command implementations for the symptom-checker CLI.

use std::path::Path;
use std::time::Instant;

use log::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::{DiagnosisConfig, TrainingConfig};
use crate::diagnosis::{ResultAssembler, diagnose_json};
use crate::error::Result;
use crate::model::{ModelArtifact, ProbabilisticClassifier};
use crate::training::{Dataset, Trainer};

/// Execute a CLI command.
pub fn execute_command(args: SymptomCheckerArgs) -> Result<()> {
    match &args.command {
        Command::Predict(predict_args) => predict(predict_args.clone(), &args),
        Command::Train(train_args) => train(train_args.clone(), &args),
        Command::Symptoms(symptoms_args) => list_symptoms(symptoms_args.clone(), &args),
        Command::Info(info_args) => show_info(info_args.clone(), &args),
    }
}

/// Diagnose a JSON symptom list.
///
/// Every failure is reported as a `success = false` record on stdout, so
/// this command only errors when the record itself cannot be written.
fn predict(args: PredictArgs, cli_args: &SymptomCheckerArgs) -> Result<()> {
    let config = match load_diagnosis_config(&args) {
        Ok(config) => config,
        Err(e) => return output_prediction(&ResultAssembler::from_error(e), cli_args),
    };

    info!("Predicting with model {}", args.model.display());
    let response = diagnose_json(&args.model, &args.symptoms, config);
    output_prediction(&response, cli_args)
}

fn load_diagnosis_config(args: &PredictArgs) -> Result<DiagnosisConfig> {
    let mut config = match &args.config {
        Some(path) => DiagnosisConfig::load(path)?,
        None => DiagnosisConfig::default(),
    };
    if let Some(top_k) = args.top_k {
        config.top_k = top_k;
    }
    config.validate()?;
    Ok(config)
}

/// Train a model and write its artifact.
fn train(args: TrainArgs, cli_args: &SymptomCheckerArgs) -> Result<()> {
    let start = Instant::now();
    let config = load_training_config(&args)?;

    if cli_args.verbosity() > 1 {
        println!("Loading dataset from: {}", args.dataset.display());
    }
    let dataset = Dataset::from_csv_path(&args.dataset, &config.target_column)?;

    let trainer = Trainer::new(config)?;
    let (artifact, report) = trainer.train(dataset)?;
    artifact.save(&args.output)?;

    output_result(
        "Model trained successfully",
        &TrainingSummary {
            output: args.output.to_string_lossy().to_string(),
            classifier: artifact.model.name().to_string(),
            samples: report.samples,
            train_samples: report.train_samples,
            test_samples: report.test_samples,
            dropped_samples: report.dropped_samples,
            diseases: report.diseases,
            symptoms: report.symptoms,
            accuracy: report.accuracy,
            duration_ms: start.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

fn load_training_config(args: &TrainArgs) -> Result<TrainingConfig> {
    let mut config = match &args.config {
        Some(path) => TrainingConfig::load(path)?,
        None => TrainingConfig::default(),
    };
    if let Some(classifier) = args.classifier {
        config.classifier = classifier;
    }
    if let Some(test_size) = args.test_size {
        config.test_size = test_size;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(target_column) = &args.target_column {
        config.target_column = target_column.clone();
    }
    config.validate()?;
    Ok(config)
}

/// List or search the symptoms known to a model.
fn list_symptoms(args: SymptomsArgs, cli_args: &SymptomCheckerArgs) -> Result<()> {
    let artifact = load_artifact(&args.model)?;
    let vocabulary = &artifact.symptom_columns;

    let symptoms = match &args.search {
        Some(query) => vocabulary.search(query, args.limit),
        None => vocabulary.sample(args.limit),
    };

    output_result(
        "Known symptoms",
        &SymptomListing {
            shown: symptoms.len(),
            symptoms,
            total_available: vocabulary.len(),
            query: args.search,
        },
        cli_args,
    )
}

/// Show model metadata.
fn show_info(args: InfoArgs, cli_args: &SymptomCheckerArgs) -> Result<()> {
    let artifact = load_artifact(&args.model)?;

    output_result(
        "Model information",
        &ModelSummary {
            path: args.model.to_string_lossy().to_string(),
            classifier: artifact.model.name().to_string(),
            format_version: artifact.format_version,
            total_diseases: artifact.n_diseases(),
            total_symptoms: artifact.n_symptoms(),
            accuracy: artifact.accuracy,
            trained_at: artifact.trained_at.map(|t| t.to_rfc3339()),
            diseases: artifact.diseases.clone(),
        },
        cli_args,
    )
}

fn load_artifact(path: &Path) -> Result<ModelArtifact> {
    let artifact = ModelArtifact::load(path)?;
    debug!(
        "Loaded model with {} symptoms and {} diseases",
        artifact.n_symptoms(),
        artifact.n_diseases()
    );
    Ok(artifact)
}
