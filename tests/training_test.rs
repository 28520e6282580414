//! Integration tests for training a model from CSV and diagnosing with it.

use std::fs;
use std::path::PathBuf;

use symptom_checker::config::{DiagnosisConfig, TrainingConfig};
use symptom_checker::diagnosis::{DiagnosisEngine, diagnose_json};
use symptom_checker::error::{Result, SymptomError};
use symptom_checker::model::{ClassifierKind, ModelArtifact, ProbabilisticClassifier};
use symptom_checker::training::{Dataset, Trainer};
use tempfile::TempDir;

/// Write a dataset with ten rows per disease and one singleton class.
fn write_dataset(dir: &TempDir) -> PathBuf {
    let profiles = [
        ("Common Cold", "1,1,0,0,0"),
        ("Migraine", "0,0,1,1,0"),
        ("Food Poisoning", "0,0,0,1,1"),
        ("Flu", "1,1,1,0,0"),
    ];

    let mut csv = String::from("fever,cough,headache,nausea,vomiting,diseases\n");
    for _ in 0..10 {
        for (disease, features) in profiles {
            csv.push_str(&format!("{features},{disease}\n"));
        }
    }
    csv.push_str("1,0,0,0,1,Very Rare Disease\n");

    let path = dir.path().join("dataset.csv");
    fs::write(&path, csv).unwrap();
    path
}

#[test]
fn test_train_save_load_diagnose() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let dataset = Dataset::from_csv_path(write_dataset(&dir), "diseases")?;
    assert_eq!(dataset.len(), 41);

    let (artifact, report) = Trainer::new(TrainingConfig::default())?.train(dataset)?;
    assert_eq!(report.dropped_samples, 1);
    assert_eq!(report.diseases, 4);
    assert_eq!(report.test_samples, 8);
    assert_eq!(report.train_samples, 32);
    assert_eq!(report.accuracy, Some(1.0));
    assert!(artifact.trained_at.is_some());

    let model_path = dir.path().join("models").join("medical_model.bin");
    artifact.save(&model_path)?;

    let loaded = ModelArtifact::load(&model_path)?;
    assert_eq!(loaded.diseases, vec!["Common Cold", "Flu", "Food Poisoning", "Migraine"]);
    assert_eq!(
        loaded.symptom_columns.as_slice(),
        ["fever", "cough", "headache", "nausea", "vomiting"]
    );

    let response = diagnose_json(
        &model_path,
        r#"["Nausea", "vomiting"]"#,
        DiagnosisConfig::default(),
    );
    let report = response.report().expect("diagnosis should succeed");
    assert_eq!(report.primary_prediction, "Food Poisoning");
    assert_eq!(report.model_info.accuracy, Some(1.0));
    assert!(report.recommendations.iter().any(|r| r.contains("Eat bland")));

    Ok(())
}

#[test]
fn test_training_is_reproducible() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(&dir);
    let trainer = Trainer::new(TrainingConfig {
        seed: 1234,
        ..Default::default()
    })?;

    let (first, _) = trainer.train(Dataset::from_csv_path(&path, "diseases")?)?;
    let (second, _) = trainer.train(Dataset::from_csv_path(&path, "diseases")?)?;

    let features = [1.0, 1.0, 0.0, 0.0, 0.0];
    assert_eq!(
        first.model.predict_proba(&features)?,
        second.model.predict_proba(&features)?
    );
    Ok(())
}

#[test]
fn test_bernoulli_model_diagnoses() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let dataset = Dataset::from_csv_path(write_dataset(&dir), "diseases")?;
    let config = TrainingConfig {
        classifier: ClassifierKind::Bernoulli,
        ..Default::default()
    };
    let (artifact, _) = Trainer::new(config)?.train(dataset)?;

    let model_path = dir.path().join("model.json");
    artifact.save(&model_path)?;

    let engine = DiagnosisEngine::from_path(&model_path, DiagnosisConfig::default())?;
    assert_eq!(engine.artifact().model.kind(), ClassifierKind::Bernoulli);

    let report = engine.try_diagnose(&["fever", "cough", "headache"])?;
    assert_eq!(report.primary_prediction, "Flu");
    Ok(())
}

#[test]
fn test_missing_dataset() {
    let dir = TempDir::new().unwrap();
    let result = Dataset::from_csv_path(dir.path().join("absent.csv"), "diseases");
    assert!(matches!(result, Err(SymptomError::Training(_))));
}

#[test]
fn test_pandas_index_column_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("exported.csv");
    fs::write(&path, ",fever,cough,diseases\n0,1,0,Flu\n1,0,1,Cold\n").unwrap();

    let result = Dataset::from_csv_path(&path, "diseases");
    assert!(matches!(result, Err(SymptomError::Training(_))));
}

#[test]
fn test_training_config_from_file() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("training.json");
    fs::write(&path, r#"{"classifier": "bernoulli", "test_size": 0.5}"#)?;

    let config = TrainingConfig::load(&path)?;
    assert_eq!(config.classifier, ClassifierKind::Bernoulli);
    assert_eq!(config.test_size, 0.5);
    assert_eq!(config.target_column, "diseases");
    Ok(())
}
