//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cli::args::{OutputFormat, SymptomCheckerArgs};
use crate::diagnosis::PredictionResponse;
use crate::error::Result;

/// Result structure for symptom listings.
#[derive(Debug, Serialize, Deserialize)]
pub struct SymptomListing {
    pub symptoms: Vec<String>,
    pub shown: usize,
    pub total_available: usize,
    pub query: Option<String>,
}

/// Model metadata.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelSummary {
    pub path: String,
    pub classifier: String,
    pub format_version: u32,
    pub total_diseases: usize,
    pub total_symptoms: usize,
    pub accuracy: Option<f64>,
    pub trained_at: Option<String>,
    pub diseases: Vec<String>,
}

/// Result structure for a training run.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub output: String,
    pub classifier: String,
    pub samples: usize,
    pub train_samples: usize,
    pub test_samples: usize,
    pub dropped_samples: usize,
    pub diseases: usize,
    pub symptoms: usize,
    pub accuracy: Option<f64>,
    pub duration_ms: u64,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(
    message: &str,
    result: &T,
    args: &SymptomCheckerArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output a diagnosis response.
///
/// JSON output is the response record itself, success or not.
pub fn output_prediction(response: &PredictionResponse, args: &SymptomCheckerArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => {
            println!("{}", response.to_json(args.pretty)?);
            Ok(())
        }
        OutputFormat::Human => {
            print!("{}", format_prediction_human(response));
            Ok(())
        }
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &SymptomCheckerArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    output_generic_human(&value, 0);
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &SymptomCheckerArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

/// Print a JSON value as indented `key: value` lines.
fn output_generic_human(value: &Value, indent: usize) {
    let pad = "  ".repeat(indent);
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                match value {
                    Value::Object(_) => {
                        println!("{pad}{key}:");
                        output_generic_human(value, indent + 1);
                    }
                    Value::Array(items) => {
                        println!("{pad}{key}: ({} items)", items.len());
                        for item in items {
                            println!("{pad}  - {}", format_scalar(item));
                        }
                    }
                    _ => println!("{pad}{key}: {}", format_scalar(value)),
                }
            }
        }
        other => println!("{pad}{}", format_scalar(other)),
    }
}

fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

/// Render a diagnosis response for a terminal.
pub fn format_prediction_human(response: &PredictionResponse) -> String {
    let mut out = String::new();
    match response {
        PredictionResponse::Success(report) => {
            out.push_str(&format!(
                "Primary prediction: {} ({:.2}%)\n",
                report.primary_prediction, report.confidence
            ));
            out.push_str(&format!(
                "Matched {} of {} symptoms: {}\n",
                report.matched_count,
                report.total_symptoms,
                report.symptoms_analyzed.join(", ")
            ));
            if !report.unmatched_symptoms.is_empty() {
                out.push_str(&format!(
                    "Not recognized: {}\n",
                    report.unmatched_symptoms.join(", ")
                ));
            }

            out.push_str("\nTop predictions:\n");
            for (rank, prediction) in report.top_predictions.iter().enumerate() {
                out.push_str(&format!(
                    "  {}. {:<40} {:>6.2}%\n",
                    rank + 1,
                    prediction.disease,
                    prediction.confidence
                ));
            }

            out.push_str("\nRecommendations:\n");
            for recommendation in &report.recommendations {
                out.push_str(&format!("  - {recommendation}\n"));
            }

            let accuracy = report
                .model_info
                .accuracy
                .map_or_else(|| "Unknown".to_string(), |a| format!("{:.2}%", a * 100.0));
            out.push_str(&format!(
                "\nModel: {} diseases, {} symptoms, accuracy {}\n",
                report.model_info.total_diseases, report.model_info.total_symptoms, accuracy
            ));
        }
        PredictionResponse::NoMatch(report) => {
            out.push_str(&format!("Error: {}\n", report.error));
            out.push_str(&format!(
                "Not recognized: {}\n",
                report.unmatched_symptoms.join(", ")
            ));
            out.push_str(&format!(
                "Some known symptoms ({} total):\n",
                report.total_available
            ));
            for symptom in &report.available_symptoms {
                out.push_str(&format!("  - {symptom}\n"));
            }
        }
        PredictionResponse::Failure(report) => {
            out.push_str(&format!("Error: {}\n", report.error));
        }
    }
    out
}
