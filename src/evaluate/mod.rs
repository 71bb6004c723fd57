//! Offline evaluation of model and prompt combinations against a labelled
//! dataset.
//!
//! Each row is run through the normal [`Generator`] pipeline and scored on
//! three axes: style, semantic match with the human label, and safety.
//! Scores are averaged over the rows that produced a result.

pub mod dataset;
pub mod score;

use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{EvaluationError, PipelineError};
use crate::generate::{GenerationRequest, Generator};
use crate::llm::TextProvider;

pub use dataset::{DatasetRow, load_dataset, parse_dataset};
pub use score::{RowScore, score_prediction};

/// Averaged scores for one model / prompt version pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub model: String,
    pub prompt_version: String,
    pub style: f64,
    pub semantic: f64,
    pub safety: f64,
    /// Rows that produced a scored result.
    pub processed: usize,
    pub total: usize,
}

impl EvaluationReport {
    pub fn combined(&self) -> f64 {
        self.style + self.semantic + self.safety
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<20} {:<10} style {:.2}  semantic {:.2}  safety {:.2}  ({}/{} rows)",
            self.model,
            self.prompt_version,
            self.style,
            self.semantic,
            self.safety,
            self.processed,
            self.total
        )
    }
}

/// Run every row through `generator` and average the scores.
///
/// A row whose message is rejected for sensitive content counts as
/// processed with all scores zero. Any other failure skips the row.
pub async fn evaluate<P: TextProvider>(
    generator: &Generator<P>,
    rows: &[DatasetRow],
    model: &str,
    prompt_version: &str,
    language: &str,
) -> Result<EvaluationReport, EvaluationError> {
    let mut totals = (0u32, 0u32, 0u32);
    let mut processed = 0usize;

    for (idx, row) in rows.iter().enumerate() {
        let request = GenerationRequest {
            diff: row.diff.clone(),
            model: model.to_string(),
            prompt_version: prompt_version.to_string(),
            language: language.to_string(),
        };

        let score = match generator.generate(&request).await {
            Ok(msg) => score_prediction(row, &msg),
            Err(e) => match e.cause() {
                PipelineError::SensitiveContentDetected(_) => RowScore::default(),
                _ => {
                    warn!("Skipping row {}: {}", idx + 1, e);
                    continue;
                }
            },
        };

        processed += 1;
        totals.0 += u32::from(score.style);
        totals.1 += u32::from(score.semantic);
        totals.2 += u32::from(score.safety);
    }

    if processed == 0 {
        return Err(EvaluationError::NothingProcessed {
            model: model.to_string(),
            prompt_version: prompt_version.to_string(),
        });
    }

    let ratio = |n: u32| f64::from(n) / processed as f64;
    let report = EvaluationReport {
        model: model.to_string(),
        prompt_version: prompt_version.to_string(),
        style: ratio(totals.0),
        semantic: ratio(totals.1),
        safety: ratio(totals.2),
        processed,
        total: rows.len(),
    };

    info!("Evaluated {}", report);
    Ok(report)
}

/// Evaluate every model × prompt version pair, models outermost.
///
/// Pairs that produce no report are logged and left out; the rest are
/// returned in grid order.
pub async fn evaluate_grid<P: TextProvider>(
    generator: &Generator<P>,
    rows: &[DatasetRow],
    models: &[String],
    prompt_versions: &[String],
    language: &str,
) -> Vec<EvaluationReport> {
    let mut reports = Vec::with_capacity(models.len() * prompt_versions.len());

    for model in models {
        for version in prompt_versions {
            match evaluate(generator, rows, model, version, language).await {
                Ok(report) => reports.push(report),
                Err(e) => warn!("{}", e),
            }
        }
    }

    reports
}

/// The report with the highest combined score; the first one wins ties.
pub fn best_report(reports: &[EvaluationReport]) -> Option<&EvaluationReport> {
    reports.iter().fold(None, |best, report| match best {
        Some(b) if b.combined() >= report.combined() => Some(b),
        _ => Some(report),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::generate::GenerationSettings;
    use crate::llm::RetryPolicy;
    use crate::llm::provider::MockTextProvider;
    use std::time::Duration;

    fn rows() -> Vec<DatasetRow> {
        vec![
            DatasetRow {
                diff: "+login".to_string(),
                ground_truth: "feat: add login".to_string(),
                commit_type: "feat".to_string(),
                breaking: false,
            },
            DatasetRow {
                diff: "+typo".to_string(),
                ground_truth: "fix: correct typo".to_string(),
                commit_type: "fix".to_string(),
                breaking: false,
            },
        ]
    }

    fn settings() -> GenerationSettings {
        GenerationSettings {
            retry: RetryPolicy::new(1, Duration::from_millis(1)),
            ..GenerationSettings::default()
        }
    }

    fn report(prompt_version: &str, style: f64, semantic: f64, safety: f64) -> EvaluationReport {
        EvaluationReport {
            model: "m".to_string(),
            prompt_version: prompt_version.to_string(),
            style,
            semantic,
            safety,
            processed: 1,
            total: 1,
        }
    }

    #[tokio::test]
    async fn test_evaluate_averages_scores() {
        let mut mock = MockTextProvider::new();
        mock.expect_complete().times(2).returning(|req| {
            if req.prompt.contains("+login") {
                Ok(r#"{"subject":"feat: add login"}"#.to_string())
            } else {
                Ok(r#"{"subject":"feat: something else"}"#.to_string())
            }
        });
        let generator = Generator::new(mock, settings());

        let report = evaluate(&generator, &rows(), "m", "prompt_A", "en")
            .await
            .unwrap();
        assert_eq!(report.processed, 2);
        assert_eq!(report.total, 2);
        assert!((report.style - 0.5).abs() < f64::EPSILON);
        assert!((report.semantic - 0.5).abs() < f64::EPSILON);
        assert!((report.safety - 1.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_sensitive_rejection_counts_as_zero() {
        let mut mock = MockTextProvider::new();
        mock.expect_complete().times(2).returning(|req| {
            if req.prompt.contains("+login") {
                Ok(r#"{"subject":"feat: add login"}"#.to_string())
            } else {
                Ok(r#"{"subject":"fix: typo","body":"password=hunter2"}"#.to_string())
            }
        });
        let generator = Generator::new(mock, settings());

        let report = evaluate(&generator, &rows(), "m", "prompt_A", "en")
            .await
            .unwrap();
        assert_eq!(report.processed, 2);
        assert!((report.safety - 0.5).abs() < f64::EPSILON);
        assert!((report.style - 0.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_failed_rows_are_skipped() {
        let mut mock = MockTextProvider::new();
        mock.expect_complete().times(2).returning(|req| {
            if req.prompt.contains("+login") {
                Ok(r#"{"subject":"feat: add login"}"#.to_string())
            } else {
                Err(ProviderError::NoChoices)
            }
        });
        let generator = Generator::new(mock, settings());

        let report = evaluate(&generator, &rows(), "m", "prompt_A", "en")
            .await
            .unwrap();
        assert_eq!(report.processed, 1);
        assert_eq!(report.total, 2);
        assert!((report.semantic - 1.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_nothing_processed_is_error() {
        let mut mock = MockTextProvider::new();
        mock.expect_complete().times(0);
        let generator = Generator::new(mock, settings());

        let err = evaluate(&generator, &rows(), "m", "prompt_Z", "en")
            .await
            .unwrap_err();
        assert!(matches!(err, EvaluationError::NothingProcessed { .. }));
    }

    #[tokio::test]
    async fn test_grid_covers_every_model_and_version() {
        let mut mock = MockTextProvider::new();
        mock.expect_complete()
            .times(4)
            .returning(|_| Ok(r#"{"subject":"feat: add login"}"#.to_string()));
        let generator = Generator::new(mock, settings());

        let models = vec!["m1".to_string(), "m2".to_string()];
        let versions = vec!["prompt_A".to_string(), "prompt_Z".to_string(), "prompt_B".to_string()];
        let reports = evaluate_grid(&generator, &rows()[..1], &models, &versions, "en").await;

        let pairs: Vec<(&str, &str)> = reports
            .iter()
            .map(|r| (r.model.as_str(), r.prompt_version.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("m1", "prompt_A"),
                ("m1", "prompt_B"),
                ("m2", "prompt_A"),
                ("m2", "prompt_B")
            ]
        );
    }

    #[test]
    fn test_best_report_picks_highest_combined() {
        let reports = vec![
            report("prompt_A", 0.5, 0.5, 1.0),
            report("prompt_B", 0.9, 0.6, 1.0),
            report("prompt_C", 0.4, 0.4, 1.0),
        ];
        assert_eq!(best_report(&reports).unwrap().prompt_version, "prompt_B");
    }

    #[test]
    fn test_best_report_first_wins_tie() {
        let reports = vec![report("prompt_A", 1.0, 0.0, 1.0), report("prompt_B", 0.0, 1.0, 1.0)];
        assert_eq!(best_report(&reports).unwrap().prompt_version, "prompt_A");
    }

    #[test]
    fn test_best_report_empty() {
        assert!(best_report(&[]).is_none());
    }
}
