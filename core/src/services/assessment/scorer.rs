//! Stress scoring

use crate::domain::entities::assessment::{AnswerSequence, StressCategory, StressReport, StressScore};
use crate::errors::AssessmentError;

/// Maps quiz answers to a stress category
#[derive(Debug, Clone, Copy, Default)]
pub struct StressScorer;

impl StressScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score ten answers, each in `0..=4`
    ///
    /// # Errors
    ///
    /// `AssessmentError` when the sequence has the wrong length or any answer
    /// is out of range.
    pub fn score(&self, answers: &[i32]) -> Result<StressCategory, AssessmentError> {
        self.evaluate(answers).map(|report| report.category)
    }

    /// Score ten answers and build the full result
    pub fn evaluate(&self, answers: &[i32]) -> Result<StressReport, AssessmentError> {
        let answers = AnswerSequence::new(answers).map_err(|e| {
            tracing::debug!(error = %e, event = "stress_assessment_rejected", "Rejected assessment answers");
            e
        })?;

        Ok(self.evaluate_sequence(&answers))
    }

    /// Build the result for an already validated answer sequence
    pub fn evaluate_sequence(&self, answers: &AnswerSequence) -> StressReport {
        let report = StressReport::new(StressScore::from_answers(answers));

        tracing::debug!(
            total = report.score.total,
            percentage = report.score.percentage,
            category = %report.category,
            event = "stress_assessment_scored",
            "Scored stress assessment"
        );

        report
    }
}
