// src/metrics/confusion.rs
// Accuracy, precision, recall and F1 from a binary confusion matrix

use super::MetricsError;
use serde::Serialize;

/// Named view over the wire matrix `[[TN, FP], [FN, TP]]`.
/// "Positive" is the Fake class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    pub tn: u64,
    pub fp: u64,
    pub fn_: u64,
    pub tp: u64,
}

impl ConfusionMatrix {
    pub fn from_rows(rows: [[u64; 2]; 2]) -> Self {
        let [[tn, fp], [fn_, tp]] = rows;
        Self { tn, fp, fn_, tp }
    }

    /// Widened so four full-range counts cannot overflow
    pub fn total(&self) -> u128 {
        u128::from(self.tn) + u128::from(self.fp) + u128::from(self.fn_) + u128::from(self.tp)
    }
}

impl From<[[u64; 2]; 2]> for ConfusionMatrix {
    fn from(rows: [[u64; 2]; 2]) -> Self {
        Self::from_rows(rows)
    }
}

/// Unrounded percentages; `None` marks a statistic whose denominator is zero
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfusionStats {
    pub accuracy: f64,
    pub precision: Option<f64>,
    pub recall: Option<f64>,
    pub f1: Option<f64>,
}

/// Derive summary statistics. Requires a non-empty matrix.
///
/// F1 is the harmonic mean of the unrounded precision and recall
/// percentages; rounding is left to the display layer.
pub fn derive_confusion_stats(matrix: [[u64; 2]; 2]) -> Result<ConfusionStats, MetricsError> {
    let m = ConfusionMatrix::from_rows(matrix);
    let total = m.total();
    if total == 0 {
        return Err(MetricsError::EmptyMatrix);
    }

    let accuracy = (u128::from(m.tn) + u128::from(m.tp)) as f64 * 100.0 / total as f64;
    let precision = percent_of(m.tp, u128::from(m.tp) + u128::from(m.fp));
    let recall = percent_of(m.tp, u128::from(m.tp) + u128::from(m.fn_));
    let f1 = match (precision, recall) {
        (Some(p), Some(r)) if p + r > 0.0 => Some(2.0 * p * r / (p + r)),
        _ => None,
    };

    Ok(ConfusionStats {
        accuracy,
        precision,
        recall,
        f1,
    })
}

fn percent_of(part: u64, whole: u128) -> Option<f64> {
    (whole > 0).then(|| part as f64 * 100.0 / whole as f64)
}
