// src/metrics/mod.rs
// Pure derivations over training metrics: confusion statistics and epoch series

mod confusion;
mod display;
mod series;

pub use confusion::{ConfusionMatrix, ConfusionStats, derive_confusion_stats};
pub use display::{format_percent, format_ratio_percent, round1};
pub use series::{EpochRecord, TrainingSummary, derive_epoch_series, derive_summary};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetricsError {
    #[error("confusion matrix is empty (all counts are zero)")]
    EmptyMatrix,

    #[error("metrics report has no epochs")]
    EmptyReport,

    #[error("{series} has {actual} values but there are {expected} epochs")]
    LengthMismatch {
        series: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{series} has a non-finite value at position {index}")]
    NonFinite { series: &'static str, index: usize },

    #[error("epochs must start at 1 and increase strictly (found {found} at position {index})")]
    EpochOrder { index: usize, found: u32 },
}
