// src/metrics/series.rs
// Per-epoch chart series and end-of-training summary

use super::MetricsError;
use crate::api::MetricsReport;
use serde::Serialize;

/// One point on the accuracy/loss charts
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EpochRecord {
    pub epoch: u32,
    pub train_accuracy: f64,
    pub val_accuracy: f64,
    pub train_loss: f64,
    pub val_loss: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrainingSummary {
    pub total_epochs: usize,
    pub final_train_accuracy: f64,
    pub final_val_accuracy: f64,
    pub final_train_loss: f64,
    pub final_val_loss: f64,
    pub best_val_accuracy: f64,
    pub best_val_epoch: u32,
}

impl MetricsReport {
    /// Check that every curve runs parallel to `epochs`, holds only finite
    /// values, and that epochs count up from 1
    pub fn validate(&self) -> Result<(), MetricsError> {
        self.check_lengths()?;
        self.check_finite()?;

        let mut previous = 0u32;
        for (index, &epoch) in self.epochs.iter().enumerate() {
            let out_of_order = if index == 0 { epoch != 1 } else { epoch <= previous };
            if out_of_order {
                return Err(MetricsError::EpochOrder { index, found: epoch });
            }
            previous = epoch;
        }
        Ok(())
    }

    fn curves(&self) -> [(&'static str, &[f64]); 4] {
        [
            ("train_accuracy", self.train_accuracy.as_slice()),
            ("val_accuracy", self.val_accuracy.as_slice()),
            ("train_loss", self.train_loss.as_slice()),
            ("val_loss", self.val_loss.as_slice()),
        ]
    }

    fn check_finite(&self) -> Result<(), MetricsError> {
        for (series, values) in self.curves() {
            if let Some(index) = values.iter().position(|v| !v.is_finite()) {
                return Err(MetricsError::NonFinite { series, index });
            }
        }
        Ok(())
    }

    fn check_lengths(&self) -> Result<(), MetricsError> {
        let expected = self.epochs.len();
        match self.curves().into_iter().find(|(_, values)| values.len() != expected) {
            Some((series, values)) => Err(MetricsError::LengthMismatch {
                series,
                expected,
                actual: values.len(),
            }),
            None => Ok(()),
        }
    }
}

/// Zip epochs with the four curves, index by index
pub fn derive_epoch_series(report: &MetricsReport) -> Result<Vec<EpochRecord>, MetricsError> {
    report.check_lengths()?;

    Ok(report
        .epochs
        .iter()
        .enumerate()
        .map(|(i, &epoch)| EpochRecord {
            epoch,
            train_accuracy: report.train_accuracy[i],
            val_accuracy: report.val_accuracy[i],
            train_loss: report.train_loss[i],
            val_loss: report.val_loss[i],
        })
        .collect())
}

/// Values at the final epoch plus the best validation accuracy
pub fn derive_summary(report: &MetricsReport) -> Result<TrainingSummary, MetricsError> {
    report.check_lengths()?;
    report.check_finite()?;
    let last = report
        .epochs
        .len()
        .checked_sub(1)
        .ok_or(MetricsError::EmptyReport)?;

    // First occurrence wins on ties
    let (best_index, best_val_accuracy) = report
        .val_accuracy
        .iter()
        .copied()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |best, (i, v)| if v > best.1 { (i, v) } else { best });

    Ok(TrainingSummary {
        total_epochs: report.epochs.len(),
        final_train_accuracy: report.train_accuracy[last],
        final_val_accuracy: report.val_accuracy[last],
        final_train_loss: report.train_loss[last],
        final_val_loss: report.val_loss[last],
        best_val_accuracy,
        best_val_epoch: report.epochs[best_index],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(epochs: usize) -> MetricsReport {
        let step = |base: f64, delta: f64| -> Vec<f64> {
            (0..epochs).map(|i| base + delta * i as f64).collect()
        };
        MetricsReport {
            epochs: (1..=epochs as u32).collect(),
            train_accuracy: step(0.70, 0.02),
            val_accuracy: step(0.68, 0.02),
            train_loss: step(0.60, -0.03),
            val_loss: step(0.65, -0.03),
            confusion_matrix: [[10, 2], [3, 12]],
        }
    }

    // ========================================================================
    // Epoch series
    // ========================================================================

    #[test]
    fn test_ten_epochs() {
        let series = derive_epoch_series(&report(10)).unwrap();
        assert_eq!(series.len(), 10);
        let epochs: Vec<u32> = series.iter().map(|r| r.epoch).collect();
        assert_eq!(epochs, (1..=10).collect::<Vec<_>>());
        assert_eq!(series[0].train_accuracy, 0.70);
        assert_eq!(series[0].val_loss, 0.65);
    }

    #[test]
    fn test_length_mismatch() {
        let mut r = report(5);
        r.val_loss.pop();
        assert_eq!(
            derive_epoch_series(&r),
            Err(MetricsError::LengthMismatch {
                series: "val_loss",
                expected: 5,
                actual: 4
            })
        );
        assert!(derive_summary(&r).is_err());
    }

    #[test]
    fn test_empty_series() {
        assert_eq!(derive_epoch_series(&report(0)).unwrap(), vec![]);
    }

    // ========================================================================
    // Summary
    // ========================================================================

    #[test]
    fn test_summary_uses_final_index() {
        let r = report(4);
        let summary = derive_summary(&r).unwrap();
        assert_eq!(summary.total_epochs, 4);
        assert_eq!(summary.final_train_accuracy, r.train_accuracy[3]);
        assert_eq!(summary.final_val_accuracy, r.val_accuracy[3]);
        assert_eq!(summary.final_train_loss, r.train_loss[3]);
        assert_eq!(summary.final_val_loss, r.val_loss[3]);
    }

    #[test]
    fn test_summary_best_epoch() {
        let mut r = report(4);
        r.val_accuracy = vec![0.80, 0.91, 0.91, 0.88];
        let summary = derive_summary(&r).unwrap();
        assert_eq!(summary.best_val_epoch, 2);
        assert_eq!(summary.best_val_accuracy, 0.91);
        assert_eq!(summary.final_val_accuracy, 0.88);
    }

    #[test]
    fn test_summary_empty_report() {
        assert_eq!(derive_summary(&report(0)), Err(MetricsError::EmptyReport));
    }

    // ========================================================================
    // Validation
    // ========================================================================

    #[test]
    fn test_validate_epoch_order() {
        assert!(report(3).validate().is_ok());

        let mut r = report(3);
        r.epochs = vec![0, 1, 2];
        assert_eq!(r.validate(), Err(MetricsError::EpochOrder { index: 0, found: 0 }));

        r.epochs = vec![1, 3, 3];
        assert_eq!(r.validate(), Err(MetricsError::EpochOrder { index: 2, found: 3 }));
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let mut r = report(3);
        r.val_accuracy = vec![f64::NAN; 3];
        let expected = MetricsError::NonFinite {
            series: "val_accuracy",
            index: 0,
        };
        assert_eq!(r.validate(), Err(expected.clone()));
        assert_eq!(derive_summary(&r), Err(expected));

        let mut r = report(3);
        r.train_loss[2] = f64::INFINITY;
        assert_eq!(
            r.validate(),
            Err(MetricsError::NonFinite {
                series: "train_loss",
                index: 2
            })
        );
    }
}
