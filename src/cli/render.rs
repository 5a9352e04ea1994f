// src/cli/render.rs
// Plain-text rendering of results for the terminal

use facelens::api::ClassificationResult;
use facelens::error::ApiError;
use facelens::metrics::{
    ConfusionMatrix, ConfusionStats, EpochRecord, TrainingSummary, format_percent,
    format_ratio_percent,
};
use std::fmt::Write;

pub fn classification(result: &ClassificationResult) -> String {
    let mut out = format!(
        "Prediction: {}\nConfidence: {}",
        result.prediction, result.confidence
    );
    if let Some(ref details) = result.details {
        let _ = write!(out, "\nDetails:    {}", details);
    }
    out
}

pub fn epoch_table(series: &[EpochRecord]) -> String {
    let mut out = String::from("Epoch  Train acc  Val acc  Train loss  Val loss\n");
    for r in series {
        let _ = writeln!(
            out,
            "{:>5}  {:>9}  {:>7}  {:>10.4}  {:>8.4}",
            r.epoch,
            format_ratio_percent(r.train_accuracy),
            format_ratio_percent(r.val_accuracy),
            r.train_loss,
            r.val_loss
        );
    }
    out
}

pub fn training_summary(summary: &TrainingSummary) -> String {
    format!(
        "Epochs trained:       {}\n\
         Final train accuracy: {}\n\
         Final val accuracy:   {}\n\
         Final train loss:     {:.4}\n\
         Final val loss:       {:.4}\n\
         Best val accuracy:    {} (epoch {})",
        summary.total_epochs,
        format_ratio_percent(summary.final_train_accuracy),
        format_ratio_percent(summary.final_val_accuracy),
        summary.final_train_loss,
        summary.final_val_loss,
        format_ratio_percent(summary.best_val_accuracy),
        summary.best_val_epoch
    )
}

/// Matrix plus statistics; `stats` is `None` for an all-zero matrix
pub fn confusion(matrix: &ConfusionMatrix, stats: Option<&ConfusionStats>) -> String {
    let mut out = format!(
        "                 Pred Real  Pred Fake\n\
         Actual Real  {:>12}  {:>9}\n\
         Actual Fake  {:>12}  {:>9}\n",
        matrix.tn, matrix.fp, matrix.fn_, matrix.tp
    );
    let line = |label: &str, value: Option<f64>| format!("{:<10} {}\n", label, format_percent(value));
    out.push_str(&line("Accuracy", stats.map(|s| s.accuracy)));
    out.push_str(&line("Precision", stats.and_then(|s| s.precision)));
    out.push_str(&line("Recall", stats.and_then(|s| s.recall)));
    out.push_str(&line("F1 score", stats.and_then(|s| s.f1)));
    out
}

pub fn error(err: &ApiError) -> String {
    if err.is_validation() {
        format!("Error: {}", err.message())
    } else {
        format!("Error ({}): {}", err.status(), err.message())
    }
}
