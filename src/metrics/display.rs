// src/metrics/display.rs
// Presentation-boundary rounding; derived values stay unrounded until here

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// "92.3%" for a percentage, "N/A" when undefined
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.1}%", v),
        _ => "N/A".to_string(),
    }
}

/// Format a fraction in [0, 1] (curve values) as a percentage
pub fn format_ratio_percent(ratio: f64) -> String {
    format_percent(Some(ratio * 100.0))
}
