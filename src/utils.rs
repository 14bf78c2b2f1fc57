//! Utility functions for presenting statistics and teams

use crate::types::FormResult;

/// Round a score to two decimals for display
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Absolute difference between two team totals
pub fn total_difference(total1: f64, total2: f64) -> f64 {
    (total1 - total2).abs()
}

/// Render recent form as a compact string, newest first (e.g. `WWLWL`)
pub fn format_form(form: &[FormResult]) -> String {
    form.iter().map(ToString::to_string).collect()
}

/// Render a percentage with one decimal, e.g. `66.7%`
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}
