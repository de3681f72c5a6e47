//! Terminal rendering of a prediction.

use std::fmt::Write as _;

use client_core::session::ResultsView;
use serde::Serialize;

const RULE_WIDTH: usize = 60;
/// A full bar at 100%; larger server values are drawn at full width.
const BAR_MAX_CELLS: usize = 50;

/// One bar cell per two percentage points.
pub fn probability_bar(probability: f64) -> String {
    let cells = if probability.is_finite() && probability > 0.0 {
        ((probability / 2.0).floor() as usize).min(BAR_MAX_CELLS)
    } else {
        0
    };
    "█".repeat(cells)
}

pub fn render_results(view: &ResultsView) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "PREDICTION RESULTS");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Predicted Animal: {}", view.label);
    let _ = writeln!(
        out,
        "Confidence: {} ({})",
        view.confidence_text,
        view.tier.as_str()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "All Class Probabilities:");
    for row in &view.rows {
        let _ = writeln!(
            out,
            "  {:<15} {:>6.2}% {}",
            row.label,
            row.probability,
            probability_bar(row.probability)
        );
    }
    let _ = writeln!(out, "{rule}");
    out
}

#[derive(Serialize)]
struct JsonProbability<'a> {
    label: &'a str,
    probability: f64,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    predicted_animal: &'a str,
    confidence: f64,
    tier: &'static str,
    all_probabilities: Vec<JsonProbability<'a>>,
}

pub fn render_json(view: &ResultsView) -> serde_json::Result<String> {
    let report = JsonReport {
        predicted_animal: &view.label,
        confidence: view.confidence,
        tier: view.tier.as_str(),
        all_probabilities: view
            .rows
            .iter()
            .map(|row| JsonProbability {
                label: &row.label,
                probability: row.probability,
            })
            .collect(),
    };
    serde_json::to_string_pretty(&report)
}
