//! Terminal rendering for analysis results.
//!
//! Renders a single record as a sectioned card and the session history as
//! a table, newest first.

use chrono::DateTime;
use retinascan_core::AnalysisResult;

const METER_WIDTH: usize = 20;

const DISCLAIMER: &str = "This analysis is provided as a screening tool and should not \
replace professional medical advice. Always consult with a healthcare provider for \
diagnosis and treatment decisions.";

/// Print one analysis result as a vertical card.
pub fn print_result_card(result: &AnalysisResult) {
    let grade = result.grade;

    println!("=== Analysis {} ===", result.id);
    println!("{}", format_timestamp(&result.timestamp));
    println!();

    println!("Diagnosis");
    println!("  {} (grade {})", grade.clinical_label(), grade.number());
    println!("  {}", grade.description());
    println!();

    println!("Recommendation");
    println!("  {}", grade.recommendation());
    println!("  Follow-up in: {}", grade.follow_up());
    println!();

    println!("Details");
    println!(
        "  Confidence   {:>5.1}%  {}",
        result.confidence * 100.0,
        confidence_meter(result.confidence)
    );
    println!("  Image        {}", result.image_url);
    if let Some(patient) = &result.patient_id {
        println!("  Patient      {patient}");
    }
    println!();

    println!("{DISCLAIMER}");
}

/// Print the session history, newest first.
pub fn print_history(results: &[AnalysisResult]) {
    if results.is_empty() {
        println!("No analyses this session. Run `retinascan submit <image>` to add one.");
        return;
    }

    let mut rows: Vec<&AnalysisResult> = results.iter().collect();
    rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    println!(
        "{:<15}  {:<18}  {:<16}  {:>10}  {}",
        "ID", "DATE", "GRADE", "CONFIDENCE", "PATIENT"
    );
    for r in rows {
        println!(
            "{:<15}  {:<18}  {:<16}  {:>9.1}%  {}",
            r.id,
            format_timestamp(&r.timestamp),
            r.grade.clinical_label(),
            r.confidence * 100.0,
            r.patient_id.as_deref().unwrap_or("-")
        );
    }
}

/// Render a confidence value in 0-1 as a fixed-width text meter.
fn confidence_meter(confidence: f32) -> String {
    let filled = ((confidence.clamp(0.0, 1.0) * METER_WIDTH as f32).round()) as usize;
    let mut meter = String::with_capacity(METER_WIDTH + 2);
    meter.push('[');
    for i in 0..METER_WIDTH {
        meter.push(if i < filled { '#' } else { '.' });
    }
    meter.push(']');
    meter
}

/// Format an ISO 8601 timestamp for display; falls back to the raw string
/// when it does not parse.
fn format_timestamp(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.format("%b %-d, %Y %H:%M").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meter_is_fixed_width() {
        for c in [0.0, 0.25, 0.5, 0.91, 1.0] {
            assert_eq!(confidence_meter(c).len(), METER_WIDTH + 2);
        }
    }

    #[test]
    fn meter_endpoints() {
        assert_eq!(confidence_meter(0.0), format!("[{}]", ".".repeat(20)));
        assert_eq!(confidence_meter(1.0), format!("[{}]", "#".repeat(20)));
    }

    #[test]
    fn meter_clamps_out_of_range() {
        assert_eq!(confidence_meter(1.5), confidence_meter(1.0));
        assert_eq!(confidence_meter(-0.5), confidence_meter(0.0));
    }

    #[test]
    fn timestamps_format_for_display() {
        assert_eq!(
            format_timestamp("2026-08-07T09:46:40.123Z"),
            "Aug 7, 2026 09:46"
        );
    }

    #[test]
    fn unparseable_timestamps_pass_through() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }
}
