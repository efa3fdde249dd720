use picarlo_core::EstimateSummary;

/// Print the human-readable result block.
pub fn print_summary(summary: &EstimateSummary) {
    println!(
        "pi ≈ {:.9} (inside {} / total {})",
        summary.pi_estimate, summary.inside_count, summary.total
    );
    println!("Server response time: {:.1} ms", summary.response_time_ms);
    for (idx, point) in summary.preview.iter().enumerate() {
        println!("#{}: ({:.6}, {:.6})", idx + 1, point.x, point.y);
    }
}

/// Serialize a value to JSON (pretty or compact).
pub fn to_json<T: serde::Serialize>(value: &T, compact: bool) -> Result<String, String> {
    if compact {
        serde_json::to_string(value).map_err(|e| format!("JSON serialization failed: {}", e))
    } else {
        serde_json::to_string_pretty(value)
            .map_err(|e| format!("JSON serialization failed: {}", e))
    }
}
