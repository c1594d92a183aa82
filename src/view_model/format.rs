/// Rendered in place of a value that does not exist.
pub const PLACEHOLDER: &str = "-";

/// Ratio as a percentage with one decimal: `0.1234` -> `"12.3%"`.
pub fn format_percent(ratio: f64) -> String {
    if !ratio.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{:.1}%", normalize_zero(ratio * 100.0, 1))
}

/// Risk-adjusted ratios and growth multipliers, two decimals.
pub fn format_ratio(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{:.2}", normalize_zero(value, 2))
}

/// Feature scores and error magnitudes, four decimals.
pub fn format_importance(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{:.4}", normalize_zero(value, 4))
}

/// Signed percentage delta: `0.052` -> `"+5.2%"`.
pub fn format_signed_percent(ratio: f64) -> String {
    if !ratio.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let pct = normalize_zero(ratio * 100.0, 1);
    if pct > 0.0 {
        format!("+{:.1}%", pct)
    } else {
        format!("{:.1}%", pct)
    }
}

pub fn format_count(value: u64) -> String {
    value.to_string()
}

// Values that round to zero at `decimals` print without a minus sign.
fn normalize_zero(value: f64, decimals: i32) -> f64 {
    if (value * 10f64.powi(decimals)).round() == 0.0 {
        0.0
    } else {
        value
    }
}
