//! Path cost rendering.
//!
//! Costs are `f64` throughout the workspace. Canonical JSON admits integers
//! only, so every cost that reaches a hashed artifact is rendered to a string
//! by [`format_cost`] first.

/// Render a cost as a deterministic string.
///
/// Integral finite values print without a fractional part (`5.0` → `"5"`),
/// other finite values use Rust's shortest round-trip formatting, and the
/// non-finite values print as `"inf"`, `"-inf"` and `"nan"`.
#[must_use]
pub fn format_cost(cost: f64) -> String {
    if cost.is_nan() {
        return "nan".into();
    }
    if cost.is_infinite() {
        return if cost > 0.0 { "inf".into() } else { "-inf".into() };
    }
    if cost.fract() == 0.0 && cost.abs() < 1e15 {
        // Exact below 2^53; `-0.0` collapses to "0".
        #[allow(clippy::cast_possible_truncation)]
        let whole = cost as i64;
        return whole.to_string();
    }
    format!("{cost}")
}

/// Parse a cost rendered by [`format_cost`] (or any plain decimal).
///
/// Returns `None` for text that is not a number, `"inf"` or `"-inf"`.
#[must_use]
pub fn parse_cost(text: &str) -> Option<f64> {
    match text.trim() {
        "inf" | "+inf" | "infinity" => Some(f64::INFINITY),
        "-inf" | "-infinity" => Some(f64::NEG_INFINITY),
        other => other.parse::<f64>().ok().filter(|c| !c.is_nan()),
    }
}
