//! Currency helpers
//!
//! Quotes are expressed in currency units and rounded to the smallest
//! denomination (hundredths).

/// Round a currency amount to two decimal places.
///
/// Halves round away from zero, so `0.125` becomes `0.13` and `-0.125`
/// becomes `-0.13`. Non-finite values are returned unchanged.
pub fn round_currency(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    (value * 100.0).round() / 100.0
}

/// Format a currency amount for display, e.g. `$13.68`
pub fn format_currency(value: f64) -> String {
    if value.is_sign_negative() && value != 0.0 {
        format!("-${:.2}", -value)
    } else {
        format!("${:.2}", value.abs())
    }
}
