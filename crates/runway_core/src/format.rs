//! Output-boundary rounding and compact money labels.
//!
//! Internal arithmetic is never rounded; these helpers are only applied when a
//! value is written into a result record.

/// Round a money amount to whole currency units.
#[inline]
pub fn round_money(value: f64) -> f64 {
    value.round()
}

/// Round to one decimal place (runway months, percentages of burn).
#[inline]
pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Format a currency value in compact form (e.g., $2.1M, $94K, $50)
pub fn compact_currency(value: f64) -> String {
    let abs_value = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    if abs_value >= 1_000_000.0 {
        format!("{}${:.1}M", sign, abs_value / 1_000_000.0)
    } else if abs_value >= 1_000.0 {
        format!("{}${}K", sign, (abs_value / 1_000.0).round())
    } else {
        format!("{}${}", sign, abs_value.round())
    }
}
