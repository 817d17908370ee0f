/// Insert thousands separators into a whole-dollar amount
fn group_thousands(dollars: u64) -> String {
    let digits = dollars.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Format a currency value without cents (e.g. $574,000, -$35,375)
pub fn format_currency_short(value: f64) -> String {
    let dollars = group_thousands(value.abs().round() as u64);
    if value < 0.0 && value.round() != 0.0 {
        format!("-${dollars}")
    } else {
        format!("${dollars}")
    }
}

/// Format a signed currency delta (e.g. +$94,000, -$2,800)
pub fn format_signed_currency(value: f64) -> String {
    if value > 0.0 {
        format!("+{}", format_currency_short(value))
    } else {
        format_currency_short(value)
    }
}

/// Format a runway length in months, with the infinite sentinel spelled out
pub fn format_months(months: f64) -> String {
    if months >= runway_core::runway::INFINITE_RUNWAY_MONTHS {
        "∞".to_string()
    } else {
        format!("{months:.1} mo")
    }
}

/// Format a signed month delta (e.g. +7.0 mo)
pub fn format_month_delta(months: f64) -> String {
    if months > 0.0 {
        format!("+{months:.1} mo")
    } else {
        format!("{months:.1} mo")
    }
}

/// Format a percentage that is already scaled to 0..100
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

/// Format a month-over-month rate given as a fraction (0.05 => 5.0%)
pub fn format_rate(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}
