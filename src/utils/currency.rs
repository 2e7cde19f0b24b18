//! Currency formatting utilities for USD totals
//!
//! Report amounts are whole dollars with `,` thousands separators.

/// Format an integer with thousand separators
///
/// # Examples
/// ```
/// use whale_flow_signals::utils::currency::format_thousands;
///
/// assert_eq!(format_thousands(1234567), "1,234,567");
/// assert_eq!(format_thousands(999), "999");
/// ```
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

/// Format the absolute value of a USD amount, rounded to whole dollars
///
/// # Examples
/// ```
/// use whale_flow_signals::utils::currency::format_usd;
///
/// assert_eq!(format_usd(2_000_000.0), "$2,000,000");
/// assert_eq!(format_usd(-3_000_000.4), "$3,000,000");
/// ```
pub fn format_usd(amount: f64) -> String {
    let dollars = amount.abs().round();
    if !dollars.is_finite() {
        return format!("${}", dollars);
    }
    format!("${}", format_thousands(dollars as u64))
}
