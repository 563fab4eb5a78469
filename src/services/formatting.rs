//! Display formatting for prices and percentages.
//!
//! Amounts are rounded to two decimals half away from zero on the exact
//! binary value of the input: `0.125` -> `0.13`, `1.005` -> `1.00`.

use rust_decimal::{Decimal, RoundingStrategy};

/// `45000.5` -> `"45000.50"`
pub fn format_fixed2(value: f64) -> String {
    match Decimal::from_f64_retain(value) {
        Some(d) => format!("{:.2}", d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)),
        // NaN, infinities and values beyond Decimal's range
        None => format!("{:.2}", value),
    }
}

/// `2.345` -> `"2.35%"`. No `+` is added for positive values.
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_fixed2(value))
}

/// USD with thousands separators: `45000.5` -> `"$45,000.50"`.
/// Negative amounts keep the sign after the currency symbol (`"$-12.00"`).
pub fn format_usd(value: f64) -> String {
    let fixed = format_fixed2(value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 { "-" } else { "" };

    format!("${}{}.{}", sign, group_thousands(int_part), frac_part)
}

/// Insert `,` every three digits from the right. Expects ASCII digits only.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
