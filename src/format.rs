//! Number formatting shared by the console and HTML reports.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Group the integer digits of `value` in thousands, keeping `decimals` places.
/// Halves round away from zero.
pub fn number(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.*}", decimals as usize, rounded.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + int_part.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

/// Whole dollars, e.g. `$4,850,000`
pub fn usd(value: Decimal) -> String {
    let n = number(value, 0);
    match n.strip_prefix('-') {
        Some(abs) => format!("-${abs}"),
        None => format!("${n}"),
    }
}

/// Dollars and cents, e.g. `$2.45`
pub fn usd_cents(value: Decimal) -> String {
    let n = number(value, 2);
    match n.strip_prefix('-') {
        Some(abs) => format!("-${abs}"),
        None => format!("${n}"),
    }
}

/// Fraction as a percentage with two places, e.g. `0.0575` -> `5.75%`
pub fn pct(value: Decimal) -> String {
    format!("{:.2}%", (value * dec!(100)).round_dp(2))
}

/// Fraction as a percentage with `decimals` places
pub fn pct_dp(value: Decimal, decimals: u32) -> String {
    format!("{:.*}%", decimals as usize, (value * dec!(100)).round_dp(decimals))
}

/// Ratio as a multiple, e.g. `6.57x`
pub fn multiple(value: Decimal) -> String {
    format!("{:.2}x", value.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(number(dec!(24330), 0), "24,330");
        assert_eq!(number(dec!(999), 0), "999");
        assert_eq!(number(dec!(1000), 0), "1,000");
        assert_eq!(number(dec!(1234567.891), 2), "1,234,567.89");
        assert_eq!(number(dec!(0.4), 0), "0");
        assert_eq!(number(dec!(1216.5), 0), "1,217");
        assert_eq!(number(dec!(-0.4), 0), "0");
    }

    #[test]
    fn dollars() {
        assert_eq!(usd(dec!(4850000)), "$4,850,000");
        assert_eq!(usd(dec!(203783.64)), "$203,784");
        assert_eq!(usd(dec!(-1500)), "-$1,500");
        assert_eq!(usd_cents(dec!(2.4489)), "$2.45");
    }

    #[test]
    fn percentages_and_multiples() {
        assert_eq!(pct(dec!(0.0575)), "5.75%");
        assert_eq!(pct(dec!(0.6)), "60.00%");
        assert_eq!(pct(dec!(0.098058268)), "9.81%");
        assert_eq!(pct_dp(dec!(0.5321), 0), "53%");
        assert_eq!(multiple(dec!(6.571815)), "6.57x");
        assert_eq!(multiple(dec!(2)), "2.00x");
    }
}
