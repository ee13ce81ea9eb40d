//! Rounding and display helpers shared by the calculators.
//!
//! Currency rounds to 2 decimal places and fractional ratios to 4 (3 for FTE
//! figures in validation). Midpoints round away from zero.
//!
//! Inputs are caller-supplied records, so sums and ratios saturate at the
//! edge of the `Decimal` range instead of panicking.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to 2 decimal places (pence).
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to 3 decimal places (FTE figures).
pub fn round3(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to 4 decimal places (effort ratios).
pub fn round4(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
}

/// Sums decimals, clamping to the representable range on overflow.
pub fn saturating_sum<I: IntoIterator<Item = Decimal>>(values: I) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// `numerator ÷ denominator`, clamped to the representable range on
/// overflow. Callers guard against a zero denominator.
pub fn saturating_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or({
        if numerator.is_sign_negative() != denominator.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    })
}

/// Formats an amount as pounds with thousands separators and two decimals.
///
/// # Example
///
/// ```
/// use ukri_rules_engine::calculation::format_gbp;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_gbp(Decimal::new(433333, 2)), "£4,333.33");
/// assert_eq!(format_gbp(Decimal::from(400)), "£400.00");
/// ```
pub fn format_gbp(amount: Decimal) -> String {
    format!("£{}", group_thousands(&format!("{:.2}", round2(amount))))
}

/// Formats an amount as pounds with thousands separators and only the
/// decimals it actually has, e.g. `£52,000` or `£45,500.5`.
pub fn format_gbp_plain(amount: Decimal) -> String {
    format!("£{}", group_thousands(&amount.normalize().to_string()))
}

/// Formats a fraction as a percentage with two decimals: 0.5275 → "52.75".
pub fn format_percent(fraction: Decimal) -> String {
    format!("{:.2}", round2(fraction.saturating_mul(Decimal::ONE_HUNDRED)))
}

/// Formats a fraction as a whole percentage: 0.4 → "40".
pub fn format_whole_percent(fraction: Decimal) -> String {
    format!(
        "{}",
        fraction
            .saturating_mul(Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .normalize()
    )
}

/// Formats a plain number without trailing zeros: 151.670 → "151.67".
pub fn format_number(value: Decimal) -> String {
    value.normalize().to_string()
}

fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_round2_midpoint_away_from_zero() {
        assert_eq!(round2(dec("1371.435")), dec("1371.44"));
        assert_eq!(round2(dec("-0.005")), dec("-0.01"));
        assert_eq!(round2(dec("151.666666")), dec("151.67"));
    }

    #[test]
    fn test_round4_effort() {
        assert_eq!(round4(dec("0.09230769")), dec("0.0923"));
        assert_eq!(round4(dec("0.52747252")), dec("0.5275"));
    }

    #[test]
    fn test_round3_fte() {
        assert_eq!(round3(dec("0.6593406")), dec("0.659"));
    }

    #[test]
    fn test_format_gbp_groups_thousands() {
        assert_eq!(format_gbp(dec("1714.29")), "£1,714.29");
        assert_eq!(format_gbp(dec("180000")), "£180,000.00");
        assert_eq!(format_gbp(dec("0")), "£0.00");
        assert_eq!(format_gbp(dec("1234567.891")), "£1,234,567.89");
    }

    #[test]
    fn test_format_gbp_negative() {
        assert_eq!(format_gbp(dec("-109500")), "£-109,500.00");
    }

    #[test]
    fn test_format_gbp_plain() {
        assert_eq!(format_gbp_plain(dec("52000")), "£52,000");
        assert_eq!(format_gbp_plain(dec("45500.50")), "£45,500.5");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(dec("0.0923")), "9.23");
        assert_eq!(format_percent(dec("0.5275")), "52.75");
        assert_eq!(format_percent(dec("0")), "0.00");
    }

    #[test]
    fn test_format_whole_percent() {
        assert_eq!(format_whole_percent(dec("0.4")), "40");
        assert_eq!(format_whole_percent(dec("0.8")), "80");
        assert_eq!(format_whole_percent(dec("1.0")), "100");
    }

    #[test]
    fn test_saturating_sum_clamps_at_max() {
        assert_eq!(saturating_sum([dec("1.5"), dec("2.25")]), dec("3.75"));
        assert_eq!(saturating_sum([Decimal::MAX, Decimal::ONE]), Decimal::MAX);
        assert_eq!(saturating_sum([Decimal::MIN, Decimal::NEGATIVE_ONE]), Decimal::MIN);
    }

    #[test]
    fn test_saturating_div_keeps_sign_on_overflow() {
        let tiny = dec("0.0000000000000000000000000001");
        assert_eq!(saturating_div(dec("60"), dec("151.5")).round_dp(4), dec("0.396"));
        assert_eq!(saturating_div(Decimal::MAX, tiny), Decimal::MAX);
        assert_eq!(saturating_div(Decimal::MIN, tiny), Decimal::MIN);
    }

    #[test]
    fn test_percent_formatting_does_not_overflow() {
        assert!(!format_percent(Decimal::MAX).is_empty());
        assert!(!format_whole_percent(Decimal::MAX).is_empty());
    }

    #[test]
    fn test_format_number_strips_trailing_zeros() {
        assert_eq!(format_number(dec("151.670")), "151.67");
        assert_eq!(format_number(dec("162.50")), "162.5");
        assert_eq!(format_number(dec("35")), "35");
    }
}
