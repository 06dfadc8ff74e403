//! Money formatting and guarded ratios.
//!
//! Amounts are plain `f64` pounds sterling. Display formatting follows the
//! ICARA document convention of whole pounds with thousands separators.
//! Ratios never leak NaN or infinity: a zero denominator yields `None`
//! (or `0.0` where a percentage sentinel is wanted).

/// Formats an amount as GBP with no decimal places.
///
/// Rounds half away from zero. Non-finite values render as `£0`.
///
/// # Examples
///
/// ```
/// use mifidpru_core::types::format_gbp;
///
/// assert_eq!(format_gbp(1_234_567.0), "£1,234,567");
/// assert_eq!(format_gbp(999.5), "£1,000");
/// assert_eq!(format_gbp(-1_234.0), "-£1,234");
/// assert_eq!(format_gbp(0.0), "£0");
/// ```
pub fn format_gbp(value: f64) -> String {
    if !value.is_finite() {
        return "£0".to_string();
    }

    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{}", rounded.abs() as u128);

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-£{}", grouped)
    } else {
        format!("£{}", grouped)
    }
}

/// Formats a percentage with one decimal place, e.g. `95.0%`.
pub fn format_percent(value: f64) -> String {
    if value.is_finite() {
        format!("{:.1}%", value)
    } else {
        "n/a".to_string()
    }
}

/// Clamps an amount to a finite, non-negative value.
///
/// Negative and non-finite inputs become `0.0`.
#[inline]
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Computes `numerator / denominator * 100`.
///
/// Returns `None` when the denominator is zero or the result is not finite.
///
/// # Examples
///
/// ```
/// use mifidpru_core::types::percent_of;
///
/// assert_eq!(percent_of(250_000.0, 1_000_000.0), Some(25.0));
/// assert_eq!(percent_of(1.0, 0.0), None);
/// ```
pub fn percent_of(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    let pct = numerator / denominator * 100.0;
    pct.is_finite().then_some(pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_gbp_grouping() {
        assert_eq!(format_gbp(1.0), "£1");
        assert_eq!(format_gbp(12.0), "£12");
        assert_eq!(format_gbp(123.0), "£123");
        assert_eq!(format_gbp(1_234.0), "£1,234");
        assert_eq!(format_gbp(12_345.0), "£12,345");
        assert_eq!(format_gbp(123_456.0), "£123,456");
        assert_eq!(format_gbp(1_325_000.0), "£1,325,000");
        assert_eq!(format_gbp(500_000_000.0), "£500,000,000");
    }

    #[test]
    fn test_format_gbp_rounding() {
        assert_eq!(format_gbp(1_234.49), "£1,234");
        assert_eq!(format_gbp(1_234.5), "£1,235");
        assert_eq!(format_gbp(333_333.333), "£333,333");
    }

    #[test]
    fn test_format_gbp_non_finite() {
        assert_eq!(format_gbp(f64::NAN), "£0");
        assert_eq!(format_gbp(f64::INFINITY), "£0");
    }

    #[test]
    fn test_format_gbp_negative() {
        assert_eq!(format_gbp(-1_500_000.0), "-£1,500,000");
        assert_eq!(format_gbp(-0.2), "£0");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(95.0), "95.0%");
        assert_eq!(format_percent(133.333), "133.3%");
        assert_eq!(format_percent(f64::NAN), "n/a");
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(non_negative(5.0), 5.0);
        assert_eq!(non_negative(-5.0), 0.0);
        assert_eq!(non_negative(f64::NAN), 0.0);
        assert_eq!(non_negative(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_percent_of_guards_zero() {
        assert_eq!(percent_of(0.0, 0.0), None);
        assert_eq!(percent_of(50.0, 200.0), Some(25.0));
        assert_eq!(percent_of(f64::INFINITY, 1.0), None);
    }
}
