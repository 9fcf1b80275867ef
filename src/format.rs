//! Display formatting for force readouts and the formula panel

use crate::physics::math::Scalar;

/// Formats a force magnitude for the telemetry readout
///
/// Values strictly between 0 and 0.001 use exponential notation with two
/// decimals (`5.00e-4`). Everything else uses up to two fraction digits,
/// trailing zeros dropped, with comma thousands grouping (`1,234.5`).
pub fn format_scientific(value: Scalar) -> String {
    if value > 0.0 && value < 0.001 {
        return format!("{value:.2e}");
    }

    format_grouped(value)
}

/// Up to two fraction digits with thousands grouping
pub fn format_grouped(value: Scalar) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let fixed = to_fixed(value.abs(), 2);
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut formatted = String::with_capacity(fixed.len() + integer.len() / 3 + 1);
    if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        formatted.push('-');
    }
    formatted.push_str(&group_thousands(integer));
    if !fraction.is_empty() {
        formatted.push('.');
        formatted.push_str(fraction);
    }

    formatted
}

/// Fixed-point text with `digits` fraction digits, exact ties rounded away
/// from zero. `{:.N}` would round them to even.
///
/// A value is an exact tie at `digits` places only when it is an odd
/// multiple of `2^-(digits + 1)`, which is checked without rounding error.
pub fn to_fixed(value: Scalar, digits: u32) -> String {
    let magnitude = value.abs();
    let halves = magnitude * f64::from(2_u32.pow(digits + 1));
    let is_tie = magnitude < 1e12 && halves.fract() == 0.0 && (halves as u64) % 2 == 1;

    if !is_tie {
        return format!("{value:.prec$}", prec = digits as usize);
    }

    let scale = 10_u64.pow(digits);
    let units = (magnitude * scale as Scalar).round() as u64;
    let sign = if value < 0.0 { "-" } else { "" };
    if digits == 0 {
        format!("{sign}{units}")
    } else {
        format!(
            "{sign}{}.{:0width$}",
            units / scale,
            units % scale,
            width = digits as usize
        )
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

/// Formula line with the current values substituted,
/// e.g. `F = 100 · (8.0 · 2.0) / 15.0²`
pub fn formula_substitution(
    gravitational_constant: Scalar,
    primary_mass: Scalar,
    secondary_mass: Scalar,
    orbit_radius: Scalar,
) -> String {
    format!(
        "F = {gravitational_constant} · ({} · {}) / {}²",
        to_fixed(primary_mass, 1),
        to_fixed(secondary_mass, 1),
        to_fixed(orbit_radius, 1)
    )
}

/// Result line of the formula panel, e.g. `F = 7.11 N`
pub fn formula_result(force: Scalar) -> String {
    format!("F = {} N", to_fixed(force, 2))
}

/// `m₁ / m₂` with one decimal
pub fn mass_ratio(primary_mass: Scalar, secondary_mass: Scalar) -> String {
    let ratio = primary_mass / secondary_mass;
    if ratio.is_finite() {
        to_fixed(ratio, 1)
    } else {
        "--".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_values_use_exponent() {
        assert_eq!(format_scientific(0.0005), "5.00e-4");
        assert_eq!(format_scientific(0.000_012_34), "1.23e-5");
        assert!(format_scientific(0.000_999).contains('e'));
    }

    #[test]
    fn test_regular_values_use_two_decimals() {
        assert_eq!(format_scientific(42.567), "42.57");
        assert_eq!(format_scientific(7.111_111), "7.11");
        assert_eq!(format_scientific(0.001), "0");
        assert_eq!(format_scientific(0.5), "0.5");
        assert_eq!(format_scientific(3.0), "3");
    }

    #[test]
    fn test_zero() {
        assert_eq!(format_scientific(0.0), "0");
    }

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(format_scientific(1_600.0), "1,600");
        assert_eq!(format_scientific(1_234_567.891), "1,234,567.89");
        assert_eq!(format_scientific(999.999), "1,000");
        assert_eq!(format_scientific(100.0), "100");
    }

    #[test]
    fn test_exact_ties_round_away_from_zero() {
        assert_eq!(format_grouped(0.125), "0.13");
        assert_eq!(format_grouped(2.375), "2.38");
        assert_eq!(format_grouped(1.005), "1");
    }

    #[test]
    fn test_negative_and_non_finite() {
        assert_eq!(format_grouped(-1_234.5), "-1,234.5");
        assert_eq!(format_grouped(-0.001), "0");
        assert_eq!(format_grouped(Scalar::NAN), "NaN");
        assert_eq!(format_grouped(Scalar::INFINITY), "∞");
    }

    #[test]
    fn test_formula_lines() {
        assert_eq!(
            formula_substitution(100.0, 8.0, 2.0, 15.0),
            "F = 100 · (8.0 · 2.0) / 15.0²"
        );
        assert_eq!(formula_result(100.0 * 8.0 * 2.0 / 225.0), "F = 7.11 N");
        // m₁ = 2, m₂ = 1, r = 8
        assert_eq!(formula_result(100.0 * 2.0 * 1.0 / 64.0), "F = 3.13 N");
        assert_eq!(
            formula_substitution(100.0, 2.25, 1.0, 8.0),
            "F = 100 · (2.3 · 1.0) / 8.0²"
        );
    }

    #[test]
    fn test_mass_ratio() {
        assert_eq!(mass_ratio(8.0, 2.0), "4.0");
        assert_eq!(mass_ratio(10.0, 3.0), "3.3");
        assert_eq!(mass_ratio(1.0, 0.0), "--");
        assert_eq!(mass_ratio(5.0, 4.0), "1.3");
        assert_eq!(mass_ratio(9.0, 4.0), "2.3");
        assert_eq!(mass_ratio(2.5, 10.0), "0.3");
    }

    #[test]
    fn test_to_fixed_rounds_ties_up() {
        assert_eq!(to_fixed(1.25, 1), "1.3");
        assert_eq!(to_fixed(3.125, 2), "3.13");
        assert_eq!(to_fixed(0.5, 0), "1");
        assert_eq!(to_fixed(-1.25, 1), "-1.3");
        assert_eq!(to_fixed(1.24, 1), "1.2");
        assert_eq!(to_fixed(8.0, 1), "8.0");
        assert_eq!(to_fixed(7.111, 2), "7.11");
    }
}
