//! # Display Formatting
//!
//! String formatting for calculator results as the site shows them:
//! en-US thousands separators, "1h 30m" durations, and distance precision
//! tiers.
//!
//! ```rust
//! use steps_core::format::{format_number, format_time};
//!
//! assert_eq!(format_number(10000.0), "10,000");
//! assert_eq!(format_time(95.0), "1h 35m");
//! assert_eq!(format_time(45.0), "45 min");
//! ```

use crate::units::{kg_to_lbs, round_half_up, round_to, DistanceUnit, WeightUnit};

/// Format a number with en-US thousands separators.
///
/// Keeps at most three fraction digits (ties away from zero) and drops
/// trailing zeros.
pub fn format_number(num: f64) -> String {
    let fixed = format!("{:.3}", round_to(num.abs(), 3));
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let is_zero = int_part.chars().all(|c| c == '0') && frac_part.is_empty();
    let sign = if num < 0.0 && !is_zero { "-" } else { "" };

    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}

/// Format a duration in minutes as `"Xh Ym"`, `"Xh"`, or `"Y min"`.
pub fn format_time(minutes: f64) -> String {
    if minutes >= 60.0 {
        let hours = (minutes / 60.0).floor();
        let mins = round_half_up(minutes % 60.0);
        if mins > 0.0 {
            format!("{}h {}m", hours, mins)
        } else {
            format!("{}h", hours)
        }
    } else {
        format!("{} min", round_half_up(minutes))
    }
}

/// Format a distance with the precision tier for its size.
///
/// Meters are whole numbers; km and miles get two decimals below 1 and one
/// decimal otherwise.
pub fn format_distance(distance: f64, unit: DistanceUnit) -> String {
    match unit {
        DistanceUnit::M => format!("{}", round_half_up(distance)),
        DistanceUnit::Km | DistanceUnit::Miles => {
            if distance < 1.0 {
                format!("{:.2}", round_to(distance, 2))
            } else {
                format!("{:.1}", round_to(distance, 1))
            }
        }
    }
}

/// Format a weight with one decimal.
pub fn format_weight(weight: f64) -> String {
    format!("{:.1}", round_to(weight, 1))
}

/// Format a weight given in kg for display in the chosen unit, e.g. `"72.5 kg"`.
pub fn format_weight_with_unit(kg: f64, unit: WeightUnit) -> String {
    match unit {
        WeightUnit::Lbs => format!("{} lbs", round_to(kg_to_lbs(kg), 1)),
        WeightUnit::Kg => format!("{} kg", round_to(kg, 1)),
    }
}

/// Format calories as a rounded whole number with separators.
pub fn format_calories(calories: f64) -> String {
    format_number(round_half_up(calories))
}

/// Format a BMI value with one decimal.
pub fn format_bmi(bmi: f64) -> String {
    format!("{:.1}", round_to(bmi, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(1234567.0), "1,234,567");
        assert_eq!(format_number(1234.5), "1,234.5");
        assert_eq!(format_number(-12500.0), "-12,500");
        assert_eq!(format_number(3.14159), "3.142");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0 min");
        assert_eq!(format_time(59.4), "59 min");
        assert_eq!(format_time(60.0), "1h");
        assert_eq!(format_time(135.0), "2h 15m");
    }

    #[test]
    fn test_format_distance_tiers() {
        assert_eq!(format_distance(0.456, DistanceUnit::Km), "0.46");
        assert_eq!(format_distance(4.56, DistanceUnit::Miles), "4.6");
        assert_eq!(format_distance(12.34, DistanceUnit::Km), "12.3");
        assert_eq!(format_distance(742.6, DistanceUnit::M), "743");
    }

    #[test]
    fn test_format_weight_with_unit() {
        assert_eq!(format_weight_with_unit(72.46, WeightUnit::Kg), "72.5 kg");
        assert_eq!(format_weight_with_unit(70.0, WeightUnit::Kg), "70 kg");
        assert_eq!(format_weight_with_unit(70.0, WeightUnit::Lbs), "154.3 lbs");
    }

    #[test]
    fn test_format_calories_and_bmi() {
        assert_eq!(format_calories(2449.6), "2,450");
        assert_eq!(format_bmi(22.857), "22.9");
        assert_eq!(format_weight(65.0), "65.0");
    }

    #[test]
    fn test_ties_round_up() {
        assert_eq!(format_number(0.0625), "0.063");
        assert_eq!(format_number(-0.0625), "-0.063");
        assert_eq!(format_distance(1.25, DistanceUnit::Km), "1.3");
        assert_eq!(format_distance(0.125, DistanceUnit::Km), "0.13");
        assert_eq!(format_bmi(24.75), "24.8");
        assert_eq!(format_weight(72.25), "72.3");
        assert_eq!(format_weight_with_unit(72.25, WeightUnit::Kg), "72.3 kg");
    }
}
