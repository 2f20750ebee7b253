//! # Form Input Sanitizing
//!
//! The calculator functions assume sane input. Front ends run raw form values
//! through these clamps first: a typed "0" weight becomes 1 kg, a 300 cm
//! height becomes 250 cm, and blank or garbled fields fall back to a default.
//!
//! ```rust
//! use steps_core::form::{clamp_age, clamp_height_cm, parse_field};
//!
//! assert_eq!(clamp_age(0), 1);
//! assert_eq!(clamp_height_cm(300.0), 250.0);
//! assert_eq!(parse_field(" 72.5 ", 70.0), 72.5);
//! assert_eq!(parse_field("abc", 70.0), 70.0);
//! ```

use crate::calculations::step_distance::{Gender, UserProfile};
use crate::calculations::step_goal::StepGoalInput;
use crate::calculations::weight_loss::WeightLossInput;

pub const MIN_WEIGHT_KG: f64 = 1.0;
pub const MIN_AGE: u32 = 1;
pub const MAX_AGE: u32 = 120;
pub const MIN_HEIGHT_CM: f64 = 1.0;
pub const MAX_HEIGHT_CM: f64 = 250.0;

/// Parse a numeric form field; empty, invalid or non-finite text gives `default`.
pub fn parse_field(text: &str, default: f64) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => default,
    }
}

pub fn clamp_weight_kg(weight_kg: f64) -> f64 {
    if weight_kg.is_nan() {
        return MIN_WEIGHT_KG;
    }
    weight_kg.max(MIN_WEIGHT_KG)
}

pub fn clamp_age(age: u32) -> u32 {
    age.clamp(MIN_AGE, MAX_AGE)
}

pub fn clamp_height_cm(height_cm: f64) -> f64 {
    if height_cm.is_nan() {
        return MIN_HEIGHT_CM;
    }
    height_cm.clamp(MIN_HEIGHT_CM, MAX_HEIGHT_CM)
}

/// Step counts, distances and durations: never negative.
pub fn clamp_non_negative(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0)
}

pub fn clamp_days_per_week(days: u32) -> u32 {
    days.clamp(1, 7)
}

pub fn clamp_timeframe_days(days: u32) -> u32 {
    days.max(1)
}

/// Build a profile from raw form values.
pub fn sanitize_profile(gender: Gender, age: u32, height_cm: f64) -> UserProfile {
    UserProfile {
        gender,
        age: clamp_age(age),
        height_cm: clamp_height_cm(height_cm),
    }
}

pub fn sanitize_step_goal(input: StepGoalInput) -> StepGoalInput {
    StepGoalInput {
        age: clamp_age(input.age),
        ..input
    }
}

pub fn sanitize_weight_loss(input: WeightLossInput) -> WeightLossInput {
    WeightLossInput {
        current_weight_kg: clamp_weight_kg(input.current_weight_kg),
        target_weight_kg: clamp_weight_kg(input.target_weight_kg),
        timeframe_days: clamp_timeframe_days(input.timeframe_days),
        days_per_week: clamp_days_per_week(input.days_per_week),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::step_goal::{ActivityLevel, HealthGoal};

    #[test]
    fn test_parse_field() {
        assert_eq!(parse_field("10000", 0.0), 10000.0);
        assert_eq!(parse_field("", 5.0), 5.0);
        assert_eq!(parse_field("NaN", 5.0), 5.0);
        assert_eq!(parse_field("inf", 5.0), 5.0);
        assert_eq!(parse_field("-3", 5.0), -3.0);
    }

    #[test]
    fn test_clamps() {
        assert_eq!(clamp_weight_kg(0.0), 1.0);
        assert_eq!(clamp_weight_kg(f64::NAN), 1.0);
        assert_eq!(clamp_weight_kg(82.0), 82.0);
        assert_eq!(clamp_age(150), 120);
        assert_eq!(clamp_height_cm(-5.0), 1.0);
        assert_eq!(clamp_non_negative(-100.0), 0.0);
        assert_eq!(clamp_days_per_week(0), 1);
        assert_eq!(clamp_days_per_week(9), 7);
        assert_eq!(clamp_timeframe_days(0), 1);
    }

    #[test]
    fn test_sanitized_inputs_validate() {
        let profile = sanitize_profile(Gender::Female, 0, 400.0);
        assert!(profile.validate().is_ok());

        let goal = sanitize_step_goal(StepGoalInput {
            age: 200,
            gender: Gender::Male,
            activity_level: ActivityLevel::Active,
            health_goal: HealthGoal::Maintain,
            current_steps: None,
        });
        assert!(goal.validate().is_ok());

        let plan = sanitize_weight_loss(WeightLossInput {
            current_weight_kg: 0.0,
            target_weight_kg: -4.0,
            timeframe_days: 0,
            days_per_week: 12,
        });
        assert!(plan.validate().is_ok());
    }
}
