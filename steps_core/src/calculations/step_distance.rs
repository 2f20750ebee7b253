//! # Step / Distance Calculation
//!
//! Converts between step counts and walking distance using a stride length
//! estimated from the walker's height, gender and age.
//!
//! ## Formulas
//!
//! - Step length: height (cm) × 0.415 (male) or × 0.413 (female)
//! - Age adjustment: −1% per decade over 40, never more than −15%
//! - Calories: 0.75 kcal per km per kg of body weight (70 kg when unknown)
//! - Walking time: constant 5 km/h
//!
//! These are the step-distance calculator's own constants. The calorie
//! calculator uses a MET model instead and gives different numbers for the
//! same walk.
//!
//! ## Example
//!
//! ```rust
//! use steps_core::calculations::step_distance::{calculate_from_steps, Gender, UserProfile};
//!
//! let profile = UserProfile { gender: Gender::Male, age: 30, height_cm: 180.0 };
//! let result = calculate_from_steps(10_000.0, &profile);
//!
//! // 180 × 0.415 = 74.7 cm stride → 7.47 km
//! assert!((result.distance_km - 7.47).abs() < 1e-9);
//! assert_eq!(result.walking_time_minutes, 90.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{round_half_up, CM_PER_KM, KM_TO_MILES};

const MALE_STEP_MULTIPLIER: f64 = 0.415;
const FEMALE_STEP_MULTIPLIER: f64 = 0.413;
const AGE_ADJUSTMENT_THRESHOLD: u32 = 40;
const AGE_ADJUSTMENT_PER_DECADE: f64 = 0.01;
const MIN_AGE_FACTOR: f64 = 0.85;
const AVERAGE_WALKING_SPEED_KMH: f64 = 5.0;
const CALORIES_PER_KM_PER_KG: f64 = 0.75;

/// Body weight assumed when the visitor has not entered one
pub const AVERAGE_WEIGHT_KG: f64 = 70.0;

/// Step counts shown in the reference table
pub const COMMON_STEP_COUNTS: [u32; 7] = [1000, 2500, 5000, 7500, 10000, 15000, 20000];

/// Biological sex used by the stride formulas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// The walker whose stride length is being estimated.
///
/// ## JSON Example
///
/// ```json
/// { "gender": "female", "age": 45, "height_cm": 165.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub gender: Gender,
    /// Age in whole years
    pub age: u32,
    /// Standing height in centimeters
    pub height_cm: f64,
}

impl UserProfile {
    /// Validate the profile against the bounds the input forms enforce.
    pub fn validate(&self) -> CalcResult<()> {
        if self.age == 0 || self.age > 120 {
            return Err(CalcError::invalid_input(
                "age",
                self.age.to_string(),
                "Age must be between 1 and 120",
            ));
        }
        if !(self.height_cm >= 1.0 && self.height_cm <= 250.0) {
            return Err(CalcError::invalid_input(
                "height_cm",
                self.height_cm.to_string(),
                "Height must be between 1 and 250 cm",
            ));
        }
        Ok(())
    }
}

/// Distance in both display units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distance {
    pub km: f64,
    pub miles: f64,
}

/// Everything the step/distance calculator shows for one walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepDistanceResult {
    pub steps: f64,
    pub distance_km: f64,
    pub distance_miles: f64,
    /// Whole kcal at the default body weight
    pub calories_burned: f64,
    /// Whole minutes at 5 km/h
    pub walking_time_minutes: f64,
    pub step_length_cm: f64,
}

/// Input for the step/distance calculator: convert one way or the other.
///
/// ## JSON Example
///
/// ```json
/// {
///   "profile": { "gender": "male", "age": 30, "height_cm": 180.0 },
///   "steps": 10000
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepDistanceInput {
    pub profile: UserProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl StepDistanceInput {
    pub fn validate(&self) -> CalcResult<()> {
        self.profile.validate()?;
        match (self.steps, self.distance_km) {
            (None, None) => Err(CalcError::missing_field("steps")),
            (Some(steps), _) if steps < 0.0 => Err(CalcError::invalid_input(
                "steps",
                steps.to_string(),
                "Steps cannot be negative",
            )),
            (None, Some(km)) if km < 0.0 => Err(CalcError::invalid_input(
                "distance_km",
                km.to_string(),
                "Distance cannot be negative",
            )),
            _ => Ok(()),
        }
    }
}

/// Estimate step length in centimeters.
pub fn calculate_step_length(profile: &UserProfile) -> f64 {
    let multiplier = match profile.gender {
        Gender::Male => MALE_STEP_MULTIPLIER,
        Gender::Female => FEMALE_STEP_MULTIPLIER,
    };
    let mut step_length = profile.height_cm * multiplier;

    if profile.age > AGE_ADJUSTMENT_THRESHOLD {
        let decades_over = (profile.age - AGE_ADJUSTMENT_THRESHOLD) as f64 / 10.0;
        let age_factor = 1.0 - decades_over * AGE_ADJUSTMENT_PER_DECADE;
        step_length *= age_factor.max(MIN_AGE_FACTOR);
    }

    step_length
}

/// Distance covered by `steps` strides of `step_length_cm`.
pub fn steps_to_distance(steps: f64, step_length_cm: f64) -> Distance {
    let km = (steps * step_length_cm) / CM_PER_KM;
    Distance {
        km,
        miles: km * KM_TO_MILES,
    }
}

/// Whole number of steps needed to cover `distance_km`.
pub fn distance_to_steps(distance_km: f64, step_length_cm: f64) -> f64 {
    round_half_up((distance_km * CM_PER_KM) / step_length_cm)
}

/// Rough calorie estimate for a walk, in whole kcal.
pub fn estimate_calories_burned(distance_km: f64, weight_kg: Option<f64>) -> f64 {
    let weight_kg = weight_kg.unwrap_or(AVERAGE_WEIGHT_KG);
    round_half_up(distance_km * CALORIES_PER_KM_PER_KG * weight_kg)
}

/// Walking time in whole minutes at an average pace.
pub fn estimate_walking_time(distance_km: f64) -> f64 {
    round_half_up((distance_km / AVERAGE_WALKING_SPEED_KMH) * 60.0)
}

/// Miles back to kilometers using this calculator's mile factor.
pub fn miles_to_km(miles: f64) -> f64 {
    miles / KM_TO_MILES
}

pub fn calculate_from_steps(steps: f64, profile: &UserProfile) -> StepDistanceResult {
    let step_length_cm = calculate_step_length(profile);
    let distance = steps_to_distance(steps, step_length_cm);

    StepDistanceResult {
        steps,
        distance_km: distance.km,
        distance_miles: distance.miles,
        calories_burned: estimate_calories_burned(distance.km, None),
        walking_time_minutes: estimate_walking_time(distance.km),
        step_length_cm,
    }
}

pub fn calculate_from_distance(distance_km: f64, profile: &UserProfile) -> StepDistanceResult {
    let step_length_cm = calculate_step_length(profile);

    StepDistanceResult {
        steps: distance_to_steps(distance_km, step_length_cm),
        distance_km,
        distance_miles: distance_km * KM_TO_MILES,
        calories_burned: estimate_calories_burned(distance_km, None),
        walking_time_minutes: estimate_walking_time(distance_km),
        step_length_cm,
    }
}

/// Rows for the "common step counts" table on the calculator page.
pub fn generate_reference_table(profile: &UserProfile) -> Vec<StepDistanceResult> {
    COMMON_STEP_COUNTS
        .iter()
        .map(|&steps| calculate_from_steps(steps as f64, profile))
        .collect()
}

/// Validate and run the calculator. Steps take precedence over distance.
pub fn calculate(input: &StepDistanceInput) -> CalcResult<StepDistanceResult> {
    input.validate()?;
    match (input.steps, input.distance_km) {
        (Some(steps), _) => Ok(calculate_from_steps(steps, &input.profile)),
        (None, Some(km)) => Ok(calculate_from_distance(km, &input.profile)),
        (None, None) => Err(CalcError::missing_field("steps")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(gender: Gender, age: u32, height_cm: f64) -> UserProfile {
        UserProfile { gender, age, height_cm }
    }

    #[test]
    fn test_step_length_by_gender() {
        assert!((calculate_step_length(&profile(Gender::Male, 30, 180.0)) - 74.7).abs() < 1e-9);
        assert!((calculate_step_length(&profile(Gender::Female, 30, 160.0)) - 66.08).abs() < 1e-9);
    }

    #[test]
    fn test_age_adjustment() {
        // 60 years: two decades over 40 → 2% shorter
        let base = 170.0 * 0.415;
        let adjusted = calculate_step_length(&profile(Gender::Male, 60, 170.0));
        assert!((adjusted - base * 0.98).abs() < 1e-9);

        // No adjustment at exactly 40
        let at_forty = calculate_step_length(&profile(Gender::Male, 40, 170.0));
        assert!((at_forty - base).abs() < 1e-9);
    }

    #[test]
    fn test_age_adjustment_capped() {
        // 120 years would be −8%, still above the cap; cap is reachable only past 190
        let old = calculate_step_length(&profile(Gender::Female, 120, 160.0));
        assert!((old - 160.0 * 0.413 * 0.92).abs() < 1e-9);
        let ancient = calculate_step_length(&profile(Gender::Female, 250, 160.0));
        assert!((ancient - 160.0 * 0.413 * 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_steps_distance_inverse() {
        let d = steps_to_distance(10_000.0, 75.0);
        assert!((d.km - 7.5).abs() < 1e-9);
        assert!((d.miles - 7.5 * 0.621371).abs() < 1e-9);
        assert_eq!(distance_to_steps(7.5, 75.0), 10_000.0);
    }

    #[test]
    fn test_calorie_and_time_estimates() {
        // 10 km × 0.75 × 70 = 525
        assert_eq!(estimate_calories_burned(10.0, None), 525.0);
        assert_eq!(estimate_calories_burned(10.0, Some(80.0)), 600.0);
        assert_eq!(estimate_walking_time(5.0), 60.0);
        assert_eq!(estimate_walking_time(2.5), 30.0);
    }

    #[test]
    fn test_calculate_from_distance() {
        let p = profile(Gender::Male, 30, 180.0);
        let result = calculate_from_distance(5.0, &p);
        assert_eq!(result.steps, round_half_up(500_000.0 / 74.7));
        assert_eq!(result.walking_time_minutes, 60.0);
        assert!((result.distance_miles - 3.106855).abs() < 1e-9);
    }

    #[test]
    fn test_reference_table() {
        let table = generate_reference_table(&profile(Gender::Female, 25, 165.0));
        assert_eq!(table.len(), 7);
        assert_eq!(table[0].steps, 1000.0);
        assert_eq!(table[6].steps, 20000.0);
        assert!(table.windows(2).all(|w| w[0].distance_km < w[1].distance_km));
    }

    #[test]
    fn test_miles_to_km() {
        assert!((miles_to_km(0.621371) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_calculate_requires_a_quantity() {
        let input = StepDistanceInput {
            profile: profile(Gender::Male, 30, 180.0),
            steps: None,
            distance_km: None,
        };
        assert_eq!(calculate(&input).unwrap_err().error_code(), "MISSING_FIELD");
    }

    #[test]
    fn test_invalid_profile() {
        let input = StepDistanceInput {
            profile: profile(Gender::Male, 0, 180.0),
            steps: Some(1000.0),
            distance_km: None,
        };
        assert!(calculate(&input).is_err());
    }
}
