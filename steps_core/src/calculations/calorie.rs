//! # Calorie Calculation
//!
//! Calories burned walking, from a duration, a distance, or a step count.
//!
//! ## Models
//!
//! Duration and distance use MET values:
//!
//! ```text
//! calories = MET × weight (kg) × duration (h)
//! ```
//!
//! Distance is first turned into a duration using the pace's walking speed.
//! Step counts use a separate linear approximation of 0.04 kcal per step for a
//! 70 kg walker, scaled by body weight. The site's copy quotes numbers from
//! both ("10,000 steps burns ~400 calories"), so the two models are not
//! reconciled.
//!
//! ## Example
//!
//! ```rust
//! use steps_core::calculations::calorie::{calculate_from_duration, WalkingSpeed};
//!
//! let result = calculate_from_duration(60.0, 70.0, WalkingSpeed::Normal, None);
//! assert_eq!(result.calories_burned, 245.0);
//! assert_eq!(result.distance_km, 5.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{km_to_miles, round_half_up, round_to, CM_PER_KM};

use super::step_distance::COMMON_STEP_COUNTS;

/// Average walking cadence
pub const STEPS_PER_MINUTE: f64 = 100.0;
pub const STEPS_PER_HOUR: f64 = STEPS_PER_MINUTE * 60.0;

/// Energy stored in one kilogram of body fat
pub const CALORIES_PER_KG_FAT: f64 = 7700.0;

/// Reference body weight for the per-step model
pub const DEFAULT_WEIGHT_KG: f64 = 70.0;

/// Stride assumed when the visitor's own is unknown
pub const DEFAULT_STEP_LENGTH_CM: f64 = 75.0;

const CALORIES_PER_STEP_AT_DEFAULT_WEIGHT: f64 = 0.04;
const FOOD_EQUIVALENT_LIMIT: usize = 4;

/// Walking pace, each with its own MET value and speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalkingSpeed {
    /// 3.2 km/h (2 mph), leisurely stroll
    Slow,
    /// 5.0 km/h (3.1 mph), average pace
    #[default]
    Normal,
    /// 6.4 km/h (4 mph)
    Brisk,
    /// 7.2 km/h (4.5 mph), power walking
    Fast,
}

impl WalkingSpeed {
    pub const ALL: [WalkingSpeed; 4] = [
        WalkingSpeed::Slow,
        WalkingSpeed::Normal,
        WalkingSpeed::Brisk,
        WalkingSpeed::Fast,
    ];

    /// Metabolic equivalent for this pace
    pub fn met(self) -> f64 {
        match self {
            WalkingSpeed::Slow => 2.5,
            WalkingSpeed::Normal => 3.5,
            WalkingSpeed::Brisk => 4.5,
            WalkingSpeed::Fast => 5.0,
        }
    }

    pub fn speed_kmh(self) -> f64 {
        match self {
            WalkingSpeed::Slow => 3.2,
            WalkingSpeed::Normal => 5.0,
            WalkingSpeed::Brisk => 6.4,
            WalkingSpeed::Fast => 7.2,
        }
    }
}

/// Input for the calorie calculator.
///
/// Exactly one of `steps`, `distance_km` or `duration_minutes` drives the
/// calculation; when several are present, steps win, then distance.
///
/// ## JSON Example
///
/// ```json
/// { "weight_kg": 70.0, "duration_minutes": 60.0, "speed": "brisk" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieCalculationInput {
    pub weight_kg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<WalkingSpeed>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<f64>,
    /// Stride used to convert between steps and distance (default 75 cm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_length_cm: Option<f64>,
}

impl CalorieCalculationInput {
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.weight_kg >= 1.0) {
            return Err(CalcError::invalid_input(
                "weight_kg",
                self.weight_kg.to_string(),
                "Weight must be at least 1 kg",
            ));
        }
        let quantities = [
            ("steps", self.steps),
            ("distance_km", self.distance_km),
            ("duration_minutes", self.duration_minutes),
        ];
        if quantities.iter().all(|(_, v)| v.is_none()) {
            return Err(CalcError::missing_field("steps"));
        }
        for (field, value) in quantities {
            if let Some(v) = value {
                if v < 0.0 {
                    return Err(CalcError::invalid_input(
                        field,
                        v.to_string(),
                        "Value cannot be negative",
                    ));
                }
            }
        }
        if let Some(stride) = self.step_length_cm {
            if stride <= 0.0 {
                return Err(CalcError::invalid_input(
                    "step_length_cm",
                    stride.to_string(),
                    "Step length must be positive",
                ));
            }
        }
        Ok(())
    }

    /// Calories before display rounding, from the same quantity
    /// [`calculate`] would use. `None` when no quantity is supplied.
    pub fn unrounded_calories(&self) -> Option<f64> {
        let speed = self.speed.unwrap_or_default();
        if let Some(steps) = self.steps {
            Some(calories_from_steps(steps, self.weight_kg))
        } else if let Some(km) = self.distance_km {
            Some(calories_from_distance(self.weight_kg, km, speed))
        } else {
            self.duration_minutes
                .map(|minutes| calories_from_duration(self.weight_kg, minutes, speed))
        }
    }
}

/// Calorie calculator output. All fields describe the same walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieCalculationResult {
    /// Whole kcal
    pub calories_burned: f64,
    /// Grams of fat, one decimal
    pub fat_burned_grams: f64,
    pub duration_minutes: f64,
    pub distance_km: f64,
    pub distance_miles: f64,
    pub steps: f64,
}

/// A food with roughly the same energy as the calories burned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodEquivalent {
    pub food: String,
    /// `"½"` or a one-decimal count such as `"2.7"`
    pub amount: String,
}

/// One row of the steps → calories reference table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepsCaloriesRow {
    pub steps: u32,
    pub calories: f64,
}

/// (food, kcal per unit) in display order
const FOOD_TABLE: [(&str, f64); 8] = [
    ("Banana", 89.0),
    ("Apple", 95.0),
    ("Slice of bread", 79.0),
    ("Egg", 78.0),
    ("Cup of rice", 206.0),
    ("Chocolate bar", 235.0),
    ("Slice of pizza", 285.0),
    ("Cheeseburger", 303.0),
];

pub fn calories_from_duration(weight_kg: f64, duration_minutes: f64, speed: WalkingSpeed) -> f64 {
    let duration_hours = duration_minutes / 60.0;
    speed.met() * weight_kg * duration_hours
}

pub fn calories_from_distance(weight_kg: f64, distance_km: f64, speed: WalkingSpeed) -> f64 {
    let duration_minutes = (distance_km / speed.speed_kmh()) * 60.0;
    calories_from_duration(weight_kg, duration_minutes, speed)
}

/// Per-step approximation, unrounded.
pub fn calories_from_steps(steps: f64, weight_kg: f64) -> f64 {
    let calories_per_step = CALORIES_PER_STEP_AT_DEFAULT_WEIGHT * (weight_kg / DEFAULT_WEIGHT_KG);
    steps * calories_per_step
}

pub fn estimate_steps_from_duration(duration_minutes: f64) -> f64 {
    round_half_up(duration_minutes * STEPS_PER_MINUTE)
}

pub fn estimate_duration_from_steps(steps: f64) -> f64 {
    round_half_up(steps / STEPS_PER_MINUTE)
}

pub fn estimate_distance_from_steps(steps: f64, step_length_cm: f64) -> f64 {
    (steps * step_length_cm) / CM_PER_KM
}

pub fn estimate_steps_from_distance(distance_km: f64, step_length_cm: f64) -> f64 {
    round_half_up((distance_km * CM_PER_KM) / step_length_cm)
}

/// Grams of body fat equivalent to `calories`.
pub fn fat_burned_grams(calories: f64) -> f64 {
    (calories / CALORIES_PER_KG_FAT) * 1000.0
}

fn fat_grams_display(calories: f64) -> f64 {
    round_to(fat_burned_grams(calories), 1)
}

pub fn calculate_from_steps(
    steps: f64,
    weight_kg: f64,
    step_length_cm: Option<f64>,
) -> CalorieCalculationResult {
    let step_length_cm = step_length_cm.unwrap_or(DEFAULT_STEP_LENGTH_CM);
    let calories = calories_from_steps(steps, weight_kg);
    let distance_km = estimate_distance_from_steps(steps, step_length_cm);

    CalorieCalculationResult {
        calories_burned: round_half_up(calories),
        fat_burned_grams: fat_grams_display(calories),
        duration_minutes: estimate_duration_from_steps(steps),
        distance_km,
        distance_miles: km_to_miles(distance_km),
        steps,
    }
}

pub fn calculate_from_distance(
    distance_km: f64,
    weight_kg: f64,
    speed: WalkingSpeed,
    step_length_cm: Option<f64>,
) -> CalorieCalculationResult {
    let step_length_cm = step_length_cm.unwrap_or(DEFAULT_STEP_LENGTH_CM);
    let calories = calories_from_distance(weight_kg, distance_km, speed);
    let duration_minutes = (distance_km / speed.speed_kmh()) * 60.0;

    CalorieCalculationResult {
        calories_burned: round_half_up(calories),
        fat_burned_grams: fat_grams_display(calories),
        duration_minutes: round_half_up(duration_minutes),
        distance_km,
        distance_miles: km_to_miles(distance_km),
        steps: estimate_steps_from_distance(distance_km, step_length_cm),
    }
}

pub fn calculate_from_duration(
    duration_minutes: f64,
    weight_kg: f64,
    speed: WalkingSpeed,
    step_length_cm: Option<f64>,
) -> CalorieCalculationResult {
    let step_length_cm = step_length_cm.unwrap_or(DEFAULT_STEP_LENGTH_CM);
    let calories = calories_from_duration(weight_kg, duration_minutes, speed);
    let distance_km = (duration_minutes / 60.0) * speed.speed_kmh();

    CalorieCalculationResult {
        calories_burned: round_half_up(calories),
        fat_burned_grams: fat_grams_display(calories),
        duration_minutes,
        distance_km,
        distance_miles: km_to_miles(distance_km),
        steps: estimate_steps_from_distance(distance_km, step_length_cm),
    }
}

/// Validate and run the calculator from whichever quantity was supplied.
pub fn calculate(input: &CalorieCalculationInput) -> CalcResult<CalorieCalculationResult> {
    input.validate()?;
    let speed = input.speed.unwrap_or_default();

    if let Some(steps) = input.steps {
        Ok(calculate_from_steps(steps, input.weight_kg, input.step_length_cm))
    } else if let Some(km) = input.distance_km {
        Ok(calculate_from_distance(km, input.weight_kg, speed, input.step_length_cm))
    } else if let Some(minutes) = input.duration_minutes {
        Ok(calculate_from_duration(minutes, input.weight_kg, speed, input.step_length_cm))
    } else {
        Err(CalcError::missing_field("steps"))
    }
}

/// Up to four foods matching `calories`, in table order.
pub fn food_equivalents(calories: f64) -> Vec<FoodEquivalent> {
    FOOD_TABLE
        .iter()
        .filter_map(|&(food, calories_per_unit)| {
            let amount = calories / calories_per_unit;
            if amount < 0.5 {
                return None;
            }
            let amount = if amount >= 1.0 {
                format!("{:.1}", round_to(amount, 1))
            } else {
                "½".to_string()
            };
            Some(FoodEquivalent {
                food: food.to_string(),
                amount,
            })
        })
        .take(FOOD_EQUIVALENT_LIMIT)
        .collect()
}

pub fn generate_steps_calories_table(weight_kg: f64) -> Vec<StepsCaloriesRow> {
    COMMON_STEP_COUNTS
        .iter()
        .map(|&steps| StepsCaloriesRow {
            steps,
            calories: round_half_up(calories_from_steps(steps as f64, weight_kg)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_met_table() {
        assert_eq!(WalkingSpeed::default(), WalkingSpeed::Normal);
        assert_eq!(WalkingSpeed::Brisk.met(), 4.5);
        assert_eq!(WalkingSpeed::Slow.speed_kmh(), 3.2);
    }

    #[test]
    fn test_ten_thousand_steps_is_400_kcal() {
        assert_eq!(calories_from_steps(10_000.0, 70.0), 400.0);
        let result = calculate_from_steps(10_000.0, 70.0, None);
        assert_eq!(result.calories_burned, 400.0);
        assert_eq!(result.duration_minutes, 100.0);
        assert!((result.distance_km - 7.5).abs() < 1e-9);
        // 400 / 7700 × 1000 = 51.948...
        assert_eq!(result.fat_burned_grams, 51.9);
    }

    #[test]
    fn test_steps_scale_with_weight() {
        assert!((calories_from_steps(10_000.0, 105.0) - 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_duration() {
        let result = calculate_from_duration(60.0, 70.0, WalkingSpeed::Normal, None);
        assert_eq!(result.calories_burned, 245.0);
        assert_eq!(result.distance_km, 5.0);
        assert_eq!(result.steps, 6667.0);
        assert_eq!(result.duration_minutes, 60.0);
    }

    #[test]
    fn test_from_distance_goes_through_speed() {
        // 6.4 km brisk = 60 minutes → 4.5 × 80 × 1 = 360
        let result = calculate_from_distance(6.4, 80.0, WalkingSpeed::Brisk, None);
        assert_eq!(result.calories_burned, 360.0);
        assert_eq!(result.duration_minutes, 60.0);
        assert_eq!(result.steps, 8533.0);
    }

    #[test]
    fn test_estimates() {
        assert_eq!(estimate_steps_from_duration(30.0), 3000.0);
        assert_eq!(estimate_duration_from_steps(2550.0), 26.0);
        assert_eq!(estimate_steps_from_distance(1.0, 75.0), 1333.0);
    }

    #[test]
    fn test_food_equivalents() {
        let foods = food_equivalents(400.0);
        assert_eq!(foods.len(), 4);
        assert_eq!(foods[0], FoodEquivalent { food: "Banana".into(), amount: "4.5".into() });
        assert_eq!(foods[3].food, "Egg");
    }

    #[test]
    fn test_food_equivalents_small_amounts() {
        // 50 kcal: ½ banana, ½ apple, ½ bread, ½ egg; nothing else reaches 0.5
        let foods = food_equivalents(50.0);
        assert_eq!(foods.len(), 4);
        assert!(foods.iter().all(|f| f.amount == "½"));

        // 120 kcal: rice qualifies at 0.58 but the first four foods take the slots
        let foods = food_equivalents(120.0);
        assert_eq!(foods.iter().map(|f| f.food.as_str()).collect::<Vec<_>>(),
            vec!["Banana", "Apple", "Slice of bread", "Egg"]);

        assert!(food_equivalents(30.0).is_empty());
    }

    #[test]
    fn test_unrounded_calories() {
        let input = CalorieCalculationInput {
            weight_kg: 70.0,
            duration_minutes: Some(60.0),
            distance_km: None,
            speed: None,
            steps: Some(1234.0),
            step_length_cm: None,
        };
        // steps win over duration, and the 49.36 kcal is kept unrounded
        assert!((input.unrounded_calories().unwrap() - 49.36).abs() < 1e-9);
        assert_eq!(calculate(&input).unwrap().calories_burned, 49.0);

        let none = CalorieCalculationInput { steps: None, duration_minutes: None, ..input };
        assert_eq!(none.unrounded_calories(), None);
    }

    #[test]
    fn test_food_amount_ties_round_up() {
        // 111.25 / 89 is exactly 1.25 bananas
        let foods = food_equivalents(111.25);
        assert_eq!(foods[0].food, "Banana");
        assert_eq!(foods[0].amount, "1.3");
    }

    #[test]
    fn test_steps_calories_table() {
        let table = generate_steps_calories_table(70.0);
        assert_eq!(table.len(), 7);
        assert_eq!(table[4], StepsCaloriesRow { steps: 10000, calories: 400.0 });
        assert_eq!(table[6].calories, 800.0);
    }

    #[test]
    fn test_calculate_dispatch() {
        let input = CalorieCalculationInput {
            weight_kg: 70.0,
            duration_minutes: Some(60.0),
            distance_km: None,
            speed: None,
            steps: None,
            step_length_cm: None,
        };
        assert_eq!(calculate(&input).unwrap().calories_burned, 245.0);

        let missing = CalorieCalculationInput { duration_minutes: None, ..input.clone() };
        assert_eq!(calculate(&missing).unwrap_err(), CalcError::missing_field("steps"));

        let light = CalorieCalculationInput { weight_kg: 0.0, ..input };
        assert!(calculate(&light).is_err());
    }

    #[test]
    fn test_input_json() {
        let input: CalorieCalculationInput =
            serde_json::from_str(r#"{"weight_kg": 70.0, "steps": 5000, "speed": "fast"}"#).unwrap();
        assert_eq!(input.speed, Some(WalkingSpeed::Fast));
        assert_eq!(calculate(&input).unwrap().calories_burned, 200.0);
    }
}
