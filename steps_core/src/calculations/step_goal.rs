//! # Daily Step Goal
//!
//! Personalized daily step target from age, current activity level and
//! health goal, with an eight-week ramp-up plan and walking tips.
//!
//! ## Method
//!
//! 1. Start at the midpoint of the age band's recommended range
//! 2. Add the health goal's adjustment
//! 3. Raise to at least current steps + 1000
//! 4. Cap at 20,000 and round to the nearest 500
//!
//! Distance and calories use a flat 75 cm stride and 0.04 kcal/step, not the
//! visitor's own profile.
//!
//! ## Example
//!
//! ```rust
//! use steps_core::calculations::step_distance::Gender;
//! use steps_core::calculations::step_goal::{
//!     calculate_step_goal, ActivityLevel, HealthGoal, StepGoalInput,
//! };
//!
//! let input = StepGoalInput {
//!     age: 35,
//!     gender: Gender::Female,
//!     activity_level: ActivityLevel::Sedentary,
//!     health_goal: HealthGoal::LoseWeight,
//!     current_steps: None,
//! };
//! let result = calculate_step_goal(&input);
//! assert_eq!(result.daily_goal, 13_000);
//! assert_eq!(result.milestones.len(), 8);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{round_half_up, round_to, round_to_multiple, CM_PER_KM};

use super::step_distance::Gender;

const MAX_DAILY_GOAL: u32 = 20_000;
const GOAL_ROUNDING: f64 = 500.0;
const MIN_INCREASE_OVER_CURRENT: u32 = 1_000;
const AVERAGE_STEP_LENGTH_CM: f64 = 75.0;
const CALORIES_PER_STEP: f64 = 0.04;
const WEEKS_TO_GOAL: u32 = 8;
const MAX_TIPS: usize = 5;

/// How much the visitor walks today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    Active,
    VeryActive,
}

/// What the visitor wants from walking more
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthGoal {
    Maintain,
    LoseWeight,
    ImproveFitness,
    TrainEvent,
}

/// Display information for an activity level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityLevelInfo {
    pub label: &'static str,
    pub description: &'static str,
    pub steps_range: &'static str,
    pub typical_steps: u32,
}

/// Display information for a health goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthGoalInfo {
    pub label: &'static str,
    pub description: &'static str,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 4] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    pub fn info(self) -> ActivityLevelInfo {
        match self {
            ActivityLevel::Sedentary => ActivityLevelInfo {
                label: "Sedentary",
                description: "Desk job, minimal movement",
                steps_range: "< 5,000",
                typical_steps: 3_500,
            },
            ActivityLevel::LightlyActive => ActivityLevelInfo {
                label: "Lightly Active",
                description: "Some walking, light activity",
                steps_range: "5,000 - 7,499",
                typical_steps: 6_000,
            },
            ActivityLevel::Active => ActivityLevelInfo {
                label: "Active",
                description: "Regular movement throughout day",
                steps_range: "7,500 - 9,999",
                typical_steps: 8_500,
            },
            ActivityLevel::VeryActive => ActivityLevelInfo {
                label: "Very Active",
                description: "Active job or lifestyle",
                steps_range: "10,000+",
                typical_steps: 12_000,
            },
        }
    }

    pub fn typical_steps(self) -> u32 {
        self.info().typical_steps
    }

    fn tips(self) -> &'static [&'static str] {
        match self {
            ActivityLevel::Sedentary => &[
                "Start with a 10-minute walk during lunch break",
                "Take the stairs instead of the elevator",
                "Park farther away from entrances",
            ],
            ActivityLevel::LightlyActive => &[
                "Add a 15-minute morning walk to your routine",
                "Walk while taking phone calls",
            ],
            ActivityLevel::Active | ActivityLevel::VeryActive => &[],
        }
    }
}

impl HealthGoal {
    pub const ALL: [HealthGoal; 4] = [
        HealthGoal::Maintain,
        HealthGoal::LoseWeight,
        HealthGoal::ImproveFitness,
        HealthGoal::TrainEvent,
    ];

    pub fn info(self) -> HealthGoalInfo {
        let (label, description) = match self {
            HealthGoal::Maintain => {
                ("Maintain Health", "Stay healthy and maintain current fitness")
            }
            HealthGoal::LoseWeight => ("Lose Weight", "Burn extra calories for weight loss"),
            HealthGoal::ImproveFitness => {
                ("Improve Fitness", "Increase endurance and overall fitness")
            }
            HealthGoal::TrainEvent => ("Train for Event", "Prepare for a walking/running event"),
        };
        HealthGoalInfo { label, description }
    }

    /// Steps added on top of the age-based starting point
    pub fn adjustment(self) -> u32 {
        match self {
            HealthGoal::Maintain => 0,
            HealthGoal::LoseWeight => 2_000,
            HealthGoal::ImproveFitness => 3_000,
            HealthGoal::TrainEvent => 4_000,
        }
    }

    fn tips(self) -> &'static [&'static str] {
        match self {
            HealthGoal::Maintain => &[],
            HealthGoal::LoseWeight => &[
                "Combine walking with a balanced diet for best results",
                "Try to maintain a brisk pace to maximize calorie burn",
            ],
            HealthGoal::ImproveFitness => &[
                "Gradually increase your pace over time",
                "Include some incline walking or stairs",
            ],
            HealthGoal::TrainEvent => &[
                "Follow a progressive training plan",
                "Include rest days for recovery",
            ],
        }
    }
}

const GENERAL_TIPS: [&str; 2] = [
    "Track your steps daily to stay motivated",
    "Find a walking buddy for accountability",
];

/// Input for the step goal calculator.
///
/// ## JSON Example
///
/// ```json
/// {
///   "age": 35,
///   "gender": "female",
///   "activity_level": "lightly_active",
///   "health_goal": "improve_fitness",
///   "current_steps": 6500
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepGoalInput {
    pub age: u32,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    pub health_goal: HealthGoal,
    /// Today's average; `None` or 0 falls back to the activity level's typical steps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_steps: Option<u32>,
}

impl StepGoalInput {
    pub fn validate(&self) -> CalcResult<()> {
        if self.age == 0 || self.age > 120 {
            return Err(CalcError::invalid_input(
                "age",
                self.age.to_string(),
                "Age must be between 1 and 120",
            ));
        }
        Ok(())
    }

    /// Current steps, or the activity level's typical count when unknown.
    pub fn estimated_current_steps(&self) -> u32 {
        match self.current_steps {
            Some(steps) if steps > 0 => steps,
            _ => self.activity_level.typical_steps(),
        }
    }
}

/// Target for one week of the ramp-up plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepMilestone {
    pub week: u32,
    pub steps: u32,
}

/// Results from the step goal calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepGoalResult {
    /// Multiple of 500, at most 20,000
    pub daily_goal: u32,
    pub weekly_goal: u32,
    /// One decimal, flat 75 cm stride
    pub distance_per_day_km: f64,
    pub calories_per_day: f64,
    pub tips: Vec<String>,
    pub milestones: Vec<StepMilestone>,
}

/// Recommended (min, max) daily steps for an age.
fn base_range_for_age(age: u32) -> (u32, u32) {
    if age < 18 {
        (12_000, 15_000)
    } else if age <= 64 {
        (10_000, 12_000)
    } else {
        (7_000, 10_000)
    }
}

fn generate_tips(activity_level: ActivityLevel, health_goal: HealthGoal) -> Vec<String> {
    activity_level
        .tips()
        .iter()
        .chain(health_goal.tips())
        .chain(GENERAL_TIPS.iter())
        .take(MAX_TIPS)
        .map(|tip| tip.to_string())
        .collect()
}

/// Eight weekly targets easing out from `current` to `target`.
fn generate_milestones(current: u32, target: u32) -> Vec<StepMilestone> {
    let difference = target as f64 - current as f64;

    (1..=WEEKS_TO_GOAL)
        .map(|week| {
            let progress = week as f64 / WEEKS_TO_GOAL as f64;
            let eased = 1.0 - (1.0 - progress).powi(2);
            let week_steps = round_half_up(current as f64 + difference * eased);
            StepMilestone {
                week,
                steps: round_to_multiple(week_steps, GOAL_ROUNDING) as u32,
            }
        })
        .collect()
}

pub fn calculate_step_goal(input: &StepGoalInput) -> StepGoalResult {
    let (min, max) = base_range_for_age(input.age);
    let mut daily_goal = round_half_up((min + max) as f64 / 2.0) as u32;
    daily_goal += input.health_goal.adjustment();

    let current = input.estimated_current_steps();
    let floor = current.saturating_add(MIN_INCREASE_OVER_CURRENT);
    if daily_goal < floor {
        daily_goal = floor;
    }

    daily_goal = daily_goal.min(MAX_DAILY_GOAL);
    let daily_goal = round_to_multiple(daily_goal as f64, GOAL_ROUNDING) as u32;

    let distance_per_day_km = (daily_goal as f64 * AVERAGE_STEP_LENGTH_CM) / CM_PER_KM;

    StepGoalResult {
        daily_goal,
        weekly_goal: daily_goal * 7,
        distance_per_day_km: round_to(distance_per_day_km, 1),
        calories_per_day: round_half_up(daily_goal as f64 * CALORIES_PER_STEP),
        tips: generate_tips(input.activity_level, input.health_goal),
        milestones: generate_milestones(current, daily_goal),
    }
}

/// Validate and run the calculator.
pub fn calculate(input: &StepGoalInput) -> CalcResult<StepGoalResult> {
    input.validate()?;
    Ok(calculate_step_goal(input))
}

/// Activity level implied by a daily step count.
pub fn activity_level_from_steps(steps: u32) -> ActivityLevel {
    if steps < 5_000 {
        ActivityLevel::Sedentary
    } else if steps < 7_500 {
        ActivityLevel::LightlyActive
    } else if steps < 10_000 {
        ActivityLevel::Active
    } else {
        ActivityLevel::VeryActive
    }
}
