//! # Weight Loss Walking Plan
//!
//! How far and how long to walk each day to reach a target weight in a given
//! timeframe, with a safety check and a milestone projection.
//!
//! ## Method
//!
//! - 1 kg of fat ≈ 7,700 kcal
//! - The total is spread over the walking days in the timeframe
//! - Walking burns ~0.8 kcal per kg of body weight per km
//! - 1,320 steps per km, 5 km/h
//!
//! A plan is flagged unsafe above 1 kg/week or a 1,000 kcal daily deficit.
//!
//! ## Example
//!
//! ```rust
//! use steps_core::calculations::weight_loss::{calculate_weight_loss, WeightLossInput};
//!
//! let result = calculate_weight_loss(&WeightLossInput {
//!     current_weight_kg: 80.0,
//!     target_weight_kg: 75.0,
//!     timeframe_days: 90,
//!     days_per_week: 5,
//! });
//! assert!(result.is_safe);
//! assert_eq!(result.total_calories_to_burn, 38_500.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{km_to_miles, round_half_up, round_to};

pub const CALORIES_PER_KG_FAT: f64 = 7700.0;
pub const MAX_SAFE_WEEKLY_LOSS_KG: f64 = 1.0;
pub const MAX_SAFE_DAILY_DEFICIT: f64 = 1000.0;
pub const AVERAGE_WALKING_SPEED_KMH: f64 = 5.0;
pub const STEPS_PER_KM: f64 = 1320.0;

const CALORIES_PER_KM_PER_KG: f64 = 0.8;
const RECOMMENDED_WEEKLY_LOSS_KG: f64 = 0.5;
const GRADUAL_WEEKLY_LOSS_KG: f64 = 0.25;
const MAX_MILESTONES: usize = 12;

/// Preset timeframes offered by the plan form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeframeOption {
    #[serde(rename = "1_month")]
    OneMonth,
    #[serde(rename = "2_months")]
    TwoMonths,
    #[serde(rename = "3_months")]
    ThreeMonths,
    #[serde(rename = "6_months")]
    SixMonths,
    #[serde(rename = "1_year")]
    OneYear,
}

impl TimeframeOption {
    pub const ALL: [TimeframeOption; 5] = [
        TimeframeOption::OneMonth,
        TimeframeOption::TwoMonths,
        TimeframeOption::ThreeMonths,
        TimeframeOption::SixMonths,
        TimeframeOption::OneYear,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TimeframeOption::OneMonth => "1 Month",
            TimeframeOption::TwoMonths => "2 Months",
            TimeframeOption::ThreeMonths => "3 Months",
            TimeframeOption::SixMonths => "6 Months",
            TimeframeOption::OneYear => "1 Year",
        }
    }

    pub fn days(self) -> u32 {
        match self {
            TimeframeOption::OneMonth => 30,
            TimeframeOption::TwoMonths => 60,
            TimeframeOption::ThreeMonths => 90,
            TimeframeOption::SixMonths => 180,
            TimeframeOption::OneYear => 365,
        }
    }
}

/// Input for the weight loss calculator.
///
/// ## JSON Example
///
/// ```json
/// {
///   "current_weight_kg": 85.0,
///   "target_weight_kg": 78.0,
///   "timeframe_days": 90,
///   "days_per_week": 5
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightLossInput {
    pub current_weight_kg: f64,
    pub target_weight_kg: f64,
    pub timeframe_days: u32,
    pub days_per_week: u32,
}

impl WeightLossInput {
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.current_weight_kg >= 1.0) {
            return Err(CalcError::invalid_input(
                "current_weight_kg",
                self.current_weight_kg.to_string(),
                "Weight must be at least 1 kg",
            ));
        }
        if !(self.target_weight_kg >= 1.0) {
            return Err(CalcError::invalid_input(
                "target_weight_kg",
                self.target_weight_kg.to_string(),
                "Target weight must be at least 1 kg",
            ));
        }
        if self.timeframe_days == 0 {
            return Err(CalcError::invalid_input(
                "timeframe_days",
                self.timeframe_days.to_string(),
                "Timeframe must be at least one day",
            ));
        }
        if !(1..=7).contains(&self.days_per_week) {
            return Err(CalcError::invalid_input(
                "days_per_week",
                self.days_per_week.to_string(),
                "Days per week must be between 1 and 7",
            ));
        }
        Ok(())
    }
}

/// Projected weight at the end of a week
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightMilestone {
    pub week: u32,
    pub expected_weight: f64,
}

/// Results from the weight loss calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightLossResult {
    pub total_weight_to_lose: f64,
    pub total_calories_to_burn: f64,
    pub daily_calorie_deficit: f64,
    pub walking_daily_km: f64,
    pub walking_daily_miles: f64,
    pub walking_daily_steps: f64,
    pub walking_daily_minutes: f64,
    pub weekly_km: f64,
    pub weekly_steps: f64,
    pub is_safe: bool,
    pub safety_warning: Option<String>,
    pub milestones: Vec<WeightMilestone>,
}

/// Weeks needed at the fastest safe, recommended and most gradual rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealisticTimeframe {
    pub min_weeks: u32,
    pub max_weeks: u32,
    pub recommended_weeks: u32,
}

fn calories_per_km(weight_kg: f64) -> f64 {
    weight_kg * CALORIES_PER_KM_PER_KG
}

/// Linear projection sampled every `max(1, weeks / 12)` weeks.
///
/// The final week is always the last entry, also when the list has to be
/// shortened to twelve.
fn generate_milestones(
    current_weight: f64,
    target_weight: f64,
    total_weeks: u32,
) -> Vec<WeightMilestone> {
    let weekly_loss = (current_weight - target_weight) / total_weeks as f64;
    let interval = (total_weeks / MAX_MILESTONES as u32).max(1);

    let mut milestones: Vec<WeightMilestone> = (1..=total_weeks / interval)
        .map(|i| {
            let week = i * interval;
            WeightMilestone {
                week,
                expected_weight: round_to(current_weight - weekly_loss * week as f64, 1),
            }
        })
        .collect();

    if milestones.last().map(|m| m.week) != Some(total_weeks) {
        milestones.push(WeightMilestone {
            week: total_weeks,
            expected_weight: round_to(target_weight, 1),
        });
    }

    if milestones.len() > MAX_MILESTONES {
        if let Some(last) = milestones.pop() {
            milestones.truncate(MAX_MILESTONES - 1);
            milestones.push(last);
        }
    }

    milestones
}

fn safety_warning(weekly_weight_loss: f64, daily_deficit: f64) -> Option<String> {
    if weekly_weight_loss > MAX_SAFE_WEEKLY_LOSS_KG {
        Some(format!(
            "This plan requires losing more than {} kg per week. Consider extending your timeframe for safer, more sustainable results.",
            MAX_SAFE_WEEKLY_LOSS_KG
        ))
    } else if daily_deficit > MAX_SAFE_DAILY_DEFICIT {
        Some(format!(
            "This plan requires a daily calorie deficit of {} kcal, which exceeds the recommended {} kcal. Consider a longer timeframe.",
            round_half_up(daily_deficit),
            MAX_SAFE_DAILY_DEFICIT
        ))
    } else {
        None
    }
}

pub fn calculate_weight_loss(input: &WeightLossInput) -> WeightLossResult {
    let days_per_week = input.days_per_week as f64;
    let total_weight_to_lose = (input.current_weight_kg - input.target_weight_kg).max(0.0);
    let total_calories_to_burn = total_weight_to_lose * CALORIES_PER_KG_FAT;

    let total_weeks = input.timeframe_days as f64 / 7.0;
    let total_walking_days = round_half_up(total_weeks * days_per_week);

    let daily_calorie_deficit = if total_walking_days > 0.0 {
        total_calories_to_burn / total_walking_days
    } else {
        0.0
    };

    let walking_daily_km = daily_calorie_deficit / calories_per_km(input.current_weight_kg);
    let walking_daily_miles = km_to_miles(walking_daily_km);
    let walking_daily_steps = round_half_up(walking_daily_km * STEPS_PER_KM);
    let walking_daily_minutes =
        round_half_up((walking_daily_km / AVERAGE_WALKING_SPEED_KMH) * 60.0);

    let weekly_km = walking_daily_km * days_per_week;
    let weekly_steps = walking_daily_steps * days_per_week;

    // A zero-day timeframe can only be met if there is nothing to lose
    let weekly_weight_loss = if total_weeks > 0.0 {
        total_weight_to_lose / total_weeks
    } else if total_weight_to_lose > 0.0 {
        f64::INFINITY
    } else {
        0.0
    };

    let warning = safety_warning(weekly_weight_loss, daily_calorie_deficit);

    WeightLossResult {
        total_weight_to_lose: round_to(total_weight_to_lose, 1),
        total_calories_to_burn: round_half_up(total_calories_to_burn),
        daily_calorie_deficit: round_half_up(daily_calorie_deficit),
        walking_daily_km: round_to(walking_daily_km, 1),
        walking_daily_miles: round_to(walking_daily_miles, 1),
        walking_daily_steps,
        walking_daily_minutes,
        weekly_km: round_to(weekly_km, 1),
        weekly_steps: round_half_up(weekly_steps),
        is_safe: warning.is_none(),
        safety_warning: warning,
        milestones: generate_milestones(
            input.current_weight_kg,
            input.target_weight_kg,
            round_half_up(total_weeks) as u32,
        ),
    }
}

/// Validate and run the calculator.
pub fn calculate(input: &WeightLossInput) -> CalcResult<WeightLossResult> {
    input.validate()?;
    Ok(calculate_weight_loss(input))
}

/// How many weeks losing `weight_to_lose_kg` should take.
pub fn realistic_timeframe(weight_to_lose_kg: f64) -> RealisticTimeframe {
    let weeks_at = |rate: f64| (weight_to_lose_kg / rate).ceil().max(0.0) as u32;
    RealisticTimeframe {
        min_weeks: weeks_at(MAX_SAFE_WEEKLY_LOSS_KG),
        max_weeks: weeks_at(GRADUAL_WEEKLY_LOSS_KG),
        recommended_weeks: weeks_at(RECOMMENDED_WEEKLY_LOSS_KG),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(current: f64, target: f64, days: u32, per_week: u32) -> WeightLossInput {
        WeightLossInput {
            current_weight_kg: current,
            target_weight_kg: target,
            timeframe_days: days,
            days_per_week: per_week,
        }
    }

    #[test]
    fn test_crash_plan_is_unsafe() {
        let result = calculate_weight_loss(&plan(80.0, 60.0, 30, 7));
        assert!(!result.is_safe);
        let warning = result.safety_warning.unwrap();
        assert!(warning.starts_with("This plan requires losing more than 1 kg per week."));
        assert_eq!(result.total_weight_to_lose, 20.0);
        assert_eq!(result.total_calories_to_burn, 154_000.0);
        // 154,000 / 30 walking days
        assert_eq!(result.daily_calorie_deficit, 5133.0);
    }

    #[test]
    fn test_moderate_plan() {
        // 5 kg over 90 days, 5 days a week: 64 walking days
        let result = calculate_weight_loss(&plan(80.0, 75.0, 90, 5));
        assert!(result.is_safe);
        assert!(result.safety_warning.is_none());
        assert_eq!(result.daily_calorie_deficit, 602.0);
        // 601.5625 / 64 kcal per km = 9.399 km
        assert_eq!(result.walking_daily_km, 9.4);
        assert_eq!(result.walking_daily_steps, 12_407.0);
        assert_eq!(result.walking_daily_minutes, 113.0);
        assert_eq!(result.weekly_steps, 62_035.0);
        assert_eq!(result.walking_daily_miles, 5.8);
    }

    #[test]
    fn test_deficit_warning_when_weekly_rate_ok() {
        // 4 kg in 28 days walking twice a week: 1 kg/week exactly but 3,850 kcal per walk
        let result = calculate_weight_loss(&plan(90.0, 86.0, 28, 2));
        assert!(!result.is_safe);
        let warning = result.safety_warning.unwrap();
        assert_eq!(
            warning,
            "This plan requires a daily calorie deficit of 3850 kcal, which exceeds the recommended 1000 kcal. Consider a longer timeframe."
        );
    }

    #[test]
    fn test_target_above_current() {
        let result = calculate_weight_loss(&plan(60.0, 65.0, 60, 3));
        assert_eq!(result.total_weight_to_lose, 0.0);
        assert_eq!(result.daily_calorie_deficit, 0.0);
        assert_eq!(result.walking_daily_steps, 0.0);
        assert!(result.is_safe);
    }

    #[test]
    fn test_short_milestones() {
        let result = calculate_weight_loss(&plan(80.0, 60.0, 30, 7));
        let weights: Vec<f64> = result.milestones.iter().map(|m| m.expected_weight).collect();
        assert_eq!(weights, vec![75.0, 70.0, 65.0, 60.0]);
    }

    #[test]
    fn test_long_milestones_keep_final_week() {
        // 365 days → 52 weeks, every 4 weeks: 13 samples shortened to 12
        let result = calculate_weight_loss(&plan(100.0, 74.0, 365, 5));
        assert_eq!(result.milestones.len(), 12);
        let last = result.milestones.last().unwrap();
        assert_eq!(last.week, 52);
        assert_eq!(last.expected_weight, 74.0);
        assert_eq!(result.milestones[0].week, 4);
        assert_eq!(result.milestones[0].expected_weight, 98.0);
    }

    #[test]
    fn test_uneven_interval_appends_final_week() {
        // 180 days → 26 weeks, interval 2 → 13 samples ending at 26
        let milestones = generate_milestones(90.0, 80.0, 26);
        assert_eq!(milestones.len(), 12);
        assert_eq!(milestones.last().unwrap().week, 26);

        // 30 weeks, interval 2 → 15 samples → 11 + final
        let milestones = generate_milestones(90.0, 80.0, 30);
        assert_eq!(milestones.len(), 12);
        assert_eq!(milestones[10].week, 22);
        assert_eq!(milestones[11].week, 30);
    }

    #[test]
    fn test_realistic_timeframe() {
        let t = realistic_timeframe(5.0);
        assert_eq!(t, RealisticTimeframe { min_weeks: 5, max_weeks: 20, recommended_weeks: 10 });
        assert_eq!(realistic_timeframe(4.1).min_weeks, 5);
    }

    #[test]
    fn test_timeframe_options() {
        assert_eq!(TimeframeOption::ThreeMonths.days(), 90);
        assert_eq!(TimeframeOption::OneYear.label(), "1 Year");
        assert_eq!(serde_json::to_string(&TimeframeOption::SixMonths).unwrap(), "\"6_months\"");
    }

    #[test]
    fn test_validation() {
        assert!(calculate(&plan(80.0, 70.0, 0, 5)).is_err());
        assert!(calculate(&plan(80.0, 70.0, 30, 8)).is_err());
        assert!(calculate(&plan(80.0, 70.0, 30, 5)).is_ok());
    }
}
