//! Cross-calculator properties: round trips, partitions, monotonicity, and
//! purity under concurrent use.

use std::thread;

use proptest::prelude::*;
use proptest::sample::select;

use steps_core::calculations::bmi::{bmi_category, calculate_bmi, calculate_bmi_result, BmiCategory};
use steps_core::calculations::calorie::{calculate_from_duration, calories_from_steps, WalkingSpeed};
use steps_core::calculations::step_distance::{distance_to_steps, steps_to_distance};
use steps_core::calculations::step_goal::{
    calculate_step_goal, ActivityLevel, HealthGoal, StepGoalInput,
};
use steps_core::calculations::weight_loss::{calculate_weight_loss, WeightLossInput};
use steps_core::calculations::{CalculatorRequest, Gender, UserProfile};
use steps_core::units::{cm_to_feet_inches, feet_inches_to_cm, FeetInches, CM_PER_KM};

/// Lower bound of each category, in ascending order
const LOWER_BOUNDS: [(BmiCategory, f64); 6] = [
    (BmiCategory::Underweight, f64::NEG_INFINITY),
    (BmiCategory::Normal, 18.5),
    (BmiCategory::Overweight, 25.0),
    (BmiCategory::Obese1, 30.0),
    (BmiCategory::Obese2, 35.0),
    (BmiCategory::Obese3, 40.0),
];

fn categories_containing(bmi: f64) -> Vec<BmiCategory> {
    LOWER_BOUNDS
        .iter()
        .enumerate()
        .filter(|(i, (_, lower))| {
            let upper = LOWER_BOUNDS.get(i + 1).map(|(_, u)| *u).unwrap_or(f64::INFINITY);
            bmi >= *lower && bmi < upper
        })
        .map(|(_, (category, _))| *category)
        .collect()
}

#[test]
fn height_round_trips_for_whole_inches() {
    for feet in 0..=8u32 {
        for inches in 0..=11u32 {
            let cm = feet_inches_to_cm(feet as f64, inches as f64);
            let expected = FeetInches::new(feet, inches);
            assert_eq!(cm_to_feet_inches(cm), expected, "{}'{}\"", feet, inches);
        }
    }
}

#[test]
fn bmi_boundaries_belong_to_higher_category() {
    for (category, lower) in LOWER_BOUNDS.iter().skip(1) {
        assert_eq!(bmi_category(*lower), *category);
    }
}

#[test]
fn published_reference_values() {
    let bmi = calculate_bmi_result(70.0, 175.0);
    assert_eq!(bmi.bmi, 22.9);
    assert_eq!(bmi.category, BmiCategory::Normal);

    assert_eq!(calories_from_steps(10_000.0, 70.0), 400.0);
    let hour_walk = calculate_from_duration(60.0, 70.0, WalkingSpeed::Normal, None);
    assert_eq!(hour_walk.calories_burned, 245.0);
}

#[test]
fn crash_diet_is_flagged() {
    let result = calculate_weight_loss(&WeightLossInput {
        current_weight_kg: 80.0,
        target_weight_kg: 60.0,
        timeframe_days: 30,
        days_per_week: 7,
    });
    assert!(!result.is_safe);
    assert!(result.safety_warning.is_some());
}

#[test]
fn calculators_are_pure_across_threads() {
    let requests: Vec<CalculatorRequest> = [
        r#"{"calculator": "bmi", "weight_kg": 82.3, "height_cm": 181.0}"#,
        r#"{"calculator": "calorie", "weight_kg": 64.0, "distance_km": 7.3, "speed": "brisk"}"#,
        r#"{
            "calculator": "step_distance",
            "profile": {"gender": "female", "age": 52, "height_cm": 163.0},
            "steps": 8421
        }"#,
        r#"{
            "calculator": "step_goal",
            "age": 70,
            "gender": "male",
            "activity_level": "active",
            "health_goal": "lose_weight",
            "current_steps": 9100
        }"#,
        r#"{
            "calculator": "weight_loss",
            "current_weight_kg": 95.0,
            "target_weight_kg": 82.0,
            "timeframe_days": 180,
            "days_per_week": 4
        }"#,
    ]
    .iter()
    .map(|json| serde_json::from_str(json).unwrap())
    .collect();

    let expected: Vec<_> = requests.iter().map(|r| r.evaluate().unwrap()).collect();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let requests = requests.clone();
            thread::spawn(move || {
                requests.iter().map(|r| r.evaluate().unwrap()).collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn zero_current_steps_is_not_the_low_end() {
    // Some(0) means "not tracked": it falls back to the typical count for the
    // activity level, so it can yield a higher goal than Some(1).
    let goal = |current_steps| {
        calculate_step_goal(&StepGoalInput {
            age: 30,
            gender: Gender::Female,
            activity_level: ActivityLevel::VeryActive,
            health_goal: HealthGoal::Maintain,
            current_steps,
        })
        .daily_goal
    };
    assert_eq!(goal(Some(0)), 13_000);
    assert_eq!(goal(None), 13_000);
    assert_eq!(goal(Some(1)), 11_000);
    assert!(goal(Some(0)) > goal(Some(1)));
}

proptest! {
    #[test]
    fn distance_steps_inverse(distance_km in 0.0f64..100.0, step_length_cm in 30.0f64..120.0) {
        let steps = distance_to_steps(distance_km, step_length_cm);
        let back = steps_to_distance(steps, step_length_cm).km;
        // integer steps lose at most half a stride
        prop_assert!((back - distance_km).abs() <= 0.5 * step_length_cm / CM_PER_KM + 1e-9);
    }

    #[test]
    fn bmi_categories_partition(bmi in 0.0f64..100.0) {
        let containing = categories_containing(bmi);
        prop_assert_eq!(containing.len(), 1);
        prop_assert_eq!(containing[0], bmi_category(bmi));
    }

    #[test]
    fn healthy_range_depends_only_on_height(
        height_cm in 100.0f64..220.0,
        a in 30.0f64..200.0,
        b in 30.0f64..200.0,
    ) {
        let first = calculate_bmi_result(a, height_cm);
        let second = calculate_bmi_result(b, height_cm);
        prop_assert_eq!(first.healthy_weight_range, second.healthy_weight_range);
        prop_assert_eq!(first.category, bmi_category(calculate_bmi(a, height_cm)));
    }

    #[test]
    fn step_goal_monotonic_in_current_steps(
        age in 1u32..=120,
        activity_level in select(ActivityLevel::ALL.to_vec()),
        health_goal in select(HealthGoal::ALL.to_vec()),
        // from 1: zero is the untracked case covered above
        low in 1u32..30_000,
        extra in 0u32..10_000,
    ) {
        let make = |current_steps| StepGoalInput {
            age,
            gender: Gender::Female,
            activity_level,
            health_goal,
            current_steps: Some(current_steps),
        };
        let lower = calculate_step_goal(&make(low));
        let higher = calculate_step_goal(&make(low + extra));
        prop_assert!(lower.daily_goal <= higher.daily_goal);
    }

    #[test]
    fn step_goal_shape(
        age in 1u32..=120,
        activity_level in select(ActivityLevel::ALL.to_vec()),
        health_goal in select(HealthGoal::ALL.to_vec()),
        current in proptest::option::of(0u32..40_000),
    ) {
        let result = calculate_step_goal(&StepGoalInput {
            age,
            gender: Gender::Male,
            activity_level,
            health_goal,
            current_steps: current,
        });
        prop_assert_eq!(result.daily_goal % 500, 0);
        prop_assert!(result.daily_goal <= 20_000);
        prop_assert_eq!(result.weekly_goal, result.daily_goal * 7);
        prop_assert_eq!(result.milestones.len(), 8);
        prop_assert!(result.tips.len() <= 5);
    }

    #[test]
    fn weight_loss_milestones_bounded(
        current in 40.0f64..150.0,
        target in 40.0f64..150.0,
        days in 1u32..=730,
        per_week in 1u32..=7,
    ) {
        let result = calculate_weight_loss(&WeightLossInput {
            current_weight_kg: current,
            target_weight_kg: target,
            timeframe_days: days,
            days_per_week: per_week,
        });
        prop_assert!(result.total_weight_to_lose >= 0.0);
        prop_assert!(!result.milestones.is_empty());
        prop_assert!(result.milestones.len() <= 12);
        let final_week = ((days as f64 / 7.0) + 0.5).floor() as u32;
        prop_assert_eq!(result.milestones.last().map(|m| m.week), Some(final_week));
        prop_assert_eq!(result.is_safe, result.safety_warning.is_none());
    }

    #[test]
    fn repeated_calls_are_identical(
        height_cm in 100.0f64..220.0,
        age in 1u32..=120,
        steps in 0.0f64..50_000.0,
    ) {
        let profile = UserProfile { gender: Gender::Male, age, height_cm };
        let first = steps_core::calculations::step_distance::calculate_from_steps(steps, &profile);
        let second = steps_core::calculations::step_distance::calculate_from_steps(steps, &profile);
        prop_assert_eq!(first.distance_km.to_bits(), second.distance_km.to_bits());
        prop_assert_eq!(first, second);
    }
}
