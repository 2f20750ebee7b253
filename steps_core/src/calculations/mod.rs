//! # Walking Calculators
//!
//! Each calculator follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable) with `validate()`
//! - `*Result` - Calculation results (JSON-serializable)
//! - Free functions with the raw formulas, infallible on validated input
//! - `calculate(input) -> CalcResult<*Result>` - validate, then compute
//!
//! The calculators are independent: the step/distance, calorie, step goal and
//! weight loss pages each keep their own stride and calorie constants.
//!
//! ## Available Calculators
//!
//! - [`step_distance`] - Steps ⇄ distance from height, gender and age
//! - [`calorie`] - MET and per-step calorie burn, food equivalents
//! - [`bmi`] - BMI, WHO category, healthy weight range
//! - [`step_goal`] - Daily step goal and eight-week ramp-up
//! - [`weight_loss`] - Walking plan for a target weight

pub mod bmi;
pub mod calorie;
pub mod step_distance;
pub mod step_goal;
pub mod weight_loss;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;

// Re-export commonly used types
pub use bmi::{BmiCategory, BmiInput, BmiResult};
pub use calorie::{CalorieCalculationInput, CalorieCalculationResult, WalkingSpeed};
pub use step_distance::{Gender, StepDistanceInput, StepDistanceResult, UserProfile};
pub use step_goal::{ActivityLevel, HealthGoal, StepGoalInput, StepGoalResult};
pub use weight_loss::{WeightLossInput, WeightLossResult};

/// A request for any calculator.
///
/// ## JSON Example
///
/// ```json
/// { "calculator": "bmi", "weight_kg": 70.0, "height_cm": 175.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculatorRequest {
    StepDistance(StepDistanceInput),
    Calorie(CalorieCalculationInput),
    Bmi(BmiInput),
    StepGoal(StepGoalInput),
    WeightLoss(WeightLossInput),
}

/// The matching result for a [`CalculatorRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculatorResponse {
    StepDistance(StepDistanceResult),
    Calorie(CalorieCalculationResult),
    Bmi(BmiResult),
    StepGoal(StepGoalResult),
    WeightLoss(WeightLossResult),
}

impl CalculatorRequest {
    /// Get the calculator name as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculatorRequest::StepDistance(_) => "step_distance",
            CalculatorRequest::Calorie(_) => "calorie",
            CalculatorRequest::Bmi(_) => "bmi",
            CalculatorRequest::StepGoal(_) => "step_goal",
            CalculatorRequest::WeightLoss(_) => "weight_loss",
        }
    }

    /// Validate the input and run the calculator.
    pub fn evaluate(&self) -> CalcResult<CalculatorResponse> {
        tracing::debug!(calculator = self.calc_type(), "evaluating request");
        let response = match self {
            CalculatorRequest::StepDistance(input) => {
                CalculatorResponse::StepDistance(step_distance::calculate(input)?)
            }
            CalculatorRequest::Calorie(input) => {
                CalculatorResponse::Calorie(calorie::calculate(input)?)
            }
            CalculatorRequest::Bmi(input) => CalculatorResponse::Bmi(bmi::calculate(input)?),
            CalculatorRequest::StepGoal(input) => {
                CalculatorResponse::StepGoal(step_goal::calculate(input)?)
            }
            CalculatorRequest::WeightLoss(input) => {
                CalculatorResponse::WeightLoss(weight_loss::calculate(input)?)
            }
        };
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_request_from_json() {
        let json = r#"{"calculator": "bmi", "weight_kg": 70.0, "height_cm": 175.0}"#;
        let request: CalculatorRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.calc_type(), "bmi");

        match request.evaluate().unwrap() {
            CalculatorResponse::Bmi(result) => assert_eq!(result.bmi, 22.9),
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[test]
    fn test_response_is_tagged() {
        let request = CalculatorRequest::Calorie(CalorieCalculationInput {
            weight_kg: 70.0,
            duration_minutes: None,
            distance_km: None,
            speed: None,
            steps: Some(10_000.0),
            step_length_cm: None,
        });
        let json = serde_json::to_value(request.evaluate().unwrap()).unwrap();
        assert_eq!(json["calculator"], "calorie");
        assert_eq!(json["calories_burned"], 400.0);
    }

    #[test]
    fn test_step_distance_request() {
        let request: CalculatorRequest = serde_json::from_str(
            r#"{
                "calculator": "step_distance",
                "profile": {"gender": "male", "age": 30, "height_cm": 180.0},
                "distance_km": 5.0
            }"#,
        )
        .unwrap();
        match request.evaluate().unwrap() {
            CalculatorResponse::StepDistance(result) => {
                assert_eq!(result.walking_time_minutes, 60.0)
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_request_propagates_error() {
        let request = CalculatorRequest::WeightLoss(WeightLossInput {
            current_weight_kg: 80.0,
            target_weight_kg: 70.0,
            timeframe_days: 30,
            days_per_week: 0,
        });
        assert_eq!(request.evaluate().unwrap_err().error_code(), "INVALID_INPUT");
    }
}
