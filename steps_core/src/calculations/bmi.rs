//! # BMI Calculation
//!
//! Body Mass Index, WHO weight category, healthy weight range for the
//! height, and a daily step recommendation per category.
//!
//! ```text
//! BMI = weight (kg) / height (m)²
//! ```
//!
//! ## Example
//!
//! ```rust
//! use steps_core::calculations::bmi::{calculate_bmi_result, BmiCategory};
//!
//! let result = calculate_bmi_result(70.0, 175.0);
//! assert_eq!(result.bmi, 22.9);
//! assert_eq!(result.category, BmiCategory::Normal);
//! assert_eq!(result.recommended_steps, 10_000);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::round_to;

/// Exclusive upper bounds of the lower five categories
pub const UNDERWEIGHT_MAX: f64 = 18.5;
pub const NORMAL_MAX: f64 = 25.0;
pub const OVERWEIGHT_MAX: f64 = 30.0;
pub const OBESE_1_MAX: f64 = 35.0;
pub const OBESE_2_MAX: f64 = 40.0;

/// Top of the healthy range used for the weight target
const HEALTHY_BMI_MAX: f64 = NORMAL_MAX - 0.1;

const SCALE_MIN_BMI: f64 = 15.0;
const SCALE_MAX_BMI: f64 = 45.0;

/// WHO adult weight category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    #[serde(rename = "obese-1")]
    Obese1,
    #[serde(rename = "obese-2")]
    Obese2,
    #[serde(rename = "obese-3")]
    Obese3,
}

/// Display information for a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BmiCategoryInfo {
    pub category: BmiCategory,
    pub label: &'static str,
    pub range: &'static str,
    /// Hex color for the result badge
    pub color: &'static str,
    /// Background utility class for the scale segment
    pub bg_color: &'static str,
    pub description: &'static str,
}

impl BmiCategory {
    /// All categories from lowest to highest BMI
    pub const ALL: [BmiCategory; 6] = [
        BmiCategory::Underweight,
        BmiCategory::Normal,
        BmiCategory::Overweight,
        BmiCategory::Obese1,
        BmiCategory::Obese2,
        BmiCategory::Obese3,
    ];

    pub fn info(self) -> BmiCategoryInfo {
        let (label, range, color, bg_color, description) = match self {
            BmiCategory::Underweight => (
                "Underweight",
                "< 18.5",
                "#3B82F6",
                "bg-blue-500",
                "You may need to gain some weight. Consider consulting a healthcare professional.",
            ),
            BmiCategory::Normal => (
                "Normal",
                "18.5 - 24.9",
                "#22C55E",
                "bg-green-500",
                "Your weight is within the healthy range. Keep up the good work!",
            ),
            BmiCategory::Overweight => (
                "Overweight",
                "25.0 - 29.9",
                "#EAB308",
                "bg-yellow-500",
                "You may benefit from losing some weight through diet and exercise.",
            ),
            BmiCategory::Obese1 => (
                "Obese Class I",
                "30.0 - 34.9",
                "#F97316",
                "bg-orange-500",
                "Consider consulting a healthcare professional about weight management strategies.",
            ),
            BmiCategory::Obese2 => (
                "Obese Class II",
                "35.0 - 39.9",
                "#EF4444",
                "bg-red-500",
                "It's recommended to consult a healthcare professional for personalized advice.",
            ),
            BmiCategory::Obese3 => (
                "Obese Class III",
                "≥ 40.0",
                "#991B1B",
                "bg-red-800",
                "Please consult a healthcare professional for personalized medical advice.",
            ),
        };
        BmiCategoryInfo {
            category: self,
            label,
            range,
            color,
            bg_color,
            description,
        }
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }

    pub fn is_obese(self) -> bool {
        matches!(self, BmiCategory::Obese1 | BmiCategory::Obese2 | BmiCategory::Obese3)
    }
}

/// Healthy weight range in kg for a given height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightRange {
    pub min: f64,
    pub max: f64,
}

/// Input for the BMI calculator.
///
/// ## JSON Example
///
/// ```json
/// { "weight_kg": 70.0, "height_cm": 175.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiInput {
    pub weight_kg: f64,
    pub height_cm: f64,
}

impl BmiInput {
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.weight_kg >= 1.0) {
            return Err(CalcError::invalid_input(
                "weight_kg",
                self.weight_kg.to_string(),
                "Weight must be at least 1 kg",
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

/// Results from the BMI calculator.
///
/// ## JSON Example
///
/// ```json
/// {
///   "bmi": 22.9,
///   "category": "normal",
///   "category_label": "Normal",
///   "category_color": "#22C55E",
///   "healthy_weight_range": { "min": 56.7, "max": 76.3 },
///   "weight_to_healthy_range": 0.0,
///   "recommended_steps": 10000
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    /// BMI rounded to one decimal
    pub bmi: f64,
    pub category: BmiCategory,
    pub category_label: String,
    pub category_color: String,
    pub healthy_weight_range: WeightRange,
    /// kg to lose (positive) or gain (negative) to enter the healthy range
    pub weight_to_healthy_range: f64,
    pub recommended_steps: u32,
}

/// Unrounded BMI.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Category for a BMI value. Boundary values belong to the higher category.
pub fn bmi_category(bmi: f64) -> BmiCategory {
    if bmi < UNDERWEIGHT_MAX {
        BmiCategory::Underweight
    } else if bmi < NORMAL_MAX {
        BmiCategory::Normal
    } else if bmi < OVERWEIGHT_MAX {
        BmiCategory::Overweight
    } else if bmi < OBESE_1_MAX {
        BmiCategory::Obese1
    } else if bmi < OBESE_2_MAX {
        BmiCategory::Obese2
    } else {
        BmiCategory::Obese3
    }
}

/// Weights giving a BMI of 18.5 to 24.9 at this height, one decimal.
pub fn healthy_weight_range(height_cm: f64) -> WeightRange {
    let height_m = height_cm / 100.0;
    let height_squared = height_m * height_m;
    WeightRange {
        min: round_to(UNDERWEIGHT_MAX * height_squared, 1),
        max: round_to(HEALTHY_BMI_MAX * height_squared, 1),
    }
}

/// Daily step recommendation for a category.
///
/// All obese classes get the same achievable starting target rather than a
/// higher one.
pub fn recommended_steps(category: BmiCategory) -> u32 {
    match category {
        BmiCategory::Underweight => 8_000,
        BmiCategory::Normal => 10_000,
        BmiCategory::Overweight => 12_000,
        BmiCategory::Obese1 | BmiCategory::Obese2 | BmiCategory::Obese3 => 10_000,
    }
}

pub fn calculate_bmi_result(weight_kg: f64, height_cm: f64) -> BmiResult {
    let bmi = calculate_bmi(weight_kg, height_cm);
    let category = bmi_category(bmi);
    let info = category.info();
    let healthy_range = healthy_weight_range(height_cm);

    let weight_to_healthy_range = if weight_kg < healthy_range.min {
        -(healthy_range.min - weight_kg)
    } else if weight_kg > healthy_range.max {
        weight_kg - healthy_range.max
    } else {
        0.0
    };

    BmiResult {
        bmi: round_to(bmi, 1),
        category,
        category_label: info.label.to_string(),
        category_color: info.color.to_string(),
        healthy_weight_range: healthy_range,
        weight_to_healthy_range: round_to(weight_to_healthy_range, 1),
        recommended_steps: recommended_steps(category),
    }
}

/// Validate and run the calculator.
pub fn calculate(input: &BmiInput) -> CalcResult<BmiResult> {
    input.validate()?;
    Ok(calculate_bmi_result(input.weight_kg, input.height_cm))
}

/// Category table for the legend, lowest BMI first.
pub fn all_bmi_categories() -> Vec<BmiCategoryInfo> {
    BmiCategory::ALL.iter().map(|c| c.info()).collect()
}

/// Position of a BMI on the 0-100 visual scale covering BMI 15 to 45.
pub fn bmi_scale_position(bmi: f64) -> f64 {
    let clamped = bmi.clamp(SCALE_MIN_BMI, SCALE_MAX_BMI);
    ((clamped - SCALE_MIN_BMI) / (SCALE_MAX_BMI - SCALE_MIN_BMI)) * 100.0
}
