//! # Units and Rounding
//!
//! Plain `f64` conversions between the metric and imperial units the
//! calculators show, the unit-system choice carried in settings, and the
//! half-up rounding used for every displayed number.
//!
//! Calculators take and return bare numbers in metric units (kg, cm, km) so
//! their JSON stays flat; conversion happens at display time.
//!
//! ## Example
//!
//! ```rust
//! use steps_core::units::{cm_to_feet_inches, kg_to_lbs, round_to, FeetInches};
//!
//! assert_eq!(round_to(kg_to_lbs(70.0), 1), 154.3);
//! assert_eq!(cm_to_feet_inches(177.8), FeetInches::new(5, 10));
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Conversion Constants
// ============================================================================

pub const KG_TO_LBS: f64 = 2.20462;
pub const LBS_TO_KG: f64 = 0.453592;

pub const CM_TO_INCHES: f64 = 0.393701;
pub const INCHES_TO_CM: f64 = 2.54;
pub const FEET_TO_CM: f64 = 30.48;

pub const KM_TO_MILES: f64 = 0.621371;
pub const MILES_TO_KM: f64 = 1.60934;

/// Centimeters in one kilometer
pub const CM_PER_KM: f64 = 100_000.0;
/// Meters in one kilometer
pub const METERS_PER_KM: f64 = 1000.0;

// ============================================================================
// Plain Conversions
// ============================================================================

pub fn kg_to_lbs(kg: f64) -> f64 {
    kg * KG_TO_LBS
}

pub fn lbs_to_kg(lbs: f64) -> f64 {
    lbs * LBS_TO_KG
}

pub fn cm_to_inches(cm: f64) -> f64 {
    cm * CM_TO_INCHES
}

pub fn inches_to_cm(inches: f64) -> f64 {
    inches * INCHES_TO_CM
}

/// Convert feet and inches to centimeters via total inches.
pub fn feet_inches_to_cm(feet: f64, inches: f64) -> f64 {
    let total_inches = feet * 12.0 + inches;
    total_inches * INCHES_TO_CM
}

/// Convert centimeters to whole feet and rounded inches.
///
/// Feet are floored and the remainder inches rounded independently, so a
/// remainder of 11.5" or more comes back as `inches == 12` rather than being
/// carried into the next foot. Form inputs round-trip through this, so the
/// behavior is kept.
pub fn cm_to_feet_inches(cm: f64) -> FeetInches {
    let total_inches = cm / INCHES_TO_CM;
    let feet = (total_inches / 12.0).floor();
    let inches = round_half_up(total_inches % 12.0);
    FeetInches {
        feet: feet as u32,
        inches: inches as u32,
    }
}

pub fn km_to_miles(km: f64) -> f64 {
    km * KM_TO_MILES
}

pub fn miles_to_km(miles: f64) -> f64 {
    miles * MILES_TO_KM
}

pub fn meters_to_km(meters: f64) -> f64 {
    meters / METERS_PER_KM
}

pub fn km_to_meters(km: f64) -> f64 {
    km * METERS_PER_KM
}

// ============================================================================
// Rounding
// ============================================================================

/// Round to the nearest integer, halves toward positive infinity.
///
/// Displayed values were published with this rounding (`-2.5 -> -2`), which
/// differs from `f64::round` on negative halves.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to a fixed number of decimals using [`round_half_up`].
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    round_half_up(value * factor) / factor
}

/// Round to the nearest multiple of `step` using [`round_half_up`].
pub fn round_to_multiple(value: f64, step: f64) -> f64 {
    round_half_up(value / step) * step
}

// ============================================================================
// Unit Records
// ============================================================================

/// Height expressed as whole feet plus inches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeetInches {
    pub feet: u32,
    pub inches: u32,
}

impl FeetInches {
    pub fn new(feet: u32, inches: u32) -> Self {
        FeetInches { feet, inches }
    }

    pub fn to_cm(self) -> f64 {
        feet_inches_to_cm(self.feet as f64, self.inches as f64)
    }
}

/// Display unit system chosen by the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

/// Weight unit labels used in formatted output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Kg,
    Lbs,
}

/// Distance unit labels used in formatted output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    Km,
    Miles,
    M,
}

impl UnitSystem {
    pub fn weight_unit(self) -> WeightUnit {
        match self {
            UnitSystem::Metric => WeightUnit::Kg,
            UnitSystem::Imperial => WeightUnit::Lbs,
        }
    }

    pub fn distance_unit(self) -> DistanceUnit {
        match self {
            UnitSystem::Metric => DistanceUnit::Km,
            UnitSystem::Imperial => DistanceUnit::Miles,
        }
    }
}
