//! # steps_core - Walking Calculator Engine
//!
//! `steps_core` holds the formulas behind the Steps site's fitness calculators
//! (step distance, calories, BMI, daily step goals, weight loss plans) and the
//! loader for its markdown blog. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All calculator types implement Serialize/Deserialize
//! - **Independent calculators**: each page keeps its own published constants
//! - **Rich Errors**: Structured error types for validation and content loading
//!
//! ## Quick Start
//!
//! ```rust
//! use steps_core::calculations::bmi::calculate_bmi_result;
//! use steps_core::calculations::calorie::calories_from_steps;
//!
//! let bmi = calculate_bmi_result(70.0, 175.0);
//! assert_eq!(bmi.bmi, 22.9);
//!
//! // "10,000 steps burns ~400 calories"
//! assert_eq!(calories_from_steps(10_000.0, 70.0), 400.0);
//!
//! let json = serde_json::to_string_pretty(&bmi).unwrap();
//! assert!(json.contains("\"category\": \"normal\""));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The five calculators and a JSON request dispatcher
//! - [`units`] - Unit conversions, newtypes and display rounding
//! - [`format`] - Number, time and distance formatting
//! - [`form`] - Clamping raw form input before it reaches the calculators
//! - [`blog`] - Markdown blog posts with front matter
//! - [`settings`] - TOML settings
//! - [`errors`] - Structured error types

pub mod blog;
pub mod calculations;
pub mod errors;
pub mod form;
pub mod format;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use blog::{BlogPost, BlogStore, PaginatedPosts};
pub use calculations::{CalculatorRequest, CalculatorResponse};
pub use errors::{CalcError, CalcResult};
pub use settings::Settings;
