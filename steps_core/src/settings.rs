//! # Settings
//!
//! Site-wide defaults for the calculators and the blog, loaded from a TOML
//! file. Every field is optional; a missing file section keeps the default.
//!
//! ```toml
//! unit_system = "imperial"
//! default_weight_kg = 75.0
//!
//! [blog]
//! content_dir = "content/blog"
//! ```
//!
//! ## Example
//!
//! ```rust
//! use steps_core::settings::Settings;
//! use steps_core::units::UnitSystem;
//!
//! let settings = Settings::from_toml_str("unit_system = \"imperial\"").unwrap();
//! assert_eq!(settings.unit_system, UnitSystem::Imperial);
//! assert_eq!(settings.default_weight_kg, 70.0);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::UnitSystem;

/// Content directory used when none is configured
pub const DEFAULT_CONTENT_DIR: &str = "content/blog";

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Units used when showing results
    pub unit_system: UnitSystem,

    /// Weight assumed when the visitor leaves it blank
    pub default_weight_kg: f64,

    pub blog: BlogSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            unit_system: UnitSystem::Metric,
            default_weight_kg: 70.0,
            blog: BlogSettings::default(),
        }
    }
}

/// Where blog posts live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogSettings {
    pub content_dir: PathBuf,
}

impl Default for BlogSettings {
    fn default() -> Self {
        BlogSettings {
            content_dir: PathBuf::from(DEFAULT_CONTENT_DIR),
        }
    }
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml_str(text: &str) -> CalcResult<Self> {
        Self::parse(text, "<inline>")
    }

    /// Load and validate settings from a TOML file.
    pub fn load(path: &Path) -> CalcResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
        Self::parse(&text, &path.display().to_string())
    }

    fn parse(text: &str, origin: &str) -> CalcResult<Self> {
        let settings: Settings =
            toml::from_str(text).map_err(|e| CalcError::config(origin, e.to_string()))?;
        settings.validate().map_err(|e| CalcError::config(origin, e.to_string()))?;
        Ok(settings)
    }

    pub fn validate(&self) -> CalcResult<()> {
        if !(self.default_weight_kg >= 1.0) {
            return Err(CalcError::invalid_input(
                "default_weight_kg",
                self.default_weight_kg.to_string(),
                "Default weight must be at least 1 kg",
            ));
        }
        Ok(())
    }
}
