//! Option structs for rendering, transforming and normalizing path data.
//!
//! All options deserialize with defaults for missing fields, so a host
//! application can keep them in its own configuration file.

use serde::{Deserialize, Serialize};

/// Default number of fractional digits when rendering numbers.
pub const DEFAULT_PRECISION: usize = 6;

/// How coordinates are written when a command sequence is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateMode {
    /// Each command keeps the representation it was written or normalized with.
    #[default]
    Preserve,
    /// Every command is written with absolute coordinates.
    Absolute,
    /// Every command is written with relative coordinates.
    Relative,
}

/// Rendering configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Maximum number of fractional digits.
    pub precision: usize,

    /// Absolute/relative choice for the rendered form.
    pub coordinates: CoordinateMode,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            coordinates: CoordinateMode::Preserve,
        }
    }
}

impl FormatOptions {
    /// Set the number of fractional digits.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Set the coordinate mode.
    pub fn with_coordinates(mut self, coordinates: CoordinateMode) -> Self {
        self.coordinates = coordinates;
        self
    }
}

/// Remediation flags for transforms the command alphabet cannot express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformOptions {
    /// Convert horizontal/vertical lineto commands to lineto before transforming.
    pub collapse_hv_lineto: bool,

    /// Convert elliptical arcs to cubic curves before transforming.
    pub collapse_elliptical_arc: bool,

    /// Repair arc parameters in place under any transform, accepting that the
    /// result is only exact for similarity transforms.
    pub allow_arc_approximation: bool,
}

/// Normalization flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Replace horizontal/vertical lineto commands with lineto.
    pub collapse_hv_lineto: bool,

    /// Replace elliptical arcs with cubic curves.
    pub collapse_elliptical_arc: bool,

    /// Fold a moveto and the lineto commands following it into a single
    /// moveto with implicit lineto coordinates.
    pub allow_implicit_lineto: bool,

    /// Render the normalized commands with relative coordinates.
    pub repr_relative: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_options_default() {
        let options = FormatOptions::default();
        assert_eq!(options.precision, 6);
        assert_eq!(options.coordinates, CoordinateMode::Preserve);
    }

    #[test]
    fn test_format_options_builder() {
        let options = FormatOptions::default()
            .with_precision(2)
            .with_coordinates(CoordinateMode::Relative);
        assert_eq!(options.precision, 2);
        assert_eq!(options.coordinates, CoordinateMode::Relative);
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: FormatOptions = serde_json::from_str(r#"{"coordinates": "absolute"}"#).unwrap();
        assert_eq!(options.precision, DEFAULT_PRECISION);
        assert_eq!(options.coordinates, CoordinateMode::Absolute);

        let options: NormalizeOptions =
            serde_json::from_str(r#"{"allow_implicit_lineto": true}"#).unwrap();
        assert!(options.allow_implicit_lineto);
        assert!(!options.collapse_elliptical_arc);

        let options: TransformOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, TransformOptions::default());
    }
}
