//! # PathKit SVG
//!
//! Geometry engine for SVG path data (the `d` attribute).
//!
//! ## Features
//!
//! - **Parsing**: Path data (`M L H V C S Q T A Z`) and transform lists
//! - **Transforms**: Affine matrices with representability checks
//! - **Elliptical Arcs**: Center reconstruction, parameter repair under
//!   transforms, Bezier approximation
//! - **Normalization**: Absolutize, collapse and merge commands
//! - **Formatting**: Precision-controlled absolute or relative output
//!
//! ## Architecture
//!
//! ```text
//! "M0,0 L10,0 A5,5 0 0,1 20,0 Z"
//!    └── parser ──► PathData (ordered Vec<Command>)
//!                      ├── absolutize / transform / normalize
//!                      │      └── EllipticalArcItem (center, repair, Bezier)
//!                      └── render(FormatOptions) ──► "M0,0 L10,0 ..."
//! ```
//!
//! ## Example
//!
//! ```
//! use pathkit_svg::{PathData, Transform, TransformOptions};
//!
//! let mut path = PathData::parse("M0,0 L10,0 L10,10 Z").unwrap();
//! path.transform(&Transform::translate(5.0, 5.0), TransformOptions::default())
//!     .unwrap();
//! assert_eq!(path.to_string(), "M5,5 L15,5 L15,15 Z");
//! ```

pub mod arc;
pub mod command;
pub mod error;
pub mod format;
pub mod options;
pub mod parser;
pub mod pathdata;
pub mod point;
pub mod transform;

pub use arc::{BezierSegment, EllipticalArcItem};
pub use command::{Axis, Command, CommandKind, CurveKind, Position};
pub use error::{PathError, Result};
pub use format::{format_number, format_point};
pub use options::{CoordinateMode, FormatOptions, NormalizeOptions, TransformOptions};
pub use parser::{parse_path, parse_transform, parse_transform_list};
pub use pathdata::PathData;
pub use point::Point;
pub use transform::Transform;
