//! Affine transforms.
//!
//! Every transform function of the SVG transform-list grammar reduces to a
//! single [`Transform`]; a parsed list is folded eagerly with
//! [`Transform::concat`].

use std::fmt;
use std::ops::Mul;

use crate::error::{PathError, Result};
use crate::format::{format_number, FormatOptions};
use crate::point::Point;

/// Tolerance used when classifying a matrix (axis alignment, uniform scale).
const CLASSIFY_EPSILON: f64 = 1e-12;

/// 2D affine transform matrix.
///
/// Represents:
/// ```text
/// [a c e]
/// [b d f]
/// [0 0 1]
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Create identity transform.
    pub const fn identity() -> Self {
        Self {
            a: 1.0, b: 0.0,
            c: 0.0, d: 1.0,
            e: 0.0, f: 0.0,
        }
    }

    /// Create a transform from raw matrix values, `matrix(a b c d e f)`.
    pub const fn matrix(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Create translation transform.
    pub const fn translate(tx: f64, ty: f64) -> Self {
        Self {
            a: 1.0, b: 0.0,
            c: 0.0, d: 1.0,
            e: tx, f: ty,
        }
    }

    /// Create scale transform.
    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self {
            a: sx, b: 0.0,
            c: 0.0, d: sy,
            e: 0.0, f: 0.0,
        }
    }

    /// Create rotation transform (degrees, about the origin).
    pub fn rotate(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            a: cos, b: sin,
            c: -sin, d: cos,
            e: 0.0, f: 0.0,
        }
    }

    /// Create rotation transform about `(cx, cy)`, `rotate(angle cx cy)`.
    pub fn rotate_about(degrees: f64, cx: f64, cy: f64) -> Self {
        Self::concat(&[
            Self::translate(cx, cy),
            Self::rotate(degrees),
            Self::translate(-cx, -cy),
        ])
    }

    /// Create skew X transform (degrees).
    pub fn skew_x(degrees: f64) -> Self {
        Self {
            a: 1.0, b: 0.0,
            c: degrees.to_radians().tan(), d: 1.0,
            e: 0.0, f: 0.0,
        }
    }

    /// Create skew Y transform (degrees).
    pub fn skew_y(degrees: f64) -> Self {
        Self {
            a: 1.0, b: degrees.to_radians().tan(),
            c: 0.0, d: 1.0,
            e: 0.0, f: 0.0,
        }
    }

    /// Parse an SVG transform list and fold it into one matrix.
    pub fn parse(s: &str) -> Result<Self> {
        crate::parser::parse_transform(s)
    }

    /// Fold a list of transforms into one, keeping the declared
    /// left-to-right order: `concat([t1, t2]).apply(p) == t1.apply(t2.apply(p))`.
    pub fn concat(transforms: &[Transform]) -> Self {
        transforms
            .iter()
            .fold(Self::identity(), |acc, t| acc.multiply(t))
    }

    /// Multiply two transforms: the result applies `other` first, then `self`.
    pub fn multiply(&self, other: &Transform) -> Self {
        Transform {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    /// Transform a point.
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// Determinant of the linear part.
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Get inverse transform; `None` for a singular matrix.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det.abs() < 1e-12 {
            return None;
        }
        let inv_det = 1.0 / det;
        Some(Transform {
            a: self.d * inv_det,
            b: -self.b * inv_det,
            c: -self.c * inv_det,
            d: self.a * inv_det,
            e: (self.c * self.f - self.d * self.e) * inv_det,
            f: (self.b * self.e - self.a * self.f) * inv_det,
        })
    }

    /// Inverse transform, or [`PathError::SingularTransform`] for a matrix
    /// with a zero determinant.
    pub fn try_inverse(&self) -> Result<Self> {
        self.inverse().ok_or(PathError::SingularTransform(*self))
    }

    /// True when the transform has no rotation or skew component, so
    /// horizontal and vertical lines stay horizontal and vertical.
    pub fn is_axis_aligned(&self) -> bool {
        self.b.abs() < CLASSIFY_EPSILON && self.c.abs() < CLASSIFY_EPSILON
    }

    /// True when the transform maps any ellipse to an ellipse with the same
    /// axis ratio and axis directions up to reflection: axis aligned with
    /// `|a| == |d|`.
    pub fn preserves_arc_shape(&self) -> bool {
        self.is_axis_aligned() && (self.a.abs() - self.d.abs()).abs() < CLASSIFY_EPSILON
    }

    /// True when the transform mirrors the plane (negative determinant), which
    /// flips the direction of every arc sweep.
    pub fn reverses_orientation(&self) -> bool {
        self.determinant() < 0.0
    }

    /// Render as `matrix(a b c d e f)`.
    pub fn render(&self, options: &FormatOptions) -> String {
        let values = [self.a, self.b, self.c, self.d, self.e, self.f]
            .iter()
            .map(|v| format_number(*v, options.precision))
            .collect::<Vec<_>>()
            .join(" ");
        format!("matrix({})", values)
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        self.multiply(&rhs)
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&FormatOptions::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_transform_identity() {
        let t = Transform::identity();
        assert_eq!(t.apply(Point::new(10.0, 20.0)), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_transform_translate() {
        let t = Transform::translate(5.0, 10.0);
        assert_eq!(t.apply(Point::new(10.0, 20.0)), Point::new(15.0, 30.0));
    }

    #[test]
    fn test_transform_scale() {
        let t = Transform::scale(2.0, 3.0);
        assert_eq!(t.apply(Point::new(10.0, 20.0)), Point::new(20.0, 60.0));
    }

    #[test]
    fn test_transform_rotate_degrees() {
        let t = Transform::rotate(90.0);
        assert_close(t.apply(Point::new(1.0, 0.0)), Point::new(0.0, 1.0));
    }

    #[test]
    fn test_transform_rotate_about_center() {
        let t = Transform::rotate_about(180.0, 5.0, 5.0);
        assert_close(t.apply(Point::new(0.0, 0.0)), Point::new(10.0, 10.0));
        assert_close(t.apply(Point::new(5.0, 5.0)), Point::new(5.0, 5.0));
    }

    #[test]
    fn test_transform_skew() {
        let t = Transform::skew_x(45.0);
        assert_close(t.apply(Point::new(0.0, 2.0)), Point::new(2.0, 2.0));
        let t = Transform::skew_y(45.0);
        assert_close(t.apply(Point::new(2.0, 0.0)), Point::new(2.0, 2.0));
    }

    #[test]
    fn test_concat_applies_right_to_left() {
        let t1 = Transform::translate(10.0, 0.0);
        let t2 = Transform::scale(2.0, 2.0);
        let p = Point::new(1.0, 1.0);

        let t = Transform::concat(&[t1, t2]);
        assert_eq!(t.apply(p), t1.apply(t2.apply(p)));
        assert_eq!(t.apply(p), Point::new(12.0, 2.0));
        assert_eq!(t, t1 * t2);
    }

    #[test]
    fn test_concat_empty_is_identity() {
        assert_eq!(Transform::concat(&[]), Transform::identity());
    }

    #[test]
    fn test_inverse_roundtrip() {
        let t = Transform::concat(&[
            Transform::translate(3.0, -7.0),
            Transform::rotate(30.0),
            Transform::scale(2.0, 0.5),
            Transform::skew_x(10.0),
        ]);
        let inv = t.inverse().unwrap();
        let p = Point::new(4.0, 9.0);
        assert_close(inv.apply(t.apply(p)), p);
        assert_close(t.apply(inv.apply(p)), p);
    }

    #[test]
    fn test_singular_has_no_inverse() {
        assert!(Transform::scale(0.0, 1.0).inverse().is_none());
        assert!(Transform::matrix(1.0, 2.0, 2.0, 4.0, 0.0, 0.0).inverse().is_none());
        assert!(matches!(
            Transform::scale(0.0, 0.0).try_inverse(),
            Err(PathError::SingularTransform(_))
        ));
    }

    #[test]
    fn test_classification() {
        assert!(Transform::translate(1.0, 2.0).is_axis_aligned());
        assert!(Transform::scale(2.0, 3.0).is_axis_aligned());
        assert!(!Transform::scale(2.0, 3.0).preserves_arc_shape());
        assert!(Transform::scale(-2.0, 2.0).preserves_arc_shape());
        assert!(!Transform::rotate(30.0).is_axis_aligned());
        assert!(!Transform::skew_x(10.0).is_axis_aligned());

        assert!(Transform::scale(1.0, -1.0).reverses_orientation());
        assert!(!Transform::rotate(90.0).reverses_orientation());
        // Swapping the axes is a reflection even though a*d == 0.
        assert!(Transform::matrix(0.0, 1.0, 1.0, 0.0, 0.0, 0.0).reverses_orientation());
    }

    #[test]
    fn test_render() {
        let t = Transform::matrix(1.0, 0.0, 0.0, 1.0, 2.5, -3.0);
        assert_eq!(t.to_string(), "matrix(1 0 0 1 2.5 -3)");
    }
}
