//! Elliptical arcs.
//!
//! An [`EllipticalArcItem`] stores the SVG endpoint parameterization (radii,
//! x-axis rotation, flags, target point). Once the item knows where it starts
//! it also carries the reconstructed ellipse center and the point at parameter
//! angle zero on the rotated ellipse (`arc_start`). Those two points are
//! transformed along with the endpoints so the radii and rotation can be
//! recovered afterwards, which keeps a transformed arc expressible as `A`.

use tracing::{trace, warn};

use crate::format::{format_flags, format_number, format_point};
use crate::point::Point;
use crate::transform::Transform;

/// Largest angular span of a generated Bezier segment, in degrees.
pub const MAX_SEGMENT_DEGREES: f64 = 60.0;

/// Radii below this are treated as zero (the arc degenerates to a line).
const RADIUS_EPSILON: f64 = 1e-12;

/// Relative size of a negative radicand that is still considered rounding noise.
const RADICAND_NOISE: f64 = 1e-9;

/// One `rx ry x-axis-rotation large-arc-flag sweep-flag x y` group.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipticalArcItem {
    /// `(rx, ry)` radii.
    pub radii: (f64, f64),
    /// Rotation of the ellipse x-axis, in degrees.
    pub x_axis_rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
    /// Target point, relative or absolute depending on the owning command.
    pub to_point: Point,

    from_point: Point,
    end_point: Point,
    center: Point,
    arc_start: Point,
}

/// A cubic Bezier segment produced from an arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BezierSegment {
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
    /// Angular span on the normalized circle, in degrees.
    pub sweep_angle: f64,
}

impl EllipticalArcItem {
    /// Create an item that is not yet attached to a start point.
    pub fn new(
        radii: (f64, f64),
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        to_point: Point,
    ) -> Self {
        Self {
            radii,
            x_axis_rotation,
            large_arc,
            sweep,
            to_point,
            from_point: Point::ORIGIN,
            end_point: to_point,
            center: Point::ORIGIN,
            arc_start: Point::ORIGIN,
        }
    }

    /// Absolute start point.
    pub fn from_point(&self) -> Point {
        self.from_point
    }

    /// Absolute end point.
    pub fn end_point(&self) -> Point {
        self.end_point
    }

    /// Reconstructed ellipse center.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Point at parameter angle zero on the rotated ellipse.
    pub fn arc_start(&self) -> Point {
        self.arc_start
    }

    /// Attach the item to its absolute start point and derive the center
    /// parameterization. `relative` tells how `to_point` is stored.
    pub(crate) fn attach(&mut self, from: Point, relative: bool) {
        self.from_point = from;
        self.end_point = if relative { from + self.to_point } else { self.to_point };
        self.center = center_from_endpoints(
            self.from_point,
            self.end_point,
            self.radii,
            self.x_axis_rotation,
            self.large_arc,
            self.sweep,
        );
        let (sin, cos) = self.x_axis_rotation.to_radians().sin_cos();
        let rx = self.radii.0.abs();
        self.arc_start = self.center.translate(rx * cos, rx * sin);
    }

    /// Rewrite a relative target as an absolute one.
    pub(crate) fn absolutize(&mut self) {
        self.to_point = self.end_point;
    }

    /// Apply `t` to an absolutized item and repair radii, rotation and sweep.
    ///
    /// Exact for similarity transforms. Under a non-uniform scale or a skew
    /// the minor radius is scaled by the same factor as the major one, which
    /// is only an approximation.
    pub(crate) fn transform(&mut self, t: &Transform) {
        self.from_point = t.apply(self.from_point);
        self.end_point = t.apply(self.end_point);
        self.to_point = self.end_point;
        self.center = t.apply(self.center);
        self.arc_start = t.apply(self.arc_start);

        let (old_rx, old_ry) = (self.radii.0.abs(), self.radii.1.abs());
        let new_rx = self.center.distance(self.arc_start);
        if old_rx > RADIUS_EPSILON {
            let new_ry = if (new_rx - old_rx).abs() > RADIUS_EPSILON {
                old_ry * new_rx / old_rx
            } else {
                old_ry
            };
            self.radii = (new_rx, new_ry);
            self.x_axis_rotation = recover_rotation(self.arc_start - self.center);
        }

        if t.reverses_orientation() {
            self.sweep = !self.sweep;
        }
    }

    /// Approximate the arc with cubic Bezier segments of at most
    /// [`MAX_SEGMENT_DEGREES`] each.
    ///
    /// The last segment ends exactly on [`end_point`](Self::end_point) and
    /// every segment starts where the previous one ended. Zero radii produce a
    /// single straight cubic; coincident endpoints produce a degenerate one.
    pub fn to_bezier_segments(&self) -> Vec<BezierSegment> {
        let (rx, ry) = (self.radii.0.abs(), self.radii.1.abs());
        let from = self.from_point;
        let end = self.end_point;

        if from == end {
            return vec![BezierSegment {
                ctrl1: from,
                ctrl2: from,
                to: end,
                sweep_angle: 0.0,
            }];
        }
        if rx < RADIUS_EPSILON || ry < RADIUS_EPSILON {
            return vec![BezierSegment {
                ctrl1: from,
                ctrl2: end,
                to: end,
                sweep_angle: 0.0,
            }];
        }

        // Map the ellipse onto a circle of radius rx around the same center.
        let center = self.center;
        let to_circle = Transform::concat(&[
            Transform::translate(center.x, center.y),
            Transform::scale(1.0, rx / ry),
            Transform::rotate(-self.x_axis_rotation),
            Transform::translate(-center.x, -center.y),
        ]);
        let from_circle = Transform::concat(&[
            Transform::translate(center.x, center.y),
            Transform::rotate(self.x_axis_rotation),
            Transform::scale(1.0, ry / rx),
            Transform::translate(-center.x, -center.y),
        ]);

        let p1 = to_circle.apply(from) - center;
        let p2 = to_circle.apply(end) - center;
        let radius = p1.x.hypot(p1.y);

        let theta1 = p1.y.atan2(p1.x).to_degrees();
        let theta2 = p2.y.atan2(p2.x).to_degrees();
        let mut delta = theta2 - theta1;
        if self.sweep && delta < 0.0 {
            delta += 360.0;
        } else if !self.sweep && delta > 0.0 {
            delta -= 360.0;
        }

        let direction = delta.signum();
        let spans = partition_sweep(delta.abs());
        trace!(delta, segments = spans.len(), "arc to bezier");

        let mut segments = Vec::with_capacity(spans.len());
        let mut angle = theta1;
        let mut start = center + p1;
        for (i, span) in spans.iter().enumerate() {
            let next_angle = angle + direction * span;
            let stop = point_on_circle(center, radius, next_angle);

            // Tangents at both ends meet on the bisector.
            let mid = (angle + next_angle) / 2.0;
            let reach = radius / (span / 2.0).to_radians().cos();
            let quad_ctrl = point_on_circle(center, reach, mid);

            let u = bezier_interpolation(*span);
            let ctrl1 = start.lerp(quad_ctrl, u);
            let ctrl2 = stop.lerp(quad_ctrl, u);

            let to = if i + 1 == spans.len() {
                end
            } else {
                from_circle.apply(stop)
            };
            segments.push(BezierSegment {
                ctrl1: from_circle.apply(ctrl1),
                ctrl2: from_circle.apply(ctrl2),
                to,
                sweep_angle: *span,
            });

            angle = next_angle;
            start = stop;
        }

        segments
    }

    /// Flattened `[ctrl1, ctrl2, to]` triples of [`to_bezier_segments`](Self::to_bezier_segments).
    pub fn to_curve_points(&self) -> Vec<Point> {
        self.to_bezier_segments()
            .into_iter()
            .flat_map(|s| [s.ctrl1, s.ctrl2, s.to])
            .collect()
    }

    /// Render as `rx,ry rotation large,sweep x,y`.
    pub(crate) fn render(&self, relative: bool, precision: usize) -> String {
        let target = if relative {
            self.end_point - self.from_point
        } else {
            self.end_point
        };
        format!(
            "{},{} {} {} {}",
            format_number(self.radii.0, precision),
            format_number(self.radii.1, precision),
            format_number(self.x_axis_rotation, precision),
            format_flags(self.large_arc, self.sweep),
            format_point(target, precision)
        )
    }
}

/// Reconstruct the ellipse center from the endpoint parameterization.
///
/// A negative radicand (radii too small for the chord) is clamped to zero,
/// which places the center on the chord midpoint; the radii are not scaled up.
pub fn center_from_endpoints(
    from: Point,
    to: Point,
    radii: (f64, f64),
    x_axis_rotation: f64,
    large_arc: bool,
    sweep: bool,
) -> Point {
    let midpoint = from.midpoint(to);
    let (rx, ry) = (radii.0.abs(), radii.1.abs());
    if rx < RADIUS_EPSILON || ry < RADIUS_EPSILON || from == to {
        return midpoint;
    }

    let (sin, cos) = x_axis_rotation.to_radians().sin_cos();
    let half = (from - to) * 0.5;
    let x1 = cos * half.x + sin * half.y;
    let y1 = -sin * half.x + cos * half.y;

    let (rx2, ry2) = (rx * rx, ry * ry);
    let (x1_2, y1_2) = (x1 * x1, y1 * y1);
    let mut radicand = rx2 * ry2 - rx2 * y1_2 - ry2 * x1_2;
    if radicand < 0.0 {
        if radicand < -RADICAND_NOISE * rx2 * ry2 {
            warn!(
                rx,
                ry,
                chord = from.distance(to),
                "arc radii too small for chord, clamping center to midpoint"
            );
        }
        radicand = 0.0;
    }

    let sign = if large_arc != sweep { 1.0 } else { -1.0 };
    let coef = sign * (radicand / (rx2 * y1_2 + ry2 * x1_2)).sqrt();
    let cx = coef * rx * y1 / ry;
    let cy = -coef * ry * x1 / rx;

    Point::new(
        cos * cx - sin * cy + midpoint.x,
        sin * cx + cos * cy + midpoint.y,
    )
}

/// Split an angular span (degrees) into Bezier segment spans of at most 60°.
///
/// When the remainder after the full 60° segments is under 30°, the last
/// `60° + remainder` becomes `45° + (15° + remainder)` so no segment is tiny.
pub fn partition_sweep(total: f64) -> Vec<f64> {
    if total <= 0.0 {
        return Vec::new();
    }

    let full = (total / MAX_SEGMENT_DEGREES).floor() as usize;
    let remainder = total - full as f64 * MAX_SEGMENT_DEGREES;
    let mut spans = vec![MAX_SEGMENT_DEGREES; full];

    if remainder <= 1e-9 {
        return spans;
    }
    if full > 0 && remainder < MAX_SEGMENT_DEGREES / 2.0 {
        spans.pop();
        spans.push(45.0);
        spans.push(15.0 + remainder);
    } else {
        spans.push(remainder);
    }
    spans
}

/// Control-point interpolation parameter for a segment spanning `degrees`.
fn bezier_interpolation(degrees: f64) -> f64 {
    0.6555555555555556 - degrees * degrees / 90000.0
}

fn point_on_circle(center: Point, radius: f64, degrees: f64) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    center.translate(radius * cos, radius * sin)
}

/// Rotation (degrees, in `(-90, 90]`) of the axis along `v`.
fn recover_rotation(v: Point) -> f64 {
    let angle = if v.y.abs() < RADIUS_EPSILON {
        0.0
    } else if v.x.abs() < RADIUS_EPSILON {
        90.0
    } else {
        v.y.atan2(v.x).to_degrees()
    };

    // An ellipse is symmetric under a half turn.
    if angle > 90.0 {
        angle - 180.0
    } else if angle <= -90.0 {
        angle + 180.0
    } else {
        angle
    }
}
