//! Path-data commands.
//!
//! A [`Command`] is one drawing operation (`M`, `L`, `H`/`V`, `C`/`S`/`Q`/`T`,
//! `A`, `Z`). Its start point is not part of the command text: the owning
//! [`PathData`](crate::PathData) fills it in when the command is sequenced.

use crate::arc::EllipticalArcItem;
use crate::error::{PathError, Result};
use crate::format::{format_number, format_point, CoordinateMode};
use crate::point::Point;
use crate::transform::Transform;

/// Absolute (upper-case letter) or relative (lower-case letter) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Absolute,
    Relative,
}

/// Axis of a horizontal or vertical lineto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// The four curveto flavours and their coordinate groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    /// `C`: (cp1, cp2, p)+
    Cubic,
    /// `S`: (cp2, p)+
    SmoothCubic,
    /// `Q`: (cp, p)+
    Quadratic,
    /// `T`: (p)+
    SmoothQuadratic,
}

impl CurveKind {
    /// Number of points in one coordinate group.
    pub fn stride(self) -> usize {
        match self {
            CurveKind::Cubic => 3,
            CurveKind::SmoothCubic | CurveKind::Quadratic => 2,
            CurveKind::SmoothQuadratic => 1,
        }
    }

    fn letter(self) -> char {
        match self {
            CurveKind::Cubic => 'C',
            CurveKind::SmoothCubic => 'S',
            CurveKind::Quadratic => 'Q',
            CurveKind::SmoothQuadratic => 'T',
        }
    }
}

/// Command-specific data.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandKind {
    /// `M`/`m`; points after the first are implicit linetos.
    Moveto { points: Vec<Point>, is_first: bool },
    /// `L`/`l`
    Lineto { points: Vec<Point> },
    /// `H`/`h` and `V`/`v`
    HorizontalVerticalLineto { axis: Axis, values: Vec<f64> },
    /// `C`/`c`, `S`/`s`, `Q`/`q`, `T`/`t`
    Curveto { kind: CurveKind, points: Vec<Point> },
    /// `A`/`a`
    EllipticalArc { items: Vec<EllipticalArcItem> },
    /// `Z`/`z`; `target` is the moveto point of the current subpath.
    Close { target: Point },
}

/// A single path-data command.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub kind: CommandKind,
    position: Position,
    repr_relative: bool,
    start_point: Point,
}

impl Command {
    fn with_kind(position: Position, kind: CommandKind) -> Self {
        Self {
            kind,
            position,
            repr_relative: position == Position::Relative,
            start_point: Point::ORIGIN,
        }
    }

    /// Create a moveto command.
    pub fn moveto(position: Position, points: Vec<Point>) -> Self {
        Self::with_kind(
            position,
            CommandKind::Moveto {
                points,
                is_first: false,
            },
        )
    }

    /// Create a lineto command.
    pub fn lineto(position: Position, points: Vec<Point>) -> Self {
        Self::with_kind(position, CommandKind::Lineto { points })
    }

    /// Create a horizontal lineto command.
    pub fn horizontal(position: Position, values: Vec<f64>) -> Self {
        Self::with_kind(
            position,
            CommandKind::HorizontalVerticalLineto {
                axis: Axis::Horizontal,
                values,
            },
        )
    }

    /// Create a vertical lineto command.
    pub fn vertical(position: Position, values: Vec<f64>) -> Self {
        Self::with_kind(
            position,
            CommandKind::HorizontalVerticalLineto {
                axis: Axis::Vertical,
                values,
            },
        )
    }

    /// Create a curveto command of any flavour.
    pub fn curveto(kind: CurveKind, position: Position, points: Vec<Point>) -> Self {
        Self::with_kind(position, CommandKind::Curveto { kind, points })
    }

    /// Create an elliptical arc command.
    pub fn elliptical_arc(position: Position, items: Vec<EllipticalArcItem>) -> Self {
        Self::with_kind(position, CommandKind::EllipticalArc { items })
    }

    /// Create a closepath command.
    pub fn close(position: Position) -> Self {
        Self::with_kind(
            position,
            CommandKind::Close {
                target: Point::ORIGIN,
            },
        )
    }

    /// Function letter; lower case for relative coordinates.
    pub fn letter(&self) -> char {
        let upper = match &self.kind {
            CommandKind::Moveto { .. } => 'M',
            CommandKind::Lineto { .. } => 'L',
            CommandKind::HorizontalVerticalLineto {
                axis: Axis::Horizontal,
                ..
            } => 'H',
            CommandKind::HorizontalVerticalLineto {
                axis: Axis::Vertical,
                ..
            } => 'V',
            CommandKind::Curveto { kind, .. } => kind.letter(),
            CommandKind::EllipticalArc { .. } => 'A',
            CommandKind::Close { .. } => 'Z',
        };
        match self.position {
            Position::Absolute => upper,
            Position::Relative => upper.to_ascii_lowercase(),
        }
    }

    /// Human-readable command name.
    pub fn description(&self) -> &'static str {
        match &self.kind {
            CommandKind::Moveto { .. } => "moveto",
            CommandKind::Lineto { .. } => "lineto",
            CommandKind::HorizontalVerticalLineto {
                axis: Axis::Horizontal,
                ..
            } => "horizontal_lineto",
            CommandKind::HorizontalVerticalLineto {
                axis: Axis::Vertical,
                ..
            } => "vertical_lineto",
            CommandKind::Curveto { kind, .. } => match kind {
                CurveKind::Cubic => "curveto",
                CurveKind::SmoothCubic => "smooth_curveto",
                CurveKind::Quadratic => "quadratic_curveto",
                CurveKind::SmoothQuadratic => "smooth_quadratic_curveto",
            },
            CommandKind::EllipticalArc { .. } => "elliptical_arc",
            CommandKind::Close { .. } => "closepath",
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_relative(&self) -> bool {
        self.position == Position::Relative
    }

    /// Whether the command renders relative in [`CoordinateMode::Preserve`].
    pub fn repr_relative(&self) -> bool {
        self.repr_relative
    }

    pub fn set_repr_relative(&mut self, relative: bool) {
        self.repr_relative = relative;
    }

    /// Absolute start point, as assigned by the owning sequence.
    pub fn start_point(&self) -> Point {
        self.start_point
    }

    pub fn is_moveto(&self) -> bool {
        matches!(self.kind, CommandKind::Moveto { .. })
    }

    pub fn is_first_command(&self) -> bool {
        matches!(self.kind, CommandKind::Moveto { is_first: true, .. })
    }

    /// Absolute point a moveto jumps to; `None` for other commands.
    pub fn moveto_point(&self) -> Option<Point> {
        match &self.kind {
            CommandKind::Moveto { points, is_first } => {
                let first = *points.first()?;
                if self.is_relative() && !is_first {
                    Some(self.start_point + first)
                } else {
                    Some(first)
                }
            }
            _ => None,
        }
    }

    /// Absolute end point.
    pub fn end_point(&self) -> Point {
        let start = self.start_point;
        match &self.kind {
            CommandKind::Moveto { points, is_first } => {
                if !self.is_relative() {
                    return points.last().copied().unwrap_or(start);
                }
                let skip = usize::from(*is_first);
                points.iter().skip(skip).fold(start, |acc, p| acc + *p)
            }
            CommandKind::Lineto { points } => group_end(points, 1, start, self.position),
            CommandKind::Curveto { kind, points } => {
                group_end(points, kind.stride(), start, self.position)
            }
            CommandKind::HorizontalVerticalLineto { axis, values } => {
                let along = match self.position {
                    Position::Absolute => values.last().copied(),
                    Position::Relative => {
                        Some(axis_value(*axis, start) + values.iter().sum::<f64>())
                    }
                };
                match along {
                    Some(v) => with_axis_value(*axis, start, v),
                    None => start,
                }
            }
            CommandKind::EllipticalArc { items } => {
                items.last().map(EllipticalArcItem::end_point).unwrap_or(start)
            }
            CommandKind::Close { target } => *target,
        }
    }

    /// On-curve vertices the command visits, in absolute coordinates.
    pub fn segmented_points(&self) -> Vec<Point> {
        match &self.kind {
            CommandKind::Moveto { .. } => self.absolute_points(),
            CommandKind::Lineto { .. } | CommandKind::Curveto { .. } => {
                let stride = self.stride();
                let points = self.absolute_points();
                std::iter::once(self.start_point)
                    .chain(points.chunks(stride).filter_map(|g| g.last().copied()))
                    .collect()
            }
            CommandKind::HorizontalVerticalLineto { axis, .. } => {
                std::iter::once(self.start_point)
                    .chain(
                        self.absolute_values()
                            .into_iter()
                            .map(|v| with_axis_value(*axis, self.start_point, v)),
                    )
                    .collect()
            }
            CommandKind::EllipticalArc { items } => std::iter::once(self.start_point)
                .chain(items.iter().map(EllipticalArcItem::end_point))
                .collect(),
            CommandKind::Close { target } => vec![*target],
        }
    }

    /// Convert a horizontal/vertical lineto to a lineto with one point per
    /// value. Returns `None` for other commands.
    pub fn to_lineto(&self) -> Option<Command> {
        let CommandKind::HorizontalVerticalLineto { axis, values } = &self.kind else {
            return None;
        };
        let points = match self.position {
            Position::Absolute => values
                .iter()
                .map(|v| with_axis_value(*axis, self.start_point, *v))
                .collect(),
            Position::Relative => values
                .iter()
                .map(|v| with_axis_value(*axis, Point::ORIGIN, *v))
                .collect(),
        };
        Some(self.derived(CommandKind::Lineto { points }))
    }

    /// Convert an elliptical arc to a cubic curveto. Returns `None` for other
    /// commands.
    pub fn to_curveto(&self) -> Option<Command> {
        let CommandKind::EllipticalArc { items } = &self.kind else {
            return None;
        };
        let absolute: Vec<Point> = items
            .iter()
            .flat_map(EllipticalArcItem::to_curve_points)
            .collect();
        let points = match self.position {
            Position::Absolute => absolute,
            Position::Relative => relativize_groups(&absolute, 3, self.start_point),
        };
        Some(self.derived(CommandKind::Curveto {
            kind: CurveKind::Cubic,
            points,
        }))
    }

    fn derived(&self, kind: CommandKind) -> Command {
        Command {
            kind,
            position: self.position,
            repr_relative: self.repr_relative,
            start_point: self.start_point,
        }
    }

    fn stride(&self) -> usize {
        match &self.kind {
            CommandKind::Curveto { kind, .. } => kind.stride(),
            _ => 1,
        }
    }

    /// Check the argument counts of the command.
    pub(crate) fn validate(&self) -> Result<()> {
        let (len, stride) = match &self.kind {
            CommandKind::Moveto { points, .. } | CommandKind::Lineto { points } => (points.len(), 1),
            CommandKind::Curveto { kind, points } => (points.len(), kind.stride()),
            CommandKind::HorizontalVerticalLineto { values, .. } => (values.len(), 1),
            CommandKind::EllipticalArc { items } => (items.len(), 1),
            CommandKind::Close { .. } => return Ok(()),
        };
        if len == 0 || len % stride != 0 {
            return Err(PathError::invalid_path(format!(
                "{} ({}) needs groups of {} coordinate(s), got {}",
                self.letter(),
                self.description(),
                stride,
                len
            )));
        }
        Ok(())
    }

    /// Mark the command as the first of its sequence.
    pub(crate) fn mark_first(&mut self) {
        if let CommandKind::Moveto { points, is_first } = &mut self.kind {
            *is_first = true;
            if let Some(first) = points.first() {
                self.start_point = *first;
            }
        }
    }

    /// Assign the start point; arcs derive their center parameterization here.
    pub(crate) fn set_start_point(&mut self, start: Point) {
        self.start_point = start;
        let relative = self.is_relative();
        match &mut self.kind {
            CommandKind::Moveto { is_first, .. } => *is_first = false,
            CommandKind::EllipticalArc { items } => {
                let mut from = start;
                for item in items.iter_mut() {
                    item.attach(from, relative);
                    from = item.end_point();
                }
            }
            _ => {}
        }
    }

    pub(crate) fn set_close_target(&mut self, point: Point) {
        if let CommandKind::Close { target } = &mut self.kind {
            *target = point;
        }
    }

    /// Rewrite relative coordinates as absolute ones, starting from `current`.
    /// Returns the new end point.
    pub(crate) fn absolutize(&mut self, current: Point) -> Point {
        if self.position == Position::Relative {
            match &mut self.kind {
                CommandKind::Moveto { points, is_first } => {
                    let skip = usize::from(*is_first);
                    let start = if *is_first { points[0] } else { current };
                    absolutize_groups(&mut points[skip..], 1, start);
                }
                CommandKind::Lineto { points } => absolutize_groups(points, 1, current),
                CommandKind::Curveto { kind, points } => {
                    absolutize_groups(points, kind.stride(), current)
                }
                CommandKind::HorizontalVerticalLineto { axis, values } => {
                    let mut along = axis_value(*axis, current);
                    for v in values.iter_mut() {
                        *v += along;
                        along = *v;
                    }
                }
                CommandKind::EllipticalArc { items } => {
                    items.iter_mut().for_each(EllipticalArcItem::absolutize)
                }
                CommandKind::Close { .. } => {}
            }
            self.position = Position::Absolute;
        }
        self.end_point()
    }

    /// Apply `t` to an absolutized command.
    ///
    /// Horizontal/vertical linetos are mapped along their axis only, so the
    /// caller must ensure `t` is axis aligned for them.
    pub(crate) fn transform(&mut self, t: &Transform) {
        debug_assert_eq!(self.position, Position::Absolute);
        self.start_point = t.apply(self.start_point);
        match &mut self.kind {
            CommandKind::Moveto { points, .. }
            | CommandKind::Lineto { points }
            | CommandKind::Curveto { points, .. } => {
                points.iter_mut().for_each(|p| *p = t.apply(*p))
            }
            CommandKind::HorizontalVerticalLineto { axis, values } => {
                let (scale, offset) = match axis {
                    Axis::Horizontal => (t.a, t.e),
                    Axis::Vertical => (t.d, t.f),
                };
                values.iter_mut().for_each(|v| *v = scale * *v + offset);
            }
            CommandKind::EllipticalArc { items } => {
                items.iter_mut().for_each(|item| item.transform(t))
            }
            CommandKind::Close { target } => *target = t.apply(*target),
        }
    }

    /// Render the command text.
    pub fn render(&self, mode: CoordinateMode, precision: usize) -> String {
        let relative = match mode {
            CoordinateMode::Preserve => self.repr_relative || self.is_relative(),
            CoordinateMode::Absolute => false,
            CoordinateMode::Relative => true,
        };
        let letter = if relative {
            self.letter().to_ascii_lowercase()
        } else {
            self.letter().to_ascii_uppercase()
        };

        let args: Vec<String> = match &self.kind {
            CommandKind::Moveto { .. } | CommandKind::Lineto { .. } | CommandKind::Curveto { .. } => {
                let points = if relative {
                    self.relative_points()
                } else {
                    self.absolute_points()
                };
                points
                    .chunks(self.stride())
                    .map(|group| {
                        group
                            .iter()
                            .map(|p| format_point(*p, precision))
                            .collect::<Vec<_>>()
                            .join(" ")
                    })
                    .collect()
            }
            CommandKind::HorizontalVerticalLineto { .. } => {
                let values = if relative {
                    self.relative_values()
                } else {
                    self.absolute_values()
                };
                values.iter().map(|v| format_number(*v, precision)).collect()
            }
            CommandKind::EllipticalArc { items } => items
                .iter()
                .map(|item| item.render(relative, precision))
                .collect(),
            CommandKind::Close { .. } => Vec::new(),
        };

        format!("{}{}", letter, args.join(" "))
    }

    /// Coordinates of a point-carrying command in absolute form.
    fn absolute_points(&self) -> Vec<Point> {
        let (points, stride, skip) = match &self.kind {
            CommandKind::Moveto { points, is_first } => (points, 1, usize::from(*is_first)),
            CommandKind::Lineto { points } => (points, 1, 0),
            CommandKind::Curveto { kind, points } => (points, kind.stride(), 0),
            _ => return Vec::new(),
        };
        let mut out = points.clone();
        if self.is_relative() {
            let start = if skip == 1 { out[0] } else { self.start_point };
            absolutize_groups(&mut out[skip..], stride, start);
        }
        out
    }

    /// Coordinates of a point-carrying command in relative form. A leading
    /// moveto keeps its first point absolute.
    fn relative_points(&self) -> Vec<Point> {
        let (points, stride, skip) = match &self.kind {
            CommandKind::Moveto { points, is_first } => (points, 1, usize::from(*is_first)),
            CommandKind::Lineto { points } => (points, 1, 0),
            CommandKind::Curveto { kind, points } => (points, kind.stride(), 0),
            _ => return Vec::new(),
        };
        if self.is_relative() {
            return points.clone();
        }
        let start = if skip == 1 { points[0] } else { self.start_point };
        let mut out = points[..skip].to_vec();
        out.extend(relativize_groups(&points[skip..], stride, start));
        out
    }

    fn absolute_values(&self) -> Vec<f64> {
        let CommandKind::HorizontalVerticalLineto { axis, values } = &self.kind else {
            return Vec::new();
        };
        if !self.is_relative() {
            return values.clone();
        }
        let mut along = axis_value(*axis, self.start_point);
        values
            .iter()
            .map(|v| {
                along += v;
                along
            })
            .collect()
    }

    fn relative_values(&self) -> Vec<f64> {
        let CommandKind::HorizontalVerticalLineto { axis, values } = &self.kind else {
            return Vec::new();
        };
        if self.is_relative() {
            return values.clone();
        }
        let mut along = axis_value(*axis, self.start_point);
        values
            .iter()
            .map(|v| {
                let delta = v - along;
                along = *v;
                delta
            })
            .collect()
    }
}

/// End point of stride-grouped coordinates.
fn group_end(points: &[Point], stride: usize, start: Point, position: Position) -> Point {
    match position {
        Position::Absolute => points.last().copied().unwrap_or(start),
        Position::Relative => points
            .chunks(stride)
            .filter_map(|g| g.last().copied())
            .fold(start, |acc, p| acc + p),
    }
}

/// Each group is relative to the end of the previous group.
fn absolutize_groups(points: &mut [Point], stride: usize, mut current: Point) {
    for group in points.chunks_mut(stride) {
        for p in group.iter_mut() {
            *p += current;
        }
        if let Some(last) = group.last() {
            current = *last;
        }
    }
}

fn relativize_groups(points: &[Point], stride: usize, mut current: Point) -> Vec<Point> {
    let mut out = Vec::with_capacity(points.len());
    for group in points.chunks(stride) {
        out.extend(group.iter().map(|p| *p - current));
        if let Some(last) = group.last() {
            current = *last;
        }
    }
    out
}

fn axis_value(axis: Axis, p: Point) -> f64 {
    match axis {
        Axis::Horizontal => p.x,
        Axis::Vertical => p.y,
    }
}

fn with_axis_value(axis: Axis, p: Point, v: f64) -> Point {
    match axis {
        Axis::Horizontal => Point::new(v, p.y),
        Axis::Vertical => Point::new(p.x, v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|c| Point::from(*c)).collect()
    }

    #[test]
    fn test_letters_and_descriptions() {
        let cmd = Command::horizontal(Position::Relative, vec![1.0]);
        assert_eq!(cmd.letter(), 'h');
        assert_eq!(cmd.description(), "horizontal_lineto");

        let cmd = Command::curveto(CurveKind::SmoothQuadratic, Position::Absolute, pts(&[(1.0, 1.0)]));
        assert_eq!(cmd.letter(), 'T');
        assert_eq!(cmd.description(), "smooth_quadratic_curveto");

        assert_eq!(Command::close(Position::Relative).letter(), 'z');
        assert_eq!(Command::close(Position::Absolute).description(), "closepath");
    }

    #[test]
    fn test_validate_rejects_partial_groups() {
        let cmd = Command::curveto(CurveKind::Cubic, Position::Absolute, pts(&[(1.0, 1.0), (2.0, 2.0)]));
        assert!(matches!(cmd.validate(), Err(PathError::InvalidPath(_))));

        let cmd = Command::lineto(Position::Absolute, Vec::new());
        assert!(cmd.validate().is_err());

        assert!(Command::close(Position::Absolute).validate().is_ok());
    }

    #[test]
    fn test_relative_end_point() {
        let mut cmd = Command::lineto(Position::Relative, pts(&[(1.0, 0.0), (0.0, 2.0)]));
        cmd.set_start_point(Point::new(10.0, 10.0));
        assert_eq!(cmd.end_point(), Point::new(11.0, 12.0));

        let mut cmd = Command::curveto(
            CurveKind::Quadratic,
            Position::Relative,
            pts(&[(1.0, 1.0), (2.0, 0.0), (1.0, 1.0), (2.0, 0.0)]),
        );
        cmd.set_start_point(Point::new(0.0, 0.0));
        assert_eq!(cmd.end_point(), Point::new(4.0, 0.0));
    }

    #[test]
    fn test_first_relative_moveto() {
        let mut cmd = Command::moveto(Position::Relative, pts(&[(5.0, 5.0), (1.0, 1.0)]));
        cmd.mark_first();
        assert!(cmd.is_first_command());
        assert_eq!(cmd.start_point(), Point::new(5.0, 5.0));
        assert_eq!(cmd.moveto_point(), Some(Point::new(5.0, 5.0)));
        assert_eq!(cmd.end_point(), Point::new(6.0, 6.0));

        let end = cmd.absolutize(cmd.start_point());
        assert_eq!(end, Point::new(6.0, 6.0));
        assert_eq!(
            cmd.kind,
            CommandKind::Moveto {
                points: pts(&[(5.0, 5.0), (6.0, 6.0)]),
                is_first: true
            }
        );
    }

    #[test]
    fn test_absolutize_hv() {
        let mut cmd = Command::vertical(Position::Relative, vec![5.0, -2.0]);
        cmd.set_start_point(Point::new(1.0, 1.0));
        let end = cmd.absolutize(Point::new(1.0, 1.0));
        assert_eq!(end, Point::new(1.0, 4.0));
        assert_eq!(cmd.letter(), 'V');
        assert_eq!(
            cmd.kind,
            CommandKind::HorizontalVerticalLineto {
                axis: Axis::Vertical,
                values: vec![6.0, 4.0]
            }
        );
    }

    #[test]
    fn test_absolutize_curve_groups() {
        let mut cmd = Command::curveto(
            CurveKind::Cubic,
            Position::Relative,
            pts(&[(1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (0.0, 1.0), (0.0, 2.0), (0.0, 3.0)]),
        );
        cmd.set_start_point(Point::new(10.0, 10.0));
        cmd.absolutize(Point::new(10.0, 10.0));
        assert_eq!(
            cmd.kind,
            CommandKind::Curveto {
                kind: CurveKind::Cubic,
                points: pts(&[(11.0, 10.0), (12.0, 10.0), (13.0, 10.0), (13.0, 11.0), (13.0, 12.0), (13.0, 13.0)]),
            }
        );
    }

    #[test]
    fn test_to_lineto() {
        let mut cmd = Command::horizontal(Position::Absolute, vec![10.0, 20.0]);
        cmd.set_start_point(Point::new(0.0, 5.0));
        let line = cmd.to_lineto().unwrap();
        assert_eq!(line.letter(), 'L');
        assert_eq!(line.start_point(), Point::new(0.0, 5.0));
        assert_eq!(
            line.kind,
            CommandKind::Lineto {
                points: pts(&[(10.0, 5.0), (20.0, 5.0)])
            }
        );
        assert_eq!(line.end_point(), cmd.end_point());

        let mut cmd = Command::vertical(Position::Relative, vec![3.0]);
        cmd.set_start_point(Point::new(1.0, 1.0));
        let line = cmd.to_lineto().unwrap();
        assert_eq!(line.letter(), 'l');
        assert_eq!(line.end_point(), Point::new(1.0, 4.0));

        assert!(Command::close(Position::Absolute).to_lineto().is_none());
    }

    #[test]
    fn test_to_curveto_relative() {
        let item = EllipticalArcItem::new((10.0, 10.0), 0.0, false, true, Point::new(20.0, 0.0));
        let mut cmd = Command::elliptical_arc(Position::Relative, vec![item]);
        cmd.set_start_point(Point::new(100.0, 100.0));

        let curve = cmd.to_curveto().unwrap();
        assert_eq!(curve.letter(), 'c');
        let CommandKind::Curveto { points, .. } = &curve.kind else {
            panic!("expected curveto");
        };
        assert_eq!(points.len(), 9);
        let end = curve.end_point();
        assert!((end.x - 120.0).abs() < 1e-9 && (end.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_segmented_points() {
        let mut cmd = Command::curveto(
            CurveKind::Quadratic,
            Position::Absolute,
            pts(&[(1.0, 1.0), (2.0, 0.0), (3.0, 1.0), (4.0, 0.0)]),
        );
        cmd.set_start_point(Point::new(0.0, 0.0));
        assert_eq!(cmd.segmented_points(), pts(&[(0.0, 0.0), (2.0, 0.0), (4.0, 0.0)]));
    }

    #[test]
    fn test_transform_hv_axis_aligned() {
        let mut cmd = Command::horizontal(Position::Absolute, vec![10.0]);
        cmd.set_start_point(Point::new(0.0, 0.0));
        cmd.transform(&Transform::translate(5.0, 5.0).multiply(&Transform::scale(2.0, 2.0)));
        assert_eq!(cmd.start_point(), Point::new(5.0, 5.0));
        assert_eq!(cmd.end_point(), Point::new(25.0, 5.0));
    }

    #[test]
    fn test_render_modes() {
        let mut cmd = Command::lineto(Position::Absolute, pts(&[(15.0, 5.0), (15.0, 15.0)]));
        cmd.set_start_point(Point::new(5.0, 5.0));
        assert_eq!(cmd.render(CoordinateMode::Preserve, 6), "L15,5 15,15");
        assert_eq!(cmd.render(CoordinateMode::Relative, 6), "l10,0 0,10");

        let mut cmd = Command::horizontal(Position::Relative, vec![2.5]);
        cmd.set_start_point(Point::new(1.0, 0.0));
        assert_eq!(cmd.render(CoordinateMode::Preserve, 6), "h2.5");
        assert_eq!(cmd.render(CoordinateMode::Absolute, 6), "H3.5");

        let mut cmd = Command::curveto(
            CurveKind::Cubic,
            Position::Absolute,
            pts(&[(1.0, 2.0), (3.0, 4.0), (5.0, 6.0)]),
        );
        cmd.set_start_point(Point::new(0.0, 0.0));
        assert_eq!(cmd.render(CoordinateMode::Preserve, 6), "C1,2 3,4 5,6");

        assert_eq!(Command::close(Position::Relative).render(CoordinateMode::Absolute, 6), "Z");
    }

    #[test]
    fn test_render_first_moveto_relative_keeps_absolute_origin() {
        let mut cmd = Command::moveto(Position::Absolute, pts(&[(5.0, 5.0), (6.0, 7.0)]));
        cmd.mark_first();
        assert_eq!(cmd.render(CoordinateMode::Relative, 6), "m5,5 1,2");
    }
}
