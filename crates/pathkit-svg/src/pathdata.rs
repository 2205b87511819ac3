//! Ordered command sequences.
//!
//! [`PathData`] owns its commands in a flat vector. Start points, close
//! targets and arc centers are derived by walking the vector in order, so a
//! command never holds a link to its neighbours.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use tracing::{debug, trace, warn};

use crate::command::{Command, CommandKind};
use crate::error::{PathError, Result};
use crate::format::FormatOptions;
use crate::options::{NormalizeOptions, TransformOptions};
use crate::point::Point;
use crate::transform::Transform;

/// An ordered sequence of path-data commands.
#[derive(Debug, Clone, PartialEq)]
pub struct PathData {
    commands: Vec<Command>,
    absolutized: bool,
}

impl Default for PathData {
    fn default() -> Self {
        Self::new()
    }
}

impl PathData {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            absolutized: true,
        }
    }

    /// Parse path-data text.
    pub fn parse(d: &str) -> Result<Self> {
        crate::parser::parse_path(d)
    }

    /// Build a sequence from commands, deriving start points and close targets.
    ///
    /// Fails if the first command is not a moveto or a command has the wrong
    /// number of coordinates.
    pub fn from_commands(commands: Vec<Command>) -> Result<Self> {
        let mut path = Self {
            commands,
            absolutized: false,
        };
        path.resequence()?;
        Ok(path)
    }

    /// Append a command, linking it to the current end of the sequence.
    pub fn append(&mut self, command: Command) -> Result<()> {
        self.commands.push(command);
        let index = self.commands.len() - 1;
        let linked = if index == 0 {
            link_first(&mut self.commands[0])
        } else {
            let start = self.commands[index - 1].end_point();
            let subpath_start = match self.commands[index].kind {
                CommandKind::Close { .. } => self.commands[..index]
                    .iter()
                    .rev()
                    .find_map(Command::moveto_point)
                    .unwrap_or(start),
                _ => start,
            };
            link_next(&mut self.commands[index], start, subpath_start)
        };
        if let Err(err) = linked {
            self.commands.pop();
            return Err(err);
        }
        if self.commands[index].is_relative() {
            self.absolutized = false;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    /// Whether every command holds absolute coordinates.
    pub fn is_absolutized(&self) -> bool {
        self.absolutized
    }

    /// Point the first moveto jumps to.
    pub fn first_point(&self) -> Option<Point> {
        self.commands.first().map(Command::start_point)
    }

    /// End point of the last command.
    pub fn last_point(&self) -> Option<Point> {
        self.commands.last().map(Command::end_point)
    }

    /// Rewrite every relative command with absolute coordinates.
    ///
    /// Rendering in [`CoordinateMode::Preserve`](crate::CoordinateMode::Preserve)
    /// afterwards produces absolute text. Calling this twice is a no-op.
    pub fn absolutize(&mut self) {
        self.absolutize_coordinates();
        for command in &mut self.commands {
            command.set_repr_relative(false);
        }
    }

    /// Absolutize the stored coordinates but keep each command's rendering
    /// preference.
    fn absolutize_coordinates(&mut self) {
        if self.absolutized {
            return;
        }
        let mut current = self.first_point().unwrap_or(Point::ORIGIN);
        for command in &mut self.commands {
            current = command.absolutize(current);
        }
        debug!("Absolutized {} commands", self.commands.len());
        self.absolutized = true;
    }

    /// Apply `t` to every command.
    ///
    /// Horizontal/vertical linetos and arcs need an axis-aligned transform.
    /// Otherwise the call fails with [`PathError::NotRepresentable`] and the
    /// sequence is left unchanged, unless `options` asks for a remedy. Arcs
    /// under a non-uniform scale are repaired approximately.
    pub fn transform(&mut self, t: &Transform, options: TransformOptions) -> Result<()> {
        debug!(
            "Transforming {} commands by {} (collapse_hv_lineto={}, collapse_elliptical_arc={}, allow_arc_approximation={})",
            self.commands.len(),
            t,
            options.collapse_hv_lineto,
            options.collapse_elliptical_arc,
            options.allow_arc_approximation
        );

        self.check_representable(t, options)?;
        self.absolutize_coordinates();

        for (index, command) in self.commands.iter_mut().enumerate() {
            if options.collapse_hv_lineto {
                if let Some(line) = command.to_lineto() {
                    trace!("Collapsing command #{} {} to lineto", index, command.letter());
                    *command = line;
                }
            }
            if options.collapse_elliptical_arc {
                if let Some(curve) = command.to_curveto() {
                    trace!("Collapsing command #{} {} to curveto", index, command.letter());
                    *command = curve;
                }
            } else if matches!(command.kind, CommandKind::EllipticalArc { .. })
                && !t.preserves_arc_shape()
            {
                warn!(
                    "Repairing arc parameters of command #{} under {}; the result is approximate",
                    index, t
                );
            }
            command.transform(t);
        }
        Ok(())
    }

    /// Return a transformed copy, leaving `self` untouched.
    pub fn transformed(&self, t: &Transform, options: TransformOptions) -> Result<Self> {
        let mut path = self.clone();
        path.transform(t, options)?;
        Ok(path)
    }

    fn check_representable(&self, t: &Transform, options: TransformOptions) -> Result<()> {
        for (index, command) in self.commands.iter().enumerate() {
            let refusal = match command.kind {
                CommandKind::HorizontalVerticalLineto { .. }
                    if !options.collapse_hv_lineto && !t.is_axis_aligned() =>
                {
                    Some((
                        "the transform rotates or skews the axes",
                        vec!["collapse_hv_lineto"],
                    ))
                }
                CommandKind::EllipticalArc { .. }
                    if !options.collapse_elliptical_arc
                        && !options.allow_arc_approximation
                        && !t.is_axis_aligned() =>
                {
                    Some((
                        "the transform rotates or skews the ellipse axes",
                        vec!["collapse_elliptical_arc", "allow_arc_approximation"],
                    ))
                }
                _ => None,
            };
            if let Some((reason, remedies)) = refusal {
                return Err(PathError::NotRepresentable {
                    command: format!("{} ({})", command.letter(), command.description()),
                    index,
                    transform: *t,
                    reason: reason.to_string(),
                    remedies,
                });
            }
        }
        Ok(())
    }

    /// Rewrite the sequence into a compact canonical form.
    ///
    /// The sequence is absolutized, optionally collapsed to lines and cubic
    /// curves, moveto implicit linetos are split out (or folded in with
    /// `allow_implicit_lineto`) and consecutive commands with the same letter
    /// are merged. Consecutive movetos are never merged. Besides the split of
    /// multi-point movetos the command count never grows, and the first and
    /// last points are kept.
    pub fn normalize(&mut self, options: NormalizeOptions) {
        let before = self.commands.len();
        self.absolutize_coordinates();

        let mut out: Vec<Command> = Vec::with_capacity(before);
        for mut command in std::mem::take(&mut self.commands) {
            if options.collapse_hv_lineto {
                if let Some(line) = command.to_lineto() {
                    command = line;
                }
            }
            if options.collapse_elliptical_arc {
                if let Some(curve) = command.to_curveto() {
                    command = curve;
                }
            }
            command.set_repr_relative(options.repr_relative);

            if let Some(previous) = out.last_mut() {
                if merge_into(previous, &command, options.allow_implicit_lineto) {
                    continue;
                }
            }

            match split_moveto(&command, options.allow_implicit_lineto) {
                Some((moveto, lineto)) => {
                    out.push(moveto);
                    out.push(lineto);
                }
                None => out.push(command),
            }
        }

        self.commands = out;
        // Merging and splitting leave every start point where it was; the pass
        // re-derives first-command flags, close targets and arc centers.
        let relinked = self.resequence();
        debug_assert!(
            relinked.is_ok(),
            "normalized commands failed to relink: {:?}",
            relinked
        );
        self.absolutized = true;
        debug!(
            "Normalized {} commands into {}",
            before,
            self.commands.len()
        );
    }

    /// Render the sequence as path-data text.
    pub fn render(&self, options: &FormatOptions) -> String {
        self.commands
            .iter()
            .map(|c| c.render(options.coordinates, options.precision))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Derive start points and close targets in one forward pass.
    fn resequence(&mut self) -> Result<()> {
        let Some((first, rest)) = self.commands.split_first_mut() else {
            self.absolutized = true;
            return Ok(());
        };
        link_first(first)?;
        let mut current = first.end_point();
        let mut subpath_start = first.moveto_point().unwrap_or(current);
        for command in rest {
            link_next(command, current, subpath_start)?;
            if let Some(point) = command.moveto_point() {
                subpath_start = point;
            }
            current = command.end_point();
        }
        self.absolutized = self.commands.iter().all(|c| !c.is_relative());
        Ok(())
    }
}

fn link_first(command: &mut Command) -> Result<()> {
    command.validate()?;
    if !command.is_moveto() {
        return Err(PathError::invalid_path(format!(
            "path data must begin with a moveto, found {} ({})",
            command.letter(),
            command.description()
        )));
    }
    command.mark_first();
    Ok(())
}

/// Link a command to the end of the sequence before it. `subpath_start` is
/// where a close returns to.
fn link_next(command: &mut Command, start: Point, subpath_start: Point) -> Result<()> {
    command.validate()?;
    command.set_start_point(start);
    command.set_close_target(subpath_start);
    Ok(())
}

/// Merge `next` into `previous` when they share a letter. Returns false when
/// the commands must stay apart.
fn merge_into(previous: &mut Command, next: &Command, allow_implicit_lineto: bool) -> bool {
    match (&mut previous.kind, &next.kind) {
        (CommandKind::Moveto { points, .. }, CommandKind::Lineto { points: more })
            if allow_implicit_lineto =>
        {
            points.extend_from_slice(more);
            true
        }
        (CommandKind::Lineto { points }, CommandKind::Lineto { points: more }) => {
            points.extend_from_slice(more);
            true
        }
        (
            CommandKind::Curveto { kind, points },
            CommandKind::Curveto {
                kind: next_kind,
                points: more,
            },
        ) if kind == next_kind => {
            points.extend_from_slice(more);
            true
        }
        (CommandKind::EllipticalArc { items }, CommandKind::EllipticalArc { items: more }) => {
            items.extend(more.iter().cloned());
            true
        }
        (
            CommandKind::HorizontalVerticalLineto { axis, values },
            CommandKind::HorizontalVerticalLineto {
                axis: next_axis,
                values: more,
            },
        ) if axis == next_axis => {
            if let Some(last) = more.last() {
                *values = vec![*last];
            }
            true
        }
        (CommandKind::Close { .. }, CommandKind::Close { .. }) => true,
        _ => false,
    }
}

/// Split a multi-point moveto into a moveto and a lineto.
fn split_moveto(command: &Command, allow_implicit_lineto: bool) -> Option<(Command, Command)> {
    if allow_implicit_lineto {
        return None;
    }
    let CommandKind::Moveto { points, .. } = &command.kind else {
        return None;
    };
    if points.len() < 2 {
        return None;
    }
    let mut moveto = Command::moveto(command.position(), points[..1].to_vec());
    let mut lineto = Command::lineto(command.position(), points[1..].to_vec());
    moveto.set_repr_relative(command.repr_relative());
    lineto.set_repr_relative(command.repr_relative());
    Some((moveto, lineto))
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&FormatOptions::default()))
    }
}

impl FromStr for PathData {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Index<usize> for PathData {
    type Output = Command;

    fn index(&self, index: usize) -> &Command {
        &self.commands[index]
    }
}

impl<'a> IntoIterator for &'a PathData {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}
