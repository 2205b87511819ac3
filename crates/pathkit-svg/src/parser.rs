//! Path-data and transform-list text parsing.
//!
//! Errors carry the byte offset of the offending token.

use crate::arc::EllipticalArcItem;
use crate::command::{Command, CurveKind, Position};
use crate::error::{PathError, Result};
use crate::pathdata::PathData;
use crate::point::Point;
use crate::transform::Transform;

/// Byte cursor over the input text.
struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.as_bytes().get(self.pos + offset).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.bump();
        }
    }

    /// Skip whitespace and commas.
    fn skip_separators(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace() || b == b',') {
            self.bump();
        }
    }

    /// Whether a number starts after the next separators.
    fn at_number(&mut self) -> bool {
        self.skip_separators();
        matches!(self.peek(), Some(b'0'..=b'9' | b'.' | b'+' | b'-'))
    }

    /// Character at the cursor, for error messages.
    fn describe(&self) -> String {
        match self.src[self.pos..].chars().next() {
            Some(c) => format!("'{c}'"),
            None => "end of input".to_string(),
        }
    }

    fn error(&self, message: impl Into<String>) -> PathError {
        PathError::parse(self.pos, message)
    }

    fn digits(&mut self) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.bump();
        }
        self.pos - start
    }

    /// Parse a number: optional sign, digits with at most one decimal point,
    /// optional exponent. A second decimal point or a sign ends the number.
    fn number(&mut self) -> Result<f64> {
        self.skip_separators();
        let start = self.pos;

        if matches!(self.peek(), Some(b'+' | b'-')) {
            self.bump();
        }
        let mut mantissa = self.digits();
        if self.peek() == Some(b'.') {
            self.bump();
            mantissa += self.digits();
        }
        if mantissa == 0 {
            self.pos = start;
            return Err(self.error(format!("expected number, found {}", self.describe())));
        }

        if matches!(self.peek(), Some(b'e' | b'E')) {
            let signed = matches!(self.peek_at(1), Some(b'+' | b'-'));
            let digit_at = if signed { 2 } else { 1 };
            if self.peek_at(digit_at).is_some_and(|b| b.is_ascii_digit()) {
                self.pos += digit_at;
                self.digits();
            }
        }

        self.src[start..self.pos]
            .parse()
            .map_err(|_| PathError::parse(start, format!("invalid number '{}'", &self.src[start..self.pos])))
    }

    /// Parse a single-character `0`/`1` flag.
    fn flag(&mut self) -> Result<bool> {
        self.skip_separators();
        match self.peek() {
            Some(b'0') => {
                self.bump();
                Ok(false)
            }
            Some(b'1') => {
                self.bump();
                Ok(true)
            }
            _ => Err(self.error(format!("expected flag 0 or 1, found {}", self.describe()))),
        }
    }

    fn point(&mut self) -> Result<Point> {
        let x = self.number()?;
        let y = self.number()?;
        Ok(Point::new(x, y))
    }
}

/// Parse path-data text into a command sequence.
///
/// Follows the SVG grammar: a command letter may be followed by several
/// argument groups (implicit repetition), numbers may run together when a
/// sign or second decimal point separates them (`1-2`, `0.5.5`) and arc
/// flags are single characters (`0110,0`).
pub fn parse_path(d: &str) -> Result<PathData> {
    let mut cursor = Cursor::new(d);
    let mut commands = Vec::new();

    loop {
        cursor.skip_separators();
        let Some(byte) = cursor.peek() else {
            break;
        };
        let offset = cursor.pos;
        if !byte.is_ascii_alphabetic() {
            return Err(cursor.error(format!("expected command letter, found {}", cursor.describe())));
        }
        cursor.bump();

        let position = if byte.is_ascii_lowercase() {
            Position::Relative
        } else {
            Position::Absolute
        };
        let letter = byte.to_ascii_uppercase();

        if commands.is_empty() && letter != b'M' {
            return Err(PathError::parse(
                offset,
                format!("path data must begin with a moveto, found '{}'", byte as char),
            ));
        }

        let command = match letter {
            b'M' => Command::moveto(position, point_groups(&mut cursor, 1)?),
            b'L' => Command::lineto(position, point_groups(&mut cursor, 1)?),
            b'H' => Command::horizontal(position, values(&mut cursor)?),
            b'V' => Command::vertical(position, values(&mut cursor)?),
            b'C' => curve(&mut cursor, CurveKind::Cubic, position)?,
            b'S' => curve(&mut cursor, CurveKind::SmoothCubic, position)?,
            b'Q' => curve(&mut cursor, CurveKind::Quadratic, position)?,
            b'T' => curve(&mut cursor, CurveKind::SmoothQuadratic, position)?,
            b'A' => Command::elliptical_arc(position, arc_items(&mut cursor)?),
            b'Z' => Command::close(position),
            _ => {
                return Err(PathError::parse(
                    offset,
                    format!("unknown command '{}'", byte as char),
                ))
            }
        };
        commands.push(command);
    }

    PathData::from_commands(commands)
}

fn curve(cursor: &mut Cursor<'_>, kind: CurveKind, position: Position) -> Result<Command> {
    Ok(Command::curveto(kind, position, point_groups(cursor, kind.stride())?))
}

/// One or more groups of `stride` coordinate pairs.
fn point_groups(cursor: &mut Cursor<'_>, stride: usize) -> Result<Vec<Point>> {
    let mut points = Vec::new();
    loop {
        for _ in 0..stride {
            points.push(cursor.point()?);
        }
        if !cursor.at_number() {
            return Ok(points);
        }
    }
}

fn values(cursor: &mut Cursor<'_>) -> Result<Vec<f64>> {
    let mut values = vec![cursor.number()?];
    while cursor.at_number() {
        values.push(cursor.number()?);
    }
    Ok(values)
}

fn arc_items(cursor: &mut Cursor<'_>) -> Result<Vec<EllipticalArcItem>> {
    let mut items = Vec::new();
    loop {
        let rx = cursor.number()?;
        let ry = cursor.number()?;
        let rotation = cursor.number()?;
        let large_arc = cursor.flag()?;
        let sweep = cursor.flag()?;
        let to = cursor.point()?;
        items.push(EllipticalArcItem::new((rx, ry), rotation, large_arc, sweep, to));
        if !cursor.at_number() {
            return Ok(items);
        }
    }
}

/// Parse a transform list such as `translate(10,5) rotate(45, 5, 5)`.
///
/// Functions are returned in textual order; see [`Transform::concat`].
pub fn parse_transform_list(s: &str) -> Result<Vec<Transform>> {
    let mut cursor = Cursor::new(s);
    let mut transforms = Vec::new();

    loop {
        cursor.skip_separators();
        if cursor.peek().is_none() {
            return Ok(transforms);
        }
        transforms.push(transform_function(&mut cursor)?);
    }
}

/// Parse a transform list and compose it into one matrix.
pub fn parse_transform(s: &str) -> Result<Transform> {
    Ok(Transform::concat(&parse_transform_list(s)?))
}

fn transform_function(cursor: &mut Cursor<'_>) -> Result<Transform> {
    let name_start = cursor.pos;
    while cursor.peek().is_some_and(|b| b.is_ascii_alphabetic()) {
        cursor.bump();
    }
    if cursor.pos == name_start {
        return Err(cursor.error(format!("expected transform function, found {}", cursor.describe())));
    }
    let src = cursor.src;
    let name = &src[name_start..cursor.pos];

    cursor.skip_whitespace();
    if cursor.peek() != Some(b'(') {
        return Err(cursor.error(format!("expected '(' after {name}, found {}", cursor.describe())));
    }
    cursor.bump();

    let mut args = Vec::new();
    loop {
        cursor.skip_separators();
        match cursor.peek() {
            Some(b')') => {
                cursor.bump();
                break;
            }
            None => return Err(cursor.error(format!("unterminated {name}("))),
            _ => args.push(cursor.number()?),
        }
    }

    let transform = match (name, args.as_slice()) {
        ("matrix", &[a, b, c, d, e, f]) => Transform::matrix(a, b, c, d, e, f),
        ("translate", &[tx]) => Transform::translate(tx, 0.0),
        ("translate", &[tx, ty]) => Transform::translate(tx, ty),
        ("scale", &[s]) => Transform::scale(s, s),
        ("scale", &[sx, sy]) => Transform::scale(sx, sy),
        ("rotate", &[angle]) => Transform::rotate(angle),
        ("rotate", &[angle, cx, cy]) => Transform::rotate_about(angle, cx, cy),
        ("skewX", &[angle]) => Transform::skew_x(angle),
        ("skewY", &[angle]) => Transform::skew_y(angle),
        ("matrix" | "translate" | "scale" | "rotate" | "skewX" | "skewY", _) => {
            return Err(PathError::parse(
                name_start,
                format!("wrong number of arguments for {name}: {}", args.len()),
            ))
        }
        _ => {
            return Err(PathError::parse(
                name_start,
                format!("unknown transform function '{name}'"),
            ))
        }
    };
    Ok(transform)
}
