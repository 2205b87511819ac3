//! Canonical number and point formatting.

use crate::point::Point;

pub use crate::options::{CoordinateMode, FormatOptions};

/// Format a number with at most `precision` fractional digits.
///
/// Trailing zeros and a trailing decimal point are removed, and negative zero
/// is written as `0`.
pub fn format_number(value: f64, precision: usize) -> String {
    let mut s = format!("{:.*}", precision, value);
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// Format a point as `x,y`.
pub fn format_point(p: Point, precision: usize) -> String {
    format!(
        "{},{}",
        format_number(p.x, precision),
        format_number(p.y, precision)
    )
}

/// Format an arc flag pair as `large,sweep`.
pub(crate) fn format_flags(large_arc: bool, sweep: bool) -> String {
    format!("{},{}", u8::from(large_arc), u8::from(sweep))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_trims() {
        assert_eq!(format_number(1.0, 6), "1");
        assert_eq!(format_number(1.5, 6), "1.5");
        assert_eq!(format_number(0.1 + 0.2, 6), "0.3");
        assert_eq!(format_number(-2.25, 6), "-2.25");
        assert_eq!(format_number(100.0, 0), "100");
    }

    #[test]
    fn test_format_number_precision() {
        assert_eq!(format_number(1.23456789, 3), "1.235");
        assert_eq!(format_number(1.23456789, 6), "1.234568");
        assert_eq!(format_number(2.0004, 3), "2");
    }

    #[test]
    fn test_format_number_negative_zero() {
        assert_eq!(format_number(-0.0, 6), "0");
        assert_eq!(format_number(-0.0000001, 6), "0");
    }

    #[test]
    fn test_format_point() {
        assert_eq!(format_point(Point::new(5.0, -0.5), 6), "5,-0.5");
    }

    #[test]
    fn test_format_flags() {
        assert_eq!(format_flags(false, true), "0,1");
    }
}
