//! Scalar extraction
//!
//! Every value line in a Gudrun file starts with whitespace-separated values and ends in
//! a human-readable comment, e.g. `0.05  12.0  0.1          Wavelength range to use`.
//! These functions pull typed values out of the leading tokens and ignore the rest.
//! Nothing here defaults silently: an absent or inconvertible token is a
//! [`MalformedLineError`] carrying the line and the field index.

use crate::gudrun::error::MalformedLineError;
use std::str::FromStr;

/// The first whitespace-separated token.
pub fn first_word(line: &str) -> Result<&str, MalformedLineError> {
    nth_word(line, 0)
}

pub fn nth_word(line: &str, n: usize) -> Result<&str, MalformedLineError> {
    line.split_whitespace()
        .nth(n)
        .ok_or_else(|| MalformedLineError::new(line, n, "word"))
}

/// Parse the `n`th token as `T`.
pub fn nth_as<T: FromStr>(
    line: &str,
    n: usize,
    expected: &'static str,
) -> Result<T, MalformedLineError> {
    line.split_whitespace()
        .nth(n)
        .and_then(|token| token.parse().ok())
        .ok_or_else(|| MalformedLineError::new(line, n, expected))
}

pub fn nth_int(line: &str, n: usize) -> Result<i64, MalformedLineError> {
    nth_as(line, n, "integer")
}

pub fn nth_float(line: &str, n: usize) -> Result<f64, MalformedLineError> {
    nth_as(line, n, "float")
}

/// Parse the `n`th token as a non-negative integer (counts, spectrum numbers).
pub fn nth_unsigned(line: &str, n: usize) -> Result<u32, MalformedLineError> {
    nth_as(line, n, "non-negative integer")
}

pub fn first_n_ints(line: &str, n: usize) -> Result<Vec<i64>, MalformedLineError> {
    (0..n).map(|i| nth_int(line, i)).collect()
}

pub fn first_n_floats(line: &str, n: usize) -> Result<Vec<f64>, MalformedLineError> {
    (0..n).map(|i| nth_float(line, i)).collect()
}

/// Every token on the line that converts to `T`, in order.
pub fn extract_all<T: FromStr>(line: &str) -> Vec<T> {
    line.split_whitespace()
        .filter_map(|token| token.parse().ok())
        .collect()
}

pub fn extract_all_ints(line: &str) -> Vec<i64> {
    extract_all(line)
}

pub fn extract_all_floats(line: &str) -> Vec<f64> {
    extract_all(line)
}

/// The run of leading tokens that convert to `T`, stopping at the first that does not.
///
/// Variable-length value lists are read with this so that numbers inside the trailing
/// comment (`Beam profile values (Maximum of 50 allowed currently)`) are not picked up.
pub fn leading<T: FromStr>(line: &str) -> Vec<T> {
    line.split_whitespace()
        .map_while(|token| token.parse().ok())
        .collect()
}

pub fn bool_from_int(value: i64) -> bool {
    value != 0
}

/// The `n`th token read as an integer flag.
pub fn nth_bool(line: &str, n: usize) -> Result<bool, MalformedLineError> {
    nth_int(line, n).map(bool_from_int)
}

/// Mass numbers are written both as integers and as floats (`0` and `0.0`); they are
/// read as floats and accepted when they narrow to an integer without loss.
pub fn nth_mass_number(line: &str, n: usize) -> Result<u32, MalformedLineError> {
    let raw = nth_float(line, n)?;
    if raw >= 0.0 && raw.fract() == 0.0 && raw <= f64::from(u32::MAX) {
        Ok(raw as u32)
    } else {
        Err(MalformedLineError::new(line, n, "mass number"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const LINE: &str = "30  4980          Channel numbers for spike analysis";

    #[test]
    fn first_word_skips_leading_whitespace() {
        assert_eq!(first_word("   TABLES          Total cross section source"), Ok("TABLES"));
    }

    #[test]
    fn blank_line_has_no_first_word() {
        let err = first_word("   ").unwrap_err();
        assert_eq!(err.field, 0);
    }

    #[test]
    fn nth_values_ignore_trailing_comment() {
        assert_eq!(nth_int(LINE, 1), Ok(4980));
        assert_eq!(first_n_ints(LINE, 2), Ok(vec![30, 4980]));
        assert_eq!(nth_float("-0.0542          Density atoms/Å^3?", 0), Ok(-0.0542));
    }

    #[test]
    fn conversion_failure_reports_field_index() {
        let err = nth_int(LINE, 2).unwrap_err();
        assert_eq!(err.field, 2);
        assert_eq!(err.line, LINE);
        assert_eq!(err.expected, "integer");
    }

    #[test]
    fn extract_all_scans_every_token() {
        assert_eq!(
            extract_all_ints("4 5 6 7 8          Spectrum number(s) for incident beam monitor"),
            vec![4, 5, 6, 7, 8]
        );
        assert!(extract_all_floats("          Beam profile values").is_empty());
    }

    #[test]
    fn leading_stops_at_comment() {
        let line = "1.0  1.0          Beam profile values (Maximum of 50 allowed currently)";
        assert_eq!(extract_all_floats(line), vec![1.0, 1.0, 50.0]);
        assert_eq!(leading::<f64>(line), vec![1.0, 1.0]);
    }

    #[rstest]
    #[case("H  0  2.0", 0)]
    #[case("H  2.0  1.0", 2)]
    #[case("Ti  48  1.0", 48)]
    fn mass_numbers_narrow_losslessly(#[case] line: &str, #[case] expected: u32) {
        assert_eq!(nth_mass_number(line, 1), Ok(expected));
    }

    #[rstest]
    #[case("H  1.5  1.0")]
    #[case("H  -1  1.0")]
    #[case("H  x  1.0")]
    fn lossy_mass_numbers_are_rejected(#[case] line: &str) {
        assert!(nth_mass_number(line, 1).is_err());
    }

    #[test]
    fn bool_flags() {
        assert_eq!(nth_bool("0          Hard group edges?", 0), Ok(false));
        assert_eq!(nth_bool("1          Hard group edges?", 0), Ok(true));
        assert!(bool_from_int(-3));
    }
}
