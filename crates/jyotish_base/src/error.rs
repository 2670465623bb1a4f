//! Error types for jyotish calculations.

use thiserror::Error;

use crate::graha::Graha;

/// Errors from jyotish base calculations.
///
/// Inapplicability (a node asked for a classical-only table) is not an
/// error: it is reported through `Dignity::NotApplicable` or an absent
/// table entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum JyotishError {
    /// Non-finite or otherwise unusable numeric input.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// Dasha query outside `[birth, horizon)`.
    #[error("instant {query_ms} ms is outside the dasha range [{start_ms}, {end_ms}) ms")]
    OutOfRange {
        query_ms: i64,
        start_ms: i64,
        end_ms: i64,
    },
    /// A calculation needed a graha that the position snapshot lacks.
    #[error("position for {0:?} is missing from the snapshot")]
    MissingPosition(Graha),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_input() {
        let e = JyotishError::InvalidInput("longitude is NaN");
        assert_eq!(e.to_string(), "invalid input: longitude is NaN");
    }

    #[test]
    fn display_out_of_range() {
        let e = JyotishError::OutOfRange {
            query_ms: -5,
            start_ms: 0,
            end_ms: 10,
        };
        assert!(e.to_string().contains("[0, 10)"));
    }

    #[test]
    fn display_missing_position() {
        let e = JyotishError::MissingPosition(Graha::Chandra);
        assert!(e.to_string().contains("Chandra"));
    }
}
