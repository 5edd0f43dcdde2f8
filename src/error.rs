//! Error types for textarea_core.
//!
//! Navigation and layout never fail; out-of-range requests are clamped. The
//! errors here exist for boundary validation of host-supplied data, chiefly
//! [`GlyphPositions::validate`](crate::GlyphPositions::validate).

use std::fmt;

/// Result type alias for textarea_core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for textarea_core operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Glyph-position table length does not match the text it describes
    /// (expected text length + 1 boundaries).
    PositionCountMismatch { expected: usize, actual: usize },
    /// Glyph-position boundaries decrease at the given index; the metric
    /// provider produced a negative advance.
    NonMonotonicPositions { index: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PositionCountMismatch { expected, actual } => {
                write!(
                    f,
                    "glyph position table has {actual} boundaries, expected {expected}"
                )
            }
            Self::NonMonotonicPositions { index } => {
                write!(f, "glyph positions decrease at boundary {index}")
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::PositionCountMismatch {
            expected: 12,
            actual: 3,
        };
        assert!(err.to_string().contains("3 boundaries"));
        assert!(err.to_string().contains("expected 12"));

        let err = Error::NonMonotonicPositions { index: 7 };
        assert!(err.to_string().contains("boundary 7"));
    }
}
