//! Error types for OBJ parsing

use thiserror::Error;

/// Errors raised while parsing an OBJ document.
///
/// Every variant carries the 1-based line number of the statement that
/// triggered it. Parsing stops at the first error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjError {
    /// Malformed statement shape
    #[error("line {line}: {message}")]
    Grammar { line: usize, message: String },

    /// Geometry that cannot be represented (short faces, zero indices)
    #[error("line {line}: {message}")]
    Geometry { line: usize, message: String },

    /// A coordinate, index or smoothing group token is not a valid number
    #[error("line {line}: invalid number `{token}`")]
    NumericFormat { line: usize, token: String },
}

impl ObjError {
    /// Line number of the offending statement.
    pub fn line(&self) -> usize {
        match self {
            ObjError::Grammar { line, .. }
            | ObjError::Geometry { line, .. }
            | ObjError::NumericFormat { line, .. } => *line,
        }
    }
}

/// Result type for OBJ parsing
pub type Result<T> = std::result::Result<T, ObjError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_line_number() {
        let err = ObjError::Geometry {
            line: 12,
            message: "Face statement has less than 3 vertices".to_string(),
        };
        assert_eq!(err.to_string(), "line 12: Face statement has less than 3 vertices");
        assert_eq!(err.line(), 12);

        let err = ObjError::NumericFormat { line: 3, token: "1.0x".to_string() };
        assert_eq!(err.to_string(), "line 3: invalid number `1.0x`");
    }
}
