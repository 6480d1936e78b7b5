//! Input validation limits for resource protection

/// Maximum vertex count accepted in a graph header (4M)
pub const MAX_VERTEX_COUNT: usize = 4 * 1024 * 1024;

/// Maximum vertex count for dense matrix algorithms (4096, i.e. 16M cells)
pub const MAX_MATRIX_VERTICES: usize = 4096;

/// Validation error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    TooManyVertices { count: usize, max: usize },
    MatrixTooLarge { count: usize, max: usize },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooManyVertices { count, max } => {
                write!(f, "Too many vertices: {} (max {})", count, max)
            }
            Self::MatrixTooLarge { count, max } => {
                write!(
                    f,
                    "Graph too large for a dense matrix: {} vertices (max {})",
                    count, max
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate the vertex count declared in a graph header
pub fn validate_vertex_count(count: usize) -> Result<(), ValidationError> {
    if count > MAX_VERTEX_COUNT {
        return Err(ValidationError::TooManyVertices {
            count,
            max: MAX_VERTEX_COUNT,
        });
    }
    Ok(())
}

/// Validate that a dense `count x count` matrix may be allocated
pub fn validate_matrix_size(count: usize) -> Result<(), ValidationError> {
    if count > MAX_MATRIX_VERTICES {
        return Err(ValidationError::MatrixTooLarge {
            count,
            max: MAX_MATRIX_VERTICES,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_vertex_count() {
        assert!(validate_vertex_count(0).is_ok());
        assert!(validate_vertex_count(MAX_VERTEX_COUNT).is_ok());
        assert!(validate_vertex_count(MAX_VERTEX_COUNT + 1).is_err());
    }

    #[test]
    fn test_validate_matrix_size() {
        assert!(validate_matrix_size(100).is_ok());
        assert_eq!(
            validate_matrix_size(MAX_MATRIX_VERTICES + 1),
            Err(ValidationError::MatrixTooLarge {
                count: MAX_MATRIX_VERTICES + 1,
                max: MAX_MATRIX_VERTICES
            })
        );
    }
}
