//! Error types for Trellis Core

use crate::limits::ValidationError;
use crate::parse::VertexId;
use thiserror::Error;

/// Result type alias using Trellis's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Trellis error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Format error on line {line}: {message}")]
    Format { line: usize, message: String },

    #[error("Start vertex {start} out of range (vertex count {vertex_count})")]
    StartOutOfRange { start: VertexId, vertex_count: usize },

    #[error("Vertex {vertex} out of range (vertex count {vertex_count})")]
    VertexOutOfRange { vertex: VertexId, vertex_count: usize },

    #[error("Negative edge weight {weight} on {from} -> {to}")]
    NegativeWeight { from: VertexId, to: VertexId, weight: i64 },

    #[error("Adjacency list has {lists} vertex lists, expected {vertex_count}")]
    ListCountMismatch { lists: usize, vertex_count: usize },

    #[error("Distance matrix is not square: row {row} has {len} entries, expected {expected}")]
    NonSquareMatrix { row: usize, len: usize, expected: usize },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Negative cycle through vertex {vertex}")]
    NegativeCycle { vertex: VertexId },

    #[error("Cycle detected: {}", join_cycle(.cycle))]
    CycleDetected { cycle: Vec<VertexId> },

    #[error("Operation cancelled")]
    Cancelled,
}

/// Broad classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed graph description text
    Format,
    /// Caller passed arguments the operation does not accept
    Precondition,
    /// The computation would complete but its output is not meaningful
    UnspecifiedResult,
    /// Stopped through a [`CancelToken`](crate::CancelToken)
    Cancelled,
}

impl Error {
    pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Format { .. } => ErrorKind::Format,
            Self::StartOutOfRange { .. }
            | Self::VertexOutOfRange { .. }
            | Self::NegativeWeight { .. }
            | Self::ListCountMismatch { .. }
            | Self::NonSquareMatrix { .. }
            | Self::Validation(_) => ErrorKind::Precondition,
            Self::NegativeCycle { .. } | Self::CycleDetected { .. } => {
                ErrorKind::UnspecifiedResult
            }
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }
}

fn join_cycle(cycle: &[VertexId]) -> String {
    cycle
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(Error::format(1, "bad").kind(), ErrorKind::Format);
        assert_eq!(
            Error::StartOutOfRange {
                start: 3,
                vertex_count: 2
            }
            .kind(),
            ErrorKind::Precondition
        );
        assert_eq!(
            Error::ListCountMismatch {
                lists: 1,
                vertex_count: 5
            }
            .kind(),
            ErrorKind::Precondition
        );
        assert_eq!(
            Error::NegativeCycle { vertex: 0 }.kind(),
            ErrorKind::UnspecifiedResult
        );
        assert_eq!(Error::Cancelled.kind(), ErrorKind::Cancelled);
    }

    #[test]
    fn test_cycle_message() {
        let err = Error::CycleDetected {
            cycle: vec![0, 1, 2, 0],
        };
        assert_eq!(err.to_string(), "Cycle detected: 0 -> 1 -> 2 -> 0");
    }
}
