use thiserror::Error;

/// errors surfaced by move validation and solver configuration.
/// a search that merely fails to find a solution is not an error; `solve`
/// reports that by returning the best sequence it saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SolverError {
    #[error("invalid move: face index {0} is outside 0..6")]
    InvalidFace(u8),

    #[error("invalid move: direction {0} is neither -1 nor +1")]
    InvalidDirection(i8),

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
