//! genetic-algorithm solver for the 3x3x3 twisty cube.
//!
//! [`Cube`] models the sticker state and the 12 generator moves;
//! [`Solver`] searches for a solving move sequence with a
//! population-based heuristic search. the search gives no optimality or
//! convergence guarantee: replay the returned sequence and check
//! [`Cube::is_solved`] to learn whether it actually succeeded.

pub mod cube;
pub mod error;
pub mod fitness;
pub mod optimizer;
pub mod solver;

pub use cube::{Cube, Direction, Face, Move, ALL_MOVES, SCRAMBLE_LENGTH};
pub use error::SolverError;
pub use fitness::FitnessWeights;
pub use optimizer::simplify;
pub use solver::{Solver, SolverConfig};
