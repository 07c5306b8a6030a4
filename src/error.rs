use thiserror::Error;
use varisat::solver::SolverError;

use crate::location::Location;

/// Reasons a puzzle cannot be constructed.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum BuildError {
    /// A terminus was placed outside the board.
    #[error("location {location} is outside the {width}x{height} board")]
    OutOfBounds { location: Location, width: usize, height: usize },
    /// Two termini were placed on the same cell.
    #[error("location {location} holds more than one terminus")]
    DuplicateTerminus { location: Location },
    /// A flat coordinate list of odd length, which cannot be split into endpoint pairs.
    #[error("{count} coordinates cannot be split into endpoint pairs")]
    UnpairedCoordinate { count: usize },
    /// A label in a text board which does not mark exactly two cells.
    #[error("label '{label}' marks {count} cells; every label must mark exactly two")]
    UnpairedLabel { label: char, count: usize },
    /// A text board whose rows differ in length.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: usize, found: usize, expected: usize },
    /// A board with no cells.
    #[error("the board has no cells")]
    EmptyBoard,
    /// A character in a text board which is neither `.` nor a label.
    #[error("unexpected character {found:?} at {location}")]
    InvalidCharacter { found: char, location: Location },
}

/// Reasons a [`Search`](crate::solver::Search) may fail.
#[derive(Debug, Error)]
pub enum SolveError {
    /// The formula has no satisfying assignment at all; the puzzle as stated is unsolvable.
    #[error("the puzzle has no solution")]
    Unsatisfiable,
    /// The SAT solver ran out of candidates, and every one it produced contained a cycle.
    #[error("all {candidates} candidate solutions contain a cycle")]
    NoAcyclicSolution { candidates: usize },
    /// The configured candidate budget ran out before an acyclic candidate turned up.
    #[error("gave up after {limit} candidate solutions, all containing a cycle")]
    CandidateLimit { limit: usize },
    /// The SAT solver itself failed.
    #[error("SAT solver failed: {0}")]
    Oracle(#[from] SolverError),
}
