#![warn(missing_docs)]

//! # `linksat`
//!
//! A solver for [Numberlink](https://en.wikipedia.org/wiki/Numberlink) puzzles.
//! Begin by describing a puzzle, either with a [`PuzzleBuilder`], from a flat list of termini with [`Puzzle::new`], or by parsing its text form.
//! Then call [`solve()`](Puzzle::solve), yielding a [`SolvedBoard`] which tells the color of every cell and which cells are linked.
//!
//! ```
//! use linksat::Puzzle;
//!
//! let puzzle: Puzzle = "A.A\nB.B\n".parse().unwrap();
//! let solved = puzzle.solve().unwrap();
//! assert_eq!(format!("{}", solved), "AaA\nBbB\n");
//! ```
//!
//! # Internals
//! The puzzle is expressed as a Boolean satisfiability problem (a "SAT") and handed to [`varisat`].
//!
//! Every cell carries one variable per color, and every pair of neighboring cells one variable for the edge between them.
//! We make the following assertions in SAT form:
//! 1. Every cell has exactly one color. Termini have the color of their pair.
//! 2. A terminus has exactly one selected incident edge; every other cell has exactly two.
//! 3. A selected edge joins two cells of the same color.
//!
//! These say nothing about loops: a satisfying assignment may select a closed cycle of edges away from every terminus.
//! Expressing "no cycles" directly would need many auxiliary variables, so instead we draw candidates from the solver one at a time,
//! walk the selected edges of each, and rule out any candidate containing a cycle before asking again.
//! See [`Search`] for the details.

pub use board::SolvedBoard;
pub use builder::PuzzleBuilder;
pub use cell::ColorId;
pub use config::{EdgeColoring, Refinement, SolveConfig};
pub use error::{BuildError, SolveError};
pub use location::{Coord, Dimension, Location};
pub use model::Model;
pub use puzzle::Puzzle;
pub use shape::{SquareStep, Step};
pub use solver::{Search, SearchStats};
pub use variable::{GridVariable, VariableIndex};

pub mod acyclic;
pub mod adjacency;
pub(crate) mod board;
pub(crate) mod builder;
pub(crate) mod cell;
pub(crate) mod config;
pub mod encoder;
pub(crate) mod error;
pub(crate) mod location;
pub(crate) mod logic;
pub(crate) mod model;
pub(crate) mod puzzle;
pub(crate) mod shape;
pub(crate) mod solver;
pub(crate) mod variable;
