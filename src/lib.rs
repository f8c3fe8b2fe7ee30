#![warn(missing_docs)]

//! # `crossword-csp`
//!
//! A crossword filler: given the shape of a grid and a list of words, place a distinct word in every slot so
//! that crossing slots agree on their shared letters.
//! Begin by describing a grid, either with a [`StructureBuilder`](builder::StructureBuilder) or by parsing text
//! with [`parse_structure`]. Pair it with a word list using [`build`], then call [`solve`] for an
//! [`Assignment`], or drive a [`Solver`] directly for budgets and statistics.
//! Print a result with [`Solution`].
//!
//! # Internals
//! The grid is treated as a constraint satisfaction problem.
//! Every maximal run of two or more fillable cells, across or down, is a [`Variable`]; its domain is the set of
//! candidate words. Two variables are constrained against each other exactly when they share a cell.
//!
//! A high level overview is as follows:
//!
//! 1. Express the crossings as an undirected graph with one vertex per variable and one edge per shared cell.
//! 2. Enforce node consistency: drop every candidate whose length differs from its slot's.
//! 3. Enforce arc consistency with AC-3: drop every candidate with no compatible partner in some crossing slot.
//! If any domain empties along the way there is no fill and search is skipped.
//! 4. Backtrack over what is left. The next variable is the one with the fewest candidates, ties going to the
//! one with the most crossings; candidates are tried least constraining first.

pub use assignment::Assignment;
pub use builder::StructureBuilder;
pub use cell::Solution;
pub use consistency::{ac3, revise};
pub use domain::Domains;
pub use location::Location;
pub use model::{build, ConstraintModel};
pub use parse::{parse_structure, parse_words};
pub use solver::{solve, SearchBudget, Solver, SolverFailure, Statistics};
pub use structure::Structure;
pub use variable::{Direction, Variable};

pub(crate) mod location;
/// Slots and their reading directions.
pub mod variable;
/// Incremental construction of structures.
pub mod builder;
/// Grid occupancy and the slots derived from it.
pub mod structure;
/// The constraint graph between crossing slots.
pub mod model;
/// Candidate words per slot.
pub mod domain;
/// Arc consistency.
pub mod consistency;
/// Words placed in slots.
pub mod assignment;
/// Laying out and printing filled grids.
pub mod cell;
/// Text loaders for structures and word lists.
pub mod parse;
/// Backtracking search.
pub mod solver;
/// JavaScript bindings.
#[cfg(feature = "wasm")]
pub mod wasm;
