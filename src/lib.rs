//! A two phase solver for the 3x3x3 Rubik's cube. Scrambles come in as
//! 9-line facelet nets, get lifted to a cubie-level model, and are solved by
//! a pair of pruning-table-guided IDA* searches whose output is a string of
//! clockwise quarter-turns.

#![deny(missing_docs)]

pub mod coord;
pub mod cube333;
pub mod error;
