//! This module defines general error types used throughout the crate.

use crate::cube333::{CornerTwist, EdgeFlip};
use thiserror::Error;

/// Error type for converting integers to (C like) enums using TryFrom
#[derive(Debug, Error)]
pub enum TryFromIntToEnumError {
    /// attempted to convert integer into enum value, but integer was out of bounds
    #[error("attempted to convert integer into enum value, but integer was out of bounds")]
    OutOfBounds,
}

/// Error for a cube state that no sequence of face turns can produce.
/// A single twisted corner, a single flipped edge, or a lone swapped pair of
/// pieces each put the state outside the reachable group.
#[derive(Debug, PartialEq, Eq, Error)]
#[error("the cube state is not reachable from a solved cube")]
pub struct IllegalStateError {
    /// The corner twist coset the state is in.
    pub co: CornerTwist,
    /// The edge flip coset the state is in.
    pub eo: EdgeFlip,
    /// Whether corner and edge permutation parities disagree.
    pub perm: bool,
}
