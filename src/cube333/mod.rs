//! The 3x3x3 cube at the cubie level: 8 corner and 12 edge pieces tracked by
//! permutation and orientation arrays. Centers never move and are not stored.

pub mod coordcube;
pub mod facelet;
pub mod moves;
pub mod two_phase_solver;

use crate::error::{IllegalStateError, TryFromIntToEnumError};

/// A corner piece, named by the slot it occupies when solved.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Corner {
    URF,
    UFL,
    ULB,
    UBR,
    DFR,
    DLF,
    DBL,
    DRB,
}

/// An edge piece, named by the slot it occupies when solved.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Edge {
    UF,
    UL,
    UB,
    UR,
    FR,
    FL,
    BL,
    BR,
    DF,
    DL,
    DB,
    DR,
}

/// The twist of a corner within its slot, measured against the U/D axis.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CornerTwist {
    /// The U/D sticker faces U or D.
    #[default]
    Oriented,
    /// Twisted one step clockwise.
    Clockwise,
    /// Twisted one step anticlockwise.
    AntiClockwise,
}

/// The flip of an edge within its slot.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EdgeFlip {
    /// Stickers match the solved facing.
    #[default]
    Oriented,
    /// Stickers swapped relative to the solved facing.
    Flipped,
}

impl Corner {
    /// All corners in slot order.
    pub const ARRAY: [Corner; 8] = [
        Corner::URF,
        Corner::UFL,
        Corner::ULB,
        Corner::UBR,
        Corner::DFR,
        Corner::DLF,
        Corner::DBL,
        Corner::DRB,
    ];
}

impl Edge {
    /// All edges in slot order.
    pub const ARRAY: [Edge; 12] = [
        Edge::UF,
        Edge::UL,
        Edge::UB,
        Edge::UR,
        Edge::FR,
        Edge::FL,
        Edge::BL,
        Edge::BR,
        Edge::DF,
        Edge::DL,
        Edge::DB,
        Edge::DR,
    ];

    /// Whether this edge belongs in the UD slice (the middle layer between U
    /// and D), i.e. is one of FR, FL, BL, BR.
    pub fn ud_slice(self) -> bool {
        matches!(self, Edge::FR | Edge::FL | Edge::BL | Edge::BR)
    }
}

impl From<Corner> for u8 {
    fn from(c: Corner) -> u8 {
        c as u8
    }
}

impl From<Edge> for u8 {
    fn from(e: Edge) -> u8 {
        e as u8
    }
}

impl From<CornerTwist> for u8 {
    fn from(t: CornerTwist) -> u8 {
        t as u8
    }
}

impl From<EdgeFlip> for u8 {
    fn from(f: EdgeFlip) -> u8 {
        f as u8
    }
}

impl TryFrom<u8> for Corner {
    type Error = TryFromIntToEnumError;

    fn try_from(n: u8) -> Result<Corner, TryFromIntToEnumError> {
        Corner::ARRAY
            .get(n as usize)
            .copied()
            .ok_or(TryFromIntToEnumError::OutOfBounds)
    }
}

impl TryFrom<u8> for Edge {
    type Error = TryFromIntToEnumError;

    fn try_from(n: u8) -> Result<Edge, TryFromIntToEnumError> {
        Edge::ARRAY
            .get(n as usize)
            .copied()
            .ok_or(TryFromIntToEnumError::OutOfBounds)
    }
}

impl TryFrom<u8> for CornerTwist {
    type Error = TryFromIntToEnumError;

    fn try_from(n: u8) -> Result<CornerTwist, TryFromIntToEnumError> {
        match n {
            0 => Ok(CornerTwist::Oriented),
            1 => Ok(CornerTwist::Clockwise),
            2 => Ok(CornerTwist::AntiClockwise),
            _ => Err(TryFromIntToEnumError::OutOfBounds),
        }
    }
}

impl TryFrom<u8> for EdgeFlip {
    type Error = TryFromIntToEnumError;

    fn try_from(n: u8) -> Result<EdgeFlip, TryFromIntToEnumError> {
        match n {
            0 => Ok(EdgeFlip::Oriented),
            1 => Ok(EdgeFlip::Flipped),
            _ => Err(TryFromIntToEnumError::OutOfBounds),
        }
    }
}

/// Cubie level representation of a cube. `cp[i]` is the corner piece sitting
/// in slot `i` and `co[i]` its twist there; likewise `ep`/`eo` for edges.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CubieCube {
    /// Corner permutation.
    pub cp: [Corner; 8],
    /// Corner orientations, riding the pieces in `cp`.
    pub co: [CornerTwist; 8],
    /// Edge permutation.
    pub ep: [Edge; 12],
    /// Edge orientations, riding the pieces in `ep`.
    pub eo: [EdgeFlip; 12],
}

impl CubieCube {
    /// The solved cube stored as a const.
    pub const SOLVED: Self = CubieCube {
        cp: Corner::ARRAY,
        co: [CornerTwist::Oriented; 8],
        ep: Edge::ARRAY,
        eo: [EdgeFlip::Oriented; 12],
    };

    /// Whether every piece is home and oriented.
    pub fn is_solved(&self) -> bool {
        *self == CubieCube::SOLVED
    }

    /// The corner twist coset: total twist modulo 3. `Oriented` on any
    /// reachable state.
    pub fn co_parity(&self) -> CornerTwist {
        let sum: u8 = self.co.iter().map(|&t| t as u8).sum();
        CornerTwist::try_from(sum % 3).unwrap()
    }

    /// The edge flip coset: total flip modulo 2. `Oriented` on any reachable
    /// state.
    pub fn eo_parity(&self) -> EdgeFlip {
        let sum: u8 = self.eo.iter().map(|&f| f as u8).sum();
        EdgeFlip::try_from(sum % 2).unwrap()
    }

    /// Whether corner and edge permutation parities disagree. Every face turn
    /// is a 4-cycle on both, so they agree on any reachable state.
    pub fn perm_parity(&self) -> bool {
        fn parity<const N: usize>(arr: &[u8; N]) -> bool {
            let mut inversions = 0;
            for i in 0..N {
                for j in i + 1..N {
                    if arr[j] < arr[i] {
                        inversions += 1;
                    }
                }
            }
            inversions % 2 == 1
        }

        parity(&self.cp.map(u8::from)) != parity(&self.ep.map(u8::from))
    }

    /// Whether the state violates any of the reachability invariants.
    pub fn illegal(&self) -> bool {
        self.co_parity() != CornerTwist::Oriented
            || self.eo_parity() != EdgeFlip::Oriented
            || self.perm_parity()
    }

    /// Check the reachability invariants, reporting which cosets are off.
    pub fn verify(&self) -> Result<(), IllegalStateError> {
        if self.illegal() {
            return Err(IllegalStateError {
                co: self.co_parity(),
                eo: self.eo_parity(),
                perm: self.perm_parity(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solved_detection() {
        assert!(CubieCube::SOLVED.is_solved());
        assert!(!CubieCube::SOLVED.make_move(crate::cube333::moves::Move333::U).is_solved());
    }

    #[test]
    fn single_twist_is_illegal() {
        let mut twist = CubieCube::SOLVED;
        twist.co[0] = CornerTwist::Clockwise;
        assert_eq!(
            twist.verify(),
            Err(IllegalStateError {
                co: CornerTwist::Clockwise,
                eo: EdgeFlip::Oriented,
                perm: false,
            })
        );
        twist.co[1] = CornerTwist::Clockwise;
        assert_eq!(twist.co_parity(), CornerTwist::AntiClockwise);
        twist.co[2] = CornerTwist::Clockwise;
        assert!(twist.verify().is_ok());
    }

    #[test]
    fn single_flip_is_illegal() {
        let mut flip = CubieCube::SOLVED;
        flip.eo[5] = EdgeFlip::Flipped;
        assert!(flip.illegal());
        flip.eo[6] = EdgeFlip::Flipped;
        assert!(flip.verify().is_ok());
    }

    #[test]
    fn lone_swap_is_illegal() {
        let mut swap = CubieCube::SOLVED;
        swap.ep.swap(0, 3);
        assert_eq!(
            swap.verify(),
            Err(IllegalStateError {
                co: CornerTwist::Oriented,
                eo: EdgeFlip::Oriented,
                perm: true,
            })
        );
        swap.cp.swap(0, 3);
        assert!(swap.verify().is_ok());
    }
}
