//! Coordinate projections of the cubie model. Each newtype collapses one
//! aspect of the cube state into a small integer index, matching the pruning
//! tables built over the same projections.

use super::CubieCube;
use crate::coord::Coordinate;

/// Corner orientation coordinate: the twists of the first seven corners read
/// as a base 3 number (range 0..2187). The eighth twist is determined by the
/// others on any reachable cube.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct COCoord(pub u16);

/// Edge orientation coordinate: the flips of the first eleven edges read as a
/// base 2 number (range 0..2048).
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct EOCoord(pub u16);

/// The set of slots holding the four UD-slice edges, ignoring their order
/// (range 0..495). The solved cube sits at 425, not 0.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct SliceCoord(pub u16);

/// Corner permutation coordinate: the Lehmer rank of `cp` (range 0..40320).
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct CPCoord(pub u16);

/// The permutation the U/D edges induce on the eight U/D slots, as a Lehmer
/// rank (range 0..40320). Only meaningful on a domino-reduced cube; anything
/// else has a middle edge in a U/D slot, which is a fatal inconsistency.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct UdEdgeCoord(pub u16);

fn to_o_coord<const COUNT: usize, const STATES: u16>(arr: &[u8; COUNT]) -> u16 {
    arr.iter()
        .take(COUNT - 1)
        .fold(0, |acc, &o| acc * STATES + o as u16)
}

fn to_p_coord<const COUNT: usize>(arr: &[u8; COUNT]) -> u16 {
    (0..COUNT).fold(0, |acc, i| {
        let smaller_right = arr[i + 1..].iter().filter(|&&x| x < arr[i]).count();
        acc * (COUNT - i) as u16 + smaller_right as u16
    })
}

fn choose(n: usize, k: usize) -> u16 {
    let mut c: usize = 1;
    for i in 0..k {
        c = c * (n - i) / (i + 1);
    }
    c as u16
}

impl Coordinate<CubieCube> for COCoord {
    fn from_puzzle(puzzle: &CubieCube) -> Self {
        COCoord(to_o_coord::<8, 3>(&puzzle.co.map(|t| t.into())))
    }

    fn count() -> usize {
        // 3^7
        2187
    }

    fn repr(self) -> usize {
        self.0 as usize
    }
}

impl Coordinate<CubieCube> for EOCoord {
    fn from_puzzle(puzzle: &CubieCube) -> Self {
        EOCoord(to_o_coord::<12, 2>(&puzzle.eo.map(|f| f.into())))
    }

    fn count() -> usize {
        // 2^11
        2048
    }

    fn repr(self) -> usize {
        self.0 as usize
    }
}

impl Coordinate<CubieCube> for SliceCoord {
    fn from_puzzle(puzzle: &CubieCube) -> Self {
        // Combinatorial rank of the occupied slot set: walk the slots with a
        // countdown of slice edges still to be seen, charging C(11-pos, r-1)
        // for every non-slice occupant passed while any remain.
        let mut idx = 0;
        let mut r = 4;
        for pos in 0..12 {
            if puzzle.ep[pos].ud_slice() {
                r -= 1;
                if r == 0 {
                    break;
                }
            } else if r > 0 {
                idx += choose(11 - pos, r - 1);
            }
        }
        SliceCoord(idx)
    }

    fn count() -> usize {
        // 12 choose 4
        495
    }

    fn repr(self) -> usize {
        self.0 as usize
    }
}

impl Coordinate<CubieCube> for CPCoord {
    fn from_puzzle(puzzle: &CubieCube) -> Self {
        CPCoord(to_p_coord::<8>(&puzzle.cp.map(|c| c.into())))
    }

    fn count() -> usize {
        // 8!
        40320
    }

    fn repr(self) -> usize {
        self.0 as usize
    }
}

/// The eight U/D-layer slots, top layer then bottom layer.
const UD_SLOTS: [usize; 8] = [0, 1, 2, 3, 8, 9, 10, 11];

impl Coordinate<CubieCube> for UdEdgeCoord {
    fn from_puzzle(puzzle: &CubieCube) -> Self {
        let mut perm = [0; 8];
        for (i, &slot) in UD_SLOTS.iter().enumerate() {
            perm[i] = match puzzle.ep[slot] as u8 {
                e @ 0..=3 => e,
                e @ 8..=11 => e - 4,
                _ => panic!("a middle layer edge occupies a U/D slot"),
            };
        }
        UdEdgeCoord(to_p_coord::<8>(&perm))
    }

    fn count() -> usize {
        // 8!
        40320
    }

    fn repr(self) -> usize {
        self.0 as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube333::moves::{Move333, Phase2Move};
    use crate::cube333::Edge;

    use std::collections::HashSet;

    use itertools::Itertools;
    use proptest::collection::vec;
    use proptest::prelude::*;

    #[test]
    fn solved_coordinates() {
        let solved = &CubieCube::SOLVED;
        assert_eq!(COCoord::from_puzzle(solved), COCoord(0));
        assert_eq!(EOCoord::from_puzzle(solved), EOCoord(0));
        assert_eq!(SliceCoord::from_puzzle(solved), SliceCoord(425));
        assert_eq!(CPCoord::from_puzzle(solved), CPCoord(0));
        assert_eq!(UdEdgeCoord::from_puzzle(solved), UdEdgeCoord(0));
    }

    #[test]
    fn slice_coord_distinct_for_every_slot_set() {
        let mut coords = HashSet::new();
        for poses in (0..12usize).combinations(4) {
            let mut slice = Edge::ARRAY.into_iter().filter(|e| e.ud_slice());
            let mut rest = Edge::ARRAY.into_iter().filter(|e| !e.ud_slice());

            let mut cube = CubieCube::SOLVED;
            for (pos, slot) in cube.ep.iter_mut().enumerate() {
                *slot = if poses.contains(&pos) {
                    slice.next().unwrap()
                } else {
                    rest.next().unwrap()
                };
            }

            assert!(coords.insert(SliceCoord::from_puzzle(&cube)));
        }
        assert_eq!(coords.len(), SliceCoord::count());
    }

    #[test]
    #[should_panic(expected = "middle layer edge")]
    fn ud_edge_coord_rejects_slice_edge_on_top() {
        let mut cube = CubieCube::SOLVED;
        cube.ep.swap(0, 4);
        UdEdgeCoord::from_puzzle(&cube);
    }

    proptest! {
        #[test]
        fn coordinates_stay_in_range(mvs in vec(any::<Move333>(), 0..30)) {
            let cube = CubieCube::SOLVED.make_moves(&mvs);
            assert!(COCoord::from_puzzle(&cube).repr() < COCoord::count());
            assert!(EOCoord::from_puzzle(&cube).repr() < EOCoord::count());
            assert!(SliceCoord::from_puzzle(&cube).repr() < SliceCoord::count());
            assert!(CPCoord::from_puzzle(&cube).repr() < CPCoord::count());
        }

        #[test]
        fn ud_edge_coord_in_range_within_domino(mvs in vec(any::<Phase2Move>(), 0..30)) {
            let cube = mvs
                .iter()
                .fold(CubieCube::SOLVED, |c, &m| c.make_phase2_move(m));
            assert!(UdEdgeCoord::from_puzzle(&cube).repr() < UdEdgeCoord::count());
        }
    }
}
