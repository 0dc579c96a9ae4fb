//! Pruning tables for the two phase solver: breadth-first distance maps over
//! the coordinate projections, built once from the solved cube and read-only
//! afterwards.

use crate::coord::Coordinate;
use crate::cube333::coordcube::{COCoord, CPCoord, EOCoord, SliceCoord, UdEdgeCoord};
use crate::cube333::moves::{Move333, Phase2Move};
use crate::cube333::CubieCube;

use log::{debug, info};
use std::collections::VecDeque;
use std::time::Instant;

const UNSEEN: u8 = 0xff;

/// The six distance tables. Every entry is the smallest number of generator
/// moves (quarter-turns for phase 1, atomic phase 2 moves for phase 2) at
/// which its coordinate value first appears in a breadth-first walk from the
/// solved cube, which makes each table an admissible bound for its projection
/// considered in isolation.
pub struct PruneTables {
    co: Box<[u8]>,
    eo: Box<[u8]>,
    slice: Box<[u8]>,
    // joint orientation table, indexed CO * 2048 + EO
    co_eo: Box<[u8]>,
    cp: Box<[u8]>,
    ud_edges: Box<[u8]>,
}

impl PruneTables {
    /// Build all six tables. A coordinate value the walks never reach means
    /// the move engine and the encoders disagree, so that aborts.
    pub fn generate() -> Self {
        let mut tables = PruneTables {
            co: vec![UNSEEN; COCoord::count()].into_boxed_slice(),
            eo: vec![UNSEEN; EOCoord::count()].into_boxed_slice(),
            slice: vec![UNSEEN; SliceCoord::count()].into_boxed_slice(),
            co_eo: vec![UNSEEN; COCoord::count() * EOCoord::count()].into_boxed_slice(),
            cp: vec![UNSEEN; CPCoord::count()].into_boxed_slice(),
            ud_edges: vec![UNSEEN; UdEdgeCoord::count()].into_boxed_slice(),
        };

        let start = Instant::now();
        tables.build_phase1();
        tables.build_phase2();
        info!("pruning tables built in {:.3}s", start.elapsed().as_secs_f64());

        tables
    }

    fn build_phase1(&mut self) {
        let mut queue = VecDeque::new();
        self.record_phase1(&CubieCube::SOLVED, 0);
        queue.push_back((CubieCube::SOLVED, 0u8));

        while let Some((cube, depth)) = queue.pop_front() {
            for &mv in &Move333::ALL {
                let next = cube.clone().make_move(mv);
                if self.record_phase1(&next, depth + 1) {
                    queue.push_back((next, depth + 1));
                }
            }
        }

        assert!(
            self.co.iter().all(|&d| d != UNSEEN),
            "corner orientation table has unreachable cells"
        );
        assert!(
            self.eo.iter().all(|&d| d != UNSEEN),
            "edge orientation table has unreachable cells"
        );
        assert!(
            self.slice.iter().all(|&d| d != UNSEEN),
            "slice table has unreachable cells"
        );
        assert!(
            self.co_eo.iter().all(|&d| d != UNSEEN),
            "joint orientation table has unreachable cells"
        );

        debug!(
            "phase 1 table depths: co {}, eo {}, slice {}, joint {}",
            max_depth(&self.co),
            max_depth(&self.eo),
            max_depth(&self.slice),
            max_depth(&self.co_eo),
        );
    }

    fn build_phase2(&mut self) {
        let mut queue = VecDeque::new();
        self.record_phase2(&CubieCube::SOLVED, 0);
        queue.push_back((CubieCube::SOLVED, 0u8));

        while let Some((cube, depth)) = queue.pop_front() {
            for &mv in &Phase2Move::ALL {
                let next = cube.clone().make_phase2_move(mv);
                if self.record_phase2(&next, depth + 1) {
                    queue.push_back((next, depth + 1));
                }
            }
        }

        assert!(
            self.cp.iter().all(|&d| d != UNSEEN),
            "corner permutation table has unreachable cells"
        );
        assert!(
            self.ud_edges.iter().all(|&d| d != UNSEEN),
            "U/D edge permutation table has unreachable cells"
        );

        debug!(
            "phase 2 table depths: cp {}, ud edges {}",
            max_depth(&self.cp),
            max_depth(&self.ud_edges),
        );
    }

    // The recorders write first-discovery depths and report whether the cube
    // uncovered any new cell; only such cubes are worth expanding further.

    fn record_phase1(&mut self, cube: &CubieCube, depth: u8) -> bool {
        let co = COCoord::from_puzzle(cube).repr();
        let eo = EOCoord::from_puzzle(cube).repr();
        let slice = SliceCoord::from_puzzle(cube).repr();
        let joint = co * EOCoord::count() + eo;

        let mut fresh = false;
        for cell in [
            &mut self.co[co],
            &mut self.eo[eo],
            &mut self.slice[slice],
            &mut self.co_eo[joint],
        ] {
            if *cell == UNSEEN {
                *cell = depth;
                fresh = true;
            }
        }
        fresh
    }

    fn record_phase2(&mut self, cube: &CubieCube, depth: u8) -> bool {
        let cp = CPCoord::from_puzzle(cube).repr();
        let ud = UdEdgeCoord::from_puzzle(cube).repr();

        let mut fresh = false;
        for cell in [&mut self.cp[cp], &mut self.ud_edges[ud]] {
            if *cell == UNSEEN {
                *cell = depth;
                fresh = true;
            }
        }
        fresh
    }

    /// Lower bound on the quarter-turns needed to reach domino reduction.
    pub fn h1(&self, cube: &CubieCube) -> u8 {
        let co = COCoord::from_puzzle(cube).repr();
        let eo = EOCoord::from_puzzle(cube).repr();
        let slice = SliceCoord::from_puzzle(cube).repr();

        self.co[co]
            .max(self.eo[eo])
            .max(self.slice[slice])
            .max(self.co_eo[co * EOCoord::count() + eo])
    }

    /// Lower bound on the atomic phase 2 moves needed to finish a
    /// domino-reduced cube. Every phase 2 move permutes both the corners and
    /// the U/D edges, so the averaged sum is a bound alongside the maxima.
    pub fn h2(&self, cube: &CubieCube) -> u8 {
        let cp = self.cp[CPCoord::from_puzzle(cube).repr()];
        let ud = self.ud_edges[UdEdgeCoord::from_puzzle(cube).repr()];
        let joint = (cp + ud).div_ceil(2);

        cp.max(ud).max(joint)
    }
}

fn max_depth(table: &[u8]) -> u8 {
    table.iter().copied().max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::super::test_solver;
    use crate::cube333::moves::{Move333, Phase2Move};
    use crate::cube333::CubieCube;

    use proptest::collection::vec;
    use proptest::prelude::*;

    #[test]
    fn solved_cube_has_zero_bounds() {
        let tables = &test_solver().tables;
        assert_eq!(tables.h1(&CubieCube::SOLVED), 0);
        assert_eq!(tables.h2(&CubieCube::SOLVED), 0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        // A cube k moves from solved shows its coordinates at breadth-first
        // depth at most k, so the heuristics can never exceed the walk length.
        #[test]
        fn h1_bounded_by_scramble_length(mvs in vec(any::<Move333>(), 0..20)) {
            let cube = CubieCube::SOLVED.make_moves(&mvs);
            let tables = &test_solver().tables;
            assert!(tables.h1(&cube) as usize <= mvs.len());
        }

        #[test]
        fn h2_bounded_by_scramble_length(mvs in vec(any::<Phase2Move>(), 0..20)) {
            let cube = mvs
                .iter()
                .fold(CubieCube::SOLVED, |c, &m| c.make_phase2_move(m));
            let tables = &test_solver().tables;
            assert!(tables.h2(&cube) as usize <= mvs.len());
        }
    }
}
