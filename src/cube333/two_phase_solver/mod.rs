//! An implementation of the two phase solving approach described
//! [here](https://kociemba.org/cube.htm), restricted to clockwise
//! quarter-turn output.
//!
//! Phase 1 searches the full six-turn generator for a path into the domino
//! subgroup (orientations solved, slice edges home in the middle layer);
//! phase 2 finishes the cube inside that subgroup with the ten moves that
//! preserve it. Both phases are IDA* over the pruning tables in [`prune`],
//! stitched together by one outer bound so the first joint hit wins.

mod prune;

use prune::PruneTables;

use crate::coord::Coordinate;
use crate::cube333::coordcube::{COCoord, CPCoord, EOCoord, SliceCoord, UdEdgeCoord};
use crate::cube333::moves::{Move333, Phase2Move};
use crate::cube333::{CornerTwist, CubieCube, EdgeFlip};

use log::{debug, info};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Cap on the outer bound: phase 1 quarter-turns plus phase 2 atomic moves.
/// Well above what the two phases ever need together, so hitting it means
/// the deadline logic has already given up.
const MAX_TOTAL_DEPTH: u8 = 40;

/// How long a single solve may run before it is abandoned.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(9);

/// A cube solver that uses Kociemba's two phase algorithm.
pub struct Solver {
    tables: PruneTables,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    /// Create a solver. This builds the pruning tables, which takes a few
    /// seconds; keep the solver around if there is more than one scramble.
    pub fn new() -> Self {
        Solver {
            tables: PruneTables::generate(),
        }
    }

    /// Solve with the default time limit. See [`Solver::solve_within`].
    pub fn solve(&self, cube: &CubieCube) -> Option<Vec<Move333>> {
        self.solve_within(cube, DEFAULT_TIME_LIMIT)
    }

    /// Obtain a quarter-turn sequence that solves the cube (applying the
    /// returned moves in order to `cube` yields the solved state), or `None`
    /// if none was found before the wall clock budget ran out. A solved cube
    /// yields the empty sequence. The search is deterministic: the same
    /// scramble always produces the same sequence.
    pub fn solve_within(&self, cube: &CubieCube, limit: Duration) -> Option<Vec<Move333>> {
        if cube.is_solved() {
            return Some(Vec::new());
        }

        let start = Instant::now();
        let mut search = Search {
            tables: &self.tables,
            deadline: start + limit,
            phase1_visited: HashMap::new(),
            phase2_visited: HashMap::new(),
            phase1_path: Vec::new(),
            phase2_path: Vec::new(),
        };

        for bound in self.tables.h1(cube)..=MAX_TOTAL_DEPTH {
            if Instant::now() > search.deadline {
                break;
            }
            debug!("searching phase 1 with depth limit {bound}");

            // A fresh bound changes what counts as a good f-score, so the
            // cache from the previous iteration would over-prune.
            search.phase1_visited.clear();

            match search.phase1(cube, 0, bound) {
                Outcome::Found => {
                    let mut solution = std::mem::take(&mut search.phase1_path);
                    for mv in &search.phase2_path {
                        solution.extend_from_slice(mv.expansion());
                    }
                    info!(
                        "solved in {:.3}s, {} quarter turns",
                        start.elapsed().as_secs_f64(),
                        solution.len()
                    );
                    return Some(solution);
                }
                Outcome::Exhausted => {}
                Outcome::Aborted => break,
            }
        }

        debug!("search abandoned after {:.3}s", start.elapsed().as_secs_f64());
        None
    }
}

/// How one DFS call ended. `Aborted` is the deadline sentinel and unwinds the
/// whole recursion without touching the paths.
enum Outcome {
    Found,
    Exhausted,
    Aborted,
}

struct Search<'a> {
    tables: &'a PruneTables,
    deadline: Instant,
    phase1_visited: HashMap<u32, u8>,
    phase2_visited: HashMap<u32, u8>,
    phase1_path: Vec<Move333>,
    phase2_path: Vec<Phase2Move>,
}

impl Search<'_> {
    fn phase1(&mut self, cube: &CubieCube, g: u8, bound: u8) -> Outcome {
        if Instant::now() > self.deadline {
            return Outcome::Aborted;
        }

        let f = g + self.tables.h1(cube);
        if f > bound {
            return Outcome::Exhausted;
        }

        // Re-entering a projected state with no better f-score cannot lead
        // anywhere the first visit did not.
        match self.phase1_visited.entry(phase1_key(cube)) {
            Entry::Occupied(mut seen) => {
                if *seen.get() <= f {
                    return Outcome::Exhausted;
                }
                *seen.get_mut() = f;
            }
            Entry::Vacant(slot) => {
                slot.insert(f);
            }
        }

        if domino_reduced(cube) {
            // Hand phase 2 whatever depth the bound has left. If it fails,
            // some sibling may reach the subgroup somewhere friendlier.
            return self.phase2_root(cube, bound - g);
        }

        if g >= bound {
            return Outcome::Exhausted;
        }

        let children: [CubieCube; 6] =
            std::array::from_fn(|i| cube.clone().make_move(Move333::ALL[i]));
        let mut order: [(u8, u8); 6] =
            std::array::from_fn(|i| (self.tables.h1(&children[i]), i as u8));
        order.sort_unstable();

        // No same-face or opposite-face pruning: legal but wasteful paths
        // must stay reachable, and the tables already starve true cycles.
        for (h_child, i) in order {
            if g + 1 + h_child > bound {
                continue;
            }
            self.phase1_path.push(Move333::ALL[i as usize]);
            match self.phase1(&children[i as usize], g + 1, bound) {
                Outcome::Exhausted => {
                    self.phase1_path.pop();
                }
                done => return done,
            }
        }

        Outcome::Exhausted
    }

    fn phase2_root(&mut self, cube: &CubieCube, budget: u8) -> Outcome {
        let h = self.tables.h2(cube);
        if h > budget {
            return Outcome::Exhausted;
        }

        for bound in h..=budget {
            if Instant::now() > self.deadline {
                return Outcome::Aborted;
            }
            self.phase2_visited.clear();
            match self.phase2(cube, 0, bound) {
                Outcome::Exhausted => {}
                done => return done,
            }
        }

        Outcome::Exhausted
    }

    fn phase2(&mut self, cube: &CubieCube, g: u8, bound: u8) -> Outcome {
        if Instant::now() > self.deadline {
            return Outcome::Aborted;
        }

        let f = g + self.tables.h2(cube);
        if f > bound {
            return Outcome::Exhausted;
        }

        match self.phase2_visited.entry(phase2_key(cube)) {
            Entry::Occupied(mut seen) => {
                if *seen.get() <= f {
                    return Outcome::Exhausted;
                }
                *seen.get_mut() = f;
            }
            Entry::Vacant(slot) => {
                slot.insert(f);
            }
        }

        if cube.is_solved() {
            return Outcome::Found;
        }

        if g >= bound {
            return Outcome::Exhausted;
        }

        let children: [CubieCube; 10] =
            std::array::from_fn(|i| cube.clone().make_phase2_move(Phase2Move::ALL[i]));
        let mut order: [(u8, u8); 10] =
            std::array::from_fn(|i| (self.tables.h2(&children[i]), i as u8));
        order.sort_unstable();

        for (h_child, i) in order {
            if g + 1 + h_child > bound {
                continue;
            }
            self.phase2_path.push(Phase2Move::ALL[i as usize]);
            match self.phase2(&children[i as usize], g + 1, bound) {
                Outcome::Exhausted => {
                    self.phase2_path.pop();
                }
                done => return done,
            }
        }

        Outcome::Exhausted
    }
}

/// The phase 1 goal: orientations solved and the slice edges back in the
/// middle layer, in any order.
fn domino_reduced(cube: &CubieCube) -> bool {
    cube.co.iter().all(|&t| t == CornerTwist::Oriented)
        && cube.eo.iter().all(|&f| f == EdgeFlip::Oriented)
        && cube.ep[4..8].iter().all(|e| e.ud_slice())
}

// Cache keys pack the projected coordinates into one scalar so a lookup only
// hashes an integer: [co:12][eo:11][slice:9] bits, and cp * 40320 + ud.

fn phase1_key(cube: &CubieCube) -> u32 {
    let co = COCoord::from_puzzle(cube).repr() as u32;
    let eo = EOCoord::from_puzzle(cube).repr() as u32;
    let slice = SliceCoord::from_puzzle(cube).repr() as u32;
    (co << 20) | (eo << 9) | slice
}

fn phase2_key(cube: &CubieCube) -> u32 {
    let cp = CPCoord::from_puzzle(cube).repr() as u32;
    let ud = UdEdgeCoord::from_puzzle(cube).repr() as u32;
    cp * UdEdgeCoord::count() as u32 + ud
}

#[cfg(test)]
pub(crate) fn test_solver() -> &'static Solver {
    use std::sync::OnceLock;

    static SOLVER: OnceLock<Solver> = OnceLock::new();
    SOLVER.get_or_init(Solver::new)
}

#[cfg(test)]
mod test {
    use super::*;

    use proptest::collection::vec;
    use proptest::prelude::*;

    fn scramble_of(letters: &str) -> CubieCube {
        let mvs: Vec<Move333> = letters
            .chars()
            .map(|c| Move333::try_from(c).unwrap())
            .collect();
        CubieCube::SOLVED.make_moves(&mvs)
    }

    #[test]
    fn solved_cube_needs_no_moves() {
        assert_eq!(
            test_solver().solve(&CubieCube::SOLVED),
            Some(Vec::new())
        );
    }

    #[test]
    fn single_turn_undone_by_triple() {
        let cube = scramble_of("R");
        let solution = test_solver().solve(&cube).unwrap();
        assert_eq!(solution, vec![Move333::R, Move333::R, Move333::R]);
    }

    #[test]
    fn two_turn_scramble() {
        let cube = scramble_of("UR");
        let solution = test_solver().solve(&cube).unwrap();
        assert!(solution.len() <= 6);
        assert!(cube.make_moves(&solution).is_solved());
    }

    #[test]
    fn ten_turn_scramble() {
        let cube = scramble_of("URFDLBURFD");
        let solution = test_solver()
            .solve_within(&cube, Duration::from_secs(30))
            .unwrap();
        assert!(cube.make_moves(&solution).is_solved());
    }

    // Half turns never disturb orientations or the slice, so this scramble
    // is pure phase 2 work and its solution stays within three letters per
    // scramble turn.
    #[test]
    fn ten_half_turn_scramble_stays_short() {
        let cube = scramble_of("UURRFFDDLL");
        let solution = test_solver().solve(&cube).unwrap();
        assert!(solution.len() <= 30);
        assert!(cube.make_moves(&solution).is_solved());
    }

    #[test]
    fn superflip() {
        let superflip = CubieCube {
            eo: [EdgeFlip::Flipped; 12],
            ..CubieCube::SOLVED
        };
        let solution = test_solver()
            .solve_within(&superflip, Duration::from_secs(60))
            .unwrap();
        assert!(solution.len() <= 3 * MAX_TOTAL_DEPTH as usize);
        assert!(superflip.make_moves(&solution).is_solved());
    }

    #[test]
    fn deterministic() {
        let cube = scramble_of("FUDLRB");
        assert_eq!(test_solver().solve(&cube), test_solver().solve(&cube));
    }

    #[test]
    fn zero_budget_times_out() {
        let cube = scramble_of("RUF");
        assert_eq!(
            test_solver().solve_within(&cube, Duration::ZERO),
            None
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn solutions_verify(mvs in vec(any::<Move333>(), 0..12)) {
            let cube = CubieCube::SOLVED.make_moves(&mvs);
            let solution = test_solver().solve(&cube).unwrap();
            assert!(cube.make_moves(&solution).is_solved());
        }
    }
}
