//! The move engine: six clockwise quarter-turns applied through per-move
//! source-slot and orientation-delta tables, plus the restricted atomic move
//! set phase 2 searches with.

use super::CubieCube;

#[cfg(test)]
use proptest_derive::Arbitrary;

/// One 90 degree clockwise turn of a face, viewed from outside that face.
/// These six letters are the whole solution alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
pub enum Move333 {
    /// Up
    U,
    /// Down
    D,
    /// Left
    L,
    /// Right
    R,
    /// Front
    F,
    /// Back
    B,
}

impl Move333 {
    /// Every move, in the order used for table indexing and child expansion.
    pub const ALL: [Move333; 6] = [
        Move333::U,
        Move333::D,
        Move333::L,
        Move333::R,
        Move333::F,
        Move333::B,
    ];

    /// The face letter this move is written as.
    pub fn letter(self) -> char {
        match self {
            Move333::U => 'U',
            Move333::D => 'D',
            Move333::L => 'L',
            Move333::R => 'R',
            Move333::F => 'F',
            Move333::B => 'B',
        }
    }
}

impl std::fmt::Display for Move333 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl TryFrom<char> for Move333 {
    type Error = char;

    fn try_from(c: char) -> Result<Move333, char> {
        match c {
            'U' => Ok(Move333::U),
            'D' => Ok(Move333::D),
            'L' => Ok(Move333::L),
            'R' => Ok(Move333::R),
            'F' => Ok(Move333::F),
            'B' => Ok(Move333::B),
            _ => Err(c),
        }
    }
}

// Each move is a 4-cycle on corner slots and one on edge slots. The tables
// below record, per destination slot, which slot feeds it (`*_SRC`) and the
// orientation adjustment the piece picks up on the way (`*_OFFSETS`), indexed
// by `Move333 as usize`.

const CP_SRC: [[u8; 8]; 6] = [
    [3, 0, 1, 2, 4, 5, 6, 7],
    [0, 1, 2, 3, 5, 6, 7, 4],
    [0, 2, 6, 3, 4, 1, 5, 7],
    [4, 1, 2, 0, 7, 5, 6, 3],
    [1, 5, 2, 3, 0, 4, 6, 7],
    [0, 1, 3, 7, 4, 5, 2, 6],
];
const CO_OFFSETS: [[u8; 8]; 6] = [
    [0; 8],
    [0; 8],
    [0, 1, 2, 0, 0, 2, 1, 0],
    [2, 0, 0, 1, 1, 0, 0, 2],
    [1, 2, 0, 0, 2, 1, 0, 0],
    [0, 0, 1, 2, 0, 0, 2, 1],
];
const EP_SRC: [[u8; 12]; 6] = [
    [3, 0, 1, 2, 4, 5, 6, 7, 8, 9, 10, 11],
    [0, 1, 2, 3, 4, 5, 6, 7, 9, 10, 11, 8],
    [0, 6, 2, 3, 4, 1, 9, 7, 8, 5, 10, 11],
    [0, 1, 2, 4, 11, 5, 6, 3, 8, 9, 10, 7],
    [5, 1, 2, 3, 0, 8, 6, 7, 4, 9, 10, 11],
    [0, 1, 7, 3, 4, 5, 2, 10, 8, 9, 6, 11],
];
const EO_OFFSETS: [[u8; 12]; 6] = [
    [0; 12],
    [0; 12],
    [0; 12],
    [0; 12],
    [1, 0, 0, 0, 1, 1, 0, 0, 1, 0, 0, 0],
    [0, 0, 1, 0, 0, 0, 1, 1, 0, 0, 1, 0],
];

impl CubieCube {
    /// Apply a sequence of quarter-turns left to right.
    pub fn make_moves(self, mvs: &[Move333]) -> CubieCube {
        mvs.iter().fold(self, |c, &m| c.make_move(m))
    }

    /// Apply a single quarter-turn.
    pub fn make_move(self, mv: Move333) -> CubieCube {
        let cp_src = CP_SRC[mv as usize];
        let co_offsets = CO_OFFSETS[mv as usize];
        let ep_src = EP_SRC[mv as usize];
        let eo_offsets = EO_OFFSETS[mv as usize];

        let selfcp: [u8; 8] = self.cp.map(|t| t.into());
        let selfco: [u8; 8] = self.co.map(|t| t.into());
        let selfep: [u8; 12] = self.ep.map(|t| t.into());
        let selfeo: [u8; 12] = self.eo.map(|t| t.into());

        let mut cp = [0; 8];
        let mut co = [0; 8];
        let mut ep = [0; 12];
        let mut eo = [0; 12];

        for i in 0..8 {
            cp[i] = selfcp[cp_src[i] as usize];
            co[i] = (selfco[cp_src[i] as usize] + co_offsets[i]) % 3;
        }

        for i in 0..12 {
            ep[i] = selfep[ep_src[i] as usize];
            eo[i] = (selfeo[ep_src[i] as usize] + eo_offsets[i]) % 2;
        }

        let cp = cp.map(|n| n.try_into().unwrap());
        let co = co.map(|n| n.try_into().unwrap());
        let ep = ep.map(|n| n.try_into().unwrap());
        let eo = eo.map(|n| n.try_into().unwrap());

        CubieCube { cp, co, ep, eo }
    }
}

/// An atomic move of the phase 2 move set, the largest set of face turns that
/// keeps a domino-reduced cube domino-reduced. U and D stay free; the other
/// four faces are restricted to half turns.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
#[allow(missing_docs)]
pub enum Phase2Move {
    U1,
    U2,
    U3,
    D1,
    D2,
    D3,
    R2,
    L2,
    F2,
    B2,
}

impl Phase2Move {
    /// Every phase 2 move, in code order 0..9.
    pub const ALL: [Phase2Move; 10] = [
        Phase2Move::U1,
        Phase2Move::U2,
        Phase2Move::U3,
        Phase2Move::D1,
        Phase2Move::D2,
        Phase2Move::D3,
        Phase2Move::R2,
        Phase2Move::L2,
        Phase2Move::F2,
        Phase2Move::B2,
    ];

    /// The quarter-turn letters this move expands to in a solution. An
    /// anticlockwise turn costs three letters.
    pub fn expansion(self) -> &'static [Move333] {
        match self {
            Phase2Move::U1 => &[Move333::U],
            Phase2Move::U2 => &[Move333::U, Move333::U],
            Phase2Move::U3 => &[Move333::U, Move333::U, Move333::U],
            Phase2Move::D1 => &[Move333::D],
            Phase2Move::D2 => &[Move333::D, Move333::D],
            Phase2Move::D3 => &[Move333::D, Move333::D, Move333::D],
            Phase2Move::R2 => &[Move333::R, Move333::R],
            Phase2Move::L2 => &[Move333::L, Move333::L],
            Phase2Move::F2 => &[Move333::F, Move333::F],
            Phase2Move::B2 => &[Move333::B, Move333::B],
        }
    }
}

impl CubieCube {
    /// Apply one phase 2 atomic move by expanding it to quarter-turns.
    pub fn make_phase2_move(self, mv: Phase2Move) -> CubieCube {
        self.make_moves(mv.expansion())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::collection::vec;
    use proptest::prelude::*;

    #[test]
    fn b_loop() {
        let mut cube = CubieCube::SOLVED;
        for _ in 0..4 {
            cube = cube.make_move(Move333::B);
        }
        assert_eq!(cube, CubieCube::SOLVED);
    }

    proptest! {
        #[test]
        fn fourth_power_is_identity(
            mvs in vec(any::<Move333>(), 0..20),
            m in any::<Move333>(),
        ) {
            let cube = CubieCube::SOLVED.make_moves(&mvs);
            let looped = cube.clone().make_moves(&[m, m, m, m]);
            assert_eq!(looped, cube);
        }

        #[test]
        fn triple_inverts_single(
            mvs in vec(any::<Move333>(), 0..20),
            m in any::<Move333>(),
        ) {
            let cube = CubieCube::SOLVED.make_moves(&mvs);
            let there_and_back = cube.clone().make_move(m).make_moves(&[m, m, m]);
            assert_eq!(there_and_back, cube);
        }

        #[test]
        fn reversed_triples_invert_sequence(mvs in vec(any::<Move333>(), 0..20)) {
            let mut cube = CubieCube::SOLVED.make_moves(&mvs);
            for &m in mvs.iter().rev() {
                cube = cube.make_moves(&[m, m, m]);
            }
            assert_eq!(cube, CubieCube::SOLVED);
        }

        #[test]
        fn moves_preserve_invariants(mvs in vec(any::<Move333>(), 0..20)) {
            let cube = CubieCube::SOLVED.make_moves(&mvs);
            assert!(!cube.illegal());
        }

        #[test]
        fn phase2_moves_keep_orientations_and_slice(mvs in vec(any::<Phase2Move>(), 0..20)) {
            let cube = mvs
                .iter()
                .fold(CubieCube::SOLVED, |c, &m| c.make_phase2_move(m));
            assert!(cube.co.iter().all(|&t| t == crate::cube333::CornerTwist::Oriented));
            assert!(cube.eo.iter().all(|&f| f == crate::cube333::EdgeFlip::Oriented));
            assert!(cube.ep[4..8].iter().all(|e| e.ud_slice()));
        }
    }
}
