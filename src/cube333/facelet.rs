//! Reading and printing the 9-line facelet net.
//!
//! The net uses an arbitrary color alphabet: whatever character sits at a
//! face's center defines that face's color, and cubies are identified by
//! matching unordered sticker-color sets against the center-derived
//! reference. Printing uses the fixed scheme U=O, L=G, F=W, R=B, B=Y, D=R.
//!
//! ```text
//!    UUU
//!    UUU
//!    UUU
//! LLLFFFRRRBBB
//! LLLFFFRRRBBB
//! LLLFFFRRRBBB
//!    DDD
//!    DDD
//!    DDD
//! ```

use super::{Corner, CornerTwist, CubieCube, Edge, EdgeFlip};
use crate::error::IllegalStateError;
use thiserror::Error;

/// Errors from reading a facelet net into the cubie model.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The net did not have exactly nine lines.
    #[error("expected a 9 line facelet net, found {0} lines")]
    LineCount(usize),
    /// A line did not have the shape the net layout requires.
    #[error("line {0} of the facelet net is malformed")]
    MalformedLine(usize),
    /// Two faces shared a center color, so stickers cannot be attributed.
    #[error("face centers must have six distinct colors")]
    DuplicateCenters,
    /// A corner slot's three stickers match no corner piece.
    #[error("the stickers at corner slot {0} match no corner piece")]
    UnknownCorner(usize),
    /// An edge slot's two stickers match no edge piece.
    #[error("the stickers at edge slot {0} match no edge piece")]
    UnknownEdge(usize),
    /// The stickers describe a state no face turn sequence can produce.
    #[error(transparent)]
    Illegal(#[from] IllegalStateError),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Face {
    U,
    L,
    F,
    R,
    B,
    D,
}

use Face::{B, D, F, L, R, U};

/// Colors of the fixed printing scheme, indexed by `Face`.
const SCHEME: [char; 6] = ['O', 'G', 'W', 'B', 'Y', 'R'];

// Sticker positions of each corner slot, in home order: the U/D sticker
// first, then the other two clockwise around the piece.
const CORNER_FACELETS: [[(Face, usize); 3]; 8] = [
    [(U, 8), (R, 0), (F, 2)], // URF
    [(U, 6), (F, 0), (L, 2)], // UFL
    [(U, 0), (L, 0), (B, 2)], // ULB
    [(U, 2), (B, 0), (R, 2)], // UBR
    [(D, 2), (F, 8), (R, 6)], // DFR
    [(D, 0), (L, 8), (F, 6)], // DLF
    [(D, 6), (B, 8), (L, 6)], // DBL
    [(D, 8), (R, 8), (B, 6)], // DRB
];

const EDGE_FACELETS: [[(Face, usize); 2]; 12] = [
    [(U, 7), (F, 1)], // UF
    [(U, 3), (L, 1)], // UL
    [(U, 1), (B, 1)], // UB
    [(U, 5), (R, 1)], // UR
    [(F, 5), (R, 3)], // FR
    [(F, 3), (L, 5)], // FL
    [(B, 5), (L, 3)], // BL
    [(B, 3), (R, 5)], // BR
    [(D, 1), (F, 7)], // DF
    [(D, 3), (L, 7)], // DL
    [(D, 7), (B, 7)], // DB
    [(D, 5), (R, 7)], // DR
];

// Home colors of each piece as faces, same sticker order as the tables above.
const CORNER_COLORS: [[Face; 3]; 8] = [
    [U, R, F],
    [U, F, L],
    [U, L, B],
    [U, B, R],
    [D, F, R],
    [D, L, F],
    [D, B, L],
    [D, R, B],
];

const EDGE_COLORS: [[Face; 2]; 12] = [
    [U, F],
    [U, L],
    [U, B],
    [U, R],
    [F, R],
    [F, L],
    [B, L],
    [B, R],
    [D, F],
    [D, L],
    [D, B],
    [D, R],
];

/// A cube described by its 54 sticker colors, nine per face in row-major
/// order. This is the exchange format between files and the cubie model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StickerCube {
    stickers: [[char; 9]; 6],
}

impl std::str::FromStr for StickerCube {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<StickerCube, ParseError> {
        let mut lines: Vec<&str> = s.lines().collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        if lines.len() != 9 {
            return Err(ParseError::LineCount(lines.len()));
        }

        let mut stickers = [[' '; 9]; 6];

        // U and D rows: three spaces, then three stickers.
        for (face, first_line) in [(U, 0), (D, 6)] {
            for row in 0..3 {
                let line: Vec<char> = lines[first_line + row].chars().collect();
                if line.len() != 6
                    || line[..3] != [' ', ' ', ' ']
                    || line[3..].iter().any(|c| c.is_whitespace())
                {
                    return Err(ParseError::MalformedLine(first_line + row + 1));
                }
                stickers[face as usize][row * 3..row * 3 + 3].copy_from_slice(&line[3..]);
            }
        }

        // Middle band: twelve stickers covering L, F, R, B.
        for row in 0..3 {
            let line: Vec<char> = lines[3 + row].chars().collect();
            if line.len() != 12 || line.iter().any(|c| c.is_whitespace()) {
                return Err(ParseError::MalformedLine(3 + row + 1));
            }
            for (i, face) in [L, F, R, B].into_iter().enumerate() {
                stickers[face as usize][row * 3..row * 3 + 3]
                    .copy_from_slice(&line[i * 3..i * 3 + 3]);
            }
        }

        Ok(StickerCube { stickers })
    }
}

impl std::fmt::Display for StickerCube {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let face = |face: Face, row: usize| {
            self.stickers[face as usize][row * 3..row * 3 + 3]
                .iter()
                .collect::<String>()
        };
        for row in 0..3 {
            writeln!(f, "   {}", face(U, row))?;
        }
        for row in 0..3 {
            writeln!(
                f,
                "{}{}{}{}",
                face(L, row),
                face(F, row),
                face(R, row),
                face(B, row)
            )?;
        }
        for row in 0..3 {
            writeln!(f, "   {}", face(D, row))?;
        }
        Ok(())
    }
}

impl StickerCube {
    fn sticker(&self, (face, idx): (Face, usize)) -> char {
        self.stickers[face as usize][idx]
    }
}

impl TryFrom<&StickerCube> for CubieCube {
    type Error = ParseError;

    fn try_from(net: &StickerCube) -> Result<CubieCube, ParseError> {
        let centers: [char; 6] = std::array::from_fn(|i| net.stickers[i][4]);
        for i in 0..6 {
            for j in i + 1..6 {
                if centers[i] == centers[j] {
                    return Err(ParseError::DuplicateCenters);
                }
            }
        }

        let mut cube = CubieCube::SOLVED;

        for pos in 0..8 {
            let got = CORNER_FACELETS[pos].map(|p| net.sticker(p));
            let mut sorted_got = got;
            sorted_got.sort_unstable();

            let piece = Corner::ARRAY.into_iter().find(|&c| {
                let mut home = CORNER_COLORS[c as usize].map(|f| centers[f as usize]);
                home.sort_unstable();
                home == sorted_got
            });
            let Some(piece) = piece else {
                return Err(ParseError::UnknownCorner(pos));
            };

            // The twist is where the piece's U/D sticker ended up among the
            // slot's three stickers.
            let ud_color = centers[CORNER_COLORS[piece as usize][0] as usize];
            let twist = got.iter().position(|&c| c == ud_color).unwrap_or(2);
            cube.cp[pos] = piece;
            cube.co[pos] = CornerTwist::try_from(twist as u8).unwrap();
        }

        for pos in 0..12 {
            let got = EDGE_FACELETS[pos].map(|p| net.sticker(p));
            let mut matched = None;
            for piece in Edge::ARRAY {
                let home = EDGE_COLORS[piece as usize].map(|f| centers[f as usize]);
                if got == home {
                    matched = Some((piece, EdgeFlip::Oriented));
                } else if got == [home[1], home[0]] {
                    matched = Some((piece, EdgeFlip::Flipped));
                }
                if matched.is_some() {
                    break;
                }
            }
            let Some((piece, flip)) = matched else {
                return Err(ParseError::UnknownEdge(pos));
            };
            cube.ep[pos] = piece;
            cube.eo[pos] = flip;
        }

        cube.verify()?;
        Ok(cube)
    }
}

impl From<&CubieCube> for StickerCube {
    fn from(cube: &CubieCube) -> StickerCube {
        let mut stickers = [[' '; 9]; 6];
        for (i, face) in stickers.iter_mut().enumerate() {
            *face = [SCHEME[i]; 9];
        }
        let mut net = StickerCube { stickers };

        for pos in 0..8 {
            let piece = cube.cp[pos];
            let [c0, c1, c2] = CORNER_COLORS[piece as usize].map(|f| SCHEME[f as usize]);
            // Rotate the home triple so the U/D color lands at the index the
            // twist dictates.
            let placed = match cube.co[pos] {
                CornerTwist::Oriented => [c0, c1, c2],
                CornerTwist::Clockwise => [c2, c0, c1],
                CornerTwist::AntiClockwise => [c1, c2, c0],
            };
            for (p, c) in CORNER_FACELETS[pos].into_iter().zip(placed) {
                net.stickers[p.0 as usize][p.1] = c;
            }
        }

        for pos in 0..12 {
            let piece = cube.ep[pos];
            let [e0, e1] = EDGE_COLORS[piece as usize].map(|f| SCHEME[f as usize]);
            let placed = match cube.eo[pos] {
                EdgeFlip::Oriented => [e0, e1],
                EdgeFlip::Flipped => [e1, e0],
            };
            for (p, c) in EDGE_FACELETS[pos].into_iter().zip(placed) {
                net.stickers[p.0 as usize][p.1] = c;
            }
        }

        net
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube333::moves::Move333;

    use proptest::collection::vec;
    use proptest::prelude::*;

    const SOLVED_NET: &str = "   OOO\n   OOO\n   OOO\nGGGWWWBBBYYY\nGGGWWWBBBYYY\nGGGWWWBBBYYY\n   RRR\n   RRR\n   RRR\n";

    #[test]
    fn parses_solved_net() {
        let net: StickerCube = SOLVED_NET.parse().unwrap();
        assert_eq!(CubieCube::try_from(&net).unwrap(), CubieCube::SOLVED);
    }

    #[test]
    fn prints_solved_net() {
        assert_eq!(StickerCube::from(&CubieCube::SOLVED).to_string(), SOLVED_NET);
    }

    #[test]
    fn rejects_truncated_net() {
        let eight_lines = SOLVED_NET.lines().take(8).collect::<Vec<_>>().join("\n");
        assert!(matches!(
            eight_lines.parse::<StickerCube>(),
            Err(ParseError::LineCount(8))
        ));
    }

    #[test]
    fn rejects_short_row() {
        let mangled = SOLVED_NET.replacen("GGGWWWBBBYYY", "GGGWWWBBBYY", 1);
        assert!(matches!(
            mangled.parse::<StickerCube>(),
            Err(ParseError::MalformedLine(4))
        ));
    }

    #[test]
    fn rejects_unknown_color() {
        let mut net: StickerCube = SOLVED_NET.parse().unwrap();
        net.stickers[Face::U as usize][8] = '?';
        assert!(matches!(
            CubieCube::try_from(&net),
            Err(ParseError::UnknownCorner(0))
        ));
    }

    #[test]
    fn rejects_twisted_corner() {
        let mut twisted = CubieCube::SOLVED;
        twisted.co[0] = CornerTwist::Clockwise;
        let net = StickerCube::from(&twisted);
        assert!(matches!(
            CubieCube::try_from(&net),
            Err(ParseError::Illegal(_))
        ));
    }

    #[test]
    fn rejects_swapped_edge_pair() {
        let mut swapped = CubieCube::SOLVED;
        swapped.ep.swap(0, 3);
        let net = StickerCube::from(&swapped);
        assert!(matches!(
            CubieCube::try_from(&net),
            Err(ParseError::Illegal(_))
        ));
    }

    proptest! {
        #[test]
        fn net_roundtrip(mvs in vec(any::<Move333>(), 0..30)) {
            let cube = CubieCube::SOLVED.make_moves(&mvs);
            let printed = StickerCube::from(&cube).to_string();
            let reread: StickerCube = printed.parse().unwrap();
            assert_eq!(CubieCube::try_from(&reread).unwrap(), cube);
        }
    }
}
