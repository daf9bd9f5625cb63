// cube state and the move transition engine
//
// the cube is stored as 6 faces of 3x3 sticker labels. the only way to
// mutate a cube is `apply` (one generator move) or `scramble` (a run of
// random generator moves), so every reachable state stays inside the
// orbit of the solved state. centers never move.

use std::fmt;

use rand::Rng;

use crate::error::SolverError;

/// number of random moves a default scramble applies
pub const SCRAMBLE_LENGTH: usize = 20;

/// the six faces, doubling as the six sticker labels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    Front = 0,
    Back = 1,
    Right = 2,
    Left = 3,
    Top = 4,
    Bottom = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::Right,
        Face::Left,
        Face::Top,
        Face::Bottom,
    ];

    /// face for a raw index, `None` outside 0..6
    pub fn from_index(index: u8) -> Option<Face> {
        Face::ALL.get(index as usize).copied()
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// single-letter face name in standard cube notation
    pub fn letter(self) -> char {
        match self {
            Face::Front => 'F',
            Face::Back => 'B',
            Face::Right => 'R',
            Face::Left => 'L',
            Face::Top => 'U',
            Face::Bottom => 'D',
        }
    }
}

/// turn direction of a generator move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// direction for a raw +1/-1 value, `None` otherwise
    pub fn from_i8(raw: i8) -> Option<Direction> {
        match raw {
            1 => Some(Direction::Clockwise),
            -1 => Some(Direction::CounterClockwise),
            _ => None,
        }
    }

    #[inline]
    pub fn as_i8(self) -> i8 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    #[inline]
    pub fn inverted(self) -> Direction {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// one of the 12 generator moves: a face plus a turn direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub face: Face,
    pub direction: Direction,
}

/// all 12 generator moves, the only operations that mutate a cube
pub const ALL_MOVES: [Move; 12] = {
    let mut moves = [Move {
        face: Face::Front,
        direction: Direction::Clockwise,
    }; 12];
    let faces = Face::ALL;
    let mut i = 0;
    while i < 6 {
        moves[i * 2] = Move {
            face: faces[i],
            direction: Direction::Clockwise,
        };
        moves[i * 2 + 1] = Move {
            face: faces[i],
            direction: Direction::CounterClockwise,
        };
        i += 1;
    }
    moves
};

impl Move {
    /// validate a raw (face, direction) pair; invalid input fails fast
    pub fn new(face: u8, direction: i8) -> Result<Move, SolverError> {
        let face = Face::from_index(face).ok_or(SolverError::InvalidFace(face))?;
        let direction =
            Direction::from_i8(direction).ok_or(SolverError::InvalidDirection(direction))?;
        Ok(Move { face, direction })
    }

    /// sample one generator move uniformly
    pub fn random<R: Rng>(rng: &mut R) -> Move {
        ALL_MOVES[rng.random_range(0..ALL_MOVES.len())]
    }

    #[inline]
    pub fn inverted(self) -> Move {
        Move {
            face: self.face,
            direction: self.direction.inverted(),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Clockwise => write!(f, "{}", self.face.letter()),
            Direction::CounterClockwise => write!(f, "{}'", self.face.letter()),
        }
    }
}

/// a row or column of one face
#[derive(Clone, Copy)]
enum Strip {
    Row(usize),
    Col(usize),
}

/// the four boundary strips touched by turning one face.
/// on a clockwise turn the content of `strips[i]` flows into
/// `strips[(i + 1) % 4]`; `reversed[i]` marks the transfers that write
/// their three stickers in reverse index order. a counter-clockwise turn
/// walks the same cycle backwards with the same reversal flags.
struct AdjacentCycle {
    strips: [(Face, Strip); 4],
    reversed: [bool; 4],
}

// indexed by the turned face. transcribed as data rather than per-face
// branches; the reversal pattern is asymmetric and easy to get wrong.
static ADJACENT: [AdjacentCycle; 6] = [
    // Front: Top.row2 -> Right.col0 -> Bottom.row0 -> Left.col2
    AdjacentCycle {
        strips: [
            (Face::Top, Strip::Row(2)),
            (Face::Right, Strip::Col(0)),
            (Face::Bottom, Strip::Row(0)),
            (Face::Left, Strip::Col(2)),
        ],
        reversed: [false, true, false, true],
    },
    // Back: Top.row0 -> Left.col0 -> Bottom.row2 -> Right.col2
    AdjacentCycle {
        strips: [
            (Face::Top, Strip::Row(0)),
            (Face::Left, Strip::Col(0)),
            (Face::Bottom, Strip::Row(2)),
            (Face::Right, Strip::Col(2)),
        ],
        reversed: [false, true, false, true],
    },
    // Right: Front.col2 -> Bottom.col2 -> Back.col0 -> Top.col2
    AdjacentCycle {
        strips: [
            (Face::Front, Strip::Col(2)),
            (Face::Bottom, Strip::Col(2)),
            (Face::Back, Strip::Col(0)),
            (Face::Top, Strip::Col(2)),
        ],
        reversed: [false, true, true, false],
    },
    // Left: Front.col0 -> Top.col0 -> Back.col2 -> Bottom.col0
    AdjacentCycle {
        strips: [
            (Face::Front, Strip::Col(0)),
            (Face::Top, Strip::Col(0)),
            (Face::Back, Strip::Col(2)),
            (Face::Bottom, Strip::Col(0)),
        ],
        reversed: [false, true, true, false],
    },
    // Top: Front.row0 -> Right.row0 -> Back.row0 -> Left.row0
    AdjacentCycle {
        strips: [
            (Face::Front, Strip::Row(0)),
            (Face::Right, Strip::Row(0)),
            (Face::Back, Strip::Row(0)),
            (Face::Left, Strip::Row(0)),
        ],
        reversed: [false, false, false, false],
    },
    // Bottom: Front.row2 -> Left.row2 -> Back.row2 -> Right.row2
    AdjacentCycle {
        strips: [
            (Face::Front, Strip::Row(2)),
            (Face::Left, Strip::Row(2)),
            (Face::Back, Strip::Row(2)),
            (Face::Right, Strip::Row(2)),
        ],
        reversed: [false, false, false, false],
    },
];

type Grid = [[Face; 3]; 3];

fn rotate_cw(grid: &mut Grid) {
    let old = *grid;
    for (r, row) in grid.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            *cell = old[2 - c][r];
        }
    }
}

fn rotate_ccw(grid: &mut Grid) {
    let old = *grid;
    for (r, row) in grid.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            *cell = old[c][2 - r];
        }
    }
}

/// full sticker state of the cube
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Cube {
    stickers: [Grid; 6],
}

impl Default for Cube {
    /// the solved cube: every sticker carries its own face label
    fn default() -> Self {
        let mut stickers = [[[Face::Front; 3]; 3]; 6];
        for face in Face::ALL {
            stickers[face.index()] = [[face; 3]; 3];
        }
        Cube { stickers }
    }
}

impl Cube {
    /// apply one generator move: rotate the turned face's grid, then
    /// cycle the four adjacent boundary strips
    pub fn apply(&mut self, mv: Move) {
        match mv.direction {
            Direction::Clockwise => rotate_cw(&mut self.stickers[mv.face.index()]),
            Direction::CounterClockwise => rotate_ccw(&mut self.stickers[mv.face.index()]),
        }

        let cycle = &ADJACENT[mv.face.index()];
        let read = [
            self.read_strip(cycle.strips[0]),
            self.read_strip(cycle.strips[1]),
            self.read_strip(cycle.strips[2]),
            self.read_strip(cycle.strips[3]),
        ];
        for i in 0..4 {
            match mv.direction {
                Direction::Clockwise => {
                    self.write_strip(cycle.strips[(i + 1) % 4], read[i], cycle.reversed[i]);
                }
                Direction::CounterClockwise => {
                    self.write_strip(cycle.strips[i], read[(i + 1) % 4], cycle.reversed[i]);
                }
            }
        }
    }

    /// true iff every face's 9 stickers carry the face's own label
    pub fn is_solved(&self) -> bool {
        Face::ALL
            .iter()
            .all(|&face| self.stickers[face.index()].iter().flatten().all(|&s| s == face))
    }

    /// apply [`SCRAMBLE_LENGTH`] uniformly random generator moves
    pub fn scramble<R: Rng>(&mut self, rng: &mut R) {
        self.scramble_with(rng, SCRAMBLE_LENGTH);
    }

    /// apply `turns` uniformly random generator moves
    pub fn scramble_with<R: Rng>(&mut self, rng: &mut R, turns: usize) {
        for _ in 0..turns {
            self.apply(Move::random(rng));
        }
    }

    /// read-only snapshot of the sticker array; mutating the copy never
    /// affects this cube
    pub fn stickers(&self) -> [Grid; 6] {
        self.stickers
    }

    /// label of one sticker
    #[inline]
    pub fn sticker(&self, face: Face, row: usize, col: usize) -> Face {
        self.stickers[face.index()][row][col]
    }

    fn read_strip(&self, (face, strip): (Face, Strip)) -> [Face; 3] {
        let grid = &self.stickers[face.index()];
        match strip {
            Strip::Row(r) => grid[r],
            Strip::Col(c) => [grid[0][c], grid[1][c], grid[2][c]],
        }
    }

    fn write_strip(&mut self, (face, strip): (Face, Strip), values: [Face; 3], reversed: bool) {
        let values = if reversed {
            [values[2], values[1], values[0]]
        } else {
            values
        };
        let grid = &mut self.stickers[face.index()];
        match strip {
            Strip::Row(r) => grid[r] = values,
            Strip::Col(c) => {
                grid[0][c] = values[0];
                grid[1][c] = values[1];
                grid[2][c] = values[2];
            }
        }
    }
}

impl fmt::Debug for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cube({self})")
    }
}

impl fmt::Display for Cube {
    /// unfolded net: Top above, Left/Front/Right/Back across, Bottom below
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row = |face: Face, r: usize| -> String {
            let grid = &self.stickers[face.index()];
            format!(
                "{} {} {}",
                grid[r][0].letter(),
                grid[r][1].letter(),
                grid[r][2].letter()
            )
        };
        for r in 0..3 {
            writeln!(f, "      {}", row(Face::Top, r))?;
        }
        for r in 0..3 {
            writeln!(
                f,
                "{} {} {} {}",
                row(Face::Left, r),
                row(Face::Front, r),
                row(Face::Right, r),
                row(Face::Back, r)
            )?;
        }
        for r in 0..3 {
            writeln!(f, "      {}", row(Face::Bottom, r))?;
        }
        Ok(())
    }
}
