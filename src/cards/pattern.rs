//! Movement patterns.
//!
//! A pattern is a 5x5 grid centred on the moving piece, drawn from
//! Player 1's seat: the top row is two squares forward, the left column two
//! squares to Player 1's left. A marked cell is a reachable square.

use serde::{Deserialize, Serialize};

use crate::core::{EngineError, EngineResult, Offset};

/// Side length of a pattern grid.
pub const PATTERN_SIZE: usize = 5;

const CENTER: usize = PATTERN_SIZE / 2;

/// Validated movement pattern.
///
/// Cannot be constructed with the wrong shape, with markers other than
/// 0/1, or with the centre cell marked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<i32>>", into = "Vec<Vec<i32>>")]
pub struct Pattern {
    cells: [[bool; PATTERN_SIZE]; PATTERN_SIZE],
}

impl Pattern {
    /// Build from a grid of 0/1 markers.
    pub fn from_grid<R: AsRef<[i32]>>(rows: &[R]) -> EngineResult<Self> {
        if rows.len() != PATTERN_SIZE {
            return Err(EngineError::InvalidPattern(format!(
                "expected {PATTERN_SIZE} rows, got {}",
                rows.len()
            )));
        }

        let mut cells = [[false; PATTERN_SIZE]; PATTERN_SIZE];
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != PATTERN_SIZE {
                return Err(EngineError::InvalidPattern(format!(
                    "row {r} has {} cells, expected {PATTERN_SIZE}",
                    row.len()
                )));
            }
            for (c, &value) in row.iter().enumerate() {
                cells[r][c] = match value {
                    0 => false,
                    1 => true,
                    other => {
                        return Err(EngineError::InvalidPattern(format!(
                            "marker {other} at ({r}, {c}) is not 0 or 1"
                        )))
                    }
                };
            }
        }

        if cells[CENTER][CENTER] {
            return Err(EngineError::InvalidPattern("centre cell is marked".to_string()));
        }
        Ok(Self { cells })
    }

    /// Build from `(right, forward)` steps as seen from Player 1's seat.
    pub fn from_steps(steps: &[(i8, i8)]) -> EngineResult<Self> {
        let mut grid = vec![vec![0i32; PATTERN_SIZE]; PATTERN_SIZE];
        for &(right, forward) in steps {
            let r = CENTER as i32 - i32::from(forward);
            let c = CENTER as i32 + i32::from(right);
            if !(0..PATTERN_SIZE as i32).contains(&r) || !(0..PATTERN_SIZE as i32).contains(&c) {
                return Err(EngineError::InvalidPattern(format!(
                    "step ({right}, {forward}) outside the pattern grid"
                )));
            }
            grid[r as usize][c as usize] = 1;
        }
        Self::from_grid(&grid)
    }

    /// Parse the compact `r0/r1/r2/r3/r4` form, each row five `0`/`1` digits.
    pub fn parse(text: &str) -> EngineResult<Self> {
        let rows = text
            .split('/')
            .map(|row| {
                row.chars()
                    .map(|ch| match ch {
                        '0' => Ok(0),
                        '1' => Ok(1),
                        other => Err(EngineError::InvalidPattern(format!("unexpected marker {other:?}"))),
                    })
                    .collect::<EngineResult<Vec<i32>>>()
            })
            .collect::<EngineResult<Vec<_>>>()?;
        Self::from_grid(&rows)
    }

    /// Compact `r0/r1/r2/r3/r4` form.
    #[must_use]
    pub fn encode(&self) -> String {
        self.cells
            .iter()
            .map(|row| row.iter().map(|&m| if m { '1' } else { '0' }).collect::<String>())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Is the cell at grid position `(r, c)` marked?
    #[must_use]
    pub fn is_marked(&self, r: usize, c: usize) -> bool {
        r < PATTERN_SIZE && c < PATTERN_SIZE && self.cells[r][c]
    }

    /// Board offsets for Player 1, in grid order.
    ///
    /// Player 1 moves toward row 0, so grid row `r` maps directly to a row
    /// delta of `r - 2`.
    pub fn offsets(&self) -> impl Iterator<Item = Offset> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, marked)| **marked)
                .map(move |(c, _)| Offset::new(r as i8 - CENTER as i8, c as i8 - CENTER as i8))
        })
    }

    /// True if `offset` (in Player 1's frame) is marked.
    #[must_use]
    pub fn contains(&self, offset: Offset) -> bool {
        let r = i32::from(offset.d_row) + CENTER as i32;
        let c = i32::from(offset.d_col) + CENTER as i32;
        r >= 0 && c >= 0 && self.is_marked(r as usize, c as usize)
    }

    /// Number of marked cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.iter().flatten().filter(|&&m| m).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TryFrom<Vec<Vec<i32>>> for Pattern {
    type Error = EngineError;

    fn try_from(rows: Vec<Vec<i32>>) -> Result<Self, Self::Error> {
        Self::from_grid(&rows)
    }
}

impl From<Pattern> for Vec<Vec<i32>> {
    fn from(pattern: Pattern) -> Self {
        pattern
            .cells
            .iter()
            .map(|row| row.iter().map(|&m| i32::from(m)).collect())
            .collect()
    }
}
