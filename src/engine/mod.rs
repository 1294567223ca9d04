//! Board rules for 2048 on an N×N grid.
//!
//! - [`Grid`]: owned row-major board of tile values (0 = empty).
//! - [`ops`]: the canonical left-merge over one line, and whole-board shifts built on it.
//! - [`spawn`]: random tile placement behind the [`spawn::TileSource`] seam.
//! - [`terminal`]: win and game-over checks.

use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

pub mod ops;
pub mod spawn;
pub mod terminal;

pub type Tile = u64;
pub type Score = u64;

/// Largest representable tile. Tiles at the cap never merge further.
pub const MAX_TILE: Tile = 1 << 63;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Decode a wire-style direction code (0=Up, 1=Down, 2=Left, 3=Right).
    pub fn from_u8(code: u8) -> Option<Move> {
        match code {
            0 => Some(Move::Up),
            1 => Some(Move::Down),
            2 => Some(Move::Left),
            3 => Some(Move::Right),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Move::Up => 0,
            Move::Down => 1,
            Move::Left => 2,
            Move::Right => 3,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Up => "UP",
            Move::Down => "DOWN",
            Move::Left => "LEFT",
            Move::Right => "RIGHT",
        };
        f.write_str(name)
    }
}

/// Returned when a direction name is not one of up/down/left/right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMove(pub String);

impl fmt::Display for UnknownMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown direction {:?}", self.0)
    }
}

impl std::error::Error for UnknownMove {}

impl FromStr for Move {
    type Err = UnknownMove;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Move::Up),
            "down" | "d" => Ok(Move::Down),
            "left" | "l" => Ok(Move::Left),
            "right" | "r" => Ok(Move::Right),
            _ => Err(UnknownMove(s.to_string())),
        }
    }
}

/// Square board of tile values stored row-major.
///
/// Every cell is 0 or a power of two; the size is fixed at construction.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    cells: Vec<Tile>,
}

impl Grid {
    /// An all-empty `size`×`size` grid.
    pub fn empty(size: usize) -> Self {
        Grid { size, cells: vec![0; size * size] }
    }

    /// Copy `rows` into a new grid, checking that they form a `size`×`size` board of valid tiles.
    pub fn from_rows(size: usize, rows: &[Vec<Tile>]) -> Result<Self, EngineError> {
        let bad_row = rows.iter().position(|r| r.len() != size);
        if rows.len() != size || bad_row.is_some() {
            return Err(EngineError::InvalidDimension { expected: size, rows: rows.len(), bad_row });
        }
        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                if !is_valid_tile(value) {
                    return Err(EngineError::InvalidTile { row, col, value });
                }
                cells.push(value);
            }
        }
        Ok(Grid { size, cells })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Tile {
        self.cells[row * self.size + col]
    }

    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize, value: Tile) {
        self.cells[row * self.size + col] = value;
    }

    /// Row-major view of all cells.
    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    /// Fresh nested copy of the board, one `Vec` per row.
    pub fn to_rows(&self) -> Vec<Vec<Tile>> {
        self.cells.chunks(self.size.max(1)).map(<[Tile]>::to_vec).collect()
    }

    /// Coordinates of every empty cell, in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == 0)
            .map(|(idx, _)| (idx / self.size, idx % self.size))
            .collect()
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    /// Highest tile value on the board (0 for an empty board).
    pub fn highest_tile(&self) -> Tile {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Read line `idx` in the order tiles travel toward for `dir`, so the
    /// first element is the cell tiles slide into.
    pub(crate) fn line(&self, dir: Move, idx: usize) -> Vec<Tile> {
        (0..self.size)
            .map(|k| {
                let (row, col) = self.line_coords(dir, idx, k);
                self.get(row, col)
            })
            .collect()
    }

    /// Inverse of [`Grid::line`]: write `tiles` back in the same traversal order.
    pub(crate) fn set_line(&mut self, dir: Move, idx: usize, tiles: &[Tile]) {
        debug_assert_eq!(tiles.len(), self.size);
        for (k, &value) in tiles.iter().enumerate() {
            let (row, col) = self.line_coords(dir, idx, k);
            self.set(row, col, value);
        }
    }

    #[inline]
    fn line_coords(&self, dir: Move, idx: usize, k: usize) -> (usize, usize) {
        let last = self.size - 1;
        match dir {
            Move::Left => (idx, k),
            Move::Right => (idx, last - k),
            Move::Up => (k, idx),
            Move::Down => (last - k, idx),
        }
    }
}

#[inline]
fn is_valid_tile(value: Tile) -> bool {
    value == 0 || (value.is_power_of_two() && value <= MAX_TILE)
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid").field("size", &self.size).field("rows", &self.to_rows()).finish()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.highest_tile().to_string().len().max(4) + 2;
        let divider = "-".repeat(((width + 1) * self.size).saturating_sub(1));
        for (r, row) in self.cells.chunks(self.size.max(1)).enumerate() {
            if r > 0 {
                writeln!(f, "{divider}")?;
            }
            let cells: Vec<String> = row.iter().map(|&v| format_val(v, width)).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

fn format_val(val: Tile, width: usize) -> String {
    match val {
        0 => " ".repeat(width),
        x => format!("{:^width$}", x),
    }
}
