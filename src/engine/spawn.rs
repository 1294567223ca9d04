//! Random tile placement.
//!
//! The engine never touches a global RNG. It asks a [`TileSource`] which empty
//! cell to fill and with what value, so tests can script the exact sequence.

use std::collections::VecDeque;

use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Grid, Tile};

/// Default probability that a spawned tile is a 4 rather than a 2.
pub const FOUR_PROBABILITY: f64 = 0.1;

/// Source of spawn decisions.
pub trait TileSource {
    /// Pick one of `empty_cells` candidates (row-major order).
    /// Called only with `empty_cells > 0`.
    fn next_empty_cell_index(&mut self, empty_cells: usize) -> usize;

    /// Value of the next spawned tile: 2 or 4. Anything else is placed as a 2.
    fn next_tile_value(&mut self) -> Tile;
}

impl<T: TileSource + ?Sized> TileSource for Box<T> {
    fn next_empty_cell_index(&mut self, empty_cells: usize) -> usize {
        (**self).next_empty_cell_index(empty_cells)
    }

    fn next_tile_value(&mut self) -> Tile {
        (**self).next_tile_value()
    }
}

/// [`TileSource`] backed by any `rand::Rng`: uniform cell choice, 2 with
/// probability `1 - four_probability`, otherwise 4.
#[derive(Debug, Clone)]
pub struct RngSource<R = StdRng> {
    rng: R,
    four_probability: f64,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self::with_four_probability(rng, FOUR_PROBABILITY)
    }

    /// `four_probability` is clamped to `[0, 1]`; NaN falls back to the default.
    pub fn with_four_probability(rng: R, four_probability: f64) -> Self {
        let four_probability = if four_probability.is_nan() {
            FOUR_PROBABILITY
        } else {
            four_probability.clamp(0.0, 1.0)
        };
        RngSource { rng, four_probability }
    }
}

impl RngSource<StdRng> {
    /// Deterministic source for reproducible games.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> TileSource for RngSource<R> {
    fn next_empty_cell_index(&mut self, empty_cells: usize) -> usize {
        self.rng.gen_range(0..empty_cells)
    }

    fn next_tile_value(&mut self) -> Tile {
        if self.rng.gen_bool(self.four_probability) { 4 } else { 2 }
    }
}

/// Fixed sequence of spawn decisions.
///
/// Cell indices are reduced modulo the number of empty cells. Scripted values
/// other than 4 are played as 2. Once a queue runs dry the source keeps answering
/// with the first empty cell and a 2.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    cells: VecDeque<usize>,
    values: VecDeque<Tile>,
}

impl ScriptedSource {
    pub fn new<C, V>(cells: C, values: V) -> Self
    where
        C: IntoIterator<Item = usize>,
        V: IntoIterator<Item = Tile>,
    {
        ScriptedSource { cells: cells.into_iter().collect(), values: values.into_iter().collect() }
    }

    /// Remaining scripted (cell, value) decisions.
    pub fn remaining(&self) -> (usize, usize) {
        (self.cells.len(), self.values.len())
    }
}

impl TileSource for ScriptedSource {
    fn next_empty_cell_index(&mut self, empty_cells: usize) -> usize {
        self.cells.pop_front().unwrap_or(0) % empty_cells
    }

    fn next_tile_value(&mut self) -> Tile {
        match self.values.pop_front() {
            Some(4) => 4,
            _ => 2,
        }
    }
}

/// A tile placed by [`spawn`] or [`spawn_after_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawned {
    pub row: usize,
    pub col: usize,
    pub value: Tile,
}

/// Place one tile in an empty cell chosen by `source`.
///
/// Returns `None` without touching the grid or the source when the board is full.
pub fn spawn<S: TileSource + ?Sized>(grid: &mut Grid, source: &mut S) -> Option<Spawned> {
    let empty = grid.empty_cells();
    place(grid, &empty, source)
}

/// Spawn after a move from `before` to `grid`.
///
/// Candidates are the cells empty both before and after the move, so a tile
/// never lands where a tile just slid out. When no such cell exists (`[0, 2]`
/// moved left) every cell empty after the move is a candidate.
pub fn spawn_after_move<S: TileSource + ?Sized>(
    grid: &mut Grid,
    before: &Grid,
    source: &mut S,
) -> Option<Spawned> {
    let empty = grid.empty_cells();
    let untouched: Vec<(usize, usize)> =
        empty.iter().copied().filter(|&(row, col)| before.get(row, col) == 0).collect();
    if untouched.is_empty() {
        place(grid, &empty, source)
    } else {
        place(grid, &untouched, source)
    }
}

fn place<S: TileSource + ?Sized>(
    grid: &mut Grid,
    candidates: &[(usize, usize)],
    source: &mut S,
) -> Option<Spawned> {
    if candidates.is_empty() {
        return None;
    }
    let pick = source.next_empty_cell_index(candidates.len()).min(candidates.len() - 1);
    let (row, col) = candidates[pick];
    let value = match source.next_tile_value() {
        4 => 4,
        other => {
            debug_assert_eq!(other, 2, "tile sources yield 2 or 4");
            2
        }
    };
    grid.set(row, col, value);
    trace!("spawned {value} at ({row}, {col}) from {} candidate cells", candidates.len());
    Some(Spawned { row, col, value })
}
