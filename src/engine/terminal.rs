//! Win and game-over detection. Both are full O(size²) scans.

use super::{Grid, Tile};

/// Tile value that wins the classic game.
pub const WIN_TILE: Tile = 2048;

/// True if any cell equals `win_tile`.
pub fn check_won(grid: &Grid, win_tile: Tile) -> bool {
    grid.cells().iter().any(|&v| v == win_tile)
}

/// True if some cell is empty or two orthogonal neighbours are equal.
pub fn can_move(grid: &Grid) -> bool {
    grid.count_empty() > 0 || has_adjacent_pair(grid)
}

/// True iff the board is full and no two orthogonal neighbours are equal.
pub fn check_over(grid: &Grid) -> bool {
    !can_move(grid)
}

fn has_adjacent_pair(grid: &Grid) -> bool {
    let n = grid.size();
    for row in 0..n {
        for col in 0..n {
            let v = grid.get(row, col);
            if v == 0 {
                continue;
            }
            if col + 1 < n && grid.get(row, col + 1) == v {
                return true;
            }
            if row + 1 < n && grid.get(row + 1, col) == v {
                return true;
            }
        }
    }
    false
}
