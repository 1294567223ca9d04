//! Slide/merge rules.
//!
//! Every direction is resolved with the single left-merge routine [`merge_line`]:
//! [`Grid::line`] reads each row or column in the order tiles travel, so Right
//! and Down are the reversed Left and Up lines.

use super::{Grid, Move, Score, Tile, MAX_TILE};

/// Compact and merge one line toward index 0.
///
/// Zeros are dropped, then a single left-to-right pass merges equal neighbours.
/// A merged tile is never reconsidered in the same pass, so `[2, 2, 2, 2]` yields
/// `[4, 4, 0, 0]` and `[2, 2, 2, 0]` yields `[4, 2, 0, 0]`. The result is padded
/// with zeros back to the input length. Returns the new line and the sum of all
/// merged values, saturating at `Score::MAX`. Tiles at [`MAX_TILE`] do not merge.
///
/// ```
/// use twenty48_engine::engine::ops::merge_line;
/// assert_eq!(merge_line(&[2, 2, 2, 2]), (vec![4, 4, 0, 0], 8));
/// assert_eq!(merge_line(&[2, 4, 2, 0]), (vec![2, 4, 2, 0], 0));
/// ```
pub fn merge_line(line: &[Tile]) -> (Vec<Tile>, Score) {
    let compact: Vec<Tile> = line.iter().copied().filter(|&t| t != 0).collect();
    let mut merged = Vec::with_capacity(line.len());
    let mut gained: Score = 0;
    let mut i = 0;
    while i < compact.len() {
        if i + 1 < compact.len() && compact[i] == compact[i + 1] && compact[i] < MAX_TILE {
            let value = compact[i] * 2;
            merged.push(value);
            gained = gained.saturating_add(value);
            i += 2;
        } else {
            merged.push(compact[i]);
            i += 1;
        }
    }
    merged.resize(line.len(), 0);
    (merged, gained)
}

/// Slide/merge every line of `grid` in `dir`. No randomness.
///
/// Returns the resulting grid and the score gained from merges.
pub fn shift(grid: &Grid, dir: Move) -> (Grid, Score) {
    let mut out = grid.clone();
    let mut gained: Score = 0;
    for idx in 0..grid.size() {
        let (line, score) = merge_line(&grid.line(dir, idx));
        out.set_line(dir, idx, &line);
        gained = gained.saturating_add(score);
    }
    (out, gained)
}

/// Which of [`Move::ALL`] would change `grid`.
pub fn legal_moves(grid: &Grid) -> [bool; 4] {
    Move::ALL.map(|dir| shift(grid, dir).0 != *grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[Tile]]) -> Grid {
        let rows: Vec<Vec<Tile>> = rows.iter().map(|r| r.to_vec()).collect();
        Grid::from_rows(rows.len(), &rows).unwrap()
    }

    #[test]
    fn merge_line_basics() {
        assert_eq!(merge_line(&[0, 0, 0, 0]), (vec![0, 0, 0, 0], 0));
        assert_eq!(merge_line(&[2, 4, 2, 4]), (vec![2, 4, 2, 4], 0));
        assert_eq!(merge_line(&[2, 2, 4, 4]), (vec![4, 8, 0, 0], 12));
        assert_eq!(merge_line(&[2, 0, 0, 2]), (vec![4, 0, 0, 0], 4));
        assert_eq!(merge_line(&[0, 0, 0, 8]), (vec![8, 0, 0, 0], 0));
    }

    #[test]
    fn merge_line_does_not_cascade() {
        assert_eq!(merge_line(&[2, 2, 2, 2]), (vec![4, 4, 0, 0], 8));
        assert_eq!(merge_line(&[2, 2, 2, 0]), (vec![4, 2, 0, 0], 4));
        assert_eq!(merge_line(&[4, 2, 2, 0]), (vec![4, 4, 0, 0], 4));
        assert_eq!(merge_line(&[2, 4, 2, 0]), (vec![2, 4, 2, 0], 0));
    }

    #[test]
    fn merge_line_other_lengths() {
        assert_eq!(merge_line(&[2, 2]), (vec![4, 0], 4));
        assert_eq!(merge_line(&[8, 0, 8, 4, 4, 0]), (vec![16, 8, 0, 0, 0, 0], 24));
    }

    #[test]
    fn merges_at_the_tile_cap_do_not_overflow() {
        let big = MAX_TILE / 2;
        assert_eq!(
            merge_line(&[big, big, big, big]),
            (vec![MAX_TILE, MAX_TILE, 0, 0], Score::MAX)
        );
        // Capped tiles stay put instead of doubling past u64.
        assert_eq!(
            merge_line(&[MAX_TILE, MAX_TILE, 0, 0]),
            (vec![MAX_TILE, MAX_TILE, 0, 0], 0)
        );

        let g = grid(&[&[big, big, big, big], &[big, big, 0, 0], &[0; 4], &[0; 4]]);
        let (left, gained) = shift(&g, Move::Left);
        assert_eq!(left.line(Move::Left, 1), vec![MAX_TILE, 0, 0, 0]);
        assert_eq!(gained, Score::MAX);
    }

    #[test]
    fn shift_left_and_right() {
        let g = grid(&[&[2, 4, 8, 16], &[2, 8, 8, 4], &[4, 0, 0, 4], &[2, 0, 0, 4]]);
        let (left, gained) = shift(&g, Move::Left);
        assert_eq!(left, grid(&[&[2, 4, 8, 16], &[2, 16, 4, 0], &[8, 0, 0, 0], &[2, 4, 0, 0]]));
        assert_eq!(gained, 24);

        let (right, gained) = shift(&g, Move::Right);
        assert_eq!(right, grid(&[&[2, 4, 8, 16], &[0, 2, 16, 4], &[0, 0, 0, 8], &[0, 0, 2, 4]]));
        assert_eq!(gained, 24);
    }

    #[test]
    fn shift_up_and_down() {
        let g = grid(&[&[2, 2, 4, 2], &[4, 8, 0, 0], &[8, 8, 0, 0], &[16, 2, 4, 4]]);
        let (up, gained) = shift(&g, Move::Up);
        assert_eq!(up, grid(&[&[2, 2, 8, 2], &[4, 16, 0, 4], &[8, 2, 0, 0], &[16, 0, 0, 0]]));
        assert_eq!(gained, 24);

        let (down, gained) = shift(&g, Move::Down);
        assert_eq!(down, grid(&[&[2, 0, 0, 0], &[4, 2, 0, 0], &[8, 16, 0, 2], &[16, 2, 8, 4]]));
        assert_eq!(gained, 24);
    }

    #[test]
    fn right_merges_from_the_far_edge() {
        let g = grid(&[&[0, 2, 2, 2], &[0, 0, 0, 0], &[0, 0, 0, 0], &[0, 0, 0, 0]]);
        let (right, _) = shift(&g, Move::Right);
        assert_eq!(right.line(Move::Left, 0), vec![0, 0, 2, 4]);
    }

    #[test]
    fn legal_moves_reports_changing_directions() {
        let g = grid(&[&[2, 0], &[4, 0]]);
        // Up, Down, Left, Right
        assert_eq!(legal_moves(&g), [false, false, false, true]);
        let stuck = grid(&[&[2, 4], &[4, 2]]);
        assert_eq!(legal_moves(&stuck), [false; 4]);
    }
}
