use proptest::prelude::*;
use twenty48_engine::engine::ops::{merge_line, shift};
use twenty48_engine::{GameEngine, Grid, Move, RngSource, Tile};

fn arb_tile() -> impl Strategy<Value = Tile> {
    // Empty cells weighted up so boards have room to move.
    prop_oneof![3 => Just(0u64), 5 => (1u32..=11).prop_map(|e| 1u64 << e)]
}

fn arb_rows(size: usize) -> impl Strategy<Value = Vec<Vec<Tile>>> {
    prop::collection::vec(prop::collection::vec(arb_tile(), size), size)
}

fn arb_move() -> impl Strategy<Value = Move> {
    prop::sample::select(Move::ALL.to_vec())
}

fn sum(rows: &[Vec<Tile>]) -> Tile {
    rows.iter().flatten().sum()
}

fn engine(rows: &[Vec<Tile>], seed: u64) -> GameEngine {
    let mut game = GameEngine::with_source(rows.len(), RngSource::seeded(seed)).unwrap();
    game.set_board(rows).unwrap();
    game.set_score(0);
    game
}

proptest! {
    #[test]
    fn merge_line_preserves_sum_and_compacts(line in prop::collection::vec(arb_tile(), 2..8)) {
        let (out, gained) = merge_line(&line);
        prop_assert_eq!(out.len(), line.len());
        prop_assert_eq!(out.iter().sum::<Tile>(), line.iter().sum::<Tile>());
        // No gaps before the last tile.
        let filled = out.iter().take_while(|&&v| v != 0).count();
        prop_assert!(out[filled..].iter().all(|&v| v == 0));
        // Each merge removes one tile and scores the merged value.
        let merges = line.iter().filter(|&&v| v != 0).count() - filled;
        prop_assert!(gained as usize >= 4 * merges);
        prop_assert_eq!(merges == 0, gained == 0);
    }

    #[test]
    fn merge_line_is_idempotent_without_pairs(line in prop::collection::vec(arb_tile(), 2..8)) {
        let (once, _) = merge_line(&line);
        let (twice, gained) = merge_line(&once);
        // The output is already compacted, so a pass without merges leaves it alone.
        if gained == 0 {
            prop_assert_eq!(twice, once);
        }
    }

    #[test]
    fn changed_move_conserves_tiles_and_scores_merges(
        rows in arb_rows(4),
        dir in arb_move(),
        seed in any::<u64>(),
    ) {
        let mut game = engine(&rows, seed);
        let before = Grid::from_rows(4, &rows).unwrap();
        let (shifted, expected_gain) = shift(&before, dir);

        let outcome = game.move_outcome(dir);
        prop_assert_eq!(outcome.changed, shifted != before);
        if outcome.changed {
            prop_assert_eq!(game.score(), expected_gain);
            prop_assert_eq!(outcome.gained, expected_gain);

            let spawned = outcome.spawned.expect("a changed board always has room");
            prop_assert!(spawned.value == 2 || spawned.value == 4);
            prop_assert_eq!(shifted.get(spawned.row, spawned.col), 0);
            // A cell empty both before and after the shift is preferred over one a tile just left.
            let untouched = (0..4)
                .flat_map(|r| (0..4).map(move |c| (r, c)))
                .any(|(r, c)| rows[r][c] == 0 && shifted.get(r, c) == 0);
            if untouched {
                prop_assert_eq!(rows[spawned.row][spawned.col], 0);
            }

            let after = game.board();
            prop_assert_eq!(sum(&after), sum(&rows) + spawned.value);
            for r in 0..4 {
                for c in 0..4 {
                    if (r, c) != (spawned.row, spawned.col) {
                        prop_assert_eq!(after[r][c], shifted.get(r, c));
                    }
                }
            }
        }
    }

    #[test]
    fn unchanged_move_is_a_no_op(rows in arb_rows(4), dir in arb_move(), seed in any::<u64>()) {
        let mut game = engine(&rows, seed);
        game.set_score(321);
        let before = (game.board(), game.score(), game.is_won(), game.is_over());
        if !game.make_move(dir) {
            prop_assert_eq!(before, (game.board(), game.score(), game.is_won(), game.is_over()));
        }
    }

    #[test]
    fn long_games_keep_invariants(
        size in 2usize..6,
        seed in any::<u64>(),
        dirs in prop::collection::vec(arb_move(), 1..200),
    ) {
        let mut game = GameEngine::seeded(size, seed).unwrap();
        let mut last_score = game.score();
        let mut was_won = game.is_won();
        for dir in dirs {
            game.make_move(dir);
            let rows = game.board();
            prop_assert_eq!(rows.len(), size);
            prop_assert!(rows.iter().all(|r| r.len() == size));
            prop_assert!(rows.iter().flatten().all(|&v| v == 0 || v.is_power_of_two()));
            prop_assert!(game.score() >= last_score);
            prop_assert!(!was_won || game.is_won());
            prop_assert_eq!(game.is_over(), !game.can_move());
            last_score = game.score();
            was_won = game.is_won();
        }
    }

    #[test]
    fn can_move_matches_legal_moves(rows in arb_rows(4)) {
        prop_assume!(rows.iter().flatten().any(|&v| v != 0));
        let game = engine(&rows, 0);
        prop_assert_eq!(game.can_move(), game.legal_moves().iter().any(|&l| l));
    }
}
