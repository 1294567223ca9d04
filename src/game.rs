//! The stateful game: board, score, and the won/over flags.
//!
//! A `GameEngine` is a plain owned value with no interior locking. Hosts serving
//! many players keep one engine per session and serialize calls to it.

use std::fmt;

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::EngineConfig;
use crate::engine::spawn::{self, RngSource, Spawned, TileSource};
use crate::engine::terminal::{self, WIN_TILE};
use crate::engine::{ops, Grid, Move, Score, Tile};
use crate::error::{ConfigError, EngineError};

pub const DEFAULT_SIZE: usize = 4;

/// What a single move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveOutcome {
    /// Whether any tile slid or merged. False means nothing at all changed.
    pub changed: bool,
    /// Sum of the tiles created by merges in this move.
    pub gained: Score,
    /// The tile added after the move, if the board changed and had room.
    pub spawned: Option<Spawned>,
}

/// A 2048 game on a `size`×`size` board.
///
/// ```
/// use twenty48_engine::{GameEngine, Move};
/// let mut game = GameEngine::seeded(4, 7).unwrap();
/// assert_eq!(game.board().concat().iter().filter(|&&v| v != 0).count(), 2);
/// game.set_board(&[vec![2, 2, 0, 0], vec![0; 4], vec![0; 4], vec![0; 4]]).unwrap();
/// assert!(game.make_move(Move::Left));
/// assert_eq!(game.board()[0][0], 4);
/// assert_eq!(game.score(), 4);
/// ```
#[derive(Clone)]
pub struct GameEngine<S = RngSource> {
    grid: Grid,
    score: Score,
    won: bool,
    over: bool,
    win_tile: Tile,
    moves: u64,
    source: S,
}

impl GameEngine<RngSource> {
    /// New game with an entropy-seeded spawner. Fails if `size < 2`.
    pub fn new(size: usize) -> Result<Self, EngineError> {
        Self::with_source(size, RngSource::from_entropy())
    }

    /// New game whose spawns are reproducible from `seed`.
    pub fn seeded(size: usize, seed: u64) -> Result<Self, EngineError> {
        Self::with_source(size, RngSource::seeded(seed))
    }

    /// Validate `cfg` and build a game from it.
    pub fn from_config(cfg: &EngineConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let source = RngSource::with_four_probability(rng, cfg.four_probability);
        Ok(GameEngine::build(cfg.size, cfg.win_tile, source))
    }
}

impl Default for GameEngine<RngSource> {
    fn default() -> Self {
        GameEngine::build(DEFAULT_SIZE, WIN_TILE, RngSource::from_entropy())
    }
}

impl<S: TileSource> GameEngine<S> {
    /// New game drawing spawn decisions from `source`.
    pub fn with_source(size: usize, source: S) -> Result<Self, EngineError> {
        if size < 2 {
            return Err(EngineError::InvalidSize(size));
        }
        Ok(Self::build(size, WIN_TILE, source))
    }

    fn build(size: usize, win_tile: Tile, source: S) -> Self {
        let mut game = GameEngine {
            grid: Grid::empty(size),
            score: 0,
            won: false,
            over: false,
            win_tile,
            moves: 0,
            source,
        };
        game.reset();
        debug!("new {size}x{size} game, win tile {win_tile}");
        game
    }

    /// Empty the board, zero the score, clear both flags, and spawn two tiles.
    pub fn reset(&mut self) {
        self.grid = Grid::empty(self.grid.size());
        self.score = 0;
        self.won = false;
        self.over = false;
        self.moves = 0;
        spawn::spawn(&mut self.grid, &mut self.source);
        spawn::spawn(&mut self.grid, &mut self.source);
        self.refresh_flags();
    }

    /// Slide/merge in `dir`; returns whether the board changed.
    ///
    /// On change exactly one tile is spawned, in a cell that was already empty
    /// before the move whenever one is still free, and the flags are re-evaluated.
    /// When nothing moves the board, score and flags are left untouched. The score
    /// saturates at `Score::MAX`.
    pub fn make_move(&mut self, dir: Move) -> bool {
        self.move_outcome(dir).changed
    }

    /// Like [`GameEngine::make_move`] but reports the merge score and the spawned tile.
    pub fn move_outcome(&mut self, dir: Move) -> MoveOutcome {
        let (next, gained) = ops::shift(&self.grid, dir);
        if next == self.grid {
            return MoveOutcome::default();
        }
        let before = std::mem::replace(&mut self.grid, next);
        self.score = self.score.saturating_add(gained);
        self.moves += 1;
        let spawned = spawn::spawn_after_move(&mut self.grid, &before, &mut self.source);
        self.refresh_flags();
        MoveOutcome { changed: true, gained, spawned }
    }

    /// Move by direction name ("up", "Left", ...). Unknown names are a no-op returning false.
    pub fn move_named(&mut self, dir: &str) -> bool {
        match dir.parse::<Move>() {
            Ok(dir) => self.make_move(dir),
            Err(e) => {
                debug!("ignoring move: {e}");
                false
            }
        }
    }

    /// Move by code (0=Up, 1=Down, 2=Left, 3=Right). Unknown codes are a no-op returning false.
    pub fn move_code(&mut self, code: u8) -> bool {
        match Move::from_u8(code) {
            Some(dir) => self.make_move(dir),
            None => {
                debug!("ignoring move: unknown direction code {code}");
                false
            }
        }
    }

    fn refresh_flags(&mut self) {
        if !self.won && terminal::check_won(&self.grid, self.win_tile) {
            self.won = true;
            debug!("reached {} with score {}", self.win_tile, self.score);
        }
        let over = terminal::check_over(&self.grid);
        if over && !self.over {
            debug!("game over after {} moves, score {}", self.moves, self.score);
        }
        self.over = over;
    }

    /// Copy of the board as rows. Changing it never affects the game.
    pub fn board(&self) -> Vec<Vec<Tile>> {
        self.grid.to_rows()
    }

    /// Borrow the board without copying.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// Latched: stays true for the rest of the game once the win tile appeared.
    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    /// True if some empty cell exists or two orthogonal neighbours are equal.
    pub fn can_move(&self) -> bool {
        terminal::can_move(&self.grid)
    }

    /// Which of `[Up, Down, Left, Right]` would change the board.
    pub fn legal_moves(&self) -> [bool; 4] {
        ops::legal_moves(&self.grid)
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn win_tile(&self) -> Tile {
        self.win_tile
    }

    pub fn highest_tile(&self) -> Tile {
        self.grid.highest_tile()
    }

    pub fn count_empty(&self) -> usize {
        self.grid.count_empty()
    }

    /// Number of board-changing moves since the last reset.
    pub fn moves_made(&self) -> u64 {
        self.moves
    }

    /// Debug harness: replace the board with a copy of `rows`.
    ///
    /// Rejects a grid of the wrong shape or with cells that are not 0 or a power of
    /// two. The win flag can latch on; the over flag is recomputed.
    pub fn set_board(&mut self, rows: &[Vec<Tile>]) -> Result<(), EngineError> {
        self.grid = Grid::from_rows(self.grid.size(), rows)?;
        self.refresh_flags();
        Ok(())
    }

    /// Debug harness: overwrite the score.
    pub fn set_score(&mut self, score: Score) {
        self.score = score;
    }
}

impl<S> fmt::Display for GameEngine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid)?;
        write!(f, "score: {}", self.score)?;
        if self.won {
            write!(f, " (won)")?;
        }
        if self.over {
            write!(f, " (game over)")?;
        }
        Ok(())
    }
}

impl<S> fmt::Debug for GameEngine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameEngine")
            .field("grid", &self.grid)
            .field("score", &self.score)
            .field("won", &self.won)
            .field("over", &self.over)
            .field("moves", &self.moves)
            .finish()
    }
}
