//! Game state module - manages the complete game state
//!
//! This module ties together the board, pieces, letters, scoring and the word
//! tracer. Every mutation goes through `&mut self` methods; a rejected
//! request (blocked move, failed rotation, bad trace step) leaves the state
//! untouched and reports `false`/`None`.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::collision::{check_collision, has_landed, rotate_with_kicks};
use crate::config::GameConfig;
use crate::pieces::{bounding_size, Tetromino};
use crate::scoring::{drop_interval_ms, drop_score, level_for_lines, score_for_clear};
use crate::snapshot::{GameSnapshot, SnapshotError};
use crate::types::{GameAction, PathPosition, BOARD_HEIGHT, BOARD_WIDTH, PIECE_GRID};
use crate::word::{Dictionary, TracedWord, WordTracer};

/// Result of finishing a word trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordOutcome {
    /// No trace was in progress.
    Empty,
    /// Too short, not in the dictionary, or the game is over. Board unchanged.
    Rejected(TracedWord),
    /// Letters removed and columns compacted.
    Accepted { word: TracedWord, removed: usize },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    rng: StdRng,
    board: Board,
    active: Option<Tetromino>,
    next: Tetromino,
    held: Option<Tetromino>,
    /// Hold is allowed once per spawned piece.
    can_hold: bool,
    tracer: WordTracer,
    score: u32,
    level: u32,
    lines: u32,
    words: u32,
    /// Milliseconds per gravity row at the current level.
    speed_ms: u32,
    paused: bool,
    game_over: bool,
    started: bool,
}

impl GameState {
    /// Create a new game; call [`start`](Self::start) to spawn the first piece.
    pub fn new(config: GameConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let next = Tetromino::random(&mut rng, config.alphabet.table());
        let level = config.start_level.max(1);

        Self {
            config,
            rng,
            board: Board::new(),
            active: None,
            next,
            held: None,
            can_hold: true,
            tracer: WordTracer::new(),
            score: 0,
            level,
            lines: 0,
            words: 0,
            speed_ms: drop_interval_ms(level),
            paused: false,
            game_over: false,
            started: false,
        }
    }

    /// Default configuration with the given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(GameConfig::default().with_seed(seed))
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_piece();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Number of accepted words.
    pub fn words(&self) -> u32 {
        self.words
    }

    pub fn speed_ms(&self) -> u32 {
        self.speed_ms
    }

    pub fn active(&self) -> Option<&Tetromino> {
        self.active.as_ref()
    }

    pub fn next(&self) -> &Tetromino {
        &self.next
    }

    pub fn held(&self) -> Option<&Tetromino> {
        self.held.as_ref()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for scripted setups and tools.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn word_path(&self) -> &[PathPosition] {
        self.tracer.path()
    }

    pub fn is_tracing(&self) -> bool {
        self.tracer.is_tracing()
    }

    /// Movement, rotation and tracing only happen in a running, unpaused game.
    fn accepts_input(&self) -> bool {
        self.started && !self.paused && !self.game_over
    }

    /// Activate the `next` piece at its spawn position and draw a new `next`.
    ///
    /// Returns `false` and ends the game when the spawn position is blocked.
    pub fn spawn_piece(&mut self) -> bool {
        let fresh = Tetromino::random(&mut self.rng, self.config.alphabet.table());
        let piece = std::mem::replace(&mut self.next, fresh).reset_to_spawn();
        self.can_hold = true;
        self.activate(piece)
    }

    fn activate(&mut self, piece: Tetromino) -> bool {
        if self.board.check_game_over(&piece) {
            self.active = None;
            self.end_game();
            return false;
        }
        self.active = Some(piece);
        true
    }

    fn end_game(&mut self) {
        if !self.game_over {
            info!(
                "game over: score {} level {} lines {} words {}",
                self.score, self.level, self.lines, self.words
            );
        }
        self.game_over = true;
        self.tracer.cancel();
    }

    /// Replace the active piece, e.g. to script a scenario.
    ///
    /// Rejected when the piece collides at its position.
    pub fn replace_active(&mut self, piece: Tetromino) -> bool {
        if !self.started || self.game_over || check_collision(&piece, &self.board, None) {
            return false;
        }
        self.active = Some(piece);
        true
    }

    /// Try to move the active piece
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.moved(dx, dy);
        if check_collision(&moved, &self.board, None) {
            return false;
        }
        self.active = Some(moved);
        true
    }

    /// Try to rotate the active piece with SRS wall kicks
    pub fn try_rotate(&mut self, clockwise: bool) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        match rotate_with_kicks(&active, &self.board, clockwise) {
            Some(rotated) => {
                self.active = Some(rotated);
                true
            }
            None => false,
        }
    }

    /// Move one row down, or lock the piece if it has landed.
    /// Returns `true` only when the piece moved.
    fn step_down(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        if has_landed(&active, &self.board) {
            self.lock_piece();
            return false;
        }
        self.active = Some(active.moved(0, 1));
        true
    }

    /// One gravity step.
    pub fn tick(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.step_down()
    }

    /// Player-driven step down (+1 point per row moved).
    pub fn soft_drop(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let moved = self.step_down();
        if moved {
            self.score = self.score.saturating_add(drop_score(1, false));
        }
        moved
    }

    /// Drop straight down and lock (+2 points per row). Returns rows dropped.
    pub fn hard_drop(&mut self) -> u32 {
        if !self.accepts_input() {
            return 0;
        }
        let Some(mut piece) = self.active else {
            return 0;
        };

        let mut distance: u32 = 0;
        while !has_landed(&piece, &self.board) {
            piece = piece.moved(0, 1);
            distance += 1;
        }

        self.active = Some(piece);
        self.score = self.score.saturating_add(drop_score(distance, true));
        self.lock_piece();
        distance
    }

    /// Where the active piece would land
    pub fn ghost_y(&self) -> Option<i8> {
        let mut piece = self.active?;
        while !has_landed(&piece, &self.board) {
            piece = piece.moved(0, 1);
        }
        Some(piece.position.y)
    }

    /// Swap the active piece with the held one (or stash it and spawn).
    pub fn hold(&mut self) -> bool {
        if !self.accepts_input() || !self.can_hold {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let previous = self.held.replace(active.reset_to_spawn());
        debug!("hold {:?}, swapped in {:?}", active.kind, previous.map(|p| p.kind));
        let ok = match previous {
            Some(piece) => self.activate(piece.reset_to_spawn()),
            None => self.spawn_piece(),
        };
        self.can_hold = false;
        ok
    }

    /// Commit the active piece, clear lines, update score/level and spawn the
    /// next piece. Returns the number of lines cleared.
    pub fn lock_piece(&mut self) -> usize {
        let Some(active) = self.active.take() else {
            return 0;
        };

        self.board.place_piece(&active);
        let cleared = self.board.clear_lines();

        if cleared > 0 {
            self.score = self
                .score
                .saturating_add(score_for_clear(cleared, self.level));
            self.lines += cleared as u32;
            debug!("cleared {} line(s), {} total", cleared, self.lines);

            let level = level_for_lines(self.lines, self.config.start_level);
            if level != self.level {
                info!("level up: {} -> {}", self.level, level);
                self.level = level;
                self.speed_ms = drop_interval_ms(level);
            }

            // Rows moved under the trace; its coordinates no longer match.
            self.tracer.cancel();
        }

        self.spawn_piece();
        cleared
    }

    pub fn toggle_pause(&mut self) -> bool {
        if !self.started || self.game_over {
            return false;
        }
        self.paused = !self.paused;
        true
    }

    /// Fresh game with the same settings and a seed drawn from this one.
    pub fn restart(&mut self) {
        let seed = self.rng.gen::<u64>();
        let config = GameConfig {
            seed,
            ..self.config.clone()
        };
        info!("restart with seed {}", seed);
        *self = Self::new(config);
        self.start();
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => {
                if !self.accepts_input() || self.active.is_none() {
                    return false;
                }
                self.hard_drop();
                true
            }
            GameAction::RotateCw => self.try_rotate(true),
            GameAction::RotateCcw => self.try_rotate(false),
            GameAction::Hold => self.hold(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Start a trace at (x, y). `false` when the cell has no letter.
    pub fn begin_word(&mut self, x: i8, y: i8) -> bool {
        if !self.accepts_input() {
            return false;
        }
        if self.board.letter_at(x, y).is_none() {
            return false;
        }
        self.tracer.start(&self.board, x, y);
        true
    }

    /// Extend the trace to (x, y). `false` when the step is not allowed.
    pub fn extend_word(&mut self, x: i8, y: i8) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.tracer.extend(&self.board, x, y).is_some()
    }

    pub fn cancel_word(&mut self) {
        self.tracer.cancel();
    }

    /// End the trace and, if the word is long enough and known to
    /// `dictionary`, remove its letters from the board.
    pub fn finish_word(&mut self, dictionary: &dyn Dictionary) -> WordOutcome {
        let traced = self.tracer.finish();
        if traced.is_empty() {
            return WordOutcome::Empty;
        }

        if self.game_over
            || traced.len() < self.config.min_word_len
            || !dictionary.contains(&traced.word)
        {
            debug!("rejected word {:?}", traced.word);
            return WordOutcome::Rejected(traced);
        }

        let removed = self.board.remove_word_letters(&traced.word);
        self.words += 1;
        debug!("accepted word {:?}, {} cell(s) removed", traced.word, removed);
        self.settle_active();

        WordOutcome::Accepted {
            word: traced,
            removed,
        }
    }

    /// Compaction can drop cells into the active piece; push it up until free.
    fn settle_active(&mut self) {
        let Some(mut piece) = self.active else {
            return;
        };
        while check_collision(&piece, &self.board, None) {
            if piece.position.y <= -(PIECE_GRID as i8) {
                self.active = None;
                self.end_game();
                return;
            }
            piece = piece.moved(0, -1);
        }
        self.active = Some(piece);
    }

    /// Plain copy of everything needed to resume this game.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.to_rows(),
            active: self.active,
            next: self.next,
            held: self.held,
            can_hold: self.can_hold,
            score: self.score,
            level: self.level,
            lines: self.lines,
            words: self.words,
            speed_ms: self.speed_ms,
            paused: self.paused,
            game_over: self.game_over,
        }
    }

    /// Rebuild a started game from a snapshot.
    ///
    /// Randomness for pieces drawn after the restore comes from `config.seed`.
    pub fn restore(snapshot: &GameSnapshot, config: GameConfig) -> Result<Self, SnapshotError> {
        let board = validate_board(&snapshot.board)?;
        if snapshot.level == 0 {
            return Err(SnapshotError::ZeroLevel);
        }
        if snapshot.speed_ms == 0 {
            return Err(SnapshotError::ZeroSpeed);
        }
        validate_piece(&snapshot.next, "next")?;
        if let Some(held) = &snapshot.held {
            validate_piece(held, "held")?;
        }
        if let Some(active) = &snapshot.active {
            validate_piece(active, "active")?;
            if snapshot.game_over {
                return Err(SnapshotError::ActiveAfterGameOver);
            }
            if check_collision(active, &board, None) {
                return Err(SnapshotError::ActiveOverlaps);
            }
        }

        let mut state = Self::new(config);
        state.board = board;
        state.active = snapshot.active;
        state.next = snapshot.next;
        state.held = snapshot.held;
        state.can_hold = snapshot.can_hold;
        state.score = snapshot.score;
        state.level = snapshot.level;
        state.lines = snapshot.lines;
        state.words = snapshot.words;
        state.speed_ms = snapshot.speed_ms;
        state.paused = snapshot.paused;
        state.game_over = snapshot.game_over;
        state.started = true;

        if state.active.is_none() && !state.game_over {
            state.spawn_piece();
        }

        info!(
            "restored game: score {} level {} lines {}",
            state.score, state.level, state.lines
        );
        Ok(state)
    }
}

/// A piece must use its kind's bounding box and hold exactly four cells inside it.
fn validate_piece(piece: &Tetromino, slot: &'static str) -> Result<(), SnapshotError> {
    if piece.size != bounding_size(piece.kind) {
        return Err(SnapshotError::InvalidPiece { slot });
    }
    let total = piece.cells.iter().flatten().filter(|cell| !cell.is_empty).count();
    if total != 4 || piece.minos().count() != 4 {
        return Err(SnapshotError::InvalidPiece { slot });
    }
    Ok(())
}

fn validate_board(rows: &[Vec<crate::board::BoardCell>]) -> Result<Board, SnapshotError> {
    let height = BOARD_HEIGHT as usize;
    let width = BOARD_WIDTH as usize;
    if rows.len() != height {
        return Err(SnapshotError::BoardHeight {
            found: rows.len(),
            expected: height,
        });
    }
    for (y, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(SnapshotError::RowWidth {
                row: y,
                found: row.len(),
                expected: width,
            });
        }
        if let Some(x) = row.iter().position(|cell| matches!(cell, Some(c) if c.is_empty)) {
            return Err(SnapshotError::BlankCell { x, y });
        }
    }
    Board::from_rows(rows).ok_or(SnapshotError::BoardHeight {
        found: rows.len(),
        expected: height,
    })
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
