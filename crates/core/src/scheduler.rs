//! Scheduler module - drives a [`GameState`] from wall-clock time
//!
//! The scheduler owns the time accumulator, the word timeout and the
//! bookkeeping needed to turn state changes into [`GameEvent`]s. It never
//! reads a clock itself: callers pass elapsed milliseconds to
//! [`Scheduler::advance`], or a [`Clock`] to [`Scheduler::frame`].
//!
//! One running timer per game: once the game is over the scheduler stops and
//! stays stopped until [`Scheduler::reset`] (or a restart action).

use std::time::Instant;

use log::debug;

use crate::game_state::{GameState, WordOutcome};
use crate::types::{GameAction, PathPosition, PointerEvent};
use crate::word::Dictionary;

/// Source of elapsed time.
pub trait Clock {
    /// Whole milliseconds since the previous call.
    fn elapsed_ms(&mut self) -> u32;
}

/// Monotonic wall clock. Sub-millisecond remainders carry over.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    last: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed_ms(&mut self) -> u32 {
        let ms = self.last.elapsed().as_millis().min(u32::MAX as u128) as u32;
        self.last += std::time::Duration::from_millis(ms as u64);
        ms
    }
}

/// Hand-advanced clock for tests and replays.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    pending: u32,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, ms: u32) {
        self.pending = self.pending.saturating_add(ms);
    }
}

impl Clock for ManualClock {
    fn elapsed_ms(&mut self) -> u32 {
        std::mem::take(&mut self.pending)
    }
}

/// Notable transitions surfaced to the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    LineClear { count: u32 },
    LevelUp { level: u32 },
    GameOver,
    WordCompleted { word: String, path: Vec<PathPosition> },
}

/// Receiver for [`GameEvent`]s.
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    /// Time banked towards the next gravity step.
    accumulated_ms: u32,
    seen_lines: u32,
    seen_level: u32,
    game_over_reported: bool,
    word_timeout_ms: Option<u32>,
    /// Time since the trace last grew; `None` while idle.
    word_timer_ms: Option<u32>,
}

impl Scheduler {
    pub fn new(state: &GameState) -> Self {
        Self {
            accumulated_ms: 0,
            seen_lines: state.lines(),
            seen_level: state.level(),
            game_over_reported: state.game_over(),
            word_timeout_ms: state.config().word_timeout_ms,
            word_timer_ms: None,
        }
    }

    /// Forget all timing and re-baseline against `state`.
    pub fn reset(&mut self, state: &GameState) {
        *self = Self::new(state);
    }

    /// True once game over has been reported.
    pub fn is_stopped(&self) -> bool {
        self.game_over_reported
    }

    pub fn accumulated_ms(&self) -> u32 {
        self.accumulated_ms
    }

    /// Read `clock` and advance by the elapsed time.
    pub fn frame(
        &mut self,
        state: &mut GameState,
        clock: &mut dyn Clock,
        dictionary: &dyn Dictionary,
        sink: &mut dyn EventSink,
    ) -> u32 {
        let elapsed = clock.elapsed_ms();
        self.advance(state, elapsed, dictionary, sink)
    }

    /// Advance the game by `elapsed_ms`, running as many gravity ticks as
    /// fit. Paused or finished games bank no time. Returns ticks run.
    pub fn advance(
        &mut self,
        state: &mut GameState,
        elapsed_ms: u32,
        dictionary: &dyn Dictionary,
        sink: &mut dyn EventSink,
    ) -> u32 {
        if self.game_over_reported {
            return 0;
        }

        let mut ticks = 0;
        if state.started() && !state.paused() && !state.game_over() {
            self.run_word_timer(state, elapsed_ms, dictionary, sink);

            self.accumulated_ms = self.accumulated_ms.saturating_add(elapsed_ms);
            loop {
                let interval = state.speed_ms().max(1);
                if self.accumulated_ms < interval || state.game_over() {
                    break;
                }
                self.accumulated_ms -= interval;
                state.tick();
                ticks += 1;
            }
        }

        self.surface_transitions(state, sink);
        ticks
    }

    fn run_word_timer(
        &mut self,
        state: &mut GameState,
        elapsed_ms: u32,
        dictionary: &dyn Dictionary,
        sink: &mut dyn EventSink,
    ) {
        let (Some(timeout), Some(timer)) = (self.word_timeout_ms, self.word_timer_ms) else {
            return;
        };
        if !state.is_tracing() {
            self.word_timer_ms = None;
            return;
        }

        let timer = timer.saturating_add(elapsed_ms);
        if timer >= timeout {
            debug!("word trace timed out after {} ms", timer);
            self.finish_word(state, dictionary, sink);
        } else {
            self.word_timer_ms = Some(timer);
        }
    }

    fn surface_transitions(&mut self, state: &GameState, sink: &mut dyn EventSink) {
        if state.lines() > self.seen_lines {
            sink.emit(GameEvent::LineClear {
                count: state.lines() - self.seen_lines,
            });
        }
        self.seen_lines = state.lines();

        if state.level() > self.seen_level {
            sink.emit(GameEvent::LevelUp {
                level: state.level(),
            });
        }
        self.seen_level = state.level();

        if state.game_over() && !self.game_over_reported {
            self.game_over_reported = true;
            self.word_timer_ms = None;
            sink.emit(GameEvent::GameOver);
        }
    }

    /// Apply a keyboard action and report any resulting transitions.
    pub fn apply_action(
        &mut self,
        state: &mut GameState,
        action: GameAction,
        sink: &mut dyn EventSink,
    ) -> bool {
        let applied = state.apply_action(action);
        if action == GameAction::Restart {
            self.reset(state);
            return applied;
        }
        self.surface_transitions(state, sink);
        applied
    }

    pub fn pointer_down(&mut self, state: &mut GameState, x: i8, y: i8) -> bool {
        let accepted = state.begin_word(x, y);
        if accepted {
            self.word_timer_ms = Some(0);
        }
        accepted
    }

    pub fn pointer_move(&mut self, state: &mut GameState, x: i8, y: i8) -> bool {
        let accepted = state.extend_word(x, y);
        if accepted {
            self.word_timer_ms = Some(0);
        }
        accepted
    }

    pub fn pointer_up(
        &mut self,
        state: &mut GameState,
        dictionary: &dyn Dictionary,
        sink: &mut dyn EventSink,
    ) -> WordOutcome {
        self.finish_word(state, dictionary, sink)
    }

    pub fn pointer_cancel(&mut self, state: &mut GameState) {
        self.word_timer_ms = None;
        state.cancel_word();
    }

    /// Route a pointer event. Returns the outcome when the event ended a trace.
    pub fn pointer(
        &mut self,
        state: &mut GameState,
        event: PointerEvent,
        dictionary: &dyn Dictionary,
        sink: &mut dyn EventSink,
    ) -> Option<WordOutcome> {
        match event {
            PointerEvent::Down { x, y } => {
                self.pointer_down(state, x, y);
                None
            }
            PointerEvent::Move { x, y } => {
                self.pointer_move(state, x, y);
                None
            }
            PointerEvent::Up => Some(self.pointer_up(state, dictionary, sink)),
            PointerEvent::Cancel => {
                self.pointer_cancel(state);
                None
            }
        }
    }

    fn finish_word(
        &mut self,
        state: &mut GameState,
        dictionary: &dyn Dictionary,
        sink: &mut dyn EventSink,
    ) -> WordOutcome {
        self.word_timer_ms = None;
        let outcome = state.finish_word(dictionary);
        if let WordOutcome::Accepted { word, .. } = &outcome {
            sink.emit(GameEvent::WordCompleted {
                word: word.word.clone(),
                path: word.path.clone(),
            });
        }
        self.surface_transitions(state, sink);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::types::{Cell, CellColor};
    use crate::word::{AnyWord, WordList};

    fn setup() -> (GameState, Scheduler) {
        let mut state = GameState::with_seed(7);
        state.start();
        let scheduler = Scheduler::new(&state);
        (state, scheduler)
    }

    fn letters(state: &mut GameState, cells: &[(i8, i8, char)]) {
        for &(x, y, letter) in cells {
            state
                .board_mut()
                .set(x, y, Some(Cell::filled(letter, CellColor::Purple)));
        }
    }

    #[test]
    fn test_accumulates_until_interval() {
        let (mut state, mut scheduler) = setup();
        let mut events = Vec::new();
        let y = state.active().unwrap().position.y;

        assert_eq!(scheduler.advance(&mut state, 999, &AnyWord, &mut events), 0);
        assert_eq!(state.active().unwrap().position.y, y);
        assert_eq!(scheduler.advance(&mut state, 1, &AnyWord, &mut events), 1);
        assert_eq!(state.active().unwrap().position.y, y + 1);
        assert_eq!(scheduler.accumulated_ms(), 0);
    }

    #[test]
    fn test_large_step_runs_several_ticks() {
        let (mut state, mut scheduler) = setup();
        let mut events = Vec::new();
        let y = state.active().unwrap().position.y;

        assert_eq!(scheduler.advance(&mut state, 3500, &AnyWord, &mut events), 3);
        assert_eq!(state.active().unwrap().position.y, y + 3);
        assert_eq!(scheduler.accumulated_ms(), 500);
    }

    #[test]
    fn test_paused_game_banks_nothing() {
        let (mut state, mut scheduler) = setup();
        let mut events = Vec::new();
        state.apply_action(GameAction::Pause);

        assert_eq!(scheduler.advance(&mut state, 5000, &AnyWord, &mut events), 0);
        assert_eq!(scheduler.accumulated_ms(), 0);
    }

    #[test]
    fn test_manual_clock_frame() {
        let (mut state, mut scheduler) = setup();
        let mut clock = ManualClock::new();
        let mut events = Vec::new();

        clock.advance(600);
        clock.advance(600);
        assert_eq!(scheduler.frame(&mut state, &mut clock, &AnyWord, &mut events), 1);
        assert_eq!(scheduler.frame(&mut state, &mut clock, &AnyWord, &mut events), 0);
    }

    #[test]
    fn test_game_over_reported_once_and_stops() {
        let mut state = GameState::with_seed(7);
        for y in 0..2 {
            for x in 1..10 {
                state
                    .board_mut()
                    .set(x, y, Some(Cell::filled('Ъ', CellColor::Red)));
            }
        }
        state.start();
        let mut scheduler = Scheduler::new(&GameState::with_seed(7));
        let mut events = Vec::new();

        scheduler.advance(&mut state, 16, &AnyWord, &mut events);
        scheduler.advance(&mut state, 16, &AnyWord, &mut events);
        assert_eq!(events, vec![GameEvent::GameOver]);
        assert!(scheduler.is_stopped());
    }

    #[test]
    fn test_line_clear_event() {
        let (mut state, mut scheduler) = setup();
        let mut events = Vec::new();
        for x in 0..10 {
            state
                .board_mut()
                .set(x, 19, Some(Cell::filled('Ё', CellColor::Cyan)));
        }
        state.board_mut().set(0, 19, None);
        state.board_mut().set(1, 19, None);
        let piece = crate::pieces::Tetromino::with_letters(
            crate::types::PieceKind::O,
            ['А', 'Б', 'В', 'Г'],
        )
        .at(crate::types::Position::new(0, 18));
        assert!(state.replace_active(piece));

        scheduler.advance(&mut state, 1000, &AnyWord, &mut events);
        assert_eq!(events, vec![GameEvent::LineClear { count: 1 }]);
    }

    #[test]
    fn test_pointer_trace_emits_word() {
        let (mut state, mut scheduler) = setup();
        let mut events = Vec::new();
        letters(&mut state, &[(2, 19, 'К'), (3, 19, 'О'), (4, 19, 'Т')]);

        let dict = WordList::new(["кот"]);
        for event in [
            PointerEvent::Down { x: 2, y: 19 },
            PointerEvent::Move { x: 3, y: 19 },
            PointerEvent::Move { x: 4, y: 19 },
        ] {
            assert_eq!(scheduler.pointer(&mut state, event, &dict, &mut events), None);
        }
        let outcome = scheduler.pointer(&mut state, PointerEvent::Up, &dict, &mut events);

        assert!(matches!(outcome, Some(WordOutcome::Accepted { removed: 3, .. })));
        assert_eq!(events.len(), 1);
        match &events[0] {
            GameEvent::WordCompleted { word, path } => {
                assert_eq!(word, "КОТ");
                assert_eq!(path.len(), 3);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_word_timeout_finishes_trace() {
        let mut state = GameState::new(GameConfig::default().with_seed(7).with_word_timeout_ms(500));
        state.start();
        let mut scheduler = Scheduler::new(&state);
        let mut events = Vec::new();
        letters(&mut state, &[(0, 19, 'Л'), (1, 19, 'Е'), (2, 19, 'С')]);

        assert!(scheduler.pointer_down(&mut state, 0, 19));
        scheduler.advance(&mut state, 300, &AnyWord, &mut events);
        assert!(scheduler.pointer_move(&mut state, 1, 19));
        scheduler.advance(&mut state, 300, &AnyWord, &mut events);
        assert!(scheduler.pointer_move(&mut state, 2, 19));
        assert!(state.is_tracing());

        scheduler.advance(&mut state, 499, &AnyWord, &mut events);
        assert!(state.is_tracing());
        scheduler.advance(&mut state, 1, &AnyWord, &mut events);
        assert!(!state.is_tracing());
        assert_eq!(state.words(), 1);
    }

    #[test]
    fn test_word_timeout_disabled() {
        let mut state = GameState::new(GameConfig::default().with_seed(7).with_word_timeout_ms(0));
        state.start();
        let mut scheduler = Scheduler::new(&state);
        let mut events = Vec::new();
        letters(&mut state, &[(0, 19, 'Л')]);

        assert!(scheduler.pointer_down(&mut state, 0, 19));
        scheduler.advance(&mut state, 5_000, &AnyWord, &mut events);
        assert!(state.is_tracing());
    }

    #[test]
    fn test_restart_resets_scheduler() {
        let (mut state, mut scheduler) = setup();
        let mut events = Vec::new();
        scheduler.advance(&mut state, 700, &AnyWord, &mut events);
        assert_eq!(scheduler.accumulated_ms(), 700);

        assert!(scheduler.apply_action(&mut state, GameAction::Restart, &mut events));
        assert_eq!(scheduler.accumulated_ms(), 0);
        assert!(!scheduler.is_stopped());
    }
}
