//! Terminal word-puzzle runner (default binary).
//!
//! Keyboard drives the falling pieces, the mouse traces words. Rendering goes
//! through the framebuffer renderer in `tui_wordtris::term`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, info};

use tui_wordtris::core::{
    Alphabet, AnyWord, Dictionary, GameConfig, GameEvent, GameSnapshot, GameState, Scheduler,
    SystemClock, WordList, WordOutcome,
};
use tui_wordtris::input::{handle_key_event, is_trace_cancel, map_mouse_event, should_quit};
use tui_wordtris::term::{FrameBuffer, GameView, StatusLine, TerminalRenderer, Viewport};
use tui_wordtris::types::{GameAction, DEFAULT_MIN_WORD_LEN, DEFAULT_WORD_TIMEOUT_MS, TICK_MS};

/// Falling-block puzzle where every block carries a letter.
#[derive(Debug, Parser)]
#[command(
    name = "tui-wordtris",
    version,
    about = "Falling-block word puzzle in the terminal.",
    long_about = "Pieces fall as usual and full rows clear, but every block carries a letter. \
        Drag the mouse across adjacent letters to spell a word; accepted words vanish and \
        the columns above them drop.\n\n\
        CONTROLS:\n  Left/Right, A/D  Move      Up/W  Rotate CW     Z      Rotate CCW\n  \
        Down/S  Soft drop   Space  Hard drop   C  Hold   P  Pause   R  Restart\n  \
        Mouse drag  Trace a word   Esc / right click  Cancel trace   Q  Quit"
)]
struct Args {
    /// Seed for pieces and letters. Random when omitted.
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Starting level.
    #[arg(long, default_value = "1", value_name = "N")]
    level: u32,

    /// Letter set drawn on the blocks: ru (russian) or en (english).
    #[arg(long, default_value = "ru", value_parser = parse_alphabet)]
    alphabet: Alphabet,

    /// Shortest word that counts.
    #[arg(long, default_value_t = DEFAULT_MIN_WORD_LEN, value_name = "N")]
    min_word_len: usize,

    /// Idle time before a trace is submitted automatically; 0 disables.
    #[arg(long, default_value_t = DEFAULT_WORD_TIMEOUT_MS, value_name = "MS")]
    word_timeout_ms: u32,

    /// Dictionary file, one word per line. Every traced word counts when omitted.
    #[arg(long, value_name = "FILE")]
    words: Option<PathBuf>,

    /// Resume from a saved game.
    #[arg(long, value_name = "FILE")]
    load: Option<PathBuf>,

    /// Save the game here on quit.
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,
}

fn parse_alphabet(s: &str) -> Result<Alphabet, String> {
    Alphabet::from_str(s).ok_or_else(|| format!("unknown alphabet '{s}', expected ru or en"))
}

impl Args {
    fn config(&self) -> GameConfig {
        let seed = self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(1)
        });
        GameConfig::default()
            .with_seed(seed)
            .with_start_level(self.level)
            .with_alphabet(self.alphabet)
            .with_min_word_len(self.min_word_len)
            .with_word_timeout_ms(self.word_timeout_ms)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.config();
    let dictionary = load_dictionary(args.words.as_deref())?;

    let mut game_state = match &args.load {
        Some(path) => load_game(path, config)?,
        None => {
            let mut state = GameState::new(config);
            state.start();
            state
        }
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game_state, dictionary.as_ref());

    // Always try to restore terminal state.
    let _ = term.exit();
    result?;

    if let Some(path) = &args.save {
        save_game(path, &game_state)?;
    }
    Ok(())
}

fn load_dictionary(path: Option<&Path>) -> Result<Box<dyn Dictionary>> {
    let Some(path) = path else {
        return Ok(Box::new(AnyWord));
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading dictionary {}", path.display()))?;
    let list = WordList::from_text(&text);
    if list.is_empty() {
        bail!("dictionary {} has no words", path.display());
    }
    info!("loaded {} words from {}", list.len(), path.display());
    Ok(Box::new(list))
}

fn load_game(path: &Path, config: GameConfig) -> Result<GameState> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading save {}", path.display()))?;
    let snapshot: GameSnapshot = serde_json::from_str(&text)
        .with_context(|| format!("parsing save {}", path.display()))?;
    let state = GameState::restore(&snapshot, config)
        .with_context(|| format!("restoring save {}", path.display()))?;
    Ok(state)
}

fn save_game(path: &Path, state: &GameState) -> Result<()> {
    let json = serde_json::to_string_pretty(&state.snapshot())?;
    fs::write(path, json).with_context(|| format!("writing save {}", path.display()))?;
    info!("saved game to {}", path.display());
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    game_state: &mut GameState,
    dictionary: &dyn Dictionary,
) -> Result<()> {
    let view = GameView::default();
    let mut scheduler = Scheduler::new(game_state);
    let mut clock = SystemClock::new();
    let mut events = Vec::new();
    let mut status: Option<StatusLine> = None;
    let mut fb = FrameBuffer::new(0, 0);
    let poll_timeout = Duration::from_millis(TICK_MS as u64);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        view.render_into_with_status(game_state, status.as_ref(), viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        if event::poll(poll_timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if is_trace_cancel(key) {
                        scheduler.pointer_cancel(game_state);
                    } else if let Some(action) = handle_key_event(key) {
                        scheduler.apply_action(game_state, action, &mut events);
                        if action == GameAction::Restart {
                            status = None;
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    let layout = view.layout(viewport);
                    if let Some(pointer) = map_mouse_event(mouse, &layout) {
                        let outcome =
                            scheduler.pointer(game_state, pointer, dictionary, &mut events);
                        if let Some(WordOutcome::Rejected(traced)) = outcome {
                            status = Some(StatusLine::bad(format!("{}?", traced.word)));
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        scheduler.frame(game_state, &mut clock, dictionary, &mut events);
        for event in events.drain(..) {
            if let Some(line) = report(&event) {
                status = Some(line);
            }
        }
    }
}

/// Log an event and pick the status line it deserves, if any.
fn report(event: &GameEvent) -> Option<StatusLine> {
    match event {
        GameEvent::LineClear { count } => {
            debug!("{} line(s) cleared", count);
            None
        }
        GameEvent::LevelUp { level } => Some(StatusLine::good(format!("LEVEL {level}"))),
        GameEvent::GameOver => None,
        GameEvent::WordCompleted { word, path } => {
            debug!("word {} traced over {} cell(s)", word, path.len());
            Some(StatusLine::good(format!("+{word}")))
        }
    }
}
