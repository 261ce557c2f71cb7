//! Terminal runner (default binary).
//!
//! Polls crossterm for keys with a timeout that never overshoots the next
//! gravity step, feeds elapsed wall-clock time to the session, and redraws
//! through the diffing framebuffer renderer.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

use blockfall::core::{Session, SessionConfig, SessionEvent, SessionSnapshot};
use blockfall::input::{handle_key_event, should_quit, should_restart, Debouncer};
use blockfall::store::{HighscoreStore, Settings, SettingsStore};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::FRAME_MS;

#[derive(Parser, Debug)]
#[command(name = "blockfall", version, about = "Falling-block puzzle game for the terminal")]
struct Cli {
    /// RNG seed; random when omitted
    #[arg(long)]
    seed: Option<u32>,

    /// Level to start at, overrides the settings file
    #[arg(long)]
    start_level: Option<u32>,

    #[arg(long, env = "BLOCKFALL_HIGHSCORE_PATH")]
    highscore_file: Option<PathBuf>,

    #[arg(long, env = "BLOCKFALL_SETTINGS_PATH")]
    settings_file: Option<PathBuf>,

    /// Write logs here; nothing is logged otherwise
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let settings_store = match &cli.settings_file {
        Some(path) => SettingsStore::new(path),
        None => SettingsStore::from_env(),
    };
    let mut settings = settings_store.load();
    if let Some(level) = cli.start_level {
        settings = Settings {
            start_level: level,
            ..settings
        }
        .sanitized();
    }

    let highscores = match &cli.highscore_file {
        Some(path) => HighscoreStore::new(path),
        None => HighscoreStore::from_env(),
    };

    let config = SessionConfig {
        seed: cli.seed.unwrap_or_else(rand::random),
        start_level: settings.start_level,
        highscore: highscores.load(),
    };
    info!(
        seed = config.seed,
        start_level = config.start_level,
        highscore = config.highscore,
        "starting"
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config, &settings, &highscores);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(cli: &Cli) -> Result<()> {
    // Raw mode owns the terminal, so logs only ever go to a file.
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let level = match cli.verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(level)
        .init();
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    config: SessionConfig,
    settings: &Settings,
    highscores: &HighscoreStore,
) -> Result<()> {
    let mut session = Session::with_config(config);
    session.start();

    let view = GameView::new(settings.cell_width, 1);
    let mut debouncer = Debouncer::with_window_ms(settings.debounce_ms);
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = SessionSnapshot::default();

    let started = Instant::now();
    let mut last_advance = Instant::now();

    loop {
        session.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let wait_ms = session.ms_until_tick().min(FRAME_MS);
        if event::poll(Duration::from_millis(wait_ms as u64))? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if session.is_game_over() {
                        if should_restart(key) {
                            debug!("restart");
                            session.restart();
                            debouncer.reset();
                            last_advance = Instant::now();
                        }
                    } else {
                        let action = handle_key_event(key);
                        let now_ms = started.elapsed().as_millis() as u64;
                        if debouncer.accept(action, now_ms) {
                            session.apply_action(action);
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_advance.elapsed();
        let elapsed_ms = elapsed.as_millis().min(u32::MAX as u128) as u32;
        if elapsed_ms > 0 {
            session.advance(elapsed_ms);
            // Keep the sub-millisecond remainder for the next frame.
            last_advance += Duration::from_millis(elapsed_ms as u64);
        }

        while let Some(event) = session.take_event() {
            match event {
                SessionEvent::LinesCleared { count, points } => {
                    debug!(count, points, "lines cleared");
                }
                SessionEvent::GameOver { final_score } => {
                    match highscores.record(final_score) {
                        Ok(true) => info!(final_score, "new highscore"),
                        Ok(false) => {}
                        Err(err) => warn!("saving highscore: {err:#}"),
                    }
                }
            }
        }
    }
}
