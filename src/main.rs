mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use tracing_subscriber::EnvFilter;

use game_plane::config::GameConfig;
use game_plane::entities::GameStatus;
use game_plane::game::GameView;
use game_plane::input::{TouchAction, TouchEvent};
use game_plane::render::{Clock, Renderer};

use display::TerminalCanvas;

/// Terminal edition of the plane shooter.  Drag with the mouse to fly,
/// double-click to drop a bomb, click the pause button to pause.
#[derive(Parser, Debug)]
#[command(name = "game_plane", version)]
struct Args {
    /// JSON file overriding game constants.
    #[arg(long)]
    config: Option<PathBuf>,
    /// RNG seed (overrides the config file).
    #[arg(long)]
    seed: Option<u64>,
    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,
    /// Write logs here; the terminal itself is taken by the game.
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    print_config: bool,
}

// ── Clock ─────────────────────────────────────────────────────────────────────

struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    fn new() -> Self {
        SystemClock { origin: Instant::now() }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn init_tracing(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

/// Mouse events stand in for touches; only the left button counts.
fn touch_from_mouse(
    mouse: &MouseEvent,
    canvas: &TerminalCanvas,
    clock: &SystemClock,
) -> Option<TouchEvent> {
    let action = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => TouchAction::Down,
        MouseEventKind::Drag(MouseButton::Left) => TouchAction::Move,
        MouseEventKind::Up(MouseButton::Left) => TouchAction::Up,
        _ => return None,
    };
    let p = canvas.cell_center(mouse.column, mouse.row);
    Some(TouchEvent::new(action, p.x, p.y, clock.now_ms()))
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn game_loop<W: Write>(
    out: &mut W,
    game: &mut GameView,
    rx: &mpsc::Receiver<Event>,
    frame: Duration,
) -> Result<()> {
    let clock = SystemClock::new();
    let (cols, rows) = terminal::size()?;
    let mut canvas = TerminalCanvas::new(cols, rows, game.config().explosion_frames);
    game.start(&mut canvas);

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind: KeyEventKind::Press, modifiers, .. }) => {
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char('p') | KeyCode::Char('P') => match game.status() {
                            GameStatus::Started => {
                                game.pause();
                                canvas.request_redraw();
                            }
                            GameStatus::Paused => game.resume(&mut canvas),
                            _ => {}
                        },
                        _ => {}
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(touch) = touch_from_mouse(&mouse, &canvas, &clock) {
                        game.on_touch_event(touch, &mut canvas);
                    }
                }
                Event::Resize(cols, rows) => canvas.resize(cols, rows),
                _ => {}
            }
        }

        if canvas.take_redraw_request() {
            canvas.clear();
            game.on_draw(&mut canvas, &clock);
            display::present(out, &canvas)?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_deref())?;
    let config = load_config(&args)?;
    if args.print_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }
    tracing::info!(?config, "configuration loaded");
    let frame = Duration::from_secs(1) / args.fps.max(1);
    let mut game = GameView::new(config).context("invalid configuration")?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(EnableMouseCapture)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &mut game, &rx, frame);
    game.destroy();

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
