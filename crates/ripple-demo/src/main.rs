#![forbid(unsafe_code)]

//! Terminal water demo: click to drop ripples, watch them refract the
//! backdrop.
//!
//! The terminal is treated as a `cols x 2*rows` pixel canvas through the
//! half-block trick, and that canvas size (doubled, since the driver
//! halves its surface) is what the driver is told on every resize, so
//! frames map one-to-one onto half blocks. Ticks are paced by a
//! [`FrameClock`] the driver itself arms; between deadlines the loop just
//! waits on terminal input.

mod cli;
mod present;
mod session;

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

use ripple::prelude::*;

use crate::session::{SessionOptions, TerminalSession};

/// Poll timeout while no tick is armed (dormant grid, splash pending).
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Delay before the automatic startup splash at the center.
const SPLASH_DELAY: Duration = Duration::from_millis(500);

fn main() {
    let opts = cli::Opts::parse();
    setup_logging();

    if let Err(err) = run(&opts) {
        eprintln!("ripple-demo: {err}");
        std::process::exit(1);
    }
}

/// Logs go to stderr, and only when `RIPPLE_DEMO_LOG` asks for them;
/// redirect fd 2 to a file to watch them without disturbing the canvas.
fn setup_logging() {
    if let Ok(filter) = std::env::var("RIPPLE_DEMO_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
            .with_writer(io::stderr)
            .with_ansi(false)
            .init();
    }
}

fn run(opts: &cli::Opts) -> Result<()> {
    let session = TerminalSession::new(SessionOptions {
        mouse_capture: opts.mouse,
    })?;
    let mut driver = FrameDriver::with_style(
        FrameClock::from_fps(opts.fps),
        BackgroundStyle::default(),
        opts.seed,
    );

    let (mut cols, mut rows) = session.size()?;
    driver.resize(surface_width(cols), surface_height(rows))?;

    let mut out = io::BufWriter::new(io::stdout());
    present::present(&mut out, driver.output(), cols, rows)?;

    let started = Instant::now();
    let mut splash_at = Some(started + SPLASH_DELAY);
    let deadline = (opts.exit_after_ms > 0)
        .then(|| started + Duration::from_millis(opts.exit_after_ms));

    loop {
        let now = Instant::now();
        if let Some(deadline) = deadline
            && now >= deadline
        {
            break;
        }
        if let Some(at) = splash_at
            && now >= at
        {
            driver.disturb_center();
            splash_at = None;
        }

        let timeout = driver
            .scheduler()
            .time_until_due(now)
            .unwrap_or(IDLE_POLL);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                    KeyCode::Char(' ') => driver.disturb_center(),
                    _ => {}
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left)
                    | MouseEventKind::Drag(MouseButton::Left) => {
                        // One terminal cell covers two frame rows; aim at
                        // the upper one.
                        driver.disturb(i32::from(mouse.column), i32::from(mouse.row) * 2);
                    }
                    _ => {}
                },
                Event::Resize(new_cols, new_rows) => {
                    (cols, rows) = (new_cols, new_rows);
                    driver.resize(surface_width(cols), surface_height(rows))?;
                    present::present(&mut out, driver.output(), cols, rows)?;
                }
                _ => {}
            }
        }

        if driver.scheduler_mut().take_due(Instant::now())
            && let Some(frame) = driver.tick()
        {
            present::present(&mut out, frame, cols, rows)?;
        }
    }

    driver.teardown();
    drop(session);
    Ok(())
}

/// The half-block canvas is `cols x 2*rows` pixels; the driver halves its
/// surface, so report double that and frames map one-to-one.
fn surface_width(cols: u16) -> i32 {
    i32::from(cols) * 2
}

fn surface_height(rows: u16) -> i32 {
    i32::from(rows) * 4
}
