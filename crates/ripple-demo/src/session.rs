#![forbid(unsafe_code)]

//! Terminal session lifecycle guard.
//!
//! RAII wrapper around the crossterm modes the demo needs: raw mode, the
//! alternate screen, a hidden cursor and optional mouse capture. Every
//! enabled mode is tracked and disabled in reverse order on drop, and a
//! process-wide panic hook restores the terminal before the panic message
//! prints, so a crash never leaves the shell in raw mode.

use std::io::{self, Write};
use std::sync::OnceLock;

/// Terminal modes to enable for a session.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    /// Capture mouse clicks and drags (SGR encoding).
    pub mouse_capture: bool,
}

/// Raw-mode guard; restores the terminal on drop, panic included.
///
/// Only one session should exist at a time; a second one would fight the
/// first over shared terminal state.
#[derive(Debug)]
pub struct TerminalSession {
    alternate_screen_enabled: bool,
    mouse_enabled: bool,
}

impl TerminalSession {
    /// Enters raw mode, switches to the alternate screen and hides the
    /// cursor; optionally enables mouse capture.
    ///
    /// # Errors
    ///
    /// Fails when the terminal rejects a mode change; whatever was already
    /// enabled is rolled back through drop.
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        install_panic_hook();

        crossterm::terminal::enable_raw_mode()?;
        tracing::info!("terminal raw mode enabled");

        // Constructed before the fallible mode changes so an error path
        // still rolls back through Drop.
        let mut session = Self {
            alternate_screen_enabled: false,
            mouse_enabled: false,
        };
        let mut stdout = io::stdout();

        crossterm::execute!(
            stdout,
            crossterm::terminal::EnterAlternateScreen,
            crossterm::cursor::Hide
        )?;
        session.alternate_screen_enabled = true;

        if options.mouse_capture {
            crossterm::execute!(stdout, crossterm::event::EnableMouseCapture)?;
            session.mouse_enabled = true;
            tracing::info!("mouse capture enabled");
        }

        Ok(session)
    }

    /// Current terminal size (columns, rows).
    pub fn size(&self) -> io::Result<(u16, u16)> {
        crossterm::terminal::size()
    }

    fn cleanup(&mut self) {
        let mut stdout = io::stdout();

        if self.mouse_enabled {
            let _ = crossterm::execute!(stdout, crossterm::event::DisableMouseCapture);
            self.mouse_enabled = false;
        }

        if self.alternate_screen_enabled {
            let _ = crossterm::execute!(
                stdout,
                crossterm::cursor::Show,
                crossterm::terminal::LeaveAlternateScreen
            );
            self.alternate_screen_enabled = false;
        }

        let _ = crossterm::terminal::disable_raw_mode();
        let _ = stdout.flush();
        tracing::info!("terminal restored");
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_cleanup();
            previous(info);
        }));
    });
}

fn best_effort_cleanup() {
    let mut stdout = io::stdout();
    let _ = crossterm::execute!(stdout, crossterm::event::DisableMouseCapture);
    let _ = crossterm::execute!(stdout, crossterm::cursor::Show);
    let _ = crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen);
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = stdout.flush();
}
