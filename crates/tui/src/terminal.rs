//! Terminal setup and teardown utilities.
//!
//! The editor runs full screen on the alternate screen buffer. The embed
//! viewer draws once into an inline viewport below the shell prompt and
//! leaves the output in the scrollback.

use std::io::{self, Stdout, Write};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, TerminalOptions, Viewport, backend::CrosstermBackend};

/// The terminal type used by the application.
pub type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Error type for terminal operations.
#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    /// Failed to initialize the terminal.
    #[error("failed to setup terminal: {0}")]
    Setup(#[source] io::Error),

    /// Failed to draw to the terminal.
    #[error("failed to draw to terminal: {0}")]
    Draw(#[source] io::Error),

    /// Failed to restore the terminal.
    #[error("failed to restore terminal: {0}")]
    Restore(#[source] io::Error),
}

/// Sets up the terminal for the full-screen editor.
///
/// This function:
/// - Enables raw mode (disables line buffering and echoing)
/// - Enters the alternate screen buffer
/// - Creates a Ratatui terminal instance
///
/// # Errors
///
/// Returns an error if any terminal operation fails.
///
/// # Examples
///
/// ```no_run
/// use dday_tui::terminal;
///
/// let mut terminal = terminal::setup_terminal().expect("failed to setup terminal");
/// // Use terminal...
/// terminal::restore_terminal(&mut terminal).expect("failed to restore terminal");
/// ```
pub fn setup_terminal() -> Result<AppTerminal, TerminalError> {
    enable_raw_mode().map_err(TerminalError::Setup)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(TerminalError::Setup)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(TerminalError::Setup)
}

/// Restores the terminal to its original state.
///
/// This function:
/// - Disables raw mode
/// - Leaves the alternate screen buffer
/// - Shows the cursor
///
/// # Errors
///
/// Returns an error if any terminal operation fails.
pub fn restore_terminal(terminal: &mut AppTerminal) -> Result<(), TerminalError> {
    disable_raw_mode().map_err(TerminalError::Restore)?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).map_err(TerminalError::Restore)?;
    terminal.show_cursor().map_err(TerminalError::Restore)?;
    Ok(())
}

/// Creates a terminal drawing into an inline viewport of `height` rows.
///
/// Raw mode is not enabled; the viewport is drawn once and left in place.
///
/// # Errors
///
/// Returns an error if the viewport cannot be allocated.
pub fn setup_inline_terminal(height: u16) -> Result<AppTerminal, TerminalError> {
    let backend = CrosstermBackend::new(io::stdout());
    Terminal::with_options(
        backend,
        TerminalOptions {
            viewport: Viewport::Inline(height),
        },
    )
    .map_err(TerminalError::Setup)
}

/// Moves the cursor below an inline viewport so the shell prompt
/// continues after the drawing.
///
/// # Errors
///
/// Returns an error if the cursor cannot be moved.
pub fn finish_inline_terminal(terminal: &mut AppTerminal) -> Result<(), TerminalError> {
    let area = terminal.get_frame().area();
    terminal
        .set_cursor_position((0, area.bottom().saturating_sub(1)))
        .map_err(TerminalError::Restore)?;
    terminal.show_cursor().map_err(TerminalError::Restore)?;
    writeln!(terminal.backend_mut()).map_err(TerminalError::Restore)?;
    terminal.backend_mut().flush().map_err(TerminalError::Restore)
}

/// Installs a panic hook that restores the terminal before panicking.
///
/// This ensures that if the application panics, the terminal is left in a
/// usable state (not in raw mode, cursor visible, main screen buffer).
///
/// # Panic Hook Chaining
///
/// This function replaces the current panic hook but chains to it after
/// performing terminal restoration.
///
/// **Important**: Call this function once at application startup, before
/// setting up the terminal.
///
/// # Order of Operations
///
/// When a panic occurs, the installed hook:
/// 1. Disables raw mode (restores line buffering and echo)
/// 2. Leaves the alternate screen buffer
/// 3. Calls the original panic hook (typically prints the panic message)
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}
