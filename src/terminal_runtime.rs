use std::io;
use std::panic;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::game::Snapshot;
use crate::input::{Command, InputHandler};
use crate::renderer;
use crate::scheduler::Frontend;

/// Terminal the game draws into.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Raw-mode, alternate-screen terminal held for the length of one game.
///
/// Dropping it puts the player's shell back the way it was.
pub struct TerminalSession {
    terminal: AppTerminal,
}

impl TerminalSession {
    /// Takes over the terminal; undoes partial setup if a later step fails.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        let backend = CrosstermBackend::new(stdout);
        match Terminal::new(backend) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(error) => {
                let _ = cleanup_terminal_best_effort();
                Err(error)
            }
        }
    }

    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = cleanup_terminal_best_effort();
    }
}

/// Terminal frontend for the tick loop: ratatui output, crossterm input.
pub struct TerminalFrontend {
    session: TerminalSession,
    input: InputHandler,
    cell_columns: u16,
}

impl TerminalFrontend {
    /// `cell_columns` is the configured terminal width of one grid cell.
    #[must_use]
    pub fn new(session: TerminalSession, input: InputHandler, cell_columns: u16) -> Self {
        Self {
            session,
            input,
            cell_columns,
        }
    }

    /// Blocks until the player presses any key.
    pub fn wait_for_key(&mut self) -> io::Result<()> {
        self.input.wait_for_key()
    }
}

impl Frontend for TerminalFrontend {
    fn render(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        let cell_columns = self.cell_columns;
        self.session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, snapshot, cell_columns))?;
        Ok(())
    }

    fn wait_for_command(&mut self, timeout: Duration) -> io::Result<Option<Command>> {
        self.input.poll_command(timeout)
    }
}

/// Restores the terminal before the default panic output is printed.
pub fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = cleanup_terminal_best_effort();
        default_hook(panic_info);
    }));
}

fn cleanup_terminal_best_effort() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)
}
