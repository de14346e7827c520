use std::io::{stdout, Write};
use termimad::crossterm::{cursor, ExecutableCommand};
use termimad::crossterm::terminal::Clear;
use termimad::crossterm::terminal::ClearType::CurrentLine;

use crate::utils::progress::{ObserveProgress, Progress};

/// Prints progress as `dispatched/total` on a single terminal line that is rewritten in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalProgress {
    /// Move to a new line once everything is dispatched
    pub newline_when_done: bool,
}

impl TerminalProgress {
    fn print(&self, progress: Progress) -> std::io::Result<()> {
        let mut stdout = stdout();
        stdout
            .execute(cursor::MoveToColumn(0))?
            .execute(Clear(CurrentLine))?;
        write!(stdout, "{}/{}", progress.dispatched, progress.total)?;
        if self.newline_when_done && progress.is_done() {
            writeln!(stdout)?;
        }
        stdout.flush()
    }
}

impl ObserveProgress for TerminalProgress {
    fn on_progress(&self, progress: Progress) {
        // a broken terminal must not abort a dispatch
        let _ = self.print(progress);
    }
}
