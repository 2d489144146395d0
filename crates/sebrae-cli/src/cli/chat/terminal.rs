//! Terminal-backed [`TranscriptSink`].
//!
//! Each chat message gets its own short-lived sink borrowing the
//! transcript. Wholesale replacement is implemented by moving the cursor
//! back to the top of the in-progress block, clearing downward, and
//! reprinting.

use std::io::{Stdout, Write, stdout};

use chrono::Local;
use console::style;
use crossterm::{cursor, execute, terminal};

use sebrae_types::chat::{Role, Transcript, TranscriptEntry};

use super::markdown;
use super::typewriter::TranscriptSink;

/// Left margin for message content, matching the rest of the CLI output.
const INDENT: &str = "  ";

/// Sink for one in-progress message.
pub struct TerminalMessage<'a> {
    out: Stdout,
    transcript: &'a mut Transcript,
    lines_drawn: u16,
}

impl<'a> TerminalMessage<'a> {
    pub fn new(transcript: &'a mut Transcript) -> Self {
        Self {
            out: stdout(),
            transcript,
            lines_drawn: 0,
        }
    }

    /// Print the speaker header above the message body.
    pub fn print_header(&mut self, role: Role) {
        let header = match role {
            Role::User => format!("{}", style("👤 Você").green().bold()),
            Role::Assistant => format!("{}", style("🤖 Consultor IA").cyan().bold()),
        };
        let _ = writeln!(self.out, "{INDENT}{header}");
    }
}

/// Print an already-committed entry in full, without animation.
///
/// Used for user messages, the seeded greeting, and error notices, which
/// appear instantly rather than through the typewriter.
pub fn print_entry(entry: &TranscriptEntry) {
    let mut out = stdout();
    let header = match entry.role {
        Role::User => format!("{}", style("👤 Você").green().bold()),
        Role::Assistant => format!("{}", style("🤖 Consultor IA").cyan().bold()),
    };
    let _ = writeln!(out, "{INDENT}{header}");
    for line in markdown::render(&entry.content).split('\n') {
        let _ = writeln!(out, "{INDENT}{line}");
    }
    let meta = entry.timestamp.with_timezone(&Local).format("%H:%M");
    let _ = writeln!(out, "{INDENT}{}", style(meta).dim());
    let _ = writeln!(out);
    let _ = out.flush();
}

impl TranscriptSink for TerminalMessage<'_> {
    fn replace_visible(&mut self, formatted: &str) {
        if self.lines_drawn > 1 {
            let _ = execute!(self.out, cursor::MoveUp(self.lines_drawn - 1));
        }
        if self.lines_drawn > 0 {
            let _ = execute!(
                self.out,
                cursor::MoveToColumn(0),
                terminal::Clear(terminal::ClearType::FromCursorDown)
            );
        }

        let mut count = 0u16;
        for (i, line) in formatted.split('\n').enumerate() {
            if i > 0 {
                let _ = writeln!(self.out);
            }
            let _ = write!(self.out, "{INDENT}{line}");
            count += 1;
        }
        self.lines_drawn = count;
    }

    fn scroll_to_end(&mut self) {
        // The terminal scrolls on its own; just make the tick visible.
        let _ = self.out.flush();
    }

    fn commit(&mut self, entry: TranscriptEntry) {
        let meta = entry.timestamp.with_timezone(&Local).format("%H:%M");
        let _ = writeln!(self.out);
        let _ = writeln!(self.out, "{INDENT}{}", style(meta).dim());
        let _ = writeln!(self.out);
        let _ = self.out.flush();
        self.transcript.push(entry);
        self.lines_drawn = 0;
    }
}
