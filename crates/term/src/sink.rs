//! Output sinks: where encoded frames go.
//!
//! A sink receives at most one `write_frame` call per rendered frame and must
//! write the whole slice before returning.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, ResetColor, SetAttribute},
    terminal, QueueableCommand,
};

pub trait OutputSink {
    fn write_frame(&mut self, bytes: &[u8]) -> io::Result<()>;
}

/// In-memory capture, mostly for tests and headless snapshots.
impl OutputSink for Vec<u8> {
    fn write_frame(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

impl OutputSink for io::Stdout {
    fn write_frame(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut lock = self.lock();
        lock.write_all(bytes)?;
        lock.flush()
    }
}

/// Stdout in raw mode on the alternate screen.
pub struct TerminalSink {
    stdout: io::Stdout,
    buf: Vec<u8>,
    active: bool,
}

impl TerminalSink {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(256),
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current terminal size in cells.
    pub fn size() -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        self.active = true;
        tracing::info!("entered terminal raw mode");
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        self.active = false;
        tracing::info!("restored terminal");
        Ok(())
    }

    fn flush_buf(&mut self) -> io::Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()
    }
}

impl Default for TerminalSink {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for TerminalSink {
    fn write_frame(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.stdout.write_all(bytes)?;
        self.stdout.flush()
    }
}

impl Drop for TerminalSink {
    fn drop(&mut self) {
        // Best effort: never leave the user's terminal in raw mode.
        let _ = self.exit();
    }
}
