//! In-memory terminal capture.
//!
//! [`MemoryTerminal`] records everything written to it and answers size
//! queries from a width that can be changed at runtime. Clones share the same
//! buffer, so a test can hand one clone to a [`BarGroup`](crate::BarGroup) and
//! inspect the output through another.

use super::{Terminal, CLEAR_SCREEN, HIDE_CURSOR, SHOW_CURSOR};
use crate::{Error, Result};

use parking_lot::Mutex;
use std::io;
use std::sync::Arc;

#[derive(Debug)]
struct Screen {
    /// `None` behaves like a process whose output is redirected.
    size: Option<(u16, u16)>,
    output: String,
    cursor_visible: bool,
}

/// A terminal that writes into a shared in-memory buffer.
#[derive(Debug, Clone)]
pub struct MemoryTerminal {
    screen: Arc<Mutex<Screen>>,
}

impl MemoryTerminal {
    /// Create a terminal reporting the given size.
    pub fn new(columns: u16, rows: u16) -> Self {
        Self::with_size(Some((columns, rows)))
    }

    /// Create a terminal whose size query fails, as when output is piped.
    pub fn detached() -> Self {
        Self::with_size(None)
    }

    fn with_size(size: Option<(u16, u16)>) -> Self {
        Self {
            screen: Arc::new(Mutex::new(Screen {
                size,
                output: String::new(),
                cursor_visible: true,
            })),
        }
    }

    /// Change the reported width, keeping the row count.
    pub fn set_columns(&self, columns: u16) {
        let mut screen = self.screen.lock();
        let rows = screen.size.map_or(24, |(_, rows)| rows);
        screen.size = Some((columns, rows));
    }

    /// Everything written so far.
    pub fn output(&self) -> String {
        self.screen.lock().output.clone()
    }

    /// Drop the recorded output.
    pub fn clear(&self) {
        self.screen.lock().output.clear();
    }

    /// Whether the cursor is currently shown.
    pub fn cursor_visible(&self) -> bool {
        self.screen.lock().cursor_visible
    }

    /// The repaint frames written so far, without the clear sequence.
    pub fn frames(&self) -> Vec<String> {
        self.screen
            .lock()
            .output
            .split(CLEAR_SCREEN)
            .skip(1)
            .map(str::to_owned)
            .collect()
    }

    /// The lines of the most recent repaint frame.
    ///
    /// A frame starts with an empty line and the text log, followed by the
    /// bars; the leading empty line is dropped here.
    pub fn last_frame(&self) -> Vec<String> {
        self.frames()
            .last()
            .map(|frame| {
                frame
                    .strip_prefix('\n')
                    .unwrap_or(frame.as_str())
                    .lines()
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Terminal for MemoryTerminal {
    fn size(&self) -> Result<(u16, u16)> {
        self.screen.lock().size.ok_or(Error::TerminalUnavailable)
    }

    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.screen.lock().output.push_str(s);
        Ok(())
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        let mut screen = self.screen.lock();
        screen.cursor_visible = false;
        screen.output.push_str(HIDE_CURSOR);
        Ok(())
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        let mut screen = self.screen.lock();
        screen.cursor_visible = true;
        screen.output.push_str(SHOW_CURSOR);
        Ok(())
    }
}
