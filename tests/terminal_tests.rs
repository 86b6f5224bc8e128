//! Tests for the terminal collaborators.

use loading_bars::terminal::{CLEAR_SCREEN, HIDE_CURSOR, SHOW_CURSOR};
use loading_bars::{ConsoleTerminal, Error, MemoryTerminal, Terminal};

mod common;
use common::helpers::*;

#[test]
fn test_memory_terminal_size() {
    let term = MemoryTerminal::new(TEST_COLUMNS, TEST_ROWS);
    assert_eq!(term.size().unwrap(), (TEST_COLUMNS, TEST_ROWS));

    term.set_columns(42);
    assert_eq!(term.size().unwrap(), (42, TEST_ROWS));
}

#[test]
fn test_detached_terminal_is_unavailable() {
    let term = MemoryTerminal::detached();
    assert!(matches!(term.size(), Err(Error::TerminalUnavailable)));

    term.set_columns(50);
    assert_eq!(term.size().unwrap(), (50, 24));
}

#[test]
fn test_memory_terminal_shares_output_between_clones() {
    let term = MemoryTerminal::new(TEST_COLUMNS, TEST_ROWS);
    let mut writer = term.clone();

    writer.write_str("abc").unwrap();
    writer.flush().unwrap();
    assert_eq!(term.output(), "abc");

    term.clear();
    assert_eq!(writer.output(), "");
}

#[test]
fn test_memory_terminal_cursor() {
    let mut term = MemoryTerminal::new(TEST_COLUMNS, TEST_ROWS);
    assert!(term.cursor_visible());

    term.hide_cursor().unwrap();
    assert!(!term.cursor_visible());
    term.show_cursor().unwrap();
    assert!(term.cursor_visible());
    assert_eq!(term.output(), format!("{HIDE_CURSOR}{SHOW_CURSOR}"));
}

#[test]
fn test_memory_terminal_frames() {
    let mut term = MemoryTerminal::new(TEST_COLUMNS, TEST_ROWS);
    assert!(term.frames().is_empty());
    assert!(term.last_frame().is_empty());

    term.write_str(HIDE_CURSOR).unwrap();
    term.write_str(&format!("{CLEAR_SCREEN}\nlog\nbar one\n")).unwrap();
    term.write_str(&format!("{CLEAR_SCREEN}\nlog\nbar two\n")).unwrap();

    assert_eq!(term.frames().len(), 2);
    assert_eq!(term.last_frame(), vec!["log", "bar two"]);
}

#[test]
fn test_escape_sequences() {
    assert_eq!(HIDE_CURSOR, "\x1b[?25l");
    assert_eq!(SHOW_CURSOR, "\x1b[?25h");
    assert_eq!(CLEAR_SCREEN, "\x1b[1J\x1b[500A");
}

#[test]
fn test_console_terminal_as_trait_object() {
    // Whether a terminal is attached depends on how the tests run.
    let term: Box<dyn Terminal> = Box::new(ConsoleTerminal::stdout());
    match term.size() {
        Ok(_) => {}
        Err(err) => assert!(matches!(err, Error::TerminalUnavailable)),
    }
    let _stderr = ConsoleTerminal::stderr();
}

#[test]
fn test_console_terminal_enable_ansi() {
    let mut term = ConsoleTerminal::stderr();
    term.enable_ansi();
    term.enable_ansi();
    term.flush().unwrap();
}
