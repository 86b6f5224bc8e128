#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use loading_bars::{Bar, BarGroup, BarGroupBuilder, MemoryTerminal};

// Common test constants
pub const TEST_COLUMNS: u16 = 120;
pub const TEST_ROWS: u16 = 40;
pub const TEST_NAME: &str = "task";

/// Creates a group drawing on an in-memory terminal of the given width
pub fn create_test_group(columns: u16) -> (BarGroup, MemoryTerminal) {
    create_test_group_with(BarGroup::builder(), columns)
}

/// Finishes `builder` against an in-memory terminal of the given width
pub fn create_test_group_with(builder: BarGroupBuilder, columns: u16) -> (BarGroup, MemoryTerminal) {
    let term = MemoryTerminal::new(columns, TEST_ROWS);
    let group = builder
        .terminal(term.clone())
        .build()
        .expect("Failed to build test group");
    (group, term)
}

/// Creates a group on the default test terminal with a single bar
pub fn create_test_bar(total: u64) -> (BarGroup, Bar, MemoryTerminal) {
    let (group, term) = create_test_group(TEST_COLUMNS);
    let bar = group
        .add_bar(TEST_NAME, total)
        .expect("Failed to add test bar");
    (group, bar, term)
}

/// Creates a builder whose completion hook counts invocations
pub fn create_counting_builder() -> (BarGroupBuilder, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let hook_count = Arc::clone(&count);
    let builder = BarGroup::builder().on_complete(move |_bar| {
        hook_count.fetch_add(1, Ordering::SeqCst);
    });
    (builder, count)
}

/// Reads a completion counter
pub fn completions(count: &Arc<AtomicUsize>) -> usize {
    count.load(Ordering::SeqCst)
}

/// Builds the text of an in-progress single-line bar
pub fn expected_line(name: &str, filled: usize, empty: usize, position: u64, total: u64) -> String {
    format!(
        "{} [{}{}] {}/{}",
        name,
        "#".repeat(filled),
        " ".repeat(empty),
        position,
        total
    )
}

/// Counts the filled cells of a rendered bar
pub fn filled_cells(rendered: &str) -> usize {
    rendered.chars().filter(|c| *c == '#').count()
}

// === Assertion Helpers ===

/// Asserts the position invariant of a bar
pub fn assert_position_within_total(bar: &Bar) {
    let snapshot = bar.snapshot();
    assert!(
        snapshot.position <= snapshot.total,
        "Position {} exceeds total {}",
        snapshot.position,
        snapshot.total
    );
}

/// Asserts that a bar is neither completed nor held by a group
pub fn assert_untouched_by_grouping(bar: &Bar) {
    assert!(bar.group_id().is_none(), "Bar should not be grouped");
    assert!(!bar.is_waiting(), "Bar should not be waiting");
}
