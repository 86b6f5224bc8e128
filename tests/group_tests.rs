//! Tests for the bar group: repaints, scrollback, grouping and the session bracket.

use loading_bars::terminal::{HIDE_CURSOR, SHOW_CURSOR};
use loading_bars::{BarGroup, Error, MemoryTerminal, Phase, Step};
use std::thread;

mod common;
use common::helpers::*;

#[test]
fn test_group_builder_config() {
    let (group, _term) = create_test_group_with(
        BarGroup::builder()
            .max_text(3)
            .completion_message("done")
            .bar_size(40)
            .fallback_width(90)
            .smooth_completion(false),
        TEST_COLUMNS,
    );
    let config = group.config();
    assert_eq!(config.max_text, 3);
    assert_eq!(config.completion_message, "done");
    assert_eq!(config.bar_size, 40);
    assert_eq!(config.fallback_width, 90);
    assert!(!config.smooth_completion);
    assert!(config.on_complete.is_none());

    let debug_str = format!("{:?}", group);
    assert!(debug_str.contains("BarGroup"));
    assert!(debug_str.contains("max_text"));
}

#[test]
fn test_log_evicts_oldest() {
    let (group, term) = create_test_group_with(BarGroup::builder().max_text(3), TEST_COLUMNS);
    for message in ["a", "b", "c", "d"] {
        group.log(message).unwrap();
    }
    assert_eq!(group.text_log(), vec!["b", "c", "d"]);
    assert_eq!(term.last_frame(), vec!["b", "c", "d"]);
}

#[test]
fn test_log_parts_joins() {
    let (group, _term) = create_test_group(TEST_COLUMNS);
    group.log_parts(["copied", "12", "files"], " ").unwrap();
    group.log_parts(Vec::<String>::new(), ", ").unwrap();
    assert_eq!(group.text_log(), vec!["copied 12 files", ""]);
}

#[test]
fn test_newest_bar_renders_first() {
    let (group, term) = create_test_group(TEST_COLUMNS);
    let first = group.add_bar("first", 5).unwrap();
    let second = group.add_bar("second", 5).unwrap();
    group.log("hello").unwrap();

    let names: Vec<String> = group.bars().iter().map(|bar| bar.name()).collect();
    assert_eq!(names, vec!["second", "first"]);
    assert_eq!(
        term.last_frame(),
        vec!["hello".to_string(), second.rendered(), first.rendered()]
    );
}

#[test]
fn test_redraw_repaints_current_state() {
    let (group, term) = create_test_group(TEST_COLUMNS);
    let bar = group.add_bar("task", 4).unwrap();
    term.clear();

    group.redraw().unwrap();
    assert_eq!(term.frames().len(), 1);
    assert_eq!(term.last_frame(), vec![bar.rendered()]);
}

#[test]
fn test_bar_completion_messages() {
    let (group, _term) = create_test_group_with(BarGroup::builder().completion_message("done"), TEST_COLUMNS);
    let plain = group.add_bar("plain", 1).unwrap();
    let custom = group.add_bar_with_message("custom", 1, "finished!").unwrap();

    plain.advance(1).unwrap();
    custom.advance(1).unwrap();
    assert_eq!(plain.rendered(), "plain done");
    assert_eq!(custom.rendered(), "custom finished!");
}

#[test]
fn test_grouped_bars_finish_together() {
    let (builder, count) = create_counting_builder();
    let (group, _term) = create_test_group_with(builder, TEST_COLUMNS);
    let bar1 = group.add_bar("bar1", 2).unwrap();
    let bar2 = group.add_bar("bar2", 3).unwrap();

    let mut steps = group.group(&[&bar1, &bar2]).unwrap();
    let id = steps.id();
    assert_eq!(steps.members().len(), 2);
    assert_eq!(group.pending(id), Some(2));
    assert!(bar1.is_waiting() && bar2.is_waiting());
    assert_eq!(bar1.group_id(), Some(id));

    assert_eq!(steps.next().unwrap().unwrap(), vec![1, 1]);
    assert_eq!(steps.next().unwrap().unwrap(), vec![2, 2]);

    // bar1 completes here but keeps the joint iteration going.
    assert_eq!(steps.next().unwrap().unwrap(), vec![2, 3]);
    assert_eq!(bar1.phase(), Phase::Held);
    assert_eq!(bar1.rendered(), "bar1 is completed.");
    assert_eq!(group.pending(id), Some(1));

    assert!(steps.next().is_none());
    assert!(steps.next().is_none());

    assert_eq!(bar1.position(), 2);
    assert_eq!(bar2.position(), 3);
    assert_eq!(bar1.phase(), Phase::Exhausted);
    assert_eq!(bar2.phase(), Phase::Exhausted);
    assert_eq!(group.pending(id), None);
    assert_untouched_by_grouping(&bar1);
    assert_untouched_by_grouping(&bar2);
    assert_eq!(completions(&count), 2);
}

#[test]
fn test_early_finisher_is_held_until_group_drains() {
    let (group, _term) = create_test_group(TEST_COLUMNS);
    let quick = group.add_bar("quick", 1).unwrap();
    let slow = group.add_bar("slow", 3).unwrap();
    let _steps = group.group(&[&quick, &slow]).unwrap();

    assert_eq!(quick.step().unwrap(), Step::More(1));
    assert_eq!(quick.step().unwrap(), Step::More(1));
    assert!(quick.is_completed());
    for _ in 0..5 {
        assert_eq!(quick.step().unwrap(), Step::More(1));
    }

    slow.advance(3).unwrap();
    assert!(!quick.is_waiting());
    assert_eq!(quick.step().unwrap(), Step::Done);
    assert_eq!(slow.step().unwrap(), Step::Done);
}

#[test]
fn test_drained_slot_zero_is_reused() {
    let (group, _term) = create_test_group(TEST_COLUMNS);
    let a = group.add_bar("a", 1).unwrap();
    let b = group.add_bar("b", 1).unwrap();
    let c = group.add_bar("c", 1).unwrap();
    let d = group.add_bar("d", 1).unwrap();

    let first = group.group(&[&a, &b]).unwrap();
    let first_id = first.id();
    assert_eq!(first_id.index(), 0);
    assert_eq!(first.count(), 1);
    assert_eq!(group.pending(first_id), None);

    let second = group.group(&[&c, &d]).unwrap();
    assert_eq!(second.id(), first_id);
    assert_eq!(group.pending(first_id), Some(2));
}

#[test]
fn test_group_needs_two_distinct_bars() {
    let (group, _term) = create_test_group(TEST_COLUMNS);
    let a = group.add_bar("a", 2).unwrap();

    assert!(matches!(group.group(&[&a]), Err(Error::Precondition(_))));
    assert!(matches!(group.group(&[&a, &a]), Err(Error::Precondition(_))));
    assert!(matches!(group.group(&[]), Err(Error::Precondition(_))));
    assert_untouched_by_grouping(&a);
}

#[test]
fn test_group_rejects_foreign_bar() {
    let (group, _term) = create_test_group(TEST_COLUMNS);
    let (other, _other_term) = create_test_group(TEST_COLUMNS);
    let mine = group.add_bar("mine", 2).unwrap();
    let theirs = other.add_bar("theirs", 2).unwrap();

    assert!(matches!(group.group(&[&mine, &theirs]), Err(Error::Precondition(_))));
    assert_untouched_by_grouping(&mine);
    assert_untouched_by_grouping(&theirs);
}

#[test]
fn test_group_rejects_completed_or_grouped_bars() {
    let (group, _term) = create_test_group(TEST_COLUMNS);
    let done = group.add_bar("done", 1).unwrap();
    let a = group.add_bar("a", 2).unwrap();
    let b = group.add_bar("b", 2).unwrap();
    let c = group.add_bar("c", 2).unwrap();
    done.advance(1).unwrap();

    assert!(matches!(group.group(&[&done, &a]), Err(Error::Precondition(_))));
    assert_untouched_by_grouping(&a);

    let steps = group.group(&[&a, &b]).unwrap();
    assert!(matches!(group.group(&[&b, &c]), Err(Error::Precondition(_))));
    assert_untouched_by_grouping(&c);
    assert_eq!(group.pending(steps.id()), Some(2));
}

#[test]
fn test_cursor_hidden_for_session() {
    let term = MemoryTerminal::new(TEST_COLUMNS, TEST_ROWS);
    let group = BarGroup::builder().terminal(term.clone()).build().unwrap();
    assert!(!term.cursor_visible());
    assert!(term.output().starts_with(HIDE_CURSOR));

    drop(group);
    assert!(term.cursor_visible());
    assert!(term.output().ends_with(SHOW_CURSOR));
}

#[test]
fn test_cursor_restored_after_failed_loop() {
    let term = MemoryTerminal::new(TEST_COLUMNS, TEST_ROWS);

    let run = || -> loading_bars::Result<()> {
        let group = BarGroup::builder().terminal(term.clone()).build()?;
        let bar = group.add_bar("task", 2)?;
        bar.advance(1)?;
        bar.advance(5)?;
        Ok(())
    };

    assert!(matches!(run(), Err(Error::OutOfRange { .. })));
    assert!(term.cursor_visible());
}

#[test]
fn test_finish_restores_cursor_once() {
    let (group, term) = create_test_group(TEST_COLUMNS);
    group.finish().unwrap();
    assert!(term.cursor_visible());
    assert_eq!(term.output().matches(SHOW_CURSOR).count(), 1);
}

#[test]
fn test_detached_terminal_uses_fallback_width() {
    let term = MemoryTerminal::detached();
    let group = BarGroup::builder()
        .terminal(term.clone())
        .fallback_width(200)
        .build()
        .unwrap();

    let bar = group.add_bar("task", 4).unwrap();
    assert_eq!(bar.bar_size(), 185);
    bar.advance(4).unwrap();
    assert_eq!(term.last_frame(), vec!["task is completed."]);
}

#[test]
fn test_concurrent_bars_repaint_whole_frames() {
    let (group, term) = create_test_group(TEST_COLUMNS);
    let bars: Vec<_> = (0..4)
        .map(|i| group.add_bar(format!("worker {i}"), 25).unwrap())
        .collect();
    term.clear();

    let handles: Vec<_> = bars
        .iter()
        .cloned()
        .map(|bar| {
            thread::spawn(move || {
                for _ in 0..25 {
                    bar.advance(1).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert!(bars.iter().all(|bar| bar.is_completed()));
    let frames = term.frames();
    // 24 plain advances and one completing advance (two repaints) per bar.
    assert_eq!(frames.len(), 4 * 26);
    for frame in frames {
        assert!(frame.ends_with('\n'));
        assert_eq!(frame.trim_start_matches('\n').lines().count(), 4);
    }
}

#[test]
fn test_handles_keep_reading_their_bar_as_group_grows() {
    let (group, _term) = create_test_group(TEST_COLUMNS);
    let first = group.add_bar("first", 3).unwrap();
    let reader = first.clone();
    first.advance(1).unwrap();

    for i in 0..5 {
        group.add_bar(format!("later {i}"), 10).unwrap();
    }

    let from_thread = thread::spawn(move || (reader.name(), reader.position(), reader.total()))
        .join()
        .unwrap();
    assert_eq!(from_thread, ("first".to_string(), 1, 3));
    assert_eq!(group.bars().len(), 6);
    assert_eq!(group.bars().last(), Some(&first));
}
