//! Terminal-width-aware bar layout.
//!
//! A bar line looks like `name [#####     ] 12/40`. [`Layout::fit`] decides how
//! many cells the `[...]` part gets and whether the label has to go on its own
//! line. The result depends only on its inputs, so laying out twice against the
//! same width always gives the same answer.
//!
//! # Examples
//!
//! ```rust
//! use loading_bars::Layout;
//!
//! // Wide terminal: the bar stretches to leave a 4 cell margin.
//! let wide = Layout::fit("task", 4, 100, 120);
//! assert_eq!(wide.bar_size, 105);
//! assert!(!wide.line_break);
//!
//! // Narrow terminal: clamped, and the label moves to its own line.
//! let narrow = Layout::fit("task", 4, 100, 80);
//! assert_eq!(narrow.bar_size, 70);
//! assert!(narrow.line_break);
//! ```

use console::measure_text_width;

/// Preferred bar width before clamping and stretching.
pub const DEFAULT_BAR_SIZE: usize = 100;

/// Cells always left free when the preferred size does not fit.
const CLAMP_MARGIN: usize = 10;

/// Cells left free at the end of a stretched line.
const STRETCH_MARGIN: usize = 4;

/// Where a bar goes on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Layout {
    /// Width of the `[...]` interior in cells.
    pub bar_size: usize,
    /// Render the label and the bar on separate lines.
    pub line_break: bool,
}

impl Layout {
    /// Lay out a bar labelled `name` counting to `total` on a terminal
    /// `columns` wide, starting from a preferred interior width of `preferred`.
    pub fn fit(name: &str, total: u64, preferred: usize, columns: u16) -> Self {
        let columns = usize::from(columns);
        let name_width = measure_text_width(name);

        let mut bar_size = preferred;
        if bar_size > columns.saturating_sub(CLAMP_MARGIN) {
            bar_size = columns.saturating_sub(CLAMP_MARGIN);
        }

        // "{name} [" + bar + "] " + "{total}/{total}"
        let chrome = name_width + 5 + 2 * digits(total);
        let line_size = chrome + bar_size;

        let mut line_break = false;
        if name_width >= bar_size || line_size > columns {
            line_break = true;
        } else if line_size < columns {
            bar_size = columns.saturating_sub(chrome + STRETCH_MARGIN);
        }

        Self {
            bar_size,
            line_break,
        }
    }

    /// The text placed between the label and the bar.
    pub fn separator(&self) -> char {
        if self.line_break {
            '\n'
        } else {
            ' '
        }
    }
}

/// Number of decimal digits needed to print `n`.
pub(crate) fn digits(n: u64) -> usize {
    n.checked_ilog10().map_or(1, |d| d as usize + 1)
}
