//! Preview-pass measure and on-screen page rendering.
//!
//! The preview approximates glyph widths as terminal cells times a constant
//! per-cell advance (0.6 em, the classic monospace aspect), mapped into the
//! same point unit the export pass uses. Accurate enough for page boundaries
//! to track the export closely; exact agreement is not promised.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::layout::{LayoutParams, Page, PageItem, TextMeasure};

/// Approximate width measure: display cells × a fixed per-cell advance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMeasure {
    cell_advance: f32,
}

impl CellMeasure {
    /// Per-cell advance derived from the font point size.
    pub fn for_font_size(font_size: f32) -> Self {
        Self {
            cell_advance: font_size * 0.6,
        }
    }

    pub const fn cell_advance(&self) -> f32 {
        self.cell_advance
    }
}

impl TextMeasure for CellMeasure {
    fn width(&self, text: &str) -> f32 {
        UnicodeWidthStr::width(text) as f32 * self.cell_advance
    }
}

/// Upper bound on preview cells per axis; keeps a degenerate measure (zero
/// or negative cell advance) from turning the division into an unbounded
/// allocation.
const MAX_CELLS: f32 = 4096.0;

/// Render pages as fixed-size text boxes for a scrollable preview.
///
/// Every page becomes one box with the same row/column dimensions (the page
/// aspect at cell resolution). Items are placed by their y position, so
/// inter-section gaps show up as blank rows.
pub fn page_boxes(pages: &[Page], params: &LayoutParams, cells: CellMeasure) -> Vec<String> {
    // Clamped before the cast, so even an infinite quotient stays a small
    // positive count.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cols = (params.content_width / cells.cell_advance())
        .floor()
        .clamp(1.0, MAX_CELLS) as usize;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total_rows = (params.content_height / params.line_height)
        .floor()
        .clamp(1.0, MAX_CELLS) as usize;

    pages
        .iter()
        .enumerate()
        .map(|(number, page)| render_box(page, number + 1, cols, total_rows, params))
        .collect()
}

fn render_box(
    page: &Page,
    number: usize,
    cols: usize,
    total_rows: usize,
    params: &LayoutParams,
) -> String {
    let item_count = page.items().len();
    let mut rows: Vec<String> = Vec::with_capacity(total_rows);
    for (index, item) in page.items().iter().enumerate() {
        // Place by vertical position, but never pad past the point where the
        // remaining items still fit their own rows: header heights that are
        // not a multiple of the line height must not push the last line of a
        // full page out of the box.
        let reserved = item_count - index - 1;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let ideal = (item.y() / params.line_height).floor() as usize;
        let target = ideal.min(total_rows.saturating_sub(1 + reserved));
        while rows.len() < target {
            rows.push(String::new());
        }
        match item {
            PageItem::Header { title, .. } => rows.push(header_row(title, cols)),
            PageItem::Line { line, .. } => rows.push(clip_to_cells(&line.text(), cols)),
        }
    }
    while rows.len() < total_rows {
        rows.push(String::new());
    }
    rows.truncate(total_rows);

    let mut out = String::new();
    out.push('┌');
    out.push_str(&"─".repeat(cols));
    out.push('┐');
    out.push('\n');
    for row in &rows {
        let pad = cols.saturating_sub(UnicodeWidthStr::width(row.as_str()));
        out.push('│');
        out.push_str(row);
        out.push_str(&" ".repeat(pad));
        out.push('│');
        out.push('\n');
    }
    out.push('└');
    let footer = format!(" page {number} ");
    let fill = cols.saturating_sub(UnicodeWidthStr::width(footer.as_str()));
    out.push_str(&"─".repeat(fill / 2));
    out.push_str(&footer);
    out.push_str(&"─".repeat(fill - fill / 2));
    out.push('┘');
    out.push('\n');
    out
}

fn header_row(title: &str, cols: usize) -> String {
    let label = format!("── {title} ");
    let used = UnicodeWidthStr::width(label.as_str());
    let mut row = label;
    row.push_str(&"─".repeat(cols.saturating_sub(used)));
    clip_to_cells(&row, cols)
}

/// Truncate to at most `cols` display cells on a character boundary.
fn clip_to_cells(text: &str, cols: usize) -> String {
    let mut out = String::new();
    let mut used = 0_usize;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > cols {
            break;
        }
        out.push(ch);
        used += w;
    }
    out
}
