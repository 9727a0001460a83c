//! Placement of headers and lines into fixed-height pages.
//!
//! A cursor walks down each page; any item that would overflow the usable
//! content height closes the page and opens a new one. Pages are immutable
//! once closed, so emission is strictly forward.

use crate::error::LayoutError;
use crate::layout::{LayoutParams, RenderedLine, Section};

/// One placed item on a page, with its vertical position in points.
#[derive(Debug, Clone, PartialEq)]
pub enum PageItem {
    /// A section header band.
    Header { y: f32, title: String },
    /// One reflowed line of content.
    Line { y: f32, line: RenderedLine },
}

impl PageItem {
    /// Vertical position of the item on its page.
    pub const fn y(&self) -> f32 {
        match self {
            Self::Header { y, .. } | Self::Line { y, .. } => *y,
        }
    }
}

/// An ordered sequence of placed items whose accumulated height stays within
/// the page's usable content height.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    items: Vec<PageItem>,
}

impl Page {
    pub fn items(&self) -> &[PageItem] {
        &self.items
    }

    /// Number of content lines on the page (headers excluded).
    pub fn line_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, PageItem::Line { .. }))
            .count()
    }
}

/// Arrange sections into fixed-height pages.
///
/// Sections keep their order; a section with zero lines is skipped entirely
/// (no empty header). The inter-section gap is only inserted when it fits in
/// the remaining space; otherwise the next section's header-fit check decides
/// page placement on its own. A header may legally land at the bottom of a
/// page with the section's first line overflowing to the next one: the
/// header fit, the line did not.
///
/// # Errors
///
/// Returns a configuration error when the geometry admits no valid placement
/// (`content_height` smaller than `header_height` or `line_height`).
pub fn paginate(sections: &[Section], params: &LayoutParams) -> Result<Vec<Page>, LayoutError> {
    params.validate()?;

    let mut pages: Vec<Page> = Vec::new();
    let mut items: Vec<PageItem> = Vec::new();
    let mut y = 0.0_f32;
    let mut first_placed = true;

    let close_page = |pages: &mut Vec<Page>, items: &mut Vec<PageItem>, y: &mut f32| {
        pages.push(Page {
            items: std::mem::take(items),
        });
        *y = 0.0;
    };

    for section in sections {
        if section.lines().is_empty() {
            continue;
        }

        // Gap between sections, only when it fits on the current page.
        if !first_placed && y + params.section_gap <= params.content_height {
            y += params.section_gap;
        }
        first_placed = false;

        if y + params.header_height > params.content_height {
            close_page(&mut pages, &mut items, &mut y);
        }
        items.push(PageItem::Header {
            y,
            title: section.title().to_string(),
        });
        y += params.header_height;

        for line in section.lines() {
            if y + params.line_height > params.content_height {
                close_page(&mut pages, &mut items, &mut y);
            }
            items.push(PageItem::Line {
                y,
                line: line.clone(),
            });
            y += params.line_height;
        }
    }

    if !items.is_empty() {
        pages.push(Page { items });
    }
    Ok(pages)
}
