//! Layout value types shared by the reflow engine and the paginator.
//!
//! Everything here is a transient, render-pass-scoped value object. Measured
//! widths are never persisted: the preview and export passes use different
//! measurement functions, so fragments are recomputed per pass.

pub mod paginate;
pub mod reflow;

pub use paginate::{paginate, Page, PageItem};
pub use reflow::reflow_line;

use crate::error::LayoutError;
use crate::token::TokenKind;

/// Width measurement for one specific layout pass.
///
/// Widths are in typographic points. Implementations must be additive per
/// character (`width(ab) == width(a) + width(b)`): the reflow engine relies
/// on this when splitting an oversized token character by character. Both
/// supplied measures (glyph advances, cell counts) are additive; kerning is
/// out of scope.
pub trait TextMeasure {
    fn width(&self, text: &str) -> f32;
}

impl<F: Fn(&str) -> f32> TextMeasure for F {
    fn width(&self, text: &str) -> f32 {
        self(text)
    }
}

/// A token (or part of a split token) annotated with its measured width.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredFragment {
    text: String,
    kind: TokenKind,
    width: f32,
}

impl MeasuredFragment {
    pub const fn new(text: String, kind: TokenKind, width: f32) -> Self {
        Self { text, kind, width }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    pub const fn width(&self) -> f32 {
        self.width
    }
}

/// One output line whose fragments fit the content-width budget.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedLine {
    fragments: Vec<MeasuredFragment>,
}

impl RenderedLine {
    pub const fn new(fragments: Vec<MeasuredFragment>) -> Self {
        Self { fragments }
    }

    /// An empty line, emitted for blank source lines so they keep their
    /// vertical space.
    pub const fn empty() -> Self {
        Self {
            fragments: Vec::new(),
        }
    }

    pub fn fragments(&self) -> &[MeasuredFragment] {
        &self.fragments
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Total measured width of the line.
    pub fn width(&self) -> f32 {
        self.fragments.iter().map(MeasuredFragment::width).sum()
    }

    /// Concatenated fragment text.
    pub fn text(&self) -> String {
        self.fragments.iter().map(MeasuredFragment::text).collect()
    }
}

/// A titled, headered block of reflowed content.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    title: String,
    lines: Vec<RenderedLine>,
}

impl Section {
    pub const fn new(title: String, lines: Vec<RenderedLine>) -> Self {
        Self { title, lines }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn lines(&self) -> &[RenderedLine] {
        &self.lines
    }
}

/// Layout parameters shared by both renderer passes.
///
/// All values are in points. Both passes must receive the same parameter
/// snapshot so that any page-boundary divergence between preview and export
/// is attributable solely to the width measure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Horizontal budget for one line of fragments.
    pub content_width: f32,
    /// Usable vertical space per page.
    pub content_height: f32,
    /// Vertical advance per line.
    pub line_height: f32,
    /// Vertical space taken by a section header band.
    pub header_height: f32,
    /// Vertical gap between consecutive sections.
    pub section_gap: f32,
}

impl LayoutParams {
    /// Reject geometry with no valid placement.
    ///
    /// Checked once at pipeline entry so pagination never discovers an
    /// impossible configuration mid-run. A non-positive line height is
    /// rejected here too: no vertical cursor can advance through it.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.line_height <= 0.0 {
            return Err(LayoutError::InvalidLineHeight {
                line_height: self.line_height,
            });
        }
        if self.content_height < self.header_height {
            return Err(LayoutError::HeaderTooTall {
                content_height: self.content_height,
                header_height: self.header_height,
            });
        }
        if self.content_height < self.line_height {
            return Err(LayoutError::LineTooTall {
                content_height: self.content_height,
                line_height: self.line_height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(content_height: f32, line_height: f32, header_height: f32) -> LayoutParams {
        LayoutParams {
            content_width: 100.0,
            content_height,
            line_height,
            header_height,
            section_gap: 10.0,
        }
    }

    #[test]
    fn test_validate_accepts_workable_geometry() {
        assert!(params(100.0, 12.0, 25.0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_header_taller_than_page() {
        let err = params(20.0, 12.0, 25.0).validate().unwrap_err();
        assert!(matches!(err, LayoutError::HeaderTooTall { .. }));
    }

    #[test]
    fn test_validate_rejects_line_taller_than_page() {
        let err = params(20.0, 30.0, 10.0).validate().unwrap_err();
        assert!(matches!(err, LayoutError::LineTooTall { .. }));
    }

    #[test]
    fn test_validate_rejects_non_positive_line_height() {
        let err = params(100.0, 0.0, 25.0).validate().unwrap_err();
        assert!(matches!(err, LayoutError::InvalidLineHeight { .. }));

        let err = params(100.0, -3.0, 25.0).validate().unwrap_err();
        assert!(matches!(err, LayoutError::InvalidLineHeight { .. }));
    }

    #[test]
    fn test_rendered_line_width_and_text() {
        let line = RenderedLine::new(vec![
            MeasuredFragment::new("ab".to_string(), TokenKind::Plain, 2.0),
            MeasuredFragment::new("cd".to_string(), TokenKind::Keyword, 2.0),
        ]);
        assert_eq!(line.text(), "abcd");
        assert!((line.width() - 4.0).abs() < f32::EPSILON);
        assert!(!line.is_empty());
    }

    #[test]
    fn test_empty_line_has_zero_width() {
        let line = RenderedLine::empty();
        assert!(line.is_empty());
        assert_eq!(line.width(), 0.0);
        assert_eq!(line.text(), "");
    }
}
