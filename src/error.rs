//! Library error types.
//!
//! The layout pipeline is pure and nearly infallible; the only failures are
//! impossible page geometry (caught once at pipeline entry) and unusable font
//! data for the export measure.

use thiserror::Error;

/// Errors reported by the layout pipeline.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The page is too short to hold even one section header.
    #[error("page content height {content_height} cannot fit a section header of height {header_height}")]
    HeaderTooTall {
        content_height: f32,
        header_height: f32,
    },

    /// The page is too short to hold even one line of text.
    #[error("page content height {content_height} cannot fit a line of height {line_height}")]
    LineTooTall {
        content_height: f32,
        line_height: f32,
    },

    /// A non-positive line height admits no vertical placement at all.
    #[error("line height {line_height} must be positive")]
    InvalidLineHeight { line_height: f32 },

    /// The font supplied for exact glyph measurement could not be parsed.
    #[error("failed to parse font data: {0}")]
    FontParse(#[from] ttf_parser::FaceParsingError),
}
