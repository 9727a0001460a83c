//! Export-pass measure and the text artifact writer.
//!
//! The export measure reads real advance widths out of a font face, so the
//! exported document's line breaks come from measured (not estimated) glyph
//! metrics. The artifact writer here paints pages as ANSI-colored text; the
//! actual document backend (PDF writing and file delivery) is the caller's
//! concern and consumes the same pages.

use std::io::{self, Write};

use crossterm::style::{Color, ResetColor, SetForegroundColor};
use crossterm::QueueableCommand;
use tracing::warn;

use crate::error::LayoutError;
use crate::layout::{Page, PageItem, TextMeasure};
use crate::theme::{Rgb, Theme};

/// Exact width measure backed by a font face's advance widths.
///
/// Advances are resolved per character and summed, in points at the given
/// font size. ASCII advances are cached at construction; characters the face
/// has no glyph for fall back to the space advance. For the monospace faces
/// this tool targets, every advance is the same anyway.
#[derive(Debug, Clone)]
pub struct GlyphMeasure {
    ascii: [f32; 128],
    fallback: f32,
}

impl GlyphMeasure {
    /// Build a measure from raw font data (TTF or OTF).
    ///
    /// # Errors
    ///
    /// Fails when the data is not a parseable font face.
    pub fn from_font_data(data: &[u8], font_size: f32) -> Result<Self, LayoutError> {
        let face = ttf_parser::Face::parse(data, 0)?;
        let scale = font_size / f32::from(face.units_per_em());

        let advance = |ch: char| -> Option<f32> {
            let glyph = face.glyph_index(ch)?;
            face.glyph_hor_advance(glyph)
                .map(|units| f32::from(units) * scale)
        };

        let fallback = advance(' ')
            .or_else(|| advance('M'))
            .unwrap_or(font_size * 0.6);
        let mut ascii = [fallback; 128];
        for (i, slot) in ascii.iter_mut().enumerate() {
            if let Some(ch) = char::from_u32(i as u32)
                && let Some(width) = advance(ch)
            {
                *slot = width;
            }
        }

        Ok(Self { ascii, fallback })
    }
}

impl TextMeasure for GlyphMeasure {
    fn width(&self, text: &str) -> f32 {
        text.chars()
            .map(|ch| {
                self.ascii
                    .get(ch as usize)
                    .copied()
                    .unwrap_or(self.fallback)
            })
            .sum()
    }
}

/// Load the system's default monospace face for the export measure.
///
/// Returns `None` (with a warning) when no monospace face is installed;
/// callers then fall back to the cell heuristic for the export pass too.
pub fn system_monospace() -> Option<Vec<u8>> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    let query = fontdb::Query {
        families: &[fontdb::Family::Monospace],
        ..fontdb::Query::default()
    };
    let Some(id) = db.query(&query) else {
        warn!("no system monospace font found; export will use the cell heuristic");
        return None;
    };
    db.with_face_data(id, |data, _index| data.to_vec())
}

/// Write pages as an ANSI-colored text artifact.
///
/// Headers become full-width banner rows; fragments are painted with the
/// theme's colors when `color` is set. Pages are separated by a form feed so
/// the artifact stays greppable and pageable.
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn write_artifact<W: Write>(
    out: &mut W,
    pages: &[Page],
    theme: &Theme,
    color: bool,
) -> io::Result<()> {
    for (index, page) in pages.iter().enumerate() {
        if index > 0 {
            out.write_all(b"\x0c\n")?;
        }
        for item in page.items() {
            match item {
                PageItem::Header { title, .. } => {
                    writeln!(out, "{}", header_banner(title))?;
                }
                PageItem::Line { line, .. } => {
                    for fragment in line.fragments() {
                        if color {
                            out.queue(SetForegroundColor(to_term_color(
                                theme.color_for(fragment.kind()),
                            )))?;
                        }
                        out.write_all(fragment.text().as_bytes())?;
                    }
                    if color && !line.is_empty() {
                        out.queue(ResetColor)?;
                    }
                    out.write_all(b"\n")?;
                }
            }
        }
    }
    out.flush()
}

const fn to_term_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn header_banner(title: &str) -> String {
    format!("═══ {title} ═══")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutParams;
    use crate::render::{layout_pass, DocumentInput};
    use crate::token::Language;

    fn params() -> LayoutParams {
        LayoutParams {
            content_width: 300.0,
            content_height: 200.0,
            line_height: 12.0,
            header_height: 24.0,
            section_gap: 12.0,
        }
    }

    #[test]
    fn test_artifact_contains_text_and_banners() {
        let input = DocumentInput::new("total = 1 + 2".to_string(), Language::Python)
            .with_run_output(Some("3".to_string()));
        let pages = layout_pass(&input, &params(), &|t: &str| t.len() as f32).unwrap();

        let mut buf = Vec::new();
        write_artifact(&mut buf, &pages, &Theme::dark(), false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("═══ SOURCE CODE ═══"));
        assert!(text.contains("═══ OUTPUT ═══"));
        assert!(text.contains("total = 1 + 2"));
        // Colorless output carries no escape sequences.
        assert!(!text.contains('\x1b'));
    }

    /// Drop `ESC ... m` color sequences, keeping the painted text.
    fn strip_ansi(text: &str) -> String {
        let mut out = String::new();
        let mut chars = text.chars();
        while let Some(ch) = chars.next() {
            if ch == '\x1b' {
                for next in chars.by_ref() {
                    if next == 'm' {
                        break;
                    }
                }
            } else {
                out.push(ch);
            }
        }
        out
    }

    #[test]
    fn test_colored_artifact_emits_escape_sequences() {
        let input = DocumentInput::new("x = 'hi'".to_string(), Language::Python);
        let pages = layout_pass(&input, &params(), &|t: &str| t.len() as f32).unwrap();

        let mut buf = Vec::new();
        write_artifact(&mut buf, &pages, &Theme::dark(), true).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains('\x1b'));
        // Each fragment is preceded by a color sequence, so the line text is
        // only contiguous once the sequences are stripped.
        assert!(strip_ansi(&text).contains("x = 'hi'"));
    }

    #[test]
    fn test_pages_are_separated_by_form_feed() {
        let input = DocumentInput::new("a\n".repeat(60), Language::Plain);
        let pages = layout_pass(&input, &params(), &|t: &str| t.len() as f32).unwrap();
        assert!(pages.len() > 1);

        let mut buf = Vec::new();
        write_artifact(&mut buf, &pages, &Theme::dark(), false).unwrap();
        let feeds = buf.iter().filter(|&&b| b == 0x0c).count();
        assert_eq!(feeds, pages.len() - 1);
    }

    #[test]
    fn test_glyph_measure_from_system_font_if_available() {
        // Environment-dependent: skip quietly when no font is installed.
        let Some(data) = system_monospace() else {
            return;
        };
        let measure = GlyphMeasure::from_font_data(&data, 10.0).unwrap();
        let one = measure.width("a");
        assert!(one > 0.0);
        // Additive per character.
        assert!((measure.width("aaaa") - one * 4.0).abs() < 1e-3);
    }

    #[test]
    fn test_glyph_measure_rejects_garbage() {
        assert!(GlyphMeasure::from_font_data(&[0_u8; 16], 10.0).is_err());
    }
}
