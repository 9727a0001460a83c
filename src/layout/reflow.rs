//! Greedy repacking of tokens into width-bounded lines.
//!
//! Each input line starts a fresh output line; there is no paragraph reflow
//! across originally distinct lines. Tokens that fit the remaining budget are
//! appended; a token that fits a line by itself starts a new one; a token
//! wider than the whole budget is split at character granularity, every piece
//! keeping the token's kind.

use crate::layout::{MeasuredFragment, RenderedLine, TextMeasure};
use crate::token::Token;

/// Reflow one input line of tokens into width-bounded output lines.
///
/// Always returns at least one line: an input line with zero tokens yields
/// exactly one empty [`RenderedLine`] so blank source lines occupy vertical
/// space. Zero-length tokens advance nothing and are skipped.
///
/// The one permitted width violation: a single character wider than the
/// entire `content_width` is placed alone on its own line, exceeding the
/// budget by necessity. Everything else satisfies `line.width() <=
/// content_width`.
pub fn reflow_line(
    tokens: &[Token],
    measure: &dyn TextMeasure,
    content_width: f32,
) -> Vec<RenderedLine> {
    let mut lines: Vec<RenderedLine> = Vec::new();
    let mut current: Vec<MeasuredFragment> = Vec::new();
    let mut used = 0.0_f32;

    let flush = |lines: &mut Vec<RenderedLine>, current: &mut Vec<MeasuredFragment>| {
        if !current.is_empty() {
            lines.push(RenderedLine::new(std::mem::take(current)));
        }
    };

    for token in tokens {
        if token.text().is_empty() {
            continue;
        }
        let width = measure.width(token.text());

        if used + width <= content_width {
            current.push(MeasuredFragment::new(
                token.text().to_string(),
                token.kind(),
                width,
            ));
            used += width;
        } else if width > content_width {
            // The token can never fit on one line by itself: finish the
            // current line, then split character by character.
            flush(&mut lines, &mut current);
            let (chunk, chunk_width) = split_oversized(token, measure, content_width, &mut lines);
            // The trailing piece stays open so following tokens pack after it.
            current.push(chunk);
            used = chunk_width;
        } else {
            // Fits on a line by itself, just not on this one.
            flush(&mut lines, &mut current);
            current.push(MeasuredFragment::new(
                token.text().to_string(),
                token.kind(),
                width,
            ));
            used = width;
        }
    }

    flush(&mut lines, &mut current);
    if lines.is_empty() {
        lines.push(RenderedLine::empty());
    }
    lines
}

/// Split an oversized token into full-width lines, returning the trailing
/// partial chunk and its width.
///
/// Relies on the additivity documented on [`TextMeasure`]: the chunk width is
/// accumulated per character, which keeps the split linear in the token
/// length.
fn split_oversized(
    token: &Token,
    measure: &dyn TextMeasure,
    content_width: f32,
    lines: &mut Vec<RenderedLine>,
) -> (MeasuredFragment, f32) {
    let mut buf = String::new();
    let mut buf_width = 0.0_f32;
    let mut ch_buf = [0_u8; 4];

    for ch in token.text().chars() {
        let ch_width = measure.width(ch.encode_utf8(&mut ch_buf));
        // A first character wider than the budget is still placed; closing
        // an empty buffer here would loop forever.
        if !buf.is_empty() && buf_width + ch_width > content_width {
            lines.push(RenderedLine::new(vec![MeasuredFragment::new(
                std::mem::take(&mut buf),
                token.kind(),
                buf_width,
            )]));
            buf_width = 0.0;
        }
        buf.push(ch);
        buf_width += ch_width;
    }

    (
        MeasuredFragment::new(buf, token.kind(), buf_width),
        buf_width,
    )
}
