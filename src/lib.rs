// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. token::TokenKind)
    clippy::module_name_repetitions
)]

//! # Codesheet
//!
//! A code-to-document layout and pagination engine.
//!
//! Codesheet takes raw source text (plus optional captured run output),
//! tokenizes it for syntax coloring, reflows it into width-bounded lines
//! using a measured per-glyph width function, and paginates the result into
//! fixed-size pages with section headers. The same pipeline runs twice — once
//! with exact glyph metrics for the exported document, once with an
//! approximate cell heuristic for the on-screen preview — so both views come
//! from one algorithm and one parameter set.
//!
//! ## Architecture
//!
//! The engine is a pure, synchronous pipeline over in-memory strings:
//! tokenize (per line) → reflow (per section) → paginate (across sections),
//! with theme colors applied only when pages are emitted. Same inputs and
//! measure always give the same pages.
//!
//! ## Modules
//!
//! - [`token`]: line tokenizer with per-language matcher tables
//! - [`layout`]: reflow and pagination over measured fragments
//! - [`theme`]: token colors and background contrast
//! - [`render`]: the dual preview/export renderer adapter
//! - [`config`]: page geometry and saved CLI defaults

pub mod config;
pub mod error;
pub mod layout;
pub mod render;
pub mod theme;
pub mod token;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::LayoutError;
    pub use crate::layout::{LayoutParams, Page, PageItem, RenderedLine, Section, TextMeasure};
    pub use crate::render::{layout_dual, layout_pass, DocumentInput, DualLayout};
    pub use crate::theme::{Rgb, Theme};
    pub use crate::token::{tokenize, Language, Token, TokenKind};
}
