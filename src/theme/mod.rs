//! Token colors and background contrast resolution.
//!
//! A [`Theme`] is constructed once per render from user settings and never
//! mutated mid-render; both renderer passes receive the same value so preview
//! and export agree on color. When coloring is disabled every token kind
//! collapses to a single foreground picked for contrast against the
//! background.

use serde::{Deserialize, Serialize};

use crate::token::TokenKind;

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Perceptual luma, 0.0 (black) to 255.0 (white).
    pub fn luma(self) -> f32 {
        0.2126 * f32::from(self.r) + 0.7152 * f32::from(self.g) + 0.0722 * f32::from(self.b)
    }
}

/// Foreground color per token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenColors {
    pub keyword: Rgb,
    pub function_name: Rgb,
    pub string: Rgb,
    pub number: Rgb,
    pub comment: Rgb,
    pub plain: Rgb,
}

/// Colors for one render, shared by both renderer passes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub background: Rgb,
    pub colors: TokenColors,
    #[serde(default = "default_coloring")]
    pub coloring_enabled: bool,
}

const fn default_coloring() -> bool {
    true
}

impl Theme {
    /// Dark preset: near-black page, bright token colors.
    pub const fn dark() -> Self {
        Self {
            background: Rgb::new(30, 30, 34),
            colors: TokenColors {
                keyword: Rgb::new(197, 134, 192),
                function_name: Rgb::new(220, 220, 120),
                string: Rgb::new(206, 145, 120),
                number: Rgb::new(181, 206, 168),
                comment: Rgb::new(106, 153, 85),
                plain: Rgb::new(212, 212, 212),
            },
            coloring_enabled: true,
        }
    }

    /// Light preset: white page, darkened token colors.
    pub const fn light() -> Self {
        Self {
            background: Rgb::new(255, 255, 255),
            colors: TokenColors {
                keyword: Rgb::new(127, 0, 85),
                function_name: Rgb::new(121, 94, 38),
                string: Rgb::new(163, 21, 21),
                number: Rgb::new(9, 134, 88),
                comment: Rgb::new(0, 128, 0),
                plain: Rgb::new(30, 30, 30),
            },
            coloring_enabled: true,
        }
    }

    /// Pick the preset matching a user-chosen page background, keeping the
    /// background itself.
    pub fn for_background(background: Rgb) -> Self {
        let mut theme = if background.luma() >= 140.0 {
            Self::light()
        } else {
            Self::dark()
        };
        theme.background = background;
        theme
    }

    /// Disable coloring, collapsing all kinds to one foreground.
    #[must_use]
    pub const fn monochrome(mut self) -> Self {
        self.coloring_enabled = false;
        self
    }

    /// Resolve the display color for a token kind.
    pub fn color_for(&self, kind: TokenKind) -> Rgb {
        if !self.coloring_enabled {
            return self.contrast_foreground();
        }
        match kind {
            TokenKind::Keyword => self.colors.keyword,
            TokenKind::FunctionName => self.colors.function_name,
            TokenKind::String => self.colors.string,
            TokenKind::Number => self.colors.number,
            TokenKind::Comment => self.colors.comment,
            TokenKind::Plain => self.colors.plain,
        }
    }

    /// A single foreground readable against the background.
    pub fn contrast_foreground(&self) -> Rgb {
        if self.background.luma() >= 140.0 {
            Rgb::new(20, 20, 20)
        } else {
            Rgb::new(235, 235, 235)
        }
    }
}
