use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::layout::LayoutParams;

/// Physical page size for the exported document.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    A4,
    Letter,
    Legal,
}

impl PageSize {
    /// Page dimensions in points (width, height).
    pub const fn dimensions(self) -> (f32, f32) {
        match self {
            Self::A4 => (595.0, 842.0),
            Self::Letter => (612.0, 792.0),
            Self::Legal => (612.0, 1008.0),
        }
    }
}

/// Theme preset selection.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChoice {
    Dark,
    Light,
}

/// Page margin on all four sides, in points.
const PAGE_MARGIN: f32 = 36.0;

/// Derive the layout parameter snapshot both renderer passes share.
///
/// Line height, header band, and section gap scale with the font size; the
/// content box is the page minus a half-inch margin.
pub fn layout_params(page_size: PageSize, font_size: f32) -> LayoutParams {
    let (width, height) = page_size.dimensions();
    LayoutParams {
        content_width: width - 2.0 * PAGE_MARGIN,
        content_height: height - 2.0 * PAGE_MARGIN,
        line_height: font_size * 1.3,
        header_height: font_size * 2.2,
        section_gap: font_size * 1.5,
    }
}

/// Saved CLI defaults, merged with the live command line.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConfigFlags {
    pub page_size: Option<PageSize>,
    pub font_size: Option<f32>,
    pub theme: Option<ThemeChoice>,
    pub no_color: bool,
    pub preview: bool,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            page_size: other.page_size.or(self.page_size),
            font_size: other.font_size.or(self.font_size),
            theme: other.theme.or(self.theme),
            no_color: self.no_color || other.no_color,
            preview: self.preview || other.preview,
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("codesheet").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("codesheet")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("codesheet").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("codesheet")
                .join("config");
        }
    }

    PathBuf::from(".codesheetrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".codesheetrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# codesheet defaults (saved with --save)".to_string());
    if let Some(size) = flags.page_size {
        lines.push(format!("--page-size {}", page_size_str(size)));
    }
    if let Some(font_size) = flags.font_size {
        lines.push(format!("--font-size {font_size}"));
    }
    if let Some(theme) = flags.theme {
        let theme_str = match theme {
            ThemeChoice::Dark => "dark",
            ThemeChoice::Light => "light",
        };
        lines.push(format!("--theme {theme_str}"));
    }
    if flags.no_color {
        lines.push("--no-color".to_string());
    }
    if flags.preview {
        lines.push("--preview".to_string());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--no-color" {
            flags.no_color = true;
        } else if token == "--preview" {
            flags.preview = true;
        } else if token == "--page-size" {
            if let Some(next) = tokens.get(i + 1) {
                flags.page_size = parse_page_size(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--page-size=") {
            flags.page_size = parse_page_size(value);
        } else if token == "--font-size" {
            if let Some(next) = tokens.get(i + 1) {
                flags.font_size = next.parse().ok();
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--font-size=") {
            flags.font_size = value.parse().ok();
        } else if token == "--theme" {
            if let Some(next) = tokens.get(i + 1) {
                flags.theme = parse_theme(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--theme=") {
            flags.theme = parse_theme(value);
        }
        i += 1;
    }
    flags
}

fn parse_theme(s: &str) -> Option<ThemeChoice> {
    match s {
        "dark" => Some(ThemeChoice::Dark),
        "light" => Some(ThemeChoice::Light),
        _ => None,
    }
}

fn parse_page_size(s: &str) -> Option<PageSize> {
    match s {
        "a4" => Some(PageSize::A4),
        "letter" => Some(PageSize::Letter),
        "legal" => Some(PageSize::Legal),
        _ => None,
    }
}

const fn page_size_str(size: PageSize) -> &'static str {
    match size {
        PageSize::A4 => "a4",
        PageSize::Letter => "letter",
        PageSize::Legal => "legal",
    }
}
