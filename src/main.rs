//! Codesheet - lay out source code into fixed-size pages.
//!
//! # Usage
//!
//! ```bash
//! codesheet main.py
//! codesheet main.py --run-output run.txt -o main.txt
//! codesheet main.py --preview --page-size letter --font-size 12
//! ```

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;

use codesheet::config::{
    clear_config_flags, global_config_path, layout_params, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags, ConfigFlags, PageSize, ThemeChoice,
};
use codesheet::layout::TextMeasure;
use codesheet::render::export::{system_monospace, write_artifact, GlyphMeasure};
use codesheet::render::preview::{page_boxes, CellMeasure};
use codesheet::render::{layout_dual, DocumentInput};
use codesheet::theme::Theme;
use codesheet::token::Language;

/// Lay out source code into fixed-size pages for preview and export
#[derive(Parser, Debug)]
#[command(name = "codesheet", version, about, long_about = None)]
struct Cli {
    /// Source file to lay out
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// File holding captured execution output, added as an OUTPUT section
    #[arg(long, value_name = "PATH")]
    run_output: Option<PathBuf>,

    /// Page size for the exported document
    #[arg(long, value_enum, default_value = "a4")]
    page_size: PageSize,

    /// Font size in points
    #[arg(long, default_value_t = 10.0)]
    font_size: f32,

    /// Color theme preset
    #[arg(long, value_enum, default_value = "dark")]
    theme: ThemeChoice,

    /// JSON theme file overriding the preset
    #[arg(long, value_name = "PATH")]
    theme_file: Option<PathBuf>,

    /// Disable syntax coloring
    #[arg(long)]
    no_color: bool,

    /// Print the on-screen preview boxes instead of the export artifact
    #[arg(long)]
    preview: bool,

    /// Write the export artifact to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Save current command-line flags as defaults in .codesheetrc
    #[arg(long)]
    save: bool,

    /// Clear saved defaults in .codesheetrc
    #[arg(long)]
    clear: bool,
}

fn resolve_theme(cli: &Cli, effective: &ConfigFlags) -> Result<Theme> {
    let mut theme = if let Some(path) = &cli.theme_file {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read theme file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse theme file {}", path.display()))?
    } else {
        match effective.theme.unwrap_or(cli.theme) {
            ThemeChoice::Dark => Theme::dark(),
            ThemeChoice::Light => Theme::light(),
        }
    };
    if cli.no_color || effective.no_color {
        theme = theme.monochrome();
    }
    Ok(theme)
}

fn export_measure(font_size: f32) -> Box<dyn TextMeasure> {
    match system_monospace().map(|data| GlyphMeasure::from_font_data(&data, font_size)) {
        Some(Ok(measure)) => Box::new(measure),
        Some(Err(err)) => {
            warn!("system monospace font unusable ({err}); using cell heuristic for export");
            Box::new(CellMeasure::for_font_size(font_size))
        }
        None => Box::new(CellMeasure::for_font_size(font_size)),
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    if !cli.file.exists() {
        anyhow::bail!("File not found: {}", cli.file.display());
    }
    let source = fs::read_to_string(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;
    let run_output = cli
        .run_output
        .as_ref()
        .map(|path| {
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read run output {}", path.display()))
        })
        .transpose()?;

    let language = Language::from_extension(
        cli.file.extension().and_then(|ext| ext.to_str()),
    );
    let input = DocumentInput::new(source, language).with_run_output(run_output);

    let font_size = effective.font_size.unwrap_or(cli.font_size);
    if font_size <= 0.0 {
        anyhow::bail!("Font size must be positive (got {font_size})");
    }
    let page_size = effective.page_size.unwrap_or(cli.page_size);
    let show_preview = cli.preview || effective.preview;
    let no_color = cli.no_color || effective.no_color;
    let params = layout_params(page_size, font_size);
    let theme = resolve_theme(&cli, &effective)?;

    let export = export_measure(font_size);
    let cells = CellMeasure::for_font_size(font_size);
    let dual = layout_dual(&input, &params, export.as_ref(), &cells)
        .context("Layout failed")?;

    if show_preview {
        let mut stdout = std::io::stdout().lock();
        for page_box in page_boxes(&dual.preview, &params, cells) {
            stdout.write_all(page_box.as_bytes())?;
        }
        return Ok(());
    }

    match &cli.output {
        Some(path) => {
            let mut file = fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            // Color only makes sense on a terminal.
            write_artifact(&mut file, &dual.export, &theme, false)?;
            eprintln!(
                "Wrote {} page(s) to {} (preview: {} page(s))",
                dual.export.len(),
                path.display(),
                dual.preview.len()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            write_artifact(&mut stdout, &dual.export, &theme, !no_color)?;
        }
    }

    Ok(())
}
