//! The shared layout pipeline and the dual renderer adapter.
//!
//! One pipeline — tokenize, reflow, paginate — serves both the on-screen
//! preview and the exported document. The two renderers differ only in the
//! injected width measure: the export pass uses exact glyph advances, the
//! preview pass a monospace cell heuristic. Page boundaries may diverge
//! slightly between the passes; that is an accepted property of the
//! approximate preview measure, not a defect.

pub mod export;
pub mod preview;

use tracing::debug;

use crate::error::LayoutError;
use crate::layout::{paginate, reflow_line, LayoutParams, Page, RenderedLine, Section, TextMeasure};
use crate::token::{tokenize, Language};

/// Title of the section holding the source text.
pub const SOURCE_TITLE: &str = "SOURCE CODE";
/// Title of the section holding captured execution output.
pub const OUTPUT_TITLE: &str = "OUTPUT";

/// Raw input for one render: source text plus optional captured run output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInput {
    source: String,
    run_output: Option<String>,
    language: Language,
}

impl DocumentInput {
    pub const fn new(source: String, language: Language) -> Self {
        Self {
            source,
            run_output: None,
            language,
        }
    }

    /// Attach captured execution output as a second section.
    #[must_use]
    pub fn with_run_output(mut self, output: Option<String>) -> Self {
        self.run_output = output;
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub const fn language(&self) -> Language {
        self.language
    }

    /// Section inputs in fixed order: source first, then run output. A block
    /// with no text contributes no section. Run output is tokenized with the
    /// plain table; only the source pane gets syntax coloring.
    fn blocks(&self) -> Vec<(&str, &str, Language)> {
        let mut blocks = Vec::with_capacity(2);
        if !self.source.is_empty() {
            blocks.push((SOURCE_TITLE, self.source.as_str(), self.language));
        }
        if let Some(output) = self.run_output.as_deref()
            && !output.is_empty()
        {
            blocks.push((OUTPUT_TITLE, output, Language::Plain));
        }
        blocks
    }
}

/// Paginated output of both renderer passes over the same input.
#[derive(Debug, Clone, PartialEq)]
pub struct DualLayout {
    /// Pages laid out with the export measure (exact glyph metrics).
    pub export: Vec<Page>,
    /// Pages laid out with the preview measure (cell heuristic).
    pub preview: Vec<Page>,
}

/// Run the full pipeline once with one width measure.
///
/// Pure and re-entrant: same input, parameters, and measure always produce
/// the same pages, and nothing is shared with any other pass in flight.
///
/// # Errors
///
/// Fails only on impossible page geometry, validated before any work.
pub fn layout_pass(
    input: &DocumentInput,
    params: &LayoutParams,
    measure: &dyn TextMeasure,
) -> Result<Vec<Page>, LayoutError> {
    params.validate()?;

    let mut sections = Vec::new();
    for (title, text, language) in input.blocks() {
        let table = language.rules();
        let lines: Vec<RenderedLine> = text
            .lines()
            .flat_map(|line| reflow_line(&tokenize(line, table), measure, params.content_width))
            .collect();
        if !lines.is_empty() {
            sections.push(Section::new(title.to_string(), lines));
        }
    }

    paginate(&sections, params)
}

/// Drive the pipeline twice with the export and preview measures.
///
/// Both passes see structurally identical section inputs and the same
/// parameter snapshot, so any divergence in page or line boundaries comes
/// from the measures alone.
///
/// # Errors
///
/// Fails only on impossible page geometry; an error leaves no partial state
/// behind for either pass.
pub fn layout_dual(
    input: &DocumentInput,
    params: &LayoutParams,
    export_measure: &dyn TextMeasure,
    preview_measure: &dyn TextMeasure,
) -> Result<DualLayout, LayoutError> {
    let export = layout_pass(input, params, export_measure)?;
    let preview = layout_pass(input, params, preview_measure)?;
    debug!(
        export_pages = export.len(),
        preview_pages = preview.len(),
        "dual layout complete"
    );
    Ok(DualLayout { export, preview })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PageItem;

    fn per_char(text: &str) -> f32 {
        text.chars().count() as f32
    }

    fn params() -> LayoutParams {
        LayoutParams {
            content_width: 40.0,
            content_height: 100.0,
            line_height: 12.0,
            header_height: 25.0,
            section_gap: 15.0,
        }
    }

    fn page_text(pages: &[Page]) -> String {
        pages
            .iter()
            .flat_map(|p| p.items())
            .filter_map(|item| match item {
                PageItem::Line { line, .. } => Some(line.text()),
                PageItem::Header { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_source_only_produces_one_section() {
        let input = DocumentInput::new("x = 1\n".to_string(), Language::Python);
        let pages = layout_pass(&input, &params(), &per_char).unwrap();
        let headers: Vec<_> = pages
            .iter()
            .flat_map(|p| p.items())
            .filter(|i| matches!(i, PageItem::Header { .. }))
            .collect();
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_run_output_becomes_second_section() {
        let input = DocumentInput::new("print('hi')".to_string(), Language::Python)
            .with_run_output(Some("hi\n".to_string()));
        let pages = layout_pass(&input, &params(), &per_char).unwrap();
        let titles: Vec<String> = pages
            .iter()
            .flat_map(|p| p.items())
            .filter_map(|item| match item {
                PageItem::Header { title, .. } => Some(title.clone()),
                PageItem::Line { .. } => None,
            })
            .collect();
        assert_eq!(titles, vec![SOURCE_TITLE.to_string(), OUTPUT_TITLE.to_string()]);
    }

    #[test]
    fn test_empty_run_output_is_omitted() {
        let input = DocumentInput::new("x".to_string(), Language::Plain)
            .with_run_output(Some(String::new()));
        let pages = layout_pass(&input, &params(), &per_char).unwrap();
        let headers = pages
            .iter()
            .flat_map(|p| p.items())
            .filter(|i| matches!(i, PageItem::Header { .. }))
            .count();
        assert_eq!(headers, 1);
    }

    #[test]
    fn test_coverage_across_whole_pipeline() {
        let source = "def add(a, b):\n    return a + b\n\nprint(add(1, 2))\n";
        let input = DocumentInput::new(source.to_string(), Language::Python);
        let pages = layout_pass(&input, &params(), &per_char).unwrap();
        let expected: String = source.lines().collect();
        assert_eq!(page_text(&pages), expected);
    }

    #[test]
    fn test_blank_lines_keep_vertical_space() {
        let input = DocumentInput::new("a\n\nb".to_string(), Language::Plain);
        let pages = layout_pass(&input, &params(), &per_char).unwrap();
        assert_eq!(pages[0].line_count(), 3);
    }

    #[test]
    fn test_dual_passes_share_parameters_but_not_boundaries() {
        let long_line = "alpha beta gamma delta epsilon zeta eta theta iota";
        let input = DocumentInput::new(long_line.to_string(), Language::Plain);
        // Preview sees characters half as wide as export, so it wraps less.
        let wide = |text: &str| text.chars().count() as f32 * 2.0;
        let dual = layout_dual(&input, &params(), &wide, &per_char).unwrap();
        assert_eq!(page_text(&dual.export), page_text(&dual.preview));
        let export_lines: usize = dual.export.iter().map(Page::line_count).sum();
        let preview_lines: usize = dual.preview.iter().map(Page::line_count).sum();
        assert!(export_lines > preview_lines);
    }

    #[test]
    fn test_geometry_error_surfaces_before_layout() {
        let input = DocumentInput::new("x".to_string(), Language::Plain);
        let mut p = params();
        p.content_height = 5.0;
        assert!(layout_pass(&input, &p, &per_char).is_err());
    }

    #[test]
    fn test_layout_pass_is_deterministic() {
        let input = DocumentInput::new("for i in range(10):\n    print(i)\n".to_string(), Language::Python);
        let a = layout_pass(&input, &params(), &per_char).unwrap();
        let b = layout_pass(&input, &params(), &per_char).unwrap();
        assert_eq!(a, b);
    }
}
