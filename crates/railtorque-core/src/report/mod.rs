//! Rendering of analysis reports: text table, JSON, SVG chart and HTML page.

mod chart;
mod html;
mod output;
mod table;

pub use chart::{ChartSeries, Marker, chart_series, render_chart};
pub use html::render_page;
pub use output::{format_fixed_f64, normalize_text_output, write_text_output};
pub use table::{TABLE_COLUMNS, render_table};

use crate::domain::{AlignError, AlignResult, AnalysisReport};

pub trait ReportRenderer {
    fn render(&self, report: &AnalysisReport) -> AlignResult<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JsonRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HtmlRenderer;

impl ReportRenderer for TableRenderer {
    fn render(&self, report: &AnalysisReport) -> AlignResult<String> {
        Ok(render_table(report))
    }
}

impl ReportRenderer for JsonRenderer {
    fn render(&self, report: &AnalysisReport) -> AlignResult<String> {
        render_json(report)
    }
}

impl ReportRenderer for HtmlRenderer {
    fn render(&self, report: &AnalysisReport) -> AlignResult<String> {
        Ok(render_page(Some(&report.settings), Ok(report)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Html,
}

impl OutputFormat {
    pub fn renderer(self) -> &'static dyn ReportRenderer {
        match self {
            Self::Table => &TableRenderer,
            Self::Json => &JsonRenderer,
            Self::Html => &HtmlRenderer,
        }
    }
}

pub fn render_json(report: &AnalysisReport) -> AlignResult<String> {
    serde_json::to_string_pretty(report).map_err(|error| {
        AlignError::internal(
            "SYS.JSON_RENDER",
            format!("failed to render analysis report as JSON: {}", error),
        )
    })
}

pub(crate) fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
