use super::chart::render_chart;
use super::escape_markup;
use super::output::format_fixed_f64;
use super::table::TABLE_COLUMNS;
use crate::domain::{AlignError, AnalysisReport, Normalization};
use crate::settings::AnalysisSettings;
use std::fmt::Write as _;

const PAGE_TITLE: &str = "Rail alignment torque analysis";

const STYLE: &str = "body { font-family: sans-serif; margin: 2em; }\n\
table { border-collapse: collapse; }\n\
th, td { border: 1px solid #cccccc; padding: 4px 8px; text-align: right; }\n\
td.label { text-align: left; }\n\
.error { color: #b00020; font-weight: bold; }\n";

/// Renders the result page for one analysis run.
///
/// Settings are echoed whenever they parsed, so a failed run still shows what
/// was submitted. A settings failure leaves only the error message.
pub fn render_page(
    settings: Option<&AnalysisSettings>,
    outcome: Result<&AnalysisReport, &AlignError>,
) -> String {
    let mut page = String::new();
    let _ = writeln!(page, "<!DOCTYPE html>");
    let _ = writeln!(page, "<html lang=\"en\">");
    let _ = writeln!(page, "<head>");
    let _ = writeln!(page, "<meta charset=\"utf-8\">");
    let _ = writeln!(page, "<title>{}</title>", PAGE_TITLE);
    let _ = writeln!(page, "<style>\n{}</style>", STYLE);
    let _ = writeln!(page, "</head>");
    let _ = writeln!(page, "<body>");
    let _ = writeln!(page, "<h1>{}</h1>", PAGE_TITLE);

    if let Some(settings) = settings {
        push_settings(&mut page, settings);
    }

    match outcome {
        Ok(report) => {
            push_summary(&mut page, report);
            push_records(&mut page, report);
            let _ = writeln!(page, "<h2>Chart</h2>");
            page.push_str(&render_chart(&report.records));
        }
        Err(error) => {
            let _ = writeln!(
                page,
                "<p class=\"error\">[{}] {}</p>",
                escape_markup(error.code()),
                escape_markup(error.message())
            );
        }
    }

    let _ = writeln!(page, "</body>");
    let _ = writeln!(page, "</html>");
    page
}

fn push_settings(page: &mut String, settings: &AnalysisSettings) {
    let _ = writeln!(page, "<h2>Settings</h2>");
    let _ = writeln!(page, "<ul>");
    let _ = writeln!(page, "<li>Clamps: {}</li>", settings.clamp_count);
    let _ = writeln!(page, "<li>Screw size: {} mm</li>", settings.screw_size_mm);
    let _ = writeln!(
        page,
        "<li>Default torque: {} lbs</li>",
        format_fixed_f64(settings.default_torque_lbs, 0, 2)
    );
    let _ = writeln!(page, "<li>Position rule: {}</li>", settings.position_rule);
    let _ = writeln!(page, "<li>Alignment: {}</li>", settings.alignment);
    let _ = writeln!(page, "</ul>");
}

fn push_summary(page: &mut String, report: &AnalysisReport) {
    let extraction = &report.extraction;
    let _ = writeln!(
        page,
        "<p>Positions from line {}, offsets from line {}; {} positions, {} offsets, {} points analyzed.</p>",
        extraction.position_line,
        extraction.offset_line,
        extraction.raw_position_count,
        extraction.raw_offset_count,
        extraction.aligned_count
    );
    if report.normalization == Normalization::AllZero {
        let _ = writeln!(page, "<p>All offsets are zero; no adjustment is needed.</p>");
    }
}

fn push_records(page: &mut String, report: &AnalysisReport) {
    let _ = writeln!(page, "<h2>Results</h2>");
    let _ = writeln!(page, "<table>");
    let header = TABLE_COLUMNS
        .iter()
        .map(|column| format!("<th>{}</th>", column))
        .collect::<String>();
    let _ = writeln!(page, "<tr>{}</tr>", header);

    for record in &report.records {
        let _ = writeln!(
            page,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.4}</td><td>{:.2}</td><td class=\"label\">{}</td><td>{:.4}</td></tr>",
            record.position,
            record.offset,
            record.average_offset,
            record.suggested_delta,
            record.suggested_new_torque,
            escape_markup(&record.adjustment.label()),
            record.predicted_corrected_offset
        );
    }
    let _ = writeln!(page, "</table>");
}

#[cfg(test)]
mod tests {
    use super::render_page;
    use crate::domain::AlignError;
    use crate::report::tests::sample_report;

    #[test]
    fn success_page_embeds_table_and_chart() {
        let report = sample_report();
        let page = render_page(Some(&report.settings), Ok(&report));

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<li>Clamps: 4</li>"));
        assert!(page.contains("<li>Screw size: 8 mm</li>"));
        assert_eq!(page.matches("<tr>").count(), report.records.len() + 1);
        assert!(page.contains("decrease 10.0 lbs"));
        assert!(page.contains("<svg"));
        assert!(!page.contains("class=\"error\""));
    }

    #[test]
    fn failure_page_shows_escaped_message_without_results() {
        let report = sample_report();
        let error = AlignError::missing_offset_data("no offset data in <upload> & friends");
        let page = render_page(Some(&report.settings), Err(&error));

        assert!(page.contains("<li>Default torque: 5.00 lbs</li>"));
        assert!(page.contains("[INPUT.MISSING_OFFSET_DATA]"));
        assert!(page.contains("&lt;upload&gt; &amp; friends"));
        assert!(!page.contains("<table>"));
        assert!(!page.contains("<svg"));
    }

    #[test]
    fn settings_failure_page_has_no_settings_list() {
        let error = AlignError::configuration_parse("clamps must be a positive integer, got 'four'");
        let page = render_page(None, Err(&error));

        assert!(!page.contains("<h2>Settings</h2>"));
        assert!(page.contains("[INPUT.CONFIGURATION_PARSE] clamps must be a positive integer"));
        assert!(page.contains("got &#39;four&#39;"));
        assert!(page.trim_end().ends_with("</html>"));
    }
}
