use super::output::format_fixed_f64;
use crate::domain::{AnalysisReport, Normalization};

pub const TABLE_COLUMNS: [&str; 7] = [
    "position_mm",
    "offset",
    "average_offset",
    "suggested_delta_lbs",
    "suggested_new_torque_lbs",
    "adjustment",
    "predicted_corrected_offset",
];

pub fn render_table(report: &AnalysisReport) -> String {
    let settings = &report.settings;
    let extraction = &report.extraction;
    let mut lines = Vec::with_capacity(report.records.len() + 7);

    lines.push("# rail torque analysis".to_string());
    lines.push(format!(
        "# clamps={} screw_size_mm={} default_torque_lbs={}",
        settings.clamp_count,
        settings.screw_size_mm,
        format_fixed_f64(settings.default_torque_lbs, 0, 2)
    ));
    lines.push(format!(
        "# position_rule={} position_line={} offset_line={}",
        extraction.position_rule, extraction.position_line, extraction.offset_line
    ));
    lines.push(format!(
        "# alignment={} positions={} offsets={} points={}",
        extraction.alignment,
        extraction.raw_position_count,
        extraction.raw_offset_count,
        extraction.aligned_count
    ));
    lines.push(match report.normalization {
        Normalization::Normal { max_abs_offset } => {
            format!("# normalization=normal max_abs_offset={}", max_abs_offset)
        }
        Normalization::AllZero => "# normalization=all-zero".to_string(),
    });

    let labels = report
        .records
        .iter()
        .map(|record| record.adjustment.label())
        .collect::<Vec<_>>();
    let label_width = labels
        .iter()
        .map(String::len)
        .chain(std::iter::once(TABLE_COLUMNS[5].len()))
        .max()
        .unwrap_or(0);

    lines.push(format!(
        "{:>11} {:>10} {:>14} {:>19} {:>24} {:<label_width$} {:>26}",
        TABLE_COLUMNS[0],
        TABLE_COLUMNS[1],
        TABLE_COLUMNS[2],
        TABLE_COLUMNS[3],
        TABLE_COLUMNS[4],
        TABLE_COLUMNS[5],
        TABLE_COLUMNS[6],
    ));

    for (record, label) in report.records.iter().zip(&labels) {
        lines.push(format!(
            "{:>11} {:>10} {:>14} {} {} {:<label_width$} {}",
            record.position,
            record.offset,
            record.average_offset,
            format_fixed_f64(record.suggested_delta, 19, 4),
            format_fixed_f64(record.suggested_new_torque, 24, 2),
            label,
            format_fixed_f64(record.predicted_corrected_offset, 26, 4),
        ));
    }

    lines.join("\n")
}
