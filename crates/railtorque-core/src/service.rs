//! One-shot pipeline entry points: decode, extract, align, analyze.
//!
//! Every call owns its document and results; nothing is retained between
//! calls.

use crate::analysis::analyze;
use crate::document::RawDocument;
use crate::domain::{AlignResult, AnalysisReport, ExtractionSummary, PositionLineRule};
use crate::extract::{Extractor, LineClassification};
use crate::settings::AnalysisSettings;
use tracing::info;

pub fn analyze_document(
    document: &RawDocument,
    settings: &AnalysisSettings,
) -> AlignResult<AnalysisReport> {
    let extractor = Extractor::new(settings.position_rule)?;
    let (sequences, series) = extractor.extract_aligned(document, settings.alignment)?;
    let analysis = analyze(&series, settings.default_torque_lbs)?;

    info!(
        lines = document.len(),
        points = analysis.records.len(),
        rule = %settings.position_rule,
        "analysis complete"
    );

    Ok(AnalysisReport {
        settings: *settings,
        extraction: ExtractionSummary {
            position_rule: settings.position_rule,
            position_line: sequences.position_line,
            offset_line: sequences.offset_line,
            alignment: settings.alignment,
            raw_position_count: series.raw_position_count(),
            raw_offset_count: series.raw_offset_count(),
            aligned_count: series.len(),
        },
        normalization: analysis.normalization,
        records: analysis.records,
    })
}

/// Runs the whole pipeline over an uploaded byte stream.
pub fn analyze_upload(bytes: &[u8], settings: &AnalysisSettings) -> AlignResult<AnalysisReport> {
    analyze_document(&RawDocument::from_bytes(bytes), settings)
}

/// Reports which lines `rule` would select, without parsing any numbers.
///
/// Digit-group counts on the selected lines equal the raw sequence lengths.
pub fn inspect_upload(bytes: &[u8], rule: PositionLineRule) -> AlignResult<LineClassification> {
    let document = RawDocument::from_bytes(bytes);
    Ok(Extractor::new(rule)?.classify(&document))
}
