mod align;
mod rules;

pub use align::align_sequences;
pub use rules::{LinePatterns, POSITION_DIGIT_GROUP_THRESHOLD};

use crate::document::{RawDocument, SourceLine};
use crate::domain::{AlignError, AlignResult, AlignedSeries, AlignmentPolicy, PositionLineRule};
use tracing::{debug, warn};

/// Sequences pulled from the two classified lines, before alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSequences {
    pub position_line: usize,
    pub offset_line: usize,
    pub positions: Vec<u64>,
    pub offsets: Vec<i64>,
}

/// Which lines each rule selected, without any numeric parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClassification {
    pub rule: PositionLineRule,
    pub line_count: usize,
    pub position_line: Option<ClassifiedLine>,
    pub offset_line: Option<ClassifiedLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub number: usize,
    pub digit_groups: usize,
}

/// Locates the position and offset rows of an instrument export.
#[derive(Debug, Clone)]
pub struct Extractor {
    rule: PositionLineRule,
    patterns: LinePatterns,
}

impl Extractor {
    pub fn new(rule: PositionLineRule) -> AlignResult<Self> {
        Ok(Self {
            rule,
            patterns: LinePatterns::compile()?,
        })
    }

    pub fn rule(&self) -> PositionLineRule {
        self.rule
    }

    pub fn classify(&self, document: &RawDocument) -> LineClassification {
        let describe = |line: &SourceLine| ClassifiedLine {
            number: line.number,
            digit_groups: self.patterns.digit_group_count(&line.text),
        };

        LineClassification {
            rule: self.rule,
            line_count: document.len(),
            position_line: self.find_position_line(document).map(describe),
            offset_line: self.find_offset_line(document).map(describe),
        }
    }

    pub fn extract(&self, document: &RawDocument) -> AlignResult<ExtractedSequences> {
        let position_line = self.find_position_line(document).ok_or_else(|| {
            AlignError::missing_position_data(match self.rule {
                PositionLineRule::DigitGroups => format!(
                    "no position data: none of {} lines has more than {} number groups",
                    document.len(),
                    POSITION_DIGIT_GROUP_THRESHOLD
                ),
                PositionLineRule::ZeroComma => format!(
                    "no position data: none of {} lines starts with '0 ' and contains a comma",
                    document.len()
                ),
            })
        })?;
        let offset_line = self.find_offset_line(document).ok_or_else(|| {
            AlignError::missing_offset_data(format!(
                "no offset data: none of {} lines starts with two zero fields followed by a number",
                document.len()
            ))
        })?;

        let positions = self.patterns.unsigned_runs(position_line)?;
        let offsets = self.patterns.signed_runs(offset_line)?;
        debug!(
            rule = %self.rule,
            position_line = position_line.number,
            offset_line = offset_line.number,
            positions = positions.len(),
            offsets = offsets.len(),
            "classified measurement lines"
        );

        Ok(ExtractedSequences {
            position_line: position_line.number,
            offset_line: offset_line.number,
            positions,
            offsets,
        })
    }

    pub fn extract_aligned(
        &self,
        document: &RawDocument,
        policy: AlignmentPolicy,
    ) -> AlignResult<(ExtractedSequences, AlignedSeries)> {
        let sequences = self.extract(document)?;
        let series = align_sequences(&sequences.positions, &sequences.offsets, policy)?;

        if series.dropped_positions() > 0 || series.dropped_offsets() > 0 {
            warn!(
                policy = %policy,
                dropped_positions = series.dropped_positions(),
                dropped_offsets = series.dropped_offsets(),
                "sequence lengths differ; surplus samples dropped"
            );
        }

        Ok((sequences, series))
    }

    fn find_position_line<'a>(&self, document: &'a RawDocument) -> Option<&'a SourceLine> {
        document
            .lines()
            .iter()
            .find(|line| self.patterns.is_position_line(self.rule, &line.text))
    }

    fn find_offset_line<'a>(&self, document: &'a RawDocument) -> Option<&'a SourceLine> {
        document
            .lines()
            .iter()
            .find(|line| self.patterns.is_offset_line(&line.text))
    }
}
