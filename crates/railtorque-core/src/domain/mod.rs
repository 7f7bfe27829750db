pub mod errors;

pub use errors::{AlignError, AlignErrorCategory, AlignResult};

use crate::settings::AnalysisSettings;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Strategy used to pick the line that holds the position samples.
///
/// Instrument exports seen in the field disagree on which cue identifies the
/// position row, so both cues are kept as named variants instead of being
/// merged into one heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PositionLineRule {
    /// First line with more than ten digit groups.
    #[default]
    DigitGroups,
    /// First line whose trimmed text starts with `"0 "` and contains a comma.
    ZeroComma,
}

impl PositionLineRule {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DigitGroups => "digit-groups",
            Self::ZeroComma => "zero-comma",
        }
    }
}

impl Display for PositionLineRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

impl FromStr for PositionLineRule {
    type Err = AlignError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "digit-groups" => Ok(Self::DigitGroups),
            "zero-comma" => Ok(Self::ZeroComma),
            other => Err(AlignError::configuration_parse(format!(
                "unknown position rule '{}'; expected 'digit-groups' or 'zero-comma'",
                other
            ))),
        }
    }
}

/// How position and offset sequences of different lengths are paired up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignmentPolicy {
    /// Truncate whichever sequence is longer.
    #[default]
    Symmetric,
    /// Only surplus positions are dropped; surplus offsets are an error.
    TruncatePositions,
}

impl AlignmentPolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Symmetric => "symmetric",
            Self::TruncatePositions => "truncate-positions",
        }
    }
}

impl Display for AlignmentPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

impl FromStr for AlignmentPolicy {
    type Err = AlignError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "symmetric" => Ok(Self::Symmetric),
            "truncate-positions" => Ok(Self::TruncatePositions),
            other => Err(AlignError::configuration_parse(format!(
                "unknown alignment policy '{}'; expected 'symmetric' or 'truncate-positions'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MeasurementPoint {
    pub position: u64,
    pub offset: i64,
}

/// Position/offset pairs after alignment. Equal length holds by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedSeries {
    points: Vec<MeasurementPoint>,
    raw_position_count: usize,
    raw_offset_count: usize,
}

impl AlignedSeries {
    pub(crate) fn from_parts(
        points: Vec<MeasurementPoint>,
        raw_position_count: usize,
        raw_offset_count: usize,
    ) -> Self {
        Self {
            points,
            raw_position_count,
            raw_offset_count,
        }
    }

    pub fn points(&self) -> &[MeasurementPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn raw_position_count(&self) -> usize {
        self.raw_position_count
    }

    pub fn raw_offset_count(&self) -> usize {
        self.raw_offset_count
    }

    pub fn dropped_positions(&self) -> usize {
        self.raw_position_count - self.points.len()
    }

    pub fn dropped_offsets(&self) -> usize {
        self.raw_offset_count - self.points.len()
    }
}

/// Outcome of scanning the offsets for the largest magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Normalization {
    #[serde(rename_all = "camelCase")]
    Normal { max_abs_offset: u64 },
    AllZero,
}

/// Torque instruction derived from the sign of the suggested delta.
///
/// Serialized as the label shown to the technician.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    Decrease(f64),
    Increase(f64),
    NoneNeeded,
}

impl Adjustment {
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl Display for Adjustment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decrease(pounds) => write!(f, "decrease {:.1} lbs", pounds),
            Self::Increase(pounds) => write!(f, "increase {:.1} lbs", pounds),
            Self::NoneNeeded => f.write_str("no adjustment needed"),
        }
    }
}

impl Serialize for Adjustment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub position: u64,
    pub offset: i64,
    pub average_offset: i64,
    pub suggested_delta: f64,
    pub suggested_new_torque: f64,
    #[serde(rename = "adjustmentLabel")]
    pub adjustment: Adjustment,
    pub predicted_corrected_offset: f64,
}

/// Where the extractor found its data and how much was dropped on alignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionSummary {
    pub position_rule: PositionLineRule,
    pub position_line: usize,
    pub offset_line: usize,
    pub alignment: AlignmentPolicy,
    pub raw_position_count: usize,
    pub raw_offset_count: usize,
    pub aligned_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub settings: AnalysisSettings,
    pub extraction: ExtractionSummary,
    pub normalization: Normalization,
    pub records: Vec<AnalysisRecord>,
}
