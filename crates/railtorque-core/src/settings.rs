//! Analysis configuration: form-style field parsing and the JSON settings file.
//!
//! Clamp count and screw size are validated and echoed in every report but do
//! not enter the torque computation.

use crate::domain::{AlignError, AlignResult, AlignmentPolicy, PositionLineRule};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CLAMP_COUNT: u32 = 1;
pub const DEFAULT_SCREW_SIZE_MM: u32 = 6;
pub const DEFAULT_TORQUE_LBS: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSettings {
    pub clamp_count: u32,
    pub screw_size_mm: u32,
    pub default_torque_lbs: f64,
    pub position_rule: PositionLineRule,
    pub alignment: AlignmentPolicy,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            clamp_count: DEFAULT_CLAMP_COUNT,
            screw_size_mm: DEFAULT_SCREW_SIZE_MM,
            default_torque_lbs: DEFAULT_TORQUE_LBS,
            position_rule: PositionLineRule::default(),
            alignment: AlignmentPolicy::default(),
        }
    }
}

impl AnalysisSettings {
    pub fn new(clamp_count: u32, screw_size_mm: u32, default_torque_lbs: f64) -> AlignResult<Self> {
        if clamp_count == 0 {
            return Err(AlignError::configuration_parse(
                "clamps must be a positive integer, got '0'",
            ));
        }
        if screw_size_mm == 0 {
            return Err(AlignError::configuration_parse(
                "screw_size must be a positive integer, got '0'",
            ));
        }
        if !default_torque_lbs.is_finite() {
            return Err(AlignError::configuration_parse(format!(
                "default_torque must be a finite number, got '{}'",
                default_torque_lbs
            )));
        }

        Ok(Self {
            clamp_count,
            screw_size_mm,
            default_torque_lbs,
            ..Self::default()
        })
    }

    /// Parses the three raw values submitted alongside an upload.
    pub fn from_form_fields(
        clamps: &str,
        screw_size: &str,
        default_torque: &str,
    ) -> AlignResult<Self> {
        Self::new(
            parse_positive_field("clamps", clamps)?,
            parse_positive_field("screw_size", screw_size)?,
            parse_torque_field("default_torque", default_torque)?,
        )
    }

    pub fn with_position_rule(mut self, rule: PositionLineRule) -> Self {
        self.position_rule = rule;
        self
    }

    pub fn with_alignment(mut self, alignment: AlignmentPolicy) -> Self {
        self.alignment = alignment;
        self
    }
}

pub fn parse_positive_field(field: &str, raw: &str) -> AlignResult<u32> {
    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(AlignError::configuration_parse(format!(
            "{} must be a positive integer, got '{}'",
            field, raw
        ))),
    }
}

pub fn parse_torque_field(field: &str, raw: &str) -> AlignResult<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(AlignError::configuration_parse(format!(
            "{} must be a number of pounds, got '{}'",
            field, raw
        ))),
    }
}

/// Optional defaults read from a JSON file; any key may be omitted.
///
/// Keys match the serialized [`AnalysisSettings`], so a report's settings
/// block can be saved and reused as a settings file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SettingsFile {
    pub clamp_count: Option<u32>,
    pub screw_size_mm: Option<u32>,
    pub default_torque_lbs: Option<f64>,
    pub position_rule: Option<PositionLineRule>,
    pub alignment: Option<AlignmentPolicy>,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsFileError {
    #[error("failed to read settings file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl From<SettingsFileError> for AlignError {
    fn from(error: SettingsFileError) -> Self {
        match &error {
            SettingsFileError::Read { .. } => AlignError::io_system("IO.SETTINGS_READ", error.to_string()),
            SettingsFileError::Parse { .. } => AlignError::configuration_parse(error.to_string()),
        }
    }
}

pub fn load_settings_file(path: impl AsRef<Path>) -> Result<SettingsFile, SettingsFileError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| SettingsFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&source).map_err(|source| SettingsFileError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Raw values supplied on the command line; they win over the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub clamps: Option<String>,
    pub screw_size: Option<String>,
    pub default_torque: Option<String>,
    pub position_rule: Option<PositionLineRule>,
    pub alignment: Option<AlignmentPolicy>,
}

pub fn resolve_settings(
    file: Option<&SettingsFile>,
    overrides: &SettingsOverrides,
) -> AlignResult<AnalysisSettings> {
    let file = file.cloned().unwrap_or_default();

    let clamp_count = match overrides.clamps.as_deref() {
        Some(raw) => parse_positive_field("clamps", raw)?,
        None => file.clamp_count.unwrap_or(DEFAULT_CLAMP_COUNT),
    };
    let screw_size_mm = match overrides.screw_size.as_deref() {
        Some(raw) => parse_positive_field("screw_size", raw)?,
        None => file.screw_size_mm.unwrap_or(DEFAULT_SCREW_SIZE_MM),
    };
    let default_torque_lbs = match overrides.default_torque.as_deref() {
        Some(raw) => parse_torque_field("default_torque", raw)?,
        None => file.default_torque_lbs.unwrap_or(DEFAULT_TORQUE_LBS),
    };

    let position_rule = overrides
        .position_rule
        .or(file.position_rule)
        .unwrap_or_default();
    let alignment = overrides.alignment.or(file.alignment).unwrap_or_default();

    Ok(AnalysisSettings::new(clamp_count, screw_size_mm, default_torque_lbs)?
        .with_position_rule(position_rule)
        .with_alignment(alignment))
}
