use super::CliError;
use super::helpers::*;
use clap::ValueEnum;
use railtorque_core::domain::{AlignResult, AlignmentPolicy, PositionLineRule};
use railtorque_core::extract::{ClassifiedLine, LineClassification};
use railtorque_core::report::{OutputFormat, render_chart, render_page};
use railtorque_core::service::{analyze_upload, inspect_upload};
use railtorque_core::settings::{AnalysisSettings, SettingsOverrides, resolve_settings};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(super) enum PositionRuleArg {
    /// First line with more than ten number groups
    DigitGroups,
    /// First line starting with "0 " that contains a comma
    ZeroComma,
}

impl From<PositionRuleArg> for PositionLineRule {
    fn from(value: PositionRuleArg) -> Self {
        match value {
            PositionRuleArg::DigitGroups => Self::DigitGroups,
            PositionRuleArg::ZeroComma => Self::ZeroComma,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(super) enum AlignmentArg {
    /// Truncate whichever sequence is longer
    Symmetric,
    /// Drop surplus positions; surplus offsets are an error
    TruncatePositions,
}

impl From<AlignmentArg> for AlignmentPolicy {
    fn from(value: AlignmentArg) -> Self {
        match value {
            AlignmentArg::Symmetric => Self::Symmetric,
            AlignmentArg::TruncatePositions => Self::TruncatePositions,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(super) enum FormatArg {
    Table,
    Json,
    /// Self-contained page with table and chart
    Html,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Table => Self::Table,
            FormatArg::Json => Self::Json,
            FormatArg::Html => Self::Html,
        }
    }
}

#[derive(clap::Args)]
pub(super) struct SettingsArgs {
    /// Number of clamps on the rail section
    #[arg(long, value_name = "N")]
    clamps: Option<String>,

    /// Clamp screw size in millimeters
    #[arg(long, value_name = "MM")]
    screw_size: Option<String>,

    /// Current clamp torque in pounds
    #[arg(long, value_name = "LBS", allow_hyphen_values = true)]
    default_torque: Option<String>,

    /// Rule used to find the position line
    #[arg(long, value_enum)]
    position_rule: Option<PositionRuleArg>,

    /// How sequences of different lengths are paired
    #[arg(long, value_enum)]
    alignment: Option<AlignmentArg>,

    /// JSON settings file; command-line flags take precedence
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl SettingsArgs {
    fn resolve(&self) -> AlignResult<AnalysisSettings> {
        let file = load_config(self.config.as_deref())?;
        let overrides = SettingsOverrides {
            clamps: self.clamps.clone(),
            screw_size: self.screw_size.clone(),
            default_torque: self.default_torque.clone(),
            position_rule: self.position_rule.map(Into::into),
            alignment: self.alignment.map(Into::into),
        };
        resolve_settings(file.as_ref(), &overrides)
    }
}

#[derive(clap::Args)]
pub(super) struct AnalyzeArgs {
    /// ASC export to analyze
    #[arg(value_name = "FILE")]
    input: PathBuf,

    #[command(flatten)]
    settings: SettingsArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = FormatArg::Table)]
    format: FormatArg,

    /// Write the result to this path instead of stdout
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,
}

#[derive(clap::Args)]
pub(super) struct ReportArgs {
    /// ASC export to analyze
    #[arg(value_name = "FILE")]
    input: PathBuf,

    #[command(flatten)]
    settings: SettingsArgs,

    /// HTML page output path
    #[arg(long, value_name = "PATH")]
    out: PathBuf,

    /// Also write the SVG chart to this path
    #[arg(long, value_name = "PATH")]
    chart: Option<PathBuf>,
}

#[derive(clap::Args)]
pub(super) struct InspectArgs {
    /// ASC export to inspect
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Only report this rule
    #[arg(long, value_enum)]
    position_rule: Option<PositionRuleArg>,
}

pub(super) fn run_analyze_command(args: AnalyzeArgs) -> Result<i32, CliError> {
    let settings = args.settings.resolve()?;
    let bytes = read_input(&args.input)?;
    let report = analyze_upload(&bytes, &settings)?;
    let rendered = OutputFormat::from(args.format).renderer().render(&report)?;

    match args.out {
        Some(path) => {
            write_output(&path, &rendered)?;
            info!(path = %path.display(), records = report.records.len(), "wrote analysis");
        }
        None => print_output(&rendered)?,
    }
    Ok(0)
}

pub(super) fn run_report_command(args: ReportArgs) -> Result<i32, CliError> {
    let settings = args.settings.resolve();
    let outcome = settings.as_ref().map_err(Clone::clone).and_then(|settings| {
        let bytes = read_input(&args.input)?;
        analyze_upload(&bytes, settings)
    });

    write_output(&args.out, &render_page(settings.as_ref().ok(), outcome.as_ref()))?;
    info!(path = %args.out.display(), success = outcome.is_ok(), "wrote result page");

    let report = outcome?;
    if let Some(chart_path) = args.chart {
        write_output(&chart_path, &render_chart(&report.records))?;
    }
    Ok(0)
}

pub(super) fn run_inspect_command(args: InspectArgs) -> Result<i32, CliError> {
    let bytes = read_input(&args.input)?;
    let rules = match args.position_rule {
        Some(rule) => vec![rule.into()],
        None => vec![PositionLineRule::DigitGroups, PositionLineRule::ZeroComma],
    };

    let mut lines = Vec::new();
    for rule in rules {
        let classification = inspect_upload(&bytes, rule)?;
        if lines.is_empty() {
            lines.push(format!("lines: {}", classification.line_count));
        }
        lines.push(describe_classification(&classification));
    }
    print_output(&lines.join("\n"))?;
    Ok(0)
}

fn describe_classification(classification: &LineClassification) -> String {
    let describe = |line: Option<&ClassifiedLine>| match line {
        Some(line) => format!("line {} ({} values)", line.number, line.digit_groups),
        None => "not found".to_string(),
    };

    format!(
        "{}: positions {}, offsets {}",
        classification.rule,
        describe(classification.position_line.as_ref()),
        describe(classification.offset_line.as_ref())
    )
}
