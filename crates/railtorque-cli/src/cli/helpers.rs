use super::CliError;
use anyhow::Context;
use railtorque_core::domain::{AlignError, AlignResult};
use railtorque_core::report::{normalize_text_output, write_text_output};
use railtorque_core::settings::{SettingsFile, load_settings_file};
use std::fs;
use std::io::Write;
use std::path::Path;

pub(super) fn read_input(path: &Path) -> AlignResult<Vec<u8>> {
    fs::read(path).map_err(|source| {
        AlignError::io_system(
            "IO.INPUT_READ",
            format!("failed to read input file '{}': {}", path.display(), source),
        )
    })
}

pub(super) fn load_config(path: Option<&Path>) -> AlignResult<Option<SettingsFile>> {
    path.map(|path| load_settings_file(path).map_err(AlignError::from))
        .transpose()
}

pub(super) fn write_output(path: &Path, content: &str) -> Result<(), CliError> {
    write_text_output(path, content).map_err(|source| {
        CliError::Compute(AlignError::io_system(
            "IO.OUTPUT_WRITE",
            format!("failed to write output '{}': {}", path.display(), source),
        ))
    })
}

pub(super) fn print_output(content: &str) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(normalize_text_output(content).as_bytes())
        .and_then(|()| stdout.flush())
        .context("failed to write to stdout")?;
    Ok(())
}
