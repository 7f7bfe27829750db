//! Offset-to-torque derivation.
//!
//! The largest offset magnitude in the series is mapped to a 10 lbs torque
//! change and every other point is scaled linearly against it. Positive
//! offsets call for less torque, negative offsets for more.

mod rounding;

pub use rounding::round_to_places;

use crate::domain::errors::EMPTY_SERIES;
use crate::domain::{
    AlignError, AlignResult, AlignedSeries, Adjustment, AnalysisRecord, Normalization,
};
use tracing::debug;

/// Torque change, in pounds, assigned to the largest offset magnitude.
pub const FULL_SCALE_DELTA_LBS: f64 = 10.0;
/// Share of the offset expected to remain after the adjustment is applied.
pub const RESIDUAL_OFFSET_FACTOR: f64 = 0.1;

const TORQUE_DECIMALS: usize = 2;
const LABEL_DECIMALS: usize = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct TorqueAnalysis {
    pub normalization: Normalization,
    pub records: Vec<AnalysisRecord>,
}

pub fn normalization_for(series: &AlignedSeries) -> Normalization {
    let max_abs_offset = series
        .points()
        .iter()
        .map(|point| point.offset.unsigned_abs())
        .max()
        .unwrap_or(0);

    if max_abs_offset == 0 {
        Normalization::AllZero
    } else {
        Normalization::Normal { max_abs_offset }
    }
}

pub fn suggested_delta(offset: i64, normalization: Normalization) -> f64 {
    match normalization {
        Normalization::Normal { max_abs_offset } => {
            offset as f64 / max_abs_offset as f64 * FULL_SCALE_DELTA_LBS
        }
        Normalization::AllZero => 0.0,
    }
}

/// New torque rounded to two decimals and floored at zero.
///
/// With a zero delta this is the default torque at two decimals, so a default
/// of `4.256` yields `4.26`.
pub fn suggested_new_torque(default_torque: f64, delta: f64) -> f64 {
    round_to_places(default_torque - delta, TORQUE_DECIMALS).max(0.0)
}

pub fn adjustment_for(delta: f64) -> Adjustment {
    let magnitude = round_to_places(delta, LABEL_DECIMALS).abs();
    if delta > 0.0 {
        Adjustment::Decrease(magnitude)
    } else if delta < 0.0 {
        Adjustment::Increase(magnitude)
    } else {
        Adjustment::NoneNeeded
    }
}

pub fn predicted_corrected_offset(offset: i64) -> f64 {
    offset as f64 * RESIDUAL_OFFSET_FACTOR
}

/// Builds one record per aligned point, in input order.
///
/// Fails only on an empty series; every other input yields finite values.
pub fn analyze(series: &AlignedSeries, default_torque: f64) -> AlignResult<TorqueAnalysis> {
    if series.is_empty() {
        return Err(AlignError::input_validation(
            EMPTY_SERIES,
            "no measurement points left to analyze after alignment",
        ));
    }

    let normalization = normalization_for(series);
    debug!(points = series.len(), ?normalization, "normalized offsets");

    let records = series
        .points()
        .iter()
        .map(|point| {
            let delta = suggested_delta(point.offset, normalization);
            AnalysisRecord {
                position: point.position,
                offset: point.offset,
                average_offset: point.offset,
                suggested_delta: delta,
                suggested_new_torque: suggested_new_torque(default_torque, delta),
                adjustment: adjustment_for(delta),
                predicted_corrected_offset: predicted_corrected_offset(point.offset),
            }
        })
        .collect();

    Ok(TorqueAnalysis {
        normalization,
        records,
    })
}
