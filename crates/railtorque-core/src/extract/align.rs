use crate::domain::errors::SEQUENCE_LENGTH_MISMATCH;
use crate::domain::{AlignError, AlignResult, AlignedSeries, AlignmentPolicy, MeasurementPoint};

/// Pairs positions with offsets index by index.
///
/// Offsets are authoritative: surplus positions are always dropped from the
/// back. Surplus offsets are dropped only under [`AlignmentPolicy::Symmetric`].
pub fn align_sequences(
    positions: &[u64],
    offsets: &[i64],
    policy: AlignmentPolicy,
) -> AlignResult<AlignedSeries> {
    if policy == AlignmentPolicy::TruncatePositions && offsets.len() > positions.len() {
        return Err(AlignError::input_validation(
            SEQUENCE_LENGTH_MISMATCH,
            format!(
                "offset line has {} values but position line has only {}",
                offsets.len(),
                positions.len()
            ),
        ));
    }

    let points = positions
        .iter()
        .zip(offsets)
        .map(|(&position, &offset)| MeasurementPoint { position, offset })
        .collect();

    Ok(AlignedSeries::from_parts(
        points,
        positions.len(),
        offsets.len(),
    ))
}
