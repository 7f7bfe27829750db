/// Rounds the exact binary value of `value` to `places` decimal digits.
///
/// Exact ties go to the even digit, so `0.25` becomes `0.2` and `2.675`
/// (stored just below the tie) becomes `2.67`.
pub fn round_to_places(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let rounded = format!("{value:.places$}").parse::<f64>().unwrap_or(value);
    if rounded == 0.0 { 0.0 } else { rounded }
}
