// User-facing rendering of engine numbers, kept at the interface boundary so
// the comparison code never thinks about presentation.

/// Renders a millisecond time as `m:ss.mmm`.
pub fn format_time(ms: f64) -> String {
    let total = ms.round() as i64;
    let (sign, total) = if total < 0 { ("-", -total) } else { ("", total) };

    let minutes = total / 60_000;
    let seconds = (total % 60_000) / 1_000;
    let millis = total % 1_000;

    format!("{sign}{minutes}:{seconds:02}.{millis:03}")
}

/// Renders a millisecond gap with an explicit sign.
pub fn format_time_diff(ms: f64) -> String {
    if ms < 0.0 {
        format!("-{}", format_time(-ms))
    } else {
        format!("+{}", format_time(ms))
    }
}

/// Renders a normalized accumulator gap (`raw / divisor`) with four decimals,
/// `+`-prefixed when positive.
pub fn format_average_diff(raw: f64, divisor: f64) -> String {
    let value = raw / divisor;
    if value > 0.0 {
        format!("+{value:.4}")
    } else {
        format!("{value:.4}")
    }
}

/// Same as [`format_average_diff`] but as a percentage, for the record ratio.
pub fn format_ratio_diff(raw: f64, divisor: f64) -> String {
    let value = raw / divisor * 100.0;
    if value > 0.0 {
        format!("+{value:.4}%")
    } else {
        format!("{value:.4}%")
    }
}
