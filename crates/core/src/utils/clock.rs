//! Clock-time conversion between local text fields and wire seconds.
//!
//! The local store keeps search times and time limits as `"MM:SS"` /
//! `"MM:SS.hh"` text; the remote store keeps a numeric count of seconds.
//! A remote check constraint requires time limits and area counts to be
//! positive or absent, so zero and blank always encode as `None`.

/// Parse a clock value into seconds.
///
/// Accepts `"MM:SS"`, `"MM:SS.hh"` or a bare numeric seconds value.
/// Returns `None` for blank or unparseable input.
pub fn parse_clock(text: &str) -> Option<f64> {
    let value = text.trim();
    if value.is_empty() {
        return None;
    }

    match value.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes = minutes.trim().parse::<u32>().ok()?;
            let seconds = seconds.trim().parse::<f64>().ok()?;
            if !seconds.is_finite() || seconds < 0.0 {
                return None;
            }
            Some(f64::from(minutes) * 60.0 + seconds)
        }
        None => {
            let seconds = value.parse::<f64>().ok()?;
            if !seconds.is_finite() || seconds < 0.0 {
                return None;
            }
            Some(seconds)
        }
    }
}

/// Format seconds as `"MM:SS"`, with hundredths appended only when present.
pub fn format_clock(seconds: f64) -> String {
    let clamped = if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    };
    let hundredths = (clamped * 100.0).round() as i64;
    let minutes = hundredths / 6000;
    let whole_seconds = (hundredths % 6000) / 100;
    let fraction = hundredths % 100;
    if fraction == 0 {
        format!("{:02}:{:02}", minutes, whole_seconds)
    } else {
        format!("{:02}:{:02}.{:02}", minutes, whole_seconds, fraction)
    }
}

/// Keep a seconds value only when it is strictly positive.
pub fn positive_seconds(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Keep a count only when it is strictly positive.
pub fn positive_count(value: Option<i32>) -> Option<i32> {
    value.filter(|v| *v > 0)
}

/// Encode a local clock text field for the wire: blank, unparseable and
/// zero all become `None`, never `0`.
pub fn encode_clock_field(text: Option<&str>) -> Option<f64> {
    positive_seconds(text.and_then(parse_clock))
}

/// Decode wire seconds into the local text representation; zero or absent
/// becomes `None`.
pub fn decode_clock_field(seconds: Option<f64>) -> Option<String> {
    positive_seconds(seconds).map(format_clock)
}
