use chrono::{LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

// `%.f` keeps fractional seconds when the input has them and prints nothing
// when it doesn't, so the output stays in the input's textual format.
const WALL_CLOCK_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

#[derive(Debug, PartialEq, Error)]
pub enum TimestampError {
    #[error("cannot parse timestamp '{0}'")]
    Unparseable(String),
    #[error("local time '{0}' is ambiguous in {1} (clocks roll back at that instant)")]
    AmbiguousLocalTime(String, Tz),
    #[error("local time '{0}' does not exist in {1} (clocks jump forward over it)")]
    NonexistentLocalTime(String, Tz),
}

/// Converts one timestamp value from `source` to `target`, preserving the
/// absolute instant while changing the wall-clock representation.
///
/// Two value shapes are accepted:
/// - wall-clock text (`2024-03-10 01:30:00`, optional fractional seconds),
///   interpreted in `source` and re-serialized in the same format;
/// - all-digit epoch milliseconds, which already name an absolute instant and
///   are rendered as wall-clock text in `target`.
///
/// Empty values pass through unchanged. Wall-clock values that are ambiguous
/// or nonexistent in `source` due to a DST transition are rejected rather
/// than silently resolved.
pub fn convert(value: &str, source: Tz, target: Tz) -> Result<String, TimestampError> {
    if value.is_empty() {
        return Ok(String::new());
    }

    if value.bytes().all(|b| b.is_ascii_digit()) {
        return convert_epoch_millis(value, target);
    }

    let naive = NaiveDateTime::parse_from_str(value, WALL_CLOCK_FORMAT)
        .map_err(|_| TimestampError::Unparseable(value.to_string()))?;

    let instant = match source.from_local_datetime(&naive) {
        LocalResult::Single(instant) => instant,
        LocalResult::Ambiguous(_, _) => {
            return Err(TimestampError::AmbiguousLocalTime(value.to_string(), source))
        }
        LocalResult::None => {
            return Err(TimestampError::NonexistentLocalTime(value.to_string(), source))
        }
    };

    Ok(instant
        .with_timezone(&target)
        .format(WALL_CLOCK_FORMAT)
        .to_string())
}

fn convert_epoch_millis(value: &str, target: Tz) -> Result<String, TimestampError> {
    let millis: i64 = value
        .parse()
        .map_err(|_| TimestampError::Unparseable(value.to_string()))?;

    match Utc.timestamp_millis_opt(millis) {
        LocalResult::Single(instant) => Ok(instant
            .with_timezone(&target)
            .format(WALL_CLOCK_FORMAT)
            .to_string()),
        _ => Err(TimestampError::Unparseable(value.to_string())),
    }
}
