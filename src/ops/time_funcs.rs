use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("timestamp '{0}' must have the form HH:MM:SS")]
    Shape(String),
    #[error("field '{field}' of timestamp '{input}' is not a valid number")]
    Field { input: String, field: String },
    #[error("minutes and seconds of timestamp '{0}' must be below 60")]
    OutOfRange(String),
    #[error("timestamp '{0}' is too large")]
    TooLarge(String),
}

/// Largest second count an `f64` holds exactly, so `format_time` can round-trip it.
pub const MAX_TIMESTAMP_SECONDS: u64 = 1 << 53;

/// Converts a fixed "HH:MM:SS" timestamp into whole seconds.
///
/// Hours take at least two digits, minutes and seconds exactly two. Values that
/// would not format back to the same string (like `00:75:00`) are rejected.
pub fn parse_timestamp(input: &str) -> Result<u64, TimeParseError> {
    let fields: Vec<&str> = input.split(':').collect();
    let [hours, minutes, seconds] = fields.as_slice() else {
        return Err(TimeParseError::Shape(input.to_string()));
    };
    if hours.len() < 2 || minutes.len() != 2 || seconds.len() != 2 {
        return Err(TimeParseError::Shape(input.to_string()));
    }

    let number = |field: &str| -> Result<u64, TimeParseError> {
        if !field.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimeParseError::Field {
                input: input.to_string(),
                field: field.to_string(),
            });
        }
        field.parse().map_err(|_| TimeParseError::Field {
            input: input.to_string(),
            field: field.to_string(),
        })
    };

    let (h, m, s) = (number(*hours)?, number(*minutes)?, number(*seconds)?);
    if m >= 60 || s >= 60 {
        return Err(TimeParseError::OutOfRange(input.to_string()));
    }
    h.checked_mul(3600)
        .and_then(|v| v.checked_add(m * 60 + s))
        .filter(|&total| total <= MAX_TIMESTAMP_SECONDS)
        .ok_or_else(|| TimeParseError::TooLarge(input.to_string()))
}

/// Formats seconds as "HH:MM:SS", flooring every component.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}
