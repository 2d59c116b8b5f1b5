//! Optional input checks for event editing flows.
//!
//! The events store accepts any request; callers that want form-level
//! feedback run these checks first.

use crate::model::event::CreateEventRequest;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

const TITLE_MIN_CHARS: usize = 3;
const TITLE_MAX_CHARS: usize = 100;

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[A-Fa-f0-9]{6}$").expect("valid hex color regex"));

/// Event input validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    EmptyTitle,
    TitleTooShort { min: usize },
    TitleTooLong { max: usize },
    InvalidDate(String),
    EndBeforeStart,
    InvalidColor(String),
}

impl EventValidationError {
    /// Form field the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::TitleTooShort { .. } | Self::TitleTooLong { .. } => "title",
            Self::InvalidDate(_) | Self::EndBeforeStart => "endDate",
            Self::InvalidColor(_) => "color",
        }
    }
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "event title is required"),
            Self::TitleTooShort { min } => {
                write!(f, "event title must be at least {min} characters")
            }
            Self::TitleTooLong { max } => {
                write!(f, "event title must be at most {max} characters")
            }
            Self::InvalidDate(value) => write!(f, "invalid date `{value}`"),
            Self::EndBeforeStart => write!(f, "event end must not be earlier than start"),
            Self::InvalidColor(value) => write!(f, "invalid color `{value}`; expected #RRGGBB"),
        }
    }
}

impl Error for EventValidationError {}

pub fn validate_title(title: &str) -> Result<(), EventValidationError> {
    if title.trim().is_empty() {
        return Err(EventValidationError::EmptyTitle);
    }
    let chars = title.chars().count();
    if chars < TITLE_MIN_CHARS {
        return Err(EventValidationError::TitleTooShort {
            min: TITLE_MIN_CHARS,
        });
    }
    if chars > TITLE_MAX_CHARS {
        return Err(EventValidationError::TitleTooLong {
            max: TITLE_MAX_CHARS,
        });
    }
    Ok(())
}

/// Checks both bounds parse and `start <= end`.
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` and plain dates.
pub fn validate_date_range(start: &str, end: &str) -> Result<(), EventValidationError> {
    let start_at = parse_timestamp(start)?;
    let end_at = parse_timestamp(end)?;
    if start_at > end_at {
        return Err(EventValidationError::EndBeforeStart);
    }
    Ok(())
}

pub fn validate_hex_color(color: &str) -> bool {
    HEX_COLOR_RE.is_match(color)
}

/// Runs every check against a create request.
pub fn validate_create_request(request: &CreateEventRequest) -> Result<(), EventValidationError> {
    validate_title(&request.title)?;
    validate_date_range(&request.start_date, &request.end_date)?;
    if let Some(color) = &request.color {
        if !validate_hex_color(color) {
            return Err(EventValidationError::InvalidColor(color.clone()));
        }
    }
    Ok(())
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime, EventValidationError> {
    let trimmed = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.naive_utc());
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(parsed);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| EventValidationError::InvalidDate(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{
        validate_create_request, validate_date_range, validate_hex_color, validate_title,
        EventValidationError,
    };
    use crate::model::event::CreateEventRequest;

    #[test]
    fn title_bounds_are_enforced() {
        assert_eq!(validate_title("   "), Err(EventValidationError::EmptyTitle));
        assert!(matches!(
            validate_title("ab"),
            Err(EventValidationError::TitleTooShort { min: 3 })
        ));
        assert!(validate_title(&"x".repeat(101)).is_err());
        assert!(validate_title("Dentist").is_ok());
    }

    #[test]
    fn date_range_rejects_reversed_and_unparseable_bounds() {
        assert!(validate_date_range("2024-01-10T10:00:00Z", "2024-01-10T11:00:00+00:00").is_ok());
        assert!(validate_date_range("2024-01-10", "2024-01-10").is_ok());
        assert_eq!(
            validate_date_range("2024-01-12", "2024-01-10"),
            Err(EventValidationError::EndBeforeStart)
        );
        assert!(matches!(
            validate_date_range("tomorrow", "2024-01-10"),
            Err(EventValidationError::InvalidDate(_))
        ));
    }

    #[test]
    fn hex_color_requires_six_digits() {
        assert!(validate_hex_color("#2196F3"));
        assert!(!validate_hex_color("2196F3"));
        assert!(!validate_hex_color("#FFF"));
    }

    #[test]
    fn create_request_reports_color_field() {
        let mut request = CreateEventRequest::new("Review", "2024-01-10", "2024-01-11");
        request.color = Some("blue".to_string());
        let err = validate_create_request(&request).unwrap_err();
        assert_eq!(err.field(), "color");
    }
}
