// Turbine query domain model
use chrono::NaiveDateTime;
use thiserror::Error;

/// Timestamp format used everywhere on the wire: day-first, 24-hour,
/// comma-space separator before the time ("31.12.2016, 23:50").
pub const WIRE_TIME_FORMAT: &str = "%d.%m.%Y, %H:%M";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    // The original UI surfaced this exact message whether the turbine id
    // or a time bound was missing; that behavior is kept as-is.
    #[error("Turbine ID is required")]
    MissingField,
}

/// A fully validated request for one turbine's samples in a time window.
/// Constructing one is the only way to reach the data service, so a
/// query with a missing field can never produce a network call.
#[derive(Debug, Clone, PartialEq)]
pub struct TurbineQuery {
    pub turbine_id: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TurbineQuery {
    pub fn new(turbine_id: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            turbine_id: turbine_id.into(),
            start,
            end,
        }
    }

    /// Validate raw form input. The time bounds must already be in the
    /// wire format; anything unset or unparseable rejects the attempt
    /// locally.
    pub fn parse(turbine_id: &str, start: &str, end: &str) -> Result<Self, ValidationError> {
        let turbine_id = turbine_id.trim();
        if turbine_id.is_empty() {
            return Err(ValidationError::MissingField);
        }
        let start = NaiveDateTime::parse_from_str(start.trim(), WIRE_TIME_FORMAT)
            .map_err(|_| ValidationError::MissingField)?;
        let end = NaiveDateTime::parse_from_str(end.trim(), WIRE_TIME_FORMAT)
            .map_err(|_| ValidationError::MissingField)?;
        Ok(Self::new(turbine_id, start, end))
    }

    pub fn start_param(&self) -> String {
        self.start.format(WIRE_TIME_FORMAT).to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format(WIRE_TIME_FORMAT).to_string()
    }
}
