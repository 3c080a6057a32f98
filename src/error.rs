// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error kinds shared by every module of the crate.
//!
//! All failures are local and synchronous: they signal caller misuse (an
//! impossible calendar field, a reversed interval, an unknown zone id) or
//! unreadable text. Absent input to the coercion layer is **not** an error;
//! it surfaces as `Ok(None)`.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TimeError>;

/// Errors produced by construction, interval, zone, parse and generator
/// operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    /// A date or time component is out of range, or the value falls outside
    /// the representable span.
    #[error("invalid calendar value: {0}")]
    InvalidCalendarValue(String),

    /// An interval (or era window) whose start lies after its end.
    #[error("invalid interval: start {start} is after end {end}")]
    InvalidInterval { start: String, end: String },

    /// The zone identifier or offset cannot be resolved.
    #[error("unknown time zone: {0}")]
    UnknownZone(String),

    /// No accepted text format matches the input.
    #[error("unable to parse {0:?} with any accepted format")]
    Parse(String),

    /// A generator configuration that cannot produce any value.
    #[error("invalid generator configuration: {0}")]
    InvalidGeneratorConfig(String),
}

impl TimeError {
    pub(crate) fn invalid_interval<T: std::fmt::Display>(start: &T, end: &T) -> Self {
        TimeError::InvalidInterval {
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let err = TimeError::UnknownZone("Mars/Olympus".into());
        assert_eq!(err.to_string(), "unknown time zone: Mars/Olympus");

        let err = TimeError::Parse("yesterday-ish".into());
        assert!(err.to_string().contains("\"yesterday-ish\""));
    }

    #[test]
    fn invalid_interval_renders_both_bounds() {
        let err = TimeError::invalid_interval(&5, &3);
        assert_eq!(err.to_string(), "invalid interval: start 5 is after end 3");
    }
}
