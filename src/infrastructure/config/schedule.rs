//! Broadcast schedule configuration.

use std::time::Duration;

use chrono::{FixedOffset, NaiveTime};
use serde::Deserialize;

use crate::error::{ConfigError, Result};
use crate::infrastructure::orchestration::scheduler::Cadence;

/// When the timer trigger fires.
///
/// `interval_secs`, when set, takes precedence over `daily_at`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Local wall-clock time, `HH:MM`.
    pub daily_at: String,
    /// Offset of the subscribers' timezone from UTC (default: 7, ICT).
    pub utc_offset_hours: i32,
    /// Fixed interval between cycles, for testing.
    pub interval_secs: Option<u64>,
    /// A cycle still running after this long is abandoned.
    pub cycle_timeout_secs: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            daily_at: "08:00".into(),
            utc_offset_hours: 7,
            interval_secs: None,
            cycle_timeout_secs: 300,
        }
    }
}

impl ScheduleConfig {
    /// Subscribers' timezone.
    ///
    /// # Errors
    ///
    /// Returns an error if the offset is outside -12..=14 hours.
    pub fn offset(&self) -> Result<FixedOffset> {
        if !(-12..=14).contains(&self.utc_offset_hours) {
            return Err(ConfigError::InvalidValue {
                field: "utc_offset_hours",
                reason: "must be between -12 and 14".to_string(),
            }
            .into());
        }
        FixedOffset::east_opt(self.utc_offset_hours * 3600).ok_or_else(|| {
            ConfigError::InvalidValue {
                field: "utc_offset_hours",
                reason: "not a valid offset".to_string(),
            }
            .into()
        })
    }

    /// Parsed trigger cadence.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero interval, a malformed `daily_at` or an
    /// out-of-range offset.
    pub fn cadence(&self) -> Result<Cadence> {
        if let Some(secs) = self.interval_secs {
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "interval_secs",
                    reason: "must be greater than 0".to_string(),
                }
                .into());
            }
            return Ok(Cadence::Every(Duration::from_secs(secs)));
        }

        let at = NaiveTime::parse_from_str(self.daily_at.trim(), "%H:%M").map_err(|e| {
            ConfigError::InvalidValue {
                field: "daily_at",
                reason: format!("expected HH:MM: {e}"),
            }
        })?;
        Ok(Cadence::Daily {
            at,
            offset: self.offset()?,
        })
    }

    #[must_use]
    pub fn cycle_timeout(&self) -> Duration {
        Duration::from_secs(self.cycle_timeout_secs)
    }
}
