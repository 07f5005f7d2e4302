//! Time-of-day handling
//!
//! Everything inside a simulated day is measured in whole seconds from local
//! midnight. [`TimeOfDay`] wraps that offset and reads/writes the `HH:MM`
//! notation used by configuration files and schedule records.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of seconds in one simulated day (one timeline entry per second)
pub const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// Number of minutes in one simulated day (one schedule sample per minute)
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Seconds-from-midnight offset within a day, `00:00` through `24:00` inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    /// Midnight at the start of the day
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Midnight at the end of the day (`24:00`)
    pub const END_OF_DAY: TimeOfDay = TimeOfDay(SECONDS_PER_DAY);

    /// Create from a seconds offset, `None` past `24:00`
    pub fn from_seconds(seconds: u32) -> Option<Self> {
        (seconds <= SECONDS_PER_DAY).then_some(Self(seconds))
    }

    /// Create from hour and minute, `None` past `24:00`
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if minute >= 60 {
            return None;
        }
        Self::from_seconds(hour * 3600 + minute * 60)
    }

    /// Create from a whole number of minutes since midnight
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        Self::from_seconds(minutes * 60)
    }

    /// Seconds since midnight
    pub fn seconds(self) -> u32 {
        self.0
    }

    /// Seconds since midnight as a signed value, for timeline arithmetic
    pub fn as_i64(self) -> i64 {
        self.0 as i64
    }

    /// Whole minutes since midnight
    pub fn minutes(self) -> u32 {
        self.0 / 60
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.0 / 3600;
        let minutes = (self.0 % 3600) / 60;
        let seconds = self.0 % 60;
        if seconds == 0 {
            write!(f, "{:02}:{:02}", hours, minutes)
        } else {
            write!(f, "{:02}:{:02}:{:02}", hours, minutes, seconds)
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == "24:00" || trimmed == "24:00:00" {
            return Ok(Self::END_OF_DAY);
        }

        let time = NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
            .map_err(|e| format!("Invalid time of day '{}': {}", s, e))?;

        Ok(Self(time.num_seconds_from_midnight()))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_minutes() {
        assert_eq!(TimeOfDay::from_hm(9, 0).unwrap().to_string(), "09:00");
        assert_eq!(TimeOfDay::END_OF_DAY.to_string(), "24:00");
        assert_eq!(TimeOfDay::from_seconds(61).unwrap().to_string(), "00:01:01");
    }

    #[test]
    fn test_parse() {
        assert_eq!("16:00".parse::<TimeOfDay>().unwrap().seconds(), 16 * 3600);
        assert_eq!("12:30:15".parse::<TimeOfDay>().unwrap().seconds(), 12 * 3600 + 30 * 60 + 15);
        assert_eq!("24:00".parse::<TimeOfDay>().unwrap(), TimeOfDay::END_OF_DAY);
        assert!("25:00".parse::<TimeOfDay>().is_err());
        assert!("noon".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn test_bounds() {
        assert!(TimeOfDay::from_seconds(SECONDS_PER_DAY).is_some());
        assert!(TimeOfDay::from_seconds(SECONDS_PER_DAY + 1).is_none());
        assert!(TimeOfDay::from_hm(10, 60).is_none());
        assert_eq!(TimeOfDay::from_minutes(MINUTES_PER_DAY), Some(TimeOfDay::END_OF_DAY));
    }

    #[test]
    fn test_serde_uses_clock_notation() {
        let json = serde_json::to_string(&TimeOfDay::from_hm(14, 0).unwrap()).unwrap();
        assert_eq!(json, "\"14:00\"");
        let back: TimeOfDay = serde_json::from_str(&json).unwrap();
        assert_eq!(back.minutes(), 14 * 60);
    }
}
