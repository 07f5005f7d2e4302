//! Schedule output
//!
//! Generated schedules leave the crate through the [`ScheduleSink`] trait.
//! The binary picks an implementation from the configured output format.
//!
//! # Overview
//!
//! - **MemorySink**: collects schedules in memory, used by tests
//! - **JsonLinesSink**: one JSON object per zone per day
//! - **CompactScheduleSink**: `Schedule:Compact` records for the energy simulator
//!
//! # Usage Example
//!
//! ```rust
//! use occupancy_generator::output::*;
//! use occupancy_generator::types::TimeOfDay;
//!
//! let mut sink = JsonLinesSink::new(Vec::new());
//! let breakpoints = [ScheduleBreakpoint { end: TimeOfDay::END_OF_DAY, count: 0 }];
//! sink.submit_zone_schedule("Lobby", &breakpoints).unwrap();
//! assert_eq!(sink.records_written(), 1);
//! ```

pub mod compact;
pub mod json;
pub mod sink;

pub use compact::{schedule_name, CompactScheduleSink};
pub use json::JsonLinesSink;
pub use sink::{MemorySink, ScheduleBreakpoint, ScheduleSink};
