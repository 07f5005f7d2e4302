//! The schedule sink boundary

use crate::simulation::SimulationResult;
use crate::types::TimeOfDay;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One step of a piecewise-constant schedule: `count` people until `end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleBreakpoint {
    /// Clock time at which this step ends
    pub end: TimeOfDay,
    /// Occupant count held until `end`
    pub count: u32,
}

/// Receives the generated schedules, one call per building zone per day
///
/// Calls arrive as `begin_day`, then `submit_zone_schedule` for every
/// building zone in graph order, repeated per day, and a single `finish`.
pub trait ScheduleSink {
    /// A new simulated day starts
    fn begin_day(&mut self, _date: NaiveDate) -> SimulationResult<()> {
        Ok(())
    }

    /// Accept the ordered breakpoints of one zone; the last one ends at 24:00
    fn submit_zone_schedule(
        &mut self,
        zone: &str,
        breakpoints: &[ScheduleBreakpoint],
    ) -> SimulationResult<()>;

    /// Flush any buffered output
    fn finish(&mut self) -> SimulationResult<()> {
        Ok(())
    }
}

/// Keeps every submitted schedule in memory
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    /// Schedules keyed by day, then by zone name
    pub days: BTreeMap<NaiveDate, BTreeMap<String, Vec<ScheduleBreakpoint>>>,
    current: Option<NaiveDate>,
    finished: bool,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule submitted for `zone` on `date`
    pub fn schedule(&self, date: NaiveDate, zone: &str) -> Option<&[ScheduleBreakpoint]> {
        self.days.get(&date)?.get(zone).map(Vec::as_slice)
    }

    /// Schedule for `zone` on the only or last day received
    pub fn latest(&self, zone: &str) -> Option<&[ScheduleBreakpoint]> {
        self.days.values().next_back()?.get(zone).map(Vec::as_slice)
    }

    /// Whether `finish` has been called
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl ScheduleSink for MemorySink {
    fn begin_day(&mut self, date: NaiveDate) -> SimulationResult<()> {
        self.days.entry(date).or_default();
        self.current = Some(date);
        Ok(())
    }

    fn submit_zone_schedule(
        &mut self,
        zone: &str,
        breakpoints: &[ScheduleBreakpoint],
    ) -> SimulationResult<()> {
        let date = self.current.unwrap_or_default();
        self.days.entry(date).or_default().insert(zone.to_string(), breakpoints.to_vec());
        Ok(())
    }

    fn finish(&mut self) -> SimulationResult<()> {
        self.finished = true;
        Ok(())
    }
}
