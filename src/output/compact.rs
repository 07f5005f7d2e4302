//! `Schedule:Compact` text records
//!
//! Each zone schedule becomes one record named
//! `Generated_Schedule_Zone_<zone>_<date>` that applies through the end of the
//! year on weekdays. Names are unique across the days written to one file;
//! records written outside a day carry no date.
//!
//! ```text
//! Schedule:Compact,
//!     Generated_Schedule_Zone_Office_2020-03-25,
//!     Any Number,
//!     Through: 12/31,
//!     For: Weekdays,
//!     Until 09:01, 0,
//!     Until 24:00, 1;
//! ```

use crate::output::{ScheduleBreakpoint, ScheduleSink};
use crate::simulation::SimulationResult;
use chrono::NaiveDate;
use std::io::Write;

/// Prefix of every generated schedule name
pub const SCHEDULE_NAME_PREFIX: &str = "Generated_Schedule_Zone_";

/// Name of the generated schedule for `zone` on `date`
pub fn schedule_name(zone: &str, date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => format!("{}{}_{}", SCHEDULE_NAME_PREFIX, zone, date),
        None => format!("{}{}", SCHEDULE_NAME_PREFIX, zone),
    }
}

/// Writes `Schedule:Compact` records
#[derive(Debug)]
pub struct CompactScheduleSink<W: Write> {
    writer: W,
    date: Option<NaiveDate>,
}

impl<W: Write> CompactScheduleSink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self { writer, date: None }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ScheduleSink for CompactScheduleSink<W> {
    fn begin_day(&mut self, date: NaiveDate) -> SimulationResult<()> {
        self.date = Some(date);
        writeln!(self.writer, "! Occupancy for {}", date)?;
        Ok(())
    }

    fn submit_zone_schedule(
        &mut self,
        zone: &str,
        breakpoints: &[ScheduleBreakpoint],
    ) -> SimulationResult<()> {
        writeln!(self.writer, "Schedule:Compact,")?;
        writeln!(self.writer, "    {},", schedule_name(zone, self.date))?;
        writeln!(self.writer, "    Any Number,")?;
        writeln!(self.writer, "    Through: 12/31,")?;
        write!(self.writer, "    For: Weekdays")?;
        for breakpoint in breakpoints {
            write!(self.writer, ",\n    Until {}, {}", breakpoint.end, breakpoint.count)?;
        }
        writeln!(self.writer, ";\n")?;
        Ok(())
    }

    fn finish(&mut self) -> SimulationResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TimeOfDay;

    #[test]
    fn test_record_layout() {
        let mut sink = CompactScheduleSink::new(Vec::new());
        let breakpoints = [
            ScheduleBreakpoint { end: TimeOfDay::from_hm(9, 1).unwrap(), count: 0 },
            ScheduleBreakpoint { end: TimeOfDay::END_OF_DAY, count: 1 },
        ];
        sink.submit_zone_schedule("Office", &breakpoints).unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            text,
            "Schedule:Compact,\n    Generated_Schedule_Zone_Office,\n    Any Number,\n    \
             Through: 12/31,\n    For: Weekdays,\n    Until 09:01, 0,\n    Until 24:00, 1;\n\n"
        );
    }

    #[test]
    fn test_day_comment() {
        let mut sink = CompactScheduleSink::new(Vec::new());
        sink.begin_day(NaiveDate::from_ymd_opt(2020, 3, 26).unwrap()).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text, "! Occupancy for 2020-03-26\n");
    }

    #[test]
    fn test_names_are_unique_across_days() {
        let mut sink = CompactScheduleSink::new(Vec::new());
        let breakpoints = [ScheduleBreakpoint { end: TimeOfDay::END_OF_DAY, count: 0 }];
        for day in 25..28 {
            sink.begin_day(NaiveDate::from_ymd_opt(2020, 3, day).unwrap()).unwrap();
            sink.submit_zone_schedule("Office", &breakpoints).unwrap();
        }

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let names: Vec<&str> = text
            .lines()
            .filter(|line| line.trim_start().starts_with(SCHEDULE_NAME_PREFIX))
            .collect();
        assert_eq!(names.len(), 3);
        assert!(names.contains(&"    Generated_Schedule_Zone_Office_2020-03-26,"));
        let unique: std::collections::BTreeSet<&str> = names.iter().copied().collect();
        assert_eq!(unique.len(), 3);
    }
}
