//! JSON Lines schedule output

use crate::output::{ScheduleBreakpoint, ScheduleSink};
use crate::simulation::SimulationResult;
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

/// One line of output: a zone's schedule for one day
#[derive(Debug, Serialize)]
struct ZoneScheduleRecord<'a> {
    date: Option<NaiveDate>,
    zone: &'a str,
    breakpoints: &'a [ScheduleBreakpoint],
}

/// Writes one JSON object per zone per day
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
    date: Option<NaiveDate>,
    records: usize,
}

impl<W: Write> JsonLinesSink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self { writer, date: None, records: 0 }
    }

    /// Number of records written so far
    pub fn records_written(&self) -> usize {
        self.records
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ScheduleSink for JsonLinesSink<W> {
    fn begin_day(&mut self, date: NaiveDate) -> SimulationResult<()> {
        self.date = Some(date);
        Ok(())
    }

    fn submit_zone_schedule(
        &mut self,
        zone: &str,
        breakpoints: &[ScheduleBreakpoint],
    ) -> SimulationResult<()> {
        let record = ZoneScheduleRecord { date: self.date, zone, breakpoints };
        serde_json::to_writer(&mut self.writer, &record)?;
        writeln!(self.writer)?;
        self.records += 1;
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
    fn test_one_line_per_zone() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.begin_day(NaiveDate::from_ymd_opt(2020, 3, 25).unwrap()).unwrap();
        let breakpoints = [
            ScheduleBreakpoint { end: TimeOfDay::from_hm(9, 1).unwrap(), count: 0 },
            ScheduleBreakpoint { end: TimeOfDay::END_OF_DAY, count: 2 },
        ];
        sink.submit_zone_schedule("Office", &breakpoints).unwrap();
        sink.submit_zone_schedule("Lobby", &breakpoints[1..]).unwrap();
        sink.finish().unwrap();
        assert_eq!(sink.records_written(), 2);

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["date"], "2020-03-25");
        assert_eq!(first["zone"], "Office");
        assert_eq!(first["breakpoints"][0]["end"], "09:01");
        assert_eq!(first["breakpoints"][1]["count"], 2);
    }
}
