//! Statistics collection and reporting
//!
//! [`DayStatistics`] records what happened on one simulated day; the
//! orchestrator folds every day into a [`RunStatistics`] whose `summary()` is
//! what the binary prints when a run completes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Counters for one simulated day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayStatistics {
    /// Simulated date
    pub date: NaiveDate,
    /// Occupants who came in
    pub present_occupants: usize,
    /// Occupants who called in absent
    pub called_in_absent: usize,
    /// Occupants whose arrival fell after the cutoff
    pub past_cutoff: usize,
    /// Guests drawn for the day
    pub guests_expected: usize,
    /// Guests materialized and painted
    pub guests_spawned: usize,
    /// Appointments booked
    pub appointments: usize,
    /// Appointments squeezed into the host's longest in-office interval
    pub appointments_shortened: usize,
    /// Appointments dropped because the host was never in their office
    pub appointments_skipped: usize,
    /// Colleague visits applied
    pub colleague_visits: usize,
    /// Colleague visit attempts without a window or an available colleague
    pub colleague_visits_skipped: usize,
    /// Highest head count reached in each building zone
    pub peak_occupancy: BTreeMap<String, u32>,
}

impl DayStatistics {
    /// Empty counters for `date`
    pub fn new(date: NaiveDate) -> Self {
        Self { date, ..Default::default() }
    }

    /// Occupants who did not come in for any reason
    pub fn absent_occupants(&self) -> usize {
        self.called_in_absent + self.past_cutoff
    }

    /// Zone with the highest peak, ties broken by name
    pub fn busiest_zone(&self) -> Option<(&str, u32)> {
        self.peak_occupancy
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(zone, peak)| (zone.as_str(), *peak))
    }
}

/// Totals over a whole run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStatistics {
    /// Persistent occupants in the roster
    pub total_occupants: usize,
    /// Building zones receiving schedules
    pub building_zones: usize,
    /// Per-day records in date order
    pub days: Vec<DayStatistics>,
    /// Wall-clock time spent generating
    pub simulation_duration: Duration,
}

impl RunStatistics {
    /// Empty statistics for a roster and building
    pub fn new(total_occupants: usize, building_zones: usize) -> Self {
        Self { total_occupants, building_zones, ..Default::default() }
    }

    /// Append one day's record
    pub fn record_day(&mut self, day: DayStatistics) {
        self.days.push(day);
    }

    /// Set the measured run duration
    pub fn set_simulation_duration(&mut self, duration: Duration) {
        self.simulation_duration = duration;
    }

    /// Number of days recorded
    pub fn days_simulated(&self) -> usize {
        self.days.len()
    }

    fn total(&self, field: impl Fn(&DayStatistics) -> usize) -> usize {
        self.days.iter().map(field).sum()
    }

    fn per_day(&self, total: usize) -> f64 {
        if self.days.is_empty() {
            0.0
        } else {
            total as f64 / self.days.len() as f64
        }
    }

    /// Occupant-days present
    pub fn total_present(&self) -> usize {
        self.total(|day| day.present_occupants)
    }

    /// Occupant-days absent
    pub fn total_absent(&self) -> usize {
        self.total(DayStatistics::absent_occupants)
    }

    /// Guests painted over the run
    pub fn total_guests(&self) -> usize {
        self.total(|day| day.guests_spawned)
    }

    /// Appointments booked over the run
    pub fn total_appointments(&self) -> usize {
        self.total(|day| day.appointments)
    }

    /// Colleague visits applied over the run
    pub fn total_colleague_visits(&self) -> usize {
        self.total(|day| day.colleague_visits)
    }

    /// Mean occupants present per day
    pub fn average_present_per_day(&self) -> f64 {
        self.per_day(self.total_present())
    }

    /// Mean guests per day
    pub fn average_guests_per_day(&self) -> f64 {
        self.per_day(self.total_guests())
    }

    /// Share of occupant-days present, in percent
    pub fn attendance_percentage(&self) -> f64 {
        let total = self.total_present() + self.total_absent();
        if total == 0 {
            0.0
        } else {
            self.total_present() as f64 / total as f64 * 100.0
        }
    }

    /// Highest peak seen for each zone over the run
    pub fn peak_occupancy(&self) -> BTreeMap<String, u32> {
        let mut peaks = BTreeMap::new();
        for day in &self.days {
            for (zone, peak) in &day.peak_occupancy {
                let entry = peaks.entry(zone.clone()).or_insert(0);
                *entry = (*entry).max(*peak);
            }
        }
        peaks
    }

    /// Human readable report
    pub fn summary(&self) -> String {
        let mut output = String::new();

        output.push_str("Occupancy Generation Complete\n");
        output.push_str("=============================\n\n");
        output.push_str(&format!("   Days Simulated: {}\n", self.days_simulated()));
        output.push_str(&format!(
            "   Duration: {:.2} seconds\n",
            self.simulation_duration.as_secs_f64()
        ));
        output.push_str(&format!(
            "   Roster: {} occupants across {} building zones\n\n",
            self.total_occupants, self.building_zones
        ));

        output.push_str("Attendance:\n");
        output.push_str(&format!(
            "   Present: {} occupant-days ({:.1}%, avg {:.1}/day)\n",
            self.total_present(),
            self.attendance_percentage(),
            self.average_present_per_day()
        ));
        output.push_str(&format!("   Absent: {} occupant-days\n\n", self.total_absent()));

        output.push_str("Visits:\n");
        output.push_str(&format!(
            "   Guests: {} (avg {:.1}/day) in {} appointments",
            self.total_guests(),
            self.average_guests_per_day(),
            self.total_appointments()
        ));
        let shortened = self.total(|day| day.appointments_shortened);
        let skipped = self.total(|day| day.appointments_skipped);
        if shortened + skipped > 0 {
            output.push_str(&format!(" ({} shortened, {} skipped)", shortened, skipped));
        }
        output.push('\n');
        output.push_str(&format!(
            "   Colleague Visits: {} ({} attempts without a match)\n",
            self.total_colleague_visits(),
            self.total(|day| day.colleague_visits_skipped)
        ));

        let peaks = self.peak_occupancy();
        if !peaks.is_empty() {
            output.push_str("\nPeak Occupancy:\n");
            for (zone, peak) in &peaks {
                output.push_str(&format!("   {}: {}\n", zone, peak));
            }
        }

        output
    }
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}
