//! Per-second location timeline of one person for one day

use crate::occupant::PaintOp;
use crate::types::{Location, ZoneId, SECONDS_PER_DAY};
use std::ops::Range;

/// One [`Location`] per second of the day, always exactly 86,400 entries
#[derive(Clone, PartialEq, Eq)]
pub struct Timeline {
    entries: Vec<Location>,
}

impl std::fmt::Debug for Timeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timeline")
            .field("len", &self.entries.len())
            .field("present_seconds", &self.present_seconds())
            .finish()
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    /// An empty day, every second `Unset`
    pub fn new() -> Self {
        Self { entries: vec![Location::Unset; SECONDS_PER_DAY as usize] }
    }

    /// Number of entries, always one day's worth of seconds
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reset every second to `Unset` in place
    pub fn reset(&mut self) {
        self.entries.fill(Location::Unset);
    }

    /// Write one op, clamped to the day; empty and inverted intervals are ignored
    pub fn apply(&mut self, op: &PaintOp) {
        if let Some(range) = op.clamped() {
            self.entries[range].fill(op.location);
        }
    }

    /// Location at a second, `Unset` past the end of the day
    pub fn get(&self, second: usize) -> Location {
        self.entries.get(second).copied().unwrap_or_default()
    }

    /// All entries
    pub fn as_slice(&self) -> &[Location] {
        &self.entries
    }

    /// Iterate the entries in time order
    pub fn iter(&self) -> impl Iterator<Item = Location> + '_ {
        self.entries.iter().copied()
    }

    /// Number of seconds spent inside the building
    pub fn present_seconds(&self) -> usize {
        self.entries.iter().filter(|loc| loc.is_present()).count()
    }

    /// Maximal runs of seconds holding exactly `Zone(office)`
    ///
    /// `Busy` seconds do not count as being in the office here; they are
    /// already taken by a guest or a colleague.
    pub fn in_office_ranges(&self, office: ZoneId) -> Vec<Range<usize>> {
        let target = Location::Zone(office);
        let mut ranges = Vec::new();
        let mut run_start = None;

        for (second, &location) in self.entries.iter().enumerate() {
            match (location == target, run_start) {
                (true, None) => run_start = Some(second),
                (false, Some(start)) => {
                    ranges.push(start..second);
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(start) = run_start {
            ranges.push(start..self.entries.len());
        }

        ranges
    }

    /// Whether every second of `[start, end)` holds exactly `Zone(zone)`
    pub fn is_in_zone_throughout(&self, zone: ZoneId, start: usize, end: usize) -> bool {
        start < end
            && end <= self.entries.len()
            && self.entries[start..end].iter().all(|&loc| loc == Location::Zone(zone))
    }

    /// Seconds at which the timeline holds `location`
    pub fn count(&self, location: Location) -> usize {
        self.entries.iter().filter(|&&loc| loc == location).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ActivityType;

    #[test]
    fn test_length_is_one_day() {
        let mut timeline = Timeline::new();
        assert_eq!(timeline.len(), 86_400);
        timeline.apply(&PaintOp::new(ActivityType::Working, -50, 100_000, Location::Busy));
        assert_eq!(timeline.len(), 86_400);
        assert_eq!(timeline.present_seconds(), 86_400);
        timeline.reset();
        assert_eq!(timeline.present_seconds(), 0);
    }

    #[test]
    fn test_in_office_ranges() {
        let office = ZoneId(1);
        let mut timeline = Timeline::new();
        timeline.apply(&PaintOp::new(ActivityType::Working, 100, 500, Location::Zone(office)));
        timeline.apply(&PaintOp::new(ActivityType::HostingGuest, 200, 300, Location::Busy));
        timeline.apply(&PaintOp::new(ActivityType::Working, 86_000, 86_400, Location::Zone(office)));

        assert_eq!(timeline.in_office_ranges(office), vec![100..200, 300..500, 86_000..86_400]);
        assert!(timeline.in_office_ranges(ZoneId(9)).is_empty());
    }

    #[test]
    fn test_is_in_zone_throughout() {
        let office = ZoneId(4);
        let mut timeline = Timeline::new();
        timeline.apply(&PaintOp::new(ActivityType::Working, 1000, 2000, Location::Zone(office)));

        assert!(timeline.is_in_zone_throughout(office, 1000, 2000));
        assert!(!timeline.is_in_zone_throughout(office, 999, 2000));
        assert!(!timeline.is_in_zone_throughout(office, 1500, 1500));
        assert!(!timeline.is_in_zone_throughout(office, 1500, 90_000));
    }

    #[test]
    fn test_get_out_of_range_is_unset() {
        let timeline = Timeline::new();
        assert_eq!(timeline.get(100_000), Location::Unset);
    }
}
