//! Per-zone occupancy counting and schedule compression
//!
//! Every present second of every timeline adds one to the count of the zone
//! the person is in. `Busy` entries count in the occupant's own office.
//! Counts are kept for every graph node, `Outdoor` included, so the sum over
//! zones at any second equals the number of people present; only building
//! zones are handed to the sink.
//!
//! Compression samples the last second of each minute and starts a new
//! segment whenever the sample changes. The final segment always closes at
//! 24:00.

use crate::facility::ZoneGraph;
use crate::occupant::{Guest, Occupant, Person};
use crate::output::{ScheduleBreakpoint, ScheduleSink};
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::{TimeOfDay, ZoneId, MINUTES_PER_DAY, SECONDS_PER_DAY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// A constant-occupancy stretch of a zone schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSegment {
    /// Segment start, a whole minute
    pub start: TimeOfDay,
    /// Segment end, a whole minute after `start`
    pub end: TimeOfDay,
    /// Occupant count throughout
    pub count: u32,
}

impl ScheduleSegment {
    /// Length in seconds
    pub fn duration(&self) -> u32 {
        self.end.seconds() - self.start.seconds()
    }

    /// Count weighted by duration
    pub fn occupant_seconds(&self) -> u64 {
        self.count as u64 * self.duration() as u64
    }

    /// The breakpoint handed to a sink
    pub fn breakpoint(&self) -> ScheduleBreakpoint {
        ScheduleBreakpoint { end: self.end, count: self.count }
    }
}

/// Per-second head counts for every graph node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneCounts {
    zones: Vec<Vec<u32>>,
    present: Vec<u32>,
}

impl ZoneCounts {
    /// All-zero counts for `zone_count` nodes
    pub fn new(zone_count: usize) -> Self {
        Self {
            zones: vec![vec![0; SECONDS_PER_DAY as usize]; zone_count],
            present: vec![0; SECONDS_PER_DAY as usize],
        }
    }

    /// Add one person's whole day
    pub fn add_person(&mut self, person: &dyn Person) {
        let office = person.own_office();
        for (second, location) in person.timeline().iter().enumerate() {
            if !location.is_present() {
                continue;
            }
            self.present[second] += 1;
            if let Some(counts) =
                location.resolve(office).and_then(|zone| self.zones.get_mut(zone.index()))
            {
                counts[second] += 1;
            }
        }
    }

    /// Number of nodes counted
    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    /// Per-second counts of one zone
    pub fn zone(&self, zone: ZoneId) -> &[u32] {
        self.zones.get(zone.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Per-second number of people present anywhere
    pub fn present(&self) -> &[u32] {
        &self.present
    }

    /// Highest count of a zone over the day
    pub fn peak(&self, zone: ZoneId) -> u32 {
        self.zone(zone).iter().copied().max().unwrap_or(0)
    }

    /// Integrated occupant-seconds of a zone
    pub fn occupant_seconds(&self, zone: ZoneId) -> u64 {
        self.zone(zone).iter().map(|&count| count as u64).sum()
    }

    /// First second at which the zone counts do not add up to the present count
    pub fn conservation_violation(&self) -> Option<usize> {
        (0..self.present.len()).find(|&second| {
            let total: u32 = self.zones.iter().map(|counts| counts[second]).sum();
            total != self.present[second]
        })
    }
}

/// Turns the roster's timelines into per-zone schedules
#[derive(Debug, Clone)]
pub struct OccupancyAggregator {
    zone_count: usize,
    building_zones: Vec<(ZoneId, String)>,
}

impl OccupancyAggregator {
    /// Aggregator for the nodes of `graph`
    pub fn new(graph: &ZoneGraph) -> Self {
        Self {
            zone_count: graph.len(),
            building_zones: graph
                .building_zones()
                .map(|zone| (zone, graph.name(zone).to_string()))
                .collect(),
        }
    }

    /// Count occupants and guests second by second
    #[instrument(skip_all, fields(occupants = occupants.len(), guests = guests.len()))]
    pub fn count(&self, occupants: &[Occupant], guests: &[Guest]) -> ZoneCounts {
        let mut counts = ZoneCounts::new(self.zone_count);
        let people = occupants
            .iter()
            .map(|occupant| occupant as &dyn Person)
            .chain(guests.iter().map(|guest| guest as &dyn Person));
        for person in people {
            counts.add_person(person);
        }
        counts
    }

    /// Compress per-second counts into minute-aligned segments
    pub fn compress(counts: &[u32]) -> Vec<ScheduleSegment> {
        let sample = |minute: u32| {
            counts.get((minute * 60 - 1) as usize).copied().unwrap_or(0)
        };

        let mut segments = Vec::new();
        let mut start = 0;
        for minute in 1..=MINUTES_PER_DAY {
            let value = sample(minute);
            if minute != MINUTES_PER_DAY && sample(minute + 1) == value {
                continue;
            }
            segments.push(ScheduleSegment {
                start: TimeOfDay::from_minutes(start).unwrap_or_default(),
                end: TimeOfDay::from_minutes(minute).unwrap_or(TimeOfDay::END_OF_DAY),
                count: value,
            });
            start = minute;
        }
        segments
    }

    /// Per-minute samples represented by `segments`
    pub fn expand(segments: &[ScheduleSegment]) -> Vec<u32> {
        let mut samples = Vec::with_capacity(MINUTES_PER_DAY as usize);
        for segment in segments {
            let minutes = segment.end.minutes().saturating_sub(segment.start.minutes());
            samples.extend(std::iter::repeat(segment.count).take(minutes as usize));
        }
        samples
    }

    /// Segments of every building zone, in graph order
    pub fn schedules(&self, counts: &ZoneCounts) -> BTreeMap<String, Vec<ScheduleSegment>> {
        self.building_zones
            .iter()
            .map(|(zone, name)| (name.clone(), Self::compress(counts.zone(*zone))))
            .collect()
    }

    /// Peak count of every building zone
    pub fn peaks(&self, counts: &ZoneCounts) -> BTreeMap<String, u32> {
        self.building_zones.iter().map(|(zone, name)| (name.clone(), counts.peak(*zone))).collect()
    }

    /// Hand every building zone's schedule to the sink
    #[instrument(skip_all)]
    pub fn emit(&self, counts: &ZoneCounts, sink: &mut dyn ScheduleSink) -> SimulationResult<()> {
        if counts.zone_count() != self.zone_count {
            return Err(SimulationError::configuration_error(format!(
                "counts cover {} zones, graph has {}",
                counts.zone_count(),
                self.zone_count
            )));
        }

        for (zone, name) in &self.building_zones {
            let segments = Self::compress(counts.zone(*zone));
            let breakpoints: Vec<ScheduleBreakpoint> =
                segments.iter().map(ScheduleSegment::breakpoint).collect();
            debug!("Zone '{}': {} segment(s), peak {}", name, segments.len(), counts.peak(*zone));
            sink.submit_zone_schedule(name, &breakpoints)?;
        }
        Ok(())
    }
}
