//! Population orchestration
//!
//! The orchestrator owns the roster of persistent occupants, the single
//! random source and the activity engine. It composes each simulated day in
//! a fixed order and hands the resulting counts to a schedule sink.

use crate::facility::{BuildingModel, ZoneGraph, ZoneRoles};
use crate::occupant::{Appointment, Guest, Occupant};
use crate::output::ScheduleSink;
use crate::simulation::{
    ActivityEngine, Attendance, DayStatistics, OccupancyAggregator, RunStatistics,
    SimulationError, SimulationResult, VisitPatch, ZoneCounts,
};
use crate::types::{OccupantId, SimulationConfig};
use crate::{perf_span, sim_event};
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Everything generated for one simulated day
#[derive(Debug, Clone)]
pub struct DayRoster {
    /// Simulated date
    pub date: NaiveDate,
    /// Roster indices of the occupants who came in
    pub present: Vec<usize>,
    /// Appointments booked, in host roster order
    pub appointments: Vec<Appointment>,
    /// Guests painted for those appointments
    pub guests: Vec<Guest>,
    /// Counters for the day
    pub statistics: DayStatistics,
}

/// Coordinates the roster, the activity engine and aggregation
#[derive(Debug)]
pub struct PopulationOrchestrator {
    config: SimulationConfig,
    engine: ActivityEngine,
    aggregator: OccupancyAggregator,
    occupants: Vec<Occupant>,
    rng: StdRng,
    statistics: RunStatistics,
}

impl PopulationOrchestrator {
    /// Validate the configuration, build the zone graph and the roster
    #[instrument(skip_all, fields(occupants = config.occupant_count, days = config.days))]
    pub fn new(config: SimulationConfig, model: &dyn BuildingModel) -> SimulationResult<Self> {
        config.validate()?;

        let mut rng = if let Some(seed) = config.seed {
            info!("Using deterministic seed: {}", seed);
            StdRng::seed_from_u64(seed)
        } else {
            debug!("Using entropy-based random seed");
            StdRng::from_entropy()
        };

        let graph = ZoneGraph::from_model(model)?;
        let roles = ZoneRoles::select(&graph, &config, &mut rng)?;

        let occupants = (0..config.occupant_count)
            .map(|_| {
                let id = OccupantId::from_rng(&mut rng);
                let office = roles.draw_office(&mut rng)?;
                Ok(Occupant::new(id, office))
            })
            .collect::<SimulationResult<Vec<_>>>()?;

        let aggregator = OccupancyAggregator::new(&graph);
        let statistics = RunStatistics::new(occupants.len(), graph.building_zones().count());
        let engine = ActivityEngine::new(graph, roles, &config)?;

        sim_event!(
            info,
            "Roster created",
            occupants = occupants.len(),
            zones = engine.graph().len()
        );

        Ok(Self { config, engine, aggregator, occupants, rng, statistics })
    }

    /// Configuration in use
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The routing graph
    pub fn graph(&self) -> &ZoneGraph {
        self.engine.graph()
    }

    /// Designated zones
    pub fn roles(&self) -> &ZoneRoles {
        self.engine.roles()
    }

    /// Persistent occupants in roster order
    pub fn occupants(&self) -> &[Occupant] {
        &self.occupants
    }

    /// Statistics accumulated by [`Self::run_day`] and [`Self::run`]
    pub fn statistics(&self) -> &RunStatistics {
        &self.statistics
    }

    /// Generate every timeline for one day
    ///
    /// Occupant timelines stay on the roster until the next call; guests are
    /// returned in the [`DayRoster`].
    #[instrument(skip(self), fields(occupants = self.occupants.len()))]
    pub fn generate_day(&mut self, date: NaiveDate) -> SimulationResult<DayRoster> {
        let mut stats = DayStatistics::new(date);

        let mut present = Vec::new();
        for (index, occupant) in self.occupants.iter_mut().enumerate() {
            match self.engine.decide_attendance(occupant, &mut self.rng)? {
                Attendance::Present { .. } => present.push(index),
                Attendance::CalledInAbsent => stats.called_in_absent += 1,
                Attendance::PastCutoff => stats.past_cutoff += 1,
            }
        }
        stats.present_occupants = present.len();

        let guest_count = self.engine.distributions().guest_count(&mut self.rng);
        stats.guests_expected = guest_count;
        if guest_count > 0 && present.is_empty() {
            return Err(SimulationError::NoPresentHost { guests: guest_count });
        }

        let mut assigned = vec![0usize; self.occupants.len()];
        for _ in 0..guest_count {
            let host = present[self.rng.gen_range(0..present.len())];
            assigned[host] += 1;
        }

        let mut appointments = Vec::new();
        for &index in &present {
            let occupant = &mut self.occupants[index];
            self.engine.lunch(occupant, &mut self.rng)?;
            self.engine.daily_meeting(occupant, &mut self.rng)?;

            let mut remaining = assigned[index];
            while remaining > 0 {
                let group = self.engine.distributions().group_size(remaining, &mut self.rng);
                remaining -= group;
                match self.engine.host_guests(occupant, group, &mut self.rng)? {
                    Some(appointment) => {
                        if appointment.shortened {
                            stats.appointments_shortened += 1;
                        }
                        appointments.push(appointment);
                    }
                    None => stats.appointments_skipped += 1,
                }
            }
        }
        stats.appointments = appointments.len();

        let mut guests = Vec::with_capacity(guest_count);
        for appointment in &appointments {
            for _ in 0..appointment.group_size {
                guests.push(self.engine.spawn_guest(appointment, &mut self.rng)?);
            }
        }
        stats.guests_spawned = guests.len();

        for &visitor in &present {
            let attempts = self.engine.colleague_visit_attempts(&mut self.rng);
            for _ in 0..attempts {
                let proposal =
                    self.engine.propose_colleague_visit(visitor, &self.occupants, &mut self.rng);
                let applied = match proposal {
                    Some(patch) => self.apply_visit_patch(&patch),
                    None => false,
                };
                if applied {
                    stats.colleague_visits += 1;
                } else {
                    stats.colleague_visits_skipped += 1;
                }
            }
        }

        sim_event!(
            debug,
            "Day generated",
            present = stats.present_occupants,
            guests = stats.guests_spawned,
            appointments = stats.appointments,
            colleague_visits = stats.colleague_visits,
        );

        Ok(DayRoster { date, present, appointments, guests, statistics: stats })
    }

    /// Paint both sides of a colleague visit, or neither
    pub fn apply_visit_patch(&mut self, patch: &VisitPatch) -> bool {
        if patch.visitor == patch.host
            || patch.visitor >= self.occupants.len()
            || patch.host >= self.occupants.len()
        {
            warn!("Discarding colleague visit with invalid roster indices {:?}", patch);
            return false;
        }
        self.occupants[patch.visitor].paint(patch.visitor_op);
        self.occupants[patch.host].paint(patch.host_op);
        true
    }

    /// Per-second counts for the roster and the given guests
    pub fn count(&self, guests: &[Guest]) -> ZoneCounts {
        self.aggregator.count(&self.occupants, guests)
    }

    /// Generate one day, aggregate it and hand the schedules to the sink
    #[instrument(skip(self, sink))]
    pub fn run_day(
        &mut self,
        date: NaiveDate,
        sink: &mut dyn ScheduleSink,
    ) -> SimulationResult<DayStatistics> {
        let mut roster = self.generate_day(date)?;

        let _span = perf_span!("aggregate_day", guests = roster.guests.len()).entered();
        let counts = self.count(&roster.guests);
        if let Some(second) = counts.conservation_violation() {
            warn!("Zone counts do not add up to the present count at second {}", second);
        }
        roster.statistics.peak_occupancy = self.aggregator.peaks(&counts);

        sink.begin_day(date)?;
        self.aggregator.emit(&counts, sink)?;

        info!(
            "{}: {} present, {} guest(s), {} colleague visit(s)",
            date,
            roster.statistics.present_occupants,
            roster.statistics.guests_spawned,
            roster.statistics.colleague_visits
        );
        self.statistics.record_day(roster.statistics.clone());
        Ok(roster.statistics)
    }

    /// Run every configured day starting at the configured date
    #[instrument(skip_all, fields(days = self.config.days))]
    pub fn run(&mut self, sink: &mut dyn ScheduleSink) -> SimulationResult<RunStatistics> {
        let started = Instant::now();
        let _span = perf_span!("run", days = self.config.days).entered();

        for offset in 0..self.config.days {
            let date = self
                .config
                .start_date
                .checked_add_days(Days::new(offset as u64))
                .ok_or_else(|| {
                    SimulationError::configuration_error(format!(
                        "date overflow {} days after {}",
                        offset, self.config.start_date
                    ))
                })?;
            self.run_day(date, sink)?;
        }
        sink.finish()?;

        self.statistics.set_simulation_duration(started.elapsed());
        Ok(self.statistics.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::BuildingLayout;
    use crate::output::MemorySink;
    use crate::types::Location;

    fn layout() -> BuildingLayout {
        BuildingLayout::from_links(
            &["Lobby", "Office1", "Office2", "Kitchen", "Boardroom"],
            &[
                ("Outdoor", &["Lobby"]),
                ("Lobby", &["Office1", "Office2", "Kitchen"]),
                ("Kitchen", &["Boardroom"]),
            ],
        )
    }

    fn config(seed: u64) -> SimulationConfig {
        SimulationConfig {
            occupant_count: 6,
            seed: Some(seed),
            lunch_room: Some("Kitchen".to_string()),
            meeting_room: Some("Boardroom".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_roster_offices_come_from_pool() {
        let orchestrator = PopulationOrchestrator::new(config(1), &layout()).unwrap();
        assert_eq!(orchestrator.occupants().len(), 6);
        for occupant in orchestrator.occupants() {
            assert!(orchestrator.roles().office_pool.contains(&occupant.office));
        }
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let bad = SimulationConfig { occupant_count: 0, ..config(1) };
        assert!(matches!(
            PopulationOrchestrator::new(bad, &layout()),
            Err(SimulationError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_guest_count_matches_appointments() {
        let mut orchestrator = PopulationOrchestrator::new(config(2), &layout()).unwrap();
        let date = orchestrator.config().start_date;
        for _ in 0..5 {
            let day = orchestrator.generate_day(date).unwrap();
            let booked: usize = day.appointments.iter().map(|a| a.group_size).sum();
            assert_eq!(day.guests.len(), booked);
            assert_eq!(day.statistics.guests_spawned, booked);
        }
    }

    #[test]
    fn test_nobody_present_with_guests_is_fatal() {
        let config = SimulationConfig {
            absence_probability: 1.0,
            guest_lambda: 50.0,
            ..config(3)
        };
        let mut orchestrator = PopulationOrchestrator::new(config, &layout()).unwrap();
        let date = orchestrator.config().start_date;
        assert!(matches!(
            orchestrator.generate_day(date),
            Err(SimulationError::NoPresentHost { .. })
        ));
    }

    #[test]
    fn test_invalid_patch_is_discarded() {
        let mut orchestrator = PopulationOrchestrator::new(config(4), &layout()).unwrap();
        let op = crate::occupant::PaintOp::new(
            crate::types::ActivityType::VisitingColleague,
            0,
            10,
            Location::Busy,
        );
        let patch = VisitPatch { visitor: 0, host: 0, visitor_op: op, host_op: op };
        assert!(!orchestrator.apply_visit_patch(&patch));
        assert!(orchestrator.occupants()[0].plan().is_empty());
    }

    #[test]
    fn test_run_feeds_sink() {
        let config = SimulationConfig { days: 2, ..config(5) };
        let mut orchestrator = PopulationOrchestrator::new(config, &layout()).unwrap();
        let mut sink = MemorySink::new();
        let stats = orchestrator.run(&mut sink).unwrap();

        assert_eq!(stats.days_simulated(), 2);
        assert_eq!(sink.days.len(), 2);
        assert!(sink.is_finished());
        for zones in sink.days.values() {
            assert_eq!(zones.len(), 5);
            assert!(!zones.contains_key("Outdoor"));
        }
    }
}
