//! Per-occupant activity sampling and painting
//!
//! The activity engine turns random draws into paint operations on a single
//! occupant's timeline. A day is composed in a fixed layer order: commute,
//! lunch, daily meeting, guest hosting, colleague visits. Each step may
//! overwrite seconds written by an earlier one.
//!
//! # Overview
//!
//! - [`ActivityEngine::decide_attendance`] resets the occupant and paints the commute
//! - [`ActivityEngine::lunch`] and [`ActivityEngine::daily_meeting`] paint round trips
//! - [`ActivityEngine::host_guests`] books an appointment inside an in-office interval
//! - [`ActivityEngine::propose_colleague_visit`] reads the roster and returns a
//!   [`VisitPatch`] instead of mutating anyone
//! - [`ActivityEngine::spawn_guest`] paints a guest's trip to an appointment
//!
//! Colleague visits touch two timelines, so the engine only proposes them; the
//! orchestrator owns the roster and applies the patch to both occupants.

use crate::facility::{ZoneGraph, ZoneRoles};
use crate::occupant::{Appointment, Guest, Occupant, PaintOp, Person};
use crate::simulation::transit::{backward_stamps, forward_stamps, paint_trip, TripActivities};
use crate::simulation::{ActivityDistributions, SimulationResult};
use crate::types::{
    ActivityType, GuestId, Location, SimulationConfig, TimeOfDay, ZoneId, SECONDS_PER_DAY,
};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::{debug, trace, warn};

/// Outcome of the morning attendance decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attendance {
    /// The Bernoulli absence trial came up
    CalledInAbsent,
    /// The sampled arrival fell after the cutoff
    PastCutoff,
    /// In the building between these two seconds
    Present {
        /// Second the occupant walks in from the entry
        arrival: u32,
        /// Second the occupant is back outside
        departure: u32,
    },
}

impl Attendance {
    /// Whether the occupant comes in today
    pub fn is_present(&self) -> bool {
        matches!(self, Attendance::Present { .. })
    }
}

/// A colleague visit touching two occupants of the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitPatch {
    /// Roster index of the visiting occupant
    pub visitor: usize,
    /// Roster index of the visited colleague
    pub host: usize,
    /// Visitor sits in the colleague's office
    pub visitor_op: PaintOp,
    /// Colleague is busy in their own office
    pub host_op: PaintOp,
}

/// Samples activities and paints them onto occupant and guest timelines
#[derive(Debug, Clone)]
pub struct ActivityEngine {
    graph: ZoneGraph,
    roles: ZoneRoles,
    dists: ActivityDistributions,
    start_work: i64,
    end_work: i64,
    arrival_flex: i64,
    arrival_cutoff: i64,
    lunch_start: i64,
    daily_meeting: i64,
}

fn clamp_to_day(second: i64) -> u32 {
    second.clamp(0, SECONDS_PER_DAY as i64) as u32
}

/// Pick an in-office interval that fits `length` and a start inside it
fn pick_window<R: Rng>(
    ranges: &[Range<usize>],
    length: i64,
    rng: &mut R,
) -> Option<(i64, i64)> {
    let candidates: Vec<&Range<usize>> =
        ranges.iter().filter(|range| range.len() as i64 > length).collect();
    let range = candidates.choose(rng)?;
    let start = rng.gen_range(range.start as i64..=range.end as i64 - length);
    Some((start, start + length))
}

impl ActivityEngine {
    /// Create an engine for a graph whose roles have already been chosen
    pub fn new(
        graph: ZoneGraph,
        roles: ZoneRoles,
        config: &SimulationConfig,
    ) -> SimulationResult<Self> {
        Ok(Self {
            graph,
            roles,
            dists: ActivityDistributions::new(config)?,
            start_work: config.start_work.as_i64(),
            end_work: config.end_work.as_i64(),
            arrival_flex: config.arrival_flex_secs as i64,
            arrival_cutoff: config.arrival_cutoff.as_i64(),
            lunch_start: config.lunch_start.as_i64(),
            daily_meeting: config.daily_meeting.as_i64(),
        })
    }

    /// The routing graph
    pub fn graph(&self) -> &ZoneGraph {
        &self.graph
    }

    /// The designated zones
    pub fn roles(&self) -> &ZoneRoles {
        &self.roles
    }

    /// The distributions shared with the orchestrator
    pub fn distributions(&self) -> &ActivityDistributions {
        &self.dists
    }

    /// Path from `from` to `to` with the first zone dropped
    fn route_from(&self, from: ZoneId, to: ZoneId) -> SimulationResult<Vec<ZoneId>> {
        let mut path = self.graph.route(from, to)?;
        path.remove(0);
        Ok(path)
    }

    /// Reset the occupant, decide whether they come in and paint the commute
    ///
    /// Arrival is `start_work - flex + Exp(flex)`; past the cutoff the
    /// occupant stays home. Departure is `end_work + Exp(flex)`, clamped to
    /// the last second of the day.
    pub fn decide_attendance<R: Rng>(
        &self,
        occupant: &mut Occupant,
        rng: &mut R,
    ) -> SimulationResult<Attendance> {
        occupant.reset();

        if self.dists.is_absent(rng) {
            debug!("Occupant {} called in absent", occupant.id);
            return Ok(Attendance::CalledInAbsent);
        }

        let arrival = self.start_work - self.arrival_flex + self.dists.flex_delay(rng);
        if arrival > self.arrival_cutoff {
            debug!(
                "Occupant {} would arrive at {}s, after the cutoff",
                occupant.id, arrival
            );
            return Ok(Attendance::PastCutoff);
        }

        let departure =
            (self.end_work + self.dists.flex_delay(rng)).min(SECONDS_PER_DAY as i64 - 1);

        let path = self.graph.route(self.roles.entry, occupant.office)?;
        let hops = path.len() - 1;
        let mut stamps = forward_stamps(arrival, hops, &self.dists, rng);
        stamps.extend(backward_stamps(departure, hops, &self.dists, rng));
        occupant.paint_all(paint_trip(&path, &stamps, TripActivities::COMMUTE));

        trace!(
            "Occupant {} commutes {} -> {} over {} zone(s)",
            occupant.id,
            arrival,
            departure,
            path.len()
        );

        Ok(Attendance::Present { arrival: clamp_to_day(arrival), departure: clamp_to_day(departure) })
    }

    /// Paint the lunch trip
    ///
    /// The occupant leaves the office at `lunch_start` and spends the delay on
    /// the way out, so the hops towards the lunch room are timed from
    /// `lunch_start + delay`. They eat for a Beta-distributed duration and
    /// walk back.
    pub fn lunch<R: Rng>(&self, occupant: &mut Occupant, rng: &mut R) -> SimulationResult<()> {
        let delay = self.dists.lunch_delay(rng);
        let path = self.route_from(occupant.office, self.roles.lunch_room)?;
        if path.is_empty() {
            return Ok(());
        }
        let hops = path.len() - 1;

        let walk = forward_stamps(self.lunch_start + delay, hops, &self.dists, rng);
        let arrived = walk.last().copied().unwrap_or(self.lunch_start + delay);
        let mut stamps = Vec::with_capacity(2 * path.len());
        stamps.push(self.lunch_start);
        stamps.extend(walk.into_iter().skip(1));
        let done_eating = arrived + self.dists.eat_duration(rng);
        stamps.extend(forward_stamps(done_eating, hops, &self.dists, rng));

        trace!("Occupant {} lunches until {}s", occupant.id, done_eating);
        occupant.paint_all(paint_trip(&path, &stamps, TripActivities::uniform(ActivityType::Lunch)));
        Ok(())
    }

    /// Paint the daily meeting trip
    ///
    /// The occupant reaches the meeting room at least the minimum lead before
    /// the meeting and stays for a Normal-distributed duration past its start.
    pub fn daily_meeting<R: Rng>(
        &self,
        occupant: &mut Occupant,
        rng: &mut R,
    ) -> SimulationResult<()> {
        let attend = self.daily_meeting - self.dists.meeting_lead(rng);
        let path = self.route_from(occupant.office, self.roles.meeting_room)?;
        if path.is_empty() {
            return Ok(());
        }
        let hops = path.len() - 1;

        let mut stamps = backward_stamps(attend, hops, &self.dists, rng);
        let meeting_end = self.daily_meeting + self.dists.meeting_duration(rng);
        stamps.extend(forward_stamps(meeting_end, hops, &self.dists, rng));

        trace!("Occupant {} in meeting {}s..{}s", occupant.id, attend, meeting_end);
        occupant
            .paint_all(paint_trip(&path, &stamps, TripActivities::uniform(ActivityType::Meeting)));
        Ok(())
    }

    /// Book one appointment for a group of `group_size` guests
    ///
    /// The window is drawn inside an in-office interval longer than a
    /// Normal-sampled visit length, or inside the longest interval (with the
    /// visit shortened to fit) when none is long enough. Groups meet in the
    /// meeting room, a single guest in the host's office, where the host is
    /// painted `Busy`. Returns `None` when the host is never in their office.
    pub fn host_guests<R: Rng>(
        &self,
        host: &mut Occupant,
        group_size: usize,
        rng: &mut R,
    ) -> SimulationResult<Option<Appointment>> {
        let ranges = host.timeline().in_office_ranges(host.office);
        let longest = match ranges.iter().map(|range| range.len()).max() {
            Some(longest) => longest as i64,
            None => {
                warn!(
                    "Occupant {} is never in their office, skipping appointment for {} guest(s)",
                    host.id, group_size
                );
                return Ok(None);
            }
        };

        let requested = self.dists.guest_visit_length(rng);
        let (window, shortened) = match pick_window(&ranges, requested, rng) {
            Some(window) => (window, false),
            None => {
                let longest_ranges: Vec<Range<usize>> =
                    ranges.iter().filter(|range| range.len() as i64 == longest).cloned().collect();
                let range = longest_ranges.choose(rng).cloned().unwrap_or(0..0);
                ((range.start as i64, range.start as i64 + longest), true)
            }
        };

        let (settled_start, settled_end) = self.dists.settle(window.0, window.1, rng);
        let (location, painted) = if group_size > 1 {
            (self.roles.meeting_room, Location::Zone(self.roles.meeting_room))
        } else {
            (host.office, Location::Busy)
        };
        host.paint(PaintOp::new(ActivityType::HostingGuest, settled_start, settled_end, painted));

        let start = clamp_to_day(settled_start);
        let end = clamp_to_day(settled_end).max(start);
        let appointment =
            Appointment { host: host.id, start, end, location, group_size, shortened };

        debug!(
            "Occupant {} hosts {} guest(s) in '{}' {}-{}{}",
            host.id,
            group_size,
            self.graph.name(location),
            appointment.start_time(),
            appointment.end_time(),
            if shortened { " (shortened)" } else { "" }
        );

        Ok(Some(appointment))
    }

    /// Number of colleague visit attempts for one occupant today
    pub fn colleague_visit_attempts<R: Rng>(&self, rng: &mut R) -> usize {
        self.dists.colleague_visit_attempts(rng)
    }

    /// Propose one colleague visit for `roster[visitor]`
    ///
    /// A window is drawn inside one of the visitor's in-office intervals, then
    /// the roster is scanned in order for the first other occupant who sits in
    /// their own office for that whole window. Returns `None` when no interval
    /// fits or nobody is available.
    pub fn propose_colleague_visit<R: Rng>(
        &self,
        visitor: usize,
        roster: &[Occupant],
        rng: &mut R,
    ) -> Option<VisitPatch> {
        let occupant = roster.get(visitor)?;
        let ranges = occupant.timeline().in_office_ranges(occupant.office);
        let length = self.dists.colleague_visit_length(rng);

        let Some((start, end)) = pick_window(&ranges, length, rng) else {
            trace!("Occupant {} has no free interval for a {}s visit", occupant.id, length);
            return None;
        };

        let (host, colleague) = roster.iter().enumerate().find(|(index, colleague)| {
            *index != visitor && colleague.is_in_office_throughout(start as usize, end as usize)
        })?;

        let (settled_start, settled_end) = self.dists.settle(start, end, rng);
        debug!(
            "Occupant {} visits {} in '{}' for {}s",
            occupant.id,
            colleague.id,
            self.graph.name(colleague.office),
            settled_end - settled_start
        );

        Some(VisitPatch {
            visitor,
            host,
            visitor_op: PaintOp::new(
                ActivityType::VisitingColleague,
                settled_start,
                settled_end,
                Location::Zone(colleague.office),
            ),
            host_op: PaintOp::new(
                ActivityType::ReceivingColleague,
                settled_start,
                settled_end,
                Location::Busy,
            ),
        })
    }

    /// Materialize one guest for an appointment and paint their trip
    ///
    /// The guest reaches the entry an Exponential-sampled time before the
    /// appointment, walks so as to reach the location one hop before it
    /// starts, stays until it ends and walks back out.
    pub fn spawn_guest<R: Rng>(
        &self,
        appointment: &Appointment,
        rng: &mut R,
    ) -> SimulationResult<Guest> {
        let mut guest = Guest::new(GuestId::from_rng(rng), appointment.clone());
        let path = self.graph.route(self.roles.entry, appointment.location)?;
        let hops = path.len() - 1;
        let start = appointment.start as i64;
        let end = appointment.end as i64;

        let early = start - self.dists.guest_early(rng);
        let mut walk_in = backward_stamps(start, hops, &self.dists, rng);
        walk_in.pop();
        let first = walk_in.first().copied().unwrap_or(start);

        let mut stamps = Vec::with_capacity(2 * path.len());
        stamps.push(early.min(first));
        stamps.extend(walk_in);
        stamps.extend(forward_stamps(end, hops, &self.dists, rng));

        let ops = paint_trip(&path, &stamps, TripActivities::GUEST_VISIT);
        trace!(
            "Guest {} for {} arrives at entry {}",
            guest.id,
            appointment.host,
            TimeOfDay::from_seconds(clamp_to_day(early)).unwrap_or_default()
        );
        guest.paint(path, &ops);
        Ok(guest)
    }
}
