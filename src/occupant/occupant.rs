//! Persistent occupants and the per-second view shared with guests

use crate::occupant::{PaintOp, PaintPlan, Timeline};
use crate::types::{Location, OccupantId, OccupantState, ZoneId};

/// Anything that moves through the building during a day
pub trait Person {
    /// The person's timeline for the current day
    fn timeline(&self) -> &Timeline;

    /// Office that `Busy` seconds are attributed to
    fn own_office(&self) -> Option<ZoneId>;

    /// Zone the person counts in at `second`, with `Busy` resolved
    fn zone_at(&self, second: usize) -> Option<ZoneId> {
        self.timeline().get(second).resolve(self.own_office())
    }

    /// Whether the person is inside the building at `second`
    fn is_present_at(&self, second: usize) -> bool {
        self.timeline().get(second).is_present()
    }
}

/// A persistent occupant with an assigned office
///
/// Created once when the simulation is set up and reused every day; the
/// timeline and paint plan are reset at the start of each day.
#[derive(Debug, Clone)]
pub struct Occupant {
    /// Unique identifier
    pub id: OccupantId,
    /// Personal office, drawn once from the office pool
    pub office: ZoneId,
    timeline: Timeline,
    plan: PaintPlan,
}

impl Occupant {
    /// Create an occupant with an empty day
    pub fn new(id: OccupantId, office: ZoneId) -> Self {
        Self { id, office, timeline: Timeline::new(), plan: PaintPlan::new() }
    }

    /// Start a new day: every second `Unset`, no paint ops
    pub fn reset(&mut self) {
        self.timeline.reset();
        self.plan.clear();
    }

    /// Record an op and write it onto the timeline
    ///
    /// Ops arrive in non-decreasing layer order during day generation, so
    /// writing them as they come yields the same timeline as rendering the
    /// whole plan.
    pub fn paint(&mut self, op: PaintOp) {
        self.timeline.apply(&op);
        self.plan.push(op);
    }

    /// Record and write several ops in order
    pub fn paint_all<I: IntoIterator<Item = PaintOp>>(&mut self, ops: I) {
        for op in ops {
            self.paint(op);
        }
    }

    /// The day's paint operations
    pub fn plan(&self) -> &PaintPlan {
        &self.plan
    }

    /// Whether the occupant is inside the building at any point of the day
    pub fn is_present_today(&self) -> bool {
        !self.plan.is_empty()
    }

    /// Raw timeline value at `second`
    pub fn location_at(&self, second: usize) -> Location {
        self.timeline.get(second)
    }

    /// State-machine state at `second`, from the op visible at that second
    pub fn state_at(&self, second: usize) -> OccupantState {
        self.plan
            .winner_at(second)
            .map(|op| op.activity.state())
            .unwrap_or(OccupantState::NotPresent)
    }

    /// Whether the occupant sits in their own office for the whole window
    pub fn is_in_office_throughout(&self, start: usize, end: usize) -> bool {
        self.timeline.is_in_zone_throughout(self.office, start, end)
    }
}

impl Person for Occupant {
    fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    fn own_office(&self) -> Option<ZoneId> {
        Some(self.office)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ActivityType;

    #[test]
    fn test_busy_resolves_to_own_office() {
        let office = ZoneId(3);
        let mut occupant = Occupant::new(OccupantId::new(), office);
        occupant.paint(PaintOp::new(ActivityType::Working, 100, 400, Location::Zone(office)));
        occupant.paint(PaintOp::new(ActivityType::HostingGuest, 200, 300, Location::Busy));

        assert_eq!(occupant.location_at(250), Location::Busy);
        assert_eq!(occupant.zone_at(250), Some(office));
        assert_eq!(occupant.zone_at(50), None);
        assert_eq!(occupant.state_at(250), OccupantState::HostingGuest);
        assert_eq!(occupant.state_at(150), OccupantState::Working);
        assert_eq!(occupant.state_at(50), OccupantState::NotPresent);
    }

    #[test]
    fn test_incremental_paint_matches_render() {
        let office = ZoneId(1);
        let mut occupant = Occupant::new(OccupantId::new(), office);
        occupant.paint_all([
            PaintOp::new(ActivityType::Arrival, 100, 110, Location::Zone(ZoneId(0))),
            PaintOp::new(ActivityType::Working, 110, 5000, Location::Zone(office)),
            PaintOp::new(ActivityType::Lunch, 1000, 2000, Location::Zone(ZoneId(2))),
            PaintOp::new(ActivityType::Meeting, 3000, 3500, Location::Zone(ZoneId(5))),
        ]);

        assert!(occupant.plan().is_layered());
        assert_eq!(&occupant.plan().render(), occupant.timeline());
    }

    #[test]
    fn test_reset_clears_the_day() {
        let mut occupant = Occupant::new(OccupantId::new(), ZoneId(1));
        occupant.paint(PaintOp::new(ActivityType::Working, 0, 10, Location::Zone(ZoneId(1))));
        assert!(occupant.is_present_today());

        occupant.reset();
        assert!(!occupant.is_present_today());
        assert_eq!(occupant.timeline().present_seconds(), 0);
    }
}
