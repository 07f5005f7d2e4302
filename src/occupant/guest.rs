//! Transient guests and their appointments

use crate::occupant::{PaintOp, PaintPlan, Person, Timeline};
use crate::types::{GuestId, OccupantId, OccupantState, TimeOfDay, ZoneId};
use serde::{Deserialize, Serialize};

/// A hosted appointment: where and when a group of guests meets its host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Host occupant
    pub host: OccupantId,
    /// Start of the hosted window, settling margin included
    pub start: u32,
    /// End of the hosted window
    pub end: u32,
    /// Meeting room for groups, the host's office for a single guest
    pub location: ZoneId,
    /// Number of guests in the group
    pub group_size: usize,
    /// No in-office interval was long enough and the longest one was used
    pub shortened: bool,
}

impl Appointment {
    /// Window length in seconds
    pub fn duration(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Window start as a clock time
    pub fn start_time(&self) -> TimeOfDay {
        TimeOfDay::from_seconds(self.start).unwrap_or(TimeOfDay::END_OF_DAY)
    }

    /// Window end as a clock time
    pub fn end_time(&self) -> TimeOfDay {
        TimeOfDay::from_seconds(self.end).unwrap_or(TimeOfDay::END_OF_DAY)
    }
}

/// A guest materialized for one appointment and dropped after aggregation
#[derive(Debug, Clone)]
pub struct Guest {
    /// Unique identifier
    pub id: GuestId,
    /// The appointment the guest attends
    pub appointment: Appointment,
    /// Zones walked from the entry to the appointment location
    pub path: Vec<ZoneId>,
    timeline: Timeline,
    plan: PaintPlan,
}

impl Guest {
    /// Create a guest with an empty day
    pub fn new(id: GuestId, appointment: Appointment) -> Self {
        Self { id, appointment, path: Vec::new(), timeline: Timeline::new(), plan: PaintPlan::new() }
    }

    /// Write the guest's trip onto the timeline
    pub fn paint(&mut self, path: Vec<ZoneId>, ops: &[PaintOp]) {
        for op in ops {
            self.timeline.apply(op);
        }
        self.plan.extend(ops.iter().copied());
        self.path = path;
    }

    /// State at `second`: walking in, at the appointment, or walking out
    pub fn state_at(&self, second: usize) -> OccupantState {
        self.plan
            .winner_at(second)
            .map(|op| op.activity.state())
            .unwrap_or(OccupantState::NotPresent)
    }

    /// The host occupant
    pub fn host(&self) -> OccupantId {
        self.appointment.host
    }
}

impl Person for Guest {
    fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    fn own_office(&self) -> Option<ZoneId> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActivityType, Location};

    fn appointment() -> Appointment {
        Appointment {
            host: OccupantId::new(),
            start: 36_000,
            end: 37_800,
            location: ZoneId(2),
            group_size: 1,
            shortened: false,
        }
    }

    #[test]
    fn test_appointment_times() {
        let appointment = appointment();
        assert_eq!(appointment.duration(), 1800);
        assert_eq!(appointment.start_time().to_string(), "10:00");
        assert_eq!(appointment.end_time().to_string(), "10:30");
    }

    #[test]
    fn test_guest_has_no_office() {
        let mut guest = Guest::new(GuestId::new(), appointment());
        guest.paint(
            vec![ZoneId(0), ZoneId(2)],
            &[PaintOp::new(ActivityType::GuestVisit, 36_000, 37_800, Location::Zone(ZoneId(2)))],
        );

        assert_eq!(guest.own_office(), None);
        assert_eq!(guest.zone_at(36_500), Some(ZoneId(2)));
        assert_eq!(guest.state_at(36_500), OccupantState::AttendingAppointment);
        assert_eq!(guest.state_at(35_000), OccupantState::NotPresent);
        assert!(!guest.is_present_at(35_000));
        assert_eq!(guest.path.len(), 2);
    }
}
