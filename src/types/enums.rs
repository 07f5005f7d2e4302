//! Enumeration types for the occupancy generator
//!
//! This module contains the timeline location union, the activity kinds and
//! their paint layers, the occupant state machine states and output formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ZoneId;

/// Value stored in one second of an occupant's timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Location {
    /// Outside the building or not yet arrived
    #[default]
    Unset,
    /// Physically inside the given zone
    Zone(ZoneId),
    /// Present but attributed to the occupant's own office (hosting a guest or a colleague)
    Busy,
}

impl Location {
    /// Whether the occupant is inside the building at this second
    pub fn is_present(self) -> bool {
        !matches!(self, Location::Unset)
    }

    /// Resolve `Busy` against the owner's office; guests have no office and never hold `Busy`
    pub fn resolve(self, own_office: Option<ZoneId>) -> Option<ZoneId> {
        match self {
            Location::Unset => None,
            Location::Zone(zone) => Some(zone),
            Location::Busy => own_office,
        }
    }
}

/// Kinds of activity painted onto a timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityType {
    /// Walking in from the entry zone to the office
    Arrival,
    /// Ordinary presence in the office between arrival and departure
    Working,
    /// Walking out from the office to the entry zone
    Departure,
    /// Round trip to the lunch room
    Lunch,
    /// Round trip to the daily meeting
    Meeting,
    /// Receiving guests, in the office or the meeting room
    HostingGuest,
    /// Sitting in a colleague's office
    VisitingColleague,
    /// Being visited by a colleague in the own office
    ReceivingColleague,
    /// A guest's stay at the appointment location
    GuestVisit,
}

impl ActivityType {
    /// Paint layer of this activity; higher layers overwrite lower ones
    pub fn layer(self) -> ActivityLayer {
        match self {
            ActivityType::Arrival | ActivityType::Working | ActivityType::Departure => {
                ActivityLayer::Commute
            }
            ActivityType::GuestVisit => ActivityLayer::Commute,
            ActivityType::Lunch => ActivityLayer::Lunch,
            ActivityType::Meeting => ActivityLayer::Meeting,
            ActivityType::HostingGuest => ActivityLayer::GuestHosting,
            ActivityType::VisitingColleague | ActivityType::ReceivingColleague => {
                ActivityLayer::ColleagueVisit
            }
        }
    }

    /// State-machine state an occupant is in while this activity is the visible one
    pub fn state(self) -> OccupantState {
        match self {
            ActivityType::Arrival => OccupantState::Arriving,
            ActivityType::GuestVisit => OccupantState::AttendingAppointment,
            ActivityType::Working | ActivityType::ReceivingColleague => OccupantState::Working,
            ActivityType::Departure => OccupantState::Departing,
            ActivityType::Lunch => OccupantState::Lunch,
            ActivityType::Meeting => OccupantState::Meeting,
            ActivityType::HostingGuest => OccupantState::HostingGuest,
            ActivityType::VisitingColleague => OccupantState::VisitingColleague,
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityType::Arrival => write!(f, "Arrival"),
            ActivityType::Working => write!(f, "Working"),
            ActivityType::Departure => write!(f, "Departure"),
            ActivityType::Lunch => write!(f, "Lunch"),
            ActivityType::Meeting => write!(f, "Meeting"),
            ActivityType::HostingGuest => write!(f, "Hosting Guest"),
            ActivityType::VisitingColleague => write!(f, "Visiting Colleague"),
            ActivityType::ReceivingColleague => write!(f, "Receiving Colleague"),
            ActivityType::GuestVisit => write!(f, "Guest Visit"),
        }
    }
}

/// Fixed composition order of one day; later layers win at overlapping seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActivityLayer {
    /// Arrival, office presence and departure
    Commute,
    /// Lunch trip
    Lunch,
    /// Daily meeting
    Meeting,
    /// Guest appointments
    GuestHosting,
    /// Colleague visits
    ColleagueVisit,
}

/// States of the per-occupant daily state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OccupantState {
    /// Outside the building
    NotPresent,
    /// Walking in
    Arriving,
    /// At the desk
    Working,
    /// Away for lunch
    Lunch,
    /// In the daily meeting
    Meeting,
    /// Receiving guests
    HostingGuest,
    /// In a colleague's office
    VisitingColleague,
    /// A guest at their appointment
    AttendingAppointment,
    /// Walking out
    Departing,
}

impl fmt::Display for OccupantState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OccupantState::NotPresent => write!(f, "Not Present"),
            OccupantState::Arriving => write!(f, "Arriving"),
            OccupantState::Working => write!(f, "Working"),
            OccupantState::Lunch => write!(f, "Lunch"),
            OccupantState::Meeting => write!(f, "Meeting"),
            OccupantState::HostingGuest => write!(f, "Hosting Guest"),
            OccupantState::VisitingColleague => write!(f, "Visiting Colleague"),
            OccupantState::AttendingAppointment => write!(f, "Attending Appointment"),
            OccupantState::Departing => write!(f, "Departing"),
        }
    }
}

/// Output format options for generated schedules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    /// One JSON object per zone per day
    Json,
    /// Simulator `Schedule:Compact` text records
    Compact,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Compact => write!(f, "Schedule:Compact"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" | "jsonl" => Ok(OutputFormat::Json),
            "compact" | "schedule:compact" | "idf" => Ok(OutputFormat::Compact),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}
