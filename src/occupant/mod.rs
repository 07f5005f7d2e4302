//! Occupants, guests and their day timelines
//!
//! This module holds everything that describes where a person is during one
//! simulated day.
//!
//! # Overview
//!
//! - **Timeline**: 86,400 per-second [`Location`](crate::types::Location) entries
//! - **PaintOp / PaintPlan**: layered interval writes that compose a day
//! - **Occupant**: persistent occupant with an office, reused across days
//! - **Guest / Appointment**: transient visitors and the windows they attend
//! - **Person**: common per-second view used by aggregation
//!
//! # Usage Example
//!
//! ```rust
//! use occupancy_generator::occupant::*;
//! use occupancy_generator::types::*;
//!
//! let office = ZoneId(1);
//! let mut occupant = Occupant::new(OccupantId::new(), office);
//! occupant.paint(PaintOp::new(ActivityType::Working, 32_400, 61_200, Location::Zone(office)));
//! occupant.paint(PaintOp::new(ActivityType::Meeting, 57_600, 58_500, Location::Zone(ZoneId(4))));
//!
//! assert_eq!(occupant.state_at(58_000), OccupantState::Meeting);
//! assert_eq!(occupant.timeline().in_office_ranges(office), vec![32_400..57_600, 58_500..61_200]);
//! ```

pub mod guest;
#[allow(clippy::module_inception)]
pub mod occupant;
pub mod paint;
pub mod timeline;

// Re-export all public types for convenience
pub use guest::{Appointment, Guest};
pub use occupant::{Occupant, Person};
pub use paint::{PaintOp, PaintPlan};
pub use timeline::Timeline;
