//! Occupancy Generator
//!
//! A stochastic occupancy generator that simulates the people of an office
//! building second by second and turns their movements into per-zone
//! occupancy schedules for building-energy simulation.
//!
//! # Overview
//!
//! Every persistent occupant owns an office and a 86,400-entry timeline that
//! records which zone they are in at each second of the day. Activities are
//! painted onto that timeline in layers (commute, lunch, daily meeting, guest
//! hosting, colleague visits), each walking the shortest path through the
//! zone graph. Guests arrive through the entry for appointments with present
//! occupants. At the end of a day all timelines are counted per zone and
//! compressed into minute-aligned piecewise-constant schedules.
//!
//! ## Quick Start
//!
//! ```rust
//! use occupancy_generator::*;
//!
//! let layout = BuildingLayout::from_links(
//!     &["Entrance", "Corridor", "Office A", "Office B", "Canteen", "Meeting"],
//!     &[
//!         ("Outdoor", &["Entrance"]),
//!         ("Entrance", &["Corridor"]),
//!         ("Corridor", &["Office A", "Office B", "Canteen", "Meeting"]),
//!     ],
//! );
//! let config = SimulationConfig { occupant_count: 4, seed: Some(42), ..Default::default() };
//!
//! let mut orchestrator = PopulationOrchestrator::new(config, &layout)?;
//! let mut sink = MemorySink::new();
//! let stats = orchestrator.run(&mut sink)?;
//! println!("{}", stats.summary());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Identifiers, enums, time of day and configuration
//! - [`facility`]: Building model, zone graph and designated zones
//! - [`occupant`]: Timelines, paint plans, occupants and guests
//! - [`simulation`]: Activity engine, orchestration, aggregation and statistics
//! - [`output`]: Schedule sinks
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │  Facility   │    │  Occupant   │    │   Output    │
//! │             │    │             │    │             │
//! │ ZoneGraph   │    │ Timeline    │    │ Schedule    │
//! │ ZoneRoles   │    │ PaintPlan   │    │ Sinks       │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!        ▲                   ▲                   ▲
//!        │                   │                   │
//! ┌───────────────────────────────────────────────────┐
//! │                    Simulation                     │
//! │                                                   │
//! │ Orchestrator ──► ActivityEngine ──► Aggregator    │
//! └───────────────────────────────────────────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod facility;
pub mod occupant;
pub mod output;
pub mod simulation;
pub mod types;

// Core types and identifiers
pub use types::{
    ActivityType, ConfigValidationError, GuestId, Location, OccupantId, OccupantState,
    OutputFormat, SimulationConfig, TimeOfDay, ZoneId,
};

// Facility
pub use facility::{BuildingLayout, BuildingModel, ZoneGraph, ZoneRoles};

// Occupants
pub use occupant::{Appointment, Guest, Occupant, PaintOp, PaintPlan, Person, Timeline};

// Output
pub use output::{
    CompactScheduleSink, JsonLinesSink, MemorySink, ScheduleBreakpoint, ScheduleSink,
};

// Simulation
pub use simulation::{
    ActivityEngine, DayStatistics, OccupancyAggregator, PopulationOrchestrator, RunStatistics,
    ScheduleSegment, SimulationError, SimulationResult,
};
