//! Day generation, aggregation and run control
//!
//! # Overview
//!
//! - **PopulationOrchestrator**: owns the roster and the random source, runs each day
//! - **ActivityEngine**: samples and paints one occupant's activities
//! - **ActivityDistributions**: every random draw, built once from the configuration
//! - **OccupancyAggregator**: per-zone counts and minute-resolution schedules
//! - **RunStatistics / DayStatistics**: counters reported at the end of a run
//! - **SimulationError**: error type shared by the whole crate
//!
//! # Usage Example
//!
//! ```rust
//! use occupancy_generator::facility::BuildingLayout;
//! use occupancy_generator::output::MemorySink;
//! use occupancy_generator::simulation::*;
//! use occupancy_generator::types::*;
//!
//! let layout = BuildingLayout::from_links(
//!     &["Lobby", "Office", "Kitchen"],
//!     &[("Outdoor", &["Lobby"]), ("Lobby", &["Office", "Kitchen"])],
//! );
//! let config = SimulationConfig { occupant_count: 3, seed: Some(7), ..Default::default() };
//!
//! let mut orchestrator = PopulationOrchestrator::new(config, &layout).unwrap();
//! let mut sink = MemorySink::new();
//! let stats = orchestrator.run(&mut sink).unwrap();
//! assert_eq!(stats.days_simulated(), 1);
//! ```

pub mod activity_engine;
pub mod aggregator;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod sampling;
pub mod statistics;
pub mod transit;

// Re-export all public types for convenience
pub use activity_engine::*;
pub use aggregator::*;
pub use error::*;
pub use logging::*;
pub use orchestrator::*;
pub use sampling::*;
pub use statistics::*;
pub use transit::TripActivities;
