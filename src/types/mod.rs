//! Core types and identifiers for the occupancy generator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulation system.
//!
//! # Overview
//!
//! The types module provides the foundational data types for the simulation:
//!
//! - **Identifiers**: UUID-based occupant and guest identifiers, dense zone indices
//! - **Time**: seconds-from-midnight [`TimeOfDay`] and day-length constants
//! - **Enums**: timeline locations, activities, paint layers and occupant states
//! - **Configuration**: Simulation configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use occupancy_generator::types::*;
//!
//! // Timeline values are a tagged union, `Busy` resolves to the owner's office
//! let office = ZoneId(2);
//! assert_eq!(Location::Busy.resolve(Some(office)), Some(office));
//!
//! // Clock times parse and print in HH:MM notation
//! let meeting: TimeOfDay = "16:00".parse().unwrap();
//! assert_eq!(meeting.seconds(), 16 * 3600);
//!
//! // Configure simulation
//! let config = SimulationConfig {
//!     occupant_count: 25,
//!     seed: Some(42),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;
pub mod time;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
pub use time::*;
