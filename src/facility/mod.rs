//! Building topology and zone roles
//!
//! This module turns a building model into the routing graph used by every
//! movement in the simulation, and picks the zones that play a fixed role.
//!
//! # Overview
//!
//! - **BuildingModel**: the narrow interface to the building (zone names, adjacency)
//! - **BuildingLayout**: JSON-backed building model
//! - **ZoneGraph**: symmetric adjacency with breadth-first shortest paths
//! - **ZoneRoles**: entry zone, meeting room, lunch room and the office pool
//!
//! # Usage Example
//!
//! ```rust
//! use occupancy_generator::facility::*;
//!
//! let layout = BuildingLayout::from_links(
//!     &["Entry", "A", "B"],
//!     &[("Outdoor", &["Entry"]), ("Entry", &["A"]), ("A", &["B"])],
//! );
//! let graph = ZoneGraph::from_model(&layout).unwrap();
//!
//! let entry = graph.zone_id("Entry").unwrap();
//! let b = graph.zone_id("B").unwrap();
//! let path: Vec<&str> = graph.shortest_path(entry, b).into_iter().map(|z| graph.name(z)).collect();
//! assert_eq!(path, ["Entry", "A", "B"]);
//! ```

pub mod building;
pub mod roles;
pub mod zone_graph;

// Re-export all public types for convenience
pub use building::{BuildingLayout, BuildingModel};
pub use roles::ZoneRoles;
pub use zone_graph::ZoneGraph;
