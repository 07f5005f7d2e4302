//! Building model access
//!
//! The simulation only needs two things from a building: the names of its
//! thermal zones and which zones connect to which. [`BuildingModel`] is that
//! narrow interface; [`BuildingLayout`] is the JSON-backed implementation used
//! by the command line tool and the tests.

use crate::simulation::{SimulationError, SimulationResult};
use crate::types::defaults::OUTDOOR_ZONE;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

/// Source of zone names and zone adjacency
pub trait BuildingModel {
    /// Ordered building zone names (the exterior is not a zone)
    fn list_zone_names(&self) -> Vec<String>;

    /// Neighbours of each node, including the `Outdoor` exterior node
    fn zone_adjacency(&self) -> BTreeMap<String, Vec<String>>;
}

/// Zone list and adjacency map loaded from JSON
///
/// ```json
/// {
///   "zones": ["Lobby", "Office 1", "Cafeteria"],
///   "adjacency": {
///     "Outdoor": ["Lobby"],
///     "Lobby": ["Office 1", "Cafeteria"]
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingLayout {
    /// Building zone names in declaration order
    pub zones: Vec<String>,
    /// Adjacency lists; links only need to be listed in one direction
    #[serde(default)]
    pub adjacency: BTreeMap<String, Vec<String>>,
}

impl BuildingLayout {
    /// Create a layout from zones and links
    pub fn new(zones: Vec<String>, adjacency: BTreeMap<String, Vec<String>>) -> Self {
        Self { zones, adjacency }
    }

    /// Build a layout from string slices, mostly for tests and demos
    pub fn from_links(zones: &[&str], links: &[(&str, &[&str])]) -> Self {
        let adjacency = links
            .iter()
            .map(|(zone, neighbours)| {
                (zone.to_string(), neighbours.iter().map(|n| n.to_string()).collect())
            })
            .collect();
        Self { zones: zones.iter().map(|z| z.to_string()).collect(), adjacency }
    }

    /// Load and validate a layout from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> SimulationResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let layout: BuildingLayout = serde_json::from_str(&content)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Check the layout is usable
    pub fn validate(&self) -> SimulationResult<()> {
        if self.zones.is_empty() {
            return Err(SimulationError::building_model_error("building has no zones"));
        }

        let mut seen = HashSet::new();
        for zone in &self.zones {
            if zone.trim().is_empty() {
                return Err(SimulationError::building_model_error("zone names must not be empty"));
            }
            if zone == OUTDOOR_ZONE {
                return Err(SimulationError::building_model_error(format!(
                    "'{}' is the exterior node and cannot be listed as a zone",
                    OUTDOOR_ZONE
                )));
            }
            if !seen.insert(zone.as_str()) {
                return Err(SimulationError::building_model_error(format!(
                    "duplicate zone name '{}'",
                    zone
                )));
            }
        }

        Ok(())
    }
}

impl BuildingModel for BuildingLayout {
    fn list_zone_names(&self) -> Vec<String> {
        self.zones.clone()
    }

    fn zone_adjacency(&self) -> BTreeMap<String, Vec<String>> {
        self.adjacency.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_layout_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"zones": ["Lobby", "Office"], "adjacency": {{"Outdoor": ["Lobby"], "Lobby": ["Office"]}}}}"#
        )
        .unwrap();

        let layout = BuildingLayout::from_file(file.path()).unwrap();
        assert_eq!(layout.list_zone_names(), vec!["Lobby", "Office"]);
        assert_eq!(layout.zone_adjacency()["Outdoor"], vec!["Lobby"]);
    }

    #[test]
    fn test_validation() {
        assert!(BuildingLayout::default().validate().is_err());

        let duplicate = BuildingLayout::from_links(&["A", "A"], &[]);
        assert!(matches!(duplicate.validate(), Err(SimulationError::BuildingModelError(_))));

        let outdoor = BuildingLayout::from_links(&["Outdoor", "A"], &[]);
        assert!(outdoor.validate().is_err());

        let ok = BuildingLayout::from_links(&["A", "B"], &[("Outdoor", &["A"]), ("A", &["B"])]);
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{ not json").unwrap();
        let result = BuildingLayout::from_file(file.path());
        assert!(matches!(result, Err(SimulationError::SerializationError(_))));
    }
}
