//! Undirected zone adjacency graph and breadth-first routing

use crate::facility::BuildingModel;
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::defaults::OUTDOOR_ZONE;
use crate::types::ZoneId;
use std::collections::{HashMap, VecDeque};
use tracing::{debug, instrument};

/// Symmetric adjacency over every node named by the building model
///
/// Building zones get the lowest ids, in the model's declaration order. The
/// `Outdoor` exterior and any neighbour not declared as a zone are appended
/// after them; they take part in routing but are never building zones.
#[derive(Debug, Clone)]
pub struct ZoneGraph {
    names: Vec<String>,
    index: HashMap<String, ZoneId>,
    adjacency: Vec<Vec<ZoneId>>,
    building_zone_count: usize,
}

impl ZoneGraph {
    /// Build the graph from a building model, adding the reverse of every link
    #[instrument(skip(model))]
    pub fn from_model(model: &dyn BuildingModel) -> SimulationResult<Self> {
        let zone_names = model.list_zone_names();
        if zone_names.is_empty() {
            return Err(SimulationError::building_model_error("building has no zones"));
        }

        let mut graph = Self {
            names: Vec::new(),
            index: HashMap::new(),
            adjacency: Vec::new(),
            building_zone_count: 0,
        };

        for name in &zone_names {
            if name == OUTDOOR_ZONE {
                return Err(SimulationError::building_model_error(format!(
                    "'{}' cannot be a building zone",
                    OUTDOOR_ZONE
                )));
            }
            if graph.index.contains_key(name) {
                return Err(SimulationError::building_model_error(format!(
                    "duplicate zone name '{}'",
                    name
                )));
            }
            graph.intern(name);
        }
        graph.building_zone_count = graph.names.len();

        for (zone, neighbours) in model.zone_adjacency() {
            let from = graph.intern(&zone);
            for neighbour in neighbours {
                let to = graph.intern(&neighbour);
                graph.link(from, to);
                graph.link(to, from);
            }
        }

        debug!(
            "Zone graph built with {} building zones and {} nodes",
            graph.building_zone_count,
            graph.names.len()
        );

        Ok(graph)
    }

    fn intern(&mut self, name: &str) -> ZoneId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = ZoneId(self.names.len() as u32);
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), id);
        self.adjacency.push(Vec::new());
        id
    }

    fn link(&mut self, from: ZoneId, to: ZoneId) {
        if from == to {
            return;
        }
        let neighbours = &mut self.adjacency[from.index()];
        if !neighbours.contains(&to) {
            neighbours.push(to);
        }
    }

    /// Number of nodes, `Outdoor` and undeclared neighbours included
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Look up a node by name
    pub fn lookup(&self, name: &str) -> Option<ZoneId> {
        self.index.get(name).copied()
    }

    /// Look up a node by name, failing with [`SimulationError::UnknownZone`]
    pub fn zone_id(&self, name: &str) -> SimulationResult<ZoneId> {
        self.lookup(name).ok_or_else(|| SimulationError::unknown_zone(name))
    }

    /// Name of a node
    pub fn name(&self, zone: ZoneId) -> &str {
        self.names.get(zone.index()).map(String::as_str).unwrap_or("<unknown>")
    }

    /// The exterior node, if the model links anything to it
    pub fn outdoor(&self) -> Option<ZoneId> {
        self.lookup(OUTDOOR_ZONE)
    }

    /// Whether the node is a declared building zone
    pub fn is_building_zone(&self, zone: ZoneId) -> bool {
        zone.index() < self.building_zone_count
    }

    /// Declared building zones, in declaration order
    pub fn building_zones(&self) -> impl Iterator<Item = ZoneId> + '_ {
        (0..self.building_zone_count as u32).map(ZoneId)
    }

    /// Names of the declared building zones
    pub fn zone_names(&self) -> &[String] {
        &self.names[..self.building_zone_count]
    }

    /// Neighbours of a node in insertion order
    pub fn neighbours(&self, zone: ZoneId) -> &[ZoneId] {
        self.adjacency.get(zone.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Shortest path from `start` to `end`, both inclusive
    ///
    /// Neighbours are expanded in insertion order from a FIFO frontier, so the
    /// answer is stable for a given graph. When `end` cannot be reached the
    /// result is the single-element path `[start]`; use [`ZoneGraph::route`]
    /// when that case has to be an error.
    pub fn shortest_path(&self, start: ZoneId, end: ZoneId) -> Vec<ZoneId> {
        if start == end {
            return vec![start];
        }

        let mut visited = vec![false; self.len()];
        let mut parent: Vec<Option<ZoneId>> = vec![None; self.len()];
        let mut frontier = VecDeque::new();

        if let Some(seen) = visited.get_mut(start.index()) {
            *seen = true;
            frontier.push_back(start);
        }

        while let Some(vertex) = frontier.pop_front() {
            for &node in self.neighbours(vertex) {
                if node == end {
                    let mut path = vec![end, vertex];
                    let mut current = vertex;
                    while let Some(previous) = parent[current.index()] {
                        path.push(previous);
                        current = previous;
                    }
                    path.reverse();
                    return path;
                }
                if !visited[node.index()] {
                    visited[node.index()] = true;
                    parent[node.index()] = Some(vertex);
                    frontier.push_back(node);
                }
            }
        }

        vec![start]
    }

    /// Shortest path that is guaranteed to end at `end`
    pub fn route(&self, start: ZoneId, end: ZoneId) -> SimulationResult<Vec<ZoneId>> {
        let path = self.shortest_path(start, end);
        match path.last() {
            Some(&last) if last == end => Ok(path),
            _ => Err(SimulationError::unreachable_zone(self.name(start), self.name(end))),
        }
    }

    /// Every node reachable from `start`, `start` first, in breadth-first order
    pub fn reachable_from(&self, start: ZoneId) -> Vec<ZoneId> {
        let mut visited = vec![false; self.len()];
        let mut order = Vec::new();
        let mut frontier = VecDeque::new();

        if let Some(seen) = visited.get_mut(start.index()) {
            *seen = true;
            frontier.push_back(start);
        }

        while let Some(vertex) = frontier.pop_front() {
            order.push(vertex);
            for &node in self.neighbours(vertex) {
                if !visited[node.index()] {
                    visited[node.index()] = true;
                    frontier.push_back(node);
                }
            }
        }

        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::BuildingLayout;

    fn names(graph: &ZoneGraph, path: &[ZoneId]) -> Vec<String> {
        path.iter().map(|&z| graph.name(z).to_string()).collect()
    }

    #[test]
    fn test_graph_is_symmetric() {
        let layout = BuildingLayout::from_links(
            &["Entry", "A", "B"],
            &[("Outdoor", &["Entry"]), ("Entry", &["A"]), ("A", &["B"])],
        );
        let graph = ZoneGraph::from_model(&layout).unwrap();

        let a = graph.zone_id("A").unwrap();
        let b = graph.zone_id("B").unwrap();
        let entry = graph.zone_id("Entry").unwrap();
        assert!(graph.neighbours(b).contains(&a));
        assert!(graph.neighbours(a).contains(&entry));
        assert_eq!(graph.len(), 4);
        assert_eq!(graph.building_zones().count(), 3);
        assert!(!graph.is_building_zone(graph.outdoor().unwrap()));
    }

    #[test]
    fn test_linear_path() {
        let layout = BuildingLayout::from_links(
            &["Entry", "A", "B"],
            &[("Outdoor", &["Entry"]), ("Entry", &["A"]), ("A", &["B"])],
        );
        let graph = ZoneGraph::from_model(&layout).unwrap();
        let entry = graph.zone_id("Entry").unwrap();
        let b = graph.zone_id("B").unwrap();

        assert_eq!(names(&graph, &graph.shortest_path(entry, b)), vec!["Entry", "A", "B"]);
        assert_eq!(graph.shortest_path(b, b), vec![b]);
    }

    #[test]
    fn test_unreachable_falls_back_to_start() {
        let layout = BuildingLayout::from_links(
            &["Entry", "A", "Island"],
            &[("Outdoor", &["Entry"]), ("Entry", &["A"])],
        );
        let graph = ZoneGraph::from_model(&layout).unwrap();
        let entry = graph.zone_id("Entry").unwrap();
        let island = graph.zone_id("Island").unwrap();

        assert_eq!(graph.shortest_path(entry, island), vec![entry]);
        assert!(matches!(
            graph.route(entry, island),
            Err(SimulationError::UnreachableZone { .. })
        ));
        assert!(!graph.reachable_from(entry).contains(&island));
    }

    #[test]
    fn test_unknown_zone_lookup() {
        let layout = BuildingLayout::from_links(&["A"], &[]);
        let graph = ZoneGraph::from_model(&layout).unwrap();
        assert!(matches!(graph.zone_id("Nowhere"), Err(SimulationError::UnknownZone(_))));
        assert!(graph.outdoor().is_none());
    }

    #[test]
    fn test_breadth_first_prefers_fewest_hops() {
        // Entry-A-B-C and a shortcut Entry-C
        let layout = BuildingLayout::from_links(
            &["Entry", "A", "B", "C"],
            &[("Entry", &["A", "C"]), ("A", &["B"]), ("B", &["C"])],
        );
        let graph = ZoneGraph::from_model(&layout).unwrap();
        let entry = graph.zone_id("Entry").unwrap();
        let b = graph.zone_id("B").unwrap();
        let c = graph.zone_id("C").unwrap();

        assert_eq!(graph.shortest_path(entry, c), vec![entry, c]);
        assert_eq!(graph.shortest_path(entry, b).len(), 3);
    }
}
