//! Designated zones: entry, meeting room, lunch room and the office pool

use crate::facility::ZoneGraph;
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::{SimulationConfig, ZoneId};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Zones with a fixed role for the whole simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRoles {
    /// Where everybody enters from `Outdoor`
    pub entry: ZoneId,
    /// Daily meeting and group appointments
    pub meeting_room: ZoneId,
    /// Lunch service
    pub lunch_room: ZoneId,
    /// Zones that can be handed out as personal offices
    pub office_pool: Vec<ZoneId>,
}

impl ZoneRoles {
    /// Pick the roles once at setup
    ///
    /// Entry is drawn among building zones adjacent to `Outdoor`, meeting and
    /// lunch rooms among zones reachable from the entry (they may coincide).
    /// The office pool is whatever reachable zone is left.
    #[instrument(skip_all)]
    pub fn select<R: Rng>(
        graph: &ZoneGraph,
        config: &SimulationConfig,
        rng: &mut R,
    ) -> SimulationResult<Self> {
        let entry = match &config.entry_zone {
            Some(name) => {
                let zone = graph.zone_id(name)?;
                if !graph.is_building_zone(zone) {
                    return Err(SimulationError::zone_pool(format!(
                        "entry zone '{}' is not a building zone",
                        name
                    )));
                }
                zone
            }
            None => {
                let outdoor = graph.outdoor().ok_or_else(|| {
                    SimulationError::zone_pool("no zone is linked to 'Outdoor'")
                })?;
                let candidates: Vec<ZoneId> = graph
                    .neighbours(outdoor)
                    .iter()
                    .copied()
                    .filter(|&zone| graph.is_building_zone(zone))
                    .collect();
                *candidates.choose(rng).ok_or_else(|| {
                    SimulationError::zone_pool("no building zone is linked to 'Outdoor'")
                })?
            }
        };

        let reachable: Vec<ZoneId> = graph
            .reachable_from(entry)
            .into_iter()
            .filter(|&zone| graph.is_building_zone(zone))
            .collect();

        let unreachable: Vec<&str> = graph
            .building_zones()
            .filter(|zone| !reachable.contains(zone))
            .map(|zone| graph.name(zone))
            .collect();
        if !unreachable.is_empty() {
            warn!(
                "{} zone(s) unreachable from entry '{}' and left out of every role: {:?}",
                unreachable.len(),
                graph.name(entry),
                unreachable
            );
        }

        let meeting_room = Self::pick(graph, &reachable, config.meeting_room.as_deref(), rng)?;
        let lunch_room = Self::pick(graph, &reachable, config.lunch_room.as_deref(), rng)?;

        let office_pool: Vec<ZoneId> = reachable
            .into_iter()
            .filter(|&zone| zone != meeting_room && zone != lunch_room)
            .collect();

        if office_pool.is_empty() {
            return Err(SimulationError::zone_pool(format!(
                "no office left once meeting room '{}' and lunch room '{}' are reserved",
                graph.name(meeting_room),
                graph.name(lunch_room)
            )));
        }

        info!(
            "Entry '{}', meeting room '{}', lunch room '{}', {} office zone(s)",
            graph.name(entry),
            graph.name(meeting_room),
            graph.name(lunch_room),
            office_pool.len()
        );

        Ok(Self { entry, meeting_room, lunch_room, office_pool })
    }

    fn pick<R: Rng>(
        graph: &ZoneGraph,
        reachable: &[ZoneId],
        name: Option<&str>,
        rng: &mut R,
    ) -> SimulationResult<ZoneId> {
        match name {
            Some(name) => {
                let zone = graph.zone_id(name)?;
                if reachable.contains(&zone) {
                    Ok(zone)
                } else {
                    Err(SimulationError::zone_pool(format!(
                        "'{}' is not reachable from the entry zone",
                        name
                    )))
                }
            }
            None => reachable
                .choose(rng)
                .copied()
                .ok_or_else(|| SimulationError::zone_pool("no zone reachable from entry")),
        }
    }

    /// Draw an office from the pool, with replacement
    pub fn draw_office<R: Rng>(&self, rng: &mut R) -> SimulationResult<ZoneId> {
        self.office_pool
            .choose(rng)
            .copied()
            .ok_or_else(|| SimulationError::zone_pool("office pool is empty"))
    }

    /// Whether the zone is one of the reserved rooms
    pub fn is_reserved(&self, zone: ZoneId) -> bool {
        zone == self.meeting_room || zone == self.lunch_room
    }
}
