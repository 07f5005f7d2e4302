//! Identifier types for the occupancy generator
//!
//! Occupants and guests carry UUID-based identifiers that serialize with a
//! readable prefix. Zones are addressed by a dense index into the zone graph,
//! since every per-second timeline entry stores one.

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::{Builder, Uuid};

/// Unique identifier for a persistent occupant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OccupantId(pub Uuid);

impl OccupantId {
    /// Create a new random occupant ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Draw the ID from the simulation's random source so seeded runs stay reproducible
    pub fn from_rng<R: Rng>(rng: &mut R) -> Self {
        Self(Builder::from_random_bytes(rng.gen()).into_uuid())
    }
}

impl Default for OccupantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OccupantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OCC_{}", self.0.simple())
    }
}

impl Serialize for OccupantId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for OccupantId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let raw = s.strip_prefix("OCC_").unwrap_or(&s);
        let uuid = Uuid::parse_str(raw).map_err(serde::de::Error::custom)?;
        Ok(OccupantId(uuid))
    }
}

/// Unique identifier for a transient guest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GuestId(pub Uuid);

impl GuestId {
    /// Create a new random guest ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Draw the ID from the simulation's random source
    pub fn from_rng<R: Rng>(rng: &mut R) -> Self {
        Self(Builder::from_random_bytes(rng.gen()).into_uuid())
    }
}

impl Default for GuestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GUEST_{}", self.0.simple())
    }
}

impl Serialize for GuestId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for GuestId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let raw = s.strip_prefix("GUEST_").unwrap_or(&s);
        let uuid = Uuid::parse_str(raw).map_err(serde::de::Error::custom)?;
        Ok(GuestId(uuid))
    }
}

/// Dense index of a zone inside a [`ZoneGraph`](crate::facility::ZoneGraph)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZoneId(pub u32);

impl ZoneId {
    /// Index into per-zone vectors
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ZONE_{}", self.0)
    }
}
