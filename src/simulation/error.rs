//! Error types and handling
//!
//! This module contains error types and error handling for the simulation.

use thiserror::Error;

/// Errors that can occur during simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ConfigurationError(String),

    /// The building does not provide enough zones for the required roles
    #[error("Zone pool error: {0}")]
    ZonePool(String),

    /// A zone name is not part of the zone graph
    #[error("Unknown zone: {0}")]
    UnknownZone(String),

    /// No route exists between two zones
    #[error("Zone {to} is unreachable from {from}")]
    UnreachableZone {
        /// Start of the requested route
        from: String,
        /// Requested destination
        to: String,
    },

    /// Guests were drawn on a day nobody came in to host them
    #[error("No present occupant to host {guests} guest(s)")]
    NoPresentHost {
        /// Number of guests that could not be assigned
        guests: usize,
    },

    /// A distribution could not be built from the configured parameters
    #[error("Sampling error: {0}")]
    SamplingError(String),

    /// The building model is malformed
    #[error("Building model error: {0}")]
    BuildingModelError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl SimulationError {
    /// Create a configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create a zone pool error
    pub fn zone_pool(msg: impl Into<String>) -> Self {
        Self::ZonePool(msg.into())
    }

    /// Create an unknown zone error
    pub fn unknown_zone(name: impl Into<String>) -> Self {
        Self::UnknownZone(name.into())
    }

    /// Create an unreachable zone error
    pub fn unreachable_zone(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::UnreachableZone { from: from.into(), to: to.into() }
    }

    /// Create a sampling error
    pub fn sampling_error(msg: impl Into<String>) -> Self {
        Self::SamplingError(msg.into())
    }

    /// Create a building model error
    pub fn building_model_error(msg: impl Into<String>) -> Self {
        Self::BuildingModelError(msg.into())
    }

    /// Check if this is a recoverable error
    ///
    /// Fatal errors stop the run before (or instead of) generating a day.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SimulationError::ConfigurationError(_) => false,
            SimulationError::ZonePool(_) => false,
            SimulationError::UnknownZone(_) => false,
            SimulationError::UnreachableZone { .. } => true,
            SimulationError::NoPresentHost { .. } => false,
            SimulationError::SamplingError(_) => false,
            SimulationError::BuildingModelError(_) => false,
            SimulationError::IoError(_) => true,
            SimulationError::SerializationError(_) => true,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::ConfigurationError(_) => "Configuration",
            SimulationError::ZonePool(_) => "Zone Pool",
            SimulationError::UnknownZone(_) => "Zone Lookup",
            SimulationError::UnreachableZone { .. } => "Routing",
            SimulationError::NoPresentHost { .. } => "Guest Assignment",
            SimulationError::SamplingError(_) => "Sampling",
            SimulationError::BuildingModelError(_) => "Building Model",
            SimulationError::IoError(_) => "IO",
            SimulationError::SerializationError(_) => "Serialization",
        }
    }
}

impl From<crate::types::ConfigValidationError> for SimulationError {
    fn from(error: crate::types::ConfigValidationError) -> Self {
        SimulationError::ConfigurationError(error.to_string())
    }
}

impl From<rand_distr::BetaError> for SimulationError {
    fn from(error: rand_distr::BetaError) -> Self {
        SimulationError::SamplingError(format!("beta distribution: {}", error))
    }
}

impl From<rand_distr::NormalError> for SimulationError {
    fn from(error: rand_distr::NormalError) -> Self {
        SimulationError::SamplingError(format!("normal distribution: {}", error))
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;
