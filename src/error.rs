//! Error types for the route planning pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while validating input or loading configuration.
#[derive(Debug, Error)]
pub enum PlanError {
    /// No deliverable (non-depot) points were supplied.
    #[error("no delivery points supplied")]
    EmptyPoints,
    /// The depot coordinates are missing, non-finite or out of range.
    #[error("invalid depot coordinates ({latitude}, {longitude})")]
    InvalidDepot {
        /// Depot latitude in degrees.
        latitude: f64,
        /// Depot longitude in degrees.
        longitude: f64,
    },
    /// A delivery point has non-finite or out-of-range coordinates.
    #[error("point {id} has invalid coordinates ({latitude}, {longitude})")]
    InvalidPoint {
        /// Identifier of the offending point.
        id: String,
        /// Latitude in degrees.
        latitude: f64,
        /// Longitude in degrees.
        longitude: f64,
    },
    /// A delivery point lies outside the configured service area.
    #[error("point {id} at ({latitude}, {longitude}) is outside the service area")]
    PointOutOfBounds {
        /// Identifier of the offending point.
        id: String,
        /// Latitude in degrees.
        latitude: f64,
        /// Longitude in degrees.
        longitude: f64,
    },
    /// Two points share an identifier.
    #[error("duplicate point id {id}")]
    DuplicatePointId {
        /// The repeated identifier.
        id: String,
    },
    /// The requested truck count is outside the configured bounds.
    #[error("truck count {requested} must be between {min} and {max}")]
    TruckCountOutOfRange {
        /// Truck count passed by the caller.
        requested: usize,
        /// Smallest accepted truck count.
        min: usize,
        /// Largest accepted truck count.
        max: usize,
    },
    /// Reading a configuration file failed.
    #[error("failed to read config file {path}")]
    ConfigRead {
        /// Path of the configuration file.
        path: PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// A configuration file was not valid JSON for [`crate::config::Config`].
    #[error("failed to parse config file {path}")]
    ConfigParse {
        /// Path of the configuration file.
        path: PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
}

impl PlanError {
    /// Whether the error describes bad caller input (as opposed to configuration I/O).
    pub fn is_invalid_input(&self) -> bool {
        !matches!(
            self,
            PlanError::ConfigRead { .. } | PlanError::ConfigParse { .. }
        )
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, PlanError>;
