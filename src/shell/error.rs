//! Error types for solvation-shell extraction.

use thiserror::Error;

/// Errors that can occur while configuring or running the extraction
/// pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to parse a TOML run configuration.
    #[error("failed to parse extraction config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The solvation radius must be positive and finite.
    #[error("invalid solvation radius {0} Å: must be positive and finite")]
    InvalidRadius(f64),

    /// Coordination bounds are inverted.
    #[error("invalid coordination range: min {min} exceeds max {max}")]
    InvalidCoordinationRange { min: usize, max: usize },

    /// `top_n` of zero would select nothing from every group.
    #[error("top_n must be at least 1")]
    InvalidTopN,

    /// Shell expansion needs room for at least the central residue.
    #[error("max shell size must be at least 1 atom")]
    InvalidShellSize,

    /// No solute atom names were supplied by flag, config file, or metadata.
    #[error("no solute atoms selected: supply at least one solute atom name")]
    NoSoluteSelector,

    /// The trajectory contained no frames.
    #[error("trajectory contains no frames")]
    EmptyTrajectory,

    /// The solute selectors matched nothing in any scanned frame.
    #[error("no atom matched the solute selectors [{selectors}] in {frames} frame(s)")]
    NoMatchingSites { selectors: String, frames: usize },

    /// Two structures being compared have different atom counts.
    #[error("structures differ in size: {expected} vs {actual} atoms")]
    StructureMismatch { expected: usize, actual: usize },
}

impl Error {
    /// Creates a [`NoMatchingSites`](Error::NoMatchingSites) error from the
    /// selector list that failed to match.
    pub fn no_matching_sites(selectors: &[String], frames: usize) -> Self {
        Self::NoMatchingSites {
            selectors: selectors.join(", "),
            frames,
        }
    }

    /// Creates a [`StructureMismatch`](Error::StructureMismatch) error.
    pub fn structure_mismatch(expected: usize, actual: usize) -> Self {
        Self::StructureMismatch { expected, actual }
    }
}
