//! Error types for cloth simulation.

use core::fmt;

/// Errors that can occur while configuring or stepping a cloth.
///
/// Index and array-size mismatches are not represented here: they are
/// caller bugs and trip an assertion instead.
#[derive(Debug, Clone, PartialEq)]
pub enum ClothError {
    /// Grid dimensions must be at least 2x2.
    InvalidGridDimensions { size_u: usize, size_v: usize },
    /// Time step must be positive and finite.
    InvalidTimeStep,
    /// A vertex left the bounded region; the run is unusable from here on.
    ///
    /// Positions and velocities are left as the failing step produced them.
    Divergence {
        ku: usize,
        kv: usize,
        distance: f64,
        limit: f64,
    },
}

impl ClothError {
    /// True for the numerical-instability failure.
    pub fn is_divergence(&self) -> bool {
        matches!(self, ClothError::Divergence { .. })
    }
}

impl fmt::Display for ClothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClothError::InvalidGridDimensions { size_u, size_v } => {
                write!(f, "grid must be at least 2x2 (got {}x{})", size_u, size_v)
            }
            ClothError::InvalidTimeStep => write!(f, "time step must be positive and finite"),
            ClothError::Divergence { ku, kv, distance, limit } => write!(
                f,
                "divergence of the system: vertex ({}, {}) is {} from the origin (limit {})",
                ku, kv, distance, limit
            ),
        }
    }
}

impl core::error::Error for ClothError {}
