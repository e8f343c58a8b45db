//! Typed parameter structs for the generators.
//!
//! Each generator validates its config at construction; see
//! [`crate::error::ConfigError`].

use crate::error::ConfigError;
use crate::leaf::LeafMode;
use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for [`crate::rooms::RoomLayout`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoomConfig {
    /// Grid side length; the layout covers `n * n` unit cells.
    pub n: usize,
    /// Merge intensity in `0.0..=1.0`. Scales the number of merge
    /// attempts (`floor(n * n * unity)`), not a per-merge probability:
    /// at `unity = 1` every cell attempts exactly one merge, which still
    /// leaves a patchwork rather than a single fused region.
    pub unity: f32,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self { n: 10, unity: 0.6 }
    }
}

impl RoomConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n < 1 {
            return Err(ConfigError::GridTooSmall(self.n));
        }
        if !(0.0..=1.0).contains(&self.unity) {
            return Err(ConfigError::UnityOutOfRange(self.unity));
        }
        Ok(())
    }
}

/// Parameters for [`crate::tree::Tree`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TreeConfig {
    /// Root position; the leaf cloud is centered here as well.
    pub origin: Vec2,
    pub num_leaves: usize,
    /// Length of every new branch segment.
    pub branch_length: f32,
    /// Distance at which a leaf counts as reached and is consumed.
    pub min_dist: f32,
    /// Number of influencing leaves a branch must exceed before it
    /// spawns a child.
    pub influence_threshold: u32,
    pub leaf_mode: LeafMode,
    /// Extent of the leaf seeding shape.
    pub shape_width: f32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            num_leaves: 200,
            branch_length: 4.0,
            min_dist: 8.0,
            influence_threshold: 0,
            leaf_mode: LeafMode::Scatter,
            shape_width: 200.0,
        }
    }
}

impl TreeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.branch_length <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "branch_length",
                value: self.branch_length,
            });
        }
        if self.min_dist <= 0.0 {
            // min_dist = 0 would mark every leaf reached on contact with
            // any branch, degenerating the whole simulation.
            return Err(ConfigError::NonPositive {
                field: "min_dist",
                value: self.min_dist,
            });
        }
        Ok(())
    }
}

/// Parameters for [`crate::venation::Venation`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VenationConfig {
    /// Radial length of one growth step.
    pub branch_resolution: f32,
    /// Clearance a branch tip needs from every other tip before it
    /// splits into two children.
    pub branch_length: f32,
    /// Center the veins radiate from.
    pub origin: Vec2,
    /// Angular jitter per step, in radians.
    pub variance: f32,
}

impl Default for VenationConfig {
    fn default() -> Self {
        Self {
            branch_resolution: 2.0,
            branch_length: 12.0,
            origin: Vec2::ZERO,
            variance: 0.35,
        }
    }
}

impl VenationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.branch_resolution <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "branch_resolution",
                value: self.branch_resolution,
            });
        }
        if self.branch_length <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "branch_length",
                value: self.branch_length,
            });
        }
        if self.variance < 0.0 {
            return Err(ConfigError::NegativeVariance(self.variance));
        }
        Ok(())
    }
}
