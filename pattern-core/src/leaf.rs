//! Attraction points ("leaves") for tree growth, and the shapes they are
//! seeded in.

use crate::geom::random_in_range;
use glam::Vec2;
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Thickness of each cross bar relative to the shape width.
const CROSS_BAR_RATIO: f32 = 0.05;

#[derive(Debug)]
pub struct Leaf {
    pub pos: Vec2,
    pub reached: bool,
}

/// Layout of the initial leaf cloud.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LeafMode {
    /// Uniform scatter over a centered square.
    Scatter,
    /// Two thin perpendicular bars through the center.
    Cross,
    /// A circular ring of radius `shape_width / 2`.
    Ring,
    /// The perimeter of the centered square.
    Perimeter,
}

#[derive(Debug)]
pub struct LeafSet {
    pub points: Vec<Leaf>,
}

impl LeafSet {
    pub fn from_positions(positions: Vec<Vec2>) -> Self {
        let points = positions
            .into_iter()
            .map(|pos| Leaf {
                pos,
                reached: false,
            })
            .collect();

        Self { points }
    }

    /// Seeds `count` leaves in the given shape around `center`.
    pub fn seeded(
        mode: LeafMode,
        count: usize,
        center: Vec2,
        shape_width: f32,
        rng: &mut impl Rng,
    ) -> Self {
        let half = shape_width * 0.5;
        let positions = (0..count)
            .map(|i| match mode {
                LeafMode::Scatter => {
                    let x = random_in_range(-half, half, rng);
                    let y = random_in_range(-half, half, rng);
                    center + Vec2::new(x, y)
                }
                LeafMode::Cross => {
                    let along = random_in_range(-half, half, rng);
                    let bar = shape_width * CROSS_BAR_RATIO;
                    let across = random_in_range(-bar, bar, rng);
                    // Alternate between the horizontal and vertical bar.
                    if i % 2 == 0 {
                        center + Vec2::new(along, across)
                    } else {
                        center + Vec2::new(across, along)
                    }
                }
                LeafMode::Ring => {
                    let theta = random_in_range(0.0, TAU, rng);
                    center + Vec2::new(theta.cos(), theta.sin()) * half
                }
                LeafMode::Perimeter => {
                    let along = random_in_range(-half, half, rng);
                    match rng.random_range(0..4) {
                        0 => center + Vec2::new(along, -half),
                        1 => center + Vec2::new(along, half),
                        2 => center + Vec2::new(-half, along),
                        _ => center + Vec2::new(half, along),
                    }
                }
            })
            .collect();

        Self::from_positions(positions)
    }

    /// Leaves not yet consumed by the growth simulation.
    pub fn alive_count(&self) -> usize {
        self.points.iter().filter(|l| !l.reached).count()
    }
}
