//! Polar vein growth filling a bounded region.
//!
//! Unlike [`crate::tree`], which grows toward targets in Cartesian space,
//! veins march outward from a fixed origin in polar coordinates. One
//! [`Venation::fill_by_one`] call advances every live branch by one polar
//! step. Steps that leave the border polygon or land in an occupied
//! discretized (angle, radius) cell stop the branch, and a branch with
//! enough clearance from every other tip forks into two children.

use crate::config::VenationConfig;
use crate::error::ConfigError;
use crate::geom::{self, PolarCoord};
use glam::Vec2;
use log::debug;
use rand::Rng;
use std::collections::HashMap;
use std::f32::consts::TAU;

/// Rotation offset applied to each of the two children at a fork.
const SPLIT_ROTATION: f32 = 0.12;

/// One vein, a sequence of polar points around the fill origin.
#[derive(Debug)]
pub struct VenationBranch {
    pub points: Vec<PolarCoord>,
    /// Indices of the branches this one forked off.
    pub sub_branches: Vec<usize>,
    /// Angle of the branch's first point.
    pub initial_rotation: f32,
    alive: bool,
}

impl VenationBranch {
    fn seed(rotation: f32, len: f32) -> Self {
        Self {
            points: vec![PolarCoord::new(rotation, len)],
            sub_branches: Vec::new(),
            initial_rotation: rotation,
            alive: true,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    fn tip(&self) -> PolarCoord {
        // A branch always carries at least its seed point.
        self.points[self.points.len() - 1]
    }
}

/// Vein-like fractal fill of a polygonal region.
#[derive(Debug)]
pub struct Venation {
    cfg: VenationConfig,
    branches: Vec<VenationBranch>,
    /// Occupancy keyed by `floor(theta * 1000)` then `floor(len)`. This
    /// resolution is the minimum spacing between veins and must not
    /// change without changing the look of every fill.
    claimed_cells: HashMap<i64, HashMap<i64, usize>>,
}

impl Venation {
    /// Seeds a single trunk at the origin with a random heading.
    pub fn new(cfg: VenationConfig, rng: &mut impl Rng) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let rotation = geom::random_in_range(0.0, TAU, rng);
        Ok(Self {
            cfg,
            branches: vec![VenationBranch::seed(rotation, 0.0)],
            claimed_cells: HashMap::new(),
        })
    }

    /// Advances every live branch by one polar step inside `border`.
    ///
    /// The border is a polygon in polar coordinates around the fill
    /// origin. Branches created by forking this tick take their first
    /// step on the next call.
    pub fn fill_by_one(&mut self, border: &[PolarCoord], rng: &mut impl Rng) {
        let border_cart: Vec<Vec2> = border
            .iter()
            .map(|p| p.to_cartesian(self.cfg.origin))
            .collect();

        let before = self.branches.len();
        for id in 0..before {
            if !self.branches[id].alive {
                continue;
            }

            let last = self.branches[id].tip();
            let jitter =
                geom::random_in_range(-self.cfg.variance, self.cfg.variance, rng);
            let next = PolarCoord::new(
                last.theta + jitter,
                last.len + self.cfg.branch_resolution,
            );
            let cart = next.to_cartesian(self.cfg.origin);

            if !geom::within_polygon_bounds(cart, &border_cart) || self.is_claimed(next) {
                self.branches[id].alive = false;
                continue;
            }

            self.claim(next, id);
            self.branches[id].points.push(next);

            if self.has_room(cart, id) {
                self.split(id, next, &border_cart);
            }
        }
    }

    /// True when `point` is further than `branch_length` from the tip of
    /// every other branch.
    fn has_room(&self, point: Vec2, id: usize) -> bool {
        self.branches
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != id)
            .all(|(_, b)| {
                geom::distance(b.tip().to_cartesian(self.cfg.origin), point)
                    > self.cfg.branch_length
            })
    }

    /// Forks two children off `id` at the fork point, rotated apart.
    /// A child whose seed point is out of bounds or already claimed is
    /// skipped.
    fn split(&mut self, id: usize, at: PolarCoord, border_cart: &[Vec2]) {
        for rotation in [at.theta + SPLIT_ROTATION, at.theta - SPLIT_ROTATION] {
            let seed = PolarCoord::new(rotation, at.len);
            let cart = seed.to_cartesian(self.cfg.origin);
            if !geom::within_polygon_bounds(cart, border_cart) || self.is_claimed(seed) {
                continue;
            }
            let child_id = self.branches.len();
            self.claim(seed, child_id);
            self.branches.push(VenationBranch::seed(rotation, at.len));
            self.branches[id].sub_branches.push(child_id);
            debug!("venation fork: branch {id} spawned {child_id}");
        }
    }

    fn cell_keys(p: PolarCoord) -> (i64, i64) {
        ((p.theta * 1000.0).floor() as i64, p.len.floor() as i64)
    }

    fn is_claimed(&self, p: PolarCoord) -> bool {
        let (theta_key, len_key) = Self::cell_keys(p);
        self.claimed_cells
            .get(&theta_key)
            .is_some_and(|row| row.contains_key(&len_key))
    }

    fn claim(&mut self, p: PolarCoord, id: usize) {
        let (theta_key, len_key) = Self::cell_keys(p);
        self.claimed_cells
            .entry(theta_key)
            .or_default()
            .insert(len_key, id);
    }

    pub fn branches(&self) -> &[VenationBranch] {
        &self.branches
    }

    pub fn live_branch_count(&self) -> usize {
        self.branches.iter().filter(|b| b.alive).count()
    }

    pub fn config(&self) -> &VenationConfig {
        &self.cfg
    }

    /// Each branch as a Cartesian polyline, ready for a renderer.
    pub fn cartesian_polylines(&self) -> Vec<Vec<Vec2>> {
        self.branches
            .iter()
            .map(|b| {
                b.points
                    .iter()
                    .map(|p| p.to_cartesian(self.cfg.origin))
                    .collect()
            })
            .collect()
    }
}
