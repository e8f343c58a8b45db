//! Space-colonization branch growth.
//!
//! One [`Tree::grow`] call is one simulation tick, driven externally once
//! per animation frame:
//! 1. attraction — each active leaf pulls on its closest branch,
//!    accumulating into the branch's `dir`/`count`;
//! 2. removal — leaves reached during attraction are dropped;
//! 3. growth — sufficiently influenced branches spawn a child segment.
//!
//! There is no terminal condition; once every leaf is consumed the tick
//! becomes a no-op. Leaves that no branch ever approaches (outside any
//! eventual growth path) stall the simulation while remaining alive —
//! a known limitation of the algorithm, not an error state.

use crate::config::TreeConfig;
use crate::error::ConfigError;
use crate::geom;
use crate::leaf::LeafSet;
use crate::types::BranchId;
use glam::Vec2;
use log::debug;
use rand::Rng;

/// One node of the growing structure.
#[derive(Debug)]
pub struct Branch {
    pub pos: Vec2,
    /// Heading the branch resets to after each growth step.
    pub orig_dir: Vec2,
    /// Running sum of the reset heading plus one unit vector per
    /// influencing leaf this tick; not normalized until growth.
    pub dir: Vec2,
    pub parent: Option<BranchId>,
    /// Leaves influencing this branch during the current tick.
    pub count: u32,
    /// Segment length used when spawning a child.
    pub len: f32,
}

impl Branch {
    fn new_root(pos: Vec2, dir: Vec2, len: f32) -> Self {
        Self {
            pos,
            orig_dir: dir,
            dir,
            parent: None,
            count: 0,
            len,
        }
    }

    fn new_child(pos: Vec2, dir: Vec2, parent: BranchId, len: f32) -> Self {
        Self {
            pos,
            orig_dir: dir,
            dir,
            parent: Some(parent),
            count: 0,
            len,
        }
    }
}

/// A branching structure grown toward a cloud of leaves.
#[derive(Debug)]
pub struct Tree {
    branches: Vec<Branch>,
    leaves: LeafSet,
    cfg: TreeConfig,
}

impl Tree {
    /// Seeds the leaf cloud per `cfg.leaf_mode` and places the root at
    /// the origin, heading up the canvas.
    ///
    /// Zero leaves is valid; the tree simply never grows past the root.
    pub fn new(cfg: TreeConfig, rng: &mut impl Rng) -> Result<Self, ConfigError> {
        let leaves =
            LeafSet::seeded(cfg.leaf_mode, cfg.num_leaves, cfg.origin, cfg.shape_width, rng);
        Self::with_leaves(cfg, leaves)
    }

    /// Like [`Tree::new`] but with a caller-supplied leaf cloud.
    pub fn with_leaves(cfg: TreeConfig, leaves: LeafSet) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let root = Branch::new_root(cfg.origin, Vec2::new(0.0, -1.0), cfg.branch_length);
        debug!(
            "tree seeded with {} leaves ({:?})",
            leaves.points.len(),
            cfg.leaf_mode
        );
        Ok(Self {
            branches: vec![root],
            leaves,
            cfg,
        })
    }

    /// Advances the simulation by one tick.
    pub fn grow(&mut self) {
        self.attract();
        self.remove_reached();
        self.spawn_children();
    }

    /// Each leaf scans the branches. The first branch found within
    /// `min_dist` marks the leaf reached and ends the scan — even if a
    /// later branch is closer. This is an intentional approximation; a
    /// reached leaf contributes no influence. Otherwise the single
    /// closest branch accumulates a unit branch-to-leaf pull.
    fn attract(&mut self) {
        for leaf in &mut self.leaves.points {
            let mut closest: Option<(BranchId, f32)> = None;
            for (id, branch) in self.branches.iter().enumerate() {
                let d = geom::distance(branch.pos, leaf.pos);
                if d < self.cfg.min_dist {
                    leaf.reached = true;
                    closest = None;
                    break;
                }
                if closest.is_none_or(|(_, best)| d < best) {
                    closest = Some((id, d));
                }
            }
            if let Some((id, _)) = closest {
                let branch = &mut self.branches[id];
                branch.dir += (leaf.pos - branch.pos).normalize_or_zero();
                branch.count += 1;
            }
        }
    }

    fn remove_reached(&mut self) {
        self.leaves.points.retain(|leaf| !leaf.reached);
    }

    /// Branches iterate newest-first over the pre-tick length, so
    /// children appended here are not revisited within the same tick.
    /// A branch whose influence count exceeds the threshold spawns a
    /// child one `len` along the averaged pull, then resets.
    fn spawn_children(&mut self) {
        let before = self.branches.len();
        for id in (0..before).rev() {
            let branch = &self.branches[id];
            if branch.count <= self.cfg.influence_threshold {
                continue;
            }

            // The +1 folds the reset heading into the average alongside
            // the per-leaf contributions.
            let avg = (branch.dir / (branch.count as f32 + 1.0)).normalize_or_zero();
            let child_pos = branch.pos + avg * branch.len;
            let child_len = branch.len;
            self.branches
                .push(Branch::new_child(child_pos, avg, id, child_len));

            let branch = &mut self.branches[id];
            branch.dir = branch.orig_dir;
            branch.count = 0;
        }
    }

    /// One `(parent position, branch position)` segment per non-root
    /// branch, ready for a renderer.
    pub fn segments(&self) -> Vec<(Vec2, Vec2)> {
        self.branches
            .iter()
            .filter_map(|b| b.parent.map(|p| (self.branches[p].pos, b.pos)))
            .collect()
    }

    /// Positions of the leaves still alive.
    pub fn leaves(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.leaves.points.iter().map(|l| l.pos)
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }

    pub fn leaves_remaining(&self) -> usize {
        self.leaves.points.len()
    }

    pub fn config(&self) -> &TreeConfig {
        &self.cfg
    }
}
