//! Randomized irregular room layouts over a uniform grid.
//!
//! A layout is generated eagerly: all merging happens inside
//! [`RoomLayout::generate`], and the result is queried read-only
//! afterwards. Regenerating means generating a new layout.

use crate::config::RoomConfig;
use crate::disjoint_set::{Cell, RegionMerger, Room};
use crate::error::ConfigError;
use log::debug;
use rand::Rng;

/// An n×n grid of unit cells partitioned into merged rooms.
#[derive(Debug)]
pub struct RoomLayout {
    merger: RegionMerger,
    merge_attempts: usize,
}

impl RoomLayout {
    /// Builds the grid and performs `floor(n * n * unity)` merge attempts.
    ///
    /// Each attempt draws a uniformly random cell from a shrinking pool of
    /// cells not yet used as a merge source, then unions it with a random
    /// in-bounds neighbor (see [`random_neighbor`]). The source cell
    /// leaves the pool whether or not a neighbor was found.
    pub fn generate(cfg: &RoomConfig, rng: &mut impl Rng) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let n = cfg.n;
        let mut merger = RegionMerger::new(n);
        let attempts = ((n * n) as f32 * cfg.unity).floor() as usize;

        let mut pool: Vec<Cell> = (0..n)
            .flat_map(|r| (0..n).map(move |c| Cell::new(r, c)))
            .collect();

        for _ in 0..attempts {
            if pool.is_empty() {
                break;
            }
            let source = pool.swap_remove(rng.random_range(0..pool.len()));
            let neighbor = random_neighbor(source, n, rng);
            merger.union(Some(source), neighbor);
        }

        debug!(
            "room layout: {} rooms from {} cells after {} merge attempts",
            merger.room_count(),
            n * n,
            attempts
        );

        Ok(Self {
            merger,
            merge_attempts: attempts,
        })
    }

    /// Iterates the distinct rooms of the final partition.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.merger.rooms()
    }

    pub fn for_each(&self, mut cb: impl FnMut(&Room)) {
        for room in self.rooms() {
            cb(room);
        }
    }

    pub fn room_count(&self) -> usize {
        self.merger.room_count()
    }

    /// Total cell count across all rooms; always `n * n`.
    pub fn cell_count(&self) -> usize {
        self.merger.cell_count()
    }

    pub fn merge_attempts(&self) -> usize {
        self.merge_attempts
    }

    /// Grid side length the layout was generated with.
    pub fn n(&self) -> usize {
        self.merger.n()
    }
}

/// Draws up to four random directions and returns the first in-bounds
/// neighbor of `cell`, or `None` when every draw went off-grid.
///
/// Draws are independent, so an off-grid direction can repeat and the
/// attempt can give up with an untried in-bounds direction left over.
/// Edge and corner cells therefore merge less often, which keeps the
/// larger rooms toward the grid interior.
fn random_neighbor(cell: Cell, n: usize, rng: &mut impl Rng) -> Option<Cell> {
    for _ in 0..4 {
        let (dr, dc) = match rng.random_range(0..4) {
            0 => (-1i64, 0i64),
            1 => (1, 0),
            2 => (0, -1),
            _ => (0, 1),
        };
        let r = cell.r as i64 + dr;
        let c = cell.c as i64 + dc;
        if r >= 0 && c >= 0 && (r as usize) < n && (c as usize) < n {
            return Some(Cell::new(r as usize, c as usize));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Sorted room membership lists, for comparing partitions.
    fn partition(layout: &RoomLayout) -> Vec<Vec<Cell>> {
        let mut rooms: Vec<Vec<Cell>> = layout
            .rooms()
            .map(|room| {
                let mut cells = room.cells().to_vec();
                cells.sort();
                cells
            })
            .collect();
        rooms.sort();
        rooms
    }

    #[test]
    fn zero_unity_yields_all_singletons() {
        let mut rng = StdRng::seed_from_u64(1);
        let layout = RoomLayout::generate(&RoomConfig { n: 5, unity: 0.0 }, &mut rng)
            .expect("config is valid");

        assert_eq!(layout.merge_attempts(), 0);
        assert_eq!(layout.room_count(), 25);
        for room in layout.rooms() {
            assert_eq!(room.len(), 1);
        }
    }

    #[test]
    fn single_cell_grid_is_valid_and_never_merges() {
        let mut rng = StdRng::seed_from_u64(2);
        let layout = RoomLayout::generate(&RoomConfig { n: 1, unity: 1.0 }, &mut rng)
            .expect("config is valid");

        // One attempt runs, but every direction is off-grid.
        assert_eq!(layout.merge_attempts(), 1);
        assert_eq!(layout.room_count(), 1);
        assert_eq!(layout.cell_count(), 1);
    }

    #[test]
    fn full_unity_on_3x3_attempts_nine_merges() {
        let mut rng = StdRng::seed_from_u64(3);
        let layout = RoomLayout::generate(&RoomConfig { n: 3, unity: 1.0 }, &mut rng)
            .expect("config is valid");

        assert_eq!(layout.merge_attempts(), 9);
        let rooms = layout.room_count();
        assert!((1..=9).contains(&rooms));
        // Interior cells always find a neighbor, so at least one merge
        // must have landed.
        assert!(rooms < 9);
        assert_eq!(layout.cell_count(), 9);
    }

    #[test]
    fn cells_are_conserved_across_heavy_merging() {
        let mut rng = StdRng::seed_from_u64(4);
        let layout = RoomLayout::generate(&RoomConfig { n: 6, unity: 1.0 }, &mut rng)
            .expect("config is valid");

        assert_eq!(layout.cell_count(), 36);

        // No cell appears in two rooms.
        let mut seen = std::collections::HashSet::new();
        for room in layout.rooms() {
            for cell in room.cells() {
                assert!(seen.insert(*cell), "cell {cell:?} appears twice");
            }
        }
        assert_eq!(seen.len(), 36);
    }

    #[test]
    fn same_seed_reproduces_the_same_partition() {
        let cfg = RoomConfig { n: 4, unity: 1.0 };
        let a = RoomLayout::generate(&cfg, &mut StdRng::seed_from_u64(99))
            .expect("config is valid");
        let b = RoomLayout::generate(&cfg, &mut StdRng::seed_from_u64(99))
            .expect("config is valid");

        assert_eq!(partition(&a), partition(&b));

        // A different seed is allowed to differ; with 16 merge attempts it
        // practically always does.
        let c = RoomLayout::generate(&cfg, &mut StdRng::seed_from_u64(100))
            .expect("config is valid");
        assert_eq!(c.cell_count(), 16);
    }

    #[test]
    fn for_each_visits_every_room_once() {
        let mut rng = StdRng::seed_from_u64(5);
        let layout = RoomLayout::generate(&RoomConfig { n: 3, unity: 0.0 }, &mut rng)
            .expect("config is valid");

        let mut visited = 0;
        layout.for_each(|room| {
            assert_eq!(room.len(), 1);
            visited += 1;
        });
        assert_eq!(visited, 9);
    }

    #[test]
    fn invalid_config_fails_fast() {
        let mut rng = StdRng::seed_from_u64(6);
        assert!(RoomLayout::generate(&RoomConfig { n: 0, unity: 0.5 }, &mut rng).is_err());
        assert!(RoomLayout::generate(&RoomConfig { n: 3, unity: 2.0 }, &mut rng).is_err());
    }
}
