//! Union-find over grid cells, specialized for room merging.
//!
//! Rooms live in an arena indexed by [`RoomId`]; each cell's current room
//! id sits in a flat lookup table that is rewritten eagerly for every
//! moved cell at merge time. [`RegionMerger::find`] is therefore O(1)
//! without path compression.

use crate::types::RoomId;

/// A cell in the generator grid, identified by row and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub r: usize,
    pub c: usize,
}

impl Cell {
    #[inline]
    pub fn new(r: usize, c: usize) -> Self {
        Self { r, c }
    }
}

/// A connected group of grid cells.
///
/// A room that has been merged into another keeps its arena slot but
/// holds no cells.
#[derive(Debug, Default)]
pub struct Room {
    cells: Vec<Cell>,
}

impl Room {
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Minimum and maximum corner cells, the bounding box a renderer
    /// draws. `None` for an emptied room.
    pub fn bounds(&self) -> Option<(Cell, Cell)> {
        let first = *self.cells.first()?;
        let mut min = first;
        let mut max = first;
        for cell in &self.cells {
            min.r = min.r.min(cell.r);
            min.c = min.c.min(cell.c);
            max.r = max.r.max(cell.r);
            max.c = max.c.max(cell.c);
        }
        Some((min, max))
    }
}

/// Disjoint-set structure over an n×n cell grid.
///
/// Invariant: every cell belongs to exactly one room at all times, and
/// the membership total over all rooms is exactly `n * n`.
#[derive(Debug)]
pub struct RegionMerger {
    n: usize,
    rooms: Vec<Room>,
    /// Current room id per cell, indexed by `r * n + c`.
    room_of: Vec<RoomId>,
}

impl RegionMerger {
    /// Builds the grid with one singleton room per cell.
    pub fn new(n: usize) -> Self {
        let rooms = (0..n * n)
            .map(|i| Room {
                cells: vec![Cell::new(i / n, i % n)],
            })
            .collect();
        Self {
            n,
            rooms,
            room_of: (0..n * n).collect(),
        }
    }

    /// Grid side length.
    pub fn n(&self) -> usize {
        self.n
    }

    #[inline]
    fn index(&self, cell: Cell) -> usize {
        cell.r * self.n + cell.c
    }

    /// Current room id for a cell. O(1).
    pub fn find(&self, cell: Cell) -> RoomId {
        self.room_of[self.index(cell)]
    }

    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id]
    }

    /// Merges the room containing `b` into the room containing `a`.
    ///
    /// Missing cells (grid-edge adjacency lookups) and cells already
    /// sharing a room are no-ops. Every moved cell's lookup entry is
    /// rewritten before the call returns.
    pub fn union(&mut self, a: Option<Cell>, b: Option<Cell>) {
        let (Some(a), Some(b)) = (a, b) else {
            return;
        };
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }

        let moved = std::mem::take(&mut self.rooms[rb].cells);
        for cell in &moved {
            let idx = self.index(*cell);
            self.room_of[idx] = ra;
        }
        self.rooms[ra].cells.extend(moved);
    }

    /// Iterates the distinct non-empty rooms, each yielded exactly once.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(|room| !room.is_empty())
    }

    pub fn room_count(&self) -> usize {
        self.rooms().count()
    }

    /// Total cell count across all rooms; always `n * n`.
    pub fn cell_count(&self) -> usize {
        self.rooms().map(Room::len).sum()
    }
}
