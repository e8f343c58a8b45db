/// Identifier for a branch in a [`crate::tree::Tree`].
///
/// This is an index into `Tree::branches`, and is only meaningful within
/// the lifetime of a given `Tree` instance.
pub type BranchId = usize;

/// Identifier for a room slot in a [`crate::disjoint_set::RegionMerger`].
///
/// Indexes the merger's room arena; slots are never reused, a merged-away
/// room simply stays empty.
pub type RoomId = usize;
