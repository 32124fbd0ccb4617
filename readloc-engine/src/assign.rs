use fxhash::FxHashSet;

use readloc_index::RegionIndex;

use crate::collector::LogicalRead;

/// Compute the set of regions a logical read overlaps.
///
/// Every block of the read is queried against the index and the resulting
/// region ids are unioned into one set. The union is what keeps counting
/// honest: a read with two blocks inside region R yields R once, a read with
/// one block spanning the boundary of adjacent regions A and B yields both,
/// and a read overlapping nothing yields the empty set. Region ids, not
/// region occurrences, are the unit being unioned.
pub fn assign(read: &LogicalRead, index: &RegionIndex) -> FxHashSet<u32> {
    let mut regions = FxHashSet::default();
    for block in &read.blocks {
        regions.extend(index.query(&block.chr, block.start, block.end));
    }
    regions
}
