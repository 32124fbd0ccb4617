use fxhash::FxHashMap;
use rayon::prelude::*;

use readloc_core::models::ReadSegment;
use readloc_index::RegionIndex;

use crate::counts::RegionCounts;
use crate::engine::CountEngine;

/// Count segments with one independent shard per chromosome, merging the
/// partial counts at the end.
///
/// Regions and segments never interact across chromosomes, and count merging
/// is plain addition, so partitioning the input by chromosome and running
/// the shards in parallel produces exactly the single-pass result. Read
/// identity survives the partitioning: a chimeric read's blocks on chr1 can
/// only credit chr1 regions, so deduplicating per (read, chromosome) inside
/// each shard is equivalent to deduplicating globally.
///
/// The per-shard engines flush only at their end of stream, so segment order
/// within a shard does not matter.
pub fn count_segments_sharded(segments: Vec<ReadSegment>, index: &RegionIndex) -> RegionCounts {
    let mut by_chrom: FxHashMap<String, Vec<ReadSegment>> = FxHashMap::default();
    for segment in segments {
        by_chrom
            .entry(segment.block.chr.clone())
            .or_default()
            .push(segment);
    }

    by_chrom
        .into_par_iter()
        .map(|(_chr, shard)| {
            let mut engine = CountEngine::new(index);
            for segment in shard {
                // a fresh engine cannot be finalized yet
                engine
                    .accept(segment)
                    .unwrap_or_else(|e| unreachable!("{e}"));
            }
            engine.finalize().unwrap_or_else(|e| unreachable!("{e}"))
        })
        .reduce(
            || RegionCounts::new(index.len()),
            |mut acc, partial| {
                acc.merge(&partial);
                acc
            },
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use readloc_core::models::{Region, RegionSet};

    fn region(id: &str, chr: &str, start: u32, end: u32) -> Region {
        Region {
            id: id.to_string(),
            chr: chr.to_string(),
            start,
            end,
        }
    }

    #[fixture]
    fn index() -> RegionIndex {
        let rs = RegionSet::from(vec![
            region("A", "chr1", 100, 200),
            region("B", "chr1", 150, 250),
            region("C", "chr2", 100, 200),
            region("D", "chr3", 0, 1000),
        ]);
        RegionIndex::build(&rs).unwrap()
    }

    fn segments() -> Vec<ReadSegment> {
        vec![
            // spliced read, both blocks in A, second also in B
            ReadSegment::new("r1", "chr1", 120, 140),
            ReadSegment::new("r1", "chr1", 180, 190),
            // chimeric read across chr2 and chr3
            ReadSegment::new("r2", "chr2", 110, 130),
            ReadSegment::new("r2", "chr3", 500, 520),
            // overlaps nothing
            ReadSegment::new("r3", "chr1", 300, 310),
            // second distinct read in A
            ReadSegment::new("r4", "chr1", 101, 102),
        ]
    }

    #[rstest]
    fn test_sharded_equals_single_pass(index: RegionIndex) {
        let mut single = CountEngine::new(&index);
        for segment in segments() {
            single.accept(segment).unwrap();
        }
        let single_counts = single.finalize().unwrap();

        let sharded_counts = count_segments_sharded(segments(), &index);

        assert_eq!(sharded_counts, single_counts);
    }

    #[rstest]
    fn test_sharded_counts_are_correct(index: RegionIndex) {
        let counts = count_segments_sharded(segments(), &index);
        let get = |id: &str| {
            let dense = index.ids().iter().position(|i| i == id).unwrap() as u32;
            counts.get(dense)
        };

        assert_eq!(get("A"), 2); // r1 once (not twice), r4
        assert_eq!(get("B"), 1); // r1
        assert_eq!(get("C"), 1); // r2
        assert_eq!(get("D"), 1); // r2
    }

    #[rstest]
    fn test_empty_input_yields_all_zeros(index: RegionIndex) {
        let counts = count_segments_sharded(vec![], &index);
        assert_eq!(counts.len(), index.len());
        assert!((0..index.len() as u32).all(|i| counts.get(i) == 0));
    }
}
