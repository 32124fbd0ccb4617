use std::collections::{HashMap, HashSet};

use thiserror::Error;

use readloc_core::models::{Interval, RegionSet};

use crate::ChromIndex;

/// Errors raised while building a [`RegionIndex`].
///
/// Both are fatal to the whole region set: a partially loaded index would
/// silently under-report counts downstream, so nothing is kept from a load
/// that produced either of these.
#[derive(Debug, Error)]
pub enum RegionIndexError {
    /// A region whose interval is malformed (`start >= end`).
    #[error("Invalid region (start >= end): {0}")]
    InvalidRegion(String),
    /// Two regions in the set share an id.
    #[error("Duplicate region id: {0}")]
    DuplicateRegionId(String),
}

/// A genome-wide index of named regions.
///
/// Region ids are interned into dense `u32` handles in region-set order; the
/// string id is recovered with [`RegionIndex::id`]. One [`ChromIndex`] per
/// chromosome answers overlap queries, so intervals on different chromosomes
/// never interact.
pub struct RegionIndex {
    ids: Vec<String>,
    by_chrom: HashMap<String, ChromIndex<u32, u32>>,
}

impl RegionIndex {
    /// Build an index from a region set, validating every region.
    ///
    /// # Errors
    ///
    /// [`RegionIndexError::InvalidRegion`] if any region has `start >= end`,
    /// [`RegionIndexError::DuplicateRegionId`] if two regions share an id.
    pub fn build(region_set: &RegionSet) -> Result<Self, RegionIndexError> {
        let mut ids: Vec<String> = Vec::with_capacity(region_set.len());
        let mut seen: HashSet<&str> = HashSet::with_capacity(region_set.len());
        let mut intervals: HashMap<String, Vec<Interval<u32, u32>>> = HashMap::new();

        for region in region_set.iter() {
            if region.start >= region.end {
                return Err(RegionIndexError::InvalidRegion(format!(
                    "{} ({}:{}-{})",
                    region.id, region.chr, region.start, region.end
                )));
            }
            if !seen.insert(region.id.as_str()) {
                return Err(RegionIndexError::DuplicateRegionId(region.id.clone()));
            }

            let dense_id = ids.len() as u32;
            ids.push(region.id.clone());

            intervals
                .entry(region.chr.clone())
                .or_default()
                .push(Interval {
                    start: region.start,
                    end: region.end,
                    val: dense_id,
                });
        }

        let by_chrom = intervals
            .into_iter()
            .map(|(chr, chr_intervals)| (chr, ChromIndex::build(chr_intervals)))
            .collect();

        Ok(RegionIndex { ids, by_chrom })
    }

    /// Dense ids of every region overlapping `[start, end)` on `chr`.
    ///
    /// A chromosome the index has never seen yields an empty iterator.
    pub fn query<'a>(
        &'a self,
        chr: &str,
        start: u32,
        end: u32,
    ) -> Box<dyn Iterator<Item = u32> + 'a> {
        match self.by_chrom.get(chr) {
            Some(index) => Box::new(index.query(start, end).map(|iv| iv.val)),
            None => Box::new(std::iter::empty()),
        }
    }

    /// The string id behind a dense region id.
    pub fn id(&self, dense_id: u32) -> &str {
        &self.ids[dense_id as usize]
    }

    /// All region ids, in region-set order (dense-id order).
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Number of regions in the index.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Chromosomes the index has regions for.
    pub fn chromosomes(&self) -> impl Iterator<Item = &str> {
        self.by_chrom.keys().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use readloc_core::models::Region;

    fn region(id: &str, chr: &str, start: u32, end: u32) -> Region {
        Region {
            id: id.to_string(),
            chr: chr.to_string(),
            start,
            end,
        }
    }

    #[fixture]
    fn nested_regions() -> RegionSet {
        RegionSet::from(vec![
            region("gene1", "chr1", 100, 500),
            region("exon1", "chr1", 120, 180),
            region("exon2", "chr1", 300, 400),
            region("gene2", "chr2", 100, 200),
        ])
    }

    #[rstest]
    fn test_query_credits_every_overlapping_region(nested_regions: RegionSet) {
        let index = RegionIndex::build(&nested_regions).unwrap();

        let hits: Vec<&str> = index.query("chr1", 150, 160).map(|i| index.id(i)).collect();
        assert_eq!(hits.len(), 2);
        assert!(hits.contains(&"gene1"));
        assert!(hits.contains(&"exon1"));
    }

    #[rstest]
    fn test_chromosomes_are_independent(nested_regions: RegionSet) {
        let index = RegionIndex::build(&nested_regions).unwrap();

        let hits: Vec<u32> = index.query("chr2", 150, 160).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(index.id(hits[0]), "gene2");

        assert_eq!(index.query("chrUn", 150, 160).count(), 0);
    }

    #[rstest]
    fn test_invalid_region_rejects_the_whole_set() {
        let rs = RegionSet::from(vec![
            region("ok", "chr1", 100, 200),
            region("bad", "chr1", 300, 300),
        ]);

        let result = RegionIndex::build(&rs);
        assert!(matches!(result, Err(RegionIndexError::InvalidRegion(_))));
    }

    #[rstest]
    fn test_duplicate_region_id_rejects_the_whole_set() {
        let rs = RegionSet::from(vec![
            region("dup", "chr1", 100, 200),
            region("dup", "chr2", 300, 400),
        ]);

        let result = RegionIndex::build(&rs);
        match result {
            Err(RegionIndexError::DuplicateRegionId(id)) => assert_eq!(id, "dup"),
            other => panic!("expected DuplicateRegionId, got {:?}", other.map(|_| ())),
        }
    }

    #[rstest]
    fn test_overlapping_definitions_stay_distinct() {
        // identical coordinates under two names are two entries
        let rs = RegionSet::from(vec![
            region("A", "chr1", 100, 200),
            region("B", "chr1", 100, 200),
        ]);
        let index = RegionIndex::build(&rs).unwrap();

        assert_eq!(index.query("chr1", 150, 151).count(), 2);
    }

    #[rstest]
    fn test_dense_ids_follow_region_set_order(nested_regions: RegionSet) {
        let index = RegionIndex::build(&nested_regions).unwrap();
        assert_eq!(index.len(), 4);
        assert_eq!(index.ids()[0], "gene1");
        assert_eq!(index.id(3), "gene2");
    }
}
