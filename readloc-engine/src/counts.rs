use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Result;
use flate2::write::GzEncoder;
use flate2::Compression;

use readloc_index::RegionIndex;

/// Per-region distinct-read counts, dense over an index's region ids.
///
/// Every region known to the index is present from the start with a count of
/// zero; absence from the output never has to stand in for "zero reads".
/// Merging is element-wise addition, commutative and associative, so partial
/// counts from independently processed shards combine in any order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionCounts {
    counts: Vec<u64>,
}

impl RegionCounts {
    /// Zeroed counts for `num_regions` regions.
    pub fn new(num_regions: usize) -> Self {
        RegionCounts {
            counts: vec![0; num_regions],
        }
    }

    /// Credit one read to each region in `region_ids`.
    ///
    /// Each id is incremented by exactly 1, never by the number of segments
    /// that produced it; callers pass the already-deduplicated per-read set
    /// from [`crate::assign`].
    pub fn record(&mut self, region_ids: impl IntoIterator<Item = u32>) {
        for id in region_ids {
            self.counts[id as usize] += 1;
        }
    }

    /// Fold another shard's counts into this one.
    ///
    /// # Panics
    ///
    /// Panics when the operands were built over different region sets; a
    /// silent partial merge would corrupt every downstream count.
    pub fn merge(&mut self, other: &RegionCounts) {
        assert_eq!(
            self.counts.len(),
            other.counts.len(),
            "Can't merge counts over different region sets"
        );
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += theirs;
        }
    }

    pub fn get(&self, dense_id: u32) -> u64 {
        self.counts[dense_id as usize]
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Pair each count with its region's string id, in region-set order.
    pub fn rows<'a>(&'a self, index: &'a RegionIndex) -> impl Iterator<Item = (&'a str, u64)> {
        index
            .ids()
            .iter()
            .zip(self.counts.iter())
            .map(|(id, &count)| (id.as_str(), count))
    }

    /// Write counts as `region_id\tcount` rows, one per region, zeros
    /// included. Output is gzipped when the path ends in `.gz`.
    pub fn write_to_file(&self, path: &Path, index: &RegionIndex) -> Result<()> {
        let file = File::create(path)?;
        let is_gzipped = path.extension() == Some(std::ffi::OsStr::new("gz"));
        let mut writer: BufWriter<Box<dyn Write>> = match is_gzipped {
            true => BufWriter::new(Box::new(GzEncoder::new(file, Compression::default()))),
            false => BufWriter::new(Box::new(file)),
        };

        for (id, count) in self.rows(index) {
            writeln!(writer, "{}\t{}", id, count)?;
        }
        writer.flush()?;

        Ok(())
    }
}
