//! Region overlap index for readloc.
//!
//! This crate answers one question efficiently: which named regions does a
//! given genomic interval overlap? Regions are grouped by chromosome and,
//! within a chromosome, held in a start-sorted list queried with a binary
//! search for the first candidate whose end could still overlap, followed by
//! a forward scan (the BITS approach:
//! <https://academic.oup.com/bioinformatics/article/29/1/1/273289>).
//!
//! Overlapping region definitions are deliberately preserved as distinct
//! entries. A gene and an exon nested inside it are both legitimate regions
//! and both must independently receive credit; the index never merges or
//! deduplicates the regions it is built from.
//!
//! ```
//! use readloc_core::models::{Region, RegionSet};
//! use readloc_index::RegionIndex;
//!
//! let regions = RegionSet::from(vec![
//!     Region { id: "A".to_string(), chr: "chr1".to_string(), start: 100, end: 200 },
//!     Region { id: "B".to_string(), chr: "chr1".to_string(), start: 150, end: 250 },
//! ]);
//!
//! let index = RegionIndex::build(&regions).unwrap();
//! let hits: Vec<u32> = index.query("chr1", 180, 190).collect();
//! assert_eq!(hits.len(), 2); // A and B both overlap
//! ```

pub mod chrom_index;
pub mod region_index;

// re-exports
pub use self::chrom_index::ChromIndex;
pub use self::region_index::{RegionIndex, RegionIndexError};
