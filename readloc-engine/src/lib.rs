//! Read-to-region assignment and counting engine.
//!
//! Given alignment segments (one read may produce several, from splicing or
//! chimeric alignment) and a set of named, possibly overlapping regions,
//! count for every region the number of distinct reads overlapping it. Each
//! read contributes at most one unit to any single region no matter how many
//! of its blocks land there, while still crediting every distinct region it
//! genuinely overlaps.
//!
//! The over-counting this prevents is the reason the tool exists: a naive
//! per-segment counter bills a spliced read with two exonic blocks in the
//! same region twice, and bills a read spanning a region boundary to nothing
//! or to an arbitrary pick. Here the per-read set union of overlapped region
//! ids happens before any increment.
//!
//! Pipeline: [`ReadSegmentCollector`] groups segments into logical reads,
//! [`assign`] unions their overlapped regions against a
//! [`readloc_index::RegionIndex`], and [`RegionCounts`] accumulates one
//! increment per (read, region) pair. [`CountEngine`] ties the three together
//! behind a streaming interface; [`count_segments_sharded`] runs one shard
//! per chromosome and merges the partial counts.

pub mod alignment_counting;
pub mod assign;
pub mod collector;
pub mod consts;
pub mod counts;
pub mod engine;
pub mod sam;
pub mod shard;

// re-exports
pub use alignment_counting::{count_reads_from_sam, count_reads_from_sam_sharded};
pub use assign::assign;
pub use collector::{LogicalRead, ReadSegmentCollector};
pub use counts::RegionCounts;
pub use engine::{CountEngine, CountError};
pub use sam::SamRecord;
pub use shard::count_segments_sharded;
