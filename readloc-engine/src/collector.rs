use std::collections::BTreeSet;

use fxhash::FxHashMap;

use readloc_core::models::{AlignedBlock, ReadSegment};

/// All aligned blocks observed for one read id.
///
/// Blocks are a set: a tool that reports the same block twice for one read
/// (some multi-mapping representations do) collapses to a single entry.
/// Blocks on different chromosomes coexist in one logical read, so chimeric
/// alignments keep their global read identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalRead {
    pub read_id: String,
    pub blocks: BTreeSet<AlignedBlock>,
}

impl LogicalRead {
    /// A read with no observed blocks. Degenerate but not exceptional.
    pub fn empty(read_id: impl Into<String>) -> Self {
        LogicalRead {
            read_id: read_id.into(),
            blocks: BTreeSet::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Groups incoming alignment segments by read identity.
///
/// Segments may arrive in arbitrary order. The only ordering requirement is
/// on the caller: all segments of a read must have been accepted before that
/// read is flushed. [`ReadSegmentCollector::drain`] is the conservative
/// always-correct policy (flush nothing until end of stream); eager per-read
/// flushing is sound only when the upstream source delivers each read's
/// segments contiguously.
#[derive(Debug, Default)]
pub struct ReadSegmentCollector {
    pending: FxHashMap<String, BTreeSet<AlignedBlock>>,
}

impl ReadSegmentCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one segment to its read's working set.
    pub fn accept(&mut self, segment: ReadSegment) {
        self.pending
            .entry(segment.read_id)
            .or_default()
            .insert(segment.block);
    }

    /// Finalize and remove a read's working state.
    ///
    /// Flushing an unknown read id is a no-op returning an empty
    /// [`LogicalRead`], never an error.
    pub fn flush(&mut self, read_id: &str) -> LogicalRead {
        match self.pending.remove(read_id) {
            Some(blocks) => LogicalRead {
                read_id: read_id.to_string(),
                blocks,
            },
            None => LogicalRead::empty(read_id),
        }
    }

    /// Flush every pending read, consuming all working state.
    pub fn drain(&mut self) -> impl Iterator<Item = LogicalRead> + '_ {
        self.pending
            .drain()
            .map(|(read_id, blocks)| LogicalRead { read_id, blocks })
    }

    /// Number of reads with pending working state.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
