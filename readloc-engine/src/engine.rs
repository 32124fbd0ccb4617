use thiserror::Error;

use readloc_core::models::ReadSegment;
use readloc_index::RegionIndex;

use crate::assign::assign;
use crate::collector::ReadSegmentCollector;
use crate::counts::RegionCounts;

/// Errors raised by [`CountEngine`] at runtime.
#[derive(Debug, Error)]
pub enum CountError {
    /// The engine was used after [`CountEngine::finalize`]. Finalized is
    /// terminal; this is a programmer error, not a data error.
    #[error("Engine is finalized; no further segments can be streamed")]
    EngineClosed,
}

/// The streaming counting engine.
///
/// Lifecycle: regions are loaded when the engine is constructed, segments
/// are streamed through [`accept`](CountEngine::accept), reads are flushed
/// (eagerly via [`flush_read`](CountEngine::flush_read), or all at once by
/// [`finalize`](CountEngine::finalize)), and the finalized counts are
/// returned exactly once. There is no transition back: any streaming call
/// after finalization fails with [`CountError::EngineClosed`].
///
/// Eager flushing is only sound when the input delivers all of a read's
/// segments contiguously; when in doubt, stream everything and let
/// `finalize` flush, trading memory for correctness.
pub struct CountEngine<'a> {
    index: &'a RegionIndex,
    collector: ReadSegmentCollector,
    counts: RegionCounts,
    finalized: bool,
}

impl<'a> CountEngine<'a> {
    pub fn new(index: &'a RegionIndex) -> Self {
        CountEngine {
            index,
            collector: ReadSegmentCollector::new(),
            counts: RegionCounts::new(index.len()),
            finalized: false,
        }
    }

    /// Stream one segment into the engine.
    pub fn accept(&mut self, segment: ReadSegment) -> Result<(), CountError> {
        if self.finalized {
            return Err(CountError::EngineClosed);
        }
        self.collector.accept(segment);
        Ok(())
    }

    /// Flush one read eagerly: assign its regions and count it now,
    /// discarding its working state.
    ///
    /// All of the read's segments must already have been accepted.
    pub fn flush_read(&mut self, read_id: &str) -> Result<(), CountError> {
        if self.finalized {
            return Err(CountError::EngineClosed);
        }
        let read = self.collector.flush(read_id);
        let regions = assign(&read, self.index);
        self.counts.record(regions);
        Ok(())
    }

    /// Flush every pending read and return the final counts.
    ///
    /// The engine is closed afterwards; a second `finalize` (or any further
    /// `accept`/`flush_read`) fails with [`CountError::EngineClosed`].
    pub fn finalize(&mut self) -> Result<RegionCounts, CountError> {
        if self.finalized {
            return Err(CountError::EngineClosed);
        }
        self.finalized = true;

        let index = self.index;
        let counts = &mut self.counts;
        for read in self.collector.drain() {
            counts.record(assign(&read, index));
        }

        Ok(std::mem::replace(&mut self.counts, RegionCounts::new(0)))
    }

    /// Number of reads currently held in working state.
    pub fn pending_reads(&self) -> usize {
        self.collector.len()
    }

    pub fn index(&self) -> &RegionIndex {
        self.index
    }
}
