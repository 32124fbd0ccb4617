use std::cmp::Ordering;
use std::fmt::{self, Display};

///
/// One contiguous aligned block of a read on the reference, half-open.
///
/// A spliced alignment decomposes into several blocks; each keeps the
/// chromosome it landed on so that chimeric alignments (blocks on different
/// chromosomes) stay representable.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct AlignedBlock {
    pub chr: String,
    pub start: u32,
    pub end: u32,
}

impl AlignedBlock {
    pub fn width(&self) -> u32 {
        self.end - self.start
    }
}

impl Ord for AlignedBlock {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.chr, self.start, self.end).cmp(&(&other.chr, other.start, other.end))
    }
}

impl PartialOrd for AlignedBlock {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for AlignedBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chr, self.start, self.end)
    }
}

///
/// One aligned block of one read, tagged with the read's identity.
///
/// This is the typed record the counting engine consumes: by the time a
/// segment is expressed as a `ReadSegment` it has a valid half-open interval
/// and a non-empty read id. Format-specific decoding happens upstream.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct ReadSegment {
    pub read_id: String,
    pub block: AlignedBlock,
}

impl ReadSegment {
    pub fn new(read_id: impl Into<String>, chr: impl Into<String>, start: u32, end: u32) -> Self {
        ReadSegment {
            read_id: read_id.into(),
            block: AlignedBlock {
                chr: chr.into(),
                start,
                end,
            },
        }
    }
}
