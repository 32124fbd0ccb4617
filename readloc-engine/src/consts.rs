/// The command name for read counting.
pub const COUNT_CMD: &str = "count";

/// Suffix appended to the alignment file's stem to form the default output
/// file name (`sample.sam.gz` -> `sample.counts.tsv`).
pub const DEFAULT_OUT_SUFFIX: &str = "counts.tsv";
