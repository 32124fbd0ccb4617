use std::io::BufRead;
use std::path::Path;
use std::str::FromStr;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use readloc_core::models::ReadSegment;
use readloc_core::utils::get_dynamic_reader;
use readloc_index::RegionIndex;

use crate::counts::RegionCounts;
use crate::engine::CountEngine;
use crate::sam::{is_mapped_record, SamRecord};
use crate::shard::count_segments_sharded;

/// Count distinct reads per region from a SAM text file (plain or gzipped).
///
/// Every mapped record is decomposed into its aligned blocks and streamed
/// into a [`CountEngine`]; reads are flushed only at end of stream, so
/// neither the record order nor how a read's records are interleaved
/// matters. Malformed records are fatal: there is no skip-and-continue,
/// since partially counted input would silently under-report.
pub fn count_reads_from_sam(path: &Path, index: &RegionIndex) -> Result<RegionCounts> {
    let mut engine = CountEngine::new(index);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed}] {msg} ({per_sec})")
            .unwrap()
            .tick_strings(&["-", "\\", "|", "/"]),
    );
    spinner.set_message("Processing alignments...");

    let mut processed_records: u64 = 0;

    let reader = get_dynamic_reader(path)?;
    for line in reader.lines() {
        let line = line?;
        if !is_mapped_record(&line) {
            continue;
        }

        let record = SamRecord::from_str(&line)?;
        for segment in record.into_segments() {
            engine.accept(segment)?;
        }

        processed_records += 1;
        if processed_records % 10_000 == 0 {
            spinner.set_message(format!("Processed {} alignments", processed_records));
        }
        spinner.inc(1);
    }

    spinner.finish_with_message(format!("Processed {} alignments", processed_records));

    Ok(engine.finalize()?)
}

/// Like [`count_reads_from_sam`], but collects the segments and counts one
/// rayon shard per chromosome. Same result, better wall time on multi-
/// chromosome input.
pub fn count_reads_from_sam_sharded(path: &Path, index: &RegionIndex) -> Result<RegionCounts> {
    let mut segments: Vec<ReadSegment> = Vec::new();

    let reader = get_dynamic_reader(path)?;
    for line in reader.lines() {
        let line = line?;
        if !is_mapped_record(&line) {
            continue;
        }
        segments.extend(SamRecord::from_str(&line)?.into_segments());
    }

    Ok(count_segments_sharded(segments, index))
}
