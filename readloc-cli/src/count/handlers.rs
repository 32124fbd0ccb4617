use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::ArgMatches;

use readloc_core::models::RegionSet;
use readloc_core::utils::remove_all_extensions;
use readloc_engine::alignment_counting::{count_reads_from_sam, count_reads_from_sam_sharded};
use readloc_engine::consts::DEFAULT_OUT_SUFFIX;
use readloc_index::RegionIndex;

/// Default output name derived from the alignment file's stem:
/// `sample.sam.gz` -> `sample.counts.tsv`.
fn default_output_name(alignments: &Path) -> String {
    format!("{}.{}", remove_all_extensions(alignments), DEFAULT_OUT_SUFFIX)
}

pub fn run_count(matches: &ArgMatches) -> Result<()> {
    // get arguments from CLI
    let alignments = matches
        .get_one::<String>("alignments")
        .expect("A path to an alignment file is required.");

    let regions = matches
        .get_one::<String>("regions")
        .expect("A path to a region file or directory is required.");

    let alignments = Path::new(alignments);
    let default_out = default_output_name(alignments);
    let output = matches.get_one::<String>("output").unwrap_or(&default_out);
    let sharded = matches.get_flag("sharded");

    // coerce arguments to types
    let regions_path = PathBuf::from(regions);
    let region_set = match regions_path.is_dir() {
        true => RegionSet::from_directory(&regions_path)?,
        false => RegionSet::try_from(regions_path.as_path())?,
    };

    println!("Loaded {} regions from {}", region_set.len(), regions);

    let index = RegionIndex::build(&region_set)?;

    let counts = match sharded {
        true => count_reads_from_sam_sharded(alignments, &index)?,
        false => count_reads_from_sam(alignments, &index)?,
    };

    counts.write_to_file(Path::new(output), &index)?;
    println!("Results in {}", output);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("sample.sam", "sample.counts.tsv")]
    #[case("data/sample.sam.gz", "sample.counts.tsv")]
    #[case("sample.sorted.sam", "sample.counts.tsv")]
    fn test_default_output_name(#[case] alignments: &str, #[case] expected: &str) {
        assert_eq!(default_output_name(Path::new(alignments)), expected);
    }
}
