use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

/// Strip every extension from a file name (`sample.reloc.bed.gz` -> `sample`).
pub fn remove_all_extensions(path: &Path) -> String {
    let mut stem = path.file_stem().unwrap().to_string_lossy().to_string();

    let mut parent_path = path.with_file_name(stem.clone());
    while parent_path.extension().is_some() {
        parent_path = parent_path.with_extension("");
        stem = parent_path
            .file_stem()
            .unwrap()
            .to_string_lossy()
            .to_string();
    }

    stem
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use flate2::write::GzEncoder;
    use flate2::Compression;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::tempdir;

    #[rstest]
    fn test_dynamic_reader_plain_and_gzipped() {
        let dir = tempdir().unwrap();

        let plain = dir.path().join("data.bed");
        std::fs::write(&plain, "chr1\t1\t2\n").unwrap();

        let gzipped = dir.path().join("data.bed.gz");
        let mut encoder =
            GzEncoder::new(std::fs::File::create(&gzipped).unwrap(), Compression::default());
        encoder.write_all(b"chr1\t1\t2\n").unwrap();
        encoder.finish().unwrap();

        for path in [plain, gzipped] {
            let mut reader = get_dynamic_reader(&path).unwrap();
            let mut content = String::new();
            reader.read_to_string(&mut content).unwrap();
            assert_eq!(content, "chr1\t1\t2\n");
        }
    }

    #[rstest]
    #[case("sample.bam", "sample")]
    #[case("sample.reloc.bed.gz", "sample")]
    #[case("plain", "plain")]
    fn test_remove_all_extensions(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(remove_all_extensions(Path::new(name)), expected);
    }
}
