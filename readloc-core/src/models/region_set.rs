use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::errors::RegionSetError;
use crate::models::Region;
use crate::utils::get_dynamic_reader;

///
/// RegionSet struct, the in-memory representation of one or more BED files'
/// worth of named regions.
///
#[derive(Clone, Debug)]
pub struct RegionSet {
    pub regions: Vec<Region>,
    pub path: Option<PathBuf>,
}

impl TryFrom<&Path> for RegionSet {
    type Error = RegionSetError;

    ///
    /// Create a new [RegionSet] from a bed file (plain or gzipped).
    ///
    /// # Arguments:
    /// - value: path to bed file on disk.
    fn try_from(value: &Path) -> Result<Self, Self::Error> {
        let reader = get_dynamic_reader(value)
            .map_err(|_| RegionSetError::FileReadError(value.display().to_string()))?;

        let mut regions: Vec<Region> = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if line.is_empty()
                || line.starts_with("browser")
                || line.starts_with("track")
                || line.starts_with('#')
            {
                continue;
            }
            regions.push(line.parse::<Region>()?);
        }

        if regions.is_empty() {
            return Err(RegionSetError::EmptyRegionSet(value.display().to_string()));
        }

        let mut rs = RegionSet {
            regions,
            path: Some(value.to_owned()),
        };
        rs.sort();

        Ok(rs)
    }
}

impl From<Vec<Region>> for RegionSet {
    fn from(regions: Vec<Region>) -> Self {
        RegionSet {
            regions,
            path: None,
        }
    }
}

impl RegionSet {
    ///
    /// Load every `*.bed` / `*.bed.gz` file in a directory into one
    /// [RegionSet]. The original workflow hands the tool a directory of
    /// GTF-derived BED files, one per annotation class.
    ///
    pub fn from_directory(dir: &Path) -> Result<Self, RegionSetError> {
        let mut regions: Vec<Region> = Vec::new();

        let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
                name.ends_with(".bed") || name.ends_with(".bed.gz")
            })
            .collect();
        // deterministic load order regardless of directory iteration order
        entries.sort();

        if entries.is_empty() {
            return Err(RegionSetError::EmptyRegionDirectory(
                dir.display().to_string(),
            ));
        }

        for path in entries {
            let rs = RegionSet::try_from(path.as_path())?;
            regions.extend(rs.regions);
        }

        let mut rs = RegionSet {
            regions,
            path: Some(dir.to_owned()),
        };
        rs.sort();

        Ok(rs)
    }

    /// Sort regions by chromosome, then start, then end.
    pub fn sort(&mut self) {
        self.regions
            .sort_by(|a, b| (&a.chr, a.start, a.end).cmp(&(&b.chr, b.start, b.end)));
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }
}

impl<'a> IntoIterator for &'a RegionSet {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::tempdir;

    fn write_bed(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[rstest]
    fn test_load_bed_file() {
        let dir = tempdir().unwrap();
        let path = write_bed(
            dir.path(),
            "regions.bed",
            "# a comment\nchr1\t100\t200\tA\nchr1\t150\t250\tB\nchr2\t0\t50\tC\n",
        );

        let rs = RegionSet::try_from(path.as_path()).unwrap();
        assert_eq!(rs.len(), 3);
        assert_eq!(rs.regions[0].id, "A");
        assert_eq!(rs.regions[2].chr, "chr2");
    }

    #[rstest]
    fn test_empty_bed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = write_bed(dir.path(), "empty.bed", "# nothing here\n");

        let result = RegionSet::try_from(path.as_path());
        assert!(matches!(result, Err(RegionSetError::EmptyRegionSet(_))));
    }

    #[rstest]
    fn test_load_directory_of_beds() {
        let dir = tempdir().unwrap();
        write_bed(dir.path(), "exons.bed", "chr1\t100\t200\texon1\n");
        write_bed(dir.path(), "genes.bed", "chr1\t50\t500\tgene1\n");
        write_bed(dir.path(), "notes.txt", "not a bed file\n");

        let rs = RegionSet::from_directory(dir.path()).unwrap();
        assert_eq!(rs.len(), 2);
        // sorted by coordinate, gene1 starts first
        assert_eq!(rs.regions[0].id, "gene1");
        assert_eq!(rs.regions[1].id, "exon1");
    }

    #[rstest]
    fn test_directory_without_beds_is_an_error() {
        let dir = tempdir().unwrap();
        write_bed(dir.path(), "notes.txt", "not a bed file\n");

        let result = RegionSet::from_directory(dir.path());
        assert!(matches!(
            result,
            Err(RegionSetError::EmptyRegionDirectory(_))
        ));
    }
}
