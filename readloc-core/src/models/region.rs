use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::RegionSetError;

///
/// A named genomic region to be counted against: one line of a BED file.
///
/// Regions for the same chromosome may overlap each other (a gene and an
/// exon within it, for instance); nothing here assumes disjointness.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct Region {
    pub id: String,
    pub chr: String,
    pub start: u32,
    pub end: u32,
}

impl Region {
    /// Span length of the region.
    pub fn width(&self) -> u32 {
        self.end - self.start
    }

    /// BED-style string of the region.
    pub fn as_string(&self) -> String {
        format!("{}\t{}\t{}\t{}", self.chr, self.start, self.end, self.id)
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl FromStr for Region {
    type Err = RegionSetError;

    /// Parse one BED line. Columns are chr, start, end, and optionally a
    /// name; regions with no name column get a `chr:start-end` id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('\t').collect();
        if parts.len() < 3 {
            return Err(RegionSetError::RegionParseError(s.to_string()));
        }

        let chr = parts[0].to_string();
        let start = parts[1]
            .parse::<u32>()
            .map_err(|_| RegionSetError::RegionParseError(s.to_string()))?;
        let end = parts[2]
            .parse::<u32>()
            .map_err(|_| RegionSetError::RegionParseError(s.to_string()))?;

        let id = match parts.get(3) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("{}:{}-{}", chr, start, end),
        };

        Ok(Region {
            id,
            chr,
            start,
            end,
        })
    }
}
