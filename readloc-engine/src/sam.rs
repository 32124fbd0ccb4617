use std::str::FromStr;

use anyhow::Result;

use readloc_core::models::ReadSegment;

/// Bit in the SAM FLAG field marking an unmapped record.
const FLAG_UNMAPPED: u16 = 0x4;

/// The alignment-relevant slice of one SAM text record.
///
/// Only the fields the counting engine needs are kept: the read name, flag,
/// reference name, 0-based start, and the aligned blocks decoded from the
/// CIGAR string. Everything else on the line is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamRecord {
    pub read_id: String,
    pub chr: String,
    /// 0-based reference start (SAM POS is 1-based).
    pub start: u32,
    /// Half-open reference blocks decoded from the CIGAR, merged when
    /// touching.
    pub blocks: Vec<(u32, u32)>,
}

impl SamRecord {
    /// The engine-facing segments of this record, one per aligned block, all
    /// sharing the record's read id.
    pub fn into_segments(self) -> Vec<ReadSegment> {
        let chr = self.chr;
        let read_id = self.read_id;
        self.blocks
            .into_iter()
            .map(|(start, end)| ReadSegment::new(read_id.clone(), chr.clone(), start, end))
            .collect()
    }
}

impl FromStr for SamRecord {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut fields = s.split('\t');
        let qname = fields
            .next()
            .filter(|q| !q.is_empty())
            .ok_or_else(|| anyhow::anyhow!("SAM record with empty read name: {}", s))?;
        let flag = fields
            .next()
            .and_then(|f| f.parse::<u16>().ok())
            .ok_or_else(|| anyhow::anyhow!("SAM record with invalid FLAG: {}", s))?;
        let rname = fields
            .next()
            .ok_or_else(|| anyhow::anyhow!("SAM record with missing RNAME: {}", s))?;
        let pos = fields
            .next()
            .and_then(|p| p.parse::<u32>().ok())
            .ok_or_else(|| anyhow::anyhow!("SAM record with invalid POS: {}", s))?;
        let _mapq = fields
            .next()
            .ok_or_else(|| anyhow::anyhow!("SAM record with missing MAPQ: {}", s))?;
        let cigar = fields
            .next()
            .ok_or_else(|| anyhow::anyhow!("SAM record with missing CIGAR: {}", s))?;

        if flag & FLAG_UNMAPPED != 0 || rname == "*" || cigar == "*" || pos == 0 {
            anyhow::bail!("Unmapped SAM record reached the parser: {}", s);
        }

        let start = pos - 1;
        let blocks = cigar_ref_blocks(cigar, start)?;

        Ok(SamRecord {
            read_id: qname.to_string(),
            chr: rname.to_string(),
            start,
            blocks,
        })
    }
}

/// True when a SAM text line is a mapped alignment record (not a header, not
/// unmapped). These are the lines worth handing to [`SamRecord::from_str`].
pub fn is_mapped_record(line: &str) -> bool {
    if line.is_empty() || line.starts_with('@') {
        return false;
    }
    let mut fields = line.split('\t');
    let flag = fields.nth(1).and_then(|f| f.parse::<u16>().ok());
    let rname = fields.next();
    let cigar = fields.nth(2);
    match (flag, rname, cigar) {
        (Some(flag), Some(rname), Some(cigar)) => {
            flag & FLAG_UNMAPPED == 0 && rname != "*" && cigar != "*"
        }
        _ => false,
    }
}

/// Decode a CIGAR string into half-open reference blocks starting at
/// `start`.
///
/// `M`, `=`, `X` and `D` consume reference and extend the current block; `N`
/// (the splice gap) consumes reference and splits blocks; `I`, `S`, `H` and
/// `P` consume no reference. Blocks separated only by a `D` end up touching
/// and are merged, matching how a split-aware overlap treats a deletion as
/// part of the footprint.
pub fn cigar_ref_blocks(cigar: &str, start: u32) -> Result<Vec<(u32, u32)>> {
    let mut blocks: Vec<(u32, u32)> = Vec::new();
    let mut cursor = start;
    let mut block_start = start;
    let mut num: u32 = 0;
    let mut saw_digit = false;

    for c in cigar.chars() {
        if let Some(digit) = c.to_digit(10) {
            num = num
                .checked_mul(10)
                .and_then(|n| n.checked_add(digit))
                .ok_or_else(|| anyhow::anyhow!("CIGAR length overflow: {}", cigar))?;
            saw_digit = true;
            continue;
        }
        if !saw_digit {
            anyhow::bail!("CIGAR operation without a length: {}", cigar);
        }

        match c {
            'M' | '=' | 'X' | 'D' => {
                cursor = cursor
                    .checked_add(num)
                    .ok_or_else(|| anyhow::anyhow!("CIGAR reference overflow: {}", cigar))?;
            }
            'N' => {
                if cursor > block_start {
                    blocks.push((block_start, cursor));
                }
                cursor = cursor
                    .checked_add(num)
                    .ok_or_else(|| anyhow::anyhow!("CIGAR reference overflow: {}", cigar))?;
                block_start = cursor;
            }
            'I' | 'S' | 'H' | 'P' => {}
            op => anyhow::bail!("Unknown CIGAR operation '{}': {}", op, cigar),
        }

        num = 0;
        saw_digit = false;
    }

    if saw_digit {
        anyhow::bail!("CIGAR ends with a dangling length: {}", cigar);
    }
    if cursor > block_start {
        blocks.push((block_start, cursor));
    }
    if blocks.is_empty() {
        anyhow::bail!("CIGAR covers no reference positions: {}", cigar);
    }

    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("50M", 100, vec![(100, 150)])]
    #[case("20M100N30M", 100, vec![(100, 120), (220, 250)])]
    #[case("10M5D10M", 100, vec![(100, 125)])] // deletion stays in the block
    #[case("5S20M3I20M2S", 100, vec![(100, 140)])] // clips and insertions consume nothing
    #[case("10M50N10M50N10M", 0, vec![(0, 10), (60, 70), (120, 130)])]
    fn test_cigar_ref_blocks(
        #[case] cigar: &str,
        #[case] start: u32,
        #[case] expected: Vec<(u32, u32)>,
    ) {
        assert_eq!(cigar_ref_blocks(cigar, start).unwrap(), expected);
    }

    #[rstest]
    #[case("10")]
    #[case("M")]
    #[case("10M5")]
    #[case("10Q")]
    #[case("100N")]
    fn test_cigar_malformed_or_empty_footprint(#[case] cigar: &str) {
        assert!(cigar_ref_blocks(cigar, 0).is_err());
    }

    #[rstest]
    #[case("4294967295M", 100)] // cursor past u32::MAX
    #[case("4294967290M10N5M", 100)] // splice gap past u32::MAX
    fn test_cigar_reference_overflow_is_an_error(#[case] cigar: &str, #[case] start: u32) {
        assert!(cigar_ref_blocks(cigar, start).is_err());
    }

    #[rstest]
    fn test_parse_spliced_record() {
        let line = "r1\t0\tchr1\t101\t60\t20M40N10M\t*\t0\t0\tACGT\tFFFF";
        let record: SamRecord = line.parse().unwrap();

        assert_eq!(record.read_id, "r1");
        assert_eq!(record.chr, "chr1");
        assert_eq!(record.start, 100);
        assert_eq!(record.blocks, vec![(100, 120), (160, 170)]);

        let segments = record.into_segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].read_id, segments[1].read_id);
        assert_eq!(segments[1].block.start, 160);
    }

    #[rstest]
    fn test_unmapped_record_is_rejected() {
        let line = "r1\t4\t*\t0\t0\t*\t*\t0\t0\tACGT\tFFFF";
        assert!(line.parse::<SamRecord>().is_err());
        assert_eq!(is_mapped_record(line), false);
    }

    #[rstest]
    fn test_is_mapped_record_filters_headers() {
        assert_eq!(is_mapped_record("@HD\tVN:1.6"), false);
        assert_eq!(is_mapped_record("@SQ\tSN:chr1\tLN:1000"), false);
        assert_eq!(
            is_mapped_record("r1\t0\tchr1\t101\t60\t50M\t*\t0\t0\tACGT\tFFFF"),
            true
        );
    }
}
