use clap::{arg, Arg, Command};

pub use readloc_engine::consts::COUNT_CMD;

pub fn create_count_cli() -> Command {
    Command::new(COUNT_CMD)
        .about("Count distinct reads per region from a SAM file over a BED region set.")
        .arg(
            Arg::new("alignments")
                .short('a')
                .long("alignments")
                .required(true)
                .help("Path to a SAM file (plain or gzipped) of aligned reads"),
        )
        .arg(
            Arg::new("regions")
                .short('r')
                .long("regions")
                .required(true)
                .help("Path to a BED file, or a directory of BED files, defining the regions"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output TSV path (gzipped if it ends in .gz); defaults to <alignment stem>.counts.tsv"),
        )
        .arg(
            arg!(--sharded)
                .help("Partition segments by chromosome and count shards in parallel")
                .action(clap::ArgAction::SetTrue),
        )
}
