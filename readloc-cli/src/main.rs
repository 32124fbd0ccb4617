mod count;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "readloc";
    pub const BIN_NAME: &str = "readloc";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Assign reads to genomic regions and count each read at most once per region, splice- and boundary-aware.")
        .subcommand_required(true)
        .subcommand(count::cli::create_count_cli())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // COUNT
        //
        Some((count::cli::COUNT_CMD, matches)) => {
            count::handlers::run_count(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
