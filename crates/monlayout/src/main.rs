// Author: Dustin Pilgrim
// License: MIT

mod cli;
mod cmd;
mod config;
mod logging;
mod paths;

use clap::Parser;

use crate::cli::Args;

fn main() {
    let args = Args::parse();

    let log = logging::LogSetup::new(args.log_file.clone(), args.verbose);

    if let Err(e) = log.init() {
        // logging should never block normal usage
        eprintln!("monlayout: failed to init logging: {e}");
    }

    if let Err(e) = cmd::run(args) {
        eprintln!("monlayout: {e}");
        std::process::exit(1);
    }
}
