// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! `vnect-utils` command-line tool.

use std::process;

use clap::Parser;

mod cli;

use cli::args::Cli;
use cli::logging::set_verbose;

fn main() {
    let cli = Cli::parse();
    set_verbose(cli.verbose);

    if let Err(e) = cli::commands::run(&cli) {
        error!("{e}");
        process::exit(1);
    }
}
