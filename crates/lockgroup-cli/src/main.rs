//! lockgroup binary

use clap::Parser;
use lockgroup_cli::Cli;
use std::ffi::OsString;

fn main() {
    // Parse failures still answer "no access", auditing verify and enter
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            lockgroup_cli::init_logging(false, "info");
            let raw: Vec<OsString> = std::env::args_os().collect();
            let message = format!("{:?}", error.kind());
            std::process::exit(lockgroup_cli::deny_unparsed(&raw, &message));
        }
    };

    std::process::exit(lockgroup_cli::run(cli));
}
