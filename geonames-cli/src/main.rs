//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use std::error::Error;

use env_logger::Env;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    if let Err(err) = geonames_cli::run() {
        eprintln!("geonames: {err}");
        let mut cause = err.source();
        while let Some(source) = cause {
            eprintln!("  caused by: {source}");
            cause = source.source();
        }
        std::process::exit(1);
    }
}
