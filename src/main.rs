/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Main executable for zeoran-prep

use clap::Parser;
use std::process::ExitCode;
use zeoran_prep::cli::{self, Cli};

fn main() -> ExitCode {
    // RUST_LOG overrides the default filter
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli::run(cli) {
        Ok(code) => code,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
