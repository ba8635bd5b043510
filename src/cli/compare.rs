/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

use super::CompareArgs;
use crate::compare::{compare_files, CompareError};
use anyhow::Context;
use log::error;
use std::io::{self, Write};
use std::process::ExitCode;

/// Exit code when an input file cannot be read
const READ_FAILURE: u8 = 2;

pub(super) fn run(args: &CompareArgs) -> anyhow::Result<ExitCode> {
    let report = match compare_files(&args.file1, &args.file2, args.bin_size) {
        Ok(report) => report,
        Err(e @ CompareError::Read { .. }) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            return Ok(ExitCode::from(READ_FAILURE));
        }
        Err(e) => return Err(e.into()),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &report).context("Failed to serialize report")?;
        writeln!(out)?;
    } else {
        report.write_text(
            &mut out,
            &args.file1.display().to_string(),
            &args.file2.display().to_string(),
            args.verbose,
        )?;
    }

    Ok(if report.is_identical() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
