/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Command line interface
//!
//! `convert` turns CIF files into zeoran unit-cell and atom-sites files;
//! `compare` checks two atom-sites files against each other.

mod compare;
mod convert;

use crate::charges::ChargePolicy;
use crate::compare::DEFAULT_BIN_SIZE;
use crate::convert::DEFAULT_T_ATOM;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

/// Environment variable overriding the output root
pub const DATA_DIR_ENV: &str = "ZEORAN_DATA_DIR";

#[derive(Parser, Debug)]
#[command(
    name = "zeoran-prep",
    about = "Prepare and validate zeoran structure files",
    version,
    author,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert CIF structures into unit_cell/ and atom_sites/ files
    Convert(ConvertArgs),

    /// Compare two atom-sites files with coordinate histograms
    Compare(CompareArgs),
}

/// Fallback for charges not given by the config or the structure
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChargePolicyArg {
    /// Zeolite element defaults (Si 1.5, O -0.75)
    #[default]
    Defaults,
    /// Zero, flagged as unresolved
    Zero,
}

impl From<ChargePolicyArg> for ChargePolicy {
    fn from(arg: ChargePolicyArg) -> Self {
        match arg {
            ChargePolicyArg::Defaults => ChargePolicy::ElementDefaults,
            ChargePolicyArg::Zero => ChargePolicy::ZeroFill,
        }
    }
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input CIF files
    #[arg(value_name = "CIF", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output structure name (single input only; defaults to the file stem)
    #[arg(short, long)]
    pub name: Option<String>,

    /// YAML file with unit_cell overrides and charges
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Root directory for unit_cell/ and atom_sites/
    #[arg(
        short,
        long,
        value_name = "DIR",
        env = DATA_DIR_ENV,
        default_value = "zeoran_data"
    )]
    pub output_dir: PathBuf,

    /// Symbol counted as T-atom
    #[arg(long, value_name = "SYMBOL", default_value = DEFAULT_T_ATOM)]
    pub t_atom: String,

    /// Charge fallback for atoms without config or native charges
    #[arg(long = "charges", value_name = "POLICY", default_value = "defaults")]
    pub charge_policy: ChargePolicyArg,

    /// Output format recorded in the unit-cell file, repeatable
    #[arg(long = "output-format", value_name = "FORMAT", action = clap::ArgAction::Append)]
    pub output_formats: Vec<String>,
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// First atom-sites file
    pub file1: PathBuf,

    /// Second atom-sites file
    pub file2: PathBuf,

    /// Coordinate bin size in fractional units
    #[arg(long, default_value_t = DEFAULT_BIN_SIZE)]
    pub bin_size: f64,

    /// Show sample differences
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run a parsed command line and return the process exit code
pub fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Command::Convert(args) => convert::run(&args),
        Command::Compare(args) => compare::run(&args),
    }
}
