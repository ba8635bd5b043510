/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

use super::ConvertArgs;
use crate::convert::{convert_file, BuildOptions, Conversion, ConversionWarning};
use crate::io::{write_atom_sites, write_unit_cell, CifReader, StructureReader};
use crate::validation::check_output_size;
use anyhow::{bail, Context};
use log::{error, info, warn};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// `<root>/unit_cell` and `<root>/atom_sites`
#[derive(Debug, Clone)]
pub(crate) struct OutputLayout {
    unit_cell_dir: PathBuf,
    atom_sites_dir: PathBuf,
}

impl OutputLayout {
    pub(crate) fn new(root: &Path) -> Self {
        Self {
            unit_cell_dir: root.join("unit_cell"),
            atom_sites_dir: root.join("atom_sites"),
        }
    }

    fn create_dirs(&self) -> anyhow::Result<()> {
        for dir in [&self.unit_cell_dir, &self.atom_sites_dir] {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        }
        Ok(())
    }

    fn unit_cell_path(&self, name: &str) -> PathBuf {
        self.unit_cell_dir.join(format!("{}.txt", name))
    }

    fn atom_sites_path(&self, name: &str) -> PathBuf {
        self.atom_sites_dir.join(format!("{}.txt", name))
    }
}

fn structure_name(input: &Path, name: Option<&str>) -> anyhow::Result<String> {
    if let Some(name) = name {
        return Ok(name.to_string());
    }
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .with_context(|| format!("Cannot derive a structure name from {}", input.display()))
}

/// Output names for every input, rejecting two inputs that would write the
/// same files
fn output_names(inputs: &[PathBuf], name: Option<&str>) -> anyhow::Result<Vec<String>> {
    let mut seen: HashMap<String, &Path> = HashMap::new();
    let mut names = Vec::with_capacity(inputs.len());
    for input in inputs {
        let derived = structure_name(input, name)?;
        if let Some(previous) = seen.insert(derived.clone(), input) {
            bail!(
                "{} and {} would both be written as '{}'; use distinct file names",
                previous.display(),
                input.display(),
                derived
            );
        }
        names.push(derived);
    }
    Ok(names)
}

fn write_outputs(
    layout: &OutputLayout,
    name: &str,
    conversion: &mut Conversion,
) -> anyhow::Result<()> {
    let unit_cell_path = layout.unit_cell_path(name);
    let file = File::create(&unit_cell_path)
        .with_context(|| format!("Failed to create {}", unit_cell_path.display()))?;
    write_unit_cell(BufWriter::new(file), &conversion.unit_cell)
        .with_context(|| format!("Failed to write {}", unit_cell_path.display()))?;

    let atom_sites_path = layout.atom_sites_path(name);
    let file = File::create(&atom_sites_path)
        .with_context(|| format!("Failed to create {}", atom_sites_path.display()))?;
    write_atom_sites(BufWriter::new(file), &conversion.atoms)
        .with_context(|| format!("Failed to write {}", atom_sites_path.display()))?;

    for path in [&unit_cell_path, &atom_sites_path] {
        if let Some(issue) = check_output_size(path)? {
            warn!("{}", issue);
            conversion.warnings.push(ConversionWarning::Validation(issue));
        }
    }

    info!(
        "Wrote {} and {}",
        unit_cell_path.display(),
        atom_sites_path.display()
    );
    Ok(())
}

/// Convert one input and write its files under `name`
pub(crate) fn convert_one<R>(
    reader: &R,
    input: &Path,
    name: &str,
    options: &BuildOptions,
    layout: &OutputLayout,
) -> anyhow::Result<Conversion>
where
    R: StructureReader + ?Sized,
{
    let mut conversion = convert_file(reader, input, options)
        .with_context(|| format!("Failed to convert {}", input.display()))?;
    write_outputs(layout, name, &mut conversion)?;
    Ok(conversion)
}

pub(super) fn run(args: &ConvertArgs) -> anyhow::Result<ExitCode> {
    if args.name.is_some() && args.inputs.len() > 1 {
        bail!("--name can only be used with a single input file");
    }
    let names = output_names(&args.inputs, args.name.as_deref())?;

    let mut options = BuildOptions::default()
        .with_t_atom(&args.t_atom)
        .with_policy(args.charge_policy.into())
        .with_output_formats(args.output_formats.iter().cloned());
    if let Some(path) = &args.config {
        options = options.with_config_file(path);
    }

    let layout = OutputLayout::new(&args.output_dir);
    layout.create_dirs()?;
    info!("Writing zeoran files under {}", args.output_dir.display());

    let reader = CifReader::new();
    let results: Vec<_> = args
        .inputs
        .par_iter()
        .zip(names.par_iter())
        .map(|(input, name)| {
            let outcome = convert_one(&reader, input, name, &options, &layout);
            (input, name, outcome)
        })
        .collect();

    let mut failures = 0;
    for (input, name, outcome) in results {
        match outcome {
            Ok(conversion) => {
                let table = &conversion.unit_cell;
                println!(
                    "{} -> {}: {} atoms, {} {}-atoms, {} cell, {} warning(s)",
                    input.display(),
                    name,
                    table.atom_count,
                    table.t_atom_count,
                    args.t_atom,
                    table.setting,
                    conversion.warnings.len()
                );
            }
            Err(e) => {
                error!("{:#}", e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        eprintln!("{} of {} structure(s) failed", failures, args.inputs.len());
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
