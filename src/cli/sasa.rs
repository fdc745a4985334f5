use super::{output_file, read_atoms, use_parallel};
use clap::Parser;
use solvent_occlusion::{
    aggregate_by_residue, atom_sasa_to_df, compute_atom_areas, parse_chains, residue_sasa_to_df,
    run_with_threads, write_df_to_file, DataFrameFileType, SasaError, SasaSettings,
};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{info, trace};

/// Level at which surface areas are reported.
#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub(crate) enum SasaLevel {
    /// One row per atom
    Atom,
    /// Atom areas summed per residue
    Residue,
}

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub(crate) struct Args {
    /// Path to the PDB or mmCIF file to be analyzed
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory
    #[arg(short, long)]
    output: PathBuf,

    /// Name of the output file
    #[arg(short = 'f', long = "filename", default_value_t = String::from("sasa"))]
    filename: String,

    /// Output file type
    #[arg(short = 't', long, value_enum, default_value_t = DataFrameFileType::Csv)]
    output_format: DataFrameFileType,

    /// Report SASA per atom or per residue
    #[arg(short, long, value_enum, default_value_t = SasaLevel::Atom)]
    level: SasaLevel,

    /// Only report these chains, e.g. A,B.
    /// All chains are still used when computing the surface.
    #[arg(short, long)]
    chains: Option<String>,

    /// Model number to analyze (default: 0, the first model)
    #[arg(short = 'm', long = "model", default_value_t = 0)]
    model_num: usize,

    /// Probe radius r (smaller r detects more surface details and reports a larger surface)
    #[arg(short = 'r', long = "probe-radius", default_value_t = 1.4)]
    probe_radius: f64,

    /// Number of points on the sphere for sampling
    #[arg(short = 'n', long = "num-points", default_value_t = 150)]
    n_points: usize,

    /// Number of threads to use for parallel processing (0 for all cores)
    #[arg(short = 'j', long = "num-threads", default_value_t = 1)]
    num_threads: usize,
}

pub(crate) fn run(args: &Args) -> Result<(), SasaError> {
    trace!("{args:?}");

    let atoms = read_atoms(&args.input, args.model_num)?;
    let settings = SasaSettings {
        probe_radius: args.probe_radius,
        n_samples: args.n_points,
        parallel: use_parallel(false, args.num_threads),
    };
    let atom_areas = run_with_threads(args.num_threads, || {
        compute_atom_areas(&atoms, &settings)
    })??;

    let chain_filter: Option<HashSet<String>> = args
        .chains
        .as_deref()
        .map(|c| parse_chains(c).into_iter().collect());

    let mut df = match args.level {
        SasaLevel::Atom => {
            let rows: Vec<_> = atom_areas
                .into_iter()
                .filter(|a| chain_filter.as_ref().map_or(true, |c| c.contains(&a.chain)))
                .collect();
            let total: f64 = rows.iter().map(|a| a.area).sum();
            info!("Total SASA of {} atoms: {total:.2} Å²", rows.len());
            atom_sasa_to_df(&rows)?
        }
        SasaLevel::Residue => {
            let rows = aggregate_by_residue(&atom_areas, chain_filter.as_ref());
            let total: f64 = rows.iter().map(|r| r.area).sum();
            info!("Total SASA of {} residues: {total:.2} Å²", rows.len());
            residue_sasa_to_df(&rows)?
        }
    };

    let output_file = output_file(&args.output, &args.filename)?;
    write_df_to_file(&mut df, &output_file, args.output_format)?;
    info!(
        "Results saved to {}",
        output_file
            .with_extension(args.output_format.to_string())
            .display()
    );
    Ok(())
}
