use super::{output_file, read_atoms, use_parallel};
use clap::Parser;
use solvent_occlusion::{
    compute_occlusion, occlusion_to_df, parse_chains, run_with_threads, write_df_to_file,
    DataFrameFileType, SasaError, SasaSettings,
};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info, trace};

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
    #[arg(short = 'f', long = "filename", default_value_t = String::from("occlusion"))]
    filename: String,

    /// Output file type
    #[arg(short = 't', long, value_enum, default_value_t = DataFrameFileType::Csv)]
    output_format: DataFrameFileType,

    /// Chains forming the complex, e.g. A,B.
    /// Chains not listed are removed before any calculation.
    /// All chains are used if omitted.
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

    /// Compute the complex and each isolated chain concurrently.
    /// Implied when more than one thread is requested.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Number of threads to use for parallel processing (0 for all cores)
    #[arg(short = 'j', long = "num-threads", default_value_t = 1)]
    num_threads: usize,
}

pub(crate) fn run(args: &Args) -> Result<(), SasaError> {
    trace!("{args:?}");

    let atoms = read_atoms(&args.input, args.model_num)?;
    let chains = args.chains.as_deref().map(parse_chains);
    let settings = SasaSettings {
        probe_radius: args.probe_radius,
        n_samples: args.n_points,
        parallel: use_parallel(args.parallel, args.num_threads),
    };

    let occlusion = run_with_threads(args.num_threads, || {
        compute_occlusion(&atoms, chains.as_deref(), &settings)
    })??;

    // Buried surface area per chain
    let mut buried: BTreeMap<&str, f64> = BTreeMap::new();
    for r in &occlusion {
        *buried.entry(r.chain.as_str()).or_insert(0.0) += r.area_sgl - r.area_all;
        if r.occlusion > 0.0 {
            debug!("{r}");
        }
    }
    for (chain, area) in &buried {
        info!("Chain {chain} buries {area:.2} Å² in the complex");
    }
    let n_occluded = occlusion.iter().filter(|r| r.occlusion > 0.0).count();
    info!(
        "Found {n_occluded} of {} residues with non-zero occlusion",
        occlusion.len()
    );

    let mut df = occlusion_to_df(&occlusion)?;
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
