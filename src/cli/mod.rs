pub(crate) mod occlusion;
pub(crate) mod sasa;

use solvent_occlusion::{atoms_from_pdb, load_model, log_pdb_warnings, AtomRecord, SasaError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load the atoms of one model from `input`, logging parser warnings.
pub(crate) fn read_atoms(input: &Path, model_num: usize) -> Result<Vec<AtomRecord>, SasaError> {
    // Make sure `input` exists
    let input_path = input.canonicalize()?;
    let input_file = input_path.to_string_lossy();
    debug!("Using input file {input_file}");

    let (pdb, pdb_warnings) = load_model(&input_file)?;
    log_pdb_warnings(&pdb_warnings);

    let atoms = atoms_from_pdb(&pdb, model_num);
    if atoms.is_empty() {
        return Err(SasaError::Structure(format!(
            "no protein heavy atoms found in model {model_num} of {input_file}"
        )));
    }
    Ok(atoms)
}

/// Create the output directory and return the path of the output file in it.
pub(crate) fn output_file(output_dir: &Path, filename: &str) -> Result<PathBuf, SasaError> {
    let output_path = std::path::absolute(output_dir)?;
    std::fs::create_dir_all(&output_path)?;
    Ok(output_path.join(filename))
}

/// Work runs on the rayon pool when asked to, or when more than one thread is requested.
pub(crate) fn use_parallel(parallel: bool, num_threads: usize) -> bool {
    parallel || num_threads != 1
}
