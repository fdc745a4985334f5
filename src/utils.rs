use crate::atoms::AtomRecord;
use crate::error::SasaError;
use pdbtbx::*;
use polars::prelude::*;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, error, warn};

/// Residues kept when reading a structure.
const NATURAL_AMINO_ACIDS: [&str; 20] = [
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE", "LEU", "LYS", "MET",
    "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL",
];

/// Elements kept when reading a structure; hydrogens and metals are dropped.
const HEAVY_ELEMENTS: [&str; 4] = ["C", "N", "O", "S"];

/// Open an atomic data file with [`pdbtbx::ReadOptions`].
///
/// Parser warnings are returned alongside the structure. If the file cannot
/// be read at all, the parser errors are joined into [`SasaError::Structure`].
pub fn load_model(input_file: &str) -> Result<(PDB, Vec<PDBError>), SasaError> {
    pdbtbx::ReadOptions::default()
        .set_only_atomic_coords(true)
        .set_level(pdbtbx::StrictnessLevel::Loose)
        .read(input_file)
        .map_err(|errors| {
            SasaError::Structure(
                errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<String>>()
                    .join("; "),
            )
        })
}

/// Log parser warnings at a level matching their severity.
pub fn log_pdb_warnings(warnings: &[PDBError]) {
    for e in warnings {
        match e.level() {
            pdbtbx::ErrorLevel::BreakingError => error!("{e}"),
            pdbtbx::ErrorLevel::InvalidatingError => error!("{e}"),
            _ => warn!("{e}"),
        }
    }
}

/// Collect the atoms of one model as [`AtomRecord`]s, in file order.
///
/// Only `ATOM` records are read, so hetero groups are dropped even when
/// they carry an amino acid name. Of those, only heavy atoms (C, N, O, S)
/// of the 20 natural amino acids are kept. `HSE` residues are renamed to `HIS`. When a residue has alternate
/// locations, only the first one seen is kept.
///
/// # Arguments
///
/// * `pdb` - Reference to a PDB structure
/// * `model_num` - Model number to read (0 for first model)
pub fn atoms_from_pdb(pdb: &PDB, model_num: usize) -> Vec<AtomRecord> {
    // If model_num is 0, we use the first model; otherwise use the specified model
    let model_num = if model_num == 0 {
        pdb.models().next().map_or(0, |m| m.serial_number())
    } else {
        model_num
    };

    // First alternate location seen per (chain, residue)
    let mut first_altloc: HashMap<(String, String), String> = HashMap::new();
    let mut n_total = 0;

    let atoms: Vec<AtomRecord> = pdb
        .atoms_with_hierarchy()
        .filter(|x| x.model().serial_number() == model_num)
        .filter_map(|x| {
            n_total += 1;
            if x.atom().hetero() {
                return None;
            }

            let resn = match x.conformer().name() {
                "HSE" => "HIS",
                name => name,
            };
            if !NATURAL_AMINO_ACIDS.contains(&resn) {
                return None;
            }

            let element = x.atom().element()?.symbol();
            if !HEAVY_ELEMENTS.contains(&element) {
                return None;
            }

            let chain = x.chain().id().to_string();
            let (serial, insertion) = x.residue().id();
            let resi = format!("{serial}{}", insertion.unwrap_or(""));

            if let Some(altloc) = x.conformer().alternative_location() {
                let kept = first_altloc
                    .entry((chain.clone(), resi.clone()))
                    .or_insert_with(|| altloc.to_string());
                if kept.as_str() != altloc {
                    return None;
                }
            }

            let (px, py, pz) = x.atom().pos();
            Some(AtomRecord::new(
                &chain,
                &resi,
                resn,
                x.atom().serial_number(),
                x.atom().name(),
                [px, py, pz],
                element,
            ))
        })
        .collect();

    debug!(
        "Kept {} of {} atoms from model {model_num}",
        atoms.len(),
        n_total
    );
    atoms
}

/// Parse a comma-separated chain list such as `A,B`. Blank entries are ignored.
pub fn parse_chains(chains: &str) -> Vec<String> {
    chains
        .split(',')
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}

/// Run `f` inside a rayon pool with `num_threads` threads (0 for all cores).
pub fn run_with_threads<T, F>(num_threads: usize, f: F) -> Result<T, SasaError>
where
    T: Send,
    F: FnOnce() -> T + Send,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .map_err(|e| SasaError::InvalidParameter(format!("failed to build thread pool: {e}")))?;
    debug!("Using {} thread(s)", pool.current_num_threads());
    Ok(pool.install(f))
}

/// Write a DataFrame to a file, replacing its extension to match `file_type`.
pub fn write_df_to_file(
    df: &mut DataFrame,
    file_path: &Path,
    file_type: DataFrameFileType,
) -> Result<(), SasaError> {
    let file_suffix = file_type.to_string();
    let mut file = std::fs::File::create(file_path.with_extension(file_suffix))?;
    match file_type {
        DataFrameFileType::Csv => {
            CsvWriter::new(&mut file).finish(df)?;
        }
        DataFrameFileType::Parquet => {
            ParquetWriter::new(&mut file).finish(df)?;
        }
        DataFrameFileType::Json => {
            JsonWriter::new(&mut file)
                .with_json_format(JsonFormat::Json)
                .finish(df)?;
        }
        DataFrameFileType::NDJson => {
            JsonWriter::new(&mut file)
                .with_json_format(JsonFormat::JsonLines)
                .finish(df)?;
        }
    }
    Ok(())
}

/// File format for writing DataFrames.
#[derive(clap::ValueEnum, Clone, Debug, Copy)]
pub enum DataFrameFileType {
    /// Comma-separated values
    Csv,
    /// Parquet columnar storage
    Parquet,
    /// Standard JSON
    Json,
    /// Newline-delimited JSON
    NDJson,
}

impl std::fmt::Display for DataFrameFileType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DataFrameFileType::Csv => write!(f, "csv"),
            DataFrameFileType::Parquet => write!(f, "parquet"),
            DataFrameFileType::Json => write!(f, "json"),
            DataFrameFileType::NDJson => write!(f, "ndjson"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_dimer() -> PDB {
        let root = env!("CARGO_MANIFEST_DIR");
        let path = format!("{}/{}", root, "test-data/dimer.pdb");
        let (pdb, _) = load_model(&path).unwrap();
        pdb
    }

    #[test]
    fn test_atoms_are_filtered() {
        let atoms = atoms_from_pdb(&load_dimer(), 0);

        // No hydrogens, waters or non-standard residues
        assert!(atoms.iter().all(|a| a.chain != "W"));
        assert!(atoms
            .iter()
            .all(|a| HEAVY_ELEMENTS.contains(&a.element.as_str())));
        assert!(atoms
            .iter()
            .all(|a| NATURAL_AMINO_ACIDS.contains(&a.resn.as_str())));
        assert_eq!(atoms.len(), 17);
    }

    #[test]
    fn test_hetero_amino_acids_are_dropped() {
        // Chain L holds a free glycine flagged as HETATM
        let atoms = atoms_from_pdb(&load_dimer(), 0);
        assert!(
            atoms.iter().all(|a| a.chain != "L"),
            "HETATM glycine was read as protein"
        );
        assert_eq!(atoms.iter().filter(|a| a.resn == "GLY").count(), 4);
    }

    #[test]
    fn test_first_altloc_is_kept() {
        let atoms = atoms_from_pdb(&load_dimer(), 0);
        let og: Vec<&AtomRecord> = atoms
            .iter()
            .filter(|a| a.chain == "B" && a.atomn == "OG")
            .collect();
        assert_eq!(og.len(), 1);
        assert!((og[0].pos.x - 2.9).abs() < 1e-6, "Kept the wrong altloc");
    }

    #[test]
    fn test_residue_ids_and_names() {
        let atoms = atoms_from_pdb(&load_dimer(), 0);
        assert!(atoms.iter().any(|a| a.chain == "A" && a.resi == "2A"));
        // HSE is read as histidine
        assert!(atoms.iter().any(|a| a.resn == "HIS" && a.atomn == "CE1"));
        assert!(atoms.iter().all(|a| a.resn != "HSE"));
        assert_eq!(atoms[0].atomi, 1);
        assert_eq!(atoms[0].chain, "A");
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_model("no/such/structure.pdb"),
            Err(SasaError::Structure(_))
        ));
    }

    #[test]
    fn test_parse_chains() {
        assert_eq!(parse_chains("A,B"), vec!["A", "B"]);
        assert_eq!(parse_chains(" H, L ,"), vec!["H", "L"]);
        assert!(parse_chains("").is_empty());
    }

    #[test]
    fn test_run_with_threads() {
        let n = run_with_threads(2, rayon::current_num_threads).unwrap();
        assert_eq!(n, 2);
    }
}
