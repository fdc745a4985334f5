#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

//! # Solvent Occlusion Library
//!
//! This library computes solvent accessible surface areas (SASA) of protein
//! atoms and residues with the Shrake-Rupley algorithm, and derives how much
//! of each residue's surface is occluded when its chain is part of a
//! multi-chain complex.
//!
//! Results are plain Rust records that can be converted to Polars DataFrames
//! for writing to CSV, Parquet or JSON.

mod atoms;
mod error;
mod occlusion;
mod radii;
mod residues;
mod sasa;
mod sphere;
mod utils;

// Re-export key public types
pub use atoms::{AtomRecord, AtomSasa, ResidueOcclusion, ResidueSasa};
pub use error::SasaError;
pub use occlusion::{align_to_assembly, compute_occlusion, compute_occlusion_with, AreaSource};
pub use radii::{AminoAcid, AtomClass, RadiusLookup, ShrakeRupleyRadii};
pub use residues::{aggregate_by_residue, ResidueId};
pub use sasa::{
    compute_atom_areas, compute_atom_areas_with, SasaSettings, BURIAL_TOLERANCE, N_SAMPLES,
    PROBE_RADIUS,
};
pub use sphere::{sphere_points, SphereSampler};
pub use utils::{
    atoms_from_pdb, load_model, log_pdb_warnings, parse_chains, run_with_threads,
    write_df_to_file, DataFrameFileType,
};

use polars::prelude::*;

/// Convert per-atom areas to a DataFrame.
///
/// # Returns
///
/// A Polars DataFrame with columns:
/// - chain, resi, resn, atomn, atomi, sasa
///
/// # Example
///
/// ```no_run
/// use solvent_occlusion::{atom_sasa_to_df, atoms_from_pdb, compute_atom_areas, load_model, SasaSettings};
///
/// let (pdb, _warnings) = load_model("path/to/structure.pdb").unwrap();
/// let atoms = atoms_from_pdb(&pdb, 0);
/// let areas = compute_atom_areas(&atoms, &SasaSettings::default()).unwrap();
/// let df = atom_sasa_to_df(&areas).unwrap();
/// println!("Calculated SASA for {} atoms", df.height());
/// ```
pub fn atom_sasa_to_df(res: &[AtomSasa]) -> PolarsResult<DataFrame> {
    df!(
        "chain" => res.iter().map(|x| x.chain.to_owned()).collect::<Vec<String>>(),
        "resi" => res.iter().map(|x| x.resi.to_owned()).collect::<Vec<String>>(),
        "resn" => res.iter().map(|x| x.resn.to_owned()).collect::<Vec<String>>(),
        "atomn" => res.iter().map(|x| x.atomn.to_owned()).collect::<Vec<String>>(),
        "atomi" => res.iter().map(|x| x.atomi as i32).collect::<Vec<i32>>(),
        "sasa" => res.iter().map(|x| x.area).collect::<Vec<f64>>(),
    )
}

/// Convert per-residue areas to a DataFrame with columns chain, resi, resn, sasa.
pub fn residue_sasa_to_df(res: &[ResidueSasa]) -> PolarsResult<DataFrame> {
    df!(
        "chain" => res.iter().map(|x| x.chain.to_owned()).collect::<Vec<String>>(),
        "resi" => res.iter().map(|x| x.resi.to_owned()).collect::<Vec<String>>(),
        "resn" => res.iter().map(|x| x.resn.to_owned()).collect::<Vec<String>>(),
        "sasa" => res.iter().map(|x| x.area).collect::<Vec<f64>>(),
    )
}

/// Convert per-residue occlusions to a DataFrame.
///
/// # Returns
///
/// A Polars DataFrame with columns:
/// - chain, resi, resn, area_sgl, area_all, occlusion
pub fn occlusion_to_df(res: &[ResidueOcclusion]) -> PolarsResult<DataFrame> {
    df!(
        "chain" => res.iter().map(|x| x.chain.to_owned()).collect::<Vec<String>>(),
        "resi" => res.iter().map(|x| x.resi.to_owned()).collect::<Vec<String>>(),
        "resn" => res.iter().map(|x| x.resn.to_owned()).collect::<Vec<String>>(),
        "area_sgl" => res.iter().map(|x| x.area_sgl).collect::<Vec<f64>>(),
        "area_all" => res.iter().map(|x| x.area_all).collect::<Vec<f64>>(),
        "occlusion" => res.iter().map(|x| x.occlusion).collect::<Vec<f64>>(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_dimer_atoms() -> Vec<AtomRecord> {
        let root = env!("CARGO_MANIFEST_DIR");
        let path = format!("{}/{}", root, "test-data/dimer.pdb");
        let (pdb, _) = load_model(&path).unwrap();
        atoms_from_pdb(&pdb, 0)
    }

    #[test]
    fn test_structure_to_occlusion() {
        let atoms = load_dimer_atoms();
        let occlusion = compute_occlusion(&atoms, None, &SasaSettings::default()).unwrap();

        // A:1, A:2A, B:1, B:2
        assert_eq!(occlusion.len(), 4);
        assert!(occlusion.iter().all(|r| (0.0..=1.0).contains(&r.occlusion)));
        assert!(
            occlusion.iter().any(|r| r.occlusion > 0.0),
            "Chains A and B should occlude each other"
        );

        let df = occlusion_to_df(&occlusion).unwrap();
        assert_eq!(df.height(), 4);
        assert_eq!(
            df.get_column_names()
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<String>>(),
            vec!["chain", "resi", "resn", "area_sgl", "area_all", "occlusion"]
        );
    }

    #[test]
    fn test_atom_and_residue_tables() {
        let atoms = load_dimer_atoms();
        let atom_areas = compute_atom_areas(&atoms, &SasaSettings::default()).unwrap();
        let df_atoms = atom_sasa_to_df(&atom_areas).unwrap();
        assert_eq!(df_atoms.height(), atoms.len());

        let residues = aggregate_by_residue(&atom_areas, None);
        let df_residues = residue_sasa_to_df(&residues).unwrap();
        assert_eq!(df_residues.height(), 4);

        // Residue totals add up to the atom total
        let atom_total: f64 = atom_areas.iter().map(|a| a.area).sum();
        let residue_total: f64 = residues.iter().map(|r| r.area).sum();
        assert!((atom_total - residue_total).abs() < 1e-6);
    }

    #[test]
    fn test_write_tables() {
        let atoms = load_dimer_atoms();
        let occlusion = compute_occlusion(&atoms, None, &SasaSettings::default()).unwrap();
        let mut df = occlusion_to_df(&occlusion).unwrap();

        let dir = std::env::temp_dir().join(format!(
            "solvent-occlusion-test-write-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let base = dir.join("occlusion");
        for file_type in [
            DataFrameFileType::Csv,
            DataFrameFileType::Parquet,
            DataFrameFileType::Json,
            DataFrameFileType::NDJson,
        ] {
            write_df_to_file(&mut df, &base, file_type).unwrap();
            let written = base.with_extension(file_type.to_string());
            assert!(written.exists(), "Missing {}", written.display());
        }

        let csv = std::fs::read_to_string(base.with_extension("csv")).unwrap();
        assert!(csv.starts_with("chain,resi,resn,area_sgl,area_all,occlusion"));
        assert_eq!(csv.lines().count(), 5);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
