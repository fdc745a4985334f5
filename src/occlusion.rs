//! Per-residue solvent occlusion of multi-chain complexes.
//!
//! The occlusion of a residue is the fraction of its isolated-chain surface
//! area that disappears when the other chains of the complex are present:
//!
//! occlusion = (area_sgl - area_all) / area_sgl
//!
//! where `area_sgl` is computed with only the residue's own chain and
//! `area_all` with every selected chain. Residues without any isolated-chain
//! surface get an occlusion of 0.

use crate::atoms::{AtomRecord, ResidueOcclusion, ResidueSasa};
use crate::error::SasaError;
use crate::radii::{RadiusLookup, ShrakeRupleyRadii};
use crate::residues::aggregate_by_residue;
use crate::sasa::{compute_atom_areas_with, SasaSettings};
use core::fmt;
use rayon::prelude::*;
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, trace, warn};

/// Which atom subset a residue area table was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AreaSource {
    /// All selected chains together
    Assembly,
    /// A single chain in isolation
    Chain(String),
}

impl fmt::Display for AreaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AreaSource::Assembly => write!(f, "all"),
            AreaSource::Chain(id) => write!(f, "{id}"),
        }
    }
}

/// Calculate the per-residue occlusion using the Shrake & Rupley radius table.
///
/// # Arguments
///
/// * `atoms` - Heavy atoms of the complex
/// * `chains` - Chains forming the complex; all chains present in `atoms`
///   (sorted by identifier) when `None`
/// * `settings` - Probe radius, sample count and whether to dispatch the
///   assembly and per-chain calculations in parallel
///
/// # Returns
///
/// One [`ResidueOcclusion`] per residue of the selected chains, in the
/// order residues first appear in `atoms`.
///
/// # Example
///
/// ```
/// use solvent_occlusion::{compute_occlusion, AtomRecord, SasaSettings};
///
/// let atoms = vec![
///     AtomRecord::new("A", "1", "GLY", 1, "CA", [0.0, 0.0, 0.0], "C"),
///     AtomRecord::new("B", "1", "GLY", 2, "CA", [3.0, 0.0, 0.0], "C"),
/// ];
/// let occlusion = compute_occlusion(&atoms, None, &SasaSettings::default()).unwrap();
/// assert_eq!(occlusion.len(), 2);
/// assert!(occlusion.iter().all(|r| r.occlusion > 0.0 && r.occlusion < 1.0));
/// ```
pub fn compute_occlusion(
    atoms: &[AtomRecord],
    chains: Option<&[String]>,
    settings: &SasaSettings,
) -> Result<Vec<ResidueOcclusion>, SasaError> {
    compute_occlusion_with(atoms, chains, settings, &ShrakeRupleyRadii)
}

/// Same as [`compute_occlusion`] but with a caller-supplied radius table.
pub fn compute_occlusion_with<R: RadiusLookup + ?Sized>(
    atoms: &[AtomRecord],
    chains: Option<&[String]>,
    settings: &SasaSettings,
    radii: &R,
) -> Result<Vec<ResidueOcclusion>, SasaError> {
    settings.validate()?;
    let chains = resolve_chains(atoms, chains)?;

    let selected: HashSet<&str> = chains.iter().map(|c| c.as_str()).collect();
    let complex: Vec<AtomRecord> = atoms
        .iter()
        .filter(|a| selected.contains(a.chain.as_str()))
        .cloned()
        .collect();
    if complex.is_empty() {
        return Err(SasaError::InvalidParameter(format!(
            "no atoms found in chains [{}]",
            chains.join(", ")
        )));
    }
    debug!(
        "Computing occlusion for {} atoms in chains [{}]",
        complex.len(),
        chains.join(", ")
    );

    // One task for the assembly and one per isolated chain
    let mut tasks: Vec<(AreaSource, Vec<AtomRecord>)> = Vec::with_capacity(chains.len() + 1);
    for chain in &chains {
        let chain_atoms: Vec<AtomRecord> = complex
            .iter()
            .filter(|a| &a.chain == chain)
            .cloned()
            .collect();
        if chain_atoms.is_empty() {
            warn!("No atoms found for chain {chain}");
        }
        tasks.push((AreaSource::Chain(chain.clone()), chain_atoms));
    }
    tasks.push((AreaSource::Assembly, complex));

    let mut tables = dispatch(&tasks, settings, radii)?;

    let areas_all = tables
        .remove(&AreaSource::Assembly)
        .ok_or_else(|| missing_table(&AreaSource::Assembly))?;
    let mut areas_sgl: Vec<ResidueSasa> = Vec::with_capacity(areas_all.len());
    for chain in &chains {
        let source = AreaSource::Chain(chain.clone());
        let table = tables
            .remove(&source)
            .ok_or_else(|| missing_table(&source))?;
        areas_sgl.extend(table);
    }

    let areas_sgl = align_to_assembly(&areas_all, areas_sgl)?;

    Ok(areas_sgl
        .into_iter()
        .zip(areas_all)
        .map(|(sgl, all)| {
            let occlusion = if sgl.area != 0.0 {
                (sgl.area - all.area) / sgl.area
            } else {
                0.0
            };
            ResidueOcclusion {
                chain: all.chain,
                resi: all.resi,
                resn: all.resn,
                area_sgl: sgl.area,
                area_all: all.area,
                occlusion,
            }
        })
        .collect())
}

/// Deduplicate the requested chains, or collect every chain in `atoms`.
fn resolve_chains(
    atoms: &[AtomRecord],
    chains: Option<&[String]>,
) -> Result<Vec<String>, SasaError> {
    let resolved: Vec<String> = match chains {
        Some(requested) => {
            let mut seen = HashSet::new();
            requested
                .iter()
                .filter(|c| seen.insert(c.as_str()))
                .cloned()
                .collect()
        }
        None => atoms
            .iter()
            .map(|a| a.chain.clone())
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect(),
    };

    if resolved.is_empty() {
        return Err(SasaError::InvalidParameter(
            "no chains to compute occlusion for".to_string(),
        ));
    }
    Ok(resolved)
}

/// Compute a residue area table for every task, tagged by its source.
///
/// With `settings.parallel` the tasks run concurrently on the rayon pool;
/// completion order does not matter since results are keyed by source.
/// The first failing task fails the whole dispatch.
fn dispatch<R: RadiusLookup + ?Sized>(
    tasks: &[(AreaSource, Vec<AtomRecord>)],
    settings: &SasaSettings,
    radii: &R,
) -> Result<HashMap<AreaSource, Vec<ResidueSasa>>, SasaError> {
    let run = |(source, atoms): &(AreaSource, Vec<AtomRecord>)| -> Result<_, SasaError> {
        trace!("Computing residue areas for '{source}' ({} atoms)", atoms.len());
        let atom_areas = compute_atom_areas_with(atoms, settings, radii)?;
        Ok((source.clone(), aggregate_by_residue(&atom_areas, None)))
    };

    if settings.parallel {
        tasks.par_iter().map(run).collect()
    } else {
        tasks.iter().map(run).collect()
    }
}

fn missing_table(source: &AreaSource) -> SasaError {
    SasaError::InvalidParameter(format!("no residue areas were produced for '{source}'"))
}

/// Reorder per-chain residue areas to line up row by row with the assembly table.
///
/// Rows are matched on (chain, residue id). Every assembly residue must be
/// matched by exactly one per-chain residue and vice versa.
pub fn align_to_assembly(
    areas_all: &[ResidueSasa],
    areas_sgl: Vec<ResidueSasa>,
) -> Result<Vec<ResidueSasa>, SasaError> {
    let positions: HashMap<(&str, &str), usize> = areas_all
        .iter()
        .enumerate()
        .map(|(i, r)| ((r.chain.as_str(), r.resi.as_str()), i))
        .collect();

    let mut aligned: Vec<Option<ResidueSasa>> = vec![None; areas_all.len()];
    for residue in areas_sgl {
        let slot = positions
            .get(&(residue.chain.as_str(), residue.resi.as_str()))
            .copied();
        let Some(i) = slot else {
            return Err(SasaError::Alignment {
                chain: residue.chain,
                resi: residue.resi,
                reason: "residue is missing from the assembly".to_string(),
            });
        };
        if aligned[i].is_some() {
            return Err(SasaError::Alignment {
                chain: residue.chain,
                resi: residue.resi,
                reason: "residue appears more than once in the isolated chains".to_string(),
            });
        }
        aligned[i] = Some(residue);
    }

    aligned
        .into_iter()
        .zip(areas_all)
        .map(|(residue, all)| {
            residue.ok_or_else(|| SasaError::Alignment {
                chain: all.chain.clone(),
                resi: all.resi.clone(),
                reason: "residue is missing from the isolated chains".to_string(),
            })
        })
        .collect()
}
