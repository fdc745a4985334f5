//! Per-atom solvent accessible surface area by the Shrake-Rupley algorithm.

use crate::atoms::{AtomRecord, AtomSasa};
use crate::error::SasaError;
use crate::radii::{RadiusLookup, ShrakeRupleyRadii};
use crate::sphere::SphereSampler;
use rayon::prelude::*;
use rstar::primitives::GeomWithData;
use rstar::RTree;
use std::f64::consts::PI;
use tracing::debug;

/// Water probe radius in Ångströms
pub const PROBE_RADIUS: f64 = 1.4;
/// Sample points per atom sphere
pub const N_SAMPLES: usize = 150;
/// A sample point is buried only if its squared distance to another atom
/// is below this fraction of that atom's squared extended radius.
/// Points lying on their own atom's sphere therefore stay exposed.
pub const BURIAL_TOLERANCE: f64 = 0.99;

/// Parameters shared by the SASA and occlusion calculations.
#[derive(Clone, Debug)]
pub struct SasaSettings {
    /// Probe radius added to every van der Waals radius
    pub probe_radius: f64,
    /// Number of sample points on each atom sphere
    pub n_samples: usize,
    /// Evaluate atoms and chains on the rayon thread pool
    pub parallel: bool,
}

impl Default for SasaSettings {
    fn default() -> Self {
        Self {
            probe_radius: PROBE_RADIUS,
            n_samples: N_SAMPLES,
            parallel: false,
        }
    }
}

impl SasaSettings {
    /// Reject a zero sample count and negative or non-finite probe radii.
    pub fn validate(&self) -> Result<(), SasaError> {
        if self.n_samples == 0 {
            return Err(SasaError::InvalidParameter(
                "n_samples must be positive".to_string(),
            ));
        }
        if !self.probe_radius.is_finite() || self.probe_radius < 0.0 {
            return Err(SasaError::InvalidParameter(format!(
                "probe_radius must be a non-negative number, got {}",
                self.probe_radius
            )));
        }
        Ok(())
    }
}

type IndexedPoint = GeomWithData<[f64; 3], usize>;

/// Calculate the exposed area of every atom using the Shrake & Rupley radius table.
///
/// # Arguments
///
/// * `atoms` - Heavy atoms of the structure, in any order
/// * `settings` - Probe radius, sample count and threading
///
/// # Returns
///
/// One [`AtomSasa`] per input atom, in input order.
///
/// # Example
///
/// ```
/// use solvent_occlusion::{compute_atom_areas, AtomRecord, SasaSettings};
///
/// let atoms = vec![AtomRecord::new("A", "1", "GLY", 1, "CA", [0.0, 0.0, 0.0], "C")];
/// let areas = compute_atom_areas(&atoms, &SasaSettings::default()).unwrap();
/// assert!((areas[0].area - 4.0 * std::f64::consts::PI * 3.4 * 3.4).abs() < 1e-9);
/// ```
pub fn compute_atom_areas(
    atoms: &[AtomRecord],
    settings: &SasaSettings,
) -> Result<Vec<AtomSasa>, SasaError> {
    compute_atom_areas_with(atoms, settings, &ShrakeRupleyRadii)
}

/// Same as [`compute_atom_areas`] but with a caller-supplied radius table.
pub fn compute_atom_areas_with<R: RadiusLookup + ?Sized>(
    atoms: &[AtomRecord],
    settings: &SasaSettings,
    radii: &R,
) -> Result<Vec<AtomSasa>, SasaError> {
    settings.validate()?;
    let sampler = SphereSampler::new(settings.n_samples)?;

    // Extended radii; any atom without a radius aborts the run
    let ext_radii = atoms
        .iter()
        .map(|a| {
            radii
                .radius(&a.resn, &a.atomn, &a.element)
                .map(|r| r + settings.probe_radius)
        })
        .collect::<Result<Vec<f64>, SasaError>>()?;

    debug!(
        "Computing SASA for {} atoms with {} points per sphere (probe radius {:.2} Å)",
        atoms.len(),
        settings.n_samples,
        settings.probe_radius
    );

    let areas = exposed_areas(atoms, &ext_radii, &sampler, settings.parallel);

    Ok(atoms
        .iter()
        .zip(areas)
        .map(|(a, area)| AtomSasa {
            chain: a.chain.clone(),
            resi: a.resi.clone(),
            resn: a.resn.clone(),
            atomn: a.atomn.clone(),
            atomi: a.atomi,
            area,
        })
        .collect())
}

/// Exposed area per atom, indexed like `atoms`.
fn exposed_areas(
    atoms: &[AtomRecord],
    ext_radii: &[f64],
    sampler: &SphereSampler,
    parallel: bool,
) -> Vec<f64> {
    let max_radius = ext_radii.iter().cloned().fold(0.0, f64::max);
    let tree: RTree<IndexedPoint> = RTree::bulk_load(
        atoms
            .iter()
            .enumerate()
            .map(|(i, a)| IndexedPoint::new([a.pos.x, a.pos.y, a.pos.z], i))
            .collect(),
    );
    let n_samples = sampler.len() as f64;

    let atom_area = |i: usize| -> f64 {
        let center = &atoms[i].pos;
        let radius = ext_radii[i];

        // Atoms further than radius + max_radius cannot reach this sphere.
        // The atom itself stays in the list.
        let cutoff = radius + max_radius;
        let mut neighbors: Vec<usize> = tree
            .locate_within_distance([center.x, center.y, center.z], cutoff * cutoff)
            .map(|n| n.data)
            .collect();
        neighbors.sort_unstable();

        let n_exposed = sampler
            .sample(center, radius)
            .filter(|p| {
                !neighbors.iter().any(|&j| {
                    let r = ext_radii[j];
                    (p - atoms[j].pos).norm_squared() < r * r * BURIAL_TOLERANCE
                })
            })
            .count();

        4.0 * PI * radius * radius * n_exposed as f64 / n_samples
    };

    if parallel {
        (0..atoms.len()).into_par_iter().map(atom_area).collect()
    } else {
        (0..atoms.len()).map(atom_area).collect()
    }
}
