use crate::atoms::{AtomSasa, ResidueSasa};
use std::collections::{HashMap, HashSet};

/// Identity of a residue within a structure.
///
/// Chains may reuse residue numbering, so the chain is always part of the key.
#[derive(Debug, Hash, PartialEq, Eq, Clone)]
pub struct ResidueId<'a> {
    /// Chain identifier
    pub chain: &'a str,
    /// Residue index with insertion code
    pub resi: &'a str,
    /// Residue name
    pub resn: &'a str,
}

impl<'a> ResidueId<'a> {
    /// Build a key from borrowed identifiers.
    pub fn new(chain: &'a str, resi: &'a str, resn: &'a str) -> Self {
        Self { chain, resi, resn }
    }

    /// Key of the residue an atom area belongs to.
    pub fn from_atom(atom: &'a AtomSasa) -> Self {
        Self::new(&atom.chain, &atom.resi, &atom.resn)
    }
}

/// Sum per-atom areas into per-residue areas.
///
/// Residues are returned in the order they first appear in `atom_areas`.
/// When `chain_filter` is given, atoms from other chains are dropped first.
///
/// # Example
///
/// ```
/// use solvent_occlusion::{aggregate_by_residue, AtomSasa};
///
/// let atom = |atomi: usize, area: f64| AtomSasa {
///     chain: "A".to_string(),
///     resi: "45".to_string(),
///     resn: "ALA".to_string(),
///     atomn: "CA".to_string(),
///     atomi,
///     area,
/// };
/// let residues = aggregate_by_residue(&[atom(1, 1.0), atom(2, 2.5)], None);
/// assert_eq!(residues.len(), 1);
/// assert_eq!(residues[0].area, 3.5);
/// ```
pub fn aggregate_by_residue(
    atom_areas: &[AtomSasa],
    chain_filter: Option<&HashSet<String>>,
) -> Vec<ResidueSasa> {
    let mut index: HashMap<ResidueId, usize> = HashMap::new();
    let mut residues: Vec<ResidueSasa> = Vec::new();

    for atom in atom_areas
        .iter()
        .filter(|a| chain_filter.map_or(true, |chains| chains.contains(&a.chain)))
    {
        let i = *index.entry(ResidueId::from_atom(atom)).or_insert_with(|| {
            residues.push(ResidueSasa {
                chain: atom.chain.clone(),
                resi: atom.resi.clone(),
                resn: atom.resn.clone(),
                area: 0.0,
            });
            residues.len() - 1
        });
        residues[i].area += atom.area;
    }

    residues
}
