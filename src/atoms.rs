use core::fmt;
use nalgebra::Point3;

/// One heavy atom of a protein structure, as handed over by the structure provider.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// Chain identifier
    pub chain: String,
    /// Residue sequence number followed by the insertion code, e.g. `52A`
    pub resi: String,
    /// Three-letter residue name
    pub resn: String,
    /// Atom serial number
    pub atomi: usize,
    /// Atom name
    pub atomn: String,
    /// Cartesian coordinates in Ångströms
    pub pos: Point3<f64>,
    /// Element symbol
    pub element: String,
}

impl AtomRecord {
    /// Create a record from borrowed identifiers and raw coordinates.
    pub fn new(
        chain: &str,
        resi: &str,
        resn: &str,
        atomi: usize,
        atomn: &str,
        pos: [f64; 3],
        element: &str,
    ) -> Self {
        Self {
            chain: chain.to_string(),
            resi: resi.to_string(),
            resn: resn.to_string(),
            atomi,
            atomn: atomn.to_string(),
            pos: Point3::new(pos[0], pos[1], pos[2]),
            element: element.to_string(),
        }
    }
}

impl fmt::Display for AtomRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chain {chain}, Residue {resn} {resi}, Atom {atom_name} {atom_idx}",
            chain = self.chain,
            resn = self.resn,
            resi = self.resi,
            atom_name = self.atomn,
            atom_idx = self.atomi
        )
    }
}

/// Solvent accessible surface area of a single atom.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomSasa {
    /// Chain identifier
    pub chain: String,
    /// Residue id including insertion code
    pub resi: String,
    /// Three-letter residue name
    pub resn: String,
    /// Atom name
    pub atomn: String,
    /// Atom serial number
    pub atomi: usize,
    /// Exposed area in Å²
    pub area: f64,
}

/// Solvent accessible surface area summed over the atoms of one residue.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidueSasa {
    /// Chain identifier
    pub chain: String,
    /// Residue id including insertion code
    pub resi: String,
    /// Three-letter residue name
    pub resn: String,
    /// Exposed area in Å²
    pub area: f64,
}

/// Surface area a residue loses when its chain is embedded in the complex.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidueOcclusion {
    /// Chain identifier
    pub chain: String,
    /// Residue id including insertion code
    pub resi: String,
    /// Three-letter residue name
    pub resn: String,
    /// Area with only the residue's own chain present
    pub area_sgl: f64,
    /// Area within the full multi-chain assembly
    pub area_all: f64,
    /// `(area_sgl - area_all) / area_sgl`, or 0 when `area_sgl` is 0
    pub occlusion: f64,
}

impl fmt::Display for ResidueOcclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chain {chain}, Residue {resn} {resi}: {sgl:.2} -> {all:.2} Å² ({occ:.3})",
            chain = self.chain,
            resn = self.resn,
            resi = self.resi,
            sgl = self.area_sgl,
            all = self.area_all,
            occ = self.occlusion
        )
    }
}
