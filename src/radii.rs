//! Atomic radii for the Shrake-Rupley calculation.
//!
//! Radii follow Shrake & Rupley (1973): carbons are split into aliphatic,
//! aromatic and carbonyl classes depending on the residue and atom name,
//! while nitrogen, oxygen and sulfur each have a single radius.

use crate::error::SasaError;
use std::str::FromStr;

/// The 20 natural amino acids.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AminoAcid {
    /// Alanine
    Ala,
    /// Arginine
    Arg,
    /// Asparagine
    Asn,
    /// Aspartate
    Asp,
    /// Cysteine
    Cys,
    /// Glutamine
    Gln,
    /// Glutamate
    Glu,
    /// Glycine
    Gly,
    /// Histidine
    His,
    /// Isoleucine
    Ile,
    /// Leucine
    Leu,
    /// Lysine
    Lys,
    /// Methionine
    Met,
    /// Phenylalanine
    Phe,
    /// Proline
    Pro,
    /// Serine
    Ser,
    /// Threonine
    Thr,
    /// Tryptophan
    Trp,
    /// Tyrosine
    Tyr,
    /// Valine
    Val,
}

impl FromStr for AminoAcid {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALA" => Ok(Self::Ala),
            "ARG" => Ok(Self::Arg),
            "ASN" => Ok(Self::Asn),
            "ASP" => Ok(Self::Asp),
            "CYS" => Ok(Self::Cys),
            "GLN" => Ok(Self::Gln),
            "GLU" => Ok(Self::Glu),
            "GLY" => Ok(Self::Gly),
            "HIS" => Ok(Self::His),
            "ILE" => Ok(Self::Ile),
            "LEU" => Ok(Self::Leu),
            "LYS" => Ok(Self::Lys),
            "MET" => Ok(Self::Met),
            "PHE" => Ok(Self::Phe),
            "PRO" => Ok(Self::Pro),
            "SER" => Ok(Self::Ser),
            "THR" => Ok(Self::Thr),
            "TRP" => Ok(Self::Trp),
            "TYR" => Ok(Self::Tyr),
            "VAL" => Ok(Self::Val),
            _ => Err(()),
        }
    }
}

/// Radius class of a heavy atom.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AtomClass {
    /// Aliphatic carbons; also CA and CB of every residue
    AliphaticCarbon,
    /// Ring carbons of HIS, PHE, TYR and TRP
    AromaticCarbon,
    /// Carbons in carbonyl or carboxyl groups
    CarbonylCarbon,
    /// Any nitrogen
    Nitrogen,
    /// Any oxygen
    Oxygen,
    /// Any sulfur
    Sulfur,
}

impl AtomClass {
    /// Van der Waals radius in Ångströms.
    pub const fn radius(self) -> f64 {
        match self {
            AtomClass::AliphaticCarbon => 2.0,
            AtomClass::AromaticCarbon => 1.85,
            AtomClass::CarbonylCarbon => 1.5,
            AtomClass::Nitrogen => 1.5,
            AtomClass::Oxygen => 1.4,
            AtomClass::Sulfur => 1.85,
        }
    }

    /// Classify an atom by its residue, atom name and element.
    ///
    /// Returns `None` when the combination is not part of the table.
    pub fn classify(resn: &str, atomn: &str, element: &str) -> Option<Self> {
        match element {
            "C" => match atomn {
                "CA" | "CB" => Some(AtomClass::AliphaticCarbon),
                "C" => Some(AtomClass::CarbonylCarbon),
                _ => sidechain_carbon(AminoAcid::from_str(resn).ok()?, atomn),
            },
            "N" => Some(AtomClass::Nitrogen),
            "O" => Some(AtomClass::Oxygen),
            "S" => Some(AtomClass::Sulfur),
            _ => None,
        }
    }
}

/// Side-chain carbons beyond CB.
fn sidechain_carbon(residue: AminoAcid, atomn: &str) -> Option<AtomClass> {
    use AminoAcid::*;
    use AtomClass::*;

    let class = match (residue, atomn) {
        (Arg, "CG" | "CD") => AliphaticCarbon,
        (Arg, "CZ") => CarbonylCarbon,
        (Asn | Asp, "CG") => CarbonylCarbon,
        (Gln | Glu, "CG") => AliphaticCarbon,
        (Gln | Glu, "CD") => CarbonylCarbon,
        (His, "CG" | "CD2" | "CE1" | "AD2" | "AE1") => AromaticCarbon,
        (Ile, "CG1" | "CG2" | "CD1") => AliphaticCarbon,
        (Leu, "CG" | "CD1" | "CD2") => AliphaticCarbon,
        (Lys, "CG" | "CD" | "CE") => AliphaticCarbon,
        (Met, "CG" | "CE") => AliphaticCarbon,
        (Phe | Tyr, "CG" | "CD1" | "CD2" | "CE1" | "CE2" | "CZ") => AromaticCarbon,
        (Pro, "CG" | "CD") => AliphaticCarbon,
        (Thr, "CG2") => AliphaticCarbon,
        (Trp, "CG" | "CD1" | "CD2" | "CE2" | "CE3" | "CZ2" | "CZ3" | "CH2") => AromaticCarbon,
        (Val, "CG1" | "CG2") => AliphaticCarbon,
        _ => return None,
    };
    Some(class)
}

/// Source of van der Waals radii for the SASA engine.
///
/// Implementations must return the same radius for the same key within a run.
pub trait RadiusLookup: Sync {
    /// Radius in Ångströms, or a lookup error when the atom is not covered.
    fn radius(&self, resn: &str, atomn: &str, element: &str) -> Result<f64, SasaError>;
}

/// The fixed Shrake & Rupley radius table.
#[derive(Copy, Clone, Debug, Default)]
pub struct ShrakeRupleyRadii;

impl RadiusLookup for ShrakeRupleyRadii {
    fn radius(&self, resn: &str, atomn: &str, element: &str) -> Result<f64, SasaError> {
        AtomClass::classify(resn, atomn, element)
            .map(AtomClass::radius)
            .ok_or_else(|| SasaError::Lookup {
                resn: resn.to_string(),
                atomn: atomn.to_string(),
                element: element.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backbone_radii() {
        let radii = ShrakeRupleyRadii;
        assert_eq!(radii.radius("GLY", "N", "N").unwrap(), 1.5);
        assert_eq!(radii.radius("GLY", "CA", "C").unwrap(), 2.0);
        assert_eq!(radii.radius("GLY", "C", "C").unwrap(), 1.5);
        assert_eq!(radii.radius("GLY", "O", "O").unwrap(), 1.4);
        assert_eq!(radii.radius("CYS", "SG", "S").unwrap(), 1.85);
    }

    #[test]
    fn test_sidechain_carbon_classes() {
        assert_eq!(
            AtomClass::classify("PHE", "CZ", "C"),
            Some(AtomClass::AromaticCarbon)
        );
        // Tyrosine shares the phenylalanine ring table
        assert_eq!(
            AtomClass::classify("TYR", "CE2", "C"),
            Some(AtomClass::AromaticCarbon)
        );
        assert_eq!(
            AtomClass::classify("ARG", "CZ", "C"),
            Some(AtomClass::CarbonylCarbon)
        );
        assert_eq!(
            AtomClass::classify("GLU", "CD", "C"),
            Some(AtomClass::CarbonylCarbon)
        );
        assert_eq!(
            AtomClass::classify("THR", "CB", "C"),
            Some(AtomClass::AliphaticCarbon)
        );
        assert_eq!(
            AtomClass::classify("HIS", "AE1", "C"),
            Some(AtomClass::AromaticCarbon)
        );
    }

    #[test]
    fn test_ca_cb_ignore_residue_name() {
        // CA/CB resolve before the residue is consulted
        let radii = ShrakeRupleyRadii;
        assert_eq!(radii.radius("XYZ", "CA", "C").unwrap(), 2.0);
        assert_eq!(radii.radius("XYZ", "CB", "C").unwrap(), 2.0);
    }

    #[test]
    fn test_undefined_radius_is_lookup_error() {
        let radii = ShrakeRupleyRadii;

        // Alanine has no carbon beyond CB
        match radii.radius("ALA", "CG", "C") {
            Err(SasaError::Lookup { resn, atomn, .. }) => {
                assert_eq!(resn, "ALA");
                assert_eq!(atomn, "CG");
            }
            other => panic!("Expected lookup error, got {other:?}"),
        }
        assert!(matches!(
            radii.radius("ALA", "FE", "FE"),
            Err(SasaError::Lookup { .. })
        ));
        assert!(matches!(
            radii.radius("ALA", "H", "H"),
            Err(SasaError::Lookup { .. })
        ));
        assert!(matches!(
            radii.radius("MSE", "CG", "C"),
            Err(SasaError::Lookup { .. })
        ));
    }
}
