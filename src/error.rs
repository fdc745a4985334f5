//! Error type shared by every stage of the SASA and occlusion pipeline.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while computing surface areas or occlusions.
///
/// None of these are transient: every input is in memory, so a failure
/// means the parameters or the atom records are wrong.
#[derive(Debug, Error)]
pub enum SasaError {
    /// A numeric parameter or chain selection is out of range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// No van der Waals radius is defined for this atom
    #[error("No radius defined for atom {atomn} (element {element}) in residue {resn}")]
    Lookup {
        /// Residue name
        resn: String,
        /// Atom name
        atomn: String,
        /// Element symbol
        element: String,
    },

    /// Per-chain and assembly residue tables could not be matched
    #[error("Failed to align residue {chain}:{resi}: {reason}")]
    Alignment {
        /// Chain identifier
        chain: String,
        /// Residue id including insertion code
        resi: String,
        /// What went wrong
        reason: String,
    },

    /// The structure file could not be read
    #[error("Failed to read structure: {0}")]
    Structure(String),

    /// Writing results failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Building or serializing a DataFrame failed
    #[error(transparent)]
    Polars(#[from] PolarsError),
}
