//! Error types for the `farmnav-livestock` crate.

use farmnav_types::Species;

/// Errors that can occur during livestock operations.
#[derive(Debug, thiserror::Error)]
pub enum LivestockError {
    /// The reference tables have no profile for this species.
    #[error("no livestock profile for species {0}")]
    UnknownSpecies(Species),
}
