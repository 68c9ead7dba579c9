//! Error taxonomy of the generator
//!
//! Configuration errors are fatal and surfaced before any sampling starts.
//! Numeric domain gaps are handled locally (sentinel substitution or clamped
//! radicands) and never show up here. Tree shape violations at event
//! boundaries are programming errors and panic instead of returning.

use thiserror::Error;

/// Generator result type
pub type Result<T> = std::result::Result<T, Error>;

/// Generator errors
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error("decay '{0}' is not in the decay catalog")]
    UnknownDecay(String),

    #[error("particle '{0}' is not in the particle catalog")]
    UnknownParticle(String),

    #[error("no decay descriptor files found under {0}")]
    EmptyDecayCatalog(String),

    #[error("failed to read decay file {path}")]
    DecayFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("decay file {path} has an unparseable '{field}' field: {value}")]
    UnparseableDescriptorField {
        path: String,
        field: &'static str,
        value: String,
    },

    #[error("decay file {path} is missing the '{field}' field")]
    MissingDescriptorField { path: String, field: &'static str },

    #[error("malformed decay descriptor '{descriptor}': {reason}")]
    MalformedDescriptor { descriptor: String, reason: String },

    #[error("decay '{id}' has {count} daughter(s), need at least 2")]
    TooFewDaughters { id: String, count: usize },

    #[error("branch '{0}' already exists in the tree")]
    DuplicateBranch(String),

    #[error("cannot add branch '{0}' to a tree that has been filled")]
    BranchAfterFill(String),

    #[error("branch '{0}' is not in the tree")]
    UnknownBranch(String),

    #[error("entry {index} is out of range, tree holds {entries} entries")]
    EntryOutOfRange { index: usize, entries: usize },
}
