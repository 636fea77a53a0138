use thiserror::Error; // Derive macro for the error enum

// Errors surfaced by the registry, the language configuration and the snapshot layer
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    // Mutation of a name the registry has never seen
    #[error("unknown OpenCL extension: {0}")]
    UnknownExtension(String),

    // C-mode language configuration naming a version outside 100/110/120/200/300
    #[error("unsupported OpenCL C version: {0}")]
    UnknownVersion(u32),

    // A `-cl-ext` item without a `+`/`-` sign, or with an empty name
    #[error("invalid feature item: {0:?}")]
    InvalidFeature(String),

    // Language configuration JSON that fails to parse or validate
    #[error("invalid language configuration: {0}")]
    Config(String),

    // Snapshot JSON that fails to parse or serialize
    #[error("snapshot error: {0}")]
    Snapshot(String),

    // Reading a configuration file failed
    #[error("io error: {0}")]
    Io(String),
}

// Result alias used across the crate
pub type Result<T> = std::result::Result<T, OptionsError>;
