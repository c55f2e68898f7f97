use std::path::PathBuf;
use thiserror::Error;

/// Declaration-level failures. Each aborts only the synthesis call that hit it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthError {
    #[error("no declaration named `{name}`")]
    DeclarationNotFound { name: String },
    #[error("`{name}` is a {kind}, not a struct")]
    NotAStructuredType { name: String, kind: &'static str },
    #[error("`{name}` has no fields that map to a schema type")]
    EmptySchema { name: String },
}

/// Failures while loading module manifests.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("invalid manifest {}: {message}", path.display())]
    Json { path: PathBuf, message: String },
    #[error("declaration `{name}` is defined more than once")]
    DuplicateDeclaration { name: String },
}
