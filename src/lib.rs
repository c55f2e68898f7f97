//! Synthesize JSON Schema (draft-04) documents from resolved struct declarations.
//!
//! Pipeline: `SourceModel` → `synthesize` (walker ⇄ classifier) → `Schema`
//! → `render` → ordered `serde_json::Value`.
pub mod classify;
pub mod diagnostics;
pub mod doc;
pub mod error;
pub mod node;
pub mod options;
pub mod render;
pub mod source;
pub mod synth;
pub mod walker;

pub use diagnostics::Diagnostic;
pub use error::{ManifestError, SynthError};
pub use node::{Format, Node, ObjectNode};
pub use options::{Options, RequiredPolicy};
pub use render::{render, DIALECT};
pub use source::{DeclKind, Declaration, FieldDecl, Module, SourceModel, TypeRef};
pub use synth::{synthesize, synthesize_all, synthesize_every_struct, Schema, Synthesis};
