//! Source model: resolved declarations the engine reads from.
//!
//! Parsing and symbol resolution happen elsewhere; this module only defines the
//! boundary (`SourceModel`) and a JSON-backed snapshot of one resolved
//! compilation unit (`Module`).
use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ManifestError;

// ------------------------------- Boundary --------------------------------- //

/// Read-only view over a resolved compilation unit.
pub trait SourceModel {
    /// Package the declarations belong to; package-qualified references to
    /// any other package are never resolved against this model.
    fn package(&self) -> &str;

    fn lookup(&self, name: &str) -> Option<&Declaration>;

    /// All declarations, in source order.
    fn declarations(&self) -> Vec<&Declaration>;
}

// ------------------------------ Declarations ------------------------------ //

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    #[serde(default)]
    pub doc: String,
    #[serde(flatten)]
    pub kind: DeclKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DeclKind {
    Struct { fields: Vec<FieldDecl> },
    Alias { target: String },
    Interface,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub doc: String,
    /// Defaults to the exported-identifier rule when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeRef {
    /// A direct reference to a named leaf type (`string`, `int64`, `Address`).
    Leaf(String),
    /// Pointer to a named type, optionally package-qualified (`*time.Time`).
    Indirect {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        package: Option<String>,
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        visible: Option<bool>,
    },
}

/// Split `pkg.Name` into its package and name. Only a plain identifier
/// counts as a package prefix, so composite spellings (`[]time.Time`,
/// `map[string]time.Time`) come back whole and unqualified.
pub fn split_qualified(type_name: &str) -> (Option<&str>, &str) {
    match type_name.split_once('.') {
        Some((pkg, name))
            if !pkg.is_empty() && pkg.chars().all(|c| c.is_alphanumeric() || c == '_') =>
        {
            (Some(pkg), name)
        }
        _ => (None, type_name),
    }
}

/// Identifier visibility rule: exported iff the first character is uppercase.
pub fn is_exported_ident(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

impl Declaration {
    pub fn structure(name: impl Into<String>, doc: impl Into<String>, fields: Vec<FieldDecl>) -> Self {
        Self { name: name.into(), doc: doc.into(), kind: DeclKind::Struct { fields } }
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    /// Field list when this is a record-like declaration.
    pub fn fields(&self) -> Option<&[FieldDecl]> {
        match &self.kind {
            DeclKind::Struct { fields } => Some(fields),
            DeclKind::Alias { .. } | DeclKind::Interface => None,
        }
    }
}

impl DeclKind {
    pub fn name(&self) -> &'static str {
        match self {
            DeclKind::Struct { .. } => "struct",
            DeclKind::Alias { .. } => "alias",
            DeclKind::Interface => "interface",
        }
    }
}

impl FieldDecl {
    pub fn leaf(name: impl Into<String>, ty: impl Into<String>, doc: impl Into<String>) -> Self {
        Self { name: name.into(), ty: TypeRef::Leaf(ty.into()), doc: doc.into(), exported: None }
    }

    pub fn indirect(
        name: impl Into<String>,
        package: Option<&str>,
        ty: impl Into<String>,
        doc: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ty: TypeRef::Indirect { package: package.map(str::to_string), name: ty.into(), visible: None },
            doc: doc.into(),
            exported: None,
        }
    }

    pub fn is_exported(&self) -> bool {
        self.exported.unwrap_or_else(|| is_exported_ident(&self.name))
    }
}

impl TypeRef {
    /// Named type as written, minus the pointer.
    pub fn leaf_name(&self) -> &str {
        match self {
            TypeRef::Leaf(name) | TypeRef::Indirect { name, .. } => name,
        }
    }

    /// Package and bare name, whichever form the reference was written in.
    pub fn qualified(&self) -> (Option<&str>, &str) {
        match self {
            TypeRef::Leaf(name) => split_qualified(name),
            TypeRef::Indirect { package, name, .. } => (package.as_deref(), name),
        }
    }

    pub fn is_indirect(&self) -> bool {
        matches!(self, TypeRef::Indirect { .. })
    }

    pub fn is_visible(&self) -> bool {
        match self {
            TypeRef::Leaf(_) => true,
            TypeRef::Indirect { name, visible, .. } => visible.unwrap_or_else(|| is_exported_ident(name)),
        }
    }

    /// Human-readable spelling for diagnostics (`*time.Time`).
    pub fn display(&self) -> String {
        match self {
            TypeRef::Leaf(name) => name.clone(),
            TypeRef::Indirect { package: Some(pkg), name, .. } => format!("*{pkg}.{name}"),
            TypeRef::Indirect { package: None, name, .. } => format!("*{name}"),
        }
    }
}

// --------------------------------- Module --------------------------------- //

#[derive(Debug, Clone, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    package: String,
    #[serde(default)]
    declarations: Vec<Declaration>,
}

/// A resolved compilation unit loaded from a JSON manifest.
#[derive(Debug, Clone, Default)]
pub struct Module {
    package: String,
    declarations: Vec<Declaration>,
    index: HashMap<String, usize>,
}

impl Module {
    pub fn new(package: impl Into<String>, declarations: Vec<Declaration>) -> Result<Self, ManifestError> {
        let mut module = Self { package: package.into(), ..Self::default() };
        for decl in declarations {
            module.push(decl)?;
        }
        Ok(module)
    }

    fn push(&mut self, decl: Declaration) -> Result<(), ManifestError> {
        if self.index.contains_key(&decl.name) {
            return Err(ManifestError::DuplicateDeclaration { name: decl.name });
        }
        self.index.insert(decl.name.clone(), self.declarations.len());
        self.declarations.push(decl);
        Ok(())
    }

    /// Parse manifest text. `path` is only used for error messages.
    pub fn from_json_str(src: &str, path: &Path) -> Result<Self, ManifestError> {
        let de = &mut serde_json::Deserializer::from_str(src);
        let manifest: Manifest = serde_path_to_error::deserialize(de).map_err(|err| {
            let at = err.path().to_string();
            ManifestError::Json {
                path: path.to_path_buf(),
                message: format!("at JSON path {at} → {}", err.into_inner()),
            }
        })?;
        Self::new(manifest.package, manifest.declarations)
    }

    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let src = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&src, path)
    }

    /// Fold another manifest's declarations into this one.
    pub fn merge(&mut self, other: Module) -> Result<(), ManifestError> {
        if self.package.is_empty() {
            self.package = other.package;
        }
        for decl in other.declarations {
            self.push(decl)?;
        }
        Ok(())
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl SourceModel for Module {
    fn package(&self) -> &str {
        &self.package
    }

    fn lookup(&self, name: &str) -> Option<&Declaration> {
        self.index.get(name).map(|&i| &self.declarations[i])
    }

    fn declarations(&self) -> Vec<&Declaration> {
        self.declarations.iter().collect()
    }
}

// ------------------------------- Tests ------------------------------------ //
