//! Non-fatal findings produced while walking a declaration.
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Field type has no mapping rule; the field was dropped.
    UnclassifiedFieldType { owner: String, field: String, type_name: String },
    /// Pointer to a type that is not visible outside its package.
    SkippedInvisibleIndirection { owner: String, field: String, type_name: String },
    /// Field itself is unexported and `exported_only` is on.
    SkippedUnexported { owner: String, field: String },
    /// Nested expansion reached a type already on the walk path.
    CyclicType { owner: String, field: String, type_name: String },
    /// Whole-module synthesis skipped a struct with nothing to emit.
    SkippedEmptyStruct { name: String },
}

impl Diagnostic {
    pub fn field(&self) -> Option<&str> {
        match self {
            Diagnostic::UnclassifiedFieldType { field, .. }
            | Diagnostic::SkippedInvisibleIndirection { field, .. }
            | Diagnostic::SkippedUnexported { field, .. }
            | Diagnostic::CyclicType { field, .. } => Some(field),
            Diagnostic::SkippedEmptyStruct { .. } => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnclassifiedFieldType { owner, field, type_name } => {
                write!(f, "{owner}.{field}: unclassified type `{type_name}`, field dropped")
            }
            Diagnostic::SkippedInvisibleIndirection { owner, field, type_name } => {
                write!(f, "{owner}.{field}: pointer to unexported type `{type_name}`, field skipped")
            }
            Diagnostic::SkippedUnexported { owner, field } => {
                write!(f, "{owner}.{field}: unexported field skipped")
            }
            Diagnostic::CyclicType { owner, field, type_name } => {
                write!(f, "{owner}.{field}: `{type_name}` refers back to itself, field dropped")
            }
            Diagnostic::SkippedEmptyStruct { name } => {
                write!(f, "{name}: no classifiable fields, no schema emitted")
            }
        }
    }
}
