//! Scalar type classification.
//!
//! Maps a resolved leaf type name onto a schema primitive. Anything outside
//! the table is *unclassified*; callers drop the field and record a
//! diagnostic rather than failing.
use crate::node::{BooleanNode, Format, Node, NumberNode, StringNode};
use crate::source::split_qualified;

const NUMBER_TYPES: &[&str] = &[
    "int", "uint", "int8", "uint8", "int16", "uint16", "int32", "uint32", "int64", "uint64",
    "float32", "float64", "byte", "rune", "uintptr",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classified {
    String { format: Option<Format> },
    Number,
    Boolean,
}

/// Classify a leaf type name. Package-qualified names (`time.Time`) are
/// matched on their name; slices, maps and other composites never match.
pub fn classify(type_name: &str) -> Option<Classified> {
    let (_, leaf) = split_qualified(type_name);
    match leaf {
        "string" => Some(Classified::String { format: None }),
        "Time" => Some(Classified::String { format: Some(Format::DateTime) }),
        "bool" => Some(Classified::Boolean),
        n if NUMBER_TYPES.contains(&n) => Some(Classified::Number),
        _ => None,
    }
}

impl Classified {
    /// Build the schema fragment for a field carrying `description`.
    pub fn into_node(self, description: String) -> Node {
        match self {
            Classified::String { format } => Node::String(StringNode { description, format }),
            Classified::Number => Node::Number(NumberNode { description, ..NumberNode::default() }),
            Classified::Boolean => Node::Boolean(BooleanNode { description }),
        }
    }
}
