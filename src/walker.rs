//! Struct walker: one declaration → one object node.
//!
//! Pure over its inputs. Field-level problems never fail the walk; they are
//! collected as diagnostics and the field is left out.
use tracing::{debug, warn};

use crate::classify::classify;
use crate::diagnostics::Diagnostic;
use crate::doc;
use crate::node::{Node, ObjectNode};
use crate::options::{Options, RequiredPolicy};
use crate::source::{Declaration, FieldDecl, SourceModel};

#[derive(Debug, Clone, Default)]
pub struct Walked {
    /// `None` when the declaration had no fields, or none survived.
    pub object: Option<ObjectNode>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Walk `decl` into an object node. `model` is only consulted when
/// `options.expand_nested` is set.
pub fn walk<M>(model: &M, decl: &Declaration, options: &Options) -> Walked
where
    M: SourceModel + ?Sized,
{
    let mut walker = Walker { model, options, diagnostics: Vec::new(), path: Vec::new() };
    let object = walker.walk_decl(decl, None);
    Walked { object, diagnostics: walker.diagnostics }
}

struct Walker<'a, M: ?Sized> {
    model: &'a M,
    options: &'a Options,
    diagnostics: Vec<Diagnostic>,
    path: Vec<String>, // declarations currently being walked, outermost first
}

impl<M> Walker<'_, M>
where
    M: SourceModel + ?Sized,
{
    fn walk_decl(&mut self, decl: &Declaration, description: Option<String>) -> Option<ObjectNode> {
        let fields = decl.fields().unwrap_or_default();
        if fields.is_empty() {
            return None;
        }

        let description = description.unwrap_or_else(|| doc::normalize(&decl.doc));
        let mut object = ObjectNode::new(decl.name.clone(), description);

        self.path.push(decl.name.clone());
        for field in fields {
            self.walk_field(&decl.name, field, &mut object);
        }
        self.path.pop();

        debug!(decl = %decl.name, properties = object.len(), "walked declaration");
        if object.is_empty() { None } else { Some(object) }
    }

    fn walk_field(&mut self, owner: &str, field: &FieldDecl, object: &mut ObjectNode) {
        if self.options.exported_only && !field.is_exported() {
            self.diagnostics.push(Diagnostic::SkippedUnexported {
                owner: owner.to_string(),
                field: field.name.clone(),
            });
            return;
        }

        let indirect = field.ty.is_indirect();
        if indirect && !field.ty.is_visible() {
            self.diagnostics.push(Diagnostic::SkippedInvisibleIndirection {
                owner: owner.to_string(),
                field: field.name.clone(),
                type_name: field.ty.display(),
            });
            return;
        }

        let description = doc::normalize(&field.doc);
        let node = match classify(field.ty.leaf_name()) {
            Some(class) => Some(class.into_node(description)),
            None => self.expand(owner, field, description),
        };
        let Some(node) = node else { return };

        let required = match self.options.required_policy {
            RequiredPolicy::IndirectOnly => indirect,
            RequiredPolicy::AllClassified => true,
        };
        object.insert(field.name.clone(), node, required);
    }

    /// Fallback for unclassified leaf types: recurse into a same-module
    /// struct when nested expansion is on, else drop the field.
    fn expand(&mut self, owner: &str, field: &FieldDecl, description: String) -> Option<Node> {
        let (package, leaf) = field.ty.qualified();
        let model = self.model;
        // only this module's own structs: unqualified or qualified with its package
        let local = package.is_none_or(|p| p == model.package());
        let nested = if self.options.expand_nested && local {
            model.lookup(leaf).filter(|d| d.fields().is_some())
        } else {
            None
        };

        let Some(nested) = nested else {
            warn!(owner, field = %field.name, type_name = %field.ty.display(), "unclassified field type");
            self.diagnostics.push(Diagnostic::UnclassifiedFieldType {
                owner: owner.to_string(),
                field: field.name.clone(),
                type_name: field.ty.display(),
            });
            return None;
        };

        if self.path.iter().any(|p| p == &nested.name) {
            warn!(owner, field = %field.name, type_name = leaf, "cyclic nested type");
            self.diagnostics.push(Diagnostic::CyclicType {
                owner: owner.to_string(),
                field: field.name.clone(),
                type_name: nested.name.clone(),
            });
            return None;
        }

        let description = if description.is_empty() { None } else { Some(description) };
        match self.walk_decl(nested, description) {
            Some(object) => Some(Node::Object(object)),
            None => {
                self.diagnostics.push(Diagnostic::SkippedEmptyStruct { name: nested.name.clone() });
                None
            }
        }
    }
}

// ------------------------------- Tests ------------------------------------ //
