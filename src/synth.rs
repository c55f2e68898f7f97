//! Schema synthesis: look a type up, walk it, wrap it.
use rayon::prelude::*;
use tracing::{debug, info_span};

use crate::diagnostics::Diagnostic;
use crate::error::SynthError;
use crate::node::ObjectNode;
use crate::options::Options;
use crate::source::SourceModel;
use crate::walker;

/// A successfully synthesized root schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub title: String,
    pub description: String,
    pub root: ObjectNode,
}

/// Result of one synthesis: the schema plus whatever was dropped on the way.
#[derive(Debug, Clone)]
pub struct Synthesis {
    pub schema: Schema,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn synthesize<M>(model: &M, type_name: &str, options: &Options) -> Result<Synthesis, SynthError>
where
    M: SourceModel + ?Sized,
{
    let _span = info_span!("synthesize", type_name).entered();

    let decl = model
        .lookup(type_name)
        .ok_or_else(|| SynthError::DeclarationNotFound { name: type_name.to_string() })?;
    if decl.fields().is_none() {
        return Err(SynthError::NotAStructuredType {
            name: decl.name.clone(),
            kind: decl.kind_name(),
        });
    }

    let walked = walker::walk(model, decl, options);
    let Some(root) = walked.object else {
        return Err(SynthError::EmptySchema { name: decl.name.clone() });
    };
    debug!(diagnostics = walked.diagnostics.len(), "synthesized");

    Ok(Synthesis {
        schema: Schema { title: root.title.clone(), description: root.description.clone(), root },
        diagnostics: walked.diagnostics,
    })
}

/// Synthesize several independent types in parallel. Results come back in
/// the order of `type_names`; one failure never affects the others.
pub fn synthesize_all<M, S>(
    model: &M,
    type_names: &[S],
    options: &Options,
) -> Vec<(String, Result<Synthesis, SynthError>)>
where
    M: SourceModel + Sync + ?Sized,
    S: AsRef<str> + Sync,
{
    type_names
        .par_iter()
        .map(|name| {
            let name = name.as_ref();
            (name.to_string(), synthesize(model, name, options))
        })
        .collect()
}

/// Synthesize every struct in the model, in declaration order. Structs with
/// nothing to emit are reported as diagnostics instead of errors; any other
/// failure means the model's lookup disagrees with its declaration list.
pub fn synthesize_every_struct<M>(
    model: &M,
    options: &Options,
) -> Result<(Vec<Synthesis>, Vec<Diagnostic>), SynthError>
where
    M: SourceModel + Sync + ?Sized,
{
    let names: Vec<&str> = model
        .declarations()
        .into_iter()
        .filter(|d| d.fields().is_some())
        .map(|d| d.name.as_str())
        .collect();

    let mut out = Vec::new();
    let mut skipped = Vec::new();
    for (name, result) in synthesize_all(model, &names, options) {
        match result {
            Ok(synthesis) => out.push(synthesis),
            Err(SynthError::EmptySchema { .. }) => skipped.push(Diagnostic::SkippedEmptyStruct { name }),
            Err(other) => return Err(other),
        }
    }
    Ok((out, skipped))
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{DeclKind, Declaration, FieldDecl, Module};

    fn model() -> Module {
        Module::new("models", vec![
            Declaration::structure("Person", "", vec![
                FieldDecl::leaf("Name", "string", "full name"),
                FieldDecl::leaf("Age", "int", "age in years"),
            ]),
            Declaration::structure("Empty", "", vec![]),
            Declaration::structure("Opaque", "", vec![FieldDecl::leaf("Loc", "Location", "")]),
            Declaration { name: "Id".into(), doc: String::new(), kind: DeclKind::Alias { target: "string".into() } },
        ])
        .unwrap()
    }

    #[test]
    fn person_synthesizes() {
        let s = synthesize(&model(), "Person", &Options::default()).unwrap();
        assert_eq!(s.schema.title, "Person");
        assert_eq!(s.schema.description, "");
        assert_eq!(s.schema.root.len(), 2);
        assert!(s.diagnostics.is_empty());
    }

    #[test]
    fn failures_are_classified() {
        let m = model();
        let opts = Options::default();
        assert_eq!(
            synthesize(&m, "Nope", &opts).unwrap_err(),
            SynthError::DeclarationNotFound { name: "Nope".into() }
        );
        assert_eq!(
            synthesize(&m, "Id", &opts).unwrap_err(),
            SynthError::NotAStructuredType { name: "Id".into(), kind: "alias" }
        );
        assert_eq!(synthesize(&m, "Empty", &opts).unwrap_err(), SynthError::EmptySchema { name: "Empty".into() });
        assert_eq!(synthesize(&m, "Opaque", &opts).unwrap_err(), SynthError::EmptySchema { name: "Opaque".into() });
    }

    #[test]
    fn batch_is_ordered_and_isolated() {
        let results = synthesize_all(&model(), &["Nope", "Person", "Empty"], &Options::default());
        let names: Vec<&str> = results.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["Nope", "Person", "Empty"]);
        assert!(results[0].1.is_err());
        assert!(results[1].1.is_ok());
        assert!(results[2].1.is_err());
    }

    #[test]
    fn every_struct_skips_empty_ones() {
        let (schemas, skipped) = synthesize_every_struct(&model(), &Options::default()).unwrap();
        let titles: Vec<&str> = schemas.iter().map(|s| s.schema.title.as_str()).collect();
        assert_eq!(titles, ["Person"]);
        assert_eq!(skipped, vec![
            Diagnostic::SkippedEmptyStruct { name: "Empty".into() },
            Diagnostic::SkippedEmptyStruct { name: "Opaque".into() },
        ]);
    }
}
