//! Document rendering: `Schema` → ordered JSON object.
use serde_json::{Map, Value};

use crate::synth::Schema;

pub const DIALECT: &str = "http://json-schema.org/draft-04/schema#";

/// Render the root object with the dialect marker as its first key.
pub fn render(schema: &Schema) -> Value {
    let mut doc = Map::new();
    doc.insert("$schema".into(), Value::from(DIALECT));
    doc.extend(schema.root.render());
    Value::Object(doc)
}

pub fn to_string_pretty(schema: &Schema) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&render(schema))
}

pub fn to_string(schema: &Schema) -> serde_json::Result<String> {
    serde_json::to_string(&render(schema))
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::source::{Declaration, FieldDecl, Module};
    use crate::synth::synthesize;

    fn module(decls: Vec<Declaration>) -> Module {
        Module::new("models", decls).unwrap()
    }

    #[test]
    fn person_renders_exactly() {
        let m = module(vec![Declaration::structure("Person", "", vec![
            FieldDecl::leaf("Name", "string", "full name"),
            FieldDecl::leaf("Age", "int", "age in years"),
        ])]);
        let s = synthesize(&m, "Person", &Options::default()).unwrap();
        assert_eq!(
            to_string(&s.schema).unwrap(),
            concat!(
                r#"{"$schema":"http://json-schema.org/draft-04/schema#","type":"object","title":"Person","#,
                r#""description":"","required":null,"properties":{"#,
                r#""Name":{"type":"string","description":"full name"},"#,
                r#""Age":{"type":"number","description":"age in years","minimum":0}}}"#,
            )
        );
    }

    #[test]
    fn time_field_gets_date_time_format() {
        let m = module(vec![Declaration::structure("Event", "", vec![
            FieldDecl::leaf("CreatedAt", "Time", "creation instant"),
        ])]);
        let doc = render(&synthesize(&m, "Event", &Options::default()).unwrap().schema);
        assert_eq!(
            doc["properties"]["CreatedAt"],
            serde_json::json!({"type": "string", "description": "creation instant", "format": "date-time"})
        );
    }

    #[test]
    fn rendering_is_idempotent() {
        let m = module(vec![Declaration::structure("Mixed", "// many kinds", vec![
            FieldDecl::indirect("When", Some("time"), "Time", ""),
            FieldDecl::leaf("Count", "uint64", ""),
            FieldDecl::leaf("Flag", "bool", ""),
            FieldDecl::leaf("Other", "Thing", ""),
        ])]);
        let a = to_string_pretty(&synthesize(&m, "Mixed", &Options::default()).unwrap().schema).unwrap();
        let b = to_string_pretty(&synthesize(&m, "Mixed", &Options::default()).unwrap().schema).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn required_is_subset_and_unclassified_never_rendered() {
        let m = module(vec![Declaration::structure("Mixed", "", vec![
            FieldDecl::indirect("When", Some("time"), "Time", ""),
            FieldDecl::indirect("Who", Some("auth"), "Principal", ""),
            FieldDecl::leaf("Other", "Thing", ""),
            FieldDecl::leaf("Name", "string", ""),
        ])]);
        let doc = render(&synthesize(&m, "Mixed", &Options::default()).unwrap().schema);
        let props = doc["properties"].as_object().unwrap();
        let keys: Vec<&str> = props.keys().map(String::as_str).collect();
        assert_eq!(keys, ["When", "Name"]);
        let required = doc["required"].as_array().unwrap();
        assert_eq!(required, &vec![Value::from("When")]);
        assert!(required.iter().all(|r| props.contains_key(r.as_str().unwrap())));
        assert!(doc["description"] == "");
    }
}
