//! Schema node model.
//!
//! A closed set of JSON Schema fragments. Each variant renders itself into an
//! ordered `serde_json` object; key order is insertion order
//! (`serde_json/preserve_order`) so rendering is byte-stable.
use indexmap::IndexMap;
use serde_json::{Map, Value};

// ------------------------------- Variants --------------------------------- //

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Object(ObjectNode),
    Array(ArrayNode),
    String(StringNode),
    Number(NumberNode),
    Boolean(BooleanNode),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectNode {
    pub title: String,
    pub description: String,
    required: Vec<String>, // always a subset of `properties` keys
    properties: IndexMap<String, Node>, // declaration order
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayNode {
    pub description: String,
    pub items: Box<Node>,
    pub min_items: u64,
    pub unique_items: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringNode {
    pub description: String,
    pub format: Option<Format>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberNode {
    pub description: String,
    pub minimum: i64,
    pub exclusive_minimum: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BooleanNode {
    pub description: String,
}

/// Recognized `format` tokens for string fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    DateTime,
}

impl Format {
    pub fn as_str(self) -> &'static str {
        match self {
            Format::DateTime => "date-time",
        }
    }
}

// ------------------------------ Object API -------------------------------- //

impl ObjectNode {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Add (or replace) a property. Marking it required keeps `required`
    /// duplicate-free and in first-insertion order.
    pub fn insert(&mut self, name: impl Into<String>, node: Node, required: bool) {
        let name = name.into();
        if required {
            if !self.required.iter().any(|r| r == &name) {
                self.required.push(name.clone());
            }
        } else {
            self.required.retain(|r| r != &name);
        }
        self.properties.insert(name, node);
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn properties(&self) -> &IndexMap<String, Node> {
        &self.properties
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.properties.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }
}

// ------------------------------- Rendering -------------------------------- //

impl Node {
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Object(_) => "object",
            Node::Array(_) => "array",
            Node::String(_) => "string",
            Node::Number(_) => "number",
            Node::Boolean(_) => "boolean",
        }
    }

    pub fn render(&self) -> Map<String, Value> {
        match self {
            Node::Object(o) => o.render(),
            Node::Array(a) => a.render(),
            Node::String(s) => s.render(),
            Node::Number(n) => n.render(),
            Node::Boolean(b) => b.render(),
        }
    }
}

impl ObjectNode {
    pub fn render(&self) -> Map<String, Value> {
        let mut m = Map::new();
        m.insert("type".into(), Value::from("object"));
        m.insert("title".into(), Value::from(self.title.clone()));
        m.insert("description".into(), Value::from(self.description.clone()));
        // an empty required list renders as null, matching the historical output
        let required = if self.required.is_empty() {
            Value::Null
        } else {
            Value::Array(self.required.iter().cloned().map(Value::from).collect())
        };
        m.insert("required".into(), required);

        let mut props = Map::new();
        for (k, v) in &self.properties {
            props.insert(k.clone(), Value::Object(v.render()));
        }
        m.insert("properties".into(), Value::Object(props));
        m
    }
}

impl ArrayNode {
    pub fn render(&self) -> Map<String, Value> {
        let mut m = Map::new();
        m.insert("type".into(), Value::from("array"));
        m.insert("description".into(), Value::from(self.description.clone()));
        m.insert("items".into(), Value::Object(self.items.render()));
        m.insert("minItems".into(), Value::from(self.min_items));
        m.insert("uniqueItems".into(), Value::from(self.unique_items));
        m
    }
}

impl StringNode {
    pub fn render(&self) -> Map<String, Value> {
        let mut m = Map::new();
        m.insert("type".into(), Value::from("string"));
        m.insert("description".into(), Value::from(self.description.clone()));
        if let Some(format) = self.format {
            m.insert("format".into(), Value::from(format.as_str()));
        }
        m
    }
}

impl NumberNode {
    pub fn render(&self) -> Map<String, Value> {
        let mut m = Map::new();
        m.insert("type".into(), Value::from("number"));
        m.insert("description".into(), Value::from(self.description.clone()));
        m.insert("minimum".into(), Value::from(self.minimum));
        if self.exclusive_minimum {
            m.insert("exclusiveMinimum".into(), Value::from(true));
        }
        m
    }
}

impl BooleanNode {
    pub fn render(&self) -> Map<String, Value> {
        let mut m = Map::new();
        m.insert("type".into(), Value::from("boolean"));
        m.insert("description".into(), Value::from(self.description.clone()));
        m
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn num(desc: &str) -> Node {
        Node::Number(NumberNode { description: desc.into(), ..NumberNode::default() })
    }

    #[test]
    fn string_format_only_when_present() {
        let plain = StringNode { description: "x".into(), format: None };
        assert_eq!(Value::Object(plain.render()), json!({"type": "string", "description": "x"}));

        let dated = StringNode { description: "".into(), format: Some(Format::DateTime) };
        assert_eq!(
            Value::Object(dated.render()),
            json!({"type": "string", "description": "", "format": "date-time"})
        );
    }

    #[test]
    fn number_minimum_always_rendered() {
        let m = Value::Object(num("n").render());
        assert_eq!(m, json!({"type": "number", "description": "n", "minimum": 0}));

        let strict = NumberNode { description: "".into(), minimum: 1, exclusive_minimum: true };
        assert_eq!(Value::Object(strict.render())["exclusiveMinimum"], json!(true));
    }

    #[test]
    fn object_required_subset_and_null_when_empty() {
        let mut o = ObjectNode::new("T", "");
        o.insert("a", num(""), false);
        assert_eq!(Value::Object(o.render())["required"], Value::Null);

        o.insert("b", num(""), true);
        o.insert("b", num("again"), true);
        assert_eq!(o.required(), ["b".to_string()]);
        assert!(o.required().iter().all(|r| o.properties().contains_key(r)));

        // re-inserting as optional drops it from required
        o.insert("b", num(""), false);
        assert!(o.required().is_empty());
    }

    #[test]
    fn object_key_order_is_stable() {
        let mut o = ObjectNode::new("T", "d");
        o.insert("z", num(""), false);
        o.insert("a", num(""), false);
        let rendered = serde_json::to_string(&Value::Object(o.render())).unwrap();
        assert!(rendered.starts_with(r#"{"type":"object","title":"T","description":"d","required":null,"properties":{"z""#));
    }

    #[test]
    fn array_and_boolean_render_explicitly() {
        let arr = ArrayNode {
            description: "tags".into(),
            items: Box::new(Node::String(StringNode::default())),
            min_items: 1,
            unique_items: true,
        };
        assert_eq!(
            Value::Object(arr.render()),
            json!({
                "type": "array",
                "description": "tags",
                "items": {"type": "string", "description": ""},
                "minItems": 1,
                "uniqueItems": true
            })
        );
        let b = Node::Boolean(BooleanNode { description: "on".into() });
        assert_eq!(b.type_name(), "boolean");
        assert_eq!(Value::Object(b.render()), json!({"type": "boolean", "description": "on"}));
    }
}
