//! Transport-agnostic query descriptors.
//!
//! A [`Query`] is a tree of named selections with arguments, the shape shared by
//! GraphQL subgraphs and similar indexers. Strategies build them; whatever
//! executes them decides the wire format.

use serde::Serialize;
use serde_json::{Map, Value};

/// One root-level query: an ordered list of top-level selections.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Query {
    pub selections: Vec<Selection>,
}

/// A selected entity or field, with its arguments and sub-selections.
///
/// Leaf fields have no arguments and no sub-selections.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Selection {
    pub name: String,
    /// Arguments in declaration order.
    pub args: Vec<(String, Value)>,
    pub fields: Vec<Selection>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selections.push(selection);
        self
    }

    /// Look up a top-level selection by name.
    pub fn selection(&self, name: &str) -> Option<&Selection> {
        self.selections.iter().find(|s| s.name == name)
    }

    /// Render as the nested-object form used by JSON query builders:
    /// arguments under `__args`, leaf fields as `true`.
    pub fn to_json(&self) -> Value {
        let mut root = Map::new();
        for selection in &self.selections {
            root.insert(selection.name.clone(), selection.to_json());
        }
        Value::Object(root)
    }
}

impl Selection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.args.push((name.into(), value.into()));
        self
    }

    /// Add leaf fields.
    pub fn with_fields(mut self, names: &[&str]) -> Self {
        self.fields.extend(names.iter().map(|n| Selection::new(*n)));
        self
    }

    pub fn arg(&self, name: &str) -> Option<&Value> {
        self.args.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn field(&self, name: &str) -> Option<&Selection> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn is_leaf(&self) -> bool {
        self.args.is_empty() && self.fields.is_empty()
    }

    fn to_json(&self) -> Value {
        if self.is_leaf() {
            return Value::Bool(true);
        }
        let mut obj = Map::new();
        if !self.args.is_empty() {
            let args: Map<String, Value> = self.args.iter().cloned().collect();
            obj.insert("__args".to_string(), Value::Object(args));
        }
        for field in &self.fields {
            obj.insert(field.name.clone(), field.to_json());
        }
        Value::Object(obj)
    }
}
