//! Typed-data schemas for subscription messages.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One named, typed member of a typed-data struct.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedField {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl TypedField {
    pub fn new(name: &str, kind: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
        }
    }
}

/// Struct name → ordered members, serialized as `{ "Subscribe": [...] }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypedDataSchema(BTreeMap<String, Vec<TypedField>>);

impl TypedDataSchema {
    pub fn new(primary: &str, fields: Vec<TypedField>) -> Self {
        let mut types = BTreeMap::new();
        types.insert(primary.to_string(), fields);
        Self(types)
    }

    pub fn fields(&self, type_name: &str) -> Option<&[TypedField]> {
        self.0.get(type_name).map(Vec::as_slice)
    }

    /// Schema for a new subscription.
    pub fn subscribe() -> Self {
        Self::new(
            "Subscribe",
            vec![
                TypedField::new("address", "address"),
                TypedField::new("email", "string"),
            ],
        )
    }

    /// Schema for replacing a subscriber's notification categories.
    pub fn update_subscriptions() -> Self {
        Self::new(
            "Subscriptions",
            vec![
                TypedField::new("address", "address"),
                TypedField::new("email", "string"),
                TypedField::new("subscriptions", "string[]"),
            ],
        )
    }
}
