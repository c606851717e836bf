//! Entity annotations attached to a message.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    ENTITY_ATTRIBUTE_END, ENTITY_ATTRIBUTE_START, ENTITY_ATTRIBUTE_TEXT, ENTITY_ATTRIBUTE_TYPE,
    ENTITY_ATTRIBUTE_VALUE, EXTRACTOR,
};

/// A single entity annotation.
///
/// Only the span is interpreted here. Every other attribute (type, value,
/// extractor, role, confidence, ...) is carried verbatim in `fields` so that
/// annotations produced by other extractors survive a merge untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Character offset of the first annotated character.
    pub start: usize,

    /// Character offset one past the last annotated character.
    pub end: usize,

    /// Remaining attributes, kept as-is.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Entity {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            fields: Map::new(),
        }
    }

    /// Set an attribute, replacing any previous value.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The entity type tag, e.g. `car_hu_plate_number`.
    #[must_use]
    pub fn entity_type(&self) -> Option<&str> {
        self.str_field(ENTITY_ATTRIBUTE_TYPE)
    }

    /// The value as a string, if the producing extractor stored one.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.str_field(ENTITY_ATTRIBUTE_VALUE)
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.str_field(ENTITY_ATTRIBUTE_TEXT)
    }

    #[must_use]
    pub fn extractor(&self) -> Option<&str> {
        self.str_field(EXTRACTOR)
    }

    /// Length of the span in characters.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render as a JSON object with `start` and `end` alongside the other attributes.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut object = Map::with_capacity(self.fields.len() + 2);
        object.insert(ENTITY_ATTRIBUTE_START.to_string(), Value::from(self.start));
        object.insert(ENTITY_ATTRIBUTE_END.to_string(), Value::from(self.end));
        for (key, value) in &self.fields {
            object.insert(key.clone(), value.clone());
        }
        Value::Object(object)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_foreign_attributes_survive_roundtrip() {
        let raw = json!({
            "start": 3,
            "end": 9,
            "entity": "amount",
            "value": 42,
            "extractor": "DucklingEntityExtractor",
            "additional_info": {"unit": "EUR"}
        });

        let entity: Entity = serde_json::from_value(raw.clone()).expect("entity should parse");
        assert_eq!(entity.start, 3);
        assert_eq!(entity.end, 9);
        assert_eq!(entity.entity_type(), Some("amount"));
        // Non-string values are preserved but not exposed as text.
        assert_eq!(entity.value(), None);
        assert_eq!(entity.get("value"), Some(&json!(42)));

        assert_eq!(entity.to_value(), raw);
    }

    #[test]
    fn test_builder_and_accessors() {
        let entity = Entity::new(0, 7)
            .with_field("text", "ABC-123")
            .with_field("value", "ABC-123")
            .with_field("entity", "car_hu_plate_number")
            .with_field("extractor", "PlateNumberEntityExtractor");

        assert_eq!(entity.len(), 7);
        assert!(!entity.is_empty());
        assert_eq!(entity.text(), Some("ABC-123"));
        assert_eq!(entity.extractor(), Some("PlateNumberEntityExtractor"));
    }
}
