//! Message records exchanged with the host pipeline.

use std::collections::BTreeSet;

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::trace;

use crate::entity::Entity;
use crate::{ENTITIES, INTENT, Result, TEXT};

/// The narrow view of a host record that extractors rely on.
pub trait Message {
    /// Raw utterance text. Empty when the record carries none.
    fn text(&self) -> &str;

    /// Name of the classified intent, if the record carries an evaluable one.
    fn intent_name(&self) -> Option<&str>;

    /// Entities already attached to the record, in their current order.
    fn entities(&self) -> &[Entity];

    /// Replace the entity list. `add_to_output` marks the list as part of the
    /// record's externally visible output.
    fn set_entities(&mut self, entities: Vec<Entity>, add_to_output: bool);
}

/// Intent classification attached to a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "IntentRepr")]
pub struct Intent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Intent {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            confidence: None,
        }
    }
}

/// Accepted wire shapes: `{"name": .., "confidence": ..}` or a bare name.
/// Anything else is kept as an intent without a name.
#[derive(Deserialize)]
#[serde(untagged)]
enum IntentRepr {
    Name(String),
    Full {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        confidence: Option<f64>,
    },
    Other(IgnoredAny),
}

impl From<IntentRepr> for Intent {
    fn from(repr: IntentRepr) -> Self {
        match repr {
            IntentRepr::Name(name) => Self::named(name),
            IntentRepr::Full { name, confidence } => Self { name, confidence },
            IntentRepr::Other(IgnoredAny) => Self::default(),
        }
    }
}

/// JSON-backed message record.
///
/// `text`, `intent` and `entities` are typed; any other attribute is kept in
/// `data`. Attributes written with `add_to_output` are listed by
/// [`NluMessage::output_properties`] and rendered by [`NluMessage::as_output`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NluMessage {
    #[serde(default)]
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<Entity>,

    #[serde(flatten)]
    pub data: Map<String, Value>,

    #[serde(skip)]
    output_properties: BTreeSet<String>,
}

impl NluMessage {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_intent(mut self, name: impl Into<String>) -> Self {
        self.intent = Some(Intent::named(name));
        self
    }

    #[must_use]
    pub fn with_entities(mut self, entities: Vec<Entity>) -> Self {
        self.entities = entities;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Look up an untyped attribute.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    /// Store an untyped attribute.
    pub fn set(&mut self, field: impl Into<String>, value: Value, add_to_output: bool) {
        let field = field.into();
        if add_to_output {
            self.output_properties.insert(field.clone());
        }
        self.data.insert(field, value);
    }

    /// Attributes marked as externally visible.
    #[must_use]
    pub const fn output_properties(&self) -> &BTreeSet<String> {
        &self.output_properties
    }

    /// The externally visible view: text, intent, and every attribute that was
    /// written with `add_to_output`.
    #[must_use]
    pub fn as_output(&self) -> Map<String, Value> {
        let mut output = Map::new();
        output.insert(TEXT.to_string(), Value::String(self.text.clone()));

        if let Some(intent) = &self.intent {
            let mut object = Map::new();
            if let Some(name) = &intent.name {
                object.insert("name".to_string(), Value::String(name.clone()));
            }
            if let Some(confidence) = intent.confidence {
                object.insert("confidence".to_string(), Value::from(confidence));
            }
            output.insert(INTENT.to_string(), Value::Object(object));
        }

        for property in &self.output_properties {
            if property == ENTITIES {
                let entities = self.entities.iter().map(Entity::to_value).collect();
                output.insert(ENTITIES.to_string(), Value::Array(entities));
            } else if let Some(value) = self.data.get(property) {
                output.insert(property.clone(), value.clone());
            }
        }

        output
    }
}

impl Message for NluMessage {
    fn text(&self) -> &str {
        &self.text
    }

    fn intent_name(&self) -> Option<&str> {
        self.intent.as_ref().and_then(|intent| intent.name.as_deref())
    }

    fn entities(&self) -> &[Entity] {
        &self.entities
    }

    fn set_entities(&mut self, entities: Vec<Entity>, add_to_output: bool) {
        trace!(count = entities.len(), add_to_output, "Setting message entities");
        if add_to_output {
            self.output_properties.insert(ENTITIES.to_string());
        }
        self.entities = entities;
    }
}
