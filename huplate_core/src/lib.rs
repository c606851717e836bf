#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Host-facing record contract shared by the plate-number extractor.
//!
//! The extractor never depends on a concrete host message type. It reads and
//! writes records through the [`Message`] trait and emits [`Entity`] values.

pub mod entity;
pub mod error;
pub mod message;

pub use entity::Entity;
pub use error::{Error, Result};
pub use message::{Intent, Message, NluMessage};

/// Field name of the message text.
pub const TEXT: &str = "text";
/// Field name of the message intent.
pub const INTENT: &str = "intent";
/// Field name of the entity list.
pub const ENTITIES: &str = "entities";

/// Entity attribute keys as seen by downstream consumers.
pub const ENTITY_ATTRIBUTE_START: &str = "start";
pub const ENTITY_ATTRIBUTE_END: &str = "end";
pub const ENTITY_ATTRIBUTE_TEXT: &str = "text";
pub const ENTITY_ATTRIBUTE_VALUE: &str = "value";
pub const ENTITY_ATTRIBUTE_TYPE: &str = "entity";
pub const EXTRACTOR: &str = "extractor";
