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

//! Hungarian vehicle plate-number recognition for NLU messages.
//!
//! [`catalog`] holds the fixed plate-number pattern families, [`engine`]
//! applies them to raw text, and [`component`] wires the engine into a
//! message pipeline behind an optional intent filter.

pub mod catalog;
pub mod component;
pub mod engine;

pub use catalog::{PLATE_NUMBER_PATTERNS, PatternCatalog, PatternDef, PlatePattern};
pub use component::{EXTRACTOR_NAME, PlateNumberEntityExtractor};
pub use engine::{ExtractionEngine, PLATE_NUMBER_ENTITY, PlateMatch};
