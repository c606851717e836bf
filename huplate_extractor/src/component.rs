//! Pipeline component wrapping the extraction engine.

use huplate_config::ExtractorConfig;
use huplate_core::{Entity, Message, Result};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::catalog::PatternCatalog;
use crate::engine::ExtractionEngine;

/// Name recorded as `extractor` on every produced entity.
pub const EXTRACTOR_NAME: &str = "PlateNumberEntityExtractor";

/// Entity extractor for Hungarian plate numbers.
///
/// Holds only immutable state, so one instance can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct PlateNumberEntityExtractor {
    config: ExtractorConfig,
    engine: ExtractionEngine<'static>,
}

impl PlateNumberEntityExtractor {
    /// Create the component from its configuration.
    ///
    /// # Errors
    /// Returns an error if the plate-number catalog fails to compile.
    pub fn create(config: ExtractorConfig) -> Result<Self> {
        let catalog = PatternCatalog::global()?;
        info!(
            patterns = catalog.len(),
            use_intent = ?config.use_intent,
            "Created plate number extractor"
        );

        Ok(Self {
            config,
            engine: ExtractionEngine::new(catalog, EXTRACTOR_NAME),
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::create(Self::default_config())
    }

    #[must_use]
    pub fn default_config() -> ExtractorConfig {
        ExtractorConfig::default()
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        EXTRACTOR_NAME
    }

    #[must_use]
    pub const fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    #[must_use]
    pub const fn engine(&self) -> &ExtractionEngine<'static> {
        &self.engine
    }

    /// Annotate every message with the plate numbers found in its text.
    ///
    /// Messages are returned in input order; those filtered out by intent are
    /// returned unchanged.
    pub fn process<M: Message>(&self, mut messages: Vec<M>) -> Vec<M> {
        for message in &mut messages {
            self.process_message(message);
        }
        messages
    }

    /// Same as [`Self::process`], with messages handled on the rayon pool.
    pub fn process_par<M: Message + Send>(&self, messages: Vec<M>) -> Vec<M> {
        messages
            .into_par_iter()
            .map(|mut message| {
                self.process_message(&mut message);
                message
            })
            .collect()
    }

    /// Annotate a single message. Returns whether extraction ran.
    ///
    /// Existing entities are kept; new ones are appended and the combined
    /// list is stably sorted by start offset.
    pub fn process_message<M: Message + ?Sized>(&self, message: &mut M) -> bool {
        if !self.config.should_run(message.intent_name()) {
            debug!(
                intent = ?message.intent_name(),
                "Skipping plate number extraction for intent"
            );
            return false;
        }

        let extracted = self.engine.extract(message.text());
        debug!(found = extracted.len(), "Extracted plate numbers");

        let existing = message.entities();
        let mut entities = Vec::with_capacity(existing.len() + extracted.len());
        entities.extend_from_slice(existing);
        entities.extend(extracted.into_iter().map(Entity::from));
        entities.sort_by_key(|entity| entity.start);

        message.set_entities(entities, true);
        true
    }
}
