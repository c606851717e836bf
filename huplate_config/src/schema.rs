use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Configuration of the plate-number extractor component.
///
/// Unknown keys are ignored. A missing or `null` `use_intent` means the
/// extractor runs on every message.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Intent names the extractor is restricted to.
    #[serde(default)]
    pub use_intent: Option<Vec<String>>,
}

impl ExtractorConfig {
    /// Restrict extraction to the given intents.
    #[must_use]
    pub fn with_intents<I, S>(intents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            use_intent: Some(intents.into_iter().map(Into::into).collect()),
        }
    }

    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let value: Value =
            serde_json::from_str(json).context("Extractor config is not valid JSON")?;
        Self::from_value(value)
    }

    /// Parse a config document. A `null` document yields the default config.
    pub fn from_value(value: Value) -> anyhow::Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }

        let config: Self =
            serde_json::from_value(value).context("Invalid extractor config")?;
        debug!(use_intent = ?config.use_intent, "Loaded extractor config");
        Ok(config)
    }

    /// Whether extraction should run for a message with the given intent.
    ///
    /// Without a restriction this is always true. With one, the intent must be
    /// present and listed; an empty list never matches.
    #[must_use]
    pub fn should_run(&self, intent: Option<&str>) -> bool {
        match &self.use_intent {
            None => true,
            Some(allowed) => {
                intent.is_some_and(|name| allowed.iter().any(|candidate| candidate == name))
            }
        }
    }
}
