//! Extraction engine: applies every catalog pattern to a text.
//!
//! Matches of different families are not deduplicated. Two families that
//! accept the same span both report it.

use huplate_core::{
    ENTITY_ATTRIBUTE_TEXT, ENTITY_ATTRIBUTE_TYPE, ENTITY_ATTRIBUTE_VALUE, EXTRACTOR, Entity,
};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::catalog::PatternCatalog;

/// Entity type tag of every plate-number match.
pub const PLATE_NUMBER_ENTITY: &str = "car_hu_plate_number";

/// A plate number found in a text.
///
/// Offsets are character offsets. `text` and `value` are the matched slice,
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlateMatch {
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub value: String,
    pub entity: String,
    pub extractor: String,
}

impl From<PlateMatch> for Entity {
    fn from(plate: PlateMatch) -> Self {
        Self::new(plate.start, plate.end)
            .with_field(ENTITY_ATTRIBUTE_TEXT, plate.text)
            .with_field(ENTITY_ATTRIBUTE_VALUE, plate.value)
            .with_field(ENTITY_ATTRIBUTE_TYPE, plate.entity)
            .with_field(EXTRACTOR, plate.extractor)
    }
}

/// Converts byte offsets of one text into character offsets.
enum CharOffsets {
    Ascii,
    /// Character index at every byte offset, plus one entry for the end.
    Table(Vec<usize>),
}

impl CharOffsets {
    fn new(text: &str) -> Self {
        if text.is_ascii() {
            return Self::Ascii;
        }

        let mut table = Vec::with_capacity(text.len() + 1);
        for (index, c) in text.chars().enumerate() {
            table.extend(std::iter::repeat_n(index, c.len_utf8()));
        }
        table.push(table.last().map_or(0, |last| last + 1));
        Self::Table(table)
    }

    fn of(&self, byte: usize) -> usize {
        match self {
            Self::Ascii => byte,
            Self::Table(table) => table[byte],
        }
    }
}

/// Runs a [`PatternCatalog`] over texts.
#[derive(Debug, Clone)]
pub struct ExtractionEngine<'c> {
    catalog: &'c PatternCatalog,
    extractor: String,
}

impl<'c> ExtractionEngine<'c> {
    /// Create an engine whose matches are attributed to `extractor`.
    #[must_use]
    pub fn new(catalog: &'c PatternCatalog, extractor: impl Into<String>) -> Self {
        Self {
            catalog,
            extractor: extractor.into(),
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &'c PatternCatalog {
        self.catalog
    }

    #[must_use]
    pub fn extractor(&self) -> &str {
        &self.extractor
    }

    /// Find all plate numbers in `text`, grouped by pattern in catalog order.
    #[must_use]
    pub fn extract(&self, text: &str) -> Vec<PlateMatch> {
        let offsets = CharOffsets::new(text);
        let mut matches = Vec::new();

        for pattern in self.catalog {
            for span in pattern.find_iter(text) {
                let matched = &text[span.clone()];
                trace!(pattern = pattern.id(), matched, "Plate number matched");

                matches.push(PlateMatch {
                    start: offsets.of(span.start),
                    end: offsets.of(span.end),
                    text: matched.to_string(),
                    value: matched.to_string(),
                    entity: PLATE_NUMBER_ENTITY.to_string(),
                    extractor: self.extractor.clone(),
                });
            }
        }

        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PatternDef;

    fn engine() -> ExtractionEngine<'static> {
        match PatternCatalog::global() {
            Ok(catalog) => ExtractionEngine::new(catalog, "TestExtractor"),
            Err(e) => panic!("catalog should compile: {e}"),
        }
    }

    #[test]
    fn test_empty_and_noise_yield_nothing() {
        let engine = engine();
        assert!(engine.extract("").is_empty());
        assert!(engine.extract("   ").is_empty());
        assert!(engine.extract("!!! ??? ---").is_empty());
        assert!(engine.extract("hello there, how are you").is_empty());
    }

    #[test]
    fn test_match_shape() {
        let matches = engine().extract("My car is ABC-123.");

        assert_eq!(
            matches,
            vec![PlateMatch {
                start: 10,
                end: 17,
                text: "ABC-123".to_string(),
                value: "ABC-123".to_string(),
                entity: PLATE_NUMBER_ENTITY.to_string(),
                extractor: "TestExtractor".to_string(),
            }]
        );
    }

    #[test]
    fn test_span_equals_matched_text() {
        let text = "rendszám: abc 123, régi: Abcd-12, új: AA BB-123";
        for plate in engine().extract(text) {
            assert!(plate.start < plate.end);
            let slice: String = text
                .chars()
                .skip(plate.start)
                .take(plate.end - plate.start)
                .collect();
            assert_eq!(slice, plate.text);
            assert_eq!(plate.text, plate.value);
        }
    }

    #[test]
    fn test_offsets_are_character_based() {
        let matches = engine().extract("Az autóm ABC-123");
        assert_eq!(matches.len(), 1);
        // "Az autóm " is nine characters but ten bytes.
        assert_eq!(matches[0].start, 9);
        assert_eq!(matches[0].end, 16);
    }

    #[test]
    fn test_offsets_across_families_in_accented_text() {
        let matches = engine().extract("árvíztűrő E-12345 és ABC-123");
        let spans: Vec<_> = matches.iter().map(|m| (m.start, m.end)).collect();

        // Catalog order: the single-letter family comes before the generic ones.
        assert_eq!(spans, vec![(10, 17), (21, 28)]);
    }

    #[test]
    fn test_accessors() {
        let engine = engine();
        assert_eq!(engine.extractor(), "TestExtractor");
        assert_eq!(engine.catalog().len(), 15);
        assert!(!engine.catalog().is_empty());
    }

    #[test]
    fn test_overlapping_families_are_all_reported() {
        let defs = [
            PatternDef {
                id: "wide",
                pattern: r"\b[a-z]{3}[ -]?\d{3}\b",
            },
            PatternDef {
                id: "narrow",
                pattern: r"\b(abc)[ -]?\d{3}\b",
            },
        ];
        let catalog = match PatternCatalog::compile(&defs) {
            Ok(catalog) => catalog,
            Err(e) => panic!("test catalog should compile: {e}"),
        };
        let engine = ExtractionEngine::new(&catalog, "TestExtractor");

        let matches = engine.extract("ABC-123");
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|m| m.start == 0 && m.end == 7));
    }

    #[test]
    fn test_into_entity() {
        let plate = engine()
            .extract("xyz 789")
            .into_iter()
            .next()
            .map(Entity::from);
        let Some(entity) = plate else {
            panic!("plate should be found");
        };

        assert_eq!((entity.start, entity.end), (0, 7));
        assert_eq!(entity.text(), Some("xyz 789"));
        assert_eq!(entity.value(), Some("xyz 789"));
        assert_eq!(entity.entity_type(), Some(PLATE_NUMBER_ENTITY));
        assert_eq!(entity.extractor(), Some("TestExtractor"));
    }
}
