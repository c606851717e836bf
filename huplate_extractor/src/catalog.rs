//! Plate-number pattern families.
//!
//! Every pattern is compiled case-insensitively and augmented with a trailing
//! boundary guard: a match directly followed by a separator and another digit
//! is rejected, so a short family never claims part of a longer digit run.

use std::ops::Range;

use huplate_core::{Error, Result};
use once_cell::sync::OnceCell;
use regex::{Regex, RegexBuilder};
use tracing::{info, trace};

/// Definition of a single plate-number family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternDef {
    /// Stable identifier, used in logs.
    pub id: &'static str,

    /// Pattern text, without the boundary guard.
    pub pattern: &'static str,
}

/// Separator followed by a digit; a match must not be followed by this.
pub const BOUNDARY_GUARD: &str = r"[ -]\d";

const GUARD_GROUP: &str = "plate_guard";

/// The supported plate-number families.
pub const PLATE_NUMBER_PATTERNS: &[PatternDef] = &[
    PatternDef {
        id: "single_letter_prefix",
        pattern: r"\b([epvz])[ -]?\d{5}\b",
    },
    PatternDef {
        id: "m_prefix",
        pattern: r"\b(m)\d{2}[ -]?\d{4}\b",
    },
    PatternDef {
        id: "two_letter_prefix",
        pattern: r"\b(ck|dt|hc|cd|hx|ma|ot|rx|rr)[ -]?\d{2}[ -]?\d{2}\b",
    },
    PatternDef {
        id: "cd_three_three",
        pattern: r"\b(cd)[ -]?\d{3}[ -]?\d{3}\b",
    },
    PatternDef {
        id: "cd_bounded_suffix",
        pattern: r"\b(cd)[ -]?\d{4}[ -]?[0-2][0-9]\b",
    },
    PatternDef {
        id: "i_digits_letters",
        pattern: r"\b(i)[ -]?\d{3}[ -]?[a-zA-Z]{2}\b",
    },
    PatternDef {
        id: "i_bounded_suffix",
        pattern: r"\b(i)[ -]?\d{2}[ -]?[a-zA-Z]{2}[ -]?[0-2][0-9]\b",
    },
    PatternDef {
        id: "compound_prefix",
        pattern: r"\b(c-c|c-x|x-a|x-b|x-c)[ -]?\d{4}\b",
    },
    PatternDef {
        id: "letters_2_2_digits_3",
        pattern: r"\b[a-zA-Z]{2}[ -]?[a-zA-Z]{2}[ -]?\d{3}\b",
    },
    PatternDef {
        id: "letters_3_digits_4",
        pattern: r"\b[a-zA-Z]{3}[ -]?\d{4}\b",
    },
    PatternDef {
        id: "letters_5_digits_2",
        pattern: r"\b[a-zA-Z]{5}[ -]?\d{2}\b",
    },
    PatternDef {
        id: "letters_6_digits_1",
        pattern: r"\b[a-zA-Z]{6}[ -]?\d{1}\b",
    },
    PatternDef {
        id: "letters_3_digits_3",
        pattern: r"\b[a-zA-Z]{3}[ -]?\d{3}\b",
    },
    PatternDef {
        id: "letters_4_digits_2",
        pattern: r"\b[a-zA-Z]{4}[ -]?\d{2}\b",
    },
    PatternDef {
        id: "letters_5_digits_1",
        pattern: r"\b[a-zA-Z]{5}[ -]?\d{1}\b",
    },
];

static GLOBAL_CATALOG: OnceCell<PatternCatalog> = OnceCell::new();

/// A compiled plate-number family.
#[derive(Debug, Clone)]
pub struct PlatePattern {
    def: PatternDef,
    regex: Regex,
}

impl PlatePattern {
    /// Compile a pattern definition together with its boundary guard.
    pub fn compile(def: PatternDef) -> Result<Self> {
        // The guard is an optional trailing group; a match that includes it
        // is one the guard forbids.
        let augmented = format!("(?:{})(?P<{GUARD_GROUP}>{BOUNDARY_GUARD})?", def.pattern);
        let regex = RegexBuilder::new(&augmented)
            .case_insensitive(true)
            .build()
            .map_err(|source| Error::Pattern {
                id: def.id.to_string(),
                source,
            })?;

        Ok(Self { def, regex })
    }

    #[must_use]
    pub const fn id(&self) -> &'static str {
        self.def.id
    }

    #[must_use]
    pub const fn pattern(&self) -> &'static str {
        self.def.pattern
    }

    /// Byte spans of all guarded, non-overlapping matches, leftmost first.
    #[must_use]
    pub const fn find_iter<'p, 't>(&'p self, text: &'t str) -> PlateMatches<'p, 't> {
        PlateMatches {
            pattern: self,
            text,
            pos: 0,
        }
    }
}

/// Iterator over the matches of one [`PlatePattern`].
#[derive(Debug)]
pub struct PlateMatches<'p, 't> {
    pattern: &'p PlatePattern,
    text: &'t str,
    pos: usize,
}

impl PlateMatches<'_, '_> {
    /// Byte offset of the character after the one starting at `at`.
    fn next_char(&self, at: usize) -> usize {
        self.text[at..]
            .chars()
            .next()
            .map_or(self.text.len() + 1, |c| at + c.len_utf8())
    }
}

impl Iterator for PlateMatches<'_, '_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos <= self.text.len() {
            let caps = self.pattern.regex.captures_at(self.text, self.pos)?;
            let whole = caps.get(0)?;

            if caps.name(GUARD_GROUP).is_none() {
                self.pos = if whole.is_empty() {
                    self.next_char(whole.end())
                } else {
                    whole.end()
                };
                return Some(whole.range());
            }

            trace!(
                pattern = self.pattern.id(),
                at = whole.start(),
                "Match rejected by boundary guard"
            );
            self.pos = self.next_char(whole.start());
        }

        None
    }
}

/// The ordered set of compiled plate-number families.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    patterns: Vec<PlatePattern>,
}

impl PatternCatalog {
    /// Compile a catalog from pattern definitions, keeping their order.
    pub fn compile(defs: &[PatternDef]) -> Result<Self> {
        let patterns = defs
            .iter()
            .copied()
            .map(PlatePattern::compile)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// The process-wide catalog of [`PLATE_NUMBER_PATTERNS`], compiled on first use.
    pub fn global() -> Result<&'static Self> {
        GLOBAL_CATALOG.get_or_try_init(|| {
            let catalog = Self::compile(PLATE_NUMBER_PATTERNS)?;
            info!(patterns = catalog.len(), "Compiled plate number catalog");
            Ok(catalog)
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlatePattern> {
        self.patterns.iter()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PlatePattern> {
        self.patterns.iter().find(|p| p.id() == id)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl<'a> IntoIterator for &'a PatternCatalog {
    type Item = &'a PlatePattern;
    type IntoIter = std::slice::Iter<'a, PlatePattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.iter()
    }
}
