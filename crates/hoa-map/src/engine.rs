//! Auto-mapping generator.
//!
//! Proposes a [`ColumnMapping`] for every uploaded header: the entity's
//! recognizer table is consulted first (first match wins), then a generic
//! scorer over the field catalog, and finally the `"ignore"` sentinel.
//! The generator is a pure function of (headers, entity type): no
//! randomness, no external state, no errors.

use std::cmp::Ordering;

use rapidfuzz::distance::jaro_winkler::similarity as jaro_similarity;

use hoa_model::{ColumnMapping, EntityType, FieldCatalog, FieldOption, IGNORE_FIELD};

use crate::patterns::{Recognizer, recognizers_for};
use crate::utils::comparison_key;

/// How a proposed target was arrived at, for mapping-preview output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSource {
    /// A recognizer in the pattern library fired; carries its concept tag.
    Recognizer(&'static str),
    /// The generic label scorer matched against the field catalog.
    LabelScore,
    /// Nothing matched; the column will be ignored.
    Unmatched,
}

/// A proposed mapping together with the evidence behind it.
#[derive(Debug, Clone)]
pub struct Proposal {
    pub mapping: ColumnMapping,
    pub source: MatchSource,
}

/// Engine proposing canonical targets for uploaded headers of one entity
/// type. Construction is cheap; the engine is read-only and reusable
/// across sessions.
pub struct MappingEngine {
    catalog: FieldCatalog,
    recognizers: &'static [Recognizer],
}

impl MappingEngine {
    pub fn new(entity: EntityType) -> Self {
        Self {
            catalog: FieldCatalog::for_entity(entity),
            recognizers: recognizers_for(entity),
        }
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    /// Propose one mapping per header, in input order.
    pub fn generate(&self, headers: &[String]) -> Vec<ColumnMapping> {
        self.propose(headers)
            .into_iter()
            .map(|proposal| proposal.mapping)
            .collect()
    }

    /// Like [`Self::generate`] but keeps the match evidence for display.
    pub fn propose(&self, headers: &[String]) -> Vec<Proposal> {
        headers
            .iter()
            .map(|header| self.propose_one(header))
            .collect()
    }

    fn propose_one(&self, header: &str) -> Proposal {
        for recognizer in self.recognizers {
            if recognizer.test(header) {
                return Proposal {
                    mapping: ColumnMapping::new(header, recognizer.target),
                    source: MatchSource::Recognizer(recognizer.concept),
                };
            }
        }
        if let Some(field) = self.best_label_match(header) {
            return Proposal {
                mapping: ColumnMapping::new(header, field.name.clone()),
                source: MatchSource::LabelScore,
            };
        }
        Proposal {
            mapping: ColumnMapping::new(header, IGNORE_FIELD),
            source: MatchSource::Unmatched,
        }
    }

    /// Generic fallback: exact normalized equality with a field label or
    /// name wins outright; otherwise substring containment (either
    /// direction) qualifies a candidate and the highest Jaro-Winkler
    /// similarity picks among them. Catalog order breaks exact ties, so
    /// the result is deterministic.
    fn best_label_match(&self, header: &str) -> Option<&FieldOption> {
        let key = comparison_key(header);
        if key.is_empty() {
            return None;
        }

        let mut best: Option<(&FieldOption, f64)> = None;
        for field in &self.catalog.fields {
            let label_key = comparison_key(&field.label);
            let name_key = comparison_key(&field.name);
            if key == label_key || key == name_key {
                return Some(field);
            }
            let contained = substring_match(&key, &label_key) || substring_match(&key, &name_key);
            if !contained {
                continue;
            }
            let score = jaro_similarity(key.chars(), label_key.chars())
                .max(jaro_similarity(key.chars(), name_key.chars()));
            let better = match best {
                Some((_, best_score)) => {
                    score.partial_cmp(&best_score) == Some(Ordering::Greater)
                }
                None => true,
            };
            if better {
                best = Some((field, score));
            }
        }
        best.map(|(field, _)| field)
    }
}

fn substring_match(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(b) || b.contains(a)
}

/// Convenience entry point: propose mappings for `headers` under `entity`.
pub fn generate_mapping(headers: &[String], entity: EntityType) -> Vec<ColumnMapping> {
    MappingEngine::new(entity).generate(headers)
}
