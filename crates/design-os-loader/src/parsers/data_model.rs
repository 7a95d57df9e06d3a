//! Data model parser
//!
//! Expected format:
//!
//! ```text
//! # Data Model
//!
//! ## Entities
//!
//! ### Invoice
//! A bill sent to a customer.
//!
//! ## Relationships
//!
//! - Customer has many Invoice
//! ```

use super::{guarded, is_blank, ArtifactParser};
use crate::markdown::{bullet_items, extract_section, sub_sections};
use serde::{Deserialize, Serialize};

/// Domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity name
    pub name: String,
    /// What the entity represents
    pub description: String,
}

/// Parsed `data-model.md`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataModel {
    /// Entities in document order
    pub entities: Vec<Entity>,
    /// Relationship statements, kept verbatim
    pub relationships: Vec<String>,
}

/// Parse `data-model.md`; `None` when neither entities nor relationships exist
#[must_use]
pub fn parse_data_model(md: &str) -> Option<DataModel> {
    if is_blank(md) {
        return None;
    }
    guarded(DataModelParser::ARTIFACT, || {
        let entities: Vec<Entity> = extract_section(md, "Entities")
            .map(sub_sections)
            .unwrap_or_default()
            .into_iter()
            .filter(|sub| !sub.title.is_empty())
            .map(|sub| Entity {
                name: sub.title.to_string(),
                description: sub.body.to_string(),
            })
            .collect();

        let relationships = extract_section(md, "Relationships")
            .map(bullet_items)
            .unwrap_or_default();

        if entities.is_empty() && relationships.is_empty() {
            return None;
        }
        Some(DataModel {
            entities,
            relationships,
        })
    })
}

/// [`ArtifactParser`] for `data-model.md`
#[derive(Debug, Clone, Copy, Default)]
pub struct DataModelParser;

impl ArtifactParser for DataModelParser {
    type Output = DataModel;

    const ARTIFACT: &'static str = "data-model.md";

    fn parse(&self, source: &str) -> Option<Self::Output> {
        parse_data_model(source)
    }

    fn recovery_command(&self) -> Option<&'static str> {
        Some("/data-model")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_entities_and_relationships() {
        let md = "# Data Model\n\n## Entities\n\n### Invoice\nA bill sent to a customer.\n\n### Customer\nSomeone who buys.\n\n## Relationships\n\n- Customer has many Invoice\n- Invoice belongs to Customer\n";
        let model = parse_data_model(md).unwrap();
        assert_eq!(
            model.entities,
            vec![
                Entity {
                    name: "Invoice".to_string(),
                    description: "A bill sent to a customer.".to_string()
                },
                Entity {
                    name: "Customer".to_string(),
                    description: "Someone who buys.".to_string()
                },
            ]
        );
        assert_eq!(
            model.relationships,
            vec!["Customer has many Invoice", "Invoice belongs to Customer"]
        );
    }

    #[test]
    fn relationships_only() {
        let model = parse_data_model("## Relationships\n- A has B\n").unwrap();
        assert!(model.entities.is_empty());
        assert_eq!(model.relationships.len(), 1);
    }

    #[test]
    fn entity_headings_outside_entities_are_ignored() {
        let md = "# Data Model\n### Stray\nNot an entity.\n";
        assert!(parse_data_model(md).is_none());
    }

    #[test]
    fn empty_sections_are_absent() {
        assert!(parse_data_model("# Data Model\n## Entities\n## Relationships\n").is_none());
    }
}
