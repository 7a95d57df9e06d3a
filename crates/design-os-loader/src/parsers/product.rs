//! Product overview and roadmap parsers

use super::{guarded, is_blank, ArtifactParser};
use crate::markdown::{bullet_items, document_title, extract_section, sub_sections};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Name used when the overview has no `#` heading
pub const DEFAULT_PRODUCT_NAME: &str = "Product Overview";

static PROBLEM_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^problem\s*\d*\s*[:.\-]\s*").expect("problem prefix pattern is valid"));

static NUMBERED_HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\.\s+(.+)$").expect("numbered heading pattern is valid"));

static NON_ALNUM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("slug pattern is valid"));

/// A problem the product solves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// Problem statement
    pub title: String,
    /// How the product solves it
    pub solution: String,
}

/// Parsed `product-overview.md`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOverview {
    /// Product name
    pub name: String,
    /// Description paragraph, may be empty
    pub description: String,
    /// Problems and their solutions
    pub problems: Vec<Problem>,
    /// Key features
    pub features: Vec<String>,
}

/// Roadmap entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Slug derived from the title
    pub id: String,
    /// Display title
    pub title: String,
    /// Body text under the heading
    pub description: String,
    /// Position from the `### N.` heading
    pub order: u32,
}

/// Parsed `product-roadmap.md`, sorted by `order`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRoadmap {
    /// Sections in ascending order
    pub sections: Vec<Section>,
}

/// Parse `product-overview.md`
///
/// Returns `None` unless at least one of description, problems or features
/// has content; a heading alone is not enough.
#[must_use]
pub fn parse_product_overview(md: &str) -> Option<ProductOverview> {
    if is_blank(md) {
        return None;
    }
    guarded(OverviewParser::ARTIFACT, || overview(md))
}

fn overview(md: &str) -> Option<ProductOverview> {
    let name = document_title(md).unwrap_or(DEFAULT_PRODUCT_NAME).to_string();
    let description = extract_section(md, "Description").unwrap_or_default().to_string();

    let problems: Vec<Problem> = extract_section(md, "Problems & Solutions")
        .map(sub_sections)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|sub| {
            let title = PROBLEM_PREFIX_RE.replace(sub.title, "").trim().to_string();
            let title = if title.is_empty() { sub.title.to_string() } else { title };
            if title.is_empty() || sub.body.is_empty() {
                tracing::debug!(heading = sub.title, "skipping problem without title or solution");
                return None;
            }
            Some(Problem {
                title,
                solution: sub.body.to_string(),
            })
        })
        .collect();

    let features = extract_section(md, "Key Features")
        .map(bullet_items)
        .unwrap_or_default()
        .into_iter()
        .filter(|feature| !feature.is_empty())
        .collect::<Vec<_>>();

    if description.is_empty() && problems.is_empty() && features.is_empty() {
        return None;
    }

    Some(ProductOverview {
        name,
        description,
        problems,
        features,
    })
}

/// Parse `product-roadmap.md`
///
/// Collects every `### N. Title` heading in the document, wherever it sits,
/// and sorts by `N`. After sorting, a section whose id or order was already
/// taken is dropped. Returns `None` when no numbered heading is found.
#[must_use]
pub fn parse_product_roadmap(md: &str) -> Option<ProductRoadmap> {
    if is_blank(md) {
        return None;
    }
    guarded(RoadmapParser::ARTIFACT, || roadmap(md))
}

fn roadmap(md: &str) -> Option<ProductRoadmap> {
    let mut sections: Vec<Section> = sub_sections(md)
        .into_iter()
        .filter_map(|sub| {
            let caps = NUMBERED_HEADING_RE.captures(sub.title)?;
            let order: u32 = caps[1].parse().ok().filter(|n| *n > 0)?;
            let title = caps[2].trim().to_string();
            let id = slugify(&title);
            if id.is_empty() {
                tracing::debug!(heading = sub.title, "skipping roadmap section with empty slug");
                return None;
            }
            Some(Section {
                id,
                title,
                description: sub.body.to_string(),
                order,
            })
        })
        .collect();

    if sections.is_empty() {
        return None;
    }

    sections.sort_by_key(|s| s.order);

    let mut seen_ids = HashSet::new();
    let mut seen_orders = HashSet::new();
    sections.retain(|section| {
        let unique = !seen_ids.contains(&section.id) && !seen_orders.contains(&section.order);
        if unique {
            seen_ids.insert(section.id.clone());
            seen_orders.insert(section.order);
        } else {
            tracing::debug!(
                id = %section.id,
                order = section.order,
                "dropping roadmap section with duplicate id or order"
            );
        }
        unique
    });

    Some(ProductRoadmap { sections })
}

/// Derive a slug from a title
///
/// Lowercases, replaces `&` with `and`, collapses runs of non-alphanumerics
/// into `-` and trims leading/trailing hyphens.
#[must_use]
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase().replace('&', "and");
    NON_ALNUM_RE
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// [`ArtifactParser`] for `product-overview.md`
#[derive(Debug, Clone, Copy, Default)]
pub struct OverviewParser;

impl ArtifactParser for OverviewParser {
    type Output = ProductOverview;

    const ARTIFACT: &'static str = "product-overview.md";

    fn parse(&self, source: &str) -> Option<Self::Output> {
        parse_product_overview(source)
    }

    fn recovery_command(&self) -> Option<&'static str> {
        Some("/product-vision")
    }
}

/// [`ArtifactParser`] for `product-roadmap.md`
#[derive(Debug, Clone, Copy, Default)]
pub struct RoadmapParser;

impl ArtifactParser for RoadmapParser {
    type Output = ProductRoadmap;

    const ARTIFACT: &'static str = "product-roadmap.md";

    fn parse(&self, source: &str) -> Option<Self::Output> {
        parse_product_roadmap(source)
    }

    fn recovery_command(&self) -> Option<&'static str> {
        Some("/product-roadmap")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn overview_with_only_description() {
        let result = parse_product_overview("# P\n\n## Description\nD.\n").unwrap();
        assert_eq!(
            result,
            ProductOverview {
                name: "P".to_string(),
                description: "D.".to_string(),
                problems: vec![],
                features: vec![],
            }
        );
    }

    #[test]
    fn overview_complete() {
        let md = "# My Product\n\n## Description\nA great product that does amazing things.\n\n## Problems & Solutions\n\n### Problem 1: Hard to manage tasks\nOur product provides an intuitive task management interface.\n\n### Problem 2: No collaboration\nBuilt-in team collaboration features.\n\n## Key Features\n- Feature one\n- Feature two\n- Feature three\n";
        let result = parse_product_overview(md).unwrap();

        assert_eq!(result.name, "My Product");
        assert_eq!(result.description, "A great product that does amazing things.");
        assert_eq!(result.problems.len(), 2);
        assert_eq!(result.problems[0].title, "Hard to manage tasks");
        assert_eq!(
            result.problems[0].solution,
            "Our product provides an intuitive task management interface."
        );
        assert_eq!(result.problems[1].title, "No collaboration");
        assert_eq!(result.features, vec!["Feature one", "Feature two", "Feature three"]);
    }

    #[test]
    fn overview_with_only_features() {
        let result = parse_product_overview("# Product\n\n## Key Features\n- Only has features\n").unwrap();
        assert_eq!(result.name, "Product");
        assert_eq!(result.description, "");
        assert_eq!(result.features.len(), 1);
    }

    #[test]
    fn overview_prose_only_is_absent() {
        assert!(parse_product_overview("# P\n\nSome prose, no sections.\n").is_none());
        assert!(parse_product_overview("# Product\n\n## Description\n\n## Key Features\n").is_none());
    }

    #[test]
    fn overview_without_title_uses_placeholder() {
        let result = parse_product_overview("## Description\nSomething.\n").unwrap();
        assert_eq!(result.name, DEFAULT_PRODUCT_NAME);
    }

    #[test]
    fn problem_without_solution_is_skipped() {
        let md = "# P\n## Problems & Solutions\n### Unsolved\n### Solved\nYes.\n";
        let result = parse_product_overview(md).unwrap();
        assert_eq!(
            result.problems,
            vec![Problem {
                title: "Solved".to_string(),
                solution: "Yes.".to_string()
            }]
        );
    }

    #[test]
    fn roadmap_parses_sections() {
        let md = "# Product Roadmap\n\n## Sections\n\n### 1. User Management\nHandle user registration and authentication.\n\n### 2. Dashboard\nMain dashboard for viewing metrics.\n\n### 3. Reports & Analytics\nGenerate and export reports.\n";
        let result = parse_product_roadmap(md).unwrap();

        assert_eq!(result.sections.len(), 3);
        assert_eq!(result.sections[0].id, "user-management");
        assert_eq!(result.sections[0].title, "User Management");
        assert_eq!(result.sections[0].order, 1);
        assert_eq!(
            result.sections[0].description,
            "Handle user registration and authentication."
        );
        assert_eq!(result.sections[2].id, "reports-and-analytics");
    }

    #[test]
    fn roadmap_sorts_by_order() {
        let md = "# Roadmap\n\n### 3. Third\nThird section.\n\n### 1. First\nFirst section.\n\n### 2. Second\nSecond section.\n";
        let orders: Vec<u32> = parse_product_roadmap(md)
            .unwrap()
            .sections
            .iter()
            .map(|s| s.order)
            .collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn roadmap_drops_duplicate_ids_and_orders() {
        let md = "### 1. Reports\nfirst\n\n### 2. Reports\nsecond\n\n### 2. Other\nthird\n\n### 3. Billing\nfourth\n";
        let sections = parse_product_roadmap(md).unwrap().sections;
        let kept: Vec<(&str, u32)> = sections.iter().map(|s| (s.id.as_str(), s.order)).collect();
        assert_eq!(kept, vec![("reports", 1), ("other", 2), ("billing", 3)]);
        assert_eq!(sections[0].description, "first");
    }

    #[test]
    fn roadmap_without_numbered_headings_is_absent() {
        assert!(parse_product_roadmap("# Product Roadmap\n\nJust some text.\n").is_none());
        assert!(parse_product_roadmap("# R\n### Unnumbered\nbody\n").is_none());
    }

    #[test]
    fn roadmap_ampersand_slug() {
        let result = parse_product_roadmap("# Roadmap\n\n### 1. Sales & Marketing\nSales.\n").unwrap();
        assert_eq!(result.sections[0].id, "sales-and-marketing");
        assert_eq!(result.sections[0].title, "Sales & Marketing");
    }

    #[test]
    fn slug_rules() {
        assert_eq!(slugify("Sales & Marketing"), "sales-and-marketing");
        assert_eq!(slugify("  --Hello,   World!!  "), "hello-world");
        assert_eq!(slugify("API v2"), "api-v2");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn reparse_is_deterministic() {
        let md = "# R\n### 2. B\nb\n### 1. A\na\n";
        assert_eq!(parse_product_roadmap(md), parse_product_roadmap(md));
    }
}
