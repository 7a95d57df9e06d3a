//! Shell props assembly
//!
//! The shell spec doubles as a small configuration DSL. Four optional
//! sections are read independently:
//!
//! ```text
//! ## Context Selector
//! type: organization
//! label: "Select Organization"
//! position: header-left
//! items:
//!   - { id: "org-1", name: "Acme Corp", icon: "building" }
//!
//! ## Breadcrumbs
//! mode: manual
//! default:
//!   - { label: "Home", href: "/" }
//! sections:
//!   invoices:
//!     - { label: "Billing", href: "/billing" }
//!
//! ## Header Actions
//! - { id: "notifications", icon: "bell", badge: 3 }
//!
//! ## Layout Pattern
//! variant: sidebar
//! ```
//!
//! Fields inside `{ ... }` literals are extracted one regex at a time. A
//! field that does not match is omitted; it never discards the whole item.

use crate::markdown::extract_section;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        static $name: Lazy<Regex> =
            Lazy::new(|| Regex::new($re).expect(concat!(stringify!($name), " is valid")));
    };
}

pattern!(TYPE_RE, r"(?i)type:\s*(\w+)");
pattern!(LABEL_LINE_RE, r#"(?i)label:\s*"?([^"\n]+)"?"#);
pattern!(POSITION_RE, r"(?i)position:\s*([\w-]+)");
pattern!(MODE_RE, r"(?i)mode:\s*(\w+)");
pattern!(DEFAULT_START_RE, r"(?i)default:\s*\n");
pattern!(SECTIONS_MARK_RE, r"(?i)sections:");
pattern!(SECTIONS_START_RE, r"(?i)sections:\s*\n");
pattern!(SECTION_BLOCK_RE, r"(\w[\w-]*):\s*\n((?:\s+-[^\n]+\n?)+)");
pattern!(VARIANT_RE, r"(?i)variant:\s*(\w+)");
pattern!(ID_FIELD_RE, r#"id:\s*"([^"]+)""#);
pattern!(NAME_FIELD_RE, r#"name:\s*"([^"]+)""#);
pattern!(ICON_FIELD_RE, r#"icon:\s*"([^"]+)""#);
pattern!(LABEL_FIELD_RE, r#"label:\s*"([^"]+)""#);
pattern!(HREF_FIELD_RE, r#"href:\s*"([^"]+)""#);
pattern!(BADGE_FIELD_RE, r"badge:\s*(true|\d+)");
pattern!(TYPE_FIELD_RE, r#"type:\s*"?(\w+)"?"#);

fn capture<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn owned(re: &Regex, text: &str) -> Option<String> {
    capture(re, text).map(str::to_string)
}

/// Bullet lines of a block that mention `field:`
fn literal_lines<'a>(block: &'a str, field: &'a str) -> impl Iterator<Item = &'a str> {
    block
        .lines()
        .map(str::trim)
        .filter(move |line| line.starts_with('-') && line.contains(field))
}

/// What the context selector switches between
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContextKind {
    /// Organizations
    #[default]
    Organization,
    /// Clients
    Client,
    /// Workspaces
    Workspace,
    /// Projects
    Project,
}

impl ContextKind {
    fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "organization" => Some(Self::Organization),
            "client" => Some(Self::Client),
            "workspace" => Some(Self::Workspace),
            "project" => Some(Self::Project),
            _ => None,
        }
    }
}

/// Where the context selector is placed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContextPosition {
    /// Left side of the header
    #[default]
    HeaderLeft,
    /// Top of the sidebar
    SidebarTop,
    /// Bottom of the sidebar
    SidebarBottom,
}

impl ContextPosition {
    fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "header-left" => Some(Self::HeaderLeft),
            "sidebar-top" => Some(Self::SidebarTop),
            "sidebar-bottom" => Some(Self::SidebarBottom),
            _ => None,
        }
    }
}

/// Selectable context entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextItem {
    /// Identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Icon name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl ContextItem {
    fn placeholder(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            icon: Some("building".to_string()),
        }
    }
}

/// Default context selector label
pub const DEFAULT_CONTEXT_LABEL: &str = "Select Organization";

/// Context selector configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextSelectorConfig {
    /// Kind of context
    #[serde(rename = "type")]
    pub kind: ContextKind,
    /// Label shown on the control
    pub label: String,
    /// Placement
    pub position: ContextPosition,
    /// Entries; never empty
    pub items: Vec<ContextItem>,
}

/// Parse `## Context Selector`; `None` when the section is absent
///
/// When no item parses, two placeholder organizations are substituted so a
/// preview never renders an empty selector.
#[must_use]
pub fn parse_context_selector(md: &str) -> Option<ContextSelectorConfig> {
    let block = extract_section(md, "Context Selector")?;

    let kind = capture(&TYPE_RE, block)
        .and_then(ContextKind::from_word)
        .unwrap_or_default();
    let label = capture(&LABEL_LINE_RE, block)
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .unwrap_or(DEFAULT_CONTEXT_LABEL)
        .to_string();
    let position = capture(&POSITION_RE, block)
        .and_then(ContextPosition::from_word)
        .unwrap_or_default();

    let mut items: Vec<ContextItem> = literal_lines(block, "id:")
        .filter_map(|line| {
            Some(ContextItem {
                id: owned(&ID_FIELD_RE, line)?,
                name: owned(&NAME_FIELD_RE, line)?,
                icon: owned(&ICON_FIELD_RE, line),
            })
        })
        .collect();

    if items.is_empty() {
        items = vec![
            ContextItem::placeholder("org-1", "Acme Corporation"),
            ContextItem::placeholder("org-2", "Globex Inc"),
        ];
    }

    Some(ContextSelectorConfig {
        kind,
        label,
        position,
        items,
    })
}

/// How breadcrumbs are produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BreadcrumbMode {
    /// Derived from the route
    Auto,
    /// Listed in the shell spec
    #[default]
    Manual,
    /// Hidden
    None,
}

impl BreadcrumbMode {
    fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "manual" => Some(Self::Manual),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

/// One breadcrumb
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbItem {
    /// Text
    pub label: String,
    /// Link target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Icon name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl BreadcrumbItem {
    /// Breadcrumb with a label only
    #[must_use]
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: None,
            icon: None,
        }
    }

    /// Breadcrumb with a link
    #[must_use]
    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            ..Self::label(label)
        }
    }
}

fn breadcrumb_items(block: &str) -> Vec<BreadcrumbItem> {
    literal_lines(block, "label:")
        .filter_map(|line| {
            Some(BreadcrumbItem {
                label: owned(&LABEL_FIELD_RE, line)?,
                href: owned(&HREF_FIELD_RE, line),
                icon: owned(&ICON_FIELD_RE, line),
            })
        })
        .collect()
}

/// Breadcrumb configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbConfig {
    /// Mode
    pub mode: BreadcrumbMode,
    /// Trail used when no section-specific one exists; never empty
    pub default: Vec<BreadcrumbItem>,
    /// Trails keyed by section id
    pub sections: IndexMap<String, Vec<BreadcrumbItem>>,
}

impl BreadcrumbConfig {
    /// Trail for a section, falling back to the default
    #[must_use]
    pub fn trail_for(&self, section_id: Option<&str>) -> &[BreadcrumbItem] {
        section_id
            .and_then(|id| self.sections.get(id))
            .unwrap_or(&self.default)
    }
}

/// Parse `## Breadcrumbs`; `None` when the section is absent
#[must_use]
pub fn parse_breadcrumb_config(md: &str) -> Option<BreadcrumbConfig> {
    let block = extract_section(md, "Breadcrumbs")?;

    let mode = capture(&MODE_RE, block)
        .and_then(BreadcrumbMode::from_word)
        .unwrap_or_default();

    let mut default = DEFAULT_START_RE
        .find(block)
        .map(|start| {
            let rest = &block[start.end()..];
            let end = SECTIONS_MARK_RE.find(rest).map_or(rest.len(), |m| m.start());
            breadcrumb_items(&rest[..end])
        })
        .unwrap_or_default();
    if default.is_empty() {
        default.push(BreadcrumbItem::link("Home", "/"));
    }

    let mut sections = IndexMap::new();
    if let Some(start) = SECTIONS_START_RE.find(block) {
        // the trimmed block may have lost the final newline
        let rest = format!("{}\n", &block[start.end()..]);
        for caps in SECTION_BLOCK_RE.captures_iter(&rest) {
            let trail = breadcrumb_items(&caps[2]);
            if !trail.is_empty() {
                sections.insert(caps[1].to_string(), trail);
            }
        }
    }

    Some(BreadcrumbConfig {
        mode,
        default,
        sections,
    })
}

/// Header action badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Badge {
    /// Dot without a number
    Flag(bool),
    /// Counter
    Count(u64),
}

/// Kind of header control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderActionKind {
    /// Plain button
    Button,
    /// Search field
    Search,
    /// Dropdown menu
    Dropdown,
}

impl HeaderActionKind {
    fn from_word(word: &str) -> Option<Self> {
        match word {
            "button" => Some(Self::Button),
            "search" => Some(Self::Search),
            "dropdown" => Some(Self::Dropdown),
            _ => None,
        }
    }
}

/// Header button or control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderAction {
    /// Identifier
    pub id: String,
    /// Icon name
    pub icon: String,
    /// Text label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Badge
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
    /// Control kind
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<HeaderActionKind>,
    /// Link target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// Parse `## Header Actions`; `None` when absent or no action parses
///
/// `id` and `icon` are required per line.
#[must_use]
pub fn parse_header_actions(md: &str) -> Option<Vec<HeaderAction>> {
    let block = extract_section(md, "Header Actions")?;

    let actions: Vec<HeaderAction> = literal_lines(block, "id:")
        .filter_map(|line| {
            let badge = capture(&BADGE_FIELD_RE, line).and_then(|raw| match raw {
                "true" => Some(Badge::Flag(true)),
                count => count.parse().ok().map(Badge::Count),
            });
            Some(HeaderAction {
                id: owned(&ID_FIELD_RE, line)?,
                icon: owned(&ICON_FIELD_RE, line)?,
                label: owned(&LABEL_FIELD_RE, line),
                badge,
                kind: capture(&TYPE_FIELD_RE, line).and_then(HeaderActionKind::from_word),
                href: owned(&HREF_FIELD_RE, line),
            })
        })
        .collect();

    (!actions.is_empty()).then_some(actions)
}

/// Overall shell layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutVariant {
    /// Side navigation
    Sidebar,
    /// Top navigation bar
    Topnav,
    /// No persistent navigation
    Minimal,
}

/// Layout variant from `## Layout Pattern`
///
/// An explicit `variant:` line wins; otherwise keywords in the description
/// are sniffed in the order sidebar, top nav, minimal.
#[must_use]
pub fn parse_layout_variant(md: &str) -> Option<LayoutVariant> {
    let block = extract_section(md, "Layout Pattern")?.to_lowercase();

    let explicit = capture(&VARIANT_RE, &block).and_then(|word| match word {
        "sidebar" => Some(LayoutVariant::Sidebar),
        "topnav" => Some(LayoutVariant::Topnav),
        "minimal" => Some(LayoutVariant::Minimal),
        _ => None,
    });
    if explicit.is_some() {
        return explicit;
    }

    if block.contains("sidebar") {
        Some(LayoutVariant::Sidebar)
    } else if ["top nav", "topnav", "horizontal"]
        .iter()
        .any(|word| block.contains(word))
    {
        Some(LayoutVariant::Topnav)
    } else if block.contains("minimal") || block.contains("simple") {
        Some(LayoutVariant::Minimal)
    } else {
        None
    }
}

/// Props handed to the app shell for one preview
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellProps {
    /// Context selector
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_selector: Option<ContextSelectorConfig>,
    /// Breadcrumb trail for the current section and view
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breadcrumbs: Option<Vec<BreadcrumbItem>>,
    /// Header controls
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_actions: Option<Vec<HeaderAction>>,
    /// Layout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_variant: Option<LayoutVariant>,
    /// Current section id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_section: Option<String>,
    /// Current view name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_view: Option<String>,
}

impl ShellProps {
    /// Whether no prop is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Assemble shell props from the shell spec
///
/// Returns empty props when the spec is absent or blank. Section-specific
/// breadcrumbs replace the default trail, and `view_name` is appended as a
/// final unlinked crumb.
#[must_use]
pub fn shell_props(md: Option<&str>, section_id: Option<&str>, view_name: Option<&str>) -> ShellProps {
    let Some(md) = md.filter(|md| !md.trim().is_empty()) else {
        return ShellProps::default();
    };

    let context_selector = parse_context_selector(md);
    let header_actions = parse_header_actions(md);
    let layout_variant = parse_layout_variant(md);

    let breadcrumbs = parse_breadcrumb_config(md)
        .filter(|config| config.mode != BreadcrumbMode::None)
        .map(|config| {
            let mut trail = config.trail_for(section_id).to_vec();
            if let Some(view) = view_name {
                trail.push(BreadcrumbItem::label(view));
            }
            trail
        })
        .filter(|trail| !trail.is_empty());

    tracing::debug!(
        section_id,
        view_name,
        has_context_selector = context_selector.is_some(),
        breadcrumbs = breadcrumbs.as_ref().map_or(0, Vec::len),
        header_actions = header_actions.as_ref().map_or(0, Vec::len),
        ?layout_variant,
        "assembled shell props"
    );

    ShellProps {
        context_selector,
        breadcrumbs,
        header_actions,
        layout_variant,
        current_section: section_id.map(str::to_string),
        current_view: view_name.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SPEC: &str = r#"# Shell

## Context Selector
type: workspace
label: "Pick a workspace"
position: sidebar-top
items:
  - { id: "ws-1", name: "Main", icon: "box" }
  - { id: "ws-2", name: "Side" }
  - { id: "ws-3" }

## Breadcrumbs
mode: manual
default:
  - { label: "Home", href: "/" }
  - { label: "App" }
sections:
  invoices:
    - { label: "Billing", href: "/billing" }
    - { label: "Invoices", href: "/sections/invoices" }
  team-members:
    - { label: "People" }

## Header Actions
- { id: "notifications", icon: "bell", badge: true }
- { id: "inbox", icon: "mail", badge: 12, type: "dropdown" }
- { id: "help", icon: "help-circle", label: "Help", href: "/help" }
- { id: "broken" }

## Layout Pattern
variant: topnav
"#;

    #[test]
    fn context_selector_fields() {
        let selector = parse_context_selector(SPEC).unwrap();
        assert_eq!(selector.kind, ContextKind::Workspace);
        assert_eq!(selector.label, "Pick a workspace");
        assert_eq!(selector.position, ContextPosition::SidebarTop);
        assert_eq!(
            selector.items,
            vec![
                ContextItem {
                    id: "ws-1".into(),
                    name: "Main".into(),
                    icon: Some("box".into())
                },
                ContextItem {
                    id: "ws-2".into(),
                    name: "Side".into(),
                    icon: None
                },
            ]
        );
    }

    #[test]
    fn context_selector_defaults_and_placeholders() {
        let selector = parse_context_selector("## Context Selector\ntype: galaxy\n").unwrap();
        assert_eq!(selector.kind, ContextKind::Organization);
        assert_eq!(selector.label, DEFAULT_CONTEXT_LABEL);
        assert_eq!(selector.position, ContextPosition::HeaderLeft);
        let names: Vec<&str> = selector.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Acme Corporation", "Globex Inc"]);
    }

    #[test]
    fn context_selector_absent_without_section() {
        assert!(parse_context_selector("# Shell\n## Overview\nx\n").is_none());
    }

    #[test]
    fn breadcrumb_config_sections() {
        let config = parse_breadcrumb_config(SPEC).unwrap();
        assert_eq!(config.mode, BreadcrumbMode::Manual);
        assert_eq!(
            config.default,
            vec![BreadcrumbItem::link("Home", "/"), BreadcrumbItem::label("App")]
        );
        assert_eq!(config.sections.len(), 2);
        assert_eq!(
            config.sections["invoices"],
            vec![
                BreadcrumbItem::link("Billing", "/billing"),
                BreadcrumbItem::link("Invoices", "/sections/invoices"),
            ]
        );
        assert_eq!(config.sections["team-members"], vec![BreadcrumbItem::label("People")]);
    }

    #[test]
    fn breadcrumb_default_falls_back_to_home() {
        let config = parse_breadcrumb_config("## Breadcrumbs\nmode: auto\n").unwrap();
        assert_eq!(config.mode, BreadcrumbMode::Auto);
        assert_eq!(config.default, vec![BreadcrumbItem::link("Home", "/")]);
        assert!(config.sections.is_empty());
    }

    #[test]
    fn header_actions_fields() {
        let actions = parse_header_actions(SPEC).unwrap();
        assert_eq!(actions.len(), 3);
        assert_eq!(actions[0].badge, Some(Badge::Flag(true)));
        assert_eq!(actions[1].badge, Some(Badge::Count(12)));
        assert_eq!(actions[1].kind, Some(HeaderActionKind::Dropdown));
        assert_eq!(actions[2].label.as_deref(), Some("Help"));
        assert_eq!(actions[2].href.as_deref(), Some("/help"));
        assert_eq!(actions[2].kind, None);
    }

    #[test]
    fn header_actions_absent_when_none_parse() {
        assert!(parse_header_actions("## Header Actions\n- { id: \"x\" }\n").is_none());
    }

    #[test]
    fn layout_variant_explicit_and_sniffed() {
        assert_eq!(parse_layout_variant(SPEC), Some(LayoutVariant::Topnav));
        assert_eq!(
            parse_layout_variant("## Layout Pattern\nA collapsible Sidebar.\n"),
            Some(LayoutVariant::Sidebar)
        );
        assert_eq!(
            parse_layout_variant("## Layout Pattern\nHorizontal bar.\n"),
            Some(LayoutVariant::Topnav)
        );
        assert_eq!(
            parse_layout_variant("## Layout Pattern\nKeep it simple.\n"),
            Some(LayoutVariant::Minimal)
        );
        assert_eq!(
            parse_layout_variant("## Layout Pattern\nvariant: grid\nJust content.\n"),
            None
        );
        assert_eq!(parse_layout_variant("# Shell\n"), None);
    }

    #[test]
    fn props_use_section_trail_and_append_view() {
        let props = shell_props(Some(SPEC), Some("invoices"), Some("Invoice List"));
        let labels: Vec<&str> = props
            .breadcrumbs
            .as_ref()
            .unwrap()
            .iter()
            .map(|b| b.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Billing", "Invoices", "Invoice List"]);
        assert_eq!(props.current_section.as_deref(), Some("invoices"));
        assert_eq!(props.current_view.as_deref(), Some("Invoice List"));
    }

    #[test]
    fn props_fall_back_to_default_trail() {
        let props = shell_props(Some(SPEC), Some("reports"), None);
        assert_eq!(props.breadcrumbs.unwrap().len(), 2);
    }

    #[test]
    fn props_hide_breadcrumbs_in_none_mode() {
        let props = shell_props(Some("## Breadcrumbs\nmode: none\n"), None, Some("View"));
        assert!(props.breadcrumbs.is_none());
    }

    #[test]
    fn props_empty_without_spec() {
        assert!(shell_props(None, Some("x"), Some("y")).is_empty());
        assert!(shell_props(Some("  \n"), None, None).is_empty());
    }

    #[test]
    fn props_serialize_without_absent_fields() {
        let props = shell_props(Some("## Layout Pattern\nvariant: minimal\n"), None, None);
        let json = serde_json::to_value(&props).unwrap();
        assert_eq!(json, serde_json::json!({"layoutVariant": "minimal"}));
    }
}
