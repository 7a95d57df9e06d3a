//! Route breadcrumbs for the preview application's own pages

use crate::shell_props::BreadcrumbItem;

/// Route parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteParams<'a> {
    /// `:sectionId`
    pub section_id: Option<&'a str>,
    /// `:screenDesignName`
    pub screen_design_name: Option<&'a str>,
}

/// Display labels resolved by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteLabels<'a> {
    /// Section title replacing the raw id
    pub section_title: Option<&'a str>,
}

/// Breadcrumbs for a route path such as `/sections/invoices/screen-designs/List`
///
/// Unknown routes yield no breadcrumbs.
#[must_use]
pub fn generate_breadcrumbs(path: &str, params: RouteParams<'_>, labels: RouteLabels<'_>) -> Vec<BreadcrumbItem> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let mut items = Vec::new();

    match segments.first().copied() {
        Some("sections") => {
            items.push(BreadcrumbItem::link("Sections", "/sections"));
            if let Some(section_id) = params.section_id {
                let label = labels.section_title.unwrap_or(section_id);
                items.push(BreadcrumbItem::link(label, format!("/sections/{section_id}")));
            }
            if let Some(name) = params.screen_design_name {
                if segments.contains(&"screen-designs") {
                    items.push(BreadcrumbItem::label("Screen Designs"));
                    items.push(BreadcrumbItem::label(name));
                }
            }
        }
        Some("shell") => {
            items.push(BreadcrumbItem::link("Design", "/design"));
            items.push(BreadcrumbItem::label("Shell Design"));
        }
        Some("data-model") => items.push(BreadcrumbItem::label("Data Model")),
        Some("design") => items.push(BreadcrumbItem::label("Design System")),
        Some("export") => items.push(BreadcrumbItem::label("Export")),
        _ => {}
    }

    items
}
