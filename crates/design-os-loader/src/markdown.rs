//! Markdown section extraction
//!
//! Structural extraction only, no rendering. Heading boundaries come from
//! pulldown-cmark, so headings inside code blocks or HTML are not
//! boundaries. Only ATX headings written at the start of a line count:
//! - `#` document title, `##` named section, `###` sub-item
//! - bullets use the `- ` prefix
//!
//! Bodies are sliced from the raw source between heading offsets. A named
//! section spans from its `##` heading to the next `#` or `##` heading (or
//! end of document). `###` and deeper headings stay inside.

use pulldown_cmark::{Event, Parser, Tag};

/// A `###` heading with its body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubSection<'a> {
    /// Heading text, trimmed
    pub title: &'a str,
    /// Text until the next heading of level 3 or above, trimmed
    pub body: &'a str,
}

/// ATX heading located in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Heading<'a> {
    level: usize,
    title: &'a str,
    /// Offset of the first `#`
    start: usize,
    /// Offset just past the heading text, before the line break
    end: usize,
}

/// ATX headings of a document in source order
fn headings(md: &str) -> Vec<Heading<'_>> {
    Parser::new(md)
        .into_offset_iter()
        .filter_map(|(event, range)| match event {
            Event::Start(Tag::Heading { level, .. }) => atx_heading(md, range.start, level as usize),
            _ => None,
        })
        .collect()
}

/// Heading at `start` if the source there is `level` hashes at line start
///
/// Rejects setext headings and headings nested in quotes or list items.
fn atx_heading(md: &str, start: usize, level: usize) -> Option<Heading<'_>> {
    if start > 0 && md.as_bytes()[start - 1] != b'\n' {
        return None;
    }
    let end = md[start..].find('\n').map_or(md.len(), |offset| start + offset);
    let line = md[start..end].trim_end_matches('\r');
    let rest = line.strip_prefix("#".repeat(level).as_str())?;
    if rest.starts_with(|c: char| !c.is_whitespace()) {
        return None;
    }
    Some(Heading {
        level,
        title: rest.trim(),
        start,
        end: start + line.len(),
    })
}

/// Title from the first top-level `# ` heading
#[must_use]
pub fn document_title(md: &str) -> Option<&str> {
    headings(md)
        .into_iter()
        .find(|h| h.level == 1 && !h.title.is_empty())
        .map(|h| h.title)
}

/// Block of text under `## <heading>`, trimmed
///
/// Returns `None` when the heading is absent and `Some("")` when the heading
/// is present but has no content before the next `#`/`##` heading.
#[must_use]
pub fn extract_section<'a>(md: &'a str, heading: &str) -> Option<&'a str> {
    let all = headings(md);
    let index = all.iter().position(|h| h.level == 2 && h.title == heading)?;
    let body_start = all[index].end;
    let body_end = all[index + 1..]
        .iter()
        .find(|h| h.level <= 2)
        .map_or(md.len(), |h| h.start);

    Some(md[body_start..body_end].trim())
}

/// Items of a `- ` bullet list, marker stripped
#[must_use]
pub fn bullet_items(block: &str) -> Vec<String> {
    block
        .lines()
        .filter_map(|line| line.trim().strip_prefix("- "))
        .map(|item| item.trim().to_string())
        .collect()
}

/// Bullets of a named section; `None` if the heading is absent
#[must_use]
pub fn section_bullets(md: &str, heading: &str) -> Option<Vec<String>> {
    extract_section(md, heading).map(bullet_items)
}

/// Every `###` heading in `md` with the text that follows it
///
/// A body ends at the next heading of level 1 to 3.
#[must_use]
pub fn sub_sections(md: &str) -> Vec<SubSection<'_>> {
    let boundaries: Vec<Heading<'_>> = headings(md).into_iter().filter(|h| h.level <= 3).collect();

    boundaries
        .iter()
        .enumerate()
        .filter(|(_, h)| h.level == 3)
        .map(|(i, h)| {
            let body_end = boundaries.get(i + 1).map_or(md.len(), |next| next.start);
            SubSection {
                title: h.title,
                body: md[h.end..body_end].trim(),
            }
        })
        .collect()
}

/// Outcome of looking up a named section, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionPresence {
    /// Heading not found
    Missing,
    /// Heading found but yielded nothing
    Empty,
    /// Heading found with content
    Present,
}

impl SectionPresence {
    /// Classify a lookup given whether its content is usable
    #[must_use]
    pub fn of<T>(found: Option<T>, has_content: impl FnOnce(&T) -> bool) -> Self {
        match found {
            None => Self::Missing,
            Some(value) => {
                if has_content(&value) {
                    Self::Present
                } else {
                    Self::Empty
                }
            }
        }
    }
}
