use std::sync::LazyLock;

use regex::Regex;

static CATEGORY_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^##\s+(.+)$").unwrap());

/// Minimum body length for a section to count as content. Shorter blocks
/// are navigation anchors or placeholders.
const MIN_BODY_LEN: usize = 50;

const SKIP_TITLE_MARKERS: &[&str] = &["table of contents", "back to top"];

#[derive(Debug, Clone)]
pub struct Section {
    pub title: String,
    pub body: String,
}

/// Split the document on `##` headings into titled category sections,
/// dropping navigation and undersized blocks. `###` and deeper headings stay
/// inside the enclosing body. Source order is preserved; text before the
/// first `##` heading is ignored.
pub fn split_sections(markdown: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in markdown.lines() {
        if let Some(caps) = CATEGORY_HEADING_RE.captures(line) {
            if let Some((title, body)) = current.take() {
                push_if_content(&mut sections, title, body);
            }
            current = Some((caps[1].trim().to_string(), Vec::new()));
        } else if let Some((_, body)) = current.as_mut() {
            body.push(line);
        }
    }
    if let Some((title, body)) = current {
        push_if_content(&mut sections, title, body);
    }

    sections
}

fn push_if_content(sections: &mut Vec<Section>, title: String, body_lines: Vec<&str>) {
    let lower = title.to_lowercase();
    if SKIP_TITLE_MARKERS.iter().any(|m| lower.contains(m)) {
        return;
    }
    let body = body_lines.join("\n");
    if body.len() < MIN_BODY_LEN {
        return;
    }
    sections.push(Section { title, body });
}
