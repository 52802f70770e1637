use std::sync::LazyLock;

use regex::Regex;

static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\*\s+\[([^\]]+)\]\(([^)]+)\)\s+[-—]\s*(.+)$").unwrap());

#[derive(Debug, Clone)]
pub struct RawEntry {
    pub name: String,
    pub url: String,
    pub description: String,
}

/// Match each line against the `* [Name](URL) - Description` convention.
/// Lines that do not match are skipped, not errors: the source document is
/// hand-authored and inconsistently formatted. Returns the entries plus the
/// number of skipped non-empty lines for diagnostics.
pub fn extract_entries(body: &str) -> (Vec<RawEntry>, usize) {
    let mut entries = Vec::new();
    let mut skipped = 0;

    for line in body.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match BULLET_RE.captures(line) {
            Some(caps) => entries.push(RawEntry {
                name: caps[1].trim().to_string(),
                url: caps[2].trim().to_string(),
                description: caps[3].trim().to_string(),
            }),
            None => skipped += 1,
        }
    }

    (entries, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hyphen_separated_entry() {
        let (entries, skipped) =
            extract_entries("* [Netlify](https://www.netlify.com/) - Free static hosting.");
        assert_eq!(entries.len(), 1);
        assert_eq!(skipped, 0);
        assert_eq!(entries[0].name, "Netlify");
        assert_eq!(entries[0].url, "https://www.netlify.com/");
        assert_eq!(entries[0].description, "Free static hosting.");
    }

    #[test]
    fn parses_em_dash_separated_entry() {
        let (entries, _) = extract_entries("* [Render](https://render.com) — Free tier for sites.");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].description, "Free tier for sites.");
    }

    #[test]
    fn accepts_indented_bullets() {
        let (entries, _) = extract_entries("   * [Tool](https://tool.dev) - Something useful.");
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn trims_captured_fields() {
        let (entries, _) = extract_entries("* [ Padded Name ](https://x.com) -   spaced out.  ");
        assert_eq!(entries[0].name, "Padded Name");
        assert_eq!(entries[0].url, "https://x.com");
        assert_eq!(entries[0].description, "spaced out.");
    }

    #[test]
    fn skips_non_matching_lines_and_counts_them() {
        let body = "\
Some prose about this category.

* [Good](https://good.dev) - A matching entry with a description.
* [No separator](https://bad.dev) missing the hyphen
* plain bullet without a link
* [Another](https://another.dev) - Second matching entry.";
        let (entries, skipped) = extract_entries(body);
        assert_eq!(entries.len(), 2);
        assert_eq!(skipped, 3);
        assert_eq!(entries[0].name, "Good");
        assert_eq!(entries[1].name, "Another");
    }

    #[test]
    fn blank_lines_are_not_counted_as_skipped() {
        let (entries, skipped) = extract_entries("\n\n\n");
        assert!(entries.is_empty());
        assert_eq!(skipped, 0);
    }
}
