use serde::{Deserialize, Serialize};
use url::Url;

use crate::parser::entries::RawEntry;
use crate::parser::infer;

const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingModel {
    Free,
    Freemium,
    Paid,
    Trial,
}

impl PricingModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingModel::Free => "free",
            PricingModel::Freemium => "freemium",
            PricingModel::Paid => "paid",
            PricingModel::Trial => "trial",
        }
    }
}

impl std::str::FromStr for PricingModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(PricingModel::Free),
            "freemium" => Ok(PricingModel::Freemium),
            "paid" => Ok(PricingModel::Paid),
            "trial" => Ok(PricingModel::Trial),
            other => Err(format!("unknown pricing model: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    pub url: String,
    pub domain: String,
    pub category: String,
    pub pricing_model: PricingModel,
    pub features: Vec<String>,
    pub logo_url: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub tools: Vec<ToolEntry>,
    pub categories: Vec<CategoryEntry>,
}

/// Assemble tool and category records from per-section raw entries. One
/// `CategoryEntry` is emitted for every section that survived segmentation,
/// including sections where no bullet matched (count 0). Encounter order is
/// preserved on both lists.
pub fn build_catalog(groups: Vec<(String, Vec<RawEntry>)>) -> Catalog {
    let mut tools = Vec::new();
    let mut categories = Vec::new();

    for (title, entries) in groups {
        let slug = slugify(&title);
        for (index, entry) in entries.iter().enumerate() {
            tools.push(build_tool(&title, &slug, index, entry));
        }
        categories.push(CategoryEntry {
            id: slug.clone(),
            name: title,
            slug,
            description: format!("{} tools available", entries.len()),
            count: entries.len(),
        });
    }

    Catalog { tools, categories }
}

fn build_tool(category: &str, category_slug: &str, index: usize, entry: &RawEntry) -> ToolEntry {
    let domain = extract_domain(&entry.url);
    let inferred = infer::infer(&entry.description, category);
    ToolEntry {
        id: format!("{category_slug}-{domain}-{index}"),
        name: entry.name.clone(),
        description: entry.description.clone(),
        url: entry.url.clone(),
        domain: domain.clone(),
        category: category.to_string(),
        pricing_model: inferred.pricing_model,
        features: inferred.features,
        logo_url: format!("{FAVICON_SERVICE}?domain={domain}&sz=180"),
        tags: inferred.tags,
    }
}

pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Hostname with the leading `www.` stripped. Scheme-relative and bare URLs
/// are defaulted to https before parsing; if parsing still fails, fall back
/// to stripping the scheme and taking everything up to the first slash.
pub fn extract_domain(url: &str) -> String {
    let candidate = if url.starts_with("//") {
        format!("https:{url}")
    } else if url.starts_with("http") {
        url.to_string()
    } else {
        format!("https://{url}")
    };

    if let Ok(parsed) = Url::parse(&candidate) {
        if let Some(host) = parsed.host_str() {
            return host.strip_prefix("www.").unwrap_or(host).to_string();
        }
    }

    let stripped = url
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    let stripped = stripped.strip_prefix("www.").unwrap_or(stripped);
    stripped.split('/').next().unwrap_or("").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, url: &str, description: &str) -> RawEntry {
        RawEntry {
            name: name.to_string(),
            url: url.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn domain_from_absolute_url() {
        assert_eq!(extract_domain("https://www.tool1.com/some/path"), "tool1.com");
        assert_eq!(extract_domain("http://tool2.io"), "tool2.io");
    }

    #[test]
    fn domain_from_bare_host() {
        assert_eq!(extract_domain("tool2.io/pricing"), "tool2.io");
    }

    #[test]
    fn domain_from_scheme_relative_url() {
        assert_eq!(extract_domain("//cdn.example.com/lib.js"), "cdn.example.com");
    }

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Major Cloud Providers"), "major-cloud-providers");
        assert_eq!(slugify("Email"), "email");
    }

    #[test]
    fn tool_id_logo_and_fields() {
        let groups = vec![(
            "Dev Tools".to_string(),
            vec![raw("Tool1", "https://www.tool1.com", "Free forever plan for small teams.")],
        )];
        let catalog = build_catalog(groups);
        assert_eq!(catalog.tools.len(), 1);

        let tool = &catalog.tools[0];
        assert_eq!(tool.id, "dev-tools-tool1.com-0");
        assert_eq!(tool.domain, "tool1.com");
        assert_eq!(tool.category, "Dev Tools");
        assert_eq!(
            tool.logo_url,
            "https://www.google.com/s2/favicons?domain=tool1.com&sz=180"
        );
        assert_eq!(tool.pricing_model, PricingModel::Freemium);
        assert!(tool.tags.contains(&"Dev Tools".to_string()));
    }

    #[test]
    fn ordinals_restart_per_category() {
        let groups = vec![
            (
                "First".to_string(),
                vec![
                    raw("A", "https://github.com/a", "Hosted git with a free plan."),
                    raw("B", "https://b.dev", "Another free service."),
                ],
            ),
            (
                "Second".to_string(),
                vec![raw("C", "https://github.com/c", "Hosted git with a free plan.")],
            ),
        ];
        let catalog = build_catalog(groups);
        let ids: Vec<&str> = catalog.tools.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["first-github.com-0", "first-b.dev-1", "second-github.com-0"]);
    }

    #[test]
    fn category_entries_in_order_with_counts() {
        let groups = vec![
            ("Web Hosting".to_string(), vec![raw("X", "https://x.dev", "Free plan.")]),
            ("Analytics".to_string(), Vec::new()),
        ];
        let catalog = build_catalog(groups);
        assert_eq!(catalog.categories.len(), 2);

        let hosting = &catalog.categories[0];
        assert_eq!(hosting.slug, "web-hosting");
        assert_eq!(hosting.id, hosting.slug);
        assert_eq!(hosting.count, 1);
        assert_eq!(hosting.description, "1 tools available");

        let analytics = &catalog.categories[1];
        assert_eq!(analytics.count, 0);
        assert_eq!(analytics.description, "0 tools available");
    }

    #[test]
    fn pricing_model_round_trips_through_serde() {
        let json = serde_json::to_string(&PricingModel::Freemium).unwrap();
        assert_eq!(json, "\"freemium\"");
        let parsed: PricingModel = serde_json::from_str("\"trial\"").unwrap();
        assert_eq!(parsed, PricingModel::Trial);
    }

    #[test]
    fn tool_entry_serializes_in_camel_case() {
        let groups = vec![(
            "Dev Tools".to_string(),
            vec![raw("Tool1", "https://tool1.com", "Free forever plan for small teams.")],
        )];
        let catalog = build_catalog(groups);
        let value = serde_json::to_value(&catalog.tools[0]).unwrap();
        assert!(value.get("pricingModel").is_some());
        assert!(value.get("logoUrl").is_some());
        assert!(value.get("pricing_model").is_none());
    }
}
