use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::{slugify, CategoryEntry, PricingModel, ToolEntry};

#[derive(Debug, Clone, Default)]
pub struct Filters {
    /// Case-insensitive substring over name, description, and tags.
    pub search: Option<String>,
    /// Slugified category id; `all` (or empty) matches everything.
    pub category: Option<String>,
    /// Non-empty list restricts to these pricing models.
    pub pricing_models: Vec<PricingModel>,
}

/// Apply the search, category, and pricing predicates (logical AND) over
/// the tool list. Pure; source order is preserved.
pub fn filter_tools<'a>(tools: &'a [ToolEntry], filters: &Filters) -> Vec<&'a ToolEntry> {
    tools.iter().filter(|tool| matches(tool, filters)).collect()
}

fn matches(tool: &ToolEntry, filters: &Filters) -> bool {
    if let Some(search) = filters.search.as_deref().filter(|s| !s.is_empty()) {
        let needle = search.to_lowercase();
        let haystack = format!(
            "{} {} {}",
            tool.name,
            tool.description,
            tool.tags.join(" ")
        )
        .to_lowercase();
        if !haystack.contains(&needle) {
            return false;
        }
    }

    if let Some(category) = filters
        .category
        .as_deref()
        .filter(|c| !c.is_empty() && *c != "all")
    {
        if slugify(&tool.category) != category {
            return false;
        }
    }

    if !filters.pricing_models.is_empty() && !filters.pricing_models.contains(&tool.pricing_model)
    {
        return false;
    }

    true
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_tools: usize,
    pub total_categories: usize,
    pub free_tools: usize,
    pub freemium_tools: usize,
    pub last_updated: DateTime<Utc>,
}

pub fn catalog_stats(
    tools: &[ToolEntry],
    categories: &[CategoryEntry],
    last_updated: Option<DateTime<Utc>>,
) -> CatalogStats {
    CatalogStats {
        total_tools: tools.len(),
        total_categories: categories.len(),
        free_tools: count_pricing(tools, PricingModel::Free),
        freemium_tools: count_pricing(tools, PricingModel::Freemium),
        last_updated: last_updated.unwrap_or_else(Utc::now),
    }
}

fn count_pricing(tools: &[ToolEntry], model: PricingModel) -> usize {
    tools.iter().filter(|t| t.pricing_model == model).count()
}

// ── Tests ──
