use crate::catalog::PricingModel;

// Ordered, case-insensitive substring patterns for pricing classification.
// Freemium phrases are checked first ("free tier", "up to" signal a tiered
// offering more strongly than a bare "free"), then trial ("free trial" must
// not classify as free), then the broad free phrases.
const FREEMIUM_PATTERNS: &[&str] = &[
    "free tier",
    "free plan",
    "free version",
    "starter plan",
    "basic plan",
    "limited free",
    "up to",
    "free forever",
];
const TRIAL_PATTERNS: &[&str] = &["free trial", "trial", "demo", "evaluation", "test drive"];
const FREE_PATTERNS: &[&str] = &[
    "free",
    "no cost",
    "at no charge",
    "without charge",
    "gratis",
    "complimentary",
    "no fee",
    "zero cost",
];

/// Tag vocabulary, scanned in priority order.
const TAG_VOCABULARY: &[&str] = &[
    "API",
    "CLI",
    "Dashboard",
    "Mobile",
    "Web",
    "Cloud",
    "Open Source",
    "SaaS",
    "Self-hosted",
    "No-code",
    "Analytics",
    "Monitoring",
    "SSL",
    "CDN",
    "Storage",
    "Database",
    "Authentication",
    "Email",
    "Hosting",
];

const MAX_FEATURES: usize = 3;
const MAX_TAGS: usize = 5;

pub struct InferredAttributes {
    pub pricing_model: PricingModel,
    pub features: Vec<String>,
    pub tags: Vec<String>,
}

pub fn infer(description: &str, category: &str) -> InferredAttributes {
    InferredAttributes {
        pricing_model: classify_pricing(description),
        features: extract_features(description),
        tags: extract_tags(description, category),
    }
}

fn classify_pricing(description: &str) -> PricingModel {
    let lower = description.to_lowercase();
    if FREEMIUM_PATTERNS.iter().any(|p| lower.contains(p)) {
        PricingModel::Freemium
    } else if TRIAL_PATTERNS.iter().any(|p| lower.contains(p)) {
        PricingModel::Trial
    } else if FREE_PATTERNS.iter().any(|p| lower.contains(p)) {
        PricingModel::Free
    } else {
        // Most catalog entries describe tiered commercial services.
        PricingModel::Freemium
    }
}

/// Sentence fragments with trimmed length strictly between 10 and 100
/// characters, first three in source order. Shorter fragments are noise,
/// longer ones are run-on or malformed splits.
fn extract_features(description: &str) -> Vec<String> {
    description
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| s.len() > 10 && s.len() < 100)
        .take(MAX_FEATURES)
        .map(str::to_string)
        .collect()
}

/// Vocabulary tags in scan order, with the category title always included.
/// One slot is reserved for the category so the cap never drops it.
fn extract_tags(description: &str, category: &str) -> Vec<String> {
    let lower = description.to_lowercase();
    let mut tags: Vec<String> = TAG_VOCABULARY
        .iter()
        .filter(|tag| lower.contains(&tag.to_lowercase()))
        .map(|tag| tag.to_string())
        .collect();

    if tags.iter().any(|t| t == category) {
        tags.truncate(MAX_TAGS);
    } else {
        tags.truncate(MAX_TAGS - 1);
        tags.push(category.to_string());
    }
    tags
}
