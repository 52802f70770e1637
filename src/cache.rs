use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::catalog::{Catalog, CategoryEntry, ToolEntry};
use crate::fetcher::DocumentSource;
use crate::parser;

/// Wall-clock abstraction so cache expiry is testable with a fixed now.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

struct CachedCatalog {
    catalog: Catalog,
    timestamp: DateTime<Utc>,
}

/// Snapshot handed to callers. `last_updated` is None when the pipeline
/// degraded to an empty catalog.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub tools: Vec<ToolEntry>,
    pub categories: Vec<CategoryEntry>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Single-slot, whole-dataset cache over the fetch → parse pipeline. The
/// slot mutex is held across a rebuild, so concurrent cold reads trigger
/// exactly one fetch.
pub struct CatalogCache<S, C> {
    source: S,
    clock: C,
    ttl: Duration,
    slot: Mutex<Option<CachedCatalog>>,
}

impl<S: DocumentSource, C: Clock> CatalogCache<S, C> {
    pub fn new(source: S, clock: C) -> Self {
        Self {
            source,
            clock,
            ttl: Duration::hours(1),
            slot: Mutex::new(None),
        }
    }

    /// Return the cached catalog while it is fresh, otherwise rebuild. A
    /// total fetch failure degrades to an empty catalog instead of an
    /// error; the slot stays unpopulated so the next call retries.
    pub async fn get(&self) -> CatalogSnapshot {
        let mut slot = self.slot.lock().await;

        if let Some(cached) = slot.as_ref() {
            if self.clock.now() - cached.timestamp < self.ttl {
                return CatalogSnapshot {
                    tools: cached.catalog.tools.clone(),
                    categories: cached.catalog.categories.clone(),
                    last_updated: Some(cached.timestamp),
                };
            }
            info!("Cached catalog expired, rebuilding");
        }

        match self.source.fetch().await {
            Ok(raw) => {
                let catalog = parser::parse_document(&raw);
                let timestamp = self.clock.now();
                info!(
                    "Catalog rebuilt: {} tools in {} categories",
                    catalog.tools.len(),
                    catalog.categories.len()
                );
                let snapshot = CatalogSnapshot {
                    tools: catalog.tools.clone(),
                    categories: catalog.categories.clone(),
                    last_updated: Some(timestamp),
                };
                *slot = Some(CachedCatalog { catalog, timestamp });
                snapshot
            }
            Err(e) => {
                warn!("Document fetch failed, serving empty catalog: {:#}", e);
                CatalogSnapshot {
                    tools: Vec::new(),
                    categories: Vec::new(),
                    last_updated: None,
                }
            }
        }
    }
}

// ── Tests ──
