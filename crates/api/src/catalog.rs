//! Extension catalog client.
//!
//! Fetches the add-on product list from the configured `CATALOG_URL` and
//! caches it in memory for the TTL defined in `encore_core::catalog`. The
//! catalog is decorative, so this client never surfaces an error: a failed
//! fetch falls back to the stale cached list when one exists and an empty
//! list otherwise, logging the failure at debug level.

use std::time::Duration;

use chrono::Utc;
use encore_core::catalog::{parse_products, CatalogCache, CatalogProduct};
use tokio::sync::RwLock;

/// Timeout for a single catalog fetch. The catalog must never hold up a
/// request for long.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client plus in-memory cache for the extension catalog.
pub struct CatalogClient {
    http: reqwest::Client,
    url: Option<String>,
    cache: RwLock<Option<CatalogCache>>,
}

impl CatalogClient {
    /// Create a client for the given manifest URL. `None` disables
    /// fetching entirely; the catalog then always reads as empty.
    pub fn new(url: Option<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            url,
            cache: RwLock::new(None),
        }
    }

    /// Current product list, served from cache when fresh.
    ///
    /// Infallible: fetch and parse problems degrade to the last cached
    /// list, or an empty one when nothing was ever fetched.
    pub async fn products(&self) -> Vec<CatalogProduct> {
        let Some(url) = &self.url else {
            return Vec::new();
        };

        let now = Utc::now();
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.is_fresh(now) {
                    return cached.products.clone();
                }
            }
        }

        match self.fetch(url).await {
            Ok(products) => {
                let mut cache = self.cache.write().await;
                *cache = Some(CatalogCache::new(products.clone(), now));
                products
            }
            Err(e) => {
                tracing::debug!(error = %e, "Catalog fetch failed, serving cached list");
                let cache = self.cache.read().await;
                cache
                    .as_ref()
                    .map(|c| c.products.clone())
                    .unwrap_or_default()
            }
        }
    }

    async fn fetch(&self, url: &str) -> Result<Vec<CatalogProduct>, reqwest::Error> {
        let body = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(parse_products(&body))
    }
}
