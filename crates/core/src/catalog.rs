//! Extension catalog cache policy.
//!
//! The add-on browser fetches a product list from the vendor site. That
//! list is decoration, never load-bearing: any fetch or parse problem
//! degrades to an empty catalog. Responses are cached for half a day, and
//! a cached value stays valid until its own expiry even when a later
//! refresh attempt fails.

use serde::Deserialize;

use crate::types::Timestamp;

pub const CATALOG_CACHE_TTL_SECS: i64 = 12 * 60 * 60;

// ---------------------------------------------------------------------------
// Wire shape
// ---------------------------------------------------------------------------

/// One product as advertised by the catalog endpoint. Everything beyond
/// the name is optional; absent fields deserialize to `None`.
#[derive(Debug, Clone, PartialEq, Deserialize, serde::Serialize)]
pub struct CatalogProduct {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogBody {
    #[serde(default)]
    products: Vec<CatalogProduct>,
}

/// Parse a catalog response body. Malformed JSON or a missing `products`
/// array yields an empty list, not an error.
pub fn parse_products(body: &str) -> Vec<CatalogProduct> {
    serde_json::from_str::<CatalogBody>(body)
        .map(|b| b.products)
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

/// A fetched product list plus when it was fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogCache {
    pub products: Vec<CatalogProduct>,
    pub fetched_at: Timestamp,
}

impl CatalogCache {
    pub fn new(products: Vec<CatalogProduct>, fetched_at: Timestamp) -> Self {
        Self {
            products,
            fetched_at,
        }
    }

    /// Whether the cached value is still within its TTL at `now`.
    pub fn is_fresh(&self, now: Timestamp) -> bool {
        now.signed_duration_since(self.fetched_at).num_seconds() < CATALOG_CACHE_TTL_SECS
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
