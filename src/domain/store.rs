//! Store and website configuration
//!
//! The scope configuration the engine reads at the start of every run. It is
//! owned by the catalog collaborator; changes made before `export()` is called
//! are visible to that run.

use super::ids::{StoreId, WebsiteId};
use serde::{Deserialize, Serialize};

/// Scope at which price attributes are maintained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PriceScope {
    /// A single price for all websites
    #[default]
    Global,
    /// Prices may differ per website
    Website,
}

/// Website definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Website {
    pub id: WebsiteId,
    pub code: String,
}

/// Store view definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub code: String,
    pub website_id: WebsiteId,
}

/// Store/website layout and price scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StoreConfiguration {
    #[serde(default)]
    pub websites: Vec<Website>,

    #[serde(default)]
    pub stores: Vec<Store>,

    #[serde(default)]
    pub price_scope: PriceScope,
}

impl StoreConfiguration {
    /// Non-admin store views in ascending store id order
    pub fn store_views(&self) -> Vec<&Store> {
        let mut stores: Vec<&Store> = self.stores.iter().filter(|s| !s.id.is_admin()).collect();
        stores.sort_by_key(|s| s.id);
        stores
    }

    /// Looks up a website code by id
    pub fn website_code(&self, id: WebsiteId) -> Option<&str> {
        self.websites
            .iter()
            .find(|w| w.id == id)
            .map(|w| w.code.as_str())
    }

    /// Looks up a store view by code
    pub fn store_by_code(&self, code: &str) -> Option<&Store> {
        self.stores.iter().find(|s| s.code == code)
    }
}
