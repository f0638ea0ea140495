//! Domain models and types for the catalog export engine.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`ProductId`], [`StoreId`], [`WebsiteId`], [`CategoryId`])
//! - **Catalog entities** ([`Product`], [`CustomOption`], [`StockItem`], [`MediaImage`])
//! - **Scope configuration** ([`StoreConfiguration`], [`PriceScope`])
//! - **Filtering** ([`FilterSpec`])
//! - **Error types** ([`ExportError`], [`DataSourceError`]) and the [`Result`] alias
//!
//! # Type Safety
//!
//! Identifiers are newtypes so ids of different kinds cannot be mixed:
//!
//! ```rust
//! use catalog_export::domain::{StoreId, WebsiteId};
//!
//! let store = StoreId::new(1);
//! let website = WebsiteId::new(1);
//!
//! // This won't compile
//! // let wrong: StoreId = website;
//! # let _ = (store, website);
//! ```
//!
//! All entities are created fresh for each export run and are read-only to
//! the engine.

pub mod attribute;
pub mod errors;
pub mod filter;
pub mod ids;
pub mod product;
pub mod result;
pub mod store;

// Re-export commonly used types for convenience
pub use attribute::{AttributeDescriptor, AttributeScope, AttributeValue, EntityType};
pub use errors::{DataSourceError, ExportError};
pub use filter::{AttributeRange, FilterSpec, StockStatusFilter};
pub use ids::{CategoryId, ProductId, StoreId, WebsiteId};
pub use product::{
    Category, ConfigurableChild, ConfigurableLinks, CustomOption, CustomOptionValue, ImageRole,
    LinkType, MediaImage, OptionType, PriceType, Product, ProductBuilder, ProductLink, ProductType,
    StockItem, SuperAttribute, TierPrice, TierValueType,
};
pub use result::Result;
pub use store::{PriceScope, Store, StoreConfiguration, Website};
