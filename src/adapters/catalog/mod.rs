//! Catalog collaborator seam
//!
//! The engine reads products, attribute metadata, scope configuration and
//! linked data through [`CatalogRepository`]. [`InMemoryCatalog`] is the
//! bundled implementation over a JSON snapshot.

pub mod factory;
pub mod memory;
pub mod traits;

pub use factory::create_catalog_repository;
pub use memory::{CatalogSnapshot, InMemoryCatalog};
pub use traits::{CatalogRepository, PageRequest};
