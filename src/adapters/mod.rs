//! External collaborator integrations.
//!
//! - [`catalog`] - Catalog repository abstraction and the in-memory implementation
//! - [`writer`] - Row sink abstraction and the CSV sink
//!
//! # Design Pattern
//!
//! Adapters isolate external collaborators behind traits so the export engine
//! can be driven by test doubles.
//!
//! ```rust
//! use catalog_export::adapters::catalog::InMemoryCatalog;
//! use catalog_export::adapters::writer::CsvSink;
//!
//! let catalog = InMemoryCatalog::from_json_str(r#"{"products": []}"#).unwrap();
//! let sink = CsvSink::new(Vec::new(), false);
//! # let _ = (catalog, sink);
//! ```

pub mod catalog;
pub mod writer;
