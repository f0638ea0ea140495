//! Writer sink seam

pub mod csv;
pub mod traits;

pub use self::csv::CsvSink;
pub use traits::RowSink;
