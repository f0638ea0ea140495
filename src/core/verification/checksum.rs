//! Checksum calculation for artifact verification

use crate::domain::{ExportError, Result};
use sha2::{Digest, Sha256};

/// Calculate SHA-256 checksum of raw bytes
///
/// Returns a hex-encoded SHA-256 checksum string (64 characters).
///
/// # Examples
///
/// ```
/// use catalog_export::core::verification::checksum::artifact_checksum;
///
/// let checksum = artifact_checksum(b"sku,name\n");
/// assert_eq!(checksum.len(), 64);
/// ```
pub fn artifact_checksum(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Calculate SHA-256 checksum of the cells of a CSV artifact
///
/// The CSV is parsed first, so two artifacts that differ only in field
/// quoting hash the same. Each cell is length-prefixed to keep cell
/// boundaries significant.
///
/// # Errors
///
/// Returns a serialization error if the artifact is not valid CSV.
pub fn content_checksum(artifact: &str) -> Result<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(artifact.as_bytes());

    let mut hasher = Sha256::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| ExportError::Serialization(format!("Invalid CSV artifact: {}", e)))?;
        hasher.update((record.len() as u64).to_le_bytes());
        for field in record.iter() {
            hasher.update((field.len() as u64).to_le_bytes());
            hasher.update(field.as_bytes());
        }
    }

    Ok(format!("{:x}", hasher.finalize()))
}
