//! Result type alias for the export engine

use super::errors::ExportError;

/// Result type alias for export operations
///
/// # Examples
///
/// ```
/// use catalog_export::domain::result::Result;
/// use catalog_export::domain::errors::ExportError;
///
/// fn failing_function() -> Result<()> {
///     Err(ExportError::Validation("Invalid input".to_string()))
/// }
///
/// assert!(failing_function().is_err());
/// ```
pub type Result<T> = std::result::Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
