//! Composite cell encoder

use super::{
    CompositeFormat, Enclosure, OptionGroup, ENCLOSURE, GROUP_SEPARATOR, KEY_VALUE_SEPARATOR,
    PAIR_SEPARATOR,
};
use crate::domain::{ExportError, Result};

/// Flattens option groups into one cell
///
/// Deterministic: group order and key order are kept as given. Input that
/// cannot be represented (missing required key, reserved characters in a
/// key, empty or duplicate-key groups) points at an upstream data-integrity
/// bug and is reported as a schema error.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiValueEncoder {
    enclosure: Enclosure,
}

impl MultiValueEncoder {
    pub fn new(enclosure: Enclosure) -> Self {
        Self { enclosure }
    }

    pub fn enclosure(&self) -> Enclosure {
        self.enclosure
    }

    /// Encodes custom option groups
    pub fn encode(&self, groups: &[OptionGroup]) -> Result<String> {
        self.encode_as(CompositeFormat::CustomOptions, groups)
    }

    /// Encodes groups of the given format
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Schema`] if a group is empty, lacks the format's
    /// required key, repeats a key, or has a key that is empty or contains
    /// `,`, `|`, `=` or `"`.
    pub fn encode_as(&self, format: CompositeFormat, groups: &[OptionGroup]) -> Result<String> {
        let mut cell = String::new();

        for (index, group) in groups.iter().enumerate() {
            validate_group(format, index, group)?;

            if index > 0 {
                cell.push(GROUP_SEPARATOR);
            }

            for (pair_index, (key, value)) in group.iter().enumerate() {
                if pair_index > 0 {
                    cell.push(PAIR_SEPARATOR);
                }
                cell.push_str(key);
                cell.push(KEY_VALUE_SEPARATOR);
                self.push_value(&mut cell, value);
            }
        }

        Ok(cell)
    }

    fn push_value(&self, cell: &mut String, value: &str) {
        if self.needs_enclosure(value) {
            cell.push(ENCLOSURE);
            for c in value.chars() {
                if c == ENCLOSURE {
                    cell.push(ENCLOSURE);
                }
                cell.push(c);
            }
            cell.push(ENCLOSURE);
        } else {
            cell.push_str(value);
        }
    }

    fn needs_enclosure(&self, value: &str) -> bool {
        match self.enclosure {
            Enclosure::Always => true,
            Enclosure::Minimal => {
                value.starts_with(ENCLOSURE)
                    || value.contains(PAIR_SEPARATOR)
                    || value.contains(GROUP_SEPARATOR)
            }
        }
    }
}

fn validate_group(format: CompositeFormat, index: usize, group: &OptionGroup) -> Result<()> {
    if group.is_empty() {
        return Err(ExportError::Schema(format!(
            "{} group {} is empty",
            format.as_str(),
            index
        )));
    }

    if let Some(required) = format.required_key() {
        if !group.contains_key(required) {
            return Err(ExportError::Schema(format!(
                "{} group {} lacks a '{}' key",
                format.as_str(),
                index,
                required
            )));
        }
    }

    for (pair_index, (key, _)) in group.iter().enumerate() {
        if key.is_empty() || key.contains([PAIR_SEPARATOR, GROUP_SEPARATOR, KEY_VALUE_SEPARATOR, ENCLOSURE]) {
            return Err(ExportError::Schema(format!(
                "{} group {} has an invalid key '{}'",
                format.as_str(),
                index,
                key
            )));
        }
        if group.iter().take(pair_index).any(|(k, _)| k == key) {
            return Err(ExportError::Schema(format!(
                "{} group {} repeats key '{}'",
                format.as_str(),
                index,
                key
            )));
        }
    }

    Ok(())
}
