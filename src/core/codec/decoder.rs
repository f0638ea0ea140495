//! Composite cell decoder

use super::{
    CompositeFormat, OptionGroup, ENCLOSURE, GROUP_SEPARATOR, KEY_VALUE_SEPARATOR, PAIR_SEPARATOR,
};
use crate::domain::{ExportError, Result};
use std::iter::Peekable;
use std::str::Chars;

/// Splits a composite cell back into option groups
///
/// Accepts the output of [`MultiValueEncoder`](super::MultiValueEncoder) in
/// either enclosure mode. Unquoted values run to the next `,` or `|` and may
/// contain `=` and non-leading quotes.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiValueDecoder;

impl MultiValueDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decodes a custom options cell
    pub fn decode(&self, cell: &str) -> Result<Vec<OptionGroup>> {
        self.decode_as(CompositeFormat::CustomOptions, cell)
    }

    /// Decodes a cell of the given format
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::MalformedCompositeValue`] for a pair without `=`,
    /// an empty key, an empty group, an unterminated or trailing-garbage
    /// quoted value, a repeated key, or a group lacking the format's
    /// required key.
    pub fn decode_as(&self, format: CompositeFormat, cell: &str) -> Result<Vec<OptionGroup>> {
        let mut groups = Vec::new();
        if cell.is_empty() {
            return Ok(groups);
        }

        let mut chars = cell.chars().peekable();
        let mut group = OptionGroup::new();

        loop {
            let key = read_key(&mut chars, groups.len())?;
            let value = match chars.peek() {
                Some(&ENCLOSURE) => read_quoted(&mut chars, &key)?,
                _ => read_plain(&mut chars),
            };

            if group.contains_key(&key) {
                return Err(malformed(format!(
                    "group {} repeats key '{}'",
                    groups.len(),
                    key
                )));
            }
            group.push(key, value);

            match chars.next() {
                None => {
                    groups.push(finish_group(format, groups.len(), group)?);
                    break;
                }
                Some(PAIR_SEPARATOR) => {}
                Some(GROUP_SEPARATOR) => {
                    groups.push(finish_group(format, groups.len(), group)?);
                    group = OptionGroup::new();
                }
                Some(other) => {
                    return Err(malformed(format!("unexpected '{}' after value", other)));
                }
            }
        }

        Ok(groups)
    }
}

fn malformed(message: String) -> ExportError {
    ExportError::MalformedCompositeValue(message)
}

fn read_key(chars: &mut Peekable<Chars<'_>>, group_index: usize) -> Result<String> {
    let mut key = String::new();
    loop {
        match chars.next() {
            Some(KEY_VALUE_SEPARATOR) => break,
            Some(PAIR_SEPARATOR) | Some(GROUP_SEPARATOR) | None => {
                return Err(malformed(format!(
                    "group {} has a pair without '{}'",
                    group_index, KEY_VALUE_SEPARATOR
                )));
            }
            Some(ENCLOSURE) => {
                return Err(malformed(format!(
                    "group {} has a quoted key",
                    group_index
                )));
            }
            Some(c) => key.push(c),
        }
    }

    if key.is_empty() {
        return Err(malformed(format!("group {} has an empty key", group_index)));
    }
    Ok(key)
}

fn read_quoted(chars: &mut Peekable<Chars<'_>>, key: &str) -> Result<String> {
    chars.next();
    let mut value = String::new();
    loop {
        match chars.next() {
            Some(ENCLOSURE) => {
                if chars.peek() == Some(&ENCLOSURE) {
                    chars.next();
                    value.push(ENCLOSURE);
                } else {
                    break;
                }
            }
            Some(c) => value.push(c),
            None => {
                return Err(malformed(format!(
                    "unterminated quoted value for key '{}'",
                    key
                )));
            }
        }
    }

    match chars.peek() {
        None | Some(&PAIR_SEPARATOR) | Some(&GROUP_SEPARATOR) => Ok(value),
        Some(c) => Err(malformed(format!(
            "unexpected '{}' after quoted value for key '{}'",
            c, key
        ))),
    }
}

fn read_plain(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut value = String::new();
    while let Some(&c) = chars.peek() {
        if c == PAIR_SEPARATOR || c == GROUP_SEPARATOR {
            break;
        }
        value.push(c);
        chars.next();
    }
    value
}

fn finish_group(format: CompositeFormat, index: usize, group: OptionGroup) -> Result<OptionGroup> {
    if let Some(required) = format.required_key() {
        if !group.contains_key(required) {
            return Err(malformed(format!(
                "{} group {} lacks a '{}' key",
                format.as_str(),
                index,
                required
            )));
        }
    }
    Ok(group)
}
