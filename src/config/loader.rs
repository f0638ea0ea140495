//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::CatalogExportConfig;
use crate::domain::errors::ExportError;
use crate::domain::result::Result;
use regex::{Captures, Regex};
use std::fmt::Display;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

/// Pattern of a `${VAR}` placeholder
const PLACEHOLDER_PATTERN: &str = r"\$\{([A-Z_][A-Z0-9_]*)\}";

/// Prefix of per-key environment overrides
const ENV_PREFIX: &str = "CATALOG_EXPORT";

/// Reads, substitutes, overrides and validates a TOML configuration file
///
/// `${VAR}` placeholders are expanded before parsing; afterwards any
/// `CATALOG_EXPORT_<SECTION>_<KEY>` variable replaces the parsed value.
///
/// # Errors
///
/// Returns a configuration error if the file cannot be read or parsed, a
/// referenced environment variable is missing, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use catalog_export::config::loader::load_config;
///
/// let config = load_config("catalog-export.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CatalogExportConfig> {
    let path = path.as_ref();

    let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            ExportError::Configuration(format!("Configuration file not found: {}", path.display()))
        }
        _ => ExportError::Configuration(format!("Cannot read {}: {e}", path.display())),
    })?;

    load_config_str(&contents)
}

/// Same pipeline as [`load_config`] over TOML text
pub fn load_config_str(contents: &str) -> Result<CatalogExportConfig> {
    let expanded = substitute_env_vars(contents)?;

    let mut config: CatalogExportConfig = toml::from_str(&expanded)
        .map_err(|e| ExportError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config
        .validate()
        .map_err(|e| ExportError::Configuration(format!("Invalid configuration: {e}")))?;

    Ok(config)
}

/// Expands `${VAR}` placeholders outside comment lines
///
/// Every missing variable is reported at once.
fn substitute_env_vars(input: &str) -> Result<String> {
    let placeholder = Regex::new(PLACEHOLDER_PATTERN)
        .map_err(|e| ExportError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut missing: Vec<String> = Vec::new();

    let lines: Vec<String> = input
        .lines()
        .map(|line| {
            if line.trim_start().starts_with('#') {
                return line.to_string();
            }
            placeholder
                .replace_all(line, |caps: &Captures<'_>| {
                    let name = &caps[1];
                    std::env::var(name).unwrap_or_else(|_| {
                        if !missing.iter().any(|m| m == name) {
                            missing.push(name.to_string());
                        }
                        caps[0].to_string()
                    })
                })
                .into_owned()
        })
        .collect();

    if !missing.is_empty() {
        return Err(ExportError::Configuration(format!(
            "Missing required environment variables: {}",
            missing.join(", ")
        )));
    }

    let mut expanded = lines.join("\n");
    expanded.push('\n');
    Ok(expanded)
}

fn env_override(section: &str, key: &str) -> Option<(String, String)> {
    let name = format!(
        "{ENV_PREFIX}_{}_{}",
        section.to_ascii_uppercase(),
        key.to_ascii_uppercase()
    );
    std::env::var(&name).ok().map(|value| (name, value))
}

fn parse_override<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value.trim().parse().map_err(|e| {
        ExportError::Configuration(format!("Invalid value '{value}' for {name}: {e}"))
    })
}

/// Applies `CATALOG_EXPORT_<SECTION>_<KEY>` overrides
///
/// For example `CATALOG_EXPORT_EXPORT_PAGE_SIZE` or
/// `CATALOG_EXPORT_CATALOG_FIXTURE_PATH`.
fn apply_env_overrides(config: &mut CatalogExportConfig) -> Result<()> {
    if let Some((_, value)) = env_override("application", "log_level") {
        config.application.log_level = value;
    }
    if let Some((_, value)) = env_override("catalog", "fixture_path") {
        config.catalog.fixture_path = value;
    }

    let export = &mut config.export;
    if let Some((name, value)) = env_override("export", "page_size") {
        export.page_size = parse_override(&name, &value)?;
    }
    if let Some((name, value)) = env_override("export", "prefetch_depth") {
        export.prefetch_depth = parse_override(&name, &value)?;
    }
    if let Some((name, value)) = env_override("export", "fields_enclosure") {
        export.fields_enclosure = parse_override(&name, &value)?;
    }
    if let Some((_, value)) = env_override("export", "output_path") {
        export.output_path = value;
    }

    let logging = &mut config.logging;
    if let Some((name, value)) = env_override("logging", "local_enabled") {
        logging.local_enabled = parse_override(&name, &value)?;
    }
    if let Some((_, value)) = env_override("logging", "local_path") {
        logging.local_path = value;
    }
    if let Some((_, value)) = env_override("logging", "local_rotation") {
        logging.local_rotation = value;
    }

    Ok(())
}
