//! Command handlers.
//!
//! Each handler takes already-read inputs and returns the text to print, so
//! none of them touch stdout, stdin or the process exit code.

use std::path::Path;

use anyhow::{Context, Result};
use attrform::{AttrformConfig, Input, Record, Schema, SchemaFile, UndefinedAttributes};
use tracing::debug;

pub fn load_schema(config: &AttrformConfig, path: &Path) -> Result<Schema<Record>> {
    let file = SchemaFile::load(path)
        .with_context(|| format!("failed to load schema {}", path.display()))?;
    let schema = file.into_schema(config)?;
    debug!(schema = schema.name(), attributes = schema.len(), "schema loaded");
    Ok(schema)
}

/// Construct a record from raw JSON text. Blank text is absent input.
pub fn build(
    config: &AttrformConfig,
    mut schema: Schema<Record>,
    raw_input: &str,
    ignore_undeclared: bool,
    compact: bool,
) -> Result<String> {
    if ignore_undeclared {
        schema.set_undefined_attribute_policy(UndefinedAttributes::Ignore);
    }

    let input = if raw_input.trim().is_empty() {
        Input::new()
    } else {
        Input::from_json_str(raw_input).context("failed to read input")?
    };

    let record = schema.instantiate(input)?;
    render_record(&record, config, compact)
}

pub fn names(schema: &Schema<Record>) -> String {
    schema.names().collect::<Vec<_>>().join("\n")
}

pub fn show_config(config: &AttrformConfig) -> Result<String> {
    Ok(toml::to_string(config)?.trim_end().to_string())
}

fn render_record(record: &Record, config: &AttrformConfig, compact: bool) -> Result<String> {
    let date_format = config.date_format();
    let json = serde_json::Value::Object(
        record
            .to_hash()
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json_with(date_format)))
            .collect(),
    );
    let rendered = if config.pretty && !compact {
        serde_json::to_string_pretty(&json)?
    } else {
        serde_json::to_string(&json)?
    };
    Ok(rendered)
}
