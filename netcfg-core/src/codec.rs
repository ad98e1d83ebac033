use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::model::Config;

/// Errors raised while moving a [`Config`] through its JSON form.
#[derive(Debug, Error)]
pub enum CodecError {
    /// JSON could not be produced or decoded.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Failed to read or write the JSON file.
    #[error("failed to access configuration JSON file: {0}")]
    Io(#[from] std::io::Error),
}

/// Serialize a configuration as indented JSON.
pub fn to_json(config: &Config) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(config)?)
}

/// Decode a configuration from JSON. Missing fields take their empty values.
pub fn from_json(json: &str) -> Result<Config, CodecError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and decode a JSON configuration file.
pub fn read_json_file(path: &Path) -> Result<Config, CodecError> {
    let raw = fs::read_to_string(path)?;
    from_json(&raw)
}

/// Encode a configuration and write it to `path`.
pub fn write_json_file(config: &Config, path: &Path) -> Result<(), CodecError> {
    let json = to_json(config)?;
    fs::write(path, json)?;
    Ok(())
}
