//! TOML rename profiles.
//!
//! A profile stores the interface mappings and index options for a migration
//! so they do not have to be repeated on every command line:
//!
//! ```toml
//! index_style = "3"
//! index_prefix = "1"
//!
//! [[interface]]
//! from = "FastEthernet"
//! to = "GigabitEthernet"
//! ```

use std::fs;
use std::path::Path;

use netcfg_core::{IndexStyle, InterfaceMapping, MappingError};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenameProfile {
    #[serde(default)]
    pub index_style: Option<String>,
    #[serde(default)]
    pub index_prefix: Option<String>,
    #[serde(default, rename = "interface")]
    pub interfaces: Vec<ProfileMapping>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileMapping {
    pub from: String,
    pub to: String,
}

/// Errors returned when loading a rename profile.
#[derive(Debug, Error)]
pub enum ProfileLoadError {
    #[error("failed to read profile {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse profile {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid entry in profile {path}: {source}")]
    Mapping { path: String, source: MappingError },
}

impl RenameProfile {
    /// Validated interface mappings in file order.
    pub fn mappings(&self) -> Result<Vec<InterfaceMapping>, MappingError> {
        self.interfaces
            .iter()
            .map(|m| InterfaceMapping::new(&m.from, &m.to))
            .collect()
    }

    pub fn index_style(&self) -> Result<Option<IndexStyle>, MappingError> {
        self.index_style.as_deref().map(str::parse).transpose()
    }
}

/// Load a profile and validate its entries.
pub fn load_profile(path: &Path) -> Result<RenameProfile, ProfileLoadError> {
    let display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ProfileLoadError::Io {
        path: display.clone(),
        source,
    })?;
    parse_profile(&raw, display)
}

fn parse_profile(raw: &str, path: String) -> Result<RenameProfile, ProfileLoadError> {
    let profile: RenameProfile = toml::from_str(raw).map_err(|source| ProfileLoadError::Parse {
        path: path.clone(),
        source,
    })?;
    if let Err(source) = profile.mappings().and(profile.index_style()) {
        return Err(ProfileLoadError::Mapping { path, source });
    }
    Ok(profile)
}
