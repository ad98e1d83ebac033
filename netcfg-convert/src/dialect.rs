use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use netcfg_core::{from_json, to_json, CodecError, Config};
use thiserror::Error;

use crate::generate::{generate_cisco, generate_huawei};
use crate::parse::{parse_cisco, parse_huawei};

/// A configuration text format the converter reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Cisco,
    Huawei,
    /// Serialized canonical model.
    Json,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DialectError {
    #[error("unsupported dialect '{0}' (expected cisco, huawei or json)")]
    Unsupported(String),
}

impl Dialect {
    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Cisco => "cisco",
            Dialect::Huawei => "huawei",
            Dialect::Json => "json",
        }
    }

    /// Read `text` into the canonical model. Text dialects never fail; JSON can.
    pub fn parse(self, text: &str) -> Result<Config, CodecError> {
        match self {
            Dialect::Cisco => Ok(parse_cisco(text)),
            Dialect::Huawei => Ok(parse_huawei(text)),
            Dialect::Json => from_json(text),
        }
    }

    pub fn render(self, cfg: &Config) -> Result<String, CodecError> {
        match self {
            Dialect::Cisco => Ok(generate_cisco(cfg)),
            Dialect::Huawei => Ok(generate_huawei(cfg)),
            Dialect::Json => {
                let mut json = to_json(cfg)?;
                json.push('\n');
                Ok(json)
            }
        }
    }
}

impl FromStr for Dialect {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cisco" => Ok(Dialect::Cisco),
            "huawei" => Ok(Dialect::Huawei),
            "json" => Ok(Dialect::Json),
            _ => Err(DialectError::Unsupported(s.to_string())),
        }
    }
}

impl Display for Dialect {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
