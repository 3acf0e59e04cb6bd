use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    #[serde(alias = "low")]
    L,
    /// Medium (~15% recovery capacity)
    #[serde(alias = "medium")]
    M,
    /// Quartile (~25% recovery capacity)
    #[serde(alias = "quartile")]
    Q,
    /// High (~30% recovery capacity)
    #[serde(alias = "high")]
    H,
}

impl ECLevel {
    /// Single-letter name used on the wire and in config
    pub fn as_str(&self) -> &'static str {
        match self {
            ECLevel::L => "L",
            ECLevel::M => "M",
            ECLevel::Q => "Q",
            ECLevel::H => "H",
        }
    }
}

impl fmt::Display for ECLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no error correction level
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown error correction level {0:?}")]
pub struct ParseECLevelError(pub String);

impl FromStr for ECLevel {
    type Err = ParseECLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l" | "low" => Ok(ECLevel::L),
            "m" | "medium" => Ok(ECLevel::M),
            "q" | "quartile" => Ok(ECLevel::Q),
            "h" | "high" => Ok(ECLevel::H),
            _ => Err(ParseECLevelError(s.to_string())),
        }
    }
}

impl From<ECLevel> for qrcode::EcLevel {
    fn from(level: ECLevel) -> Self {
        match level {
            ECLevel::L => qrcode::EcLevel::L,
            ECLevel::M => qrcode::EcLevel::M,
            ECLevel::Q => qrcode::EcLevel::Q,
            ECLevel::H => qrcode::EcLevel::H,
        }
    }
}
