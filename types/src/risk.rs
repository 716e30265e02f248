//! Risk level reported by the backend.

use serde::{Deserialize, Serialize};

/// Backend-decided risk classification. The client only renders it.
///
/// Any value the backend sends other than `safe` or `risky` is treated as
/// `invalid`, matching how the result card is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum RiskLevel {
    Safe,
    Risky,
    Invalid,
}

impl From<String> for RiskLevel {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<&str> for RiskLevel {
    fn from(s: &str) -> Self {
        match s {
            "safe" => Self::Safe,
            "risky" => Self::Risky,
            _ => Self::Invalid,
        }
    }
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Risky => "risky",
            Self::Invalid => "invalid",
        }
    }

    /// Result card title.
    pub fn headline(&self) -> &'static str {
        match self {
            Self::Safe => "Verified Safe",
            Self::Risky => "Potential Risk",
            Self::Invalid => "Invalid Address",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
