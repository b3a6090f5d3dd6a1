use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::WarmthError;

/// Qualitative bucket derived from a score. Thresholds live in
/// [`crate::config::BandConfig`], never here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Hot,
    Warm,
    Cool,
    Cold,
}

impl Band {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::Warm => "warm",
            Self::Cool => "cool",
            Self::Cold => "cold",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Band {
    type Err = WarmthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hot" => Ok(Self::Hot),
            "warm" => Ok(Self::Warm),
            "cool" => Ok(Self::Cool),
            "cold" => Ok(Self::Cold),
            other => Err(WarmthError::validation(
                "band",
                format!("unknown band '{other}'"),
            )),
        }
    }
}
