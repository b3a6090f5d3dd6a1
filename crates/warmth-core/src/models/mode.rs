use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::WarmthError;

/// Decay rate selector stored on every anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecayMode {
    Slow,
    Medium,
    Fast,
    /// Debug-only mode with a half-life of roughly 18 minutes.
    Test,
}

impl DecayMode {
    pub const ALL: [DecayMode; 4] = [
        DecayMode::Slow,
        DecayMode::Medium,
        DecayMode::Fast,
        DecayMode::Test,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Medium => "medium",
            Self::Fast => "fast",
            Self::Test => "test",
        }
    }

    /// Modes a user may pick. `Test` never appears in a production picker.
    pub fn is_user_selectable(self) -> bool {
        !matches!(self, Self::Test)
    }
}

impl fmt::Display for DecayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecayMode {
    type Err = WarmthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slow" => Ok(Self::Slow),
            "medium" => Ok(Self::Medium),
            "fast" => Ok(Self::Fast),
            "test" => Ok(Self::Test),
            other => Err(WarmthError::validation(
                "mode",
                format!("unknown decay mode '{other}'"),
            )),
        }
    }
}
