use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Market vertical a trend list is filed under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Technology,
    Fashion,
    Home,
    Health,
    Finance,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown category `{0}`")]
pub struct UnknownCategory(pub String);

impl Category {
    pub const ALL: [Category; 5] =
        [Self::Technology, Self::Fashion, Self::Home, Self::Health, Self::Finance];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Technology => "technology",
            Self::Fashion => "fashion",
            Self::Home => "home",
            Self::Health => "health",
            Self::Finance => "finance",
        }
    }

    pub fn identifiers() -> impl Iterator<Item = &'static str> {
        Self::ALL.into_iter().map(Self::as_str)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive, but otherwise exact: `" home"` and `"homes"` are unknown.
impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "technology" => Ok(Self::Technology),
            "fashion" => Ok(Self::Fashion),
            "home" => Ok(Self::Home),
            "health" => Ok(Self::Health),
            "finance" => Ok(Self::Finance),
            _ => Err(UnknownCategory(value.to_string())),
        }
    }
}
