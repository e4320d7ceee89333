use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::TourError;

/// Reference to a UI element: `#name` matches an element id, `.name` a class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Selector {
    Id(String),
    Class(String),
}

impl Selector {
    pub fn id(name: impl Into<String>) -> Self {
        Self::Id(name.into())
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::Class(name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Id(name) | Self::Class(name) => name,
        }
    }
}

impl FromStr for Selector {
    type Err = TourError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let Some(captures) = selector_regex().captures(trimmed) else {
            return Err(TourError::new(
                "TOUR_SELECTOR_INVALID",
                format!(
                    "Selector \"{}\" must be \"#name\" or \".name\" with name in [A-Za-z0-9_-].",
                    raw
                ),
            ));
        };
        let name = captures[2].to_string();
        match &captures[1] {
            "#" => Ok(Self::Id(name)),
            _ => Ok(Self::Class(name)),
        }
    }
}

impl TryFrom<String> for Selector {
    type Error = TourError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Selector> for String {
    fn from(value: Selector) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(name) => write!(f, "#{}", name),
            Self::Class(name) => write!(f, ".{}", name),
        }
    }
}

fn selector_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^([#.])([A-Za-z0-9_-]+)$").expect("selector regex"))
}
