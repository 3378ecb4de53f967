//! Theme names and the persisted theme preference.
//!
//! A [`Theme`] is a concrete visual style. A [`ThemeChoice`] is what the user
//! picked and what gets persisted: either a theme or the `system` sentinel
//! that defers to the OS colour-scheme preference.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;

/// Sentinel stored when the user defers to the OS colour scheme.
pub const SYSTEM: &str = "system";

/// A concrete visual theme.
///
/// Names outside the known set are carried verbatim in [`Theme::Other`]
/// rather than rejected; palette lookup decides what to do with them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Theme {
    Light,
    #[default]
    Dark,
    Cupcake,
    Corporate,
    Forest,
    Synthwave,
    Nord,
    /// Unrecognised theme name, passed through unchanged
    Other(String),
}

impl Theme {
    /// Every theme with a hand-authored palette, in dropdown order.
    pub const ALL: [Theme; 7] = [
        Theme::Light,
        Theme::Dark,
        Theme::Cupcake,
        Theme::Corporate,
        Theme::Forest,
        Theme::Synthwave,
        Theme::Nord,
    ];

    pub fn parse(s: &str) -> Self {
        match s {
            "light" => Self::Light,
            "dark" => Self::Dark,
            "cupcake" => Self::Cupcake,
            "corporate" => Self::Corporate,
            "forest" => Self::Forest,
            "synthwave" => Self::Synthwave,
            "nord" => Self::Nord,
            other => Self::Other(other.to_string()),
        }
    }

    /// Value written to `data-theme` and to storage.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Cupcake => "cupcake",
            Self::Corporate => "corporate",
            Self::Forest => "forest",
            Self::Synthwave => "synthwave",
            Self::Nord => "nord",
            Self::Other(name) => name,
        }
    }

    /// Human-readable name for selectors.
    pub fn label(&self) -> &str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::Cupcake => "Cupcake",
            Self::Corporate => "Corporate",
            Self::Forest => "Forest",
            Self::Synthwave => "Synthwave",
            Self::Nord => "Nord",
            Self::Other(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Theme {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for Theme {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<Theme> for String {
    fn from(theme: Theme) -> Self {
        theme.as_str().to_string()
    }
}

impl FromStr for Theme {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// The persisted theme preference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ThemeChoice {
    /// Follow the OS colour-scheme preference
    System,
    Theme(Theme),
}

impl Default for ThemeChoice {
    fn default() -> Self {
        Self::Theme(Theme::default())
    }
}

impl ThemeChoice {
    pub fn parse(s: &str) -> Self {
        if s == SYSTEM {
            Self::System
        } else {
            Self::Theme(Theme::parse(s))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::System => SYSTEM,
            Self::Theme(theme) => theme.as_str(),
        }
    }

    /// Concrete theme for this choice; `System` becomes dark or light.
    pub fn resolve(&self, prefers_dark: bool) -> Theme {
        match self {
            Self::System if prefers_dark => Theme::Dark,
            Self::System => Theme::Light,
            Self::Theme(theme) => theme.clone(),
        }
    }

    pub fn is_system(&self) -> bool {
        matches!(self, Self::System)
    }
}

impl std::fmt::Display for ThemeChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Theme> for ThemeChoice {
    fn from(theme: Theme) -> Self {
        Self::Theme(theme)
    }
}

impl From<String> for ThemeChoice {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<ThemeChoice> for String {
    fn from(choice: ThemeChoice) -> Self {
        choice.as_str().to_string()
    }
}
