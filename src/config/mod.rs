//! Dashboard configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::theme::{CssVariablePalettes, PaletteSource, StaticPalettes};

/// Id of the optional `<script type="application/json">` carrying overrides.
pub const CONFIG_ELEMENT_ID: &str = "dashboard-config";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid dashboard configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub palette: PaletteStrategy,

    #[serde(default = "default_theme_key")]
    pub theme_key: String,

    #[serde(default = "default_layout_key")]
    pub layout_key: String,

    /// Overrides the strategy's settle delay before a rebuild
    #[serde(default)]
    pub rebuild_delay_ms: Option<u64>,

    #[serde(default)]
    pub elements: ElementIds,
}

fn default_theme_key() -> String {
    "theme".to_string()
}

fn default_layout_key() -> String {
    "layoutMode".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            palette: PaletteStrategy::default(),
            theme_key: default_theme_key(),
            layout_key: default_layout_key(),
            rebuild_delay_ms: None,
            elements: ElementIds::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// How long to wait after a theme change before rebuilding charts.
    pub fn settle(&self) -> Settle {
        let mut settle = self.palette.settle();
        if let Some(ms) = self.rebuild_delay_ms {
            settle.delay = Duration::from_millis(ms);
        }
        settle
    }
}

/// Ids of the controls the dashboard wires up. All are optional on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementIds {
    #[serde(default = "default_theme_select")]
    pub theme_select: String,

    #[serde(default = "default_quick_toggle")]
    pub quick_toggle: String,

    #[serde(default = "default_layout_toggle")]
    pub layout_toggle: String,

    #[serde(default = "default_main_content")]
    pub main_content: String,
}

fn default_theme_select() -> String {
    "themeSelect".to_string()
}

fn default_quick_toggle() -> String {
    "quickToggle".to_string()
}

fn default_layout_toggle() -> String {
    "layoutToggle".to_string()
}

fn default_main_content() -> String {
    "mainContent".to_string()
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            theme_select: default_theme_select(),
            quick_toggle: default_quick_toggle(),
            layout_toggle: default_layout_toggle(),
            main_content: default_main_content(),
        }
    }
}

/// Where chart colours come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaletteStrategy {
    /// Hand-authored RGB table keyed by theme name
    #[default]
    Static,
    /// DaisyUI custom properties read from the live document
    CssVariables,
}

/// Wait applied before a scheduled rebuild runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settle {
    /// Wait one animation frame first (layout must be recomputed)
    pub wait_frame: bool,
    pub delay: Duration,
}

impl PaletteStrategy {
    pub fn source(self) -> Box<dyn PaletteSource> {
        match self {
            Self::Static => Box::new(StaticPalettes),
            Self::CssVariables => Box::new(CssVariablePalettes),
        }
    }

    pub fn settle(self) -> Settle {
        match self {
            Self::Static => Settle {
                wait_frame: false,
                delay: Duration::from_millis(50),
            },
            Self::CssVariables => Settle {
                wait_frame: true,
                delay: Duration::from_millis(20),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = DashboardConfig::from_json("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.theme_key, "theme");
        assert_eq!(config.layout_key, "layoutMode");
        assert_eq!(config.elements.main_content, "mainContent");
    }

    #[test]
    fn test_css_variable_strategy_waits_a_frame() {
        let config = DashboardConfig::from_json(r#"{"palette": "css-variables"}"#).unwrap();
        assert_eq!(config.palette, PaletteStrategy::CssVariables);
        let settle = config.settle();
        assert!(settle.wait_frame);
        assert_eq!(settle.delay, Duration::from_millis(20));
    }

    #[test]
    fn test_delay_override() {
        let config = DashboardConfig::from_json(r#"{"rebuild_delay_ms": 5}"#).unwrap();
        let settle = config.settle();
        assert!(!settle.wait_frame);
        assert_eq!(settle.delay, Duration::from_millis(5));
    }

    #[test]
    fn test_partial_element_ids() {
        let config =
            DashboardConfig::from_json(r#"{"elements": {"theme_select": "picker"}}"#).unwrap();
        assert_eq!(config.elements.theme_select, "picker");
        assert_eq!(config.elements.quick_toggle, "quickToggle");
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            DashboardConfig::from_json(r#"{"palette": "neon"}"#),
            Err(ConfigError::Parse(_))
        ));
    }
}
