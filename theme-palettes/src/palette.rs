//! Chart colour palettes.
//!
//! A [`Palette`] is the fully resolved set of colours used to style charts.
//! Every role always holds a value the charting library can consume
//! directly (`rgb(...)`, `rgba(...)`, `hsl(...)` or hex).

use crate::theme::Theme;
use serde::{Deserialize, Serialize};

/// Alpha used for translucent fills derived from the primary colour.
pub const FILL_ALPHA: f32 = 0.25;

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `rgb(r, g, b)`
    pub fn css(self) -> String {
        format!("rgb({}, {}, {})", self.0, self.1, self.2)
    }

    /// `rgba(r, g, b, alpha)`
    pub fn with_alpha(self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {})", self.0, self.1, self.2, alpha)
    }
}

/// Named colour roles for chart styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    /// Foreground: tick labels, legend text
    pub fg: String,
    /// Grid lines and borders
    pub grid: String,
    /// Tooltip background
    pub bg: String,
    /// Slice and point borders
    pub surface: String,
    /// Principal series colour
    pub primary: String,
    /// Translucent variant of `primary` for area and bar fills
    pub primary_fill: String,
    pub secondary: String,
    pub accent: String,
    pub info: String,
    pub success: String,
    pub warning: String,
    pub error: String,
}

/// Source table row; kept as raw channels so the fill can be derived.
struct PaletteSpec {
    fg: Rgb,
    grid: Rgb,
    bg: Rgb,
    surface: Rgb,
    primary: Rgb,
    secondary: Rgb,
    accent: Rgb,
    info: Rgb,
    success: Rgb,
    warning: Rgb,
    error: Rgb,
}

impl PaletteSpec {
    fn to_palette(&self) -> Palette {
        Palette {
            fg: self.fg.css(),
            grid: self.grid.css(),
            bg: self.bg.css(),
            surface: self.surface.css(),
            primary: self.primary.css(),
            primary_fill: self.primary.with_alpha(FILL_ALPHA),
            secondary: self.secondary.css(),
            accent: self.accent.css(),
            info: self.info.css(),
            success: self.success.css(),
            warning: self.warning.css(),
            error: self.error.css(),
        }
    }
}

const LIGHT: PaletteSpec = PaletteSpec {
    fg: Rgb(31, 41, 55),
    grid: Rgb(209, 213, 219),
    bg: Rgb(255, 255, 255),
    surface: Rgb(249, 250, 251),
    primary: Rgb(59, 130, 246),
    secondary: Rgb(107, 114, 128),
    accent: Rgb(245, 158, 11),
    info: Rgb(34, 197, 94),
    success: Rgb(34, 197, 94),
    warning: Rgb(245, 158, 11),
    error: Rgb(239, 68, 68),
};

const DARK: PaletteSpec = PaletteSpec {
    fg: Rgb(229, 231, 235),
    grid: Rgb(75, 85, 99),
    bg: Rgb(30, 41, 59),
    surface: Rgb(51, 65, 85),
    primary: Rgb(96, 165, 250),
    secondary: Rgb(156, 163, 175),
    accent: Rgb(253, 224, 71),
    info: Rgb(74, 222, 128),
    success: Rgb(74, 222, 128),
    warning: Rgb(253, 224, 71),
    error: Rgb(248, 113, 113),
};

const CUPCAKE: PaletteSpec = PaletteSpec {
    fg: Rgb(63, 38, 55),
    grid: Rgb(230, 204, 221),
    bg: Rgb(255, 240, 245),
    surface: Rgb(252, 231, 243),
    primary: Rgb(214, 88, 250),
    secondary: Rgb(249, 115, 22),
    accent: Rgb(34, 211, 238),
    info: Rgb(34, 197, 94),
    success: Rgb(34, 197, 94),
    warning: Rgb(245, 158, 11),
    error: Rgb(239, 68, 68),
};

const CORPORATE: PaletteSpec = PaletteSpec {
    fg: Rgb(30, 41, 59),
    grid: Rgb(203, 213, 225),
    bg: Rgb(255, 255, 255),
    surface: Rgb(248, 250, 252),
    primary: Rgb(15, 23, 42),
    secondary: Rgb(100, 116, 139),
    accent: Rgb(59, 130, 246),
    info: Rgb(34, 197, 94),
    success: Rgb(34, 197, 94),
    warning: Rgb(245, 158, 11),
    error: Rgb(239, 68, 68),
};

const FOREST: PaletteSpec = PaletteSpec {
    fg: Rgb(240, 253, 244),
    grid: Rgb(34, 197, 94),
    bg: Rgb(5, 46, 22),
    surface: Rgb(15, 78, 35),
    primary: Rgb(74, 222, 128),
    secondary: Rgb(165, 243, 252),
    accent: Rgb(250, 204, 21),
    info: Rgb(96, 165, 250),
    success: Rgb(74, 222, 128),
    warning: Rgb(250, 204, 21),
    error: Rgb(248, 113, 113),
};

const SYNTHWAVE: PaletteSpec = PaletteSpec {
    fg: Rgb(241, 245, 249),
    grid: Rgb(139, 92, 246),
    bg: Rgb(13, 7, 37),
    surface: Rgb(38, 25, 76),
    primary: Rgb(236, 72, 153),
    secondary: Rgb(120, 219, 255),
    accent: Rgb(251, 146, 60),
    info: Rgb(34, 197, 94),
    success: Rgb(34, 197, 94),
    warning: Rgb(245, 158, 11),
    error: Rgb(239, 68, 68),
};

const NORD: PaletteSpec = PaletteSpec {
    fg: Rgb(216, 222, 233),
    grid: Rgb(76, 86, 106),
    bg: Rgb(46, 52, 64),
    surface: Rgb(59, 66, 82),
    primary: Rgb(136, 192, 208),
    secondary: Rgb(191, 97, 106),
    accent: Rgb(235, 203, 139),
    info: Rgb(163, 190, 140),
    success: Rgb(163, 190, 140),
    warning: Rgb(235, 203, 139),
    error: Rgb(191, 97, 106),
};

impl Palette {
    /// Hand-authored palette for a known theme, `None` for anything else.
    pub fn lookup(theme: &Theme) -> Option<Self> {
        let spec = match theme {
            Theme::Light => &LIGHT,
            Theme::Dark => &DARK,
            Theme::Cupcake => &CUPCAKE,
            Theme::Corporate => &CORPORATE,
            Theme::Forest => &FOREST,
            Theme::Synthwave => &SYNTHWAVE,
            Theme::Nord => &NORD,
            Theme::Other(_) => return None,
        };
        Some(spec.to_palette())
    }

    /// Palette for `theme`, using the dark palette for unknown names.
    pub fn for_theme(theme: &Theme) -> Self {
        Self::lookup(theme).unwrap_or_else(|| DARK.to_palette())
    }

    /// Every role with its name, in declaration order.
    pub fn roles(&self) -> [(&'static str, &str); 12] {
        [
            ("fg", self.fg.as_str()),
            ("grid", self.grid.as_str()),
            ("bg", self.bg.as_str()),
            ("surface", self.surface.as_str()),
            ("primary", self.primary.as_str()),
            ("primaryFill", self.primary_fill.as_str()),
            ("secondary", self.secondary.as_str()),
            ("accent", self.accent.as_str()),
            ("info", self.info.as_str()),
            ("success", self.success.as_str()),
            ("warning", self.warning.as_str()),
            ("error", self.error.as_str()),
        ]
    }

    /// Categorical series colours for sliced charts (pie, doughnut, polar).
    pub fn series(&self) -> [&str; 7] {
        [
            self.primary.as_str(),
            self.secondary.as_str(),
            self.accent.as_str(),
            self.info.as_str(),
            self.success.as_str(),
            self.warning.as_str(),
            self.error.as_str(),
        ]
    }
}

impl Default for Palette {
    fn default() -> Self {
        DARK.to_palette()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_known_theme_is_fully_populated() {
        for theme in Theme::ALL {
            let palette = Palette::lookup(&theme).expect("known theme has a palette");
            for (role, value) in palette.roles() {
                assert!(!value.is_empty(), "{theme}: role {role} is empty");
            }
        }
    }

    #[test]
    fn test_unknown_theme_falls_back_to_dark() {
        let unknown = Theme::parse("not-a-theme");
        assert_eq!(Palette::lookup(&unknown), None);
        assert_eq!(Palette::for_theme(&unknown), Palette::for_theme(&Theme::Dark));
    }

    #[test]
    fn test_primary_fill_is_translucent_primary() {
        let palette = Palette::for_theme(&Theme::Light);
        assert_eq!(palette.primary, "rgb(59, 130, 246)");
        assert_eq!(palette.primary_fill, "rgba(59, 130, 246, 0.25)");
    }

    #[test]
    fn test_cupcake_primary() {
        let palette = Palette::for_theme(&Theme::Cupcake);
        assert_eq!(palette.primary, "rgb(214, 88, 250)");
    }

    #[test]
    fn test_palette_serializes_with_camel_case_roles() {
        let json = serde_json::to_value(Palette::default()).unwrap();
        assert_eq!(json["primaryFill"], "rgba(96, 165, 250, 0.25)");
        assert_eq!(json["fg"], "rgb(229, 231, 235)");
    }
}
