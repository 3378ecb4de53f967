//! Theme resolution: stored preference to active theme, theme to palette.

use theme_palettes::{Palette, Theme, ThemeChoice};

use crate::platform::{read_preference, Page, PreferenceStore};

/// The stored preference, `dark` when absent, blank or unreadable.
pub fn stored_choice(store: &dyn PreferenceStore, key: &str) -> ThemeChoice {
    choice_from_stored(read_preference(store, key).as_deref())
}

/// Interpret a raw stored value. Blank counts as absent.
pub fn choice_from_stored(value: Option<&str>) -> ThemeChoice {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ThemeChoice::parse)
        .unwrap_or_default()
}

/// The theme currently in effect.
///
/// `system` is replaced by dark or light according to the OS preference.
/// Any other stored value is returned verbatim, recognised or not.
pub fn resolve_active_theme(store: &dyn PreferenceStore, page: &dyn Page, key: &str) -> Theme {
    stored_choice(store, key).resolve(page.prefers_dark())
}

/// A strategy for turning a theme into chart colours.
///
/// Implementations never fail: every role of the returned palette is set.
pub trait PaletteSource {
    fn resolve_palette(&self, theme: &Theme, page: &dyn Page) -> Palette;
}

/// Lookup in the hand-authored table; unknown themes get the dark palette.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPalettes;

impl PaletteSource for StaticPalettes {
    fn resolve_palette(&self, theme: &Theme, _page: &dyn Page) -> Palette {
        Palette::for_theme(theme)
    }
}

/// Reads DaisyUI custom properties from the document as it is right now.
///
/// The theme argument is ignored: the result reflects whatever `data-theme`
/// the page has applied, so this must only run after the attribute change
/// has been laid out.
#[derive(Debug, Clone, Copy, Default)]
pub struct CssVariablePalettes;

impl PaletteSource for CssVariablePalettes {
    fn resolve_palette(&self, _theme: &Theme, page: &dyn Page) -> Palette {
        Palette {
            fg: hsl_var(page, "--bc", None, "#e5e7eb"),
            grid: hsl_var(page, "--bc", Some(0.3), "rgba(107,114,128,.35)"),
            bg: hsl_var(page, "--b1", None, "#111827"),
            surface: hsl_var(page, "--b2", None, "#1f2937"),
            primary: hsl_var(page, "--p", None, "#3b82f6"),
            primary_fill: hsl_var(page, "--p", Some(0.25), "rgba(59,130,246,.25)"),
            secondary: hsl_var(page, "--s", None, "#6b7280"),
            accent: hsl_var(page, "--a", None, "#f59e0b"),
            info: hsl_var(page, "--in", None, "#3abff8"),
            success: hsl_var(page, "--su", None, "#22c55e"),
            warning: hsl_var(page, "--wa", None, "#f59e0b"),
            error: hsl_var(page, "--er", None, "#ef4444"),
        }
    }
}

/// `hsl(<var>)` or `hsl(<var> / alpha)`; the fallback is used as-is.
fn hsl_var(page: &dyn Page, name: &str, alpha: Option<f32>, fallback: &str) -> String {
    match (page.css_variable(name), alpha) {
        (Some(value), None) => format!("hsl({value})"),
        (Some(value), Some(alpha)) => format!("hsl({value} / {alpha})"),
        (None, _) => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{MemoryPage, MemoryStore};

    #[test]
    fn test_missing_preference_defaults_to_dark() {
        let store = MemoryStore::new();
        let page = MemoryPage::new();
        assert_eq!(resolve_active_theme(&store, &page, "theme"), Theme::Dark);
    }

    #[test]
    fn test_blank_stored_theme_counts_as_absent() {
        let page = MemoryPage::new();
        for blank in ["", "   "] {
            let store = MemoryStore::with_items([("theme", blank)]);
            assert_eq!(resolve_active_theme(&store, &page, "theme"), Theme::Dark);
        }
        assert_eq!(choice_from_stored(None), ThemeChoice::default());
        assert_eq!(
            choice_from_stored(Some(" system ")),
            ThemeChoice::System
        );
    }

    #[test]
    fn test_system_follows_os_preference() {
        let store = MemoryStore::with_items([("theme", "system")]);
        let page = MemoryPage::new();

        page.set_prefers_dark(true);
        assert_eq!(resolve_active_theme(&store, &page, "theme"), Theme::Dark);

        page.set_prefers_dark(false);
        assert_eq!(resolve_active_theme(&store, &page, "theme"), Theme::Light);
    }

    #[test]
    fn test_unknown_stored_theme_is_passed_through() {
        let store = MemoryStore::with_items([("theme", "retro")]);
        let page = MemoryPage::new();
        let theme = resolve_active_theme(&store, &page, "theme");
        assert_eq!(theme, Theme::Other("retro".to_string()));
        assert_eq!(
            StaticPalettes.resolve_palette(&theme, &page),
            Palette::for_theme(&Theme::Dark)
        );
    }

    #[test]
    fn test_unreadable_storage_defaults_to_dark() {
        let store = MemoryStore::with_items([("theme", "nord")]);
        store.set_failing(true);
        let page = MemoryPage::new();
        assert_eq!(resolve_active_theme(&store, &page, "theme"), Theme::Dark);
    }

    #[test]
    fn test_css_palette_wraps_variables_in_hsl() {
        let page = MemoryPage::new();
        page.set_css_variable("--p", "259 94% 51%");
        page.set_css_variable("--bc", "215 28% 17%");

        let palette = CssVariablePalettes.resolve_palette(&Theme::Light, &page);
        assert_eq!(palette.primary, "hsl(259 94% 51%)");
        assert_eq!(palette.primary_fill, "hsl(259 94% 51% / 0.25)");
        assert_eq!(palette.fg, "hsl(215 28% 17%)");
        assert_eq!(palette.grid, "hsl(215 28% 17% / 0.3)");
    }

    #[test]
    fn test_css_palette_falls_back_without_variables() {
        let page = MemoryPage::new();
        let palette = CssVariablePalettes.resolve_palette(&Theme::Dark, &page);
        assert_eq!(palette.primary, "#3b82f6");
        assert_eq!(palette.grid, "rgba(107,114,128,.35)");
        for (role, value) in palette.roles() {
            assert!(!value.is_empty(), "role {role} is empty");
        }
    }
}
