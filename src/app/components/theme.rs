//! Theme controls: the full theme dropdown and the light/dark quick toggle.
//!
//! Both render uncontrolled; their state is synced by the theme coordinator
//! after every application.

use dioxus::prelude::*;
use theme_palettes::theme::SYSTEM;
use theme_palettes::Theme;

/// Dropdown listing `system` followed by every known theme.
#[component]
pub fn ThemeSelect() -> Element {
    rsx! {
        select {
            id: "themeSelect",
            class: "select select-bordered select-sm",
            aria_label: "Theme",
            option { value: SYSTEM, "System" }
            for theme in Theme::ALL {
                option { value: "{theme}", "{theme.label()}" }
            }
        }
    }
}

/// Checked means dark.
#[component]
pub fn QuickToggle() -> Element {
    rsx! {
        label { class: "label cursor-pointer gap-2",
            span { class: "label-text", "Dark" }
            input {
                id: "quickToggle",
                r#type: "checkbox",
                class: "toggle toggle-sm",
            }
        }
    }
}

/// Client-side JavaScript for initial theme setup (included in head).
/// Runs before first paint to prevent a flash of the wrong theme. Reads the
/// same storage key as the coordinator.
pub fn theme_script(theme_key: &str) -> String {
    // a JSON string is a valid JS string literal
    let key = serde_json::Value::from(theme_key);
    format!(
        r#"
(function(){{
    var t = (localStorage.getItem({key}) || '').trim() || 'dark';
    if (t === 'system') {{
        t = window.matchMedia && window.matchMedia('(prefers-color-scheme: dark)').matches ? 'dark' : 'light';
    }}
    document.documentElement.setAttribute('data-theme', t);
}})();
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_script_reads_configured_key() {
        let script = theme_script("dashboard.theme");
        assert!(script.contains(r#"localStorage.getItem("dashboard.theme")"#));
        assert!(script.contains("'dark'"));
    }

    #[test]
    fn test_theme_script_escapes_key() {
        let script = theme_script(r#"a"b"#);
        assert!(script.contains(r#"getItem("a\"b")"#));
    }
}
