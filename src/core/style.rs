//! Named map styles resolvable from a directive's style key.
//!
//! The table is static and read-only; everything stateful is passed
//! explicitly rather than reached through globals.

use fxhash::FxHashMap;
use once_cell::sync::Lazy;

/// Style key every unknown key falls back to
pub const DEFAULT_STYLE_KEY: &str = "default";

static STYLES: Lazy<FxHashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut styles = FxHashMap::default();
    styles.insert("default", "https://tiles.maptext.dev/styles/streets/style.json");
    styles.insert("streets", "https://tiles.maptext.dev/styles/streets/style.json");
    styles.insert("satellite", "https://tiles.maptext.dev/styles/satellite/style.json");
    styles.insert("outdoor", "https://tiles.maptext.dev/styles/outdoor/style.json");
    styles.insert("winter", "https://tiles.maptext.dev/styles/winter/style.json");
    styles.insert("dark", "https://tiles.maptext.dev/styles/dark/style.json");
    styles
});

/// Resolves a style key to its style URL, falling back to the default style
/// for unknown keys
pub fn resolve_style(key: &str) -> &'static str {
    STYLES
        .get(key)
        .or_else(|| STYLES.get(DEFAULT_STYLE_KEY))
        .copied()
        .unwrap_or("")
}

/// Returns whether the key names a known style
pub fn is_known_style(key: &str) -> bool {
    STYLES.contains_key(key)
}
