//! Light/dark theme preference, persisted under the `theme` key.
//!
//! Reading never fails: a missing, unreadable or unknown value means light.
//! Writing is best-effort like every other preference write.

use serde::Serialize;
use std::fmt;

use crate::store::KeyValueStore;

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn load_theme<S: KeyValueStore + ?Sized>(store: &S) -> Theme {
    match store.get(THEME_KEY) {
        Ok(Some(raw)) => Theme::parse(&raw).unwrap_or_default(),
        Ok(None) => Theme::default(),
        Err(e) => {
            tracing::warn!(error = %e, "theme preference unavailable");
            Theme::default()
        }
    }
}

/// Persists `theme`. Returns false if the write failed.
pub fn store_theme<S: KeyValueStore + ?Sized>(store: &S, theme: Theme) -> bool {
    match store.set(THEME_KEY, theme.as_str()) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "theme preference not saved");
            false
        }
    }
}

/// Flips the stored theme and returns the new one. The returned theme applies
/// even if it could not be persisted.
pub fn toggle_theme<S: KeyValueStore + ?Sized>(store: &S) -> Theme {
    let next = load_theme(store).toggled();
    store_theme(store, next);
    next
}
