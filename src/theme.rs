//! Light/dark theme selection, persisted through [`Storage`].

use crate::storage::{Storage, THEME_KEY};

/// The two editor themes.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Flip between light and dark.
    pub const fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// Load the persisted theme, defaulting to light.
pub fn load_theme(storage: &dyn Storage) -> Theme {
    storage
        .load(THEME_KEY)
        .ok()
        .flatten()
        .and_then(|value| Theme::parse(value.trim()))
        .unwrap_or_default()
}

/// Persist a theme choice.
///
/// # Errors
/// Returns an error if the backing store cannot be written.
pub fn save_theme(storage: &mut dyn Storage, theme: Theme) -> anyhow::Result<()> {
    storage.save(THEME_KEY, theme.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_toggle_flips_both_ways() {
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
    }

    #[test]
    fn test_theme_round_trip_through_storage() {
        let mut storage = MemoryStorage::new();
        save_theme(&mut storage, Theme::Dark).unwrap();
        assert_eq!(load_theme(&storage), Theme::Dark);
    }

    #[test]
    fn test_missing_or_garbage_value_defaults_to_light() {
        let mut storage = MemoryStorage::new();
        assert_eq!(load_theme(&storage), Theme::Light);
        storage.save(THEME_KEY, "solarized").unwrap();
        assert_eq!(load_theme(&storage), Theme::Light);
    }
}
