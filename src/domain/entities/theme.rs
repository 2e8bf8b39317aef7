//! Light/dark theme preference.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Persisted color scheme choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Light background (default).
    #[default]
    Light,
    /// Dark background.
    Dark,
}

impl ThemePreference {
    /// Returns the opposite preference.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Returns whether the dark scheme is active.
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Returns the stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("dark", Ok(ThemePreference::Dark) ; "dark")]
    #[test_case("light\n", Ok(ThemePreference::Light) ; "light with newline")]
    #[test_case("Dark", Err("unknown theme 'Dark'".to_string()) ; "case sensitive")]
    fn test_parse(input: &str, expected: Result<ThemePreference, String>) {
        assert_eq!(input.parse::<ThemePreference>(), expected);
    }

    #[test]
    fn test_toggle() {
        assert_eq!(ThemePreference::default(), ThemePreference::Light);
        assert_eq!(ThemePreference::Light.toggled(), ThemePreference::Dark);
        assert_eq!(ThemePreference::Dark.toggled().toggled(), ThemePreference::Dark);
    }
}
