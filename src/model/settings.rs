/// Theme selection. `System` is represented by the absence of a stored
/// value; the other three are persisted under the `theme` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeChoice {
    #[default]
    System,
    Light,
    Dim,
    Dark,
}

impl ThemeChoice {
    /// Cycle: system → light → dim → dark → system
    pub fn next(self) -> ThemeChoice {
        match self {
            ThemeChoice::System => ThemeChoice::Light,
            ThemeChoice::Light => ThemeChoice::Dim,
            ThemeChoice::Dim => ThemeChoice::Dark,
            ThemeChoice::Dark => ThemeChoice::System,
        }
    }

    /// Stored string value; `None` for system (key removed)
    pub fn as_stored(self) -> Option<&'static str> {
        match self {
            ThemeChoice::System => None,
            ThemeChoice::Light => Some("light"),
            ThemeChoice::Dim => Some("dim"),
            ThemeChoice::Dark => Some("dark"),
        }
    }

    /// Parse a stored value; unknown strings fall back to system
    pub fn from_stored(value: Option<&str>) -> ThemeChoice {
        match value {
            Some("light") => ThemeChoice::Light,
            Some("dim") => ThemeChoice::Dim,
            Some("dark") => ThemeChoice::Dark,
            _ => ThemeChoice::System,
        }
    }
}
