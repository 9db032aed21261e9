use ratatui::style::Color;

use crate::model::{Priority, ThemeChoice};

/// Resolved color palette for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub dim: Color,
    pub highlight: Color,
    pub selection_bg: Color,
    pub done: Color,
    pub error: Color,
    pub progress: Color,
    pub low: Color,
    pub medium: Color,
    pub high: Color,
}

impl Theme {
    /// Resolve the palette for a theme choice. `System` keeps the
    /// terminal's own colors instead of painting a palette over them.
    pub fn for_choice(choice: ThemeChoice) -> Theme {
        match choice {
            ThemeChoice::System => Theme::system(),
            ThemeChoice::Light => Theme::light(),
            ThemeChoice::Dim => Theme::dim_palette(),
            ThemeChoice::Dark => Theme::dark(),
        }
    }

    fn system() -> Theme {
        Theme {
            background: Color::Reset,
            text: Color::Reset,
            text_bright: Color::White,
            dim: Color::DarkGray,
            highlight: Color::Cyan,
            selection_bg: Color::DarkGray,
            done: Color::Green,
            error: Color::Red,
            progress: Color::Cyan,
            low: Color::Blue,
            medium: Color::Yellow,
            high: Color::Red,
        }
    }

    fn light() -> Theme {
        Theme {
            background: Color::Rgb(0xFA, 0xFA, 0xF5),
            text: Color::Rgb(0x33, 0x33, 0x3D),
            text_bright: Color::Rgb(0x11, 0x11, 0x18),
            dim: Color::Rgb(0x8A, 0x8A, 0x96),
            highlight: Color::Rgb(0x00, 0x66, 0xCC),
            selection_bg: Color::Rgb(0xE4, 0xEA, 0xF4),
            done: Color::Rgb(0x22, 0x88, 0x44),
            error: Color::Rgb(0xC0, 0x2D, 0x2D),
            progress: Color::Rgb(0x00, 0x66, 0xCC),
            low: Color::Rgb(0x44, 0x77, 0xBB),
            medium: Color::Rgb(0xAA, 0x77, 0x00),
            high: Color::Rgb(0xC0, 0x2D, 0x2D),
        }
    }

    fn dim_palette() -> Theme {
        Theme {
            background: Color::Rgb(0x23, 0x27, 0x2E),
            text: Color::Rgb(0xAD, 0xB5, 0xBD),
            text_bright: Color::Rgb(0xE9, 0xEC, 0xEF),
            dim: Color::Rgb(0x6C, 0x75, 0x7D),
            highlight: Color::Rgb(0x6C, 0xB2, 0xEB),
            selection_bg: Color::Rgb(0x34, 0x3A, 0x43),
            done: Color::Rgb(0x7E, 0xC6, 0x99),
            error: Color::Rgb(0xE5, 0x74, 0x74),
            progress: Color::Rgb(0x6C, 0xB2, 0xEB),
            low: Color::Rgb(0x74, 0xA3, 0xDE),
            medium: Color::Rgb(0xE0, 0xB5, 0x6D),
            high: Color::Rgb(0xE5, 0x74, 0x74),
        }
    }

    fn dark() -> Theme {
        Theme {
            background: Color::Rgb(0x0E, 0x10, 0x16),
            text: Color::Rgb(0xC3, 0xC7, 0xD1),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            dim: Color::Rgb(0x5C, 0x63, 0x70),
            highlight: Color::Rgb(0x58, 0xA6, 0xFF),
            selection_bg: Color::Rgb(0x1F, 0x26, 0x35),
            done: Color::Rgb(0x3F, 0xB9, 0x50),
            error: Color::Rgb(0xF8, 0x51, 0x49),
            progress: Color::Rgb(0x58, 0xA6, 0xFF),
            low: Color::Rgb(0x58, 0x8C, 0xD6),
            medium: Color::Rgb(0xD2, 0x99, 0x22),
            high: Color::Rgb(0xF8, 0x51, 0x49),
        }
    }

    /// Accent color for a task's priority
    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::Low => self.low,
            Priority::Medium => self.medium,
            Priority::High => self.high,
        }
    }
}

/// Short label for the status row (the current theme state)
pub fn choice_label(choice: ThemeChoice) -> &'static str {
    match choice {
        ThemeChoice::System => "system",
        ThemeChoice::Light => "light",
        ThemeChoice::Dim => "dim",
        ThemeChoice::Dark => "dark",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_palette_keeps_terminal_colors() {
        let theme = Theme::for_choice(ThemeChoice::System);
        assert_eq!(theme.background, Color::Reset);
        assert_eq!(theme.text, Color::Reset);
    }

    #[test]
    fn each_choice_resolves_to_a_distinct_background() {
        let backgrounds: Vec<Color> = [
            ThemeChoice::System,
            ThemeChoice::Light,
            ThemeChoice::Dim,
            ThemeChoice::Dark,
        ]
        .into_iter()
        .map(|c| Theme::for_choice(c).background)
        .collect();
        for (i, a) in backgrounds.iter().enumerate() {
            for b in &backgrounds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn priority_colors_map_to_accents() {
        let theme = Theme::for_choice(ThemeChoice::Dark);
        assert_eq!(theme.priority_color(Priority::High), theme.high);
        assert_eq!(theme.priority_color(Priority::Low), theme.low);
    }

    #[test]
    fn labels_match_stored_values() {
        assert_eq!(choice_label(ThemeChoice::System), "system");
        assert_eq!(choice_label(ThemeChoice::Dark), "dark");
    }
}
