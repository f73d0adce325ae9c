use std::fmt;

use serde::{Deserialize, Serialize};

/// Appearance of the interface. Cycles light → dark → blue → light.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Blue,
}

impl Theme {
    pub fn next(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Blue,
            Theme::Blue => Theme::Light,
        }
    }

    /// Presentation attribute value for this theme.
    pub fn attribute(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Blue => "blue",
        }
    }

    /// Label for the theme toggle.
    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "☀ Light",
            Theme::Dark => "☾ Dark",
            Theme::Blue => "◆ Blue",
        }
    }

    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Light => ThemeColors::light(),
            Theme::Dark => ThemeColors::dark(),
            Theme::Blue => ThemeColors::blue(),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute())
    }
}

/// Holds the current theme for a running session.
///
/// There is no global instance: the controller is created from config and
/// handed to whatever renders, so nothing can read a theme that was never
/// provided.
#[derive(Debug, Clone)]
pub struct ThemeController {
    current: Theme,
}

impl ThemeController {
    pub fn new(initial: Theme) -> Self {
        Self { current: initial }
    }

    pub fn theme(&self) -> Theme {
        self.current
    }

    /// Advance to the next theme and return it.
    pub fn toggle(&mut self) -> Theme {
        self.current = self.current.next();
        tracing::debug!(theme = %self.current, "theme changed");
        self.current
    }

    pub fn attribute(&self) -> &'static str {
        self.current.attribute()
    }

    pub fn colors(&self) -> ThemeColors {
        self.current.colors()
    }
}

/// RGB color values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Theme color palette
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeColors {
    /// Main background
    pub background: Rgb,
    /// Regular text
    pub text: Rgb,
    /// Muted/secondary text color
    pub muted: Rgb,
    /// Accent for headers, selection and the active filter
    pub accent: Rgb,
    /// Completed todos and success messages
    pub success: Rgb,
    /// Error messages
    pub error: Rgb,
    /// Selected row background
    pub selection: Rgb,
    /// Borders and separators
    pub border: Rgb,
}

impl ThemeColors {
    pub fn light() -> Self {
        Self {
            background: Rgb::new(250, 250, 250),
            text: Rgb::new(40, 40, 48),
            muted: Rgb::new(120, 120, 135),
            accent: Rgb::new(30, 102, 245),
            success: Rgb::new(64, 160, 43),
            error: Rgb::new(210, 15, 57),
            selection: Rgb::new(220, 224, 240),
            border: Rgb::new(188, 192, 204),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Rgb::new(24, 24, 32),
            text: Rgb::new(220, 220, 230),
            muted: Rgb::new(140, 140, 160),
            accent: Rgb::new(147, 197, 253),
            success: Rgb::new(134, 239, 172),
            error: Rgb::new(252, 129, 129),
            selection: Rgb::new(50, 50, 70),
            border: Rgb::new(80, 80, 100),
        }
    }

    pub fn blue() -> Self {
        Self {
            background: Rgb::new(16, 32, 64),
            text: Rgb::new(214, 228, 255),
            muted: Rgb::new(130, 155, 200),
            accent: Rgb::new(125, 211, 252),
            success: Rgb::new(110, 231, 183),
            error: Rgb::new(251, 146, 160),
            selection: Rgb::new(30, 58, 110),
            border: Rgb::new(60, 90, 150),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_cycles_three_states() {
        let mut controller = ThemeController::new(Theme::Light);
        assert_eq!(controller.toggle(), Theme::Dark);
        assert_eq!(controller.toggle(), Theme::Blue);
        assert_eq!(controller.toggle(), Theme::Light);
        assert_eq!(controller.attribute(), "light");
    }

    #[test]
    fn test_palette_follows_theme() {
        let mut controller = ThemeController::new(Theme::Dark);
        assert_eq!(controller.colors(), ThemeColors::dark());
        controller.toggle();
        assert_eq!(controller.colors(), ThemeColors::blue());
    }

    #[test]
    fn test_theme_serde_round_trip() {
        for (variant, expected_json) in [
            (Theme::Light, "\"light\""),
            (Theme::Dark, "\"dark\""),
            (Theme::Blue, "\"blue\""),
        ] {
            let json = serde_json::to_string(&variant).unwrap();
            assert_eq!(json, expected_json);
            let deserialized: Theme = serde_json::from_str(&json).unwrap();
            assert_eq!(deserialized, variant);
        }
    }
}
