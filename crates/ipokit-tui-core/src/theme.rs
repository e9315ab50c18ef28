//! Color themes for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Theme name.
    pub name: String,

    // Background hierarchy
    /// Base background - darkest.
    pub background: Color,
    /// Panel background (cards, dialogs).
    pub background_panel: Color,
    /// Element background (inputs, badges).
    pub background_element: Color,

    // Text colors
    /// Primary text color.
    pub text: Color,
    /// Muted/secondary text.
    pub text_muted: Color,

    // Brand colors
    /// Primary brand color (navy on light, gold on dark).
    pub primary: Color,
    /// Secondary brand color.
    pub secondary: Color,
    /// Highlight accent.
    pub accent: Color,

    // Semantic colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // Border colors
    /// Default border.
    pub border: Color,
    /// Active/focused border.
    pub border_active: Color,
    /// Subtle border.
    pub border_subtle: Color,

    // Widget specific
    /// Skeleton placeholder base color.
    pub skeleton_base: Color,
    /// Skeleton shimmer highlight.
    pub skeleton_highlight: Color,
    /// Filled rating star.
    pub star: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::ipokit()
    }
}

impl Theme {
    /// Get a theme by name.
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "contrast" | "high-contrast" => Self::high_contrast(),
            _ => Self::ipokit(),
        }
    }

    /// List available theme names.
    pub fn available() -> Vec<&'static str> {
        vec!["ipokit", "light", "high-contrast"]
    }

    /// Default brand theme: deep navy with gold accents.
    pub fn ipokit() -> Self {
        Self {
            name: "ipokit".to_string(),

            background: Color::Rgb(11, 19, 43),          // #0b132b
            background_panel: Color::Rgb(18, 29, 61),    // #121d3d
            background_element: Color::Rgb(28, 41, 81),  // #1c2951

            text: Color::Rgb(241, 245, 249),       // #f1f5f9
            text_muted: Color::Rgb(148, 163, 184), // #94a3b8

            primary: Color::Rgb(212, 175, 55),   // #d4af37 (gold)
            secondary: Color::Rgb(96, 165, 250), // #60a5fa (sky)
            accent: Color::Rgb(45, 212, 191),    // #2dd4bf (teal)

            success: Color::Rgb(74, 222, 128), // #4ade80
            warning: Color::Rgb(251, 191, 36), // #fbbf24
            error: Color::Rgb(248, 113, 113),  // #f87171
            info: Color::Rgb(96, 165, 250),    // #60a5fa

            border: Color::Rgb(51, 65, 85),         // #334155
            border_active: Color::Rgb(212, 175, 55), // primary
            border_subtle: Color::Rgb(30, 41, 59),  // #1e293b

            skeleton_base: Color::Rgb(30, 41, 59),
            skeleton_highlight: Color::Rgb(71, 85, 105),
            star: Color::Rgb(250, 204, 21), // #facc15
        }
    }

    /// Light corporate theme.
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),

            background: Color::Rgb(255, 255, 255),
            background_panel: Color::Rgb(248, 250, 252),   // #f8fafc
            background_element: Color::Rgb(241, 245, 249), // #f1f5f9

            text: Color::Rgb(15, 23, 42),          // #0f172a
            text_muted: Color::Rgb(100, 116, 139), // #64748b

            primary: Color::Rgb(30, 58, 138),    // #1e3a8a (navy)
            secondary: Color::Rgb(37, 99, 235),  // #2563eb
            accent: Color::Rgb(202, 138, 4),     // #ca8a04 (gold)

            success: Color::Rgb(22, 163, 74),
            warning: Color::Rgb(217, 119, 6),
            error: Color::Rgb(220, 38, 38),
            info: Color::Rgb(37, 99, 235),

            border: Color::Rgb(203, 213, 225),
            border_active: Color::Rgb(30, 58, 138),
            border_subtle: Color::Rgb(226, 232, 240),

            skeleton_base: Color::Rgb(226, 232, 240),
            skeleton_highlight: Color::Rgb(241, 245, 249),
            star: Color::Rgb(234, 179, 8),
        }
    }

    /// High contrast theme using the basic terminal palette.
    pub fn high_contrast() -> Self {
        Self {
            name: "high-contrast".to_string(),

            background: Color::Black,
            background_panel: Color::Black,
            background_element: Color::DarkGray,

            text: Color::White,
            text_muted: Color::Gray,

            primary: Color::Yellow,
            secondary: Color::Cyan,
            accent: Color::Magenta,

            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            info: Color::Cyan,

            border: Color::White,
            border_active: Color::Yellow,
            border_subtle: Color::Gray,

            skeleton_base: Color::DarkGray,
            skeleton_highlight: Color::Gray,
            star: Color::Yellow,
        }
    }

    // Style helper methods

    /// Base text style.
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// Muted text style.
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    /// Primary brand style.
    pub fn primary_style(&self) -> Style {
        Style::default().fg(self.primary)
    }

    /// Secondary brand style.
    pub fn secondary_style(&self) -> Style {
        Style::default().fg(self.secondary)
    }

    /// Accent style.
    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn info_style(&self) -> Style {
        Style::default().fg(self.info)
    }

    /// Border style (not focused).
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Active border style.
    pub fn border_active_style(&self) -> Style {
        Style::default().fg(self.border_active)
    }

    /// Style with background panel color.
    pub fn panel_style(&self) -> Style {
        Style::default().bg(self.background_panel)
    }

    /// Style with element background.
    pub fn element_style(&self) -> Style {
        Style::default().bg(self.background_element)
    }

    /// Bold text style.
    pub fn bold(&self) -> Style {
        Style::default().fg(self.text).add_modifier(Modifier::BOLD)
    }

    /// Dimmed text, used for fading content.
    pub fn dim_style(&self) -> Style {
        self.muted_style().add_modifier(Modifier::DIM)
    }

    pub fn highlight_style(&self) -> Style {
        self.primary_style().add_modifier(Modifier::BOLD)
    }
}
