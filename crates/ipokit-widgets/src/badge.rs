//! Inline label badges.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use ipokit_tui_core::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeVariant {
    #[default]
    Default,
    Secondary,
    Success,
    Warning,
    Destructive,
    Outline,
}

/// A short label drawn as a filled chip.
#[derive(Debug, Clone)]
pub struct Badge {
    label: String,
    variant: BadgeVariant,
}

impl Badge {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            variant: BadgeVariant::Default,
        }
    }

    pub fn variant(mut self, variant: BadgeVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Display width including padding.
    pub fn width(&self) -> u16 {
        (self.label.width() + 2).min(u16::MAX as usize) as u16
    }

    pub fn style(&self, theme: &Theme) -> Style {
        let filled = |color| {
            Style::default()
                .fg(theme.background)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        };
        match self.variant {
            BadgeVariant::Default => filled(theme.primary),
            BadgeVariant::Secondary => Style::default()
                .fg(theme.text)
                .bg(theme.background_element),
            BadgeVariant::Success => filled(theme.success),
            BadgeVariant::Warning => filled(theme.warning),
            BadgeVariant::Destructive => filled(theme.error),
            BadgeVariant::Outline => theme.border_active_style(),
        }
    }

    /// The badge as a span, for composing into a line.
    pub fn span(&self, theme: &Theme) -> Span<'_> {
        let text = match self.variant {
            BadgeVariant::Outline => format!("[{}]", self.label),
            _ => format!(" {} ", self.label),
        };
        Span::styled(text, self.style(theme))
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        frame.render_widget(Paragraph::new(self.span(theme)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_variant() {
        let badge = Badge::new("New");
        assert_eq!(badge.variant, BadgeVariant::Default);
        assert_eq!(badge.label(), "New");
    }

    #[test]
    fn test_width_counts_display_columns() {
        assert_eq!(Badge::new("IPO").width(), 5);
        // Wide characters take two columns each
        assert_eq!(Badge::new("上場").width(), 6);
    }

    #[test]
    fn test_variant_styles() {
        let theme = Theme::default();
        let success = Badge::new("ok").variant(BadgeVariant::Success).style(&theme);
        assert_eq!(success.bg, Some(theme.success));

        let destructive = Badge::new("x").variant(BadgeVariant::Destructive).style(&theme);
        assert_eq!(destructive.bg, Some(theme.error));

        let outline = Badge::new("x").variant(BadgeVariant::Outline).style(&theme);
        assert_eq!(outline.bg, None);
    }

    #[test]
    fn test_span_text() {
        let theme = Theme::default();
        assert_eq!(Badge::new("New").span(&theme).content, " New ");
        assert_eq!(
            Badge::new("New")
                .variant(BadgeVariant::Outline)
                .span(&theme)
                .content,
            "[New]"
        );
    }
}
