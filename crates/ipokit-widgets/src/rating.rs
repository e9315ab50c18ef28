//! Star rating display.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use ipokit_tui_core::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarFill {
    Full,
    Half,
    Empty,
}

impl StarFill {
    pub fn glyph(self) -> &'static str {
        match self {
            StarFill::Full => "★",
            StarFill::Half => "✭",
            StarFill::Empty => "☆",
        }
    }
}

/// A rating out of `max` stars, shown in half-star steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingStars {
    value: f32,
    max: u8,
    show_value: bool,
}

impl RatingStars {
    /// Create a rating. The value is clamped to `0..=max`; NaN counts as zero.
    pub fn new(value: f32, max: u8) -> Self {
        let value = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, max as f32)
        };
        Self {
            value,
            max,
            show_value: false,
        }
    }

    /// Append the numeric value after the stars.
    pub fn with_value_label(mut self, show: bool) -> Self {
        self.show_value = show;
        self
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Fill of each star, rounding the value to the nearest half.
    pub fn stars(&self) -> Vec<StarFill> {
        let halves = (self.value * 2.0).round() as u32;
        (0..self.max as u32)
            .map(|i| match halves.saturating_sub(i * 2) {
                0 => StarFill::Empty,
                1 => StarFill::Half,
                _ => StarFill::Full,
            })
            .collect()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let star_style = ratatui::style::Style::default().fg(theme.star);
        let mut spans: Vec<Span> = self
            .stars()
            .into_iter()
            .map(|fill| match fill {
                StarFill::Empty => Span::styled(fill.glyph(), theme.muted_style()),
                _ => Span::styled(fill.glyph(), star_style),
            })
            .collect();
        if self.show_value {
            spans.push(Span::styled(
                format!(" {:.1}", self.value),
                theme.muted_style(),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
