//! Progress indicators: a percentage bar and a step tracker.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
    Frame,
};

use ipokit_tui_core::Theme;

/// Horizontal percentage bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressBar {
    value: f64,
    label: Option<String>,
}

impl ProgressBar {
    /// Create a bar. The value is clamped to `0..=100`; NaN counts as zero.
    pub fn new(value: f64) -> Self {
        Self {
            value: clamp_percent(value),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = clamp_percent(value);
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let text = match &self.label {
            Some(label) => format!("{label} {:.0}%", self.value),
            None => format!("{:.0}%", self.value),
        };
        let gauge = Gauge::default()
            .gauge_style(
                Style::default()
                    .fg(theme.primary)
                    .bg(theme.background_element),
            )
            .ratio(self.value / 100.0)
            .label(Span::styled(text, theme.bold()));
        frame.render_widget(gauge, area);
    }
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Numbered steps with the current one highlighted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepIndicator {
    steps: Vec<String>,
    /// Zero-based current step.
    current: usize,
}

impl StepIndicator {
    pub fn new<I, S>(steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            steps: steps.into_iter().map(Into::into).collect(),
            current: 0,
        }
    }

    pub fn with_current(mut self, current: usize) -> Self {
        self.set_current(current);
        self
    }

    pub fn set_current(&mut self, current: usize) {
        self.current = current.min(self.steps.len().saturating_sub(1));
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn next_step(&mut self) -> bool {
        if self.current + 1 < self.steps.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_step(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Whether the last step is current.
    pub fn is_complete(&self) -> bool {
        !self.steps.is_empty() && self.current + 1 == self.steps.len()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut spans = Vec::new();
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" ─ ", theme.border_style()));
            }
            let (marker, style) = if i < self.current {
                ("✓".to_string(), theme.success_style())
            } else if i == self.current {
                (
                    (i + 1).to_string(),
                    theme.primary_style().add_modifier(Modifier::BOLD),
                )
            } else {
                ((i + 1).to_string(), theme.muted_style())
            };
            spans.push(Span::styled(format!("{marker} {step}"), style));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
