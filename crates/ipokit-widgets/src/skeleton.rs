//! Placeholder blocks shown while content loads.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use ipokit_tui_core::Theme;

/// Width of the moving highlight, in columns.
const SHIMMER_WIDTH: usize = 6;

/// Animated placeholder made of bars of varying width.
#[derive(Debug, Clone)]
pub struct Skeleton {
    /// Width of each bar as a percentage of the area.
    lines: Vec<u8>,
    /// Shimmer position.
    frame: usize,
    active: bool,
}

impl Default for Skeleton {
    fn default() -> Self {
        Self::new()
    }
}

impl Skeleton {
    /// A card-shaped placeholder: a title bar and two body lines.
    pub fn new() -> Self {
        Self::with_lines(vec![60, 100, 80])
    }

    /// Bars with the given widths in percent (capped at 100).
    pub fn with_lines(lines: Vec<u8>) -> Self {
        Self {
            lines: lines.into_iter().map(|w| w.min(100)).collect(),
            frame: 0,
            active: true,
        }
    }

    pub fn start(&mut self) {
        self.active = true;
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance the shimmer by one column.
    pub fn tick(&mut self) {
        if self.active {
            self.frame = self.frame.wrapping_add(1);
        }
    }

    pub fn height(&self) -> u16 {
        self.lines.len() as u16
    }

    /// Shimmer column for a bar of `width` columns.
    fn shimmer_at(&self, width: usize) -> usize {
        self.frame % (width + SHIMMER_WIDTH).max(1)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let base = Style::default().fg(theme.skeleton_base);
        let highlight = Style::default().fg(theme.skeleton_highlight);
        let total = area.width as usize;

        let lines: Vec<Line> = self
            .lines
            .iter()
            .take(area.height as usize)
            .map(|percent| {
                let width = total * *percent as usize / 100;
                if !self.active {
                    return Line::from(Span::styled("▆".repeat(width), base));
                }
                let head = self.shimmer_at(width);
                let start = head.saturating_sub(SHIMMER_WIDTH).min(width);
                let end = head.min(width);
                Line::from(vec![
                    Span::styled("▆".repeat(start), base),
                    Span::styled("▆".repeat(end - start), highlight),
                    Span::styled("▆".repeat(width - end), base),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths_capped() {
        let skeleton = Skeleton::with_lines(vec![50, 150]);
        assert_eq!(skeleton.lines, vec![50, 100]);
        assert_eq!(skeleton.height(), 2);
    }

    #[test]
    fn test_tick_advances_only_when_active() {
        let mut skeleton = Skeleton::new();
        skeleton.tick();
        skeleton.tick();
        assert_eq!(skeleton.frame, 2);

        skeleton.stop();
        skeleton.tick();
        assert_eq!(skeleton.frame, 2);
        assert!(!skeleton.is_active());
    }

    #[test]
    fn test_shimmer_wraps() {
        let mut skeleton = Skeleton::new();
        for _ in 0..(10 + SHIMMER_WIDTH) {
            skeleton.tick();
        }
        assert_eq!(skeleton.shimmer_at(10), 0);
        assert_eq!(skeleton.shimmer_at(0), 16 % SHIMMER_WIDTH);
    }
}
