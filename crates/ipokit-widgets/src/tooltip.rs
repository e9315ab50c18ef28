//! Hover tooltips with a show delay.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

use ipokit_tui_core::Theme;
use ipokit_util::{Scheduler, TimerId};

/// Hover time before a tooltip appears.
pub const DEFAULT_TOOLTIP_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct Tooltip {
    text: String,
    delay: Duration,
    scheduler: Scheduler<()>,
    pending: Option<TimerId>,
    visible: bool,
    anchor: Option<Rect>,
}

impl Tooltip {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            delay: DEFAULT_TOOLTIP_DELAY,
            scheduler: Scheduler::new(),
            pending: None,
            visible: false,
            anchor: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Pointer entered `anchor`. Schedules the show unless already shown or pending.
    pub fn hover(&mut self, anchor: Rect, now: DateTime<Utc>) {
        self.anchor = Some(anchor);
        if self.visible || self.pending.is_some() {
            return;
        }
        self.pending = Some(self.scheduler.schedule_once(now, self.delay, ()));
    }

    /// Pointer left: hide and cancel any pending show.
    pub fn leave(&mut self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel(id);
        }
        self.visible = false;
    }

    /// Drop all timers.
    pub fn unmount(&mut self) {
        self.scheduler.cancel_all();
        self.pending = None;
        self.visible = false;
        self.anchor = None;
    }

    /// Returns `true` when the tooltip becomes visible on this call.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        if self.scheduler.poll(now).is_empty() {
            return false;
        }
        self.pending = None;
        self.visible = true;
        true
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Area the tooltip occupies within `bounds`: above the anchor when there
    /// is room, otherwise below.
    pub fn placement(&self, bounds: Rect) -> Option<Rect> {
        let anchor = self.anchor?;
        let width = (self.text.width() as u16 + 4).min(bounds.width);
        let height = 3u16;
        if width == 0 || bounds.height < height {
            return None;
        }

        let max_x = bounds.x + bounds.width - width;
        let x = anchor.x.clamp(bounds.x, max_x);
        let y = if anchor.y >= bounds.y + height {
            anchor.y - height
        } else {
            (anchor.y + anchor.height).min(bounds.y + bounds.height - height)
        };
        Some(Rect::new(x, y, width, height))
    }

    pub fn render(&self, frame: &mut Frame, bounds: Rect, theme: &Theme) {
        if !self.visible {
            return;
        }
        let Some(area) = self.placement(bounds) else {
            return;
        };

        frame.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_active_style())
            .style(theme.element_style());
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(self.text.as_str(), theme.text_style())))
                .block(block),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 1, 10, 0, 0).unwrap()
    }

    fn ms(n: i64) -> chrono::Duration {
        chrono::Duration::milliseconds(n)
    }

    fn anchor() -> Rect {
        Rect::new(10, 10, 8, 1)
    }

    #[test]
    fn test_shows_after_delay() {
        let mut tip = Tooltip::new("Book a consultation");
        tip.hover(anchor(), t0());
        assert!(tip.is_pending());
        assert!(!tip.tick(t0() + ms(499)));
        assert!(tip.tick(t0() + ms(500)));
        assert!(tip.is_visible());
        assert!(!tip.is_pending());
    }

    #[test]
    fn test_leave_cancels_pending_show() {
        let mut tip = Tooltip::new("x");
        tip.hover(anchor(), t0());
        tip.leave();
        assert!(!tip.tick(t0() + ms(1000)));
        assert!(!tip.is_visible());
    }

    #[test]
    fn test_repeated_hover_does_not_restart_delay() {
        let mut tip = Tooltip::new("x");
        tip.hover(anchor(), t0());
        tip.hover(anchor(), t0() + ms(300));
        assert!(tip.tick(t0() + ms(500)));
    }

    #[test]
    fn test_unmount_cancels() {
        let mut tip = Tooltip::new("x");
        tip.hover(anchor(), t0());
        tip.unmount();
        assert!(!tip.tick(t0() + ms(1000)));
    }

    #[test]
    fn test_placement_prefers_above() {
        let mut tip = Tooltip::new("hint");
        let bounds = Rect::new(0, 0, 80, 24);
        tip.hover(anchor(), t0());
        assert_eq!(tip.placement(bounds), Some(Rect::new(10, 7, 8, 3)));

        tip.hover(Rect::new(78, 1, 2, 1), t0());
        // No room above, and clamped to the right edge
        assert_eq!(tip.placement(bounds), Some(Rect::new(72, 2, 8, 3)));
    }
}
