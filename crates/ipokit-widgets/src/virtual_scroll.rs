//! Virtualized list: only the visible slice of a long list is rendered.
//!
//! Items have a fixed height in rows. The mounted range is recomputed on every
//! scroll from the offset, the container height and an overscan margin, while
//! the scrollbar is always sized from the full `item_count * item_height`.

use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use std::ops::Range;
use tracing::trace;

use ipokit_tui_core::Theme;

/// Extra items mounted above and below the visible window.
pub const DEFAULT_OVERSCAN: usize = 3;

/// Mounted slice of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VirtualWindow {
    pub scroll_offset: usize,
    /// First mounted index.
    pub first_visible: usize,
    /// One past the last mounted index.
    pub last_visible: usize,
    pub total_height: usize,
}

impl VirtualWindow {
    /// Compute the window for a scroll position.
    ///
    /// The offset is clamped so the list cannot scroll past its end. A zero
    /// item height or an empty list yields an empty window.
    pub fn compute(
        scroll_offset: usize,
        container_height: usize,
        item_height: usize,
        item_count: usize,
        overscan: usize,
    ) -> Self {
        if item_height == 0 || item_count == 0 {
            return Self::default();
        }

        let total_height = item_count.saturating_mul(item_height);
        let scroll_offset = scroll_offset.min(total_height.saturating_sub(container_height));

        let first = scroll_offset / item_height;
        let last = scroll_offset
            .saturating_add(container_height)
            .div_ceil(item_height);

        Self {
            scroll_offset,
            first_visible: first.saturating_sub(overscan).min(item_count),
            last_visible: last.saturating_add(overscan).min(item_count),
            total_height,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.first_visible..self.last_visible
    }

    /// Number of mounted items.
    pub fn len(&self) -> usize {
        self.last_visible - self.first_visible
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }
}

/// Scroll state of a virtualized list.
#[derive(Debug, Clone)]
pub struct VirtualScroll {
    item_count: usize,
    item_height: usize,
    container_height: usize,
    overscan: usize,
    window: VirtualWindow,
}

impl VirtualScroll {
    pub fn new(item_count: usize, item_height: usize, container_height: usize) -> Self {
        let mut scroll = Self {
            item_count,
            item_height,
            container_height,
            overscan: DEFAULT_OVERSCAN,
            window: VirtualWindow::default(),
        };
        scroll.recompute(0);
        scroll
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self.recompute(self.window.scroll_offset);
        self
    }

    fn recompute(&mut self, offset: usize) -> VirtualWindow {
        self.window = VirtualWindow::compute(
            offset,
            self.container_height,
            self.item_height,
            self.item_count,
            self.overscan,
        );
        trace!(
            offset = self.window.scroll_offset,
            first = self.window.first_visible,
            last = self.window.last_visible,
            "Virtual window recomputed"
        );
        self.window
    }

    /// Handle a scroll event to an absolute offset.
    pub fn scroll_to(&mut self, offset: usize) -> VirtualWindow {
        self.recompute(offset)
    }

    /// Scroll by a signed number of rows.
    pub fn scroll_by(&mut self, delta: isize) -> VirtualWindow {
        self.recompute(self.window.scroll_offset.saturating_add_signed(delta))
    }

    pub fn page_down(&mut self) -> VirtualWindow {
        self.scroll_by(self.page_rows())
    }

    pub fn page_up(&mut self) -> VirtualWindow {
        self.scroll_by(-self.page_rows())
    }

    fn page_rows(&self) -> isize {
        isize::try_from(self.container_height.max(1)).unwrap_or(isize::MAX)
    }

    pub fn scroll_to_top(&mut self) -> VirtualWindow {
        self.recompute(0)
    }

    pub fn scroll_to_bottom(&mut self) -> VirtualWindow {
        self.recompute(usize::MAX)
    }

    /// Scroll the minimum distance that brings `index` fully into view.
    pub fn scroll_into_view(&mut self, index: usize) -> VirtualWindow {
        let top = index.saturating_mul(self.item_height);
        let bottom = top.saturating_add(self.item_height);
        let offset = self.window.scroll_offset;
        if top < offset {
            self.recompute(top)
        } else if bottom > offset.saturating_add(self.container_height) {
            self.recompute(bottom.saturating_sub(self.container_height))
        } else {
            self.window
        }
    }

    /// Change the number of items, keeping the offset where possible.
    pub fn set_item_count(&mut self, item_count: usize) -> VirtualWindow {
        self.item_count = item_count;
        self.recompute(self.window.scroll_offset)
    }

    /// Change the container height, e.g. on terminal resize.
    pub fn set_container_height(&mut self, container_height: usize) -> VirtualWindow {
        self.container_height = container_height;
        self.recompute(self.window.scroll_offset)
    }

    pub fn window(&self) -> VirtualWindow {
        self.window
    }

    pub fn scroll_offset(&self) -> usize {
        self.window.scroll_offset
    }

    /// Scrollable height of the full list.
    pub fn total_height(&self) -> usize {
        self.item_count.saturating_mul(self.item_height)
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn item_height(&self) -> usize {
        self.item_height
    }

    pub fn container_height(&self) -> usize {
        self.container_height
    }

    /// Whether the bottom of the list is in view.
    pub fn at_bottom(&self) -> bool {
        self.window.scroll_offset.saturating_add(self.container_height) >= self.total_height()
    }

    /// Render the mounted items, then a scrollbar over the full height.
    ///
    /// `render_item` produces the lines of one item; output is padded or cut
    /// to exactly `item_height` lines.
    pub fn render<'a, F>(&self, frame: &mut Frame, area: Rect, theme: &Theme, mut render_item: F)
    where
        F: FnMut(usize) -> Vec<Line<'a>>,
    {
        if area.height == 0 || area.width == 0 || self.window.is_empty() {
            return;
        }

        let mut lines: Vec<Line<'a>> = Vec::with_capacity(self.window.len() * self.item_height);
        for index in self.window.range() {
            let mut item = render_item(index);
            item.resize(self.item_height, Line::default());
            lines.extend(item);
        }

        let skip = self.window.scroll_offset - self.window.first_visible * self.item_height;
        let list_area = Rect::new(area.x, area.y, area.width.saturating_sub(1), area.height);
        frame.render_widget(
            Paragraph::new(lines).scroll((skip.min(u16::MAX as usize) as u16, 0)),
            list_area,
        );

        let scrollable = self.total_height().saturating_sub(self.container_height);
        if scrollable > 0 {
            let mut state = ScrollbarState::new(scrollable)
                .position(self.window.scroll_offset)
                .viewport_content_length(self.container_height);
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None)
                .track_style(theme.muted_style())
                .thumb_style(theme.primary_style());
            frame.render_stateful_widget(scrollbar, area, &mut state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNT: usize = 10_000;
    const HEIGHT: usize = 50;
    const CONTAINER: usize = 500;
    const OVERSCAN: usize = 3;

    fn large() -> VirtualScroll {
        VirtualScroll::new(COUNT, HEIGHT, CONTAINER).with_overscan(OVERSCAN)
    }

    #[test]
    fn test_initial_window() {
        let window = large().window();
        assert_eq!(window.first_visible, 0);
        assert_eq!(window.last_visible, 13);
        assert_eq!(window.total_height, 500_000);
    }

    #[test]
    fn test_mounted_items_bounded_at_every_offset() {
        // A misaligned offset shows one partial item at each edge
        let visible_window = CONTAINER.div_ceil(HEIGHT) + 1;
        let bound = visible_window + 2 * OVERSCAN;

        let mut scroll = large();
        for offset in (0..=COUNT * HEIGHT).step_by(37) {
            let window = scroll.scroll_to(offset);
            assert!(window.len() <= bound, "offset {offset}: {}", window.len());
            assert!(!window.is_empty());
            assert_eq!(scroll.total_height(), COUNT * HEIGHT);
        }
    }

    #[test]
    fn test_window_formula() {
        let mut scroll = large();
        let window = scroll.scroll_to(1025);
        // floor(1025/50) - 3 = 17, ceil(1525/50) + 3 = 34
        assert_eq!(window.range(), 17..34);
        assert!(window.contains(20));
        assert!(!window.contains(34));
    }

    #[test]
    fn test_offset_clamped_to_end() {
        let mut scroll = large();
        let window = scroll.scroll_to(usize::MAX);
        assert_eq!(window.scroll_offset, COUNT * HEIGHT - CONTAINER);
        assert_eq!(window.last_visible, COUNT);
        assert_eq!(window.first_visible, COUNT - 10 - OVERSCAN);
        assert!(scroll.at_bottom());
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(VirtualWindow::compute(100, 500, 0, 10, 3).is_empty());
        assert!(VirtualWindow::compute(100, 500, 50, 0, 3).is_empty());
        assert_eq!(VirtualWindow::compute(100, 500, 0, 10, 3).total_height, 0);
    }

    #[test]
    fn test_short_list_mounts_everything() {
        let window = VirtualWindow::compute(0, 500, 50, 4, 3);
        assert_eq!(window.range(), 0..4);
        assert_eq!(window.scroll_offset, 0);
    }

    #[test]
    fn test_scroll_by_saturates() {
        let mut scroll = large();
        assert_eq!(scroll.scroll_by(-10).scroll_offset, 0);
        assert_eq!(scroll.scroll_by(120).scroll_offset, 120);
        assert_eq!(scroll.page_down().scroll_offset, 620);
        assert_eq!(scroll.page_up().scroll_offset, 120);
    }

    #[test]
    fn test_huge_container_does_not_overflow() {
        let mut scroll = VirtualScroll::new(10, 5, usize::MAX);
        assert_eq!(scroll.page_rows(), isize::MAX);
        assert_eq!(scroll.window().range(), 0..10);
        assert!(scroll.at_bottom());
        assert_eq!(scroll.page_down().scroll_offset, 0);
        assert_eq!(scroll.scroll_into_view(9).scroll_offset, 0);

        let window = VirtualWindow::compute(usize::MAX, usize::MAX, 1, usize::MAX, 3);
        assert_eq!(window.last_visible, usize::MAX);
    }

    #[test]
    fn test_scroll_into_view() {
        let mut scroll = VirtualScroll::new(100, 3, 9);
        assert_eq!(scroll.scroll_into_view(1).scroll_offset, 0);
        // Item 5 spans rows 15..18
        assert_eq!(scroll.scroll_into_view(5).scroll_offset, 9);
        assert_eq!(scroll.scroll_into_view(0).scroll_offset, 0);
    }

    #[test]
    fn test_item_count_change_keeps_total_height() {
        let mut scroll = VirtualScroll::new(20, 2, 10);
        scroll.scroll_to(30);
        scroll.set_item_count(40);
        assert_eq!(scroll.total_height(), 80);
        assert_eq!(scroll.scroll_offset(), 30);

        scroll.set_item_count(10);
        assert_eq!(scroll.scroll_offset(), 10);
    }
}
