//! "Load more" trigger for lists that grow as the user scrolls.
//!
//! A sentinel row sits after the last loaded item. The widget watches its
//! distance from the bottom of the viewport and requests another page when it
//! comes within `threshold` rows. Requests are edge-triggered: one per
//! transition of the sentinel into view, never one per scroll event.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::fmt;
use tracing::debug;

use ipokit_tui_core::Theme;

/// Rows the sentinel may be below the viewport and still count as visible.
pub const DEFAULT_THRESHOLD: usize = 3;

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Scroll position of the list hosting the sentinel, in rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollMetrics {
    pub scroll_offset: usize,
    pub viewport_height: usize,
    /// Height of the loaded content; the sentinel sits right after it.
    pub content_height: usize,
}

impl ScrollMetrics {
    pub fn new(scroll_offset: usize, viewport_height: usize, content_height: usize) -> Self {
        Self {
            scroll_offset,
            viewport_height,
            content_height,
        }
    }

    /// Rows between the bottom of the viewport and the sentinel.
    pub fn sentinel_distance(&self) -> usize {
        self.content_height
            .saturating_sub(self.scroll_offset.saturating_add(self.viewport_height))
    }

    fn sentinel_visible(&self, threshold: usize) -> bool {
        self.sentinel_distance() <= threshold
    }
}

type LoadMoreCallback = Box<dyn FnMut() + Send>;

/// Sentinel watcher.
pub struct InfiniteScroll {
    threshold: usize,
    has_more: bool,
    loading: bool,
    mounted: bool,
    sentinel_visible: bool,
    metrics: Option<ScrollMetrics>,
    on_load_more: Option<LoadMoreCallback>,
    end_message: String,
    frame: usize,
}

impl fmt::Debug for InfiniteScroll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfiniteScroll")
            .field("threshold", &self.threshold)
            .field("has_more", &self.has_more)
            .field("loading", &self.loading)
            .field("mounted", &self.mounted)
            .field("sentinel_visible", &self.sentinel_visible)
            .finish_non_exhaustive()
    }
}

impl Default for InfiniteScroll {
    fn default() -> Self {
        Self::new()
    }
}

impl InfiniteScroll {
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            has_more: true,
            loading: false,
            mounted: false,
            sentinel_visible: false,
            metrics: None,
            on_load_more: None,
            end_message: "No more results".to_string(),
            frame: 0,
        }
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_end_message(mut self, message: impl Into<String>) -> Self {
        self.end_message = message.into();
        self
    }

    /// Callback invoked when another page should be loaded.
    pub fn on_load_more(mut self, callback: impl FnMut() + Send + 'static) -> Self {
        self.on_load_more = Some(Box::new(callback));
        self
    }

    /// Start watching. Returns `true` if a load was requested immediately.
    pub fn mount(&mut self, metrics: ScrollMetrics) -> bool {
        self.mounted = true;
        self.metrics = Some(metrics);
        self.rewatch()
    }

    /// Stop watching.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.sentinel_visible = false;
    }

    /// Feed a scroll event. Returns `true` if a load was requested.
    pub fn observe(&mut self, metrics: ScrollMetrics) -> bool {
        self.metrics = Some(metrics);
        if !self.is_observing() {
            return false;
        }

        let visible = metrics.sentinel_visible(self.threshold);
        let entered = visible && !self.sentinel_visible;
        self.sentinel_visible = visible;
        entered && self.request()
    }

    pub fn set_threshold(&mut self, threshold: usize) -> bool {
        self.threshold = threshold;
        self.rewatch()
    }

    pub fn set_on_load_more(&mut self, callback: impl FnMut() + Send + 'static) -> bool {
        self.on_load_more = Some(Box::new(callback));
        self.rewatch()
    }

    pub fn set_has_more(&mut self, has_more: bool) -> bool {
        if self.has_more == has_more {
            return false;
        }
        self.has_more = has_more;
        if !has_more {
            debug!("Infinite scroll reached end of content");
        }
        self.rewatch()
    }

    /// Mark a page load as started or finished.
    ///
    /// Finishing re-evaluates the sentinel, so a page too short to push it
    /// out of view immediately requests the next one.
    pub fn set_loading(&mut self, loading: bool) -> bool {
        if self.loading == loading {
            return false;
        }
        self.loading = loading;
        self.rewatch()
    }

    /// Tear down and re-establish the watch against the last known metrics.
    fn rewatch(&mut self) -> bool {
        self.sentinel_visible = false;
        match self.metrics {
            Some(metrics) if self.mounted => self.observe(metrics),
            _ => false,
        }
    }

    fn request(&mut self) -> bool {
        if !self.has_more || self.loading {
            return false;
        }
        debug!(threshold = self.threshold, "Requesting more items");
        if let Some(callback) = self.on_load_more.as_mut() {
            callback();
        }
        true
    }

    /// Whether scroll events are being watched.
    pub fn is_observing(&self) -> bool {
        self.mounted && self.has_more
    }

    pub fn is_sentinel_visible(&self) -> bool {
        self.sentinel_visible
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Advance the loading spinner.
    pub fn tick(&mut self) {
        if self.loading {
            self.frame = (self.frame + 1) % SPINNER.len();
        }
    }

    /// Render the sentinel row: a spinner while loading, an end marker once
    /// nothing is left.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if area.height == 0 {
            return;
        }

        let line = if !self.has_more {
            Line::from(Span::styled(
                format!("· {} ·", self.end_message),
                theme.muted_style(),
            ))
        } else if self.loading {
            Line::from(vec![
                Span::styled(SPINNER[self.frame], theme.primary_style()),
                Span::styled(" Loading…", theme.muted_style()),
            ])
        } else {
            Line::default()
        };

        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }
}
