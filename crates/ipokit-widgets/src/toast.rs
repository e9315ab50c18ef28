//! Toast notification queue.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::fmt;
use std::time::Duration;
use tracing::debug;

use ipokit_tui_core::Theme;
use ipokit_util::{Identifier, Scheduler, TimerId};

/// Lifetime used when a message does not set its own.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(5000);

const TOAST_WIDTH: u16 = 40;

/// Unique toast identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(String);

impl ToastId {
    /// Generate a fresh id.
    pub fn generate() -> Self {
        Self(Identifier::toast())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ToastId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ToastId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Toast notification kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    fn icon(self) -> &'static str {
        match self {
            ToastKind::Success => "✓",
            ToastKind::Error => "✗",
            ToastKind::Warning => "!",
            ToastKind::Info => "i",
        }
    }
}

/// A toast as submitted by the caller.
#[derive(Debug, Clone)]
pub struct ToastMessage {
    /// Caller-supplied id. Generated on enqueue when absent.
    pub id: Option<ToastId>,
    pub kind: ToastKind,
    pub title: String,
    pub description: Option<String>,
    /// Lifetime. Falls back to the queue default when absent.
    pub duration: Option<Duration>,
}

impl ToastMessage {
    /// Create a new message.
    pub fn new(kind: ToastKind, title: impl Into<String>) -> Self {
        Self {
            id: None,
            kind,
            title: title.into(),
            description: None,
            duration: None,
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Warning, title)
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, title)
    }

    /// Use a specific id.
    pub fn with_id(mut self, id: impl Into<ToastId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a description line.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the lifetime.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }
}

/// A queued toast.
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub title: String,
    pub description: Option<String>,
    pub duration: Duration,
    /// When the toast was (re)started.
    pub created_at: DateTime<Utc>,
    timer: TimerId,
}

impl Toast {
    /// Fraction of the lifetime elapsed at `now`, in `0.0..=1.0`.
    pub fn progress(&self, now: DateTime<Utc>) -> f32 {
        let total = self.duration.as_secs_f32();
        if total <= 0.0 {
            return 1.0;
        }
        let elapsed = (now - self.created_at)
            .to_std()
            .unwrap_or_default()
            .as_secs_f32();
        (elapsed / total).min(1.0)
    }

    /// Whether the toast is in the last 20% of its lifetime.
    pub fn is_fading(&self, now: DateTime<Utc>) -> bool {
        self.progress(now) > 0.8
    }
}

/// Ordered queue of toasts, each with its own dismissal timer.
#[derive(Debug)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    scheduler: Scheduler<ToastId>,
    default_duration: Duration,
    max_visible: Option<usize>,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            toasts: Vec::new(),
            scheduler: Scheduler::new(),
            default_duration: DEFAULT_TOAST_DURATION,
            max_visible: None,
        }
    }

    /// Set the lifetime used for messages without one.
    pub fn with_default_duration(mut self, duration: Duration) -> Self {
        self.default_duration = duration;
        self
    }

    /// Cap the number of toasts drawn at once. Queued toasts beyond the cap
    /// stay queued and keep their timers.
    pub fn with_max_visible(mut self, max: usize) -> Self {
        self.max_visible = Some(max);
        self
    }

    /// Append a toast and start its dismissal timer.
    ///
    /// Re-using the id of a queued toast replaces it in place and restarts its timer.
    pub fn enqueue(&mut self, message: ToastMessage, now: DateTime<Utc>) -> ToastId {
        let id = message.id.unwrap_or_else(ToastId::generate);
        let duration = message.duration.unwrap_or(self.default_duration);
        let timer = self.scheduler.schedule_once(now, duration, id.clone());

        let toast = Toast {
            id: id.clone(),
            kind: message.kind,
            title: message.title,
            description: message.description,
            duration,
            created_at: now,
            timer,
        };

        if let Some(existing) = self.toasts.iter_mut().find(|t| t.id == id) {
            self.scheduler.cancel(existing.timer);
            *existing = toast;
            debug!(id = %id, "Toast replaced");
        } else {
            debug!(id = %id, kind = ?toast.kind, duration_ms = duration.as_millis() as u64, "Toast enqueued");
            self.toasts.push(toast);
        }
        id
    }

    /// Remove a toast now and cancel its timer. Unknown ids are ignored.
    pub fn dismiss(&mut self, id: &ToastId) -> bool {
        let Some(index) = self.toasts.iter().position(|t| &t.id == id) else {
            return false;
        };
        let toast = self.toasts.remove(index);
        self.scheduler.cancel(toast.timer);
        debug!(id = %id, "Toast dismissed");
        true
    }

    /// Fire due dismissal timers. Returns the ids removed.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Vec<ToastId> {
        let mut expired = Vec::new();
        for (timer, id) in self.scheduler.poll(now) {
            if let Some(index) = self
                .toasts
                .iter()
                .position(|t| t.id == id && t.timer == timer)
            {
                self.toasts.remove(index);
                debug!(id = %id, "Toast expired");
                expired.push(id);
            }
        }
        expired
    }

    /// Remove every toast and cancel every timer.
    pub fn clear(&mut self) {
        self.scheduler.cancel_all();
        self.toasts.clear();
    }

    /// Queued toasts in display order.
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Number of armed dismissal timers.
    pub fn pending_timers(&self) -> usize {
        self.scheduler.len()
    }

    pub fn max_visible(&self) -> Option<usize> {
        self.max_visible
    }

    /// Render toasts stacked in the top-right corner.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, now: DateTime<Utc>) {
        if self.toasts.is_empty() {
            return;
        }

        let width = TOAST_WIDTH.min(area.width.saturating_sub(2));
        let limit = self.max_visible.unwrap_or(usize::MAX);
        let mut y = area.y + 1;

        for toast in self.toasts.iter().take(limit) {
            let height = if toast.description.is_some() { 4 } else { 3 };
            if y + height > area.y + area.height {
                break;
            }

            let toast_area = Rect::new(
                area.x + area.width.saturating_sub(width + 2),
                y,
                width,
                height,
            );
            render_toast(frame, toast_area, toast, theme, now);
            y += height + 1;
        }
    }
}

fn render_toast(frame: &mut Frame, area: Rect, toast: &Toast, theme: &Theme, now: DateTime<Utc>) {
    frame.render_widget(Clear, area);

    let color = match toast.kind {
        ToastKind::Success => theme.success,
        ToastKind::Error => theme.error,
        ToastKind::Warning => theme.warning,
        ToastKind::Info => theme.info,
    };

    let fading = toast.is_fading(now);
    let accent = if fading {
        Style::default().fg(color).add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(color)
    };
    let (title_style, description_style) = if fading {
        (theme.dim_style(), theme.dim_style())
    } else {
        (theme.text_style(), theme.muted_style())
    };

    let block = Block::default().borders(Borders::ALL).border_style(accent);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{} ", toast.kind.icon()), accent),
        Span::styled(toast.title.as_str(), title_style),
    ])];
    if let Some(description) = &toast.description {
        lines.push(Line::from(Span::styled(
            description.as_str(),
            description_style,
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
