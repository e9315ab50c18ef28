//! Countdown timer widget.
//!
//! The remaining time is recomputed from the wall clock on every tick rather
//! than decremented, so a stalled loop or suspended terminal catches up on the
//! next tick instead of drifting.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::debug;

use ipokit_tui_core::Theme;
use ipokit_util::{Scheduler, TimerId};

const TICK_PERIOD: Duration = Duration::from_secs(1);

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: i64 = 24 * SECS_PER_HOUR;

/// Which units the countdown displays.
///
/// A disabled unit folds into the next enabled smaller unit: with days
/// disabled, 2 days 3 hours shows as 51 hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownUnits {
    pub days: bool,
    pub hours: bool,
    pub minutes: bool,
    pub seconds: bool,
}

impl Default for CountdownUnits {
    fn default() -> Self {
        Self::all()
    }
}

impl CountdownUnits {
    /// Every unit enabled.
    pub fn all() -> Self {
        Self {
            days: true,
            hours: true,
            minutes: true,
            seconds: true,
        }
    }

    fn is_empty(&self) -> bool {
        !(self.days || self.hours || self.minutes || self.seconds)
    }

    /// Units actually used; an empty selection means all of them.
    fn effective(self) -> Self {
        if self.is_empty() {
            Self::all()
        } else {
            self
        }
    }
}

/// Remaining time split into display units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CountdownState {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl CountdownState {
    /// Decompose whole remaining seconds into the enabled units.
    /// Negative input clamps to zero.
    pub fn from_seconds(total: i64, units: CountdownUnits) -> Self {
        let units = units.effective();
        let mut rest = total.max(0);
        let mut take = |enabled: bool, size: i64| {
            if enabled {
                let n = rest / size;
                rest %= size;
                n as u64
            } else {
                0
            }
        };

        Self {
            days: take(units.days, SECS_PER_DAY),
            hours: take(units.hours, SECS_PER_HOUR),
            minutes: take(units.minutes, SECS_PER_MINUTE),
            seconds: take(units.seconds, 1),
        }
    }

    /// Decomposition of `target - now`.
    pub fn between(now: DateTime<Utc>, target: DateTime<Utc>, units: CountdownUnits) -> Self {
        Self::from_seconds((target - now).num_seconds(), units)
    }

    /// Whether every unit is zero.
    pub fn is_zero(&self) -> bool {
        self.days == 0 && self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }
}

impl fmt::Display for CountdownState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {:02}h {:02}m {:02}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

type CompletionCallback = Box<dyn FnMut() + Send>;

/// Live countdown to a target instant.
pub struct CountdownTimer {
    target: DateTime<Utc>,
    units: CountdownUnits,
    label: Option<String>,
    state: CountdownState,
    scheduler: Scheduler<()>,
    tick_timer: Option<TimerId>,
    mounted: bool,
    completed: bool,
    on_complete: Option<CompletionCallback>,
}

impl fmt::Debug for CountdownTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountdownTimer")
            .field("target", &self.target)
            .field("units", &self.units)
            .field("state", &self.state)
            .field("mounted", &self.mounted)
            .field("completed", &self.completed)
            .finish_non_exhaustive()
    }
}

impl CountdownTimer {
    /// Create a countdown to `target`. Nothing ticks until [`mount`](Self::mount).
    pub fn new(target: DateTime<Utc>) -> Self {
        Self {
            target,
            units: CountdownUnits::all(),
            label: None,
            state: CountdownState::default(),
            scheduler: Scheduler::new(),
            tick_timer: None,
            mounted: false,
            completed: false,
            on_complete: None,
        }
    }

    /// Set which units are displayed.
    pub fn with_units(mut self, units: CountdownUnits) -> Self {
        self.units = units;
        self
    }

    /// Set a heading shown above the digits.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Callback invoked once when the countdown reaches zero.
    pub fn on_complete(mut self, callback: impl FnMut() + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Start displaying: compute the current state and start the one-second tick.
    ///
    /// Returns `true` if the target was already reached.
    pub fn mount(&mut self, now: DateTime<Utc>) -> bool {
        self.mounted = true;
        self.restart(now)
    }

    /// Stop displaying and cancel the tick.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.cancel_tick();
    }

    /// Advance to `now`. Returns `true` if the countdown completed on this call.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        if !self.mounted || self.scheduler.poll(now).is_empty() {
            return false;
        }
        self.refresh(now)
    }

    /// Point the countdown at a new target, recomputing immediately.
    ///
    /// A target in the future re-arms the completion callback.
    pub fn set_target(&mut self, target: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        debug!(%target, "Countdown target changed");
        self.target = target;
        self.completed = false;
        if self.mounted {
            self.restart(now)
        } else {
            self.state = CountdownState::between(now, target, self.units);
            false
        }
    }

    fn restart(&mut self, now: DateTime<Utc>) -> bool {
        self.cancel_tick();
        if self.refresh(now) {
            return true;
        }
        if !self.completed {
            self.tick_timer = Some(self.scheduler.schedule_every(now, TICK_PERIOD, ()));
        }
        false
    }

    /// Recompute from the wall clock and complete if time is up.
    fn refresh(&mut self, now: DateTime<Utc>) -> bool {
        self.state = CountdownState::between(now, self.target, self.units);
        if self.completed || (self.target - now).num_seconds() > 0 {
            return false;
        }

        self.completed = true;
        self.cancel_tick();
        debug!(target = %self.target, "Countdown completed");
        if let Some(callback) = self.on_complete.as_mut() {
            callback();
        }
        true
    }

    fn cancel_tick(&mut self) {
        if let Some(id) = self.tick_timer.take() {
            self.scheduler.cancel(id);
        }
    }

    /// Current decomposition.
    pub fn state(&self) -> CountdownState {
        self.state
    }

    /// Target instant.
    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }

    /// Whether the completion has fired for the current target.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Whether the countdown is displayed.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether the one-second tick is armed.
    pub fn is_ticking(&self) -> bool {
        self.tick_timer
            .is_some_and(|id| self.scheduler.is_pending(id))
    }

    /// Height needed to render.
    pub fn height(&self) -> u16 {
        if self.label.is_some() {
            5
        } else {
            4
        }
    }

    /// Render unit cells side by side.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let mut cells_area = area;
        if let Some(label) = &self.label {
            let label_area = Rect::new(area.x, area.y, area.width, 1);
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(label.as_str(), theme.bold())))
                    .alignment(Alignment::Center),
                label_area,
            );
            cells_area = Rect::new(
                area.x,
                area.y + 1,
                area.width,
                area.height.saturating_sub(1),
            );
        }

        let units = self.units.effective();
        let cells: Vec<(u64, &str)> = [
            (units.days, self.state.days, "Days"),
            (units.hours, self.state.hours, "Hours"),
            (units.minutes, self.state.minutes, "Minutes"),
            (units.seconds, self.state.seconds, "Seconds"),
        ]
        .into_iter()
        .filter(|(enabled, _, _)| *enabled)
        .map(|(_, value, name)| (value, name))
        .collect();

        let constraints = vec![Constraint::Ratio(1, cells.len() as u32); cells.len()];
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(cells_area);

        let digit_style = if self.completed {
            theme.muted_style()
        } else {
            theme.primary_style().add_modifier(Modifier::BOLD)
        };

        for ((value, name), chunk) in cells.into_iter().zip(chunks.iter()) {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style());
            let lines = vec![
                Line::from(Span::styled(format!("{value:02}"), digit_style)),
                Line::from(Span::styled(name, theme.muted_style())),
            ];
            frame.render_widget(
                Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .block(block),
                *chunk,
            );
        }
    }
}
