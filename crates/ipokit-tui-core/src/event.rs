//! Terminal input and periodic ticks merged into one channel.

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Default interval between [`Event::Tick`]s.
///
/// Timers are only checked on ticks, so this bounds how late a countdown
/// second or toast expiry is observed.
pub const DEFAULT_TICK_RATE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// No input arrived within one tick period.
    Tick,
    /// Bracketed paste.
    Paste(String),
}

impl Event {
    /// Map a raw terminal event. Key releases and focus changes are dropped.
    pub fn from_terminal(event: CrosstermEvent) -> Option<Self> {
        match event {
            CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => Some(Event::Key(key)),
            CrosstermEvent::Key(_) => None,
            CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
            CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
            CrosstermEvent::Paste(text) => Some(Event::Paste(text)),
            CrosstermEvent::FocusGained | CrosstermEvent::FocusLost => None,
        }
    }
}

/// Owns the receiving end of the event channel.
pub struct EventHandler {
    sender: mpsc::UnboundedSender<Event>,
    receiver: mpsc::UnboundedReceiver<Event>,
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::with_tick_rate(DEFAULT_TICK_RATE)
    }

    pub fn with_tick_rate(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender,
            receiver,
            tick_rate,
        }
    }

    /// Sender for injecting events, e.g. from tests.
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.sender.clone()
    }

    /// Start reading the terminal on a blocking thread.
    ///
    /// The reader stops once the handle is stopped or the handler is dropped.
    pub fn start(&self) -> EventLoopHandle {
        let sender = self.sender.clone();
        let tick_rate = self.tick_rate;
        let stop = Arc::new(AtomicBool::new(false));
        let stopped = Arc::clone(&stop);

        tokio::task::spawn_blocking(move || {
            while !stopped.load(Ordering::Relaxed) {
                let next = match event::poll(tick_rate) {
                    Ok(true) => match event::read() {
                        Ok(raw) => Event::from_terminal(raw),
                        Err(e) => {
                            tracing::warn!(error = %e, "Failed to read terminal event");
                            None
                        }
                    },
                    Ok(false) => Some(Event::Tick),
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to poll terminal");
                        Some(Event::Tick)
                    }
                };

                if let Some(event) = next {
                    if sender.send(event).is_err() {
                        break;
                    }
                }
            }
            tracing::debug!("Event reader stopped");
        });

        EventLoopHandle { stop }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Stops the terminal reader when asked or dropped.
pub struct EventLoopHandle {
    stop: Arc<AtomicBool>,
}

impl EventLoopHandle {
    /// Stop after the current poll returns.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

impl Drop for EventLoopHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Ctrl+C.
pub fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
