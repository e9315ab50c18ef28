//! Interactive showcase of the widget set.
//!
//! Four screens share one event loop. Widgets are owned by the [`App`]; the
//! loop hands them the current time on every tick so they never read the
//! system clock themselves.

use crate::content::{case_studies, CaseStudy};
use chrono::{DateTime, Utc};
use crossterm::{
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ipokit_core::Config;
use ipokit_tui_core::{event::is_quit, Event, EventHandler, Theme};
use ipokit_util::{widget_span, Clock, Scheduler, SystemClock, Throttle, TimingGuard};
use ipokit_widgets::{
    Badge, BadgeVariant, CountdownTimer, CountdownUnits, FaqAccordion, FaqItem, Form, FormField,
    InfiniteScroll, ProgressBar, RatingStars, ScrollMetrics, Skeleton, StepIndicator, ToastMessage,
    ToastQueue, Tooltip, ValidationRule, VirtualScroll,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::CrosstermBackend,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Case studies available before the list reports the end.
pub const MAX_CASE_STUDIES: usize = 200;

/// Simulated latency of one page fetch.
const PAGE_LOAD_DELAY: Duration = Duration::from_millis(600);

const ROADMAP: [&str; 4] = ["N-3 準備", "N-2 整備", "N-1 申請", "上場"];

/// Restore terminal to normal state.
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste,
        crossterm::cursor::Show
    );
    let _ = io::stdout().flush();
}

/// Install a panic hook that restores the terminal before printing the panic.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));
}

/// Showcase screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Home,
    Contact,
    CaseStudies,
    Faq,
}

impl Screen {
    pub const ALL: [Screen; 4] = [Screen::Home, Screen::Contact, Screen::CaseStudies, Screen::Faq];

    pub fn title(self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::Contact => "Contact",
            Screen::CaseStudies => "Case studies",
            Screen::Faq => "FAQ",
        }
    }

    /// Screens where printable keys are typed into an input.
    fn takes_text(self) -> bool {
        matches!(self, Screen::Contact | Screen::Faq)
    }
}

/// Work requested by widget callbacks or delayed timers.
#[derive(Debug, Clone)]
pub enum AppAction {
    /// The case-study sentinel came into view.
    LoadMore,
    /// A simulated fetch finished with this many items.
    PageLoaded(usize),
    Toast(ToastMessage),
    Quit,
}

/// Settings resolved from [`Config`] and the command line.
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub theme: Theme,
    pub countdown_target: Option<DateTime<Utc>>,
    pub countdown_label: Option<String>,
    pub countdown_units: CountdownUnits,
    pub toast_duration: Option<Duration>,
    pub max_toasts: Option<usize>,
    pub item_height: usize,
    pub overscan: usize,
    pub threshold: usize,
    pub page_size: usize,
    pub faqs: Vec<FaqItem>,
}

impl AppOptions {
    pub fn from_config(config: &Config, theme: Option<&str>, faqs: Vec<FaqItem>) -> Self {
        let countdown = config.countdown.clone().unwrap_or_default();
        let toast = config.toast.clone().unwrap_or_default();
        let scroll = config.scroll.clone().unwrap_or_default();
        let theme_name = theme.or(config.theme.as_deref()).unwrap_or("ipokit");
        if !Theme::available().contains(&theme_name.to_lowercase().as_str()) {
            tracing::warn!(theme = theme_name, "Unknown theme, using default");
        }

        Self {
            theme: Theme::by_name(theme_name),
            countdown_target: countdown.target,
            countdown_label: countdown.label.clone(),
            countdown_units: crate::commands::units_from_config(Some(&countdown)),
            toast_duration: toast.default_duration_ms.map(Duration::from_millis),
            max_toasts: toast.max_visible,
            item_height: scroll.item_height.map_or(3, usize::from).max(1),
            overscan: scroll.overscan.unwrap_or(ipokit_widgets::virtual_scroll::DEFAULT_OVERSCAN),
            threshold: scroll
                .threshold
                .map_or(ipokit_widgets::infinite_scroll::DEFAULT_THRESHOLD, usize::from),
            page_size: scroll.page_size.unwrap_or(20).max(1),
            faqs,
        }
    }
}

/// Application state for the showcase.
pub struct App {
    clock: Arc<dyn Clock>,
    theme: Theme,
    screen: Screen,
    running: bool,

    countdown: CountdownTimer,
    roadmap: StepIndicator,
    tooltip: Tooltip,
    tooltip_anchor: Rect,
    toasts: ToastQueue,
    demo_toasts: Throttle,

    form: Form,

    cases: Vec<CaseStudy>,
    case_list: VirtualScroll,
    infinite: InfiniteScroll,
    skeleton: Skeleton,
    page_size: usize,

    faq: FaqAccordion,

    timers: Scheduler<AppAction>,
    action_tx: mpsc::UnboundedSender<AppAction>,
    action_rx: mpsc::UnboundedReceiver<AppAction>,
}

impl App {
    /// Create the app reading time from `clock`.
    pub fn new(options: AppOptions, clock: Arc<dyn Clock>) -> Self {
        let now = clock.now();
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let target = options
            .countdown_target
            .unwrap_or_else(|| now + chrono::Duration::days(30));
        let done_tx = action_tx.clone();
        let mut countdown = CountdownTimer::new(target)
            .with_units(options.countdown_units)
            .with_label(
                options
                    .countdown_label
                    .unwrap_or_else(|| "Until the listing application deadline".to_string()),
            )
            .on_complete(move || {
                let _ = done_tx.send(AppAction::Toast(
                    ToastMessage::success("The listing window is open")
                        .with_description("Book a review session with our team."),
                ));
            });
        countdown.mount(now);

        let mut toasts = ToastQueue::new();
        if let Some(duration) = options.toast_duration {
            toasts = toasts.with_default_duration(duration);
        }
        if let Some(max) = options.max_toasts {
            toasts = toasts.with_max_visible(max);
        }

        let load_tx = action_tx.clone();
        let infinite = InfiniteScroll::new()
            .with_threshold(options.threshold)
            .with_end_message("All case studies shown")
            .on_load_more(move || {
                let _ = load_tx.send(AppAction::LoadMore);
            });

        let initial = options.page_size.min(MAX_CASE_STUDIES);
        let cases = case_studies(0, initial);
        let case_list = VirtualScroll::new(cases.len(), options.item_height, 10)
            .with_overscan(options.overscan);

        let mut app = Self {
            clock,
            theme: options.theme,
            screen: Screen::Home,
            running: true,
            countdown,
            roadmap: StepIndicator::new(ROADMAP).with_current(1),
            tooltip: Tooltip::new("Initial consultation is free"),
            tooltip_anchor: Rect::default(),
            toasts,
            demo_toasts: Throttle::new(Duration::from_secs(1)),
            form: contact_form(),
            cases,
            case_list,
            infinite,
            skeleton: Skeleton::with_lines(vec![70, 100, 40]),
            page_size: options.page_size,
            faq: FaqAccordion::new(options.faqs).with_single_open(true),
            timers: Scheduler::new(),
            action_tx,
            action_rx,
        };
        app.drain_actions();
        app
    }

    /// Case studies loaded so far.
    pub fn case_count(&self) -> usize {
        self.cases.len()
    }

    /// Switch screens, mounting and unmounting screen-owned watches.
    pub fn switch_to(&mut self, screen: Screen) {
        if screen == self.screen {
            return;
        }
        tracing::debug!(from = ?self.screen, to = ?screen, "Switching screen");

        match self.screen {
            Screen::Home => {
                self.tooltip.unmount();
                self.countdown.unmount();
            }
            Screen::CaseStudies => self.infinite.unmount(),
            Screen::Contact => {
                if let Some(field) = self.form.focused_field_mut() {
                    field.handle_blur();
                }
            }
            Screen::Faq => {}
        }

        self.screen = screen;
        match screen {
            Screen::Home => {
                let now = self.clock.now();
                self.countdown.mount(now);
            }
            Screen::CaseStudies => {
                let metrics = self.list_metrics();
                self.infinite.mount(metrics);
            }
            Screen::Contact | Screen::Faq => {}
        }
        self.drain_actions();
    }

    /// Apply one event from the terminal.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Tick => self.tick(),
            Event::Paste(text) => self.handle_paste(&text),
            Event::Resize(..) => {}
        }
        self.drain_actions();
    }

    /// Advance every timer-driven widget to the clock's current time.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        self.countdown.tick(now);
        self.toasts.tick(now);
        self.faq.tick(now);
        self.tooltip.tick(now);
        self.skeleton.tick();
        self.infinite.tick();

        for (_, action) in self.timers.poll(now) {
            self.dispatch(action);
        }
        self.drain_actions();
    }

    fn drain_actions(&mut self) {
        while let Ok(action) = self.action_rx.try_recv() {
            self.dispatch(action);
        }
    }

    fn dispatch(&mut self, action: AppAction) {
        let now = self.clock.now();
        match action {
            AppAction::LoadMore => {
                if self.infinite.is_loading() {
                    return;
                }
                self.infinite.set_loading(true);
                self.skeleton.start();
                let remaining = MAX_CASE_STUDIES.saturating_sub(self.cases.len());
                let count = self.page_size.min(remaining);
                self.timers
                    .schedule_once(now, PAGE_LOAD_DELAY, AppAction::PageLoaded(count));
                tracing::debug!(count, "Loading case studies");
            }
            AppAction::PageLoaded(count) => {
                let start = self.cases.len();
                self.cases.extend(case_studies(start, count));
                self.case_list.set_item_count(self.cases.len());
                self.skeleton.stop();

                // Feed the grown list before finishing, so the stale
                // sentinel position does not trigger another load.
                let metrics = self.list_metrics();
                self.infinite.observe(metrics);
                if self.cases.len() >= MAX_CASE_STUDIES {
                    self.infinite.set_has_more(false);
                }
                self.infinite.set_loading(false);
                tracing::info!(total = self.cases.len(), "Case studies loaded");
            }
            AppAction::Toast(message) => {
                self.toasts.enqueue(message, now);
            }
            AppAction::Quit => self.running = false,
        }
    }

    fn list_metrics(&self) -> ScrollMetrics {
        ScrollMetrics::new(
            self.case_list.scroll_offset(),
            self.case_list.container_height(),
            self.case_list.total_height(),
        )
    }

    fn scroll_cases(&mut self, scroll: impl FnOnce(&mut VirtualScroll)) {
        scroll(&mut self.case_list);
        let metrics = self.list_metrics();
        self.infinite.observe(metrics);
    }

    fn request_quit(&self) {
        let _ = self.action_tx.send(AppAction::Quit);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if is_quit(&key) {
            self.request_quit();
            return;
        }

        let target = match key.code {
            KeyCode::F(n @ 1..=4) => Some(Screen::ALL[usize::from(n) - 1]),
            KeyCode::Char(c @ '1'..='4') if !self.screen.takes_text() => {
                Some(Screen::ALL[c as usize - '1' as usize])
            }
            _ => None,
        };
        if let Some(screen) = target {
            self.switch_to(screen);
            return;
        }

        match self.screen {
            Screen::Home => self.handle_home_key(key),
            Screen::Contact => self.handle_contact_key(key),
            Screen::CaseStudies => self.handle_cases_key(key),
            Screen::Faq => self.handle_faq_key(key),
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        let now = self.clock.now();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.request_quit(),
            KeyCode::Right | KeyCode::Char('l') => {
                self.roadmap.next_step();
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.roadmap.prev_step();
            }
            KeyCode::Char('t') if self.demo_toasts.try_acquire(now) => {
                self.toasts.enqueue(
                    ToastMessage::info("New seminar scheduled")
                        .with_description("IPO readiness workshop, next Thursday"),
                    now,
                );
            }
            KeyCode::Char('x') => {
                if let Some(id) = self.toasts.toasts().first().map(|t| t.id.clone()) {
                    self.toasts.dismiss(&id);
                }
            }
            KeyCode::Char('?') => {
                if self.tooltip.is_visible() || self.tooltip.is_pending() {
                    self.tooltip.leave();
                } else {
                    self.tooltip.hover(self.tooltip_anchor, now);
                }
            }
            _ => {}
        }
    }

    fn handle_contact_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.switch_to(Screen::Home),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.form.reset();
            }
            _ => {
                self.form.handle_key(key);
            }
        }
    }

    fn submit_form(&mut self) {
        let now = self.clock.now();
        if self.form.validate_all() {
            let company = self
                .form
                .field("company")
                .map(|f| f.value().to_string())
                .unwrap_or_default();
            tracing::info!(%company, "Contact form submitted");
            self.toasts.enqueue(
                ToastMessage::success("Thank you for your enquiry")
                    .with_description(format!("We will contact {company} within two business days.")),
                now,
            );
            self.form.reset();
        } else {
            let count = self.form.errors().len();
            self.toasts.enqueue(
                ToastMessage::error("Please check the form")
                    .with_description(format!("{count} field(s) need attention")),
                now,
            );
        }
    }

    fn handle_cases_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.request_quit(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_cases(|l| {
                l.scroll_by(1);
            }),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_cases(|l| {
                l.scroll_by(-1);
            }),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_cases(|l| {
                l.page_down();
            }),
            KeyCode::PageUp => self.scroll_cases(|l| {
                l.page_up();
            }),
            KeyCode::Home | KeyCode::Char('g') => self.scroll_cases(|l| {
                l.scroll_to_top();
            }),
            KeyCode::End | KeyCode::Char('G') => self.scroll_cases(|l| {
                l.scroll_to_bottom();
            }),
            _ => {}
        }
    }

    fn handle_faq_key(&mut self, key: KeyEvent) {
        let now = self.clock.now();
        match key.code {
            KeyCode::Esc if !self.faq.input().is_empty() => self.faq.clear_query(),
            KeyCode::Esc => self.switch_to(Screen::Home),
            KeyCode::Tab => self.faq.cycle_category(),
            KeyCode::Down => self.faq.select_next(),
            KeyCode::Up => self.faq.select_prev(),
            KeyCode::Enter => {
                self.faq.toggle_selected();
            }
            KeyCode::Backspace => self.faq.backspace(now),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.faq.type_char(c, now)
            }
            _ => {}
        }
    }

    fn handle_paste(&mut self, text: &str) {
        let now = self.clock.now();
        match self.screen {
            Screen::Contact => {
                if let Some(field) = self.form.focused_field_mut() {
                    text.chars().filter(|c| !c.is_control()).for_each(|c| field.insert_char(c));
                }
            }
            Screen::Faq => text
                .chars()
                .filter(|c| !c.is_control())
                .for_each(|c| self.faq.type_char(c, now)),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let now = self.clock.now();
        match (self.screen, mouse.kind) {
            (Screen::Home, MouseEventKind::Moved) => {
                let over = self.tooltip_anchor.contains((mouse.column, mouse.row).into());
                if over {
                    self.tooltip.hover(self.tooltip_anchor, now);
                } else {
                    self.tooltip.leave();
                }
            }
            (Screen::CaseStudies, MouseEventKind::ScrollDown) => {
                self.scroll_cases(|l| {
                    l.scroll_by(3);
                });
            }
            (Screen::CaseStudies, MouseEventKind::ScrollUp) => {
                self.scroll_cases(|l| {
                    l.scroll_by(-3);
                });
            }
            _ => {}
        }
    }

    /// Draw the current screen with toasts and tooltip on top.
    pub fn draw(&mut self, frame: &mut Frame) {
        let _timing = TimingGuard::frame();
        let now = self.clock.now();
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_tabs(frame, chunks[0]);
        match self.screen {
            Screen::Home => self.render_home(frame, chunks[1]),
            Screen::Contact => self.render_contact(frame, chunks[1]),
            Screen::CaseStudies => self.render_cases(frame, chunks[1]),
            Screen::Faq => self.render_faq(frame, chunks[1]),
        }
        self.render_hints(frame, chunks[2]);

        {
            let _span = widget_span!("toasts").entered();
            self.toasts.render(frame, area, &self.theme, now);
        }
        if self.screen == Screen::Home {
            self.tooltip.render(frame, area, &self.theme);
        }
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        for (i, screen) in Screen::ALL.iter().enumerate() {
            let style = if *screen == self.screen {
                self.theme.highlight_style()
            } else {
                self.theme.muted_style()
            };
            spans.push(Span::styled(format!(" F{} {} ", i + 1, screen.title()), style));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)).style(self.theme.panel_style()), area);
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect) {
        let hints = match self.screen {
            Screen::Home => "←/→ roadmap  t toast  x dismiss  ? help  q quit",
            Screen::Contact => "Tab next field  Enter submit  Ctrl+R reset  Esc back",
            Screen::CaseStudies => "↑/↓ scroll  PgUp/PgDn page  g/G top/bottom  q quit",
            Screen::Faq => "type to search  Tab category  ↑/↓ select  Enter expand  Esc clear",
        };
        frame.render_widget(Paragraph::new(hints).style(self.theme.muted_style()), area);
    }

    fn render_home(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(self.countdown.height()),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        {
            let _span = widget_span!("countdown").entered();
            self.countdown.render(frame, chunks[0], &self.theme);
        }
        self.roadmap.render(frame, chunks[1], &self.theme);

        let badges = [
            Badge::new("Growth").variant(BadgeVariant::Success),
            Badge::new("Prime").variant(BadgeVariant::Secondary),
            Badge::new("J-SOX").variant(BadgeVariant::Outline),
        ];
        let mut spans: Vec<Span> = vec![Span::styled("Markets ", self.theme.muted_style())];
        for badge in &badges {
            spans.push(badge.span(&self.theme));
            spans.push(Span::raw(" "));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), chunks[2]);

        let row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(24), Constraint::Length(10), Constraint::Min(0)])
            .split(chunks[3]);
        RatingStars::new(4.5, 5)
            .with_value_label(true)
            .render(frame, row[0], &self.theme);
        let help = " [free?] ";
        self.tooltip_anchor = Rect::new(row[1].x, row[1].y, (help.len() as u16).min(row[1].width), 1);
        frame.render_widget(
            Paragraph::new(Span::styled(help, self.theme.info_style())),
            row[1],
        );

        let intro = "Supporting companies from capital policy design through listing \
                     review. Press t for a notification, or hover the marker for details.";
        frame.render_widget(
            Paragraph::new(intro)
                .style(self.theme.text_style())
                .wrap(Wrap { trim: true }),
            chunks[4],
        );
    }

    fn render_contact(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        let fields = self.form.fields();
        let valid = fields.iter().filter(|f| f.check().is_valid).count();
        let percent = if fields.is_empty() {
            0.0
        } else {
            valid as f64 * 100.0 / fields.len() as f64
        };
        ProgressBar::new(percent)
            .with_label("Form complete")
            .render(frame, chunks[0], &self.theme);

        let _span = widget_span!("form").entered();
        self.form.render(frame, chunks[1], &self.theme);
    }

    fn render_cases(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(format!(" Case studies ({}) ", self.cases.len()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let footer_height = if self.skeleton.is_active() {
            self.skeleton.height()
        } else {
            1
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(footer_height)])
            .split(inner);

        let container = usize::from(chunks[0].height);
        if container != self.case_list.container_height() {
            self.case_list.set_container_height(container);
            let metrics = self.list_metrics();
            self.infinite.observe(metrics);
        }

        {
            let _span = widget_span!("case_list").entered();
            let _timing = TimingGuard::widget("case_list");
            let theme = &self.theme;
            let cases = &self.cases;
            self.case_list.render(frame, chunks[0], theme, |i| {
                cases.get(i).map(|c| case_lines(c, theme)).unwrap_or_default()
            });
        }

        if self.skeleton.is_active() {
            self.skeleton.render(frame, chunks[1], &self.theme);
        } else {
            self.infinite.render(frame, chunks[1], &self.theme);
        }
    }

    fn render_faq(&self, frame: &mut Frame, area: Rect) {
        let _span = widget_span!("faq").entered();
        self.faq.render(frame, area, &self.theme);
    }

    /// Run the showcase until the user quits.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let mut events = EventHandler::new();
        let event_loop = events.start();
        tracing::info!("Showcase started");

        let result = async {
            while self.running {
                terminal.draw(|frame| self.draw(frame))?;
                match events.next().await {
                    Some(event) => self.handle_event(event),
                    None => break,
                }
            }
            anyhow::Ok(())
        }
        .await;

        event_loop.stop();
        restore_terminal();
        tracing::info!("Showcase stopped");
        result
    }
}

#[cfg(test)]
impl App {
    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn case_list(&self) -> &VirtualScroll {
        &self.case_list
    }

    pub fn infinite(&self) -> &InfiniteScroll {
        &self.infinite
    }

    pub fn faq(&self) -> &FaqAccordion {
        &self.faq
    }

    pub fn countdown(&self) -> &CountdownTimer {
        &self.countdown
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    /// Queue an action for the next drain.
    pub fn sender(&self) -> mpsc::UnboundedSender<AppAction> {
        self.action_tx.clone()
    }
}

/// App reading the system clock.
pub fn app_with_system_clock(options: AppOptions) -> App {
    App::new(options, Arc::new(SystemClock))
}

fn contact_form() -> Form {
    Form::new()
        .with_field(
            FormField::new("company", "Company name")
                .required()
                .with_rule(ValidationRule::max_length(80))
                .with_placeholder("株式会社サンプル"),
        )
        .with_field(
            FormField::new("email", "Email")
                .required()
                .with_rule(ValidationRule::email())
                .with_placeholder("name@example.co.jp"),
        )
        .with_field(
            FormField::new("phone", "Phone")
                .with_rule(ValidationRule::phone())
                .with_placeholder("03-1234-5678"),
        )
        .with_field(
            FormField::new("website", "Website")
                .with_rule(ValidationRule::url())
                .with_placeholder("https://"),
        )
        .with_field(
            FormField::new("message", "Message")
                .required()
                .with_rule(ValidationRule::min_length(10)),
        )
}

fn case_lines(case: &CaseStudy, theme: &Theme) -> Vec<Line<'static>> {
    let market = Badge::new(case.market).variant(BadgeVariant::Secondary);
    let stars: String = RatingStars::new(case.rating, 5)
        .stars()
        .into_iter()
        .map(|s| s.glyph())
        .collect();

    vec![
        Line::from(vec![
            Span::styled(format!("#{:04} ", case.index + 1), theme.muted_style()),
            Span::styled(case.company.clone(), theme.bold()),
            Span::raw(" "),
            Span::styled(format!(" {} ", case.market), market.style(theme)),
        ]),
        Line::from(vec![
            Span::styled(format!("  {} · {}億円 ", case.industry, case.raised), theme.text_style()),
            Span::styled(stars, theme.warning_style()),
        ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipokit_test_utils::{
        assert_buffer_contains, epoch, render_to_string, sample_faqs, ManualClock,
    };

    fn options() -> AppOptions {
        AppOptions {
            theme: Theme::default(),
            countdown_target: Some(epoch() + chrono::Duration::days(10)),
            countdown_label: None,
            countdown_units: CountdownUnits::all(),
            toast_duration: None,
            max_toasts: None,
            item_height: 3,
            overscan: 3,
            threshold: 3,
            page_size: 20,
            faqs: sample_faqs(),
        }
    }

    fn new_app_with(options: AppOptions) -> (App, ManualClock) {
        let clock = ManualClock::new(epoch());
        let app = App::new(options, Arc::new(clock.clone()));
        (app, clock)
    }

    fn new_app() -> (App, ManualClock) {
        new_app_with(options())
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn render(app: &mut App) -> String {
        render_to_string(100, 30, |frame| app.draw(frame))
    }

    #[test]
    fn test_function_keys_switch_screens() {
        let (mut app, _) = new_app();
        app.handle_event(key(KeyCode::F(3)));
        assert_eq!(app.screen(), Screen::CaseStudies);
        app.handle_event(key(KeyCode::F(2)));
        assert_eq!(app.screen(), Screen::Contact);
        // Digits are text on the contact screen
        app.handle_event(key(KeyCode::Char('4')));
        assert_eq!(app.screen(), Screen::Contact);
        assert_eq!(app.form().field("company").unwrap().value(), "4");
    }

    #[test]
    fn test_countdown_completion_raises_toast() {
        let (mut app, clock) = new_app_with(AppOptions {
            countdown_target: Some(epoch() + chrono::Duration::seconds(3)),
            ..options()
        });
        for _ in 0..3 {
            clock.advance_secs(1);
            app.handle_event(Event::Tick);
        }
        assert!(app.countdown().is_completed());
        assert_eq!(app.toasts().len(), 1);
        assert_eq!(app.toasts().toasts()[0].title, "The listing window is open");

        clock.advance_secs(1);
        app.handle_event(Event::Tick);
        assert_eq!(app.toasts().len(), 1);
    }

    #[test]
    fn test_toasts_expire_on_tick() {
        let (mut app, clock) = new_app();
        app.handle_event(key(KeyCode::Char('t')));
        assert_eq!(app.toasts().len(), 1);
        clock.advance_millis(4_999);
        app.handle_event(Event::Tick);
        assert_eq!(app.toasts().len(), 1);
        clock.advance_millis(1);
        app.handle_event(Event::Tick);
        assert!(app.toasts().toasts().iter().all(|t| t.title != "New seminar scheduled"));
    }

    #[test]
    fn test_demo_toast_key_is_throttled() {
        let (mut app, clock) = new_app();
        app.handle_event(key(KeyCode::Char('t')));
        app.handle_event(key(KeyCode::Char('t')));
        assert_eq!(app.toasts().len(), 1);
        clock.advance_secs(1);
        app.handle_event(key(KeyCode::Char('t')));
        assert_eq!(app.toasts().len(), 2);
    }

    #[test]
    fn test_invalid_submit_shows_errors() {
        let (mut app, _) = new_app();
        app.switch_to(Screen::Contact);
        app.handle_event(key(KeyCode::Enter));
        assert!(!app.form().is_valid());
        assert_eq!(app.toasts().toasts()[0].title, "Please check the form");
        assert_eq!(
            app.form().field("company").unwrap().error(),
            Some(ipokit_widgets::REQUIRED_MESSAGE)
        );
    }

    #[test]
    fn test_case_list_loads_next_page_after_delay() {
        let (mut app, clock) = new_app();
        app.switch_to(Screen::CaseStudies);
        assert_eq!(app.case_count(), 20);

        app.handle_event(key(KeyCode::End));
        assert!(app.infinite().is_loading());

        // A second request while loading is ignored
        app.handle_event(key(KeyCode::Up));
        app.handle_event(key(KeyCode::End));
        clock.advance_millis(600);
        app.handle_event(Event::Tick);

        assert_eq!(app.case_count(), 40);
        assert!(!app.infinite().is_loading());
        assert_eq!(app.case_list().item_count(), 40);
    }

    #[test]
    fn test_case_list_stops_at_end() {
        let (mut app, clock) = new_app();
        app.switch_to(Screen::CaseStudies);
        for _ in 0..20 {
            app.handle_event(key(KeyCode::End));
            clock.advance_millis(600);
            app.handle_event(Event::Tick);
        }
        assert_eq!(app.case_count(), MAX_CASE_STUDIES);
        assert!(!app.infinite().has_more());
    }

    #[test]
    fn test_leaving_case_studies_unmounts_watch() {
        let (mut app, _) = new_app();
        app.switch_to(Screen::CaseStudies);
        assert!(app.infinite().is_observing());
        app.switch_to(Screen::Faq);
        assert!(!app.infinite().is_observing());
    }

    #[test]
    fn test_faq_search_is_debounced() {
        let (mut app, clock) = new_app();
        app.switch_to(Screen::Faq);
        for c in "バリュエーション".chars() {
            app.handle_event(key(KeyCode::Char(c)));
        }
        assert_eq!(app.faq().visible().len(), 8);

        clock.advance_millis(300);
        app.handle_event(Event::Tick);
        let ids: Vec<_> = app.faq().visible().iter().map(|f| f.id.clone()).collect();
        assert_eq!(ids, vec!["faq-3", "faq-6"]);
    }

    #[test]
    fn test_tooltip_shows_after_delay() {
        let (mut app, clock) = new_app();
        render(&mut app);
        app.handle_event(key(KeyCode::Char('?')));
        assert!(app.tooltip().is_pending());
        clock.advance_millis(500);
        app.handle_event(Event::Tick);
        assert!(app.tooltip().is_visible());

        let text = render(&mut app);
        assert_buffer_contains(&text, "Initial consultation is free");
    }

    #[test]
    fn test_home_renders_countdown_and_tabs() {
        let (mut app, _) = new_app();
        let text = render(&mut app);
        assert_buffer_contains(&text, "F1 Home");
        assert_buffer_contains(&text, "Until the listing application deadline");
        assert_buffer_contains(&text, "Seconds");
    }

    #[test]
    fn test_countdown_ticks_only_on_home() {
        let (mut app, clock) = new_app_with(AppOptions {
            countdown_target: Some(epoch() + chrono::Duration::seconds(3)),
            ..options()
        });
        assert!(app.countdown().is_ticking());
        app.switch_to(Screen::Faq);
        assert!(!app.countdown().is_ticking());

        clock.advance_secs(5);
        app.handle_event(Event::Tick);
        assert!(!app.countdown().is_completed());
        assert!(app.toasts().is_empty());

        // Remounting recomputes from the clock and completes
        app.switch_to(Screen::Home);
        assert!(app.countdown().is_completed());
        assert!(!app.countdown().is_ticking());
        assert_eq!(app.toasts().toasts()[0].title, "The listing window is open");
    }

    #[test]
    fn test_q_key_quits_through_action_channel() {
        let (mut app, _) = new_app();
        app.switch_to(Screen::CaseStudies);
        app.handle_event(key(KeyCode::Char('q')));
        assert!(!app.is_running());
    }

    #[test]
    fn test_quit_keys() {
        let (mut app, _) = new_app();
        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(!app.is_running());

        let (mut app, _) = new_app();
        app.sender().send(AppAction::Quit).unwrap();
        app.handle_event(Event::Tick);
        assert!(!app.is_running());
    }
}
