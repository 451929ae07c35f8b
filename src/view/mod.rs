//! TUI rendering and terminal management (impure shell).
//!
//! [`TuiApp`] is the rendering surface of the layout engine. It forwards the
//! terminal size and scroll input into the [`LayoutManager`], paints the
//! published rows, measures what it painted and feeds the measured heights
//! back. Layout notifications reach it through a channel fed by the
//! manager's subscriptions.

pub mod comment_row;
pub mod constants;
pub mod live_indicator;
pub mod status_bar;
pub mod styles;

pub use live_indicator::{InputMode, LiveIndicator};
pub use status_bar::{status_line, StatusInfo};
pub use styles::{ColorConfig, RowStyles};

use crate::config::keybindings::KeyBindings;
use crate::config::ResolvedConfig;
use crate::integration;
use crate::layout::{LayoutError, LayoutManager, LayoutOptions, RowContent};
use crate::model::{AppError, KeyAction};
use crate::source::InputSource;
use crate::store::ChatStore;
use constants::{FALLBACK_WIDTH, MAX_SETTLE_PASSES, STATUS_BAR_HEIGHT, WHEEL_SCROLL_LINES};
use crossterm::{
    event::{self, Event, KeyEvent, MouseEvent, MouseEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout as Split},
    text::Line,
    widgets::Paragraph,
    Terminal,
};
use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Input source error
    #[error("Input error: {0}")]
    Input(#[from] crate::model::InputError),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),

    /// Layout engine refused new rows
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
}

/// Layout notification forwarded to the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
enum SurfaceEvent {
    LayoutChanged,
    ScrollTo(f64),
}

/// Settings the surface takes from the resolved configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSettings {
    /// Layout engine options.
    pub layout: LayoutOptions,
    /// Input polling and blink interval.
    pub tick: Duration,
    /// Color output.
    pub colors: ColorConfig,
}

impl ViewSettings {
    /// Settings for a resolved configuration, colors taken from `NO_COLOR`.
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            layout: config.layout_options(),
            tick: Duration::from_millis(config.tick_ms),
            colors: ColorConfig::from_env(),
        }
    }
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    store: ChatStore,
    layout: LayoutManager,
    input_source: InputSource,
    key_bindings: KeyBindings,
    styles: RowStyles,
    events: Receiver<SurfaceEvent>,
    /// Scroll offset the surface shows. The manager overrides it through
    /// scroll notifications.
    surface_scroll: f64,
    input_mode: InputMode,
    blink_on: bool,
    tick: Duration,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(input_source: InputSource, settings: ViewSettings) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Self::with_terminal(terminal, input_source, settings)
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Input is polled once per tick;
    /// keys, mouse and resize events redraw immediately.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            if event::poll(self.tick)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        self.draw()?;
                    }
                    Event::Mouse(mouse) => {
                        self.handle_mouse(mouse);
                        self.draw()?;
                    }
                    Event::Resize(..) => self.draw()?,
                    _ => {}
                }
                continue;
            }

            let mode_before = self.input_mode;
            let has_new_data = self.poll_input()?;
            let streaming = self.input_mode == InputMode::Streaming;
            if streaming {
                self.blink_on = !self.blink_on;
            }
            if has_new_data || streaming || self.input_mode != mode_before {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Build the app around an existing terminal and load what the source
    /// has available right away.
    pub fn with_terminal(
        terminal: Terminal<B>,
        input_source: InputSource,
        settings: ViewSettings,
    ) -> Result<Self, TuiError> {
        let (sender, events) = mpsc::channel();
        let mut layout = LayoutManager::new(settings.layout);

        let layout_sender = sender.clone();
        layout.on_layout_changed(move |_| {
            let _ = layout_sender.send(SurfaceEvent::LayoutChanged);
        });
        layout.on_scroll(move |top| {
            let _ = sender.send(SurfaceEvent::ScrollTo(*top));
        });

        let mut app = Self {
            terminal,
            store: ChatStore::new(),
            layout,
            input_mode: InputMode::for_source(&input_source),
            input_source,
            key_bindings: KeyBindings::default(),
            styles: RowStyles::with_color_config(settings.colors),
            events,
            surface_scroll: 0.0,
            blink_on: true,
            tick: settings.tick,
        };
        app.sync_viewport()?;
        app.poll_input()?;
        Ok(app)
    }

    /// The layout engine driven by this surface.
    pub fn layout(&self) -> &LayoutManager {
        &self.layout
    }

    /// Comments and users received so far.
    pub fn store(&self) -> &ChatStore {
        &self.store
    }

    /// Scroll offset the surface currently shows.
    pub fn surface_scroll(&self) -> f64 {
        self.surface_scroll
    }

    /// Streaming state shown by the LIVE indicator.
    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    /// The underlying terminal.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// The underlying terminal, mutably.
    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    /// Poll the input source and ingest new records.
    ///
    /// Returns true if any record arrived.
    pub fn poll_input(&mut self) -> Result<bool, TuiError> {
        let records = self.input_source.poll()?;
        self.input_mode = self.input_mode.after_poll(self.input_source.is_live());
        if records.is_empty() {
            return Ok(false);
        }

        let width = self.content_width();
        let report = integration::ingest(records, &mut self.store, &mut self.layout, |author, text| {
            comment_row::measure(author, text, width) as f64
        })?;
        debug!(
            appended = report.appended,
            new_users = report.new_users,
            rejected = report.rejected.len(),
            "input polled"
        );
        Ok(true)
    }

    /// Paint, measure and correct until row heights settle.
    ///
    /// Each pass paints the published layout, measures the realized rows
    /// and feeds changed heights to the layout engine. Deferred scroll
    /// corrections run only after the pass has painted.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        self.sync_viewport()?;

        for pass in 0..MAX_SETTLE_PASSES {
            self.drain_events();
            self.paint()?;

            let updates = self.measure_realized();
            self.layout.change_row_height(&updates);
            self.layout.run_deferred();

            if !self.drain_events() {
                trace!(pass, "row heights settled");
                return Ok(());
            }
        }
        debug!(passes = MAX_SETTLE_PASSES, "row heights still changing");
        Ok(())
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };

        match action {
            KeyAction::Quit => return true,
            KeyAction::ScrollUp => self.scroll_by(-1.0),
            KeyAction::ScrollDown => self.scroll_by(1.0),
            KeyAction::PageUp => self.scroll_by(-self.page_height()),
            KeyAction::PageDown => self.scroll_by(self.page_height()),
            KeyAction::ScrollToTop => self.scroll_to(0.0),
            KeyAction::ScrollToBottom => {
                self.layout.set_auto_scroll(true);
                self.drain_events();
            }
            KeyAction::ToggleFollow => {
                let follow = !self.layout.is_auto_scroll();
                self.layout.set_auto_scroll(follow);
                self.drain_events();
            }
        }
        false
    }

    /// Handle a mouse event. Only the wheel is used.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.scroll_by(-WHEEL_SCROLL_LINES),
            MouseEventKind::ScrollDown => self.scroll_by(WHEEL_SCROLL_LINES),
            _ => {}
        }
    }

    // ===== Internals =====

    fn sync_viewport(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let height = size.height.saturating_sub(STATUS_BAR_HEIGHT);
        self.layout
            .set_viewport_size(f64::from(size.width), f64::from(height));
        Ok(())
    }

    /// Apply pending notifications. Returns true if there were any.
    fn drain_events(&mut self) -> bool {
        let mut any = false;
        while let Ok(event) = self.events.try_recv() {
            any = true;
            if let SurfaceEvent::ScrollTo(top) = event {
                self.surface_scroll = top;
            }
        }
        any
    }

    fn scroll_by(&mut self, delta: f64) {
        self.drain_events();
        self.scroll_to((self.surface_scroll + delta).max(0.0));
    }

    fn scroll_to(&mut self, top: f64) {
        self.surface_scroll = top;
        self.layout.set_scroll_position(top);
        self.drain_events();
    }

    fn page_height(&self) -> f64 {
        (self.layout.viewport().height - 1.0).max(1.0)
    }

    fn content_width(&self) -> u16 {
        match self.layout.viewport().width as u16 {
            0 => FALLBACK_WIDTH,
            width => width,
        }
    }

    fn status_info(&self) -> StatusInfo {
        StatusInfo {
            mode: self.input_mode,
            blink_on: self.blink_on,
            following: self.layout.is_auto_scroll(),
            comments: self.store.comments().len(),
            users: self.store.users().len(),
            sources: self.input_source.states(),
        }
    }

    /// Lines of the comment list, one per viewport line.
    fn visible_lines(&self) -> Vec<Line<'static>> {
        let height = self.layout.viewport().height as usize;
        let width = self.content_width();
        let mut screen = vec![Line::default(); height];

        for row in &self.layout.layout().rows {
            let Some(comment) = row.item_index().and_then(|i| self.store.comments().at(i)) else {
                continue;
            };
            let author = self.store.author_name(comment);
            let top = row.display_top.floor() as i64;
            let lines = comment_row::lines(author, &comment.text, width, &self.styles);
            for (offset, line) in lines.into_iter().enumerate() {
                let Ok(y) = usize::try_from(top + offset as i64) else {
                    continue;
                };
                if let Some(slot) = screen.get_mut(y) {
                    *slot = line;
                }
            }
        }
        screen
    }

    fn paint(&mut self) -> Result<(), TuiError> {
        let rows = self.visible_lines();
        let status = status_line(&self.status_info(), &self.styles);

        self.terminal.draw(|frame| {
            let [list, bar] = Split::vertical([
                Constraint::Min(0),
                Constraint::Length(STATUS_BAR_HEIGHT),
            ])
            .areas(frame.area());
            frame.render_widget(Paragraph::new(rows), list);
            frame.render_widget(Paragraph::new(status), bar);
        })?;
        Ok(())
    }

    /// Heights of realized rows that differ from the published ones.
    fn measure_realized(&self) -> Vec<(usize, f64)> {
        let width = self.content_width();
        self.layout
            .layout()
            .rows
            .iter()
            .filter_map(|row| match row.content {
                RowContent::Item { index, height } => {
                    let comment = self.store.comments().at(index)?;
                    let author = self.store.author_name(comment);
                    let measured = comment_row::measure(author, &comment.text, width) as f64;
                    (measured != height).then_some((index, measured))
                }
                RowContent::Placeholder => None,
            })
            .collect()
    }
}

/// Initialize and run the TUI application with an input source
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// on exit, including after errors.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_source(input_source: InputSource, settings: ViewSettings) -> Result<(), TuiError> {
    let result = TuiApp::new(input_source, settings).and_then(|mut app| app.run());
    restore_terminal()?;
    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tests;
