//! Terminal wrapper with async event streaming.
//!
//! [`Tui`] owns the ratatui terminal and a background task that merges
//! crossterm input with the animation tick into one channel.
//!
//! ```text
//! ┌──────────────────────── tokio task ────────────────────────┐
//! │  EventStream ──► Key / Resize / Focus ─┐                    │
//! │                                        ├─► mpsc::Sender     │
//! │  interval(tick_ms) ──► Tick ───────────┘                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//!                  Tui::next_event() ──► host loop
//! ```

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::ExecutableCommand;
use crossterm::event::{EventStream, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace, warn};

use crate::error::PanelError;
use crate::event::Event;

const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Terminal wrapper with async event streaming.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_rx: mpsc::Receiver<Event>,
    event_tx: mpsc::Sender<Event>,
    task: Option<JoinHandle<()>>,
    cancellation_token: CancellationToken,
    tick_interval: Duration,
    entered: bool,
}

impl Tui {
    /// Creates a terminal that ticks every `tick_interval`.
    ///
    /// The terminal is not entered yet; call [`enter()`](Self::enter) to
    /// switch to raw mode and the alternate screen.
    pub fn new(tick_interval: Duration) -> Result<Self, PanelError> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        debug!(tick_ms = tick_interval.as_millis(), "created terminal");

        Ok(Self {
            terminal,
            event_rx,
            event_tx,
            task: None,
            cancellation_token: CancellationToken::new(),
            tick_interval,
            entered: false,
        })
    }

    /// Enters raw mode and the alternate screen and starts the event task.
    pub fn enter(&mut self) -> Result<(), PanelError> {
        enable_raw_mode()?;
        io::stdout().execute(EnterAlternateScreen)?;
        self.entered = true;

        self.terminal.hide_cursor()?;
        self.terminal.clear()?;

        self.start_event_loop();
        debug!("terminal entered");
        Ok(())
    }

    /// Stops the event task and restores the terminal.
    ///
    /// Calling this more than once is harmless.
    pub fn exit(&mut self) -> Result<(), PanelError> {
        self.stop_event_loop();
        if !self.entered {
            return Ok(());
        }
        self.entered = false;

        self.terminal.show_cursor()?;
        io::stdout().execute(LeaveAlternateScreen)?;
        disable_raw_mode()?;

        debug!("terminal restored");
        Ok(())
    }

    /// Draws one frame.
    pub fn draw<F>(&mut self, f: F) -> Result<(), PanelError>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }

    /// Waits for the next event. `None` once the event task has ended.
    pub async fn next_event(&mut self) -> Option<Event> {
        self.event_rx.recv().await
    }

    fn start_event_loop(&mut self) {
        let tick_delay = self.tick_interval;
        let event_tx = self.event_tx.clone();
        let cancellation_token = self.cancellation_token.clone();

        let task = tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut ticks = tokio::time::interval(tick_delay);
            ticks.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                let event = tokio::select! {
                    () = cancellation_token.cancelled() => break,
                    _ = ticks.tick() => Some(Event::Tick),
                    event = Self::read_crossterm_event(&mut reader) => event,
                };

                if let Some(event) = event {
                    trace!(?event, "sending event");
                    if event_tx.send(event).await.is_err() {
                        error!("event channel closed");
                        break;
                    }
                }
            }

            debug!("event task ended");
        });

        self.task = Some(task);
    }

    fn stop_event_loop(&mut self) {
        self.cancellation_token.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    async fn read_crossterm_event(reader: &mut EventStream) -> Option<Event> {
        use futures_util::StreamExt;

        match reader.next().await {
            Some(Ok(ref event)) => convert_crossterm_event(event),
            Some(Err(e)) => {
                warn!(error = %e, "error reading terminal event");
                None
            }
            None => std::future::pending().await,
        }
    }
}

fn convert_crossterm_event(event: &crossterm::event::Event) -> Option<Event> {
    use crossterm::event::Event as CrosstermEvent;

    match event {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(*key)),
        CrosstermEvent::Resize(width, height) => Some(Event::Resize {
            width: *width,
            height: *height,
        }),
        CrosstermEvent::FocusGained => Some(Event::FocusGained),
        CrosstermEvent::FocusLost => Some(Event::FocusLost),
        _ => None,
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(e) = self.exit() {
            error!(error = %e, "failed to restore terminal on drop");
        }
    }
}
