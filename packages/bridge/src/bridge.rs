//! Routing of commands from the application core to the host, and of host
//! values back to the core.
//!
//! Delivery is at-most-once and fire-and-forget. Commands are handled in the
//! order the core emits them. Commands that have to wait (focus, clipboard)
//! run as tasks, so they may finish after commands emitted later. A command
//! aimed at an absent element follows its documented fallback or is dropped;
//! nothing is ever reported back to the core as an error.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use glossary_parser::ids::{IdGenerator, UuidGenerator};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::Instant;

use crate::config::BridgeConfig;
use crate::host::{Host, EDITOR_COMMAND_FIELD_ID, OUTER_ELEMENT_ID, SCROLL_LOCK_CLASS};
use crate::messages::{Command, DateTimeAndId, Event, HostSignal};
use crate::scroll::ScrollMonitor;
use crate::store::KeyValueStore;
use crate::theme::ThemePersistence;
use crate::wait::{until_async, wait_for_element};

/// Current time as an ISO 8601 UTC timestamp with milliseconds.
pub fn current_date_time() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub struct PortBridge<H, S> {
    host: Arc<H>,
    theme: ThemePersistence<S>,
    events: mpsc::UnboundedSender<Event>,
    scroll: ScrollMonitor,
    ids: Box<dyn IdGenerator + Send>,
    config: BridgeConfig,
    in_flight: JoinSet<()>,
}

impl<H: Host, S: KeyValueStore> PortBridge<H, S> {
    /// Create a bridge and the receiver the application core reads events from.
    pub fn new(
        host: Arc<H>,
        theme: ThemePersistence<S>,
        config: BridgeConfig,
    ) -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let bridge = Self {
            host,
            theme,
            events,
            scroll: ScrollMonitor::new(config.scroll_far_from_top, config.scroll_budget),
            ids: Box::new(UuidGenerator),
            config,
            in_flight: JoinSet::new(),
        };
        (bridge, receiver)
    }

    /// Replace the generator used for `generateUuid` and new item ids.
    pub fn with_id_generator(mut self, ids: impl IdGenerator + Send + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn host(&self) -> &Arc<H> {
        &self.host
    }

    pub fn theme(&self) -> &ThemePersistence<S> {
        &self.theme
    }

    fn send(&self, event: Event) {
        if self.events.send(event).is_err() {
            tracing::debug!("application core stopped listening, event dropped");
        }
    }

    fn allow_background_scrolling(&self) {
        self.host.set_body_class(SCROLL_LOCK_CLASS, false);
    }

    /// Handle one command from the application core.
    pub fn dispatch(&mut self, command: Command) {
        tracing::debug!(port = command.port(), "dispatching command");

        while self.in_flight.try_join_next().is_some() {}

        match command {
            Command::AllowBackgroundScrolling => self.allow_background_scrolling(),
            Command::PreventBackgroundScrolling => {
                self.host.set_body_class(SCROLL_LOCK_CLASS, true);
            }
            Command::ScrollElementIntoView(id) => match self.host.element_by_id(&id) {
                Some(element) => self.host.scroll_into_view(&element),
                None => {
                    // The background might otherwise stay locked.
                    tracing::debug!(id = %id, "element absent, releasing scroll lock instead");
                    self.allow_background_scrolling();
                }
            },
            Command::ScrollSearchResultIntoView(id) => match self.host.element_by_id(&id) {
                Some(element) => self.host.scroll_into_view(&element),
                None => tracing::debug!(id = %id, "search result absent, command dropped"),
            },
            Command::GiveSearchFieldFocusOnceItIsPresent(id) => {
                let host = Arc::clone(&self.host);
                let interval = self.config.focus_poll_interval;
                let timeout = self.config.focus_timeout;
                self.in_flight
                    .spawn(give_focus_once_present(host, id, interval, timeout));
            }
            Command::ChangeTheme(name) => {
                if let Err(e) = self.theme.change_theme(&name, &*self.host) {
                    tracing::warn!(error = %e, theme = %name, "failed to persist theme preference");
                }
            }
            Command::GetCurrentDateTimeForSaving => {
                self.send(Event::ReceiveCurrentDateTimeForSaving(current_date_time()));
            }
            Command::GetCurrentDateTimeAndNewIdForSaving => {
                let new_id = self.ids.generate();
                self.send(Event::ReceiveCurrentDateTimeAndNewIdForSaving(DateTimeAndId {
                    current_date_time: current_date_time(),
                    new_id,
                }));
            }
            Command::GenerateUuid => {
                let id = self.ids.generate();
                self.send(Event::ReceiveUuidForAddingRow(id));
            }
            Command::CopyEditorCommandToClipboard(text) => {
                let host = Arc::clone(&self.host);
                let events = self.events.clone();
                self.in_flight.spawn(async move {
                    let copied = match host.write_clipboard(&text).await {
                        Ok(()) => true,
                        Err(e) => {
                            tracing::debug!(error = %e, "failed to copy editor command");
                            false
                        }
                    };
                    let _ = events.send(Event::AttemptedToCopyEditorCommandToClipboard(copied));
                });
            }
            Command::SelectAllInTextFieldWithCommandToRunEditor => {
                let selected = self
                    .host
                    .element_by_id(EDITOR_COMMAND_FIELD_ID)
                    .is_some_and(|element| self.host.select_all(&element));
                if !selected {
                    tracing::debug!("editor command field absent or not a text input");
                }
            }
            Command::DragStart => self.host.start_drag(),
        }
    }

    /// Feed a scroll offset from the host. Emits
    /// `scrollingUpWhileFarAwayFromTheTop` when the limiter allows.
    pub fn on_scroll(&mut self, offset: f64) {
        if self.scroll.record(offset) {
            self.send(Event::ScrollingUpWhileFarAwayFromTheTop);
        }
    }

    /// Steps run once the host tree is ready: apply the theme, focus the
    /// element receiving keyboard shortcuts and scroll to the URL fragment.
    pub fn on_dom_ready(&self, fragment: Option<&str>) {
        self.theme.reflect(&*self.host);

        if let Some(outer) = self.host.element_by_id(OUTER_ELEMENT_ID) {
            self.host.focus(&outer);
        }

        let target = fragment
            .map(|f| f.trim_start_matches('#'))
            .filter(|f| !f.is_empty())
            .and_then(|f| self.host.element_by_id(f));
        if let Some(element) = target {
            self.host.scroll_into_view(&element);
        }
    }

    /// Keep keyboard shortcuts working when focus moves to nothing.
    pub fn on_focus_lost(&self, related_target: Option<&str>) {
        if related_target.is_some() {
            return;
        }
        if let Some(outer) = self.host.element_by_id(OUTER_ELEMENT_ID) {
            self.host.focus(&outer);
        }
    }

    /// Wait for every in-flight command to finish.
    pub async fn settle(&mut self) {
        while self.in_flight.join_next().await.is_some() {}
    }

    fn on_signal(&mut self, signal: HostSignal) {
        match signal {
            HostSignal::Scrolled(offset) => self.on_scroll(offset),
            HostSignal::FocusLost { related_target } => {
                self.on_focus_lost(related_target.as_deref());
            }
        }
    }

    /// Process commands and host signals until the core's command sender is
    /// dropped, then let in-flight commands finish.
    pub async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut signals: mpsc::UnboundedReceiver<HostSignal>,
    ) {
        tracing::info!("bridge started");

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.dispatch(command),
                    None => break,
                },
                Some(signal) = signals.recv() => self.on_signal(signal),
            }
        }

        self.settle().await;
        tracing::info!("bridge stopped");
    }
}

/// Wait for the element, then focus it until it is the active element.
///
/// Both phases share one deadline `timeout` after the call; focusing only
/// gets what the wait left over. Running out of time is not an error: focus
/// is a convenience.
async fn give_focus_once_present<H: Host>(
    host: Arc<H>,
    id: String,
    interval: Duration,
    timeout: Duration,
) {
    let deadline = Instant::now() + timeout;
    let Ok(element) = tokio::time::timeout_at(deadline, wait_for_element(&*host, &id)).await else {
        tracing::debug!(id = %id, "search field never appeared");
        return;
    };
    let remaining = deadline.saturating_duration_since(Instant::now());

    let focused = until_async(
        || {
            host.focus(&element);
            let active = host.active_element_id().as_deref() == Some(id.as_str());
            std::future::ready(Ok::<_, Infallible>(active))
        },
        interval,
        remaining,
    )
    .await;

    if let Err(e) = focused {
        tracing::debug!(id = %id, error = %e, "could not focus search field");
    }
}
