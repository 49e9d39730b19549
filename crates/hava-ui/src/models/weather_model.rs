//! View model for the single weather lookup screen.
//!
//! Owns the transient UI state (query text, request status, last report)
//! and runs at most one lookup at a time. Presentation code observes it
//! through [`WeatherLookupView::subscribe`] and re-renders on every
//! transition.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use hava_core::WeatherError;
use hava_weather::{WeatherProvider, WeatherReport};
use tokio::runtime::Handle;

use crate::services::weather_service::{self, WeatherServiceMessage};
use crate::subscription::{SubscriptionId, Subscribers};
use crate::theme::{Palette, Theme};
use crate::theme_store::ThemeStore;

/// Where the current lookup stands
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error(WeatherError),
}

/// Keys the query field reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Enter,
}

pub struct WeatherLookupView {
    query: String,
    status: RequestStatus,
    result: Option<WeatherReport>,
    theme: Arc<ThemeStore>,
    provider: Arc<WeatherProvider>,
    runtime: Handle,
    tx: Sender<WeatherServiceMessage>,
    rx: Receiver<WeatherServiceMessage>,
    subscribers: Subscribers<WeatherLookupView>,
}

impl WeatherLookupView {
    pub fn new(theme: Arc<ThemeStore>, provider: Arc<WeatherProvider>, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            query: String::new(),
            status: RequestStatus::Idle,
            result: None,
            theme,
            provider,
            runtime,
            tx,
            rx,
            subscribers: Subscribers::default(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn status(&self) -> &RequestStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == RequestStatus::Loading
    }

    /// Fixed message for the last failed lookup, if the last lookup failed
    pub fn error_message(&self) -> Option<&'static str> {
        match &self.status {
            RequestStatus::Error(e) => Some(e.user_message()),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&WeatherReport> {
        self.result.as_ref()
    }

    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    pub fn palette(&self) -> &'static Palette {
        self.theme.palette()
    }

    /// Whether the search action is enabled
    pub fn can_search(&self) -> bool {
        !self.is_loading() && !self.query.trim().is_empty()
    }

    /// Replace the query text. Ignored while a lookup is in flight, the
    /// same way the input field is disabled.
    pub fn set_query(&mut self, text: impl Into<String>) {
        if self.is_loading() {
            return;
        }
        self.query = text.into();
        self.notify();
    }

    pub fn handle_key(&mut self, key: Key) {
        match key {
            Key::Enter => {
                self.search();
            }
            Key::Char(c) if !self.is_loading() => {
                self.query.push(c);
                self.notify();
            }
            Key::Backspace if !self.is_loading() => {
                if self.query.pop().is_some() {
                    self.notify();
                }
            }
            Key::Char(_) | Key::Backspace => {}
        }
    }

    /// Start a lookup for the trimmed query.
    ///
    /// Returns false without touching any state when the query is blank or
    /// a lookup is already running. Otherwise the status is `Loading` when
    /// this returns; the outcome arrives through [`Self::poll_channel`].
    pub fn search(&mut self) -> bool {
        if !self.can_search() {
            tracing::debug!(
                "Search ignored (loading: {}, query: {:?})",
                self.is_loading(),
                self.query
            );
            return false;
        }

        let city = self.query.trim().to_string();
        tracing::info!("Looking up weather for {}", city);

        self.status = RequestStatus::Loading;
        self.notify();

        weather_service::request_fetch(&self.tx, &self.runtime, Arc::clone(&self.provider), city);
        true
    }

    /// Apply a finished lookup if one is waiting. Never blocks.
    pub fn poll_channel(&mut self) -> bool {
        match self.rx.try_recv() {
            Ok(msg) => {
                self.apply(msg);
                true
            }
            Err(_) => false,
        }
    }

    /// Block up to `timeout` for a finished lookup and apply it
    pub fn wait_for_update(&mut self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(msg) => {
                self.apply(msg);
                true
            }
            Err(_) => false,
        }
    }

    fn apply(&mut self, msg: WeatherServiceMessage) {
        match msg {
            WeatherServiceMessage::FetchDone(Ok(report)) => {
                tracing::info!("Weather updated for {}", report.location_name);
                self.result = Some(report);
                self.status = RequestStatus::Success;
            }
            WeatherServiceMessage::FetchDone(Err(e)) => {
                tracing::warn!("Weather lookup failed: {}", e);
                self.result = None;
                self.status = RequestStatus::Error(e);
            }
        }
        self.notify();
    }

    /// Flip the shared theme and re-render
    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.theme.toggle_theme();
        self.notify();
        theme
    }

    pub fn subscribe(
        &mut self,
        callback: impl Fn(&WeatherLookupView) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    fn notify(&self) {
        self.subscribers.notify(self);
    }
}
