//! Shared state bus
//!
//! Several header bars and panels render the same global state (which page
//! is active, whether the notification panel is open, whether there is an
//! unread notification) without any of them owning it. [`StateBus`] is the
//! explicitly constructed container they all receive a clone of.
//!
//! ```text
//! ┌───────────┐  set/get   ┌──────────────┐  get   ┌───────────┐
//! │ Header A  │ ─────────► │   StateBus   │ ◄───── │ Header B  │
//! └───────────┘            │  cells       │        └───────────┘
//!       │ publish          │  EventBus    │  subscribe   ▲
//!       └────────────────► └──────────────┘ ─────────────┘
//! ```

mod cell;
mod events;

pub use cell::StateCell;
pub use events::{EventBus, SubscriptionId};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ConfigValue;

/// Pages of the application
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Page {
    #[default]
    Main,
    Download,
    Settings,
    About,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Main, Page::Download, Page::Settings, Page::About];

    /// Route path of the page
    pub fn route(&self) -> &'static str {
        match self {
            Self::Main => "/",
            Self::Download => "/download",
            Self::Settings => "/settings",
            Self::About => "/about",
        }
    }

    pub fn from_route(route: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|page| page.route() == route)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Main => "Main",
            Self::Download => "Download",
            Self::Settings => "Settings",
            Self::About => "About",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

/// A user-facing notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Surface or operation that raised it (e.g. "download")
    pub origin: String,
    pub msg: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, origin: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            kind,
            origin: origin.into(),
            msg: msg.into(),
        }
    }
}

/// Payload of bus events
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    NotificationAdd(Notification),
    PageChanged(Page),
    ConfigChanged { key: String, value: ConfigValue },
    /// The watched download directory changed on disk
    WatcherFired,
}

impl AppEvent {
    pub const NOTIFICATION_ADD: &'static str = "notification_add";
    pub const PAGE_CHANGED: &'static str = "page_changed";
    pub const CONFIG_CHANGED: &'static str = "config_changed";
    pub const WATCHER_FIRED: &'static str = "watcher_fired";

    /// Name subscribers register for
    pub fn name(&self) -> &'static str {
        match self {
            Self::NotificationAdd(_) => Self::NOTIFICATION_ADD,
            Self::PageChanged(_) => Self::PAGE_CHANGED,
            Self::ConfigChanged { .. } => Self::CONFIG_CHANGED,
            Self::WatcherFired => Self::WATCHER_FIRED,
        }
    }
}

/// Process-wide UI state and event channel
///
/// Cheap to clone; every clone shares the same cells and subscribers.
#[derive(Debug, Clone)]
pub struct StateBus {
    active_page: StateCell<Page>,
    show_notifications: StateCell<bool>,
    show_notification_dot: StateCell<bool>,
    events: EventBus<AppEvent>,
}

impl Default for StateBus {
    fn default() -> Self {
        Self::new()
    }
}

impl StateBus {
    /// Create the bus with every cell at its default
    ///
    /// Defaults: active page `Main`, notification panel closed, no dot.
    pub fn new() -> Self {
        Self {
            active_page: StateCell::new(Page::Main),
            show_notifications: StateCell::new(false),
            show_notification_dot: StateCell::new(false),
            events: EventBus::new(),
        }
    }

    pub fn active_page(&self) -> Page {
        self.active_page.get()
    }

    /// Switch page and publish [`AppEvent::PageChanged`] if it changed
    pub fn set_active_page(&self, page: Page) {
        let previous = self.active_page.set(page);
        if previous != page {
            log::debug!("set_active_page: {} -> {}", previous, page);
            self.publish(&AppEvent::PageChanged(page));
        }
    }

    pub fn show_notifications(&self) -> bool {
        self.show_notifications.get()
    }

    pub fn set_show_notifications(&self, show: bool) {
        self.show_notifications.set(show);
    }

    pub fn show_notification_dot(&self) -> bool {
        self.show_notification_dot.get()
    }

    pub fn set_show_notification_dot(&self, show: bool) {
        self.show_notification_dot.set(show);
    }

    /// Open the notification panel, which marks everything as seen
    pub fn open_notifications(&self) {
        self.show_notifications.set(true);
        self.show_notification_dot.set(false);
    }

    pub fn close_notifications(&self) {
        self.show_notifications.set(false);
    }

    /// Publish a notification
    ///
    /// Raises the unread dot unless the notification panel is open.
    pub fn notify(&self, notification: Notification) {
        if !self.show_notifications.get() {
            self.show_notification_dot.set(true);
        }
        self.publish(&AppEvent::NotificationAdd(notification));
    }

    /// Register a callback for events named `name`
    ///
    /// See the `AppEvent::*` name constants.
    pub fn subscribe(
        &self,
        name: impl Into<String>,
        callback: impl Fn(&AppEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.events.subscribe(name, callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Publish an event under its own name, returns the number of receivers
    pub fn publish(&self, event: &AppEvent) -> usize {
        self.events.publish(event.name(), event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_defaults() {
        let bus = StateBus::new();
        assert_eq!(bus.active_page(), Page::Main);
        assert!(!bus.show_notifications());
        assert!(!bus.show_notification_dot());
    }

    #[test]
    fn test_surfaces_share_state() {
        let bus = StateBus::new();
        let main_header = bus.clone();
        let settings_header = bus.clone();

        main_header.set_active_page(Page::Settings);
        assert_eq!(settings_header.active_page(), Page::Settings);

        settings_header.set_show_notifications(true);
        assert!(main_header.show_notifications());
    }

    #[test]
    fn test_page_change_publishes_once() {
        let bus = StateBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_in_callback = Arc::clone(&seen);
        bus.subscribe(AppEvent::PAGE_CHANGED, move |event| {
            if let AppEvent::PageChanged(page) = event {
                seen_in_callback.lock().unwrap().push(*page);
            }
        });

        bus.set_active_page(Page::Download);
        bus.set_active_page(Page::Download);
        bus.set_active_page(Page::Main);

        assert_eq!(*seen.lock().unwrap(), vec![Page::Download, Page::Main]);
    }

    #[test]
    fn test_notify_raises_dot_when_panel_closed() {
        let bus = StateBus::new();
        let received = Arc::new(Mutex::new(Vec::new()));
        let received_in_callback = Arc::clone(&received);
        bus.subscribe(AppEvent::NOTIFICATION_ADD, move |event| {
            received_in_callback.lock().unwrap().push(event.clone());
        });

        let notification =
            Notification::new(NotificationKind::Error, "download", "File already exists");
        bus.notify(notification.clone());
        assert!(bus.show_notification_dot());
        assert_eq!(*received.lock().unwrap(), vec![AppEvent::NotificationAdd(notification)]);

        bus.open_notifications();
        assert!(!bus.show_notification_dot());

        bus.notify(Notification::new(NotificationKind::Info, "search", "10 results"));
        assert!(!bus.show_notification_dot());
    }

    #[test]
    fn test_two_subscribers_called_once_in_order() {
        let bus = StateBus::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for label in ["header", "sidebar"] {
            let order = Arc::clone(&order);
            bus.subscribe(AppEvent::WATCHER_FIRED, move |_| order.lock().unwrap().push(label));
        }

        assert_eq!(bus.publish(&AppEvent::WatcherFired), 2);
        assert_eq!(*order.lock().unwrap(), vec!["header", "sidebar"]);
    }

    #[test]
    fn test_page_routes() {
        for page in Page::ALL {
            assert_eq!(Page::from_route(page.route()), Some(page));
        }
        assert_eq!(Page::from_route("/missing"), None);
    }

    #[test]
    fn test_notification_wire_format() {
        let notification = Notification::new(NotificationKind::Warning, "tags", "No match");
        let json = serde_json::to_value(&notification).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "warning", "origin": "tags", "msg": "No match"})
        );
    }
}
