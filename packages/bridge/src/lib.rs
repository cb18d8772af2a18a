//! Glossary Bridge - Host side of a glossary page.
//!
//! The application core never touches the host directly. It emits typed
//! [`Command`]s and receives [`Event`]s; the [`PortBridge`] performs the
//! side effects against a [`Host`] and answers where a command asks for a
//! value.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use glossary_bridge::{BridgeConfig, Command, MemoryHost, MemoryStore, PortBridge, ThemePersistence};
//! use glossary_parser::Theme;
//!
//! let host = Arc::new(MemoryHost::new());
//! let theme = ThemePersistence::new(MemoryStore::new(), Theme::System);
//! let (mut bridge, _events) = PortBridge::new(Arc::clone(&host), theme, BridgeConfig::default());
//!
//! bridge.dispatch(Command::PreventBackgroundScrolling);
//! assert!(host.body_has_class("overflow-hidden"));
//! ```
//!
//! # Architecture
//!
//! - [`shell`]: Startup (markup to flags) and launching the bridge loop
//! - [`bridge`]: Command routing and host signal handling
//! - [`messages`]: Command, event and host signal types
//! - [`host`]: Host abstraction and the in-memory host
//! - [`wait`]: Polling and element observation helpers
//! - [`theme`]: Theme preference resolution and persistence
//! - [`store`]: Key-value stores backing persisted preferences
//! - [`scroll`]: Scroll-up signal limiter
//! - [`config`]: Timing and limits, from the environment

pub mod bridge;
pub mod config;
pub mod host;
pub mod messages;
pub mod scroll;
pub mod shell;
pub mod store;
pub mod theme;
pub mod wait;

pub use bridge::{current_date_time, PortBridge};
pub use config::BridgeConfig;
pub use host::{ClipboardError, ElementKind, ElementRef, Host, MemoryHost};
pub use messages::{Command, DateTimeAndId, Event, HostSignal};
pub use scroll::ScrollMonitor;
pub use shell::{launch, load, InitFlags, Running, Startup, ThemeStore};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};
pub use theme::{ThemePersistence, THEME_STORAGE_KEY};
pub use wait::{until_async, wait_for_element, WaitError};
