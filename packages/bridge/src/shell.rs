//! Startup: read the page markup once, build the flags the application core
//! is initialized with, then start the bridge.

use std::sync::Arc;

use glossary_parser::ids::IdGenerator;
use glossary_parser::markup::{html_to_xhtml, parse_markup};
use glossary_parser::{
    parse_document, AboutLink, GlossaryDocument, GlossaryItem, PageConfig, TagWithDescription,
    Theme,
};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::bridge::PortBridge;
use crate::config::BridgeConfig;
use crate::host::Host;
use crate::messages::{Command, Event, HostSignal};
use crate::store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};
use crate::theme::ThemePersistence;

/// Everything the application core needs to render the first view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitFlags {
    pub title_string: String,
    pub about_paragraph: String,
    pub about_links: Vec<AboutLink>,
    pub tags_with_descriptions: Vec<TagWithDescription>,
    pub glossary_items: Vec<GlossaryItem>,
    /// Resolved theme preference: stored value, else the page default.
    pub theme: Theme,
    #[serde(flatten)]
    pub page: PageConfig,
}

/// Result of reading the page: the core's flags and the theme persistence
/// the bridge will use.
#[derive(Debug)]
pub struct Startup<S> {
    pub flags: InitFlags,
    pub theme: ThemePersistence<S>,
}

/// Parse the page markup and resolve the theme preference against `store`.
///
/// Never fails: the core always starts with a document. A page the reader
/// cannot make sense of yields an empty document with default flags.
pub fn load<S: KeyValueStore>(markup: &str, store: S, ids: &mut dyn IdGenerator) -> Startup<S> {
    let xhtml = html_to_xhtml(markup);
    let (page, document) = match parse_markup(&xhtml) {
        Ok(doc) => (
            PageConfig::from_markup(&doc),
            parse_document(doc.root_element(), ids),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read page markup, starting empty");
            (PageConfig::default(), GlossaryDocument::default())
        }
    };

    let theme = ThemePersistence::new(store, page.default_theme);

    tracing::debug!(
        items = document.items.len(),
        theme = %theme.preference(),
        "page loaded"
    );

    let flags = InitFlags {
        title_string: document.title,
        about_paragraph: document.about_paragraph,
        about_links: document.about_links,
        tags_with_descriptions: document.tags_with_descriptions,
        glossary_items: document.items,
        theme: theme.preference(),
        page,
    };

    Startup { flags, theme }
}

/// Theme store chosen by [`BridgeConfig::theme_store_path`].
#[derive(Debug)]
pub enum ThemeStore {
    Memory(MemoryStore),
    File(JsonFileStore),
}

impl ThemeStore {
    pub fn from_config(config: &BridgeConfig) -> Self {
        match &config.theme_store_path {
            Some(path) => Self::File(JsonFileStore::new(path.clone())),
            None => Self::Memory(MemoryStore::new()),
        }
    }
}

impl KeyValueStore for ThemeStore {
    fn get(&self, key: &str) -> std::result::Result<Option<String>, StoreError> {
        match self {
            Self::Memory(store) => store.get(key),
            Self::File(store) => store.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> std::result::Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.set(key, value),
            Self::File(store) => store.set(key, value),
        }
    }

    fn clear(&self, key: &str) -> std::result::Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.clear(key),
            Self::File(store) => store.clear(key),
        }
    }
}

/// Channels connecting a running bridge to the core and the host.
#[derive(Debug)]
pub struct Running {
    /// Commands from the core. Dropping this stops the bridge.
    pub commands: mpsc::UnboundedSender<Command>,
    /// Observations from the host.
    pub signals: mpsc::UnboundedSender<HostSignal>,
    /// Values pushed to the core.
    pub events: mpsc::UnboundedReceiver<Event>,
    pub handle: JoinHandle<()>,
}

/// Run the DOM-ready steps, then spawn the bridge loop.
///
/// Must be called from within a tokio runtime.
pub fn launch<H, S>(
    host: Arc<H>,
    theme: ThemePersistence<S>,
    config: BridgeConfig,
    fragment: Option<&str>,
) -> Running
where
    H: Host,
    S: KeyValueStore + 'static,
{
    let (bridge, events) = PortBridge::new(host, theme, config);
    bridge.on_dom_ready(fragment);

    let (commands, command_rx) = mpsc::unbounded_channel();
    let (signals, signal_rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(bridge.run(command_rx, signal_rx));

    Running {
        commands,
        signals,
        events,
        handle,
    }
}
