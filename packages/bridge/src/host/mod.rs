//! The host environment as seen by the bridge.
//!
//! All tree, class and focus access is synchronous. Only the clipboard write
//! suspends. Subtree changes are published as a generation counter on a
//! `watch` channel, which is what [`crate::wait::wait_for_element`] observes.

mod memory;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;

pub use memory::{ElementKind, ElementRef, MemoryHost};

/// Class on the body that locks background scrolling.
pub const SCROLL_LOCK_CLASS: &str = "overflow-hidden";

/// Class on the document root that switches to the dark theme.
pub const DARK_CLASS: &str = "dark";

/// Element that receives page-wide keyboard shortcuts.
pub const OUTER_ELEMENT_ID: &str = "glossary-page-outer";

/// Text field holding the command to run the editor.
pub const EDITOR_COMMAND_FIELD_ID: &str = "glossary-page-text-field-with-command-to-run-editor";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard access denied")]
    Denied,
}

/// Side effects only the host can perform.
#[async_trait]
pub trait Host: Send + Sync + 'static {
    /// Handle to an element in the host tree.
    type Element: Clone + Send + Sync + 'static;

    /// Look up an element by id.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Subscribe to subtree changes below the body.
    ///
    /// The value is bumped on every change; it carries no other meaning.
    fn mutations(&self) -> watch::Receiver<u64>;

    fn set_body_class(&self, class: &str, enabled: bool);

    fn set_root_class(&self, class: &str, enabled: bool);

    fn scroll_into_view(&self, element: &Self::Element);

    fn focus(&self, element: &Self::Element);

    /// Id of the element that currently has focus.
    fn active_element_id(&self) -> Option<String>;

    /// Select all text of a text input. Returns `false` if the element is
    /// not a text input.
    fn select_all(&self, element: &Self::Element) -> bool;

    /// Whether the host's color scheme preference is currently dark.
    fn prefers_dark_color_scheme(&self) -> bool;

    fn start_drag(&self);

    async fn write_clipboard(&self, text: &str) -> Result<(), ClipboardError>;
}
