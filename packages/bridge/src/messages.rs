//! Messages carried by the bridge.
//!
//! Both directions serialize as `{"port": "<name>", "payload": ...}`, with the
//! payload omitted for messages that carry none.

use serde::{Deserialize, Serialize};

/// A side effect the application core asks the host to perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "port", content = "payload", rename_all = "camelCase")]
pub enum Command {
    AllowBackgroundScrolling,
    PreventBackgroundScrolling,
    /// Falls back to allowing background scrolling if the element is absent.
    ScrollElementIntoView(String),
    /// Dropped if the element is absent.
    ScrollSearchResultIntoView(String),
    GiveSearchFieldFocusOnceItIsPresent(String),
    /// Theme name, or empty to clear the stored preference.
    ChangeTheme(String),
    GetCurrentDateTimeForSaving,
    GetCurrentDateTimeAndNewIdForSaving,
    GenerateUuid,
    CopyEditorCommandToClipboard(String),
    SelectAllInTextFieldWithCommandToRunEditor,
    DragStart,
}

impl Command {
    /// Port name of the command, for logging.
    pub fn port(&self) -> &'static str {
        match self {
            Self::AllowBackgroundScrolling => "allowBackgroundScrolling",
            Self::PreventBackgroundScrolling => "preventBackgroundScrolling",
            Self::ScrollElementIntoView(_) => "scrollElementIntoView",
            Self::ScrollSearchResultIntoView(_) => "scrollSearchResultIntoView",
            Self::GiveSearchFieldFocusOnceItIsPresent(_) => "giveSearchFieldFocusOnceItIsPresent",
            Self::ChangeTheme(_) => "changeTheme",
            Self::GetCurrentDateTimeForSaving => "getCurrentDateTimeForSaving",
            Self::GetCurrentDateTimeAndNewIdForSaving => "getCurrentDateTimeAndNewIdForSaving",
            Self::GenerateUuid => "generateUuid",
            Self::CopyEditorCommandToClipboard(_) => "copyEditorCommandToClipboard",
            Self::SelectAllInTextFieldWithCommandToRunEditor => {
                "selectAllInTextFieldWithCommandToRunEditor"
            }
            Self::DragStart => "dragStart",
        }
    }
}

/// Timestamp and fresh id for saving a new item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeAndId {
    pub current_date_time: String,
    pub new_id: String,
}

/// A value the host pushes to the application core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "port", content = "payload", rename_all = "camelCase")]
pub enum Event {
    /// ISO 8601 UTC timestamp with milliseconds.
    ReceiveCurrentDateTimeForSaving(String),
    ReceiveCurrentDateTimeAndNewIdForSaving(DateTimeAndId),
    ReceiveUuidForAddingRow(String),
    AttemptedToCopyEditorCommandToClipboard(bool),
    ScrollingUpWhileFarAwayFromTheTop,
}

/// Something the host observed that the bridge reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum HostSignal {
    /// New vertical scroll offset of the page.
    Scrolled(f64),
    /// Focus left an element; `related_target` is where it went.
    FocusLost { related_target: Option<String> },
}
