use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::sync::watch;

use super::{ClipboardError, Host};

/// Kind of an element in the in-memory tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Generic,
    TextInput,
}

/// Handle to one insertion of an element.
///
/// Removing and re-inserting an id creates a new node, so handles to the
/// old node no longer match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRef {
    pub id: String,
    pub node: u64,
}

#[derive(Debug)]
struct ElementEntry {
    node: u64,
    kind: ElementKind,
    refuse_focus: u32,
}

#[derive(Debug, Default)]
struct HostState {
    elements: HashMap<String, ElementEntry>,
    next_node: u64,
    body_classes: BTreeSet<String>,
    root_classes: BTreeSet<String>,
    focused: Option<u64>,
    focus_attempts: usize,
    scrolled: Vec<String>,
    selected: Vec<String>,
    drags: usize,
    clipboard: Option<String>,
    clipboard_denied: bool,
    prefers_dark: bool,
}

/// Headless host keeping its tree, classes and clipboard in memory.
#[derive(Debug)]
pub struct MemoryHost {
    state: Mutex<HostState>,
    mutations: watch::Sender<u64>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    pub fn new() -> Self {
        let (mutations, _) = watch::channel(0);
        Self {
            state: Mutex::new(HostState::default()),
            mutations,
        }
    }

    fn state(&self) -> MutexGuard<'_, HostState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn notify_mutation(&self) {
        self.mutations.send_modify(|generation| *generation += 1);
    }

    /// Insert an element, replacing any element with the same id.
    pub fn insert_element(&self, id: &str, kind: ElementKind) -> ElementRef {
        let node = {
            let mut state = self.state();
            state.next_node += 1;
            let node = state.next_node;
            state.elements.insert(
                id.to_string(),
                ElementEntry {
                    node,
                    kind,
                    refuse_focus: 0,
                },
            );
            node
        };
        self.notify_mutation();
        ElementRef {
            id: id.to_string(),
            node,
        }
    }

    pub fn remove_element(&self, id: &str) {
        let removed = {
            let mut state = self.state();
            let removed = state.elements.remove(id);
            if let Some(entry) = &removed {
                if state.focused == Some(entry.node) {
                    state.focused = None;
                }
            }
            removed.is_some()
        };
        if removed {
            self.notify_mutation();
        }
    }

    /// Make the next `attempts` focus calls on `id` have no effect.
    pub fn refuse_focus(&self, id: &str, attempts: u32) {
        if let Some(entry) = self.state().elements.get_mut(id) {
            entry.refuse_focus = attempts;
        }
    }

    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        self.state().prefers_dark = prefers_dark;
    }

    pub fn deny_clipboard(&self, denied: bool) {
        self.state().clipboard_denied = denied;
    }

    pub fn body_has_class(&self, class: &str) -> bool {
        self.state().body_classes.contains(class)
    }

    pub fn root_has_class(&self, class: &str) -> bool {
        self.state().root_classes.contains(class)
    }

    /// Ids scrolled into view, oldest first.
    pub fn scrolled_into_view(&self) -> Vec<String> {
        self.state().scrolled.clone()
    }

    /// Ids of inputs whose text was selected, oldest first.
    pub fn selected_inputs(&self) -> Vec<String> {
        self.state().selected.clone()
    }

    pub fn focus_attempts(&self) -> usize {
        self.state().focus_attempts
    }

    pub fn drag_count(&self) -> usize {
        self.state().drags
    }

    pub fn clipboard_contents(&self) -> Option<String> {
        self.state().clipboard.clone()
    }

    fn is_current(state: &HostState, element: &ElementRef) -> bool {
        state
            .elements
            .get(&element.id)
            .is_some_and(|entry| entry.node == element.node)
    }
}

#[async_trait]
impl Host for MemoryHost {
    type Element = ElementRef;

    fn element_by_id(&self, id: &str) -> Option<ElementRef> {
        self.state().elements.get(id).map(|entry| ElementRef {
            id: id.to_string(),
            node: entry.node,
        })
    }

    fn mutations(&self) -> watch::Receiver<u64> {
        self.mutations.subscribe()
    }

    fn set_body_class(&self, class: &str, enabled: bool) {
        let mut state = self.state();
        if enabled {
            state.body_classes.insert(class.to_string());
        } else {
            state.body_classes.remove(class);
        }
    }

    fn set_root_class(&self, class: &str, enabled: bool) {
        let mut state = self.state();
        if enabled {
            state.root_classes.insert(class.to_string());
        } else {
            state.root_classes.remove(class);
        }
    }

    fn scroll_into_view(&self, element: &ElementRef) {
        let mut state = self.state();
        if Self::is_current(&state, element) {
            state.scrolled.push(element.id.clone());
        }
    }

    fn focus(&self, element: &ElementRef) {
        let mut state = self.state();
        state.focus_attempts += 1;
        let Some(entry) = state.elements.get_mut(&element.id) else {
            return;
        };
        if entry.node != element.node {
            return;
        }
        if entry.refuse_focus > 0 {
            entry.refuse_focus -= 1;
            return;
        }
        state.focused = Some(element.node);
    }

    fn active_element_id(&self) -> Option<String> {
        let state = self.state();
        let focused = state.focused?;
        state
            .elements
            .iter()
            .find(|(_, entry)| entry.node == focused)
            .map(|(id, _)| id.clone())
    }

    fn select_all(&self, element: &ElementRef) -> bool {
        let mut state = self.state();
        let is_input = state
            .elements
            .get(&element.id)
            .is_some_and(|entry| entry.node == element.node && entry.kind == ElementKind::TextInput);
        if is_input {
            state.selected.push(element.id.clone());
        }
        is_input
    }

    fn prefers_dark_color_scheme(&self) -> bool {
        self.state().prefers_dark
    }

    fn start_drag(&self) {
        self.state().drags += 1;
    }

    async fn write_clipboard(&self, text: &str) -> Result<(), ClipboardError> {
        tokio::task::yield_now().await;
        let mut state = self.state();
        if state.clipboard_denied {
            return Err(ClipboardError::Denied);
        }
        state.clipboard = Some(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let host = MemoryHost::new();
        assert!(host.element_by_id("a").is_none());

        let a = host.insert_element("a", ElementKind::Generic);
        assert_eq!(host.element_by_id("a"), Some(a));
    }

    #[test]
    fn test_mutations_bump_generation() {
        let host = MemoryHost::new();
        let rx = host.mutations();
        host.insert_element("a", ElementKind::Generic);
        host.remove_element("a");
        host.remove_element("a");
        assert_eq!(*rx.borrow(), 2);
    }

    #[test]
    fn test_stale_handle_cannot_take_focus() {
        let host = MemoryHost::new();
        let old = host.insert_element("search", ElementKind::TextInput);
        host.remove_element("search");
        let new = host.insert_element("search", ElementKind::TextInput);

        host.focus(&old);
        assert_eq!(host.active_element_id(), None);

        host.focus(&new);
        assert_eq!(host.active_element_id().as_deref(), Some("search"));
    }

    #[test]
    fn test_refused_focus_attempts() {
        let host = MemoryHost::new();
        let field = host.insert_element("search", ElementKind::TextInput);
        host.refuse_focus("search", 2);

        host.focus(&field);
        host.focus(&field);
        assert_eq!(host.active_element_id(), None);
        host.focus(&field);
        assert_eq!(host.active_element_id().as_deref(), Some("search"));
        assert_eq!(host.focus_attempts(), 3);
    }

    #[test]
    fn test_select_all_requires_text_input() {
        let host = MemoryHost::new();
        let div = host.insert_element("div", ElementKind::Generic);
        let input = host.insert_element("input", ElementKind::TextInput);

        assert!(!host.select_all(&div));
        assert!(host.select_all(&input));
        assert_eq!(host.selected_inputs(), vec!["input".to_string()]);
    }

    #[tokio::test]
    async fn test_clipboard_denied() {
        let host = MemoryHost::new();
        host.deny_clipboard(true);
        assert_eq!(host.write_clipboard("x").await, Err(ClipboardError::Denied));
        assert_eq!(host.clipboard_contents(), None);

        host.deny_clipboard(false);
        assert_eq!(host.write_clipboard("x").await, Ok(()));
        assert_eq!(host.clipboard_contents().as_deref(), Some("x"));
    }
}
