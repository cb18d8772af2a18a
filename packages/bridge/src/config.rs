use std::path::PathBuf;
use std::time::Duration;

/// Timing and limits for the bridge's host-side behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeConfig {
    /// Delay between focus attempts.
    pub focus_poll_interval: Duration,
    /// Time allowed for the search field to appear and take focus.
    pub focus_timeout: Duration,
    /// Scroll offset beyond which the page counts as far from the top.
    pub scroll_far_from_top: f64,
    /// Upward scroll samples needed before the scroll event fires.
    pub scroll_budget: u32,
    /// File backing the theme preference. `None` keeps it in memory.
    pub theme_store_path: Option<PathBuf>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            focus_poll_interval: Duration::from_millis(50),
            focus_timeout: Duration::from_millis(2000),
            scroll_far_from_top: 1000.0,
            scroll_budget: 10,
            theme_store_path: None,
        }
    }
}

impl BridgeConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let focus_poll_interval = std::env::var("GLOSSARY_FOCUS_POLL_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.focus_poll_interval);

        let focus_timeout = std::env::var("GLOSSARY_FOCUS_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.focus_timeout);

        let scroll_far_from_top = std::env::var("GLOSSARY_SCROLL_FAR_FROM_TOP_PX")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.scroll_far_from_top);

        let scroll_budget = std::env::var("GLOSSARY_SCROLL_BUDGET")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.scroll_budget);

        let theme_store_path = std::env::var("GLOSSARY_THEME_STORE")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Self {
            focus_poll_interval,
            focus_timeout,
            scroll_far_from_top,
            scroll_budget,
            theme_store_path,
        }
    }

    pub fn with_focus_timing(mut self, poll_interval: Duration, timeout: Duration) -> Self {
        self.focus_poll_interval = poll_interval;
        self.focus_timeout = timeout;
        self
    }

    pub fn with_scroll_limits(mut self, far_from_top: f64, budget: u32) -> Self {
        self.scroll_far_from_top = far_from_top;
        self.scroll_budget = budget;
        self
    }

    pub fn with_theme_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.theme_store_path = Some(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_focus_contract() {
        let config = BridgeConfig::default();
        assert_eq!(config.focus_poll_interval, Duration::from_millis(50));
        assert_eq!(config.focus_timeout, Duration::from_secs(2));
        assert!(config.theme_store_path.is_none());
    }

    #[test]
    fn test_builders() {
        let config = BridgeConfig::default()
            .with_focus_timing(Duration::from_millis(10), Duration::from_millis(100))
            .with_scroll_limits(500.0, 3)
            .with_theme_store_path("/tmp/theme.json");

        assert_eq!(config.focus_poll_interval, Duration::from_millis(10));
        assert_eq!(config.focus_timeout, Duration::from_millis(100));
        assert_eq!(config.scroll_far_from_top, 500.0);
        assert_eq!(config.scroll_budget, 3);
        assert_eq!(config.theme_store_path, Some(PathBuf::from("/tmp/theme.json")));
    }
}
