use std::time::Duration;

use log::warn;

pub const DEFAULT_NOTIFICATIONS_URL: &str = "/notifications";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(30_000);
pub const CENTER_CLEAR_DELAY: Duration = Duration::from_millis(1_500);
pub const POPUP_OPEN_DELAY: Duration = Duration::from_millis(1_100);
/// Below this width the map is stacked above the list.
pub const NARROW_VIEWPORT_WIDTH: f64 = 768.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub notifications_url: String,
    pub poll_interval: Duration,
    pub center_clear_delay: Duration,
    pub popup_open_delay: Duration,
    pub log_level: log::Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notifications_url: DEFAULT_NOTIFICATIONS_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            center_clear_delay: CENTER_CLEAR_DELAY,
            popup_open_delay: POPUP_OPEN_DELAY,
            log_level: log::Level::Debug,
        }
    }
}

impl Config {
    /// Defaults overridden by the `NOTIFICATIONS_*` variables seen at build time.
    pub fn from_env() -> Self {
        Self::from_overrides(
            option_env!("NOTIFICATIONS_URL"),
            option_env!("NOTIFICATIONS_POLL_MS"),
            option_env!("NOTIFICATIONS_LOG_LEVEL"),
        )
    }

    fn from_overrides(url: Option<&str>, poll_ms: Option<&str>, log_level: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(url) = url.map(str::trim).filter(|url| !url.is_empty()) {
            config.notifications_url = url.to_string();
        }
        if let Some(poll_ms) = poll_ms {
            match poll_ms.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => config.poll_interval = Duration::from_millis(ms),
                _ => warn!("Ignoring invalid NOTIFICATIONS_POLL_MS {poll_ms:?}"),
            }
        }
        if let Some(level) = log_level {
            match level.trim().parse::<log::Level>() {
                Ok(level) => config.log_level = level,
                Err(err) => warn!("Ignoring invalid NOTIFICATIONS_LOG_LEVEL {level:?}: {err}"),
            }
        }
        config
    }
}

pub fn is_narrow_viewport(width: f64) -> bool {
    width < NARROW_VIEWPORT_WIDTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::from_overrides(None, None, None);
        assert_eq!(config, Config::default());
        assert_eq!(config.notifications_url, "/notifications");
        assert_eq!(config.poll_interval, Duration::from_secs(30));
        assert_eq!(config.center_clear_delay, Duration::from_millis(1500));
        assert_eq!(config.popup_open_delay, Duration::from_millis(1100));
    }

    #[test]
    fn overrides_apply() {
        let config = Config::from_overrides(
            Some("http://localhost:8000/notifications"),
            Some("5000"),
            Some("warn"),
        );
        assert_eq!(config.notifications_url, "http://localhost:8000/notifications");
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.log_level, log::Level::Warn);
    }

    #[test]
    fn bad_overrides_keep_defaults() {
        let config = Config::from_overrides(Some("  "), Some("soon"), Some("loud"));
        assert_eq!(config, Config::default());

        let config = Config::from_overrides(None, Some("0"), None);
        assert_eq!(config.poll_interval, DEFAULT_POLL_INTERVAL);
    }

    #[test]
    fn narrow_breakpoint() {
        assert!(is_narrow_viewport(375.0));
        assert!(is_narrow_viewport(767.9));
        assert!(!is_narrow_viewport(768.0));
        assert!(!is_narrow_viewport(1280.0));
    }
}
