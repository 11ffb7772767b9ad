//! Runtime configuration
//!
//! Native builds read environment variables; the browser build reads
//! globals set by the hosting page.

use tracing::{info, warn};

use crate::core::ThemeMode;

/// Env var / page global naming the message API origin
pub const API_BASE_URL_ENV: &str = "UTACT_API_BASE_URL";
/// Env var selecting the starting theme on native
pub const THEME_ENV: &str = "UTACT_THEME";
/// Path of the message collection under the API origin
pub const MESSAGES_PATH: &str = "/api/messages";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoardConfig {
    /// `None` runs the board offline with in-memory messages
    pub api_base_url: Option<String>,
    pub initial_theme: ThemeMode,
}

impl BoardConfig {
    /// Full URL of the message collection
    pub fn messages_url(&self) -> Option<String> {
        self.api_base_url
            .as_ref()
            .map(|base| format!("{}{}", base, MESSAGES_PATH))
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        let api_base_url = normalize_base_url(std::env::var(API_BASE_URL_ENV).ok());
        let initial_theme = std::env::var(THEME_ENV)
            .ok()
            .and_then(|raw| {
                let mode = ThemeMode::parse(&raw);
                if mode.is_none() {
                    warn!(value = %raw, "Unknown {}, using light", THEME_ENV);
                }
                mode
            })
            .unwrap_or_default();

        let config = Self {
            api_base_url,
            initial_theme,
        };
        config.log();
        config
    }

    /// `window.__utact_api_base_url` and the `prefers-color-scheme` query
    #[cfg(all(feature = "wasm", target_arch = "wasm32"))]
    pub fn from_window() -> Self {
        let api_base_url = normalize_base_url(
            js_sys::eval("window.__utact_api_base_url")
                .ok()
                .and_then(|v| v.as_string()),
        );
        let prefers_dark = web_sys::window()
            .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .map(|q| q.matches())
            .unwrap_or(false);

        let config = Self {
            api_base_url,
            initial_theme: if prefers_dark {
                ThemeMode::Dark
            } else {
                ThemeMode::Light
            },
        };
        config.log();
        config
    }

    fn log(&self) {
        match &self.api_base_url {
            Some(url) => info!(url = %url, theme = ?self.initial_theme, "Message API configured"),
            None => warn!(
                theme = ?self.initial_theme,
                "{} not set, messages stay in memory", API_BASE_URL_ENV
            ),
        }
    }
}

/// Trim, drop trailing slashes, and treat blank as unset.
pub fn normalize_base_url(raw: Option<String>) -> Option<String> {
    let trimmed = raw?.trim().trim_end_matches('/').to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url(None), None);
        assert_eq!(normalize_base_url(Some("   ".into())), None);
        assert_eq!(normalize_base_url(Some("/".into())), None);
        assert_eq!(
            normalize_base_url(Some(" https://api.example.com// ".into())),
            Some("https://api.example.com".to_string())
        );
    }

    #[test]
    fn test_messages_url() {
        let config = BoardConfig {
            api_base_url: Some("http://localhost:8080".into()),
            initial_theme: ThemeMode::Dark,
        };
        assert_eq!(
            config.messages_url().as_deref(),
            Some("http://localhost:8080/api/messages")
        );
        assert_eq!(BoardConfig::default().messages_url(), None);
    }
}
