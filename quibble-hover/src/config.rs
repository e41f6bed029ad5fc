//! Configuration for the hover feature.
//!
//! Loaded by the host application as a fragment of its own TOML config (the
//! `[hover]` table in Quibble's `server.toml`); every field has a production
//! default so a missing or partial fragment just works.

use serde::Deserialize;

/// Hover configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HoverConfig {
    pub endpoint: EndpointConfig,
    pub overlay: OverlayConfig,
}

/// Where hover lookups are sent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Server origin, e.g. `https://review.example.com`. Empty means
    /// same-origin (the webview shell resolves relative URLs).
    pub origin: String,
}

/// Overlay presentation knobs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Vertical gap between the overlay's bottom edge and the token's top
    /// edge, in viewport units.
    pub gap: f64,
    /// Message shown while the language server is answering.
    pub waiting_message: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            gap: 8.0,
            waiting_message: "Waiting for language server response...".to_string(),
        }
    }
}

impl HoverConfig {
    /// Set the server origin.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.endpoint.origin = origin.into();
        self
    }

    /// Set the gap between overlay and token.
    #[must_use]
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.overlay.gap = gap;
        self
    }

    /// Set the waiting message.
    #[must_use]
    pub fn with_waiting_message(mut self, message: impl Into<String>) -> Self {
        self.overlay.waiting_message = message.into();
        self
    }
}
