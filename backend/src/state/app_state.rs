// Application state
// Holds the injected completion client and what handlers report about it

use crate::bridge::{BridgeError, CompletionClient, ConversationBridge};
use crate::config::Config;
use std::sync::Arc;

/// State shared by every handler
pub type SharedState = Arc<AppState>;

/// Main application state
///
/// Conversations are not stored here; clients send them with every request.
#[derive(Clone)]
pub struct AppState {
    /// Client used for every model call
    pub client: Arc<dyn CompletionClient>,
    /// Model name reported by the health endpoint
    pub model: String,
    /// Whether an API key was configured at startup
    pub api_key_configured: bool,
}

impl AppState {
    /// Create state around an existing client
    pub fn new(
        client: Arc<dyn CompletionClient>,
        model: impl Into<String>,
        api_key_configured: bool,
    ) -> Self {
        Self {
            client,
            model: model.into(),
            api_key_configured,
        }
    }

    /// Build state with a [`ConversationBridge`] from configuration
    ///
    /// # Errors
    /// * Returns `BridgeError::Configuration` if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, BridgeError> {
        let bridge = ConversationBridge::new(config.bridge.clone())?;
        Ok(Self::new(
            Arc::new(bridge),
            config.bridge.model.clone(),
            config.bridge.has_api_key(),
        ))
    }

    /// Wrap in an `Arc` for the router
    pub fn shared(self) -> SharedState {
        Arc::new(self)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("model", &self.model)
            .field("api_key_configured", &self.api_key_configured)
            .finish_non_exhaustive()
    }
}
