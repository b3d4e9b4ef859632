//! Configuration types for record providers
//!
//! A provider is configured with a single credential; everything else about
//! its API (endpoints, request shapes) is fixed by the provider crate.

use serde::{Deserialize, Serialize};

/// DNS provider configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// Netlify DNS
    Netlify {
        /// Netlify personal access token
        personal_access_token: String,
    },

    /// Custom provider
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl ProviderConfig {
    /// Configuration for the Netlify provider
    pub fn netlify(personal_access_token: impl Into<String>) -> Self {
        ProviderConfig::Netlify {
            personal_access_token: personal_access_token.into(),
        }
    }

    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ProviderConfig::Netlify {
                personal_access_token,
            } => {
                if personal_access_token.trim().is_empty() {
                    return Err(crate::Error::config(
                        "Netlify personal access token cannot be empty",
                    ));
                }
                Ok(())
            }
            ProviderConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::config(
                        "Custom provider factory cannot be empty",
                    ));
                }
                if config.is_null() {
                    return Err(crate::Error::config(
                        "Custom provider config cannot be null",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Get the provider type name
    pub fn type_name(&self) -> &str {
        match self {
            ProviderConfig::Netlify { .. } => "netlify",
            ProviderConfig::Custom { factory, .. } => factory,
        }
    }
}

// Keeps the credential out of logs
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::Netlify { .. } => f
                .debug_struct("Netlify")
                .field("personal_access_token", &"<REDACTED>")
                .finish(),
            ProviderConfig::Custom { factory, .. } => f
                .debug_struct("Custom")
                .field("factory", factory)
                .field("config", &"<REDACTED>")
                .finish(),
        }
    }
}
