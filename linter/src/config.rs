//! Configuration for the linter bridge.

use serde::Deserialize;

/// Configuration for the linter bridge.
///
/// `enabled` is consulted by the embedding host before registering;
/// [`Linter::register`](crate::Linter::register) itself does not check it.
#[derive(Debug, Clone, Deserialize)]
pub struct LinterConfig {
    /// Whether the bridge should be registered at all. Default: true.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Provider display name shown by the host linter panel.
    #[serde(default = "default_name")]
    pub name: String,
}

impl Default for LinterConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            name: default_name(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_name() -> String {
    "Build".to_string()
}
