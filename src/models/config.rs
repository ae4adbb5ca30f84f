//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    /// Glob passed to Tera, e.g. `templates/**/*`.
    pub templates_dir: String,
    /// Signing key for the session, identity and flash cookies; at least 64 bytes.
    pub secret: String,
    /// JSON document with the records the desk serves.
    pub seed_path: String,
    #[serde(default)]
    pub cookie_secure: bool,
}
