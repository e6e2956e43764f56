use serde::Deserialize;

/// Configuration options for the Explora service.
///
/// Deserialized from `config.yaml` plus environment overrides in `main`.
#[derive(Clone, Deserialize)]
pub struct ServerConfig {
    /// Path to the SQLite database file.
    pub database_url: String,
    /// Interface the HTTP server binds to.
    pub bind_address: String,
    /// Port the HTTP server listens on.
    pub port: u16,
    /// Shared secret expected in the `X-API-Key` header on mutating routes.
    pub api_key: String,
    /// Days after which a review no longer counts as fresh.
    pub review_expiration_days: i64,
}
