// ── Runtime connection configuration ──
//
// These types describe *how* to reach a registry's browse API. They never
// touch disk: the CLI (via terrarium-config) constructs a `BrowserConfig`
// and hands it in.

use std::time::Duration;

use url::Url;

use crate::model::TimeWindow;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed certs).
    DangerAcceptInvalid,
}

/// Configuration for browsing a single registry.
///
/// Built by the CLI, passed to [`Catalog`](crate::Catalog).
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Browse service mount point (e.g., `https://registry.example.com/browse`).
    pub url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
    /// Window the releases view starts with.
    pub default_window: TimeWindow,
}

impl BrowserConfig {
    /// Config with default TLS, timeout and window for the given URL.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            default_window: TimeWindow::default(),
        }
    }
}
