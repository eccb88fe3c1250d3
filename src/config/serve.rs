//! Development server settings.

use super::defaults;
use educe::Educe;

/// Options for [`crate::serve::Server`], filled from the command line.
#[derive(Debug, Clone, Educe)]
#[educe(Default)]
pub struct ServeConfig {
    /// Network interface to bind.
    /// - `127.0.0.1` (default): localhost only
    /// - `0.0.0.0`: all interfaces (LAN accessible)
    #[educe(Default = defaults::serve::interface())]
    pub interface: String,

    /// HTTP port number (default: 8080).
    #[educe(Default = defaults::serve::port())]
    pub port: u16,

    /// Page extensions tried when mapping a request path to a source file.
    /// The first existing `pages<path>.<ext>` wins.
    #[educe(Default = defaults::serve::extensions())]
    pub extensions: Vec<String>,
}

impl ServeConfig {
    /// `interface:port` string accepted by the listener.
    pub fn address(&self) -> String {
        format!("{}:{}", self.interface, self.port)
    }
}
