//! Runtime codec configuration.
//!
//! The gateway reports one global capability toggle during setup: whether it
//! speaks the extended ("new version") protocol. The toggle changes which
//! optional fields status queries request and control commands may carry, so
//! it is threaded into command construction instead of read from ambient
//! state.

use serde::{Deserialize, Serialize};

/// Codec-level configuration read from the external runtime configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Whether the gateway speaks the extended protocol version. Gates the
    /// fan-direction, breathe, humidity and per-device humidity fields.
    pub new_protocol_version: bool,
}

impl CodecConfig {
    /// Configuration for a gateway on the extended protocol version.
    pub fn new_version() -> Self {
        CodecConfig {
            new_protocol_version: true,
        }
    }
}
