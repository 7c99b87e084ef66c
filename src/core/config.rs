//! Engine configuration.

use serde::{Deserialize, Serialize};

use super::rng::TeleportRng;

/// Engine configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// PCG stream selector for teleport draws.
    /// The default reproduces the reference destinations; changing it
    /// gives a different (still deterministic) teleport network.
    pub teleport_stream: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            teleport_stream: TeleportRng::DEFAULT_STREAM,
        }
    }
}

impl EngineConfig {
    /// Use a custom teleport stream.
    pub fn with_teleport_stream(mut self, stream: u64) -> Self {
        self.teleport_stream = stream;
        self
    }
}
