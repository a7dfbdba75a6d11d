use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::interval::Interval;

/// Progress payload POSTed to the host-provided report endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Covered percentage, 0..=100
    pub progress: u8,
    /// The full canonical cover at dispatch time
    pub watched_ranges: Vec<Interval>,
}

/// Identifies one player instance across log lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
