//! Registration records for routed providers

use serde::{Deserialize, Serialize};

/// A provider as seen by the router
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRegistration {
    /// Provider id
    pub id: String,
    /// Position in the priority list (lower is tried first)
    pub priority_rank: usize,
    /// Model used when the caller gives no hint
    pub default_model: String,
}
