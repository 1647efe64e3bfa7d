//! User profile model matching the frontend UserProfile interface.

use serde::{Deserialize, Serialize};

/// A user's public profile, keyed by principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub display_name: String,
    pub name: String,
}
