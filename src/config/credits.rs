//! Credit policy configuration

use serde::Deserialize;

/// Credit policy
#[derive(Debug, Clone, Deserialize)]
pub struct CreditsConfig {
    /// Balance granted to a newly created account
    #[serde(default = "default_initial_balance")]
    pub initial_balance: u32,
}

impl Default for CreditsConfig {
    fn default() -> Self {
        Self {
            initial_balance: default_initial_balance(),
        }
    }
}

fn default_initial_balance() -> u32 {
    3
}
