//! Credit balance value object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-negative count of redesigns a user may still run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credits(u32);

impl Credits {
    pub const ZERO: Credits = Credits(0);

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// True when a run may be started.
    pub fn can_spend(&self) -> bool {
        self.0 > 0
    }

    /// Balance after spending one credit, or `None` at zero.
    pub fn debited(&self) -> Option<Credits> {
        self.0.checked_sub(1).map(Credits)
    }
}

impl fmt::Display for Credits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
