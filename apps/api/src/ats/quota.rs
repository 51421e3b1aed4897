use serde::{Deserialize, Serialize};

use crate::llm_client::LlmError;

/// Whether a component may still call the remote model.
///
/// Moves Available → Exhausted on a classified rate-limit error and never
/// moves back for the lifetime of the owning instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaState {
    #[default]
    Available,
    Exhausted,
}

impl QuotaState {
    pub fn is_exhausted(self) -> bool {
        self == QuotaState::Exhausted
    }

    pub fn mark_exhausted(&mut self) {
        *self = QuotaState::Exhausted;
    }

    /// Adopts an exhaustion observed by another component.
    pub fn absorb(&mut self, other: QuotaState) {
        if other.is_exhausted() {
            self.mark_exhausted();
        }
    }

    /// Records a failed remote call. Returns true when the error exhausted the quota.
    pub fn observe(&mut self, error: &LlmError) -> bool {
        if error.is_quota_exhausted() {
            self.mark_exhausted();
            true
        } else {
            false
        }
    }
}
