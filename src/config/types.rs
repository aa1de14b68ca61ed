//! Configuration types for refund policies.
//!
//! This module contains the strongly-typed structures deserialized from the
//! policy YAML files.

use serde::Deserialize;

use crate::error::EngineResult;
use crate::models::{PenaltyRule, RefundPolicy};

/// One policy file from the `policies/` directory.
///
/// ```yaml
/// id: standard
/// name: Standard economy fare
/// rules:
///   - hours_before_departure: 0
///     penalty_percentage: 100
///   - hours_before_departure: 24
///     penalty_percentage: 50
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyFile {
    /// The policy identifier used by cancellation requests.
    pub id: String,
    /// A human-readable name for the admin UI.
    pub name: String,
    /// The penalty rules, in any order.
    pub rules: Vec<PenaltyRule>,
}

impl PolicyFile {
    /// Validates the file into a [`RefundPolicy`].
    pub fn into_policy(self) -> EngineResult<RefundPolicy> {
        RefundPolicy::new(self.id, self.name, self.rules)
    }
}
