//! Status transition graphs.
//!
//! Each lifecycle status enum exposes a static table of permitted targets.
//! Moving to the current status is always allowed and is a no-op for the
//! aggregate; a status with no permitted targets is terminal.

use super::{EntityKind, RuleViolation};

/// A status enum governed by a fixed transition graph.
pub trait LifecycleStatus: Copy + Eq + 'static {
    /// Aggregate kind reported in transition errors.
    const ENTITY: EntityKind;

    /// Returns the statuses reachable from `self` in one step, excluding
    /// `self`.
    fn allowed_targets(self) -> &'static [Self];

    /// Returns the storage name used in error messages.
    fn label(self) -> &'static str;

    /// Returns `true` when moving from `self` to `target` is permitted.
    fn can_transition_to(self, target: Self) -> bool {
        self == target || self.allowed_targets().contains(&target)
    }

    /// Returns `true` when no other status is reachable.
    fn is_terminal(self) -> bool {
        self.allowed_targets().is_empty()
    }
}

/// Checks a proposed status change against the entity's transition graph.
///
/// # Errors
///
/// Returns [`RuleViolation::InvalidTransition`] naming both statuses when the
/// move is not permitted.
pub fn ensure_transition<S: LifecycleStatus>(from: S, to: S) -> Result<(), RuleViolation> {
    if from.can_transition_to(to) {
        return Ok(());
    }
    Err(RuleViolation::InvalidTransition {
        entity: S::ENTITY,
        from: from.label(),
        to: to.label(),
    })
}
