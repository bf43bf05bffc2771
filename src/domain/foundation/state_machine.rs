//! Validated transitions for small state enums.

use std::fmt;

/// A state enum whose allowed moves are listed in one place.
///
/// ```ignore
/// let next = SyncState::Idle.transition_to(SyncState::Pending)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + fmt::Debug + 'static {
    /// States reachable from `self` in one step.
    fn successors(&self) -> &'static [Self];

    fn can_transition_to(&self, target: &Self) -> bool {
        self.successors().contains(target)
    }

    /// Returns `target` if the move is allowed.
    fn transition_to(&self, target: Self) -> Result<Self, InvalidTransition> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(InvalidTransition {
                from: format!("{:?}", self),
                to: format!("{:?}", target),
            })
        }
    }
}

/// A move the state machine does not allow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot move from {from} to {to}")]
pub struct InvalidTransition {
    pub from: String,
    pub to: String,
}
