//! Pending-action handles.
//!
//! A handle is bound to the match it was issued for. There is no shared
//! queue: the caller keeps the handle next to the match state and passes it
//! to the next tick of that match.

use crate::error::MatchError;
use crate::state::{MatchId, MatchState};

use super::ActionType;

/// A validated action waiting to be resolved by the next tick of one match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingAction {
    match_id: MatchId,
    action: ActionType,
}

impl PendingAction {
    /// Issues a handle for an already-typed action.
    ///
    /// Fails with [`MatchError::MatchNotActive`] once the match is over.
    pub fn for_match(state: &MatchState, action: ActionType) -> Result<Self, MatchError> {
        if state.is_over() {
            return Err(MatchError::MatchNotActive { match_id: state.id });
        }
        Ok(Self {
            match_id: state.id,
            action,
        })
    }

    pub fn match_id(&self) -> MatchId {
        self.match_id
    }

    pub fn action(&self) -> ActionType {
        self.action
    }
}

/// Validates a symbolic action name for the given match.
///
/// The name is checked against the closed roster first, so an unknown name
/// reports [`MatchError::UnknownAction`] even on a finished match. The state
/// is only read.
pub fn submit_action(state: &MatchState, name: &str) -> Result<PendingAction, MatchError> {
    let action = name
        .trim()
        .parse::<ActionType>()
        .map_err(|_| MatchError::UnknownAction {
            name: name.to_string(),
        })?;
    PendingAction::for_match(state, action)
}
