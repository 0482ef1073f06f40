//! Actions fighters can take, and the handles that carry them into a tick.
//!
//! - `kind`: the closed [`ActionType`] roster and its [`ActionClass`]es
//! - `pending`: [`PendingAction`] handles scoped to a single match

mod kind;
mod pending;

pub use kind::{ActionClass, ActionType};
pub use pending::{PendingAction, submit_action};
