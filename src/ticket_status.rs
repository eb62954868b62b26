//! Staff-side status lifecycle of a committed ticket.
//!
//! ```text
//! Open -> InProgress -> Resolved -> Closed
//!   \_______________/^     |
//!                          v
//!                        Open (reopen)
//! ```

use crate::decider::Decider;
use crate::error::ValidationError;
use crate::model::{TicketId, TicketStatus};
use crate::Identifier;

/// The status of one ticket, as the status decider sees it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketStatusState {
    /// Ticket id
    pub ticket_id: TicketId,
    /// Current status
    pub status: TicketStatus,
}

/// Staff intents on a ticket's status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketStatusCommand {
    /// Pick the ticket up
    StartProgress(TicketId),
    /// Mark the ticket resolved
    Resolve(TicketId),
    /// Close a resolved ticket
    Close(TicketId),
    /// Reopen a resolved ticket
    Reopen(TicketId),
}

impl TicketStatusCommand {
    /// The ticket the command targets.
    pub fn ticket_id(&self) -> &TicketId {
        match self {
            TicketStatusCommand::StartProgress(id)
            | TicketStatusCommand::Resolve(id)
            | TicketStatusCommand::Close(id)
            | TicketStatusCommand::Reopen(id) => id,
        }
    }

    /// The status the command asks for.
    pub fn target(&self) -> TicketStatus {
        match self {
            TicketStatusCommand::StartProgress(_) => TicketStatus::InProgress,
            TicketStatusCommand::Resolve(_) => TicketStatus::Resolved,
            TicketStatusCommand::Close(_) => TicketStatus::Closed,
            TicketStatusCommand::Reopen(_) => TicketStatus::Open,
        }
    }
}

impl Identifier for TicketStatusCommand {
    fn identifier(&self) -> String {
        self.ticket_id().to_string()
    }
}

/// A ticket changed status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChanged {
    /// Ticket id
    pub ticket_id: TicketId,
    /// Previous status
    pub from: TicketStatus,
    /// New status
    pub to: TicketStatus,
}

/// Facts of the status lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketStatusEvent {
    /// Status changed
    Changed(StatusChanged),
}

/// Returns `true` if a ticket may move from `from` to `to`.
pub fn is_allowed(from: TicketStatus, to: TicketStatus) -> bool {
    use TicketStatus::*;
    matches!(
        (from, to),
        (Open, InProgress)
            | (Open, Resolved)
            | (InProgress, Resolved)
            | (Resolved, Closed)
            | (Resolved, Open)
    )
}

/// The ticket status decider.
pub fn decider<'a>(
) -> Decider<'a, TicketStatusCommand, TicketStatusState, TicketStatusEvent, ValidationError> {
    Decider {
        decide: Box::new(|command, state| {
            let to = command.target();
            if !is_allowed(state.status, to) {
                return Err(ValidationError::InvalidStatusTransition {
                    from: state.status,
                    to,
                });
            }
            Ok(vec![TicketStatusEvent::Changed(StatusChanged {
                ticket_id: command.ticket_id().to_owned(),
                from: state.status,
                to,
            })])
        }),
        evolve: Box::new(|state, event| {
            let mut new_state = state.clone();
            match event {
                TicketStatusEvent::Changed(changed) => {
                    new_state.ticket_id = changed.ticket_id.to_owned();
                    new_state.status = changed.to;
                }
            }
            new_state
        }),
        initial_state: Box::new(TicketStatusState::default),
    }
}
