//! The ticket draft: finalized issues of one order, waiting to be committed together.

use crate::decider::Decider;
use crate::error::ValidationError;
use crate::issue_builder::IssueDraftEvent;
use crate::model::{OrderId, TicketIssue};
use crate::saga::Saga;

/// State of the ticket draft
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketDraftState {
    /// The order the open draft belongs to, `None` when no draft is open
    pub order_id: Option<OrderId>,
    /// Finalized issues, in submission order
    pub pending: Vec<TicketIssue>,
}

impl TicketDraftState {
    /// Returns `true` if at least one issue is waiting to be committed.
    pub fn has_issues(&self) -> bool {
        !self.pending.is_empty()
    }
}

/// Intents of the ticket draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketDraftCommand {
    /// Start an empty draft for the order, dropping whatever was drafted before
    Open(OrderId),
    /// Append a finalized issue
    AddIssue(TicketIssue),
    /// Hand every pending issue over in one go
    Commit,
    /// Drop the draft without committing
    Discard,
}

/// Facts of the ticket draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketDraftEvent {
    /// An empty draft was opened for the order
    Opened(OrderId),
    /// An issue was appended
    IssueAdded(TicketIssue),
    /// The pending issues were committed for the order
    Committed {
        /// Order the ticket is about
        order_id: OrderId,
        /// Every pending issue, in submission order
        issues: Vec<TicketIssue>,
    },
    /// The draft was dropped
    Discarded,
}

/// The ticket draft decider.
pub fn decider<'a>(
) -> Decider<'a, TicketDraftCommand, TicketDraftState, TicketDraftEvent, ValidationError> {
    Decider {
        decide: Box::new(|command, state| match command {
            TicketDraftCommand::Open(order_id) => {
                Ok(vec![TicketDraftEvent::Opened(order_id.to_owned())])
            }
            TicketDraftCommand::AddIssue(issue) => {
                if state.order_id.is_none() {
                    return Err(ValidationError::NoOpenDraft);
                }
                Ok(vec![TicketDraftEvent::IssueAdded(issue.to_owned())])
            }
            TicketDraftCommand::Commit => {
                let order_id = state
                    .order_id
                    .as_ref()
                    .ok_or(ValidationError::NoOpenDraft)?;
                if state.pending.is_empty() {
                    return Err(ValidationError::EmptyTicket);
                }
                Ok(vec![TicketDraftEvent::Committed {
                    order_id: order_id.to_owned(),
                    issues: state.pending.to_owned(),
                }])
            }
            TicketDraftCommand::Discard => Ok(vec![TicketDraftEvent::Discarded]),
        }),
        evolve: Box::new(|state, event| {
            let mut new_state = state.clone();
            match event {
                TicketDraftEvent::Opened(order_id) => {
                    new_state = TicketDraftState {
                        order_id: Some(order_id.to_owned()),
                        pending: Vec::new(),
                    };
                }
                TicketDraftEvent::IssueAdded(issue) => {
                    new_state.pending.push(issue.to_owned());
                }
                TicketDraftEvent::Committed { .. } | TicketDraftEvent::Discarded => {
                    new_state = TicketDraftState::default();
                }
            }
            new_state
        }),
        initial_state: Box::new(TicketDraftState::default),
    }
}

/// Routes every issue finalized by the draft builder into the ticket draft.
pub fn issue_submission_saga<'a>() -> Saga<'a, IssueDraftEvent, TicketDraftCommand> {
    Saga {
        react: Box::new(|event| match event {
            IssueDraftEvent::IssueSubmitted(issue) => {
                vec![TicketDraftCommand::AddIssue(issue.to_owned())]
            }
            _ => vec![],
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::model::{IssueDetails, IssueId, ProductId};
    use crate::saga::ActionComputation;
    use crate::specification::DeciderTestSpecification;

    fn missing(id: &str, product: &str) -> TicketIssue {
        TicketIssue {
            id: IssueId::from(id),
            details: IssueDetails::MissingItem {
                related_product_ids: BTreeSet::from([ProductId::from(product)]),
            },
        }
    }

    #[test]
    fn same_type_issues_are_not_deduplicated() {
        DeciderTestSpecification::default()
            .for_decider(decider())
            .given_state(Some(TicketDraftState {
                order_id: Some(OrderId::from("o-1")),
                pending: vec![missing("issue-1", "p-1")],
            }))
            .when(TicketDraftCommand::AddIssue(missing("issue-2", "p-1")))
            .then_state(TicketDraftState {
                order_id: Some(OrderId::from("o-1")),
                pending: vec![missing("issue-1", "p-1"), missing("issue-2", "p-1")],
            });
    }

    #[test]
    fn issues_need_an_open_draft() {
        DeciderTestSpecification::default()
            .for_decider(decider())
            .given(vec![])
            .when(TicketDraftCommand::AddIssue(missing("issue-1", "p-1")))
            .then_error(ValidationError::NoOpenDraft);
    }

    #[test]
    fn saga_only_reacts_to_submitted_issues() {
        let saga = issue_submission_saga();
        assert_eq!(
            saga.compute_new_actions(&IssueDraftEvent::IssueSubmitted(missing("issue-1", "p-1"))),
            vec![TicketDraftCommand::AddIssue(missing("issue-1", "p-1"))]
        );
        assert!(saga
            .compute_new_actions(&IssueDraftEvent::DraftCancelled)
            .is_empty());
    }
}
