use std::collections::BTreeSet;

use ticket_desk::error::ValidationError;
use ticket_desk::issue_builder::IssueDraftEvent;
use ticket_desk::model::{IssueDetails, IssueId, OrderId, TicketIssue};
use ticket_desk::saga::ActionComputation;
use ticket_desk::specification::DeciderTestSpecification;
use ticket_desk::ticket_draft::{
    self, TicketDraftCommand, TicketDraftEvent, TicketDraftState,
};

use crate::fixtures::id;

mod fixtures;

fn delay(issue_id: &str) -> TicketIssue {
    TicketIssue {
        id: IssueId::from(issue_id),
        details: IssueDetails::OrderDelay {
            issue_description: "Still waiting".to_string(),
        },
    }
}

fn missing(issue_id: &str, product: &str) -> TicketIssue {
    TicketIssue {
        id: IssueId::from(issue_id),
        details: IssueDetails::MissingItem {
            related_product_ids: BTreeSet::from([id(product)]),
        },
    }
}

#[test]
fn opening_starts_an_empty_draft() {
    DeciderTestSpecification::default()
        .for_decider(ticket_draft::decider())
        .given(vec![])
        .when(TicketDraftCommand::Open(OrderId::from("o-100")))
        .then(vec![TicketDraftEvent::Opened(OrderId::from("o-100"))]);
}

#[test]
fn opening_again_drops_earlier_issues() {
    DeciderTestSpecification::default()
        .for_decider(ticket_draft::decider())
        .given_state(Some(TicketDraftState {
            order_id: Some(OrderId::from("o-100")),
            pending: vec![delay("issue-1")],
        }))
        .when(TicketDraftCommand::Open(OrderId::from("o-200")))
        .then_state(TicketDraftState {
            order_id: Some(OrderId::from("o-200")),
            pending: vec![],
        });
}

#[test]
fn an_empty_draft_cannot_be_committed() {
    DeciderTestSpecification::default()
        .for_decider(ticket_draft::decider())
        .given(vec![TicketDraftEvent::Opened(OrderId::from("o-100"))])
        .when(TicketDraftCommand::Commit)
        .then_error(ValidationError::EmptyTicket);
}

#[test]
fn nothing_to_commit_without_a_draft() {
    DeciderTestSpecification::default()
        .for_decider(ticket_draft::decider())
        .given(vec![])
        .when(TicketDraftCommand::Commit)
        .then_error(ValidationError::NoOpenDraft);
}

#[test]
fn commit_hands_over_every_issue_in_submission_order() {
    DeciderTestSpecification::default()
        .for_decider(ticket_draft::decider())
        .given(vec![
            TicketDraftEvent::Opened(OrderId::from("o-100")),
            TicketDraftEvent::IssueAdded(missing("issue-1", "p-mug")),
            TicketDraftEvent::IssueAdded(delay("issue-2")),
            TicketDraftEvent::IssueAdded(missing("issue-3", "p-mug")),
        ])
        .when(TicketDraftCommand::Commit)
        .then(vec![TicketDraftEvent::Committed {
            order_id: OrderId::from("o-100"),
            issues: vec![
                missing("issue-1", "p-mug"),
                delay("issue-2"),
                missing("issue-3", "p-mug"),
            ],
        }]);
}

#[test]
fn nothing_is_pending_after_a_commit() {
    DeciderTestSpecification::default()
        .for_decider(ticket_draft::decider())
        .given_state(Some(TicketDraftState {
            order_id: Some(OrderId::from("o-100")),
            pending: vec![delay("issue-1")],
        }))
        .when(TicketDraftCommand::Commit)
        .then_state(TicketDraftState::default());
}

#[test]
fn discarding_drops_the_draft() {
    DeciderTestSpecification::default()
        .for_decider(ticket_draft::decider())
        .given_state(Some(TicketDraftState {
            order_id: Some(OrderId::from("o-100")),
            pending: vec![delay("issue-1"), missing("issue-2", "p-pot")],
        }))
        .when(TicketDraftCommand::Discard)
        .then_state(TicketDraftState::default());
}

#[test]
fn only_submitted_issues_reach_the_draft() {
    let saga = ticket_draft::issue_submission_saga();

    assert_eq!(
        saga.compute_new_actions(&IssueDraftEvent::IssueSubmitted(delay("issue-1"))),
        vec![TicketDraftCommand::AddIssue(delay("issue-1"))]
    );
    assert!(saga
        .compute_new_actions(&IssueDraftEvent::DescriptionChanged("late".to_string()))
        .is_empty());
    assert!(saga
        .compute_new_actions(&IssueDraftEvent::DraftCancelled)
        .is_empty());
}
