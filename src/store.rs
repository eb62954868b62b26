use std::cell::RefCell;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::aggregate::StateRepository;
use crate::error::{DeskError, StoreError};
use crate::model::{OrderId, SupportTicket, TicketId, TicketIssue, TicketStatus};
use crate::ticket_status::{StatusChanged, TicketStatusCommand, TicketStatusState};
use crate::viewer::TicketEvent;
use crate::Identifier;

/// The external order/ticket store.
///
/// `save_ticket` is the commit callback of the ticket dialog: it receives the complete issue list of
/// one ticket, exactly once per commit.
pub trait TicketStore {
    /// Creates an open ticket for the order with these issues.
    fn save_ticket(
        &self,
        order_id: &OrderId,
        issues: &[TicketIssue],
    ) -> Result<SupportTicket, StoreError>;
    /// Every ticket filed for the order, oldest first.
    fn tickets_for_order(&self, order_id: &OrderId) -> Result<Vec<SupportTicket>, StoreError>;
    /// Looks up one ticket.
    fn ticket(&self, ticket_id: &TicketId) -> Result<SupportTicket, StoreError>;
}

impl<T: TicketStore> TicketStore for &T {
    fn save_ticket(
        &self,
        order_id: &OrderId,
        issues: &[TicketIssue],
    ) -> Result<SupportTicket, StoreError> {
        (**self).save_ticket(order_id, issues)
    }

    fn tickets_for_order(&self, order_id: &OrderId) -> Result<Vec<SupportTicket>, StoreError> {
        (**self).tickets_for_order(order_id)
    }

    fn ticket(&self, ticket_id: &TicketId) -> Result<SupportTicket, StoreError> {
        (**self).ticket(ticket_id)
    }
}

#[derive(Debug, Clone)]
struct StoredTicket {
    ticket: SupportTicket,
    version: u64,
}

/// A single-threaded in-memory ticket store.
///
/// Keeps a journal of [TicketEvent]s next to the tickets so read models can be rebuilt from it.
#[derive(Debug, Default)]
pub struct InMemoryTicketStore {
    tickets: RefCell<Vec<StoredTicket>>,
    journal: RefCell<Vec<TicketEvent>>,
}

impl InMemoryTicketStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        InMemoryTicketStore::default()
    }

    /// Every ticket event recorded so far, oldest first.
    pub fn journal(&self) -> Vec<TicketEvent> {
        self.journal.borrow().clone()
    }

    /// Current version of a ticket, bumped on every status change.
    pub fn version(&self, ticket_id: &TicketId) -> Option<u64> {
        self.tickets
            .borrow()
            .iter()
            .find(|stored| &stored.ticket.id == ticket_id)
            .map(|stored| stored.version)
    }
}

impl TicketStore for InMemoryTicketStore {
    fn save_ticket(
        &self,
        order_id: &OrderId,
        issues: &[TicketIssue],
    ) -> Result<SupportTicket, StoreError> {
        if issues.is_empty() {
            return Err(StoreError::EmptyTicket);
        }
        let ticket = SupportTicket {
            id: TicketId(Uuid::new_v4().to_string()),
            order_id: order_id.to_owned(),
            issues: issues.to_vec(),
            created_at: Utc::now(),
            status: TicketStatus::Open,
        };
        self.tickets.borrow_mut().push(StoredTicket {
            ticket: ticket.clone(),
            version: 0,
        });
        self.journal
            .borrow_mut()
            .push(TicketEvent::Created(ticket.clone()));
        info!(ticket_id = %ticket.id, order_id = %order_id, issues = issues.len(), "ticket stored");
        Ok(ticket)
    }

    fn tickets_for_order(&self, order_id: &OrderId) -> Result<Vec<SupportTicket>, StoreError> {
        Ok(self
            .tickets
            .borrow()
            .iter()
            .filter(|stored| &stored.ticket.order_id == order_id)
            .map(|stored| stored.ticket.clone())
            .collect())
    }

    fn ticket(&self, ticket_id: &TicketId) -> Result<SupportTicket, StoreError> {
        self.tickets
            .borrow()
            .iter()
            .find(|stored| &stored.ticket.id == ticket_id)
            .map(|stored| stored.ticket.clone())
            .ok_or_else(|| StoreError::TicketNotFound(ticket_id.clone()))
    }
}

impl StateRepository<TicketStatusCommand, TicketStatusState, u64, DeskError>
    for InMemoryTicketStore
{
    fn fetch_state(
        &self,
        command: &TicketStatusCommand,
    ) -> Result<Option<(TicketStatusState, u64)>, DeskError> {
        let ticket_id = TicketId::from(command.identifier());
        let tickets = self.tickets.borrow();
        let stored = tickets
            .iter()
            .find(|stored| stored.ticket.id == ticket_id)
            .ok_or(StoreError::TicketNotFound(ticket_id))?;
        Ok(Some((
            TicketStatusState {
                ticket_id: stored.ticket.id.clone(),
                status: stored.ticket.status,
            },
            stored.version,
        )))
    }

    fn save(
        &self,
        state: &TicketStatusState,
        version: &Option<u64>,
    ) -> Result<(TicketStatusState, u64), DeskError> {
        let mut tickets = self.tickets.borrow_mut();
        let stored = tickets
            .iter_mut()
            .find(|stored| stored.ticket.id == state.ticket_id)
            .ok_or_else(|| StoreError::TicketNotFound(state.ticket_id.clone()))?;
        if let Some(expected) = version {
            if *expected != stored.version {
                return Err(StoreError::VersionConflict {
                    ticket_id: state.ticket_id.clone(),
                    expected: *expected,
                    actual: stored.version,
                }
                .into());
            }
        }
        let from = stored.ticket.status;
        stored.ticket.status = state.status;
        stored.version += 1;
        debug!(ticket_id = %state.ticket_id, version = stored.version, "ticket status saved");
        self.journal
            .borrow_mut()
            .push(TicketEvent::StatusChanged(StatusChanged {
                ticket_id: state.ticket_id.clone(),
                from,
                to: state.status,
            }));
        Ok((state.clone(), stored.version))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::model::{IssueDetails, IssueId, ProductId};

    fn issue() -> TicketIssue {
        TicketIssue {
            id: IssueId::from("issue-1"),
            details: IssueDetails::MissingItem {
                related_product_ids: BTreeSet::from([ProductId::from("p-1")]),
            },
        }
    }

    #[test]
    fn refuses_tickets_without_issues() {
        let store = InMemoryTicketStore::new();
        assert_eq!(
            store.save_ticket(&OrderId::from("o-1"), &[]),
            Err(StoreError::EmptyTicket)
        );
        assert!(store.journal().is_empty());
    }

    #[test]
    fn tickets_are_listed_per_order() {
        let store = InMemoryTicketStore::new();
        let first = store.save_ticket(&OrderId::from("o-1"), &[issue()]).unwrap();
        store.save_ticket(&OrderId::from("o-2"), &[issue()]).unwrap();

        let tickets = store.tickets_for_order(&OrderId::from("o-1")).unwrap();
        assert_eq!(tickets, vec![first.clone()]);
        assert_eq!(first.status, TicketStatus::Open);
        assert_eq!(store.ticket(&first.id).unwrap(), first);
        assert_eq!(store.version(&first.id), Some(0));
    }

    #[test]
    fn stale_status_writes_are_rejected() {
        let store = InMemoryTicketStore::new();
        let ticket = store.save_ticket(&OrderId::from("o-1"), &[issue()]).unwrap();
        let state = TicketStatusState {
            ticket_id: ticket.id.clone(),
            status: TicketStatus::InProgress,
        };
        store.save(&state, &Some(0)).unwrap();

        let error = store.save(&state, &Some(0)).unwrap_err();
        assert_eq!(
            error,
            DeskError::Store(StoreError::VersionConflict {
                ticket_id: ticket.id,
                expected: 0,
                actual: 1,
            })
        );
    }
}
