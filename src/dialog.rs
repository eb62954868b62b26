use tracing::{debug, info, warn};

use crate::config::TicketDeskConfig;
use crate::decider::Decider;
use crate::error::{DeskError, ValidationError};
use crate::issue_builder::{
    self, IssueContext, IssueDraftCommand, IssueDraftEvent, IssueDraftState,
};
use crate::model::{Catalog, Order, OrderItem, Product, SupportTicket, TicketIssue};
use crate::saga::{ActionComputation, Saga};
use crate::store::TicketStore;
use crate::taxonomy::IssueField;
use crate::ticket_draft::{self, TicketDraftCommand, TicketDraftEvent, TicketDraftState};

/// The ticket dialog of one order.
///
/// Runs the issue draft builder and the ticket draft side by side: every command goes to the builder,
/// every issue it finalizes is routed by [ticket_draft::issue_submission_saga] into the ticket draft,
/// and [TicketDialog::commit] hands the finished issue list to the [TicketStore].
///
/// A command either succeeds as a whole or leaves both drafts untouched.
pub struct TicketDialog<'a, Store>
where
    Store: TicketStore,
{
    context: IssueContext<'a>,
    store: &'a Store,
    builder: Decider<'a, IssueDraftCommand, IssueDraftState, IssueDraftEvent, ValidationError>,
    draft: Decider<'a, TicketDraftCommand, TicketDraftState, TicketDraftEvent, ValidationError>,
    saga: Saga<'a, IssueDraftEvent, TicketDraftCommand>,
    builder_state: IssueDraftState,
    draft_state: TicketDraftState,
}

impl<'a, Store> TicketDialog<'a, Store>
where
    Store: TicketStore,
{
    /// Opens the dialog with an empty draft for the order.
    pub fn open(
        order: &'a Order,
        catalog: &'a Catalog,
        config: &'a TicketDeskConfig,
        store: &'a Store,
    ) -> Self {
        let context = IssueContext {
            order,
            catalog,
            config,
        };
        let builder = issue_builder::decider(context);
        let draft = ticket_draft::decider();
        let builder_state = (builder.initial_state)();
        let draft_state = (draft.initial_state)();
        let mut dialog = TicketDialog {
            context,
            store,
            builder,
            draft,
            saga: ticket_draft::issue_submission_saga(),
            builder_state,
            draft_state,
        };
        dialog.reopen();
        dialog
    }

    /// Starts over with an empty draft for the same order. Nothing drafted before survives.
    pub fn reopen(&mut self) {
        let opened = TicketDraftEvent::Opened(self.context.order.id.clone());
        self.draft_state = (self.draft.evolve)(&(self.draft.initial_state)(), &opened);
        self.builder_state = (self.builder.initial_state)();
        info!(order_id = %self.context.order.id, "ticket dialog opened");
    }

    /// Handles a command of the issue draft form.
    ///
    /// On success the builder events are returned. On failure the validation error is returned and
    /// every input is kept for correction. A closed dialog accepts no input at all.
    pub fn handle(
        &mut self,
        command: IssueDraftCommand,
    ) -> Result<Vec<IssueDraftEvent>, ValidationError> {
        if !self.is_open() {
            return Err(self.rejected(&command, ValidationError::NoOpenDraft));
        }
        let events = (self.builder.decide)(&command, &self.builder_state)
            .map_err(|error| self.rejected(&command, error))?;

        let mut draft_state = self.draft_state.clone();
        for event in &events {
            for draft_command in self.saga.compute_new_actions(event) {
                let draft_events = (self.draft.decide)(&draft_command, &draft_state)
                    .map_err(|error| self.rejected(&command, error))?;
                draft_state = self.draft.evolve_all(draft_state, &draft_events);
            }
        }

        let builder_state = std::mem::take(&mut self.builder_state);
        self.builder_state = self.builder.evolve_all(builder_state, &events);
        self.draft_state = draft_state;
        debug!(
            order_id = %self.context.order.id,
            ?command,
            pending = self.draft_state.pending.len(),
            "issue draft updated"
        );
        Ok(events)
    }

    /// Commits every pending issue as one ticket.
    ///
    /// The store is called exactly once. After a successful commit the dialog holds no draft;
    /// when the store fails the draft is kept so the user can try again.
    pub fn commit(&mut self) -> Result<SupportTicket, DeskError> {
        let events = (self.draft.decide)(&TicketDraftCommand::Commit, &self.draft_state)
            .map_err(|error| {
                warn!(order_id = %self.context.order.id, %error, "ticket commit rejected");
                error
            })?;

        let mut ticket = None;
        for event in &events {
            if let TicketDraftEvent::Committed { order_id, issues } = event {
                let saved = self.store.save_ticket(order_id, issues).map_err(|error| {
                    warn!(order_id = %order_id, %error, "ticket store failed, draft kept");
                    error
                })?;
                ticket = Some(saved);
            }
        }
        let ticket = ticket.ok_or(ValidationError::EmptyTicket)?;

        let draft_state = std::mem::take(&mut self.draft_state);
        self.draft_state = self.draft.evolve_all(draft_state, &events);
        self.builder_state = (self.builder.initial_state)();
        info!(
            order_id = %ticket.order_id,
            ticket_id = %ticket.id,
            issues = ticket.issues.len(),
            "ticket committed"
        );
        Ok(ticket)
    }

    /// Closes the dialog, dropping every uncommitted input and issue.
    pub fn close(&mut self) {
        let discarded = TicketDraftEvent::Discarded;
        self.draft_state = (self.draft.evolve)(&self.draft_state, &discarded);
        self.builder_state = (self.builder.initial_state)();
        info!(order_id = %self.context.order.id, "ticket dialog closed");
    }

    fn rejected(&self, command: &IssueDraftCommand, error: ValidationError) -> ValidationError {
        warn!(
            order_id = %self.context.order.id,
            issue_type = ?self.builder_state.issue_type,
            ?command,
            %error,
            "issue draft command rejected"
        );
        error
    }

    /// The order this dialog is about.
    pub fn order(&self) -> &'a Order {
        self.context.order
    }

    /// Returns `true` while a draft is open (between open/reopen and commit/close).
    pub fn is_open(&self) -> bool {
        self.draft_state.order_id.is_some()
    }

    /// The issue currently being added.
    pub fn issue_draft(&self) -> &IssueDraftState {
        &self.builder_state
    }

    /// Finalized issues waiting for commit.
    pub fn pending_issues(&self) -> &[TicketIssue] {
        &self.draft_state.pending
    }

    /// Returns `true` if the form shows this input for the selected issue type.
    pub fn is_field_enabled(&self, field: IssueField) -> bool {
        self.builder_state.is_field_enabled(field)
    }

    /// Ordered items selectable as related products.
    pub fn related_product_options(&self) -> &'a [OrderItem] {
        issue_builder::related_product_options(self.context.order)
    }

    /// Ordered items selectable for a quantity shortage.
    pub fn single_product_options(&self) -> Vec<&'a OrderItem> {
        issue_builder::single_product_options(self.context.order)
    }

    /// Catalog products matching the received-instead search query.
    pub fn received_instead_options(&self) -> Vec<&'a Product> {
        self.builder_state
            .received_instead_options(self.context.catalog)
    }
}
