#![deny(missing_docs)]
//! # Ticket Desk
//!
//! Customers of an order storefront sometimes need to tell the shop that something went wrong with an
//! order: it is late, an item is missing, the wrong item arrived, an item is damaged, or fewer units
//! were delivered than ordered. This crate models that support-ticket capture workflow as a small
//! set of pure, composable domain components.
//!
//! ## Decider
//!
//! [decider::Decider] is the decision-making algorithm. It has three generic parameters `C`, `S`, `E`
//! (plus an `Error`), and is made of three functions:
//!
//! - `decide` - `(&C, &S) -> Result<Vec<E>, Error>` - validates an intent against the current state
//! - `evolve` - `(&S, &E) -> S` - folds a fact into the state
//! - `initial_state` - `() -> S`
//!
//! Two deciders drive the workflow:
//!
//! - [issue_builder::decider] collects the fields one [model::IssueType] needs and emits a finalized
//!   [model::TicketIssue] once they validate.
//! - [ticket_draft::decider] accumulates finalized issues for one order and commits them atomically.
//!
//! ## Saga
//!
//! [saga::Saga] maps action results to new actions. [ticket_draft::issue_submission_saga] turns every
//! submitted issue into a command for the ticket draft.
//!
//! ## View
//!
//! [view::View] folds events into a read model. [viewer::order_tickets_view] keeps the ticket list of
//! an order current as tickets are created and change status.
//!
//! ## Application layer
//!
//! - [dialog::TicketDialog] is the ticket dialog opened for one order: it runs both deciders, routes
//!   submitted issues through the saga, and hands the finished issue list to a [store::TicketStore].
//! - [aggregate::StateStoredAggregate] fetches state from a [aggregate::StateRepository], computes the
//!   new state with a decider and saves it. Staff-side ticket status changes run through it.
//!
//! ```text
//! Taxonomy -> Issue Draft Builder --(saga)--> Ticket Draft --commit--> TicketStore -> Viewers
//! ```
//!
//! ## Example
//!
//! ```rust
//! use ticket_desk::config::TicketDeskConfig;
//! use ticket_desk::dialog::TicketDialog;
//! use ticket_desk::issue_builder::IssueDraftCommand;
//! use ticket_desk::model::{Catalog, IssueType, Order, OrderItem, Product};
//! use ticket_desk::store::{InMemoryTicketStore, TicketStore};
//!
//! let mug = Product::new("p-1", "Coffee Mug");
//! let order = Order::new("o-1", vec![OrderItem::new(mug.clone(), 2)]);
//! let catalog = Catalog::new(vec![mug]);
//! let config = TicketDeskConfig::default();
//! let store = InMemoryTicketStore::new();
//!
//! let mut dialog = TicketDialog::open(&order, &catalog, &config, &store);
//! dialog
//!     .handle(IssueDraftCommand::SelectIssueType(Some(IssueType::OrderDelay)))
//!     .unwrap();
//! dialog
//!     .handle(IssueDraftCommand::SetDescription("Box was crushed".to_string()))
//!     .unwrap();
//! dialog.handle(IssueDraftCommand::Submit).unwrap();
//!
//! let ticket = dialog.commit().unwrap();
//! assert_eq!(ticket.issues.len(), 1);
//! assert_eq!(store.tickets_for_order(&order.id).unwrap().len(), 1);
//! ```

/// Aggregate module - belongs to the `Application` layer - composes pure logic and effects (fetching, storing)
pub mod aggregate;
/// Runtime configuration of the ticket desk
pub mod config;
/// Decider module - belongs to the `Domain` layer - pure decision making component - pure logic
pub mod decider;
/// Ticket dialog - belongs to the `Application` layer - one order's ticket capture session
pub mod dialog;
/// Error types
pub mod error;
/// Issue draft builder - belongs to the `Domain` layer - per issue type field capture and validation
pub mod issue_builder;
/// Domain model - orders, catalog, issues and tickets
pub mod model;
/// Saga module - belongs to the `Domain` layer - pure mapper of action results/events into new actions/commands
pub mod saga;
/// A test specification DSL for deciders and views
pub mod specification;
/// Ticket store - the external order/ticket store contract and an in-memory implementation
pub mod store;
/// Issue taxonomy - which fields each issue type requires
pub mod taxonomy;
/// Ticket draft - belongs to the `Domain` layer - accumulates issues and commits them atomically
pub mod ticket_draft;
/// Ticket status lifecycle - belongs to the `Domain` layer - staff-side status changes
pub mod ticket_status;
/// View module - belongs to the `Domain` layer - pure event handling algorithm
pub mod view;
/// Read-only rendering of committed tickets and issues
pub mod viewer;

/// The [DecideFunction] function is used to decide which events to produce based on the command and the current state.
pub type DecideFunction<'a, C, S, E, Error> = Box<dyn Fn(&C, &S) -> Result<Vec<E>, Error> + 'a>;
/// The [EvolveFunction] function is used to evolve the state based on the current state and the event.
pub type EvolveFunction<'a, S, E> = Box<dyn Fn(&S, &E) -> S + 'a>;
/// The [InitialStateFunction] function is used to produce the initial state.
pub type InitialStateFunction<'a, S> = Box<dyn Fn() -> S + 'a>;
/// The [ReactFunction] function is used to decide what actions/A to execute next based on the action result/AR.
pub type ReactFunction<'a, AR, A> = Box<dyn Fn(&AR) -> Vec<A> + 'a>;

/// Identify the state/command/event.
/// It is used to identify the concept to what the state/command/event belongs to. For example, the `ticket_id`.
pub trait Identifier {
    /// Returns the identifier of the state/command/event
    fn identifier(&self) -> String;
}
