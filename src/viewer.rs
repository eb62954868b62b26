//! Read-only rendering of committed tickets and issues.
//!
//! Product ids are resolved against the list they were selected from: related and single related ids
//! against the disputed order's items, received-instead ids against the catalog. An id that resolves
//! to nothing is shown with the configured unknown-product label.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::TicketDeskConfig;
use crate::model::{
    Catalog, IssueDetails, IssueId, IssueType, Order, OrderId, ProductId, SupportTicket, TicketId,
    TicketIssue, TicketStatus,
};
use crate::ticket_status::{StatusChanged, TicketStatusEvent};
use crate::view::View;

/// One issue, ready to display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueView {
    /// Issue id
    pub id: IssueId,
    /// Issue type
    pub issue_type: IssueType,
    /// Description, order delays only
    pub description: Option<String>,
    /// Names of the related ordered items
    pub related_products: Vec<String>,
    /// Name of the ordered item with the quantity shortage
    pub single_related_product: Option<String>,
    /// Ordered units, quantity shortages only
    pub quantity_in_order: Option<u32>,
    /// Received units, quantity shortages only
    pub quantity_received: Option<u32>,
    /// Names of the catalog products received instead
    pub received_instead: Vec<String>,
    /// Attached photo names
    pub photo_names: Vec<String>,
}

/// A ticket, ready to display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketView {
    /// Ticket id
    pub id: TicketId,
    /// Order id
    pub order_id: OrderId,
    /// Current status
    pub status: TicketStatus,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Rendered issues, in ticket order
    pub issues: Vec<IssueView>,
}

struct Names<'a> {
    order: &'a Order,
    catalog: &'a Catalog,
    unknown: &'a str,
}

impl Names<'_> {
    fn ordered(&self, product_id: &ProductId) -> String {
        self.order
            .item(product_id)
            .map(|item| item.product.name.clone())
            .unwrap_or_else(|| self.unknown.to_string())
    }

    fn catalog(&self, product_id: &ProductId) -> String {
        self.catalog
            .find(product_id)
            .map(|product| product.name.clone())
            .unwrap_or_else(|| self.unknown.to_string())
    }
}

/// Renders one issue of the order.
pub fn render_issue(
    issue: &TicketIssue,
    order: &Order,
    catalog: &Catalog,
    config: &TicketDeskConfig,
) -> IssueView {
    let names = Names {
        order,
        catalog,
        unknown: &config.unknown_product_label,
    };
    let mut view = IssueView {
        id: issue.id.clone(),
        issue_type: issue.issue_type(),
        description: None,
        related_products: Vec::new(),
        single_related_product: None,
        quantity_in_order: None,
        quantity_received: None,
        received_instead: Vec::new(),
        photo_names: Vec::new(),
    };
    match &issue.details {
        IssueDetails::OrderDelay { issue_description } => {
            view.description = Some(issue_description.clone());
        }
        IssueDetails::MissingItem {
            related_product_ids,
        } => {
            view.related_products = related_product_ids
                .iter()
                .map(|id| names.ordered(id))
                .collect();
        }
        IssueDetails::IncorrectItem {
            related_product_ids,
            received_instead_product_ids,
        } => {
            view.related_products = related_product_ids
                .iter()
                .map(|id| names.ordered(id))
                .collect();
            view.received_instead = received_instead_product_ids
                .iter()
                .map(|id| names.catalog(id))
                .collect();
        }
        IssueDetails::DamagedItem {
            related_product_ids,
            damaged_item_photo_names,
        } => {
            view.related_products = related_product_ids
                .iter()
                .map(|id| names.ordered(id))
                .collect();
            view.photo_names = damaged_item_photo_names.clone();
        }
        IssueDetails::IncorrectQuantity {
            single_related_product_id,
            quantity_in_order,
            quantity_received,
        } => {
            view.single_related_product = Some(names.ordered(single_related_product_id));
            view.quantity_in_order = Some(*quantity_in_order);
            view.quantity_received = Some(*quantity_received);
        }
    }
    view
}

/// Renders a committed ticket of the order.
pub fn render_ticket(
    ticket: &SupportTicket,
    order: &Order,
    catalog: &Catalog,
    config: &TicketDeskConfig,
) -> TicketView {
    TicketView {
        id: ticket.id.clone(),
        order_id: ticket.order_id.clone(),
        status: ticket.status,
        created_at: ticket.created_at,
        issues: ticket
            .issues
            .iter()
            .map(|issue| render_issue(issue, order, catalog, config))
            .collect(),
    }
}

impl fmt::Display for IssueView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.issue_type, self.id)?;
        if let Some(description) = &self.description {
            writeln!(f, "  Description: {description}")?;
        }
        if !self.related_products.is_empty() {
            writeln!(f, "  Items: {}", self.related_products.join(", "))?;
        }
        if !self.received_instead.is_empty() {
            writeln!(f, "  Received instead: {}", self.received_instead.join(", "))?;
        }
        if let Some(product) = &self.single_related_product {
            writeln!(f, "  Item: {product}")?;
        }
        if let Some(ordered) = self.quantity_in_order {
            writeln!(f, "  Ordered quantity: {ordered}")?;
        }
        if let Some(received) = self.quantity_received {
            writeln!(f, "  Received quantity: {received}")?;
        }
        if !self.photo_names.is_empty() {
            writeln!(f, "  Photos: {}", self.photo_names.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Display for TicketView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Ticket {} for order {} [{}] created {}",
            self.id,
            self.order_id,
            self.status,
            self.created_at.format("%Y-%m-%d %H:%M UTC")
        )?;
        for issue in &self.issues {
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

// ########################################################
// ################ Order tickets read model ##############
// ########################################################

/// Facts the ticket list read model is built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketEvent {
    /// A ticket was committed
    Created(SupportTicket),
    /// A ticket changed status
    StatusChanged(StatusChanged),
}

impl From<TicketStatusEvent> for TicketEvent {
    fn from(event: TicketStatusEvent) -> Self {
        match event {
            TicketStatusEvent::Changed(changed) => TicketEvent::StatusChanged(changed),
        }
    }
}

/// One line of an order's ticket list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketSummary {
    /// Ticket id
    pub ticket_id: TicketId,
    /// Current status
    pub status: TicketStatus,
    /// Issue types, in ticket order
    pub issue_types: Vec<IssueType>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// Ticket lists of every order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderTicketsState {
    /// Ticket summaries per order, oldest first
    pub orders: BTreeMap<OrderId, Vec<TicketSummary>>,
}

impl OrderTicketsState {
    /// The ticket list of an order.
    pub fn tickets(&self, order_id: &OrderId) -> &[TicketSummary] {
        self.orders
            .get(order_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Tickets of the order that still need attention.
    pub fn unresolved_count(&self, order_id: &OrderId) -> usize {
        self.tickets(order_id)
            .iter()
            .filter(|summary| {
                matches!(summary.status, TicketStatus::Open | TicketStatus::InProgress)
            })
            .count()
    }
}

/// The order ticket list view.
pub fn order_tickets_view<'a>() -> View<'a, OrderTicketsState, TicketEvent> {
    View {
        evolve: Box::new(|state, event| {
            let mut new_state = state.clone();
            match event {
                TicketEvent::Created(ticket) => {
                    new_state
                        .orders
                        .entry(ticket.order_id.clone())
                        .or_default()
                        .push(TicketSummary {
                            ticket_id: ticket.id.clone(),
                            status: ticket.status,
                            issue_types: ticket
                                .issues
                                .iter()
                                .map(TicketIssue::issue_type)
                                .collect(),
                            created_at: ticket.created_at,
                        });
                }
                TicketEvent::StatusChanged(changed) => {
                    if let Some(summary) = new_state
                        .orders
                        .values_mut()
                        .flat_map(|tickets| tickets.iter_mut())
                        .find(|summary| summary.ticket_id == changed.ticket_id)
                    {
                        summary.status = changed.to;
                    }
                }
            }
            new_state
        }),
        initial_state: Box::new(OrderTicketsState::default),
    }
}
