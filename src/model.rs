//! Orders, catalog, issues and tickets.
//!
//! Orders and the catalog are owned by external collaborators and are read-only here. Issues and
//! tickets are produced by the ticket dialog and are immutable once committed.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

pub use crate::taxonomy::IssueType;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Display, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
            Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Borrows the raw id.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                $name(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                $name(value)
            }
        }
    };
}

string_id!(
    /// Identifies a product, both in the catalog and in an order's lines
    ProductId
);
string_id!(
    /// Identifies an order
    OrderId
);
string_id!(
    /// Identifies an issue within one ticket
    IssueId
);
string_id!(
    /// Identifies a committed support ticket
    TicketId
);

/// A product as the storefront knows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product id
    pub id: ProductId,
    /// Display name
    pub name: String,
}

impl Product {
    /// Creates a product.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The full product universe, independent of any order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// All products, in listing order
    pub products: Vec<Product>,
}

impl Catalog {
    /// Creates a catalog.
    pub fn new(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// Looks up a product by id.
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// Returns `true` if the product exists in the catalog.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.find(id).is_some()
    }

    /// Case-insensitive substring filter over product names.
    ///
    /// A blank query is no filter at all: every product is returned.
    pub fn filter_by_name(&self, query: &str) -> Vec<&Product> {
        if query.trim().is_empty() {
            return self.products.iter().collect();
        }
        let needle = query.to_lowercase();
        self.products
            .iter()
            .filter(|product| product.name.to_lowercase().contains(&needle))
            .collect()
    }
}

/// One product line of an order (a product in the cart at checkout time)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// The ordered product
    pub product: Product,
    /// Ordered quantity
    pub quantity: u32,
}

impl OrderItem {
    /// Creates an order line.
    pub fn new(product: Product, quantity: u32) -> Self {
        OrderItem { product, quantity }
    }
}

/// An order, read-only here. Its items are the universe for "related product" selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order id
    pub id: OrderId,
    /// Ordered items, in checkout order
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Creates an order.
    pub fn new(id: impl Into<OrderId>, items: Vec<OrderItem>) -> Self {
        Order {
            id: id.into(),
            items,
        }
    }

    /// Looks up the order line of a product.
    pub fn item(&self, product_id: &ProductId) -> Option<&OrderItem> {
        self.items.iter().find(|item| &item.product.id == product_id)
    }

    /// Returns `true` if the product was part of this order.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.item(product_id).is_some()
    }
}

/// The issue-type specific payload of a [TicketIssue].
///
/// Each variant carries exactly the fields its issue type requires, so an issue can never hold data
/// that belongs to another type. Serialized flat and camelCase, tagged with `issueType`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "issueType", rename_all_fields = "camelCase")]
pub enum IssueDetails {
    /// The order has not arrived in time
    OrderDelay {
        /// Free-text description, trimmed
        issue_description: String,
    },
    /// Ordered items did not arrive
    MissingItem {
        /// Ordered items that are missing
        related_product_ids: BTreeSet<ProductId>,
    },
    /// Different items arrived than the ones ordered
    IncorrectItem {
        /// Ordered items that did not arrive
        related_product_ids: BTreeSet<ProductId>,
        /// Catalog products that arrived instead
        received_instead_product_ids: BTreeSet<ProductId>,
    },
    /// Ordered items arrived damaged
    DamagedItem {
        /// Ordered items that are damaged
        related_product_ids: BTreeSet<ProductId>,
        /// Names of the attached photos, in attachment order
        damaged_item_photo_names: Vec<String>,
    },
    /// Fewer units arrived than ordered
    IncorrectQuantity {
        /// The ordered item the shortage refers to
        single_related_product_id: ProductId,
        /// Units ordered
        quantity_in_order: u32,
        /// Units received, `1 <= received < ordered`
        quantity_received: u32,
    },
}

impl IssueDetails {
    /// The issue type this payload belongs to.
    pub fn issue_type(&self) -> IssueType {
        match self {
            IssueDetails::OrderDelay { .. } => IssueType::OrderDelay,
            IssueDetails::MissingItem { .. } => IssueType::MissingItem,
            IssueDetails::IncorrectItem { .. } => IssueType::IncorrectItem,
            IssueDetails::DamagedItem { .. } => IssueType::DamagedItem,
            IssueDetails::IncorrectQuantity { .. } => IssueType::IncorrectQuantity,
        }
    }
}

/// One finalized issue of a support ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketIssue {
    /// Unique within its ticket
    pub id: IssueId,
    /// Type specific payload
    #[serde(flatten)]
    pub details: IssueDetails,
}

impl TicketIssue {
    /// The type of this issue.
    pub fn issue_type(&self) -> IssueType {
        self.details.issue_type()
    }
}

/// Lifecycle status of a support ticket
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TicketStatus {
    /// Newly created, nobody is working on it yet
    #[default]
    #[display("Open")]
    Open,
    /// Staff is working on it
    #[display("In Progress")]
    InProgress,
    /// Staff resolved the ticket
    #[display("Resolved")]
    Resolved,
    /// Closed for good
    #[display("Closed")]
    Closed,
}

/// A committed support ticket. The issue list never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportTicket {
    /// Ticket id
    pub id: TicketId,
    /// The order the ticket is about
    pub order_id: OrderId,
    /// Committed issues, never empty
    pub issues: Vec<TicketIssue>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Current status
    pub status: TicketStatus,
}
