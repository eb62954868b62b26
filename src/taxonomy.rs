//! The closed set of issue types and the fields each of them captures.
//!
//! [IssueType::fields] is the one table the rest of the crate dispatches on: the draft builder uses it
//! to decide which inputs are enabled, and validation on submit walks the same set.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Category of a support complaint
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum IssueType {
    /// The order is late
    #[display("Order Delay")]
    OrderDelay,
    /// One or more ordered items are missing
    #[display("Missing Item")]
    MissingItem,
    /// Different items arrived than the ones ordered
    #[display("Incorrect Item")]
    IncorrectItem,
    /// One or more ordered items arrived damaged
    #[display("Damaged Item")]
    DamagedItem,
    /// Fewer units of an item arrived than were ordered
    #[display("Incorrect Quantity")]
    IncorrectQuantity,
}

/// An input of the issue draft form
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueField {
    /// Free-text description
    #[display("description")]
    Description,
    /// Multi-select over the ordered items
    #[display("related products")]
    RelatedProducts,
    /// Single-select over the ordered items
    #[display("single related product")]
    SingleRelatedProduct,
    /// Received quantity text input
    #[display("received quantity")]
    ReceivedQuantity,
    /// Searchable multi-select over the catalog
    #[display("received instead products")]
    ReceivedInstead,
    /// Photo attachments (names only)
    #[display("photos")]
    Photos,
}

impl IssueType {
    /// Every issue type, in the order the form lists them.
    pub const ALL: [IssueType; 5] = [
        IssueType::OrderDelay,
        IssueType::MissingItem,
        IssueType::IncorrectItem,
        IssueType::DamagedItem,
        IssueType::IncorrectQuantity,
    ];

    /// The inputs this issue type enables.
    pub fn fields(&self) -> &'static [IssueField] {
        match self {
            IssueType::OrderDelay => &[IssueField::Description],
            IssueType::MissingItem => &[IssueField::RelatedProducts],
            IssueType::IncorrectItem => &[IssueField::RelatedProducts, IssueField::ReceivedInstead],
            IssueType::DamagedItem => &[IssueField::RelatedProducts, IssueField::Photos],
            IssueType::IncorrectQuantity => &[
                IssueField::SingleRelatedProduct,
                IssueField::ReceivedQuantity,
            ],
        }
    }

    /// Returns `true` if the input is enabled for this issue type.
    pub fn accepts(&self, field: IssueField) -> bool {
        self.fields().contains(&field)
    }

    /// Returns `true` if the input must carry data for the issue to be submitted.
    ///
    /// Photos are the only optional input.
    pub fn requires(&self, field: IssueField) -> bool {
        self.accepts(field) && field != IssueField::Photos
    }
}
