use std::error::Error;

use derive_more::Display;

use crate::model::{IssueType, ProductId, TicketId, TicketStatus};
use crate::taxonomy::IssueField;

/// A user-correctable input error.
///
/// `Display` is the message shown next to the form. Returning one of these never changes any state:
/// the user keeps their inputs and can fix them.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// An input was edited before an issue type was chosen
    #[display("Please select an issue type first")]
    NoIssueTypeSelected,
    /// The input is not part of the selected issue type's form
    #[display("The {field} field does not apply to {issue_type} issues")]
    FieldNotApplicable {
        /// Edited input
        field: IssueField,
        /// Currently selected type
        issue_type: IssueType,
    },
    /// Order delay without a description
    #[display("Please describe the issue")]
    DescriptionRequired,
    /// No ordered item selected
    #[display("Please select at least one item from your order")]
    RelatedProductsRequired,
    /// Incorrect item without the received products
    #[display("Please select at least one item you received instead")]
    ReceivedInsteadRequired,
    /// Incorrect quantity without the affected item
    #[display("Please select the item that arrived in the wrong quantity")]
    SingleProductRequired,
    /// The product is not a line of the disputed order
    #[display("Product {_0} is not part of this order")]
    ProductNotInOrder(ProductId),
    /// The product does not exist in the catalog
    #[display("Product {_0} is not in the catalog")]
    ProductNotInCatalog(ProductId),
    /// A shortage cannot be reported for an item ordered once
    #[display("Only {ordered} unit of product {product_id} was ordered, the quantity cannot be short")]
    QuantityNotAdjustable {
        /// Selected item
        product_id: ProductId,
        /// Its ordered quantity
        ordered: u32,
    },
    /// The received quantity is not a whole number
    #[display("Received quantity must be a whole number, got '{_0}'")]
    ReceivedQuantityInvalid(String),
    /// The received quantity is not a shortage
    #[display("Received quantity must be at least 1 and less than the ordered quantity ({ordered}), got {received}")]
    ReceivedQuantityOutOfRange {
        /// Parsed received quantity
        received: u32,
        /// Ordered quantity
        ordered: u32,
    },
    /// Blank photo name
    #[display("Photo name must not be empty")]
    PhotoNameRequired,
    /// Too many photos
    #[display("At most {_0} photos can be attached")]
    TooManyPhotos(usize),
    /// The photo to remove was never attached
    #[display("Photo '{_0}' is not attached")]
    PhotoNotAttached(String),
    /// The ticket dialog has no open draft
    #[display("No ticket draft is open")]
    NoOpenDraft,
    /// Commit with nothing pending
    #[display("Please add at least one issue before submitting the ticket")]
    EmptyTicket,
    /// Status change not allowed from the current status
    #[display("A ticket cannot move from {from} to {to}")]
    InvalidStatusTransition {
        /// Current status
        from: TicketStatus,
        /// Requested status
        to: TicketStatus,
    },
}

impl Error for ValidationError {}

/// Failure of the external order/ticket store
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No ticket with that id
    #[display("Ticket {_0} not found")]
    TicketNotFound(TicketId),
    /// The store refuses tickets without issues
    #[display("A ticket needs at least one issue")]
    EmptyTicket,
    /// The write was rejected because the ticket changed in the meantime
    #[display("Ticket {ticket_id} was modified concurrently (expected version {expected}, found {actual})")]
    VersionConflict {
        /// Ticket
        ticket_id: TicketId,
        /// Version the caller read
        expected: u64,
        /// Version in the store
        actual: u64,
    },
    /// The store could not be reached
    #[display("Ticket store unavailable: {_0}")]
    Unavailable(String),
}

impl Error for StoreError {}

/// Error of an application-level operation: either the user has to correct something or the store failed.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum DeskError {
    /// User-correctable
    #[display("{_0}")]
    Validation(ValidationError),
    /// Store failure
    #[display("{_0}")]
    Store(StoreError),
}

impl Error for DeskError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DeskError::Validation(error) => Some(error),
            DeskError::Store(error) => Some(error),
        }
    }
}

impl From<ValidationError> for DeskError {
    fn from(error: ValidationError) -> Self {
        DeskError::Validation(error)
    }
}

impl From<StoreError> for DeskError {
    fn from(error: StoreError) -> Self {
        DeskError::Store(error)
    }
}

/// Invalid configuration
#[derive(Debug, Display)]
pub enum ConfigError {
    /// The configuration document could not be parsed
    #[display("Invalid configuration document: {_0}")]
    Parse(serde_json::Error),
    /// A setting has an unusable value
    #[display("Invalid configuration value for {field}: {reason}")]
    Invalid {
        /// Setting name
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Parse(error) => Some(error),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        ConfigError::Parse(error)
    }
}
