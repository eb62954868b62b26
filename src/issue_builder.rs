//! The issue draft builder: one issue at a time, per issue type field capture and validation.
//!
//! The form state is a single [IssueDraftState]. Choosing an issue type is one event that resets every
//! working field and sets the type in the same evolution step, so inputs of a previous type can never
//! leak into the next issue. Submitting, cancelling and re-selecting the type all reset the same way.

use std::collections::BTreeSet;

use crate::config::TicketDeskConfig;
use crate::decider::Decider;
use crate::error::ValidationError;
use crate::model::{
    Catalog, IssueDetails, IssueId, IssueType, Order, OrderItem, Product, ProductId, TicketIssue,
};
use crate::taxonomy::IssueField;

/// What the builder validates against: the disputed order, the catalog and the desk settings.
#[derive(Debug, Clone, Copy)]
pub struct IssueContext<'a> {
    /// The order under dispute, universe of related-product selections
    pub order: &'a Order,
    /// The full catalog, universe of received-instead selections
    pub catalog: &'a Catalog,
    /// Desk settings
    pub config: &'a TicketDeskConfig,
}

/// Working inputs of every issue type. Only the inputs the selected type enables are ever filled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftFields {
    /// Description text, as typed
    pub description: String,
    /// Selected ordered items
    pub related_product_ids: BTreeSet<ProductId>,
    /// Selected ordered item for a quantity shortage
    pub single_related_product_id: Option<ProductId>,
    /// Received quantity, as typed
    pub received_quantity: String,
    /// Search query over the catalog
    pub received_instead_query: String,
    /// Selected catalog products
    pub received_instead_product_ids: BTreeSet<ProductId>,
    /// Attached photo names, in attachment order
    pub photo_names: Vec<String>,
}

/// State of the issue draft form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueDraftState {
    /// Selected type, `None` while no issue is being added
    pub issue_type: Option<IssueType>,
    /// Working inputs
    pub fields: DraftFields,
    /// Issues submitted so far in this dialog, drives issue id allocation
    pub submitted_count: u64,
}

impl IssueDraftState {
    /// Returns `true` while an issue is being added.
    pub fn is_adding(&self) -> bool {
        self.issue_type.is_some()
    }

    /// Returns `true` if the selected issue type shows this input.
    pub fn is_field_enabled(&self, field: IssueField) -> bool {
        self.issue_type
            .map(|issue_type| issue_type.accepts(field))
            .unwrap_or(false)
    }

    /// Catalog products matching the received-instead search query.
    pub fn received_instead_options<'c>(&self, catalog: &'c Catalog) -> Vec<&'c Product> {
        catalog.filter_by_name(&self.fields.received_instead_query)
    }

    fn reset(&self) -> IssueDraftState {
        IssueDraftState {
            issue_type: None,
            fields: DraftFields::default(),
            submitted_count: self.submitted_count,
        }
    }
}

/// Ordered items selectable as related products.
pub fn related_product_options(order: &Order) -> &[OrderItem] {
    &order.items
}

/// Ordered items selectable for a quantity shortage: only lines with more than one unit.
pub fn single_product_options(order: &Order) -> Vec<&OrderItem> {
    order.items.iter().filter(|item| item.quantity > 1).collect()
}

/// Intents of the issue draft form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueDraftCommand {
    /// Choose (or clear) the issue type, resetting every input
    SelectIssueType(Option<IssueType>),
    /// Replace the description
    SetDescription(String),
    /// Select or deselect an ordered item
    ToggleRelatedProduct(ProductId),
    /// Choose the ordered item with the quantity shortage
    SelectSingleProduct(ProductId),
    /// Replace the received quantity text
    SetReceivedQuantity(String),
    /// Replace the catalog search query
    SetReceivedInsteadQuery(String),
    /// Select or deselect a catalog product received instead
    ToggleReceivedInsteadProduct(ProductId),
    /// Attach a photo by name
    AttachPhoto(String),
    /// Remove one attached photo with this name
    RemovePhoto(String),
    /// Validate and finalize the issue
    Submit,
    /// Abandon the issue being added
    Cancel,
}

/// Facts of the issue draft form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueDraftEvent {
    /// Type chosen, every input reset
    IssueTypeSelected(Option<IssueType>),
    /// Description replaced
    DescriptionChanged(String),
    /// Ordered item selection flipped
    RelatedProductToggled(ProductId),
    /// Shortage item chosen
    SingleProductSelected(ProductId),
    /// Received quantity text replaced
    ReceivedQuantityChanged(String),
    /// Catalog search query replaced
    ReceivedInsteadQueryChanged(String),
    /// Catalog product selection flipped
    ReceivedInsteadProductToggled(ProductId),
    /// Photo appended
    PhotoAttached(String),
    /// One photo with this name removed
    PhotoRemoved(String),
    /// Issue finalized, form reset
    IssueSubmitted(TicketIssue),
    /// Issue abandoned, form reset
    DraftCancelled,
}

fn require_field(
    state: &IssueDraftState,
    field: IssueField,
) -> Result<IssueType, ValidationError> {
    let issue_type = state
        .issue_type
        .ok_or(ValidationError::NoIssueTypeSelected)?;
    if !issue_type.accepts(field) {
        return Err(ValidationError::FieldNotApplicable { field, issue_type });
    }
    Ok(issue_type)
}

fn adjustable_item<'o>(
    order: &'o Order,
    product_id: &ProductId,
) -> Result<&'o OrderItem, ValidationError> {
    let item = order
        .item(product_id)
        .ok_or_else(|| ValidationError::ProductNotInOrder(product_id.clone()))?;
    if item.quantity <= 1 {
        return Err(ValidationError::QuantityNotAdjustable {
            product_id: product_id.clone(),
            ordered: item.quantity,
        });
    }
    Ok(item)
}

/// Validates the working inputs against the issue type's rules and builds its payload.
pub fn validate(
    issue_type: IssueType,
    fields: &DraftFields,
    order: &Order,
) -> Result<IssueDetails, ValidationError> {
    let related = || {
        if fields.related_product_ids.is_empty() {
            Err(ValidationError::RelatedProductsRequired)
        } else {
            Ok(fields.related_product_ids.clone())
        }
    };

    match issue_type {
        IssueType::OrderDelay => {
            let description = fields.description.trim();
            if description.is_empty() {
                return Err(ValidationError::DescriptionRequired);
            }
            Ok(IssueDetails::OrderDelay {
                issue_description: description.to_string(),
            })
        }
        IssueType::MissingItem => Ok(IssueDetails::MissingItem {
            related_product_ids: related()?,
        }),
        IssueType::IncorrectItem => {
            let related_product_ids = related()?;
            if fields.received_instead_product_ids.is_empty() {
                return Err(ValidationError::ReceivedInsteadRequired);
            }
            Ok(IssueDetails::IncorrectItem {
                related_product_ids,
                received_instead_product_ids: fields.received_instead_product_ids.clone(),
            })
        }
        IssueType::DamagedItem => Ok(IssueDetails::DamagedItem {
            related_product_ids: related()?,
            damaged_item_photo_names: fields.photo_names.clone(),
        }),
        IssueType::IncorrectQuantity => {
            let product_id = fields
                .single_related_product_id
                .as_ref()
                .ok_or(ValidationError::SingleProductRequired)?;
            let ordered = adjustable_item(order, product_id)?.quantity;
            let text = fields.received_quantity.trim();
            let received: u32 = text
                .parse()
                .map_err(|_| ValidationError::ReceivedQuantityInvalid(text.to_string()))?;
            if received < 1 || received >= ordered {
                return Err(ValidationError::ReceivedQuantityOutOfRange { received, ordered });
            }
            Ok(IssueDetails::IncorrectQuantity {
                single_related_product_id: product_id.clone(),
                quantity_in_order: ordered,
                quantity_received: received,
            })
        }
    }
}

fn toggle(set: &mut BTreeSet<ProductId>, product_id: &ProductId) {
    if !set.remove(product_id) {
        set.insert(product_id.clone());
    }
}

/// The issue draft builder decider.
pub fn decider<'a>(
    context: IssueContext<'a>,
) -> Decider<'a, IssueDraftCommand, IssueDraftState, IssueDraftEvent, ValidationError> {
    Decider {
        decide: Box::new(move |command, state| match command {
            IssueDraftCommand::SelectIssueType(issue_type) => {
                Ok(vec![IssueDraftEvent::IssueTypeSelected(*issue_type)])
            }
            IssueDraftCommand::SetDescription(text) => {
                require_field(state, IssueField::Description)?;
                Ok(vec![IssueDraftEvent::DescriptionChanged(text.to_owned())])
            }
            IssueDraftCommand::ToggleRelatedProduct(product_id) => {
                require_field(state, IssueField::RelatedProducts)?;
                if !context.order.contains(product_id) {
                    return Err(ValidationError::ProductNotInOrder(product_id.clone()));
                }
                Ok(vec![IssueDraftEvent::RelatedProductToggled(
                    product_id.clone(),
                )])
            }
            IssueDraftCommand::SelectSingleProduct(product_id) => {
                require_field(state, IssueField::SingleRelatedProduct)?;
                adjustable_item(context.order, product_id)?;
                Ok(vec![IssueDraftEvent::SingleProductSelected(
                    product_id.clone(),
                )])
            }
            IssueDraftCommand::SetReceivedQuantity(text) => {
                require_field(state, IssueField::ReceivedQuantity)?;
                Ok(vec![IssueDraftEvent::ReceivedQuantityChanged(
                    text.to_owned(),
                )])
            }
            IssueDraftCommand::SetReceivedInsteadQuery(query) => {
                require_field(state, IssueField::ReceivedInstead)?;
                Ok(vec![IssueDraftEvent::ReceivedInsteadQueryChanged(
                    query.to_owned(),
                )])
            }
            IssueDraftCommand::ToggleReceivedInsteadProduct(product_id) => {
                require_field(state, IssueField::ReceivedInstead)?;
                if !context.catalog.contains(product_id) {
                    return Err(ValidationError::ProductNotInCatalog(product_id.clone()));
                }
                Ok(vec![IssueDraftEvent::ReceivedInsteadProductToggled(
                    product_id.clone(),
                )])
            }
            IssueDraftCommand::AttachPhoto(name) => {
                require_field(state, IssueField::Photos)?;
                if name.trim().is_empty() {
                    return Err(ValidationError::PhotoNameRequired);
                }
                let max = context.config.max_photo_attachments;
                if state.fields.photo_names.len() >= max {
                    return Err(ValidationError::TooManyPhotos(max));
                }
                Ok(vec![IssueDraftEvent::PhotoAttached(name.to_owned())])
            }
            IssueDraftCommand::RemovePhoto(name) => {
                require_field(state, IssueField::Photos)?;
                if !state.fields.photo_names.contains(name) {
                    return Err(ValidationError::PhotoNotAttached(name.to_owned()));
                }
                Ok(vec![IssueDraftEvent::PhotoRemoved(name.to_owned())])
            }
            IssueDraftCommand::Submit => {
                let issue_type = state
                    .issue_type
                    .ok_or(ValidationError::NoIssueTypeSelected)?;
                let details = validate(issue_type, &state.fields, context.order)?;
                let id = IssueId(format!(
                    "{}{}",
                    context.config.issue_id_prefix,
                    state.submitted_count + 1
                ));
                Ok(vec![IssueDraftEvent::IssueSubmitted(TicketIssue {
                    id,
                    details,
                })])
            }
            IssueDraftCommand::Cancel => Ok(vec![IssueDraftEvent::DraftCancelled]),
        }),
        evolve: Box::new(|state, event| {
            let mut new_state = state.clone();
            match event {
                IssueDraftEvent::IssueTypeSelected(issue_type) => {
                    new_state = state.reset();
                    new_state.issue_type = *issue_type;
                }
                IssueDraftEvent::DescriptionChanged(text) => {
                    new_state.fields.description = text.to_owned();
                }
                IssueDraftEvent::RelatedProductToggled(product_id) => {
                    toggle(&mut new_state.fields.related_product_ids, product_id);
                }
                IssueDraftEvent::SingleProductSelected(product_id) => {
                    new_state.fields.single_related_product_id = Some(product_id.clone());
                }
                IssueDraftEvent::ReceivedQuantityChanged(text) => {
                    new_state.fields.received_quantity = text.to_owned();
                }
                IssueDraftEvent::ReceivedInsteadQueryChanged(query) => {
                    new_state.fields.received_instead_query = query.to_owned();
                }
                IssueDraftEvent::ReceivedInsteadProductToggled(product_id) => {
                    toggle(
                        &mut new_state.fields.received_instead_product_ids,
                        product_id,
                    );
                }
                IssueDraftEvent::PhotoAttached(name) => {
                    new_state.fields.photo_names.push(name.to_owned());
                }
                IssueDraftEvent::PhotoRemoved(name) => {
                    if let Some(position) =
                        new_state.fields.photo_names.iter().position(|n| n == name)
                    {
                        new_state.fields.photo_names.remove(position);
                    }
                }
                IssueDraftEvent::IssueSubmitted(_) => {
                    new_state = state.reset();
                    new_state.submitted_count += 1;
                }
                IssueDraftEvent::DraftCancelled => {
                    new_state = state.reset();
                }
            }
            new_state
        }),
        initial_state: Box::new(IssueDraftState::default),
    }
}
