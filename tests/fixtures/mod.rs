// ###################################################################
// ########################## Test fixtures ##########################
// ###################################################################

#![allow(dead_code)]

use ticket_desk::config::TicketDeskConfig;
use ticket_desk::issue_builder::IssueContext;
use ticket_desk::model::{Catalog, Order, OrderItem, Product, ProductId};

/// Order lines carry the name the product had at checkout, which differs from the current catalog
/// name for the mug. Resolving a related id against the catalog instead of the order shows up as the
/// wrong name.
pub fn order() -> Order {
    Order::new(
        "o-100",
        vec![
            OrderItem::new(Product::new("p-mug", "Coffee Mug (blue, 350ml)"), 5),
            OrderItem::new(Product::new("p-pot", "Tea Pot"), 1),
            OrderItem::new(Product::new("p-spoon", "Silver Spoon"), 2),
        ],
    )
}

pub fn other_order() -> Order {
    Order::new(
        "o-200",
        vec![OrderItem::new(Product::new("p-kettle", "Electric Kettle"), 1)],
    )
}

pub fn catalog() -> Catalog {
    Catalog::new(vec![
        Product::new("p-mug", "Coffee Mug"),
        Product::new("p-pot", "Tea Pot"),
        Product::new("p-spoon", "Silver Spoon"),
        Product::new("p-cup", "Espresso Cup"),
        Product::new("p-kettle", "Electric Kettle"),
    ])
}

pub fn config() -> TicketDeskConfig {
    TicketDeskConfig::default()
}

pub fn context<'a>(
    order: &'a Order,
    catalog: &'a Catalog,
    config: &'a TicketDeskConfig,
) -> IssueContext<'a> {
    IssueContext {
        order,
        catalog,
        config,
    }
}

pub fn id(value: &str) -> ProductId {
    ProductId::from(value)
}
