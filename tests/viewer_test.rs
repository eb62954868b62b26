use std::collections::BTreeSet;

use chrono::{TimeZone, Utc};
use rstest::rstest;
use serde_json::json;
use ticket_desk::dialog::TicketDialog;
use ticket_desk::issue_builder::IssueDraftCommand;
use ticket_desk::model::{
    IssueDetails, IssueId, IssueType, OrderId, SupportTicket, TicketId, TicketIssue, TicketStatus,
};
use ticket_desk::store::InMemoryTicketStore;
use ticket_desk::viewer::{render_issue, render_ticket};

use crate::fixtures::{catalog, config, id, order};

mod fixtures;

fn incorrect_item(related: &[&str], received: &[&str]) -> TicketIssue {
    TicketIssue {
        id: IssueId::from("issue-1"),
        details: IssueDetails::IncorrectItem {
            related_product_ids: related.iter().map(|product| id(product)).collect(),
            received_instead_product_ids: received.iter().map(|product| id(product)).collect(),
        },
    }
}

fn ticket(issues: Vec<TicketIssue>) -> SupportTicket {
    SupportTicket {
        id: TicketId::from("t-1"),
        order_id: OrderId::from("o-100"),
        issues,
        created_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap(),
        status: TicketStatus::Open,
    }
}

#[test]
fn names_come_from_the_list_the_id_was_picked_from() {
    let (order, catalog, config) = (order(), catalog(), config());
    let view = render_issue(
        &incorrect_item(&["p-mug", "p-spoon"], &["p-mug"]),
        &order,
        &catalog,
        &config,
    );

    assert_eq!(
        view.related_products,
        vec!["Coffee Mug (blue, 350ml)", "Silver Spoon"]
    );
    assert_eq!(view.received_instead, vec!["Coffee Mug"]);
}

#[rstest]
#[case(IssueDetails::MissingItem { related_product_ids: BTreeSet::from([id("p-pot")]) })]
#[case(IssueDetails::DamagedItem {
    related_product_ids: BTreeSet::from([id("p-mug"), id("p-spoon")]),
    damaged_item_photo_names: vec!["crack.png".to_string()],
})]
#[case(IssueDetails::IncorrectItem {
    related_product_ids: BTreeSet::from([id("p-pot")]),
    received_instead_product_ids: BTreeSet::from([id("p-kettle"), id("p-cup")]),
})]
#[case(IssueDetails::IncorrectQuantity {
    single_related_product_id: id("p-spoon"),
    quantity_in_order: 2,
    quantity_received: 1,
})]
fn valid_ids_never_render_as_unknown(#[case] details: IssueDetails) {
    let (order, catalog, config) = (order(), catalog(), config());
    let issue = TicketIssue {
        id: IssueId::from("issue-7"),
        details,
    };

    let rendered = render_issue(&issue, &order, &catalog, &config).to_string();
    assert!(
        !rendered.contains(&config.unknown_product_label),
        "unexpected unknown product in:\n{rendered}"
    );
}

#[test]
fn ids_outside_their_list_render_as_unknown() {
    let (order, catalog, config) = (order(), catalog(), config());
    let view = render_issue(
        &incorrect_item(&["p-cup"], &["p-gone"]),
        &order,
        &catalog,
        &config,
    );

    assert_eq!(view.related_products, vec!["Unknown Product"]);
    assert_eq!(view.received_instead, vec!["Unknown Product"]);
}

#[test]
fn the_unknown_label_is_configurable() {
    let (order, catalog) = (order(), catalog());
    let mut config = config();
    config.unknown_product_label = "Discontinued".to_string();
    let issue = TicketIssue {
        id: IssueId::from("issue-1"),
        details: IssueDetails::IncorrectQuantity {
            single_related_product_id: id("p-gone"),
            quantity_in_order: 4,
            quantity_received: 2,
        },
    };

    let view = render_issue(&issue, &order, &catalog, &config);
    assert_eq!(view.single_related_product.as_deref(), Some("Discontinued"));
    assert_eq!(view.quantity_in_order, Some(4));
    assert_eq!(view.quantity_received, Some(2));
}

#[test]
fn tickets_render_every_issue_in_order() {
    let (order, catalog, config) = (order(), catalog(), config());
    let ticket = ticket(vec![
        TicketIssue {
            id: IssueId::from("issue-1"),
            details: IssueDetails::OrderDelay {
                issue_description: "Box was crushed".to_string(),
            },
        },
        incorrect_item(&["p-mug", "p-spoon"], &["p-cup"]),
        TicketIssue {
            id: IssueId::from("issue-3"),
            details: IssueDetails::IncorrectQuantity {
                single_related_product_id: id("p-mug"),
                quantity_in_order: 5,
                quantity_received: 3,
            },
        },
    ]);

    let view = render_ticket(&ticket, &order, &catalog, &config);
    assert_eq!(
        view.issues
            .iter()
            .map(|issue| issue.issue_type)
            .collect::<Vec<_>>(),
        vec![
            IssueType::OrderDelay,
            IssueType::IncorrectItem,
            IssueType::IncorrectQuantity
        ]
    );
    pretty_assertions::assert_eq!(
        view.to_string(),
        "Ticket t-1 for order o-100 [Open] created 2026-03-01 09:30 UTC\n\
         Order Delay (issue-1)\n  \
           Description: Box was crushed\n\
         Incorrect Item (issue-1)\n  \
           Items: Coffee Mug (blue, 350ml), Silver Spoon\n  \
           Received instead: Espresso Cup\n\
         Incorrect Quantity (issue-3)\n  \
           Item: Coffee Mug (blue, 350ml)\n  \
           Ordered quantity: 5\n  \
           Received quantity: 3\n"
    );
}

#[test]
fn issues_serialize_flat_with_their_type_tag() {
    let issue = TicketIssue {
        id: IssueId::from("issue-2"),
        details: IssueDetails::DamagedItem {
            related_product_ids: BTreeSet::from([id("p-spoon"), id("p-mug")]),
            damaged_item_photo_names: vec!["top.jpg".to_string(), "side.jpg".to_string()],
        },
    };

    let value = serde_json::to_value(&issue).unwrap();
    assert_eq!(
        value,
        json!({
            "id": "issue-2",
            "issueType": "DamagedItem",
            "relatedProductIds": ["p-mug", "p-spoon"],
            "damagedItemPhotoNames": ["top.jpg", "side.jpg"],
        })
    );
    assert_eq!(serde_json::from_value::<TicketIssue>(value).unwrap(), issue);
}

#[test]
fn tickets_serialize_in_camel_case() {
    let ticket = ticket(vec![TicketIssue {
        id: IssueId::from("issue-1"),
        details: IssueDetails::IncorrectQuantity {
            single_related_product_id: id("p-mug"),
            quantity_in_order: 5,
            quantity_received: 3,
        },
    }]);

    let value = serde_json::to_value(&ticket).unwrap();
    assert_eq!(value["orderId"], json!("o-100"));
    assert_eq!(value["status"], json!("Open"));
    assert_eq!(value["createdAt"], json!("2026-03-01T09:30:00Z"));
    assert_eq!(
        value["issues"][0],
        json!({
            "id": "issue-1",
            "issueType": "IncorrectQuantity",
            "singleRelatedProductId": "p-mug",
            "quantityInOrder": 5,
            "quantityReceived": 3,
        })
    );
}

#[test]
fn committed_dialog_issues_render_with_resolved_names() {
    let (order, catalog, config) = (order(), catalog(), config());
    let store = InMemoryTicketStore::new();
    let mut dialog = TicketDialog::open(&order, &catalog, &config, &store);
    for command in [
        IssueDraftCommand::SelectIssueType(Some(IssueType::IncorrectItem)),
        IssueDraftCommand::ToggleRelatedProduct(id("p-mug")),
        IssueDraftCommand::ToggleRelatedProduct(id("p-pot")),
        IssueDraftCommand::SetReceivedInsteadQuery("kettle".to_string()),
        IssueDraftCommand::ToggleReceivedInsteadProduct(id("p-kettle")),
        IssueDraftCommand::Submit,
        IssueDraftCommand::SelectIssueType(Some(IssueType::IncorrectQuantity)),
        IssueDraftCommand::SelectSingleProduct(id("p-spoon")),
        IssueDraftCommand::SetReceivedQuantity("1".to_string()),
        IssueDraftCommand::Submit,
    ] {
        dialog.handle(command).unwrap();
    }
    let ticket = dialog.commit().unwrap();

    let view = render_ticket(&ticket, &order, &catalog, &config);
    assert_eq!(view.issues.len(), 2);
    assert_eq!(
        view.issues[0].related_products,
        vec!["Coffee Mug (blue, 350ml)", "Tea Pot"]
    );
    assert_eq!(view.issues[0].received_instead, vec!["Electric Kettle"]);
    assert_eq!(
        view.issues[1].single_related_product.as_deref(),
        Some("Silver Spoon")
    );
    assert_eq!(view.issues[1].quantity_in_order, Some(2));
    assert_eq!(view.issues[1].quantity_received, Some(1));
    assert!(!view.to_string().contains(&config.unknown_product_label));
}
