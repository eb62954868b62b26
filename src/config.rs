use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Settings of the ticket desk.
///
/// Every field has a default, so a configuration document only needs to name what it overrides:
///
/// ```
/// use ticket_desk::config::TicketDeskConfig;
///
/// let config = TicketDeskConfig::from_json(r#"{ "max_photo_attachments": 3 }"#).unwrap();
/// assert_eq!(config.max_photo_attachments, 3);
/// assert_eq!(config.unknown_product_label, "Unknown Product");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketDeskConfig {
    /// Prefix of generated issue ids, followed by a per-dialog sequence number
    pub issue_id_prefix: String,
    /// What viewers display for a product id that resolves to nothing
    pub unknown_product_label: String,
    /// Upper bound on photos attached to one damaged-item issue
    pub max_photo_attachments: usize,
}

impl Default for TicketDeskConfig {
    fn default() -> Self {
        TicketDeskConfig {
            issue_id_prefix: "issue-".to_string(),
            unknown_product_label: "Unknown Product".to_string(),
            max_photo_attachments: 10,
        }
    }
}

impl TicketDeskConfig {
    /// Parses and validates a JSON configuration document.
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let config: TicketDeskConfig = serde_json::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every setting is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.issue_id_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "issue_id_prefix",
                reason: "must not be blank".to_string(),
            });
        }
        if self.unknown_product_label.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "unknown_product_label",
                reason: "must not be blank".to_string(),
            });
        }
        if self.max_photo_attachments == 0 {
            return Err(ConfigError::Invalid {
                field: "max_photo_attachments",
                reason: "must allow at least one photo".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = TicketDeskConfig::from_json("{}").unwrap();
        assert_eq!(config, TicketDeskConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = TicketDeskConfig::from_json(
            r#"{ "issue_id_prefix": "TI-", "unknown_product_label": "Removed product" }"#,
        )
        .unwrap();
        assert_eq!(config.issue_id_prefix, "TI-");
        assert_eq!(config.unknown_product_label, "Removed product");
        assert_eq!(config.max_photo_attachments, 10);
    }

    #[test]
    fn rejects_zero_photos() {
        let error = TicketDeskConfig::from_json(r#"{ "max_photo_attachments": 0 }"#).unwrap_err();
        assert!(matches!(
            error,
            ConfigError::Invalid {
                field: "max_photo_attachments",
                ..
            }
        ));
    }

    #[test]
    fn rejects_malformed_documents() {
        let error = TicketDeskConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(error, ConfigError::Parse(_)));
    }
}
