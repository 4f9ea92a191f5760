use crate::errors::{NotifierError, Result};
use serde::Deserialize;

/// A content notification as received on `/notify`.
///
/// Only the identifier is required; any other fields in the payload are
/// ignored. The raw payload is relayed to the mapper unmodified, so nothing
/// beyond the identifier needs to survive parsing.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ContentNotification {
    pub uuid: String,
}

impl ContentNotification {
    /// Parses a raw payload, requiring a non-empty identifier.
    pub fn from_payload(payload: &[u8]) -> Result<Self> {
        let notification: ContentNotification = serde_json::from_slice(payload)
            .map_err(|e| NotifierError::InvalidNotification(e.to_string()))?;

        if notification.uuid.is_empty() {
            return Err(NotifierError::InvalidNotification(
                "uuid must not be empty".to_string(),
            ));
        }

        Ok(notification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_notification() {
        let notification = ContentNotification::from_payload(br#"{"uuid":"abc-123"}"#).unwrap();
        assert_eq!(notification.uuid, "abc-123");
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let notification = ContentNotification::from_payload(
            br#"{"uuid":"abc-123","type":"article","lastModified":"2016-01-01"}"#,
        )
        .unwrap();
        assert_eq!(notification.uuid, "abc-123");
    }

    #[test]
    fn test_malformed_payload_is_rejected() {
        assert!(matches!(
            ContentNotification::from_payload(b"not-json").unwrap_err(),
            NotifierError::InvalidNotification(_)
        ));
    }

    #[test]
    fn test_missing_identifier_is_rejected() {
        assert!(matches!(
            ContentNotification::from_payload(br#"{"type":"article"}"#).unwrap_err(),
            NotifierError::InvalidNotification(_)
        ));
    }

    #[test]
    fn test_null_identifier_is_rejected() {
        assert!(
            ContentNotification::from_payload(br#"{"uuid":null}"#).is_err()
        );
    }

    #[test]
    fn test_empty_identifier_is_rejected() {
        assert!(matches!(
            ContentNotification::from_payload(br#"{"uuid":""}"#).unwrap_err(),
            NotifierError::InvalidNotification(_)
        ));
    }
}
