//! Application models.

use serde::{Deserialize, Serialize};

use crate::models::jobs::Job;

/// One application as returned by `GET {endpoint}apps`.
///
/// The API sends more fields than listed here; unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRecord {
    /// Opaque application identifier.
    #[serde(rename = "appid")]
    pub app_id: String,
    /// Display name. Some legacy applications carry none.
    #[serde(default)]
    pub name: String,
    /// Whether the application is currently active.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// An application together with its jobs, as assembled into a metadata
/// snapshot.
#[derive(Debug, Clone)]
pub struct Application {
    /// Opaque application identifier.
    pub app_id: String,
    /// Display name.
    pub name: String,
    /// Jobs under this application, in API order.
    pub jobs: Vec<Job>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_application_record() {
        let json = r#"{"appid": "a1", "name": "Checkout", "active": true}"#;
        let record: ApplicationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.app_id, "a1");
        assert_eq!(record.name, "Checkout");
        assert!(record.active);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let json = r#"{"appid": "a2"}"#;
        let record: ApplicationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.app_id, "a2");
        assert_eq!(record.name, "");
        assert!(record.active, "active defaults to true when absent");
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let json = r#"{"appid": "a3", "name": "CDN", "browser_wait_time": 50}"#;
        let record: ApplicationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "CDN");
    }
}
