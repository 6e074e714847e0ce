//! Backend API client for the hosted inspections and equipment resources.

use std::future::Future;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::BackendConfig;
use crate::error::{Error, Result};
use crate::models::{Equipment, EquipmentId, EquipmentKind, EquipmentStatus, QueuedInspection};
use crate::offline::InspectionSubmitter;
use crate::util::{compact_text, is_http_url, normalize_text_option};

/// HTTP client for the hosted backend.
///
/// One create-record request per queued inspection; success is any 2xx
/// acknowledgment, everything else is a per-item failure.
#[derive(Clone)]
pub struct InspectionsApiClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for InspectionsApiClient {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("InspectionsApiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl InspectionsApiClient {
    /// Build a client from validated backend configuration
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let base_url = normalize_endpoint(config.base_url.clone())?;
        Ok(Self {
            base_url,
            api_key: config.api_key.clone(),
            client: reqwest::Client::builder().build()?,
        })
    }

    /// Submit one queued inspection to the backend's inspections resource
    pub async fn submit_inspection(&self, inspection: &QueuedInspection) -> Result<()> {
        let body = SubmitInspectionRequest {
            equipment_id: inspection.equipment_id.as_str(),
            payload: &inspection.payload,
            captured_at: inspection.created_at,
        };

        let response = self
            .client
            .post(format!("{}/rest/v1/inspections", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(parse_api_error(status, &body)));
        }

        Ok(())
    }

    /// Fetch the equipment catalog for a local refresh
    pub async fn fetch_equipment(&self) -> Result<Vec<Equipment>> {
        let response = self
            .client
            .get(format!("{}/rest/v1/equipment", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(parse_api_error(status, &body)));
        }

        let rows = response.json::<Vec<RemoteEquipmentRow>>().await?;
        Ok(rows.into_iter().map(RemoteEquipmentRow::into_equipment).collect())
    }
}

impl InspectionSubmitter for InspectionsApiClient {
    fn submit(&self, inspection: &QueuedInspection) -> impl Future<Output = Result<()>> + Send {
        self.submit_inspection(inspection)
    }
}

#[derive(Debug, Serialize)]
struct SubmitInspectionRequest<'a> {
    equipment_id: String,
    payload: &'a crate::models::InspectionPayload,
    captured_at: i64,
}

/// Wire shape of an equipment catalog row; tolerant of missing fields
#[derive(Debug, Deserialize)]
struct RemoteEquipmentRow {
    id: Option<String>,
    serial: String,
    name: String,
    kind: Option<String>,
    status: Option<String>,
    inspection_interval_days: Option<i64>,
    created_at: Option<i64>,
    updated_at: Option<i64>,
    #[serde(default)]
    is_deleted: bool,
}

impl RemoteEquipmentRow {
    fn into_equipment(self) -> Equipment {
        let now = chrono::Utc::now().timestamp_millis();
        Equipment {
            id: self
                .id
                .and_then(|id| id.parse::<EquipmentId>().ok())
                .unwrap_or_default(),
            serial: crate::models::normalize_serial(&self.serial),
            name: self.name,
            kind: self
                .kind
                .and_then(|kind| kind.parse::<EquipmentKind>().ok())
                .unwrap_or(EquipmentKind::Other),
            status: self
                .status
                .and_then(|status| status.parse::<EquipmentStatus>().ok())
                .unwrap_or(EquipmentStatus::Active),
            inspection_interval_days: self
                .inspection_interval_days
                .and_then(|days| u32::try_from(days).ok())
                .unwrap_or(0),
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
            is_deleted: self.is_deleted,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    message: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(message) = payload.message.or(payload.error) {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = compact_text(body);
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", trimmed, status.as_u16())
    }
}

fn normalize_endpoint(raw: String) -> Result<String> {
    let endpoint = normalize_text_option(Some(raw))
        .ok_or_else(|| Error::Config("Backend URL must not be empty".to_string()))?;
    if is_http_url(&endpoint) {
        Ok(endpoint.trim_end_matches('/').to_string())
    } else {
        Err(Error::Config(
            "Backend URL must include http:// or https://".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_endpoint_rejects_invalid_values() {
        assert!(normalize_endpoint(String::new()).is_err());
        assert!(normalize_endpoint("api.example.com".to_string()).is_err());
        assert_eq!(
            normalize_endpoint("https://api.example.com/".to_string()).unwrap(),
            "https://api.example.com"
        );
    }

    #[test]
    fn test_parse_api_error_prefers_message() {
        let message = parse_api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"message": "equipment_id violates foreign key"}"#,
        );
        assert_eq!(message, "equipment_id violates foreign key (500)");
    }

    #[test]
    fn test_parse_api_error_falls_back_to_status() {
        assert_eq!(
            parse_api_error(StatusCode::SERVICE_UNAVAILABLE, ""),
            "HTTP 503"
        );
        assert_eq!(
            parse_api_error(StatusCode::BAD_GATEWAY, "upstream reset"),
            "upstream reset (502)"
        );
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let client = InspectionsApiClient::new(&BackendConfig {
            base_url: "https://api.example.com".to_string(),
            api_key: "super-secret".to_string(),
        })
        .unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_remote_row_tolerates_missing_fields() {
        let row: RemoteEquipmentRow =
            serde_json::from_str(r#"{"serial": "harn-1x", "name": "Harness"}"#).unwrap();
        let equipment = row.into_equipment();
        assert_eq!(equipment.serial, "HARN-1X");
        assert_eq!(equipment.kind, EquipmentKind::Other);
        assert!(!equipment.is_deleted);
    }
}
