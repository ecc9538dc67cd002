//! Upload lifecycle responses: post, verify, submit and status.
//!
//! Optional fields resolve to documented defaults when absent: `false` for
//! success flags, `None` for optional values and `"failed"` for statuses.

use serde::{Deserialize, Serialize};

use super::{nullable, ErrorList, Key};

const FAILED: &str = "failed";

fn default_status() -> String {
    FAILED.to_string()
}

/// Properties of a file stored by `/api/1.0/upload/post`.
///
/// Read from PascalCase keys; written with lowercase keys when nested into a
/// dataset submit request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileProperties {
    #[serde(default, rename(serialize = "size", deserialize = "Size"))]
    pub size: Option<i64>,
    #[serde(default, rename(serialize = "name", deserialize = "Name"))]
    pub name: Option<String>,
    /// Server-side location, passed to the verify step as `filePath`.
    #[serde(default, rename(serialize = "location", deserialize = "Location"))]
    pub location: Option<String>,
    #[serde(default, rename(serialize = "type", deserialize = "Type"))]
    pub file_type: Option<String>,
}

/// Response of `/api/1.0/upload/post`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UploadPostResponse {
    #[serde(default)]
    pub successful: bool,
    #[serde(default)]
    pub error: Option<String>,
    pub properties: FileProperties,
}

/// Dataset metadata detected while verifying an uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UploadDatasetDetails {
    #[serde(deserialize_with = "nullable")]
    pub dataset_id: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub dataset_name: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub source: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub description: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub dataset_ref: Option<String>,
    #[serde(default)]
    pub publication_date: Option<String>,
    #[serde(default)]
    pub accessed_on: Option<String>,
}

/// Response of `/api/1.0/upload/verify`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UploadVerifyResponse {
    #[serde(default)]
    pub successful: bool,
    #[serde(default)]
    pub upload_format_type: Option<serde_json::Value>,
    #[serde(default, rename = "ErrorList")]
    pub errors: Option<ErrorList>,
    #[serde(default)]
    pub columns: Option<serde_json::Value>,
    #[serde(default, rename = "FlatDSUpdateOptions")]
    pub flat_ds_update_options: Option<serde_json::Value>,
    #[serde(default)]
    pub metadata_details: Option<UploadDatasetDetails>,
}

/// Response of `/api/1.0/upload/save`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DatasetUploadResponse {
    #[serde(default, rename = "Id")]
    pub submit_id: Option<Key>,
    #[serde(default, rename = "DatasetId")]
    pub dataset: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub errors: Option<ErrorList>,
}

/// Response of `/api/1.0/upload/status`.
///
/// Same content as [`DatasetUploadResponse`], but the endpoint uses camelCase keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetUploadStatusResponse {
    #[serde(default, rename = "id")]
    pub submit_id: Option<Key>,
    #[serde(default, rename = "datasetId")]
    pub dataset: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub errors: Option<ErrorList>,
}

impl DatasetUploadStatusResponse {
    /// Whether the service is still processing the submission.
    pub fn is_pending(&self) -> bool {
        self.status.eq_ignore_ascii_case("in progress")
            || self.status.eq_ignore_ascii_case("pending")
    }

    pub fn is_failed(&self) -> bool {
        self.status.eq_ignore_ascii_case(FAILED)
    }
}

impl From<DatasetUploadStatusResponse> for DatasetUploadResponse {
    fn from(status: DatasetUploadStatusResponse) -> Self {
        Self {
            submit_id: status.submit_id,
            dataset: status.dataset,
            status: status.status,
            errors: status.errors,
        }
    }
}

/// Response of `/api/1.0/meta/verifydataset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetVerifyResponse {
    pub status: String,
    #[serde(default)]
    pub errors: Option<ErrorList>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse;
    use crate::Error;

    #[test]
    fn post_response_defaults() {
        let resp: UploadPostResponse = parse(r#"{"Properties": {}}"#).unwrap();
        assert!(!resp.successful);
        assert!(resp.error.is_none());
        assert_eq!(resp.properties, FileProperties::default());
    }

    #[test]
    fn post_response_requires_properties() {
        let err = parse::<UploadPostResponse>(r#"{"Successful": true}"#).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn file_properties_write_lowercase_keys() {
        let props: FileProperties = parse(
            r#"{"Size": 12, "Name": "a.csv", "Location": "tmp/a.csv", "Type": "csv"}"#,
        )
        .unwrap();
        let json = serde_json::to_value(&props).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"size": 12, "name": "a.csv", "location": "tmp/a.csv", "type": "csv"})
        );
    }

    #[test]
    fn verify_response_without_details() {
        let resp: UploadVerifyResponse =
            parse(r#"{"Successful": true, "MetadataDetails": null}"#).unwrap();
        assert!(resp.successful);
        assert!(resp.metadata_details.is_none());
        assert!(resp.errors.is_none());
        assert!(resp.columns.is_none());
    }

    #[test]
    fn dataset_details_require_identity_keys() {
        let err = parse::<UploadVerifyResponse>(
            r#"{"Successful": true, "MetadataDetails": {"DatasetName": "x"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn dataset_details_accept_null_values() {
        let resp: UploadVerifyResponse = parse(
            r#"{"MetadataDetails": {"DatasetId": null, "DatasetName": null, "Source": null,
                "Description": null, "DatasetRef": null}}"#,
        )
        .unwrap();
        let details = resp.metadata_details.unwrap();
        assert!(details.dataset_name.is_none());
        assert!(details.publication_date.is_none());
    }

    #[test]
    fn submit_and_status_casings_agree() {
        let submit: DatasetUploadResponse =
            parse(r#"{"Id":"x","DatasetId":"y","Status":"ok"}"#).unwrap();
        let status: DatasetUploadStatusResponse =
            parse(r#"{"id":"x","datasetId":"y","status":"ok"}"#).unwrap();
        assert_eq!(submit.submit_id, Some(Key::from("x")));
        assert_eq!(submit.dataset.as_deref(), Some("y"));
        assert_eq!(submit.status, "ok");
        assert_eq!(DatasetUploadResponse::from(status), submit);
    }

    #[test]
    fn missing_status_means_failed() {
        let submit: DatasetUploadResponse = parse(r#"{"Id": 5}"#).unwrap();
        let status: DatasetUploadStatusResponse = parse(r#"{"id": 5}"#).unwrap();
        assert_eq!(submit.status, "failed");
        assert_eq!(status.status, "failed");
        assert!(status.is_failed());
        assert!(!status.is_pending());
    }

    #[test]
    fn casings_are_not_interchangeable() {
        let submit: DatasetUploadResponse =
            parse(r#"{"id":"x","datasetId":"y","status":"ok"}"#).unwrap();
        assert!(submit.submit_id.is_none());
        assert_eq!(submit.status, "failed");
    }

    #[test]
    fn pending_status() {
        let status: DatasetUploadStatusResponse =
            parse(r#"{"id": 5, "status": "In Progress"}"#).unwrap();
        assert!(status.is_pending());
    }

    #[test]
    fn verify_dataset_response_requires_status() {
        let err = parse::<DatasetVerifyResponse>(r#"{"errors": []}"#).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        let ok: DatasetVerifyResponse = parse(r#"{"status": "successful"}"#).unwrap();
        assert!(ok.errors.is_none());
    }
}
