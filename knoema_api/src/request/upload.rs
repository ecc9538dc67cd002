//! Upload lifecycle requests: verify and status queries, and the dataset
//! submit body built from the post and verify results.

use serde::Serialize;
use url::Url;

use crate::types::{FileProperties, Key, UploadPostResponse, UploadVerifyResponse};

use super::common::{JsonRequest, Query};

/// Name given to a dataset when the verify step detected none.
pub const DEFAULT_DATASET_NAME: &str = "New dataset";

/// Query for `/api/1.0/upload/verify`.
pub struct UploadVerifyQuery {
    /// Server-side location returned by the post step.
    pub file_path: String,
    /// Existing dataset the file should update, if any.
    pub dataset: Option<String>,
}

impl UploadVerifyQuery {
    pub fn new(file_path: &str) -> Self {
        Self {
            file_path: file_path.to_string(),
            dataset: None,
        }
    }

    pub fn with_dataset(mut self, dataset: &str) -> Self {
        self.dataset = Some(dataset.to_string());
        self
    }
}

impl Query for UploadVerifyQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("filePath", &self.file_path);
        if let Some(dataset) = self.dataset.as_deref().filter(|d| !d.is_empty()) {
            url.query_pairs_mut().append_pair("datasetId", dataset);
        }
        url
    }
}

/// Query for `/api/1.0/upload/status`.
pub struct UploadStatusQuery {
    pub id: Key,
}

impl UploadStatusQuery {
    pub fn new(id: impl Into<Key>) -> Self {
        Self { id: id.into() }
    }
}

impl Query for UploadStatusQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("id", &self.id.to_string());
        url
    }
}

/// Body of `/api/1.0/upload/save`, committing an uploaded file as a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetUpload {
    #[serde(rename = "DatasetId")]
    pub dataset: Option<String>,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Source")]
    pub source: Option<String>,
    #[serde(rename = "PubDate")]
    pub publication_date: Option<String>,
    #[serde(rename = "AccessedOn")]
    pub accessed_on: Option<String>,
    #[serde(rename = "Url")]
    pub dataset_ref: Option<String>,
    #[serde(rename = "UploadFormatType")]
    pub upload_format_type: Option<serde_json::Value>,
    #[serde(rename = "Columns")]
    pub columns: Option<serde_json::Value>,
    #[serde(rename = "FileProperty")]
    pub file_property: FileProperties,
    #[serde(rename = "FlatDSUpdateOptions")]
    pub flat_ds_update_options: Option<serde_json::Value>,
    #[serde(rename = "Public")]
    pub public: bool,
}

impl JsonRequest for DatasetUpload {}

impl DatasetUpload {
    /// Merges the verify and post results into a submit request.
    ///
    /// Without detected metadata the name is [`DEFAULT_DATASET_NAME`] and the
    /// descriptive fields are `None`.
    pub fn from_results(
        verify: &UploadVerifyResponse,
        upload: &UploadPostResponse,
        dataset: Option<&str>,
        public: bool,
    ) -> Self {
        let details = verify.metadata_details.as_ref();
        let name = details
            .and_then(|d| d.dataset_name.as_deref())
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_DATASET_NAME)
            .to_string();

        Self {
            dataset: dataset.map(str::to_string),
            name,
            description: details.and_then(|d| d.description.clone()),
            source: details.and_then(|d| d.source.clone()),
            publication_date: details.and_then(|d| d.publication_date.clone()),
            accessed_on: details.and_then(|d| d.accessed_on.clone()),
            dataset_ref: details.and_then(|d| d.dataset_ref.clone()),
            upload_format_type: verify.upload_format_type.clone(),
            columns: verify.columns.clone(),
            file_property: upload.properties.clone(),
            flat_ds_update_options: verify.flat_ds_update_options.clone(),
            public,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse;
    use serde_json::json;

    fn post_response() -> UploadPostResponse {
        parse(
            r#"{"Successful": true, "Properties": {"Size": 20, "Name": "gdp.csv",
                "Location": "uploads/gdp.csv", "Type": "csv"}}"#,
        )
        .unwrap()
    }

    #[test]
    fn name_defaults_without_details() {
        let verify: UploadVerifyResponse =
            parse(r#"{"Successful": true, "MetadataDetails": null}"#).unwrap();
        let upload = DatasetUpload::from_results(&verify, &post_response(), None, false);
        assert_eq!(upload.name, "New dataset");
        assert!(upload.description.is_none());
        assert!(upload.source.is_none());
        assert!(upload.publication_date.is_none());
        assert!(upload.accessed_on.is_none());
        assert!(upload.dataset_ref.is_none());
    }

    #[test]
    fn name_defaults_when_detail_name_is_empty() {
        let verify: UploadVerifyResponse = parse(
            r#"{"MetadataDetails": {"DatasetId": null, "DatasetName": "", "Source": "IMF",
                "Description": null, "DatasetRef": null}}"#,
        )
        .unwrap();
        let upload = DatasetUpload::from_results(&verify, &post_response(), None, false);
        assert_eq!(upload.name, DEFAULT_DATASET_NAME);
        assert_eq!(upload.source.as_deref(), Some("IMF"));
    }

    #[test]
    fn details_flow_into_submit_body() {
        let verify: UploadVerifyResponse = parse(
            r#"{"Successful": true, "UploadFormatType": "Flat", "Columns": [{"Name": "Country"}],
                "FlatDSUpdateOptions": {"Mode": "replace"},
                "MetadataDetails": {"DatasetId": "abc", "DatasetName": "GDP", "Source": "IMF",
                    "Description": "World GDP", "DatasetRef": "http://imf.org",
                    "PublicationDate": "2024-01-01", "AccessedOn": "2024-02-01"}}"#,
        )
        .unwrap();
        let upload = DatasetUpload::from_results(&verify, &post_response(), Some("abc"), true);
        let value: serde_json::Value = serde_json::from_str(&upload.to_json().unwrap()).unwrap();

        assert_eq!(
            value,
            json!({
                "DatasetId": "abc",
                "Name": "GDP",
                "Description": "World GDP",
                "Source": "IMF",
                "PubDate": "2024-01-01",
                "AccessedOn": "2024-02-01",
                "Url": "http://imf.org",
                "UploadFormatType": "Flat",
                "Columns": [{"Name": "Country"}],
                "FileProperty": {"size": 20, "name": "gdp.csv", "location": "uploads/gdp.csv", "type": "csv"},
                "FlatDSUpdateOptions": {"Mode": "replace"},
                "Public": true
            })
        );
    }

    #[test]
    fn verify_query_encodes_parameters() {
        let base = Url::parse("http://knoema.com/api/1.0/upload/verify").unwrap();
        let url = UploadVerifyQuery::new("uploads/my file.csv").add_to_url(&base);
        assert_eq!(url.query(), Some("filePath=uploads%2Fmy+file.csv"));

        let url = UploadVerifyQuery::new("f.csv")
            .with_dataset("abc")
            .add_to_url(&base);
        assert_eq!(url.query(), Some("filePath=f.csv&datasetId=abc"));
    }

    #[test]
    fn verify_query_skips_empty_dataset() {
        let base = Url::parse("http://knoema.com/api/1.0/upload/verify").unwrap();
        let url = UploadVerifyQuery::new("f.csv")
            .with_dataset("")
            .add_to_url(&base);
        assert_eq!(url.query(), Some("filePath=f.csv"));
    }

    #[test]
    fn status_query_accepts_numeric_ids() {
        let base = Url::parse("http://knoema.com/api/1.0/upload/status").unwrap();
        let url = UploadStatusQuery::new(42i64).add_to_url(&base);
        assert_eq!(url.query(), Some("id=42"));
    }
}
