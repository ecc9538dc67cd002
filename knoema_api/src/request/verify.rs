//! Dataset verification request body.

use chrono::NaiveDate;
use serde::Serialize;

use super::common::JsonRequest;

/// Body of `/api/1.0/meta/verifydataset`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetVerifyRequest {
    #[serde(rename = "id")]
    pub dataset: String,
    #[serde(rename = "publicationDate", serialize_with = "iso_date")]
    pub publication_date: NaiveDate,
    pub source: String,
    #[serde(rename = "refUrl")]
    pub reference_url: String,
}

impl JsonRequest for DatasetVerifyRequest {}

impl DatasetVerifyRequest {
    pub fn new(dataset: &str, publication_date: NaiveDate, source: &str, reference_url: &str) -> Self {
        Self {
            dataset: dataset.to_string(),
            publication_date,
            source: source.to_string(),
            reference_url: reference_url.to_string(),
        }
    }
}

fn iso_date<S: serde::Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format("%Y-%m-%d"))
}
