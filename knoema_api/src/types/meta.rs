//! Dataset metadata: datasets, dimensions, members and date ranges.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{eq_ignore_case, nullable, Key};

/// Identity of one dataset axis.
///
/// `id` and `name` must be present but may be `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionModel {
    pub key: Key,
    #[serde(deserialize_with = "nullable")]
    pub id: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub name: Option<String>,
}

/// Dataset description returned by `/api/1.0/meta/dataset/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub id: String,
    pub dimensions: Vec<DimensionModel>,
}

impl Dataset {
    /// First dimension whose name matches, ignoring case. `None` or `""`
    /// matches a dimension without a name.
    pub fn find_dimension_by_name<'a>(
        &self,
        name: impl Into<Option<&'a str>>,
    ) -> Option<&DimensionModel> {
        let name = name.into();
        self.dimensions
            .iter()
            .find(|dim| eq_ignore_case(dim.name.as_deref(), name))
    }

    /// First dimension whose id matches, ignoring case.
    pub fn find_dimension_by_id<'a>(&self, id: impl Into<Option<&'a str>>) -> Option<&DimensionModel> {
        let id = id.into();
        self.dimensions
            .iter()
            .find(|dim| eq_ignore_case(dim.id.as_deref(), id))
    }
}

/// One coordinate along a dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionMember {
    pub key: Key,
    #[serde(deserialize_with = "nullable")]
    pub name: Option<String>,
    /// Depth of the member in the dimension hierarchy.
    pub level: i64,
    pub has_data: bool,
    /// Extra attributes such as `id`, keyed by attribute name.
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl DimensionMember {
    /// Value of the `id` attribute when it is present and not `null`.
    pub fn field_id(&self) -> Option<String> {
        match self.fields.get("id")? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// A dimension with all of its members, from
/// `/api/1.0/meta/dataset/{id}/dimension/{dim}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    #[serde(flatten)]
    pub model: DimensionModel,
    pub items: Vec<DimensionMember>,
}

impl Dimension {
    pub fn key(&self) -> &Key {
        &self.model.key
    }

    pub fn id(&self) -> Option<&str> {
        self.model.id.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.model.name.as_deref()
    }

    /// First member whose key is exactly `key`.
    pub fn find_member_by_key(&self, key: impl Into<Key>) -> Option<&DimensionMember> {
        let key = key.into();
        self.items.iter().find(|item| item.key == key)
    }

    /// First member whose `id` field matches, ignoring case. Members without
    /// an `id` field never match.
    pub fn find_member_by_id<'a>(&self, id: impl Into<Option<&'a str>>) -> Option<&DimensionMember> {
        let id = id.into();
        self.items.iter().find(|item| {
            item.fields.contains_key("id") && eq_ignore_case(item.field_id().as_deref(), id)
        })
    }

    /// First member whose name matches, ignoring case.
    pub fn find_member_by_name<'a>(
        &self,
        name: impl Into<Option<&'a str>>,
    ) -> Option<&DimensionMember> {
        let name = name.into();
        self.items
            .iter()
            .find(|item| eq_ignore_case(item.name.as_deref(), name))
    }
}

/// Time span covered by a dataset, from `/api/1.0/meta/dataset/{id}/daterange`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    #[serde(with = "utc_seconds")]
    pub start_date: NaiveDateTime,
    #[serde(with = "utc_seconds")]
    pub end_date: NaiveDateTime,
    /// Frequency codes with data, e.g. `A`, `Q`, `M`.
    pub frequencies: Vec<String>,
}

/// `YYYY-MM-DDTHH:MM:SSZ` timestamps.
mod utc_seconds {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse;
    use crate::Error;
    use chrono::NaiveDate;

    fn sample_dimension() -> Dimension {
        parse(
            r#"{
                "key": 1, "id": "country", "name": "Country",
                "items": [
                    {"key": "a", "name": "Alpha", "level": 0, "hasData": true, "fields": {"id": "A1"}},
                    {"key": "b", "name": "beta", "level": 1, "hasData": false, "fields": {}}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn member_lookup() {
        let dim = sample_dimension();
        assert_eq!(dim.find_member_by_id("a1").and_then(|m| m.name.as_deref()), Some("Alpha"));
        assert_eq!(dim.find_member_by_name("BETA").and_then(|m| m.name.as_deref()), Some("beta"));
        assert!(dim.find_member_by_key("c").is_none());
        assert_eq!(dim.find_member_by_key("b").map(|m| m.level), Some(1));
    }

    #[test]
    fn key_lookup_is_case_sensitive() {
        let dim = sample_dimension();
        assert!(dim.find_member_by_key("A").is_none());
    }

    #[test]
    fn id_lookup_skips_members_without_id_field() {
        let dim = sample_dimension();
        // Only "beta" could match an empty id, and it has no id field.
        assert!(dim.find_member_by_id("").is_none());
    }

    #[test]
    fn id_lookup_with_null_id_field() {
        let dim: Dimension = parse(
            r#"{"key": 1, "id": "d", "name": "D", "items": [
                {"key": 1, "name": "x", "level": 0, "hasData": true, "fields": {"id": null}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(dim.find_member_by_id("").and_then(|m| m.name.as_deref()), Some("x"));
        assert!(dim.find_member_by_id("x").is_none());
    }

    #[test]
    fn first_match_wins() {
        let dim: Dimension = parse(
            r#"{"key": 1, "id": "d", "name": "D", "items": [
                {"key": 1, "name": "Same", "level": 0, "hasData": true, "fields": {}},
                {"key": 2, "name": "same", "level": 0, "hasData": true, "fields": {}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(dim.find_member_by_name("SAME").map(|m| m.key.clone()), Some(Key::Int(1)));
    }

    #[test]
    fn dimension_embeds_identity() {
        let dim = sample_dimension();
        assert_eq!(dim.key(), &Key::Int(1));
        assert_eq!(dim.id(), Some("country"));
        assert_eq!(dim.name(), Some("Country"));
    }

    #[test]
    fn dataset_requires_id() {
        let err = parse::<Dataset>(r#"{"dimensions": []}"#).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn dataset_dimension_lookup() {
        let dataset: Dataset = parse(
            r#"{"id": "IMFWEO2017Apr", "dimensions": [
                {"key": 1, "id": "country", "name": "Country"},
                {"key": 2, "id": "subject", "name": "Subject"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(dataset.find_dimension_by_name("SUBJECT").and_then(|d| d.id.as_deref()), Some("subject"));
        assert_eq!(dataset.find_dimension_by_id("Country").and_then(|d| d.name.as_deref()), Some("Country"));
        assert!(dataset.find_dimension_by_id("region").is_none());
    }

    #[test]
    fn date_range_parses_utc_timestamps() {
        let range: DateRange = parse(
            r#"{"startDate": "1980-01-01T00:00:00Z", "endDate": "2022-12-31T00:00:00Z", "frequencies": ["A"]}"#,
        )
        .unwrap();
        assert_eq!(
            range.start_date,
            NaiveDate::from_ymd_opt(1980, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap()
        );
        assert_eq!(range.end_date.format("%Y-%m-%d").to_string(), "2022-12-31");
        assert_eq!(range.frequencies, vec!["A".to_string()]);
    }

    #[test]
    fn date_range_rejects_other_formats() {
        let err = parse::<DateRange>(
            r#"{"startDate": "1980-01-01", "endDate": "2022-12-31T00:00:00Z", "frequencies": []}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn null_dimension_name_is_accepted() {
        let dataset: Dataset = parse(
            r#"{"id": "ds", "dimensions": [
                {"key": 1, "id": "country", "name": null},
                {"key": 2, "id": null, "name": "Subject"}
            ]}"#,
        )
        .unwrap();
        assert!(dataset.dimensions[0].name.is_none());
        assert_eq!(dataset.find_dimension_by_id("COUNTRY").map(|d| &d.key), Some(&Key::Int(1)));
        assert_eq!(dataset.find_dimension_by_name(None).map(|d| &d.key), Some(&Key::Int(1)));
        assert_eq!(dataset.find_dimension_by_name("").map(|d| &d.key), Some(&Key::Int(1)));
        assert_eq!(dataset.find_dimension_by_id(None).map(|d| &d.key), Some(&Key::Int(2)));
        assert_eq!(dataset.find_dimension_by_name("subject").map(|d| &d.key), Some(&Key::Int(2)));
    }

    #[test]
    fn dimension_identity_keys_are_required() {
        let err = parse::<Dataset>(r#"{"id": "ds", "dimensions": [{"key": 1, "id": "country"}]}"#)
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn null_member_name_is_accepted() {
        let dim: Dimension = parse(
            r#"{"key": 1, "id": null, "name": "D", "items": [
                {"key": 1, "name": null, "level": 0, "hasData": true, "fields": {}},
                {"key": 2, "name": "Named", "level": 0, "hasData": true, "fields": {}}
            ]}"#,
        )
        .unwrap();
        assert!(dim.id().is_none());
        assert_eq!(dim.find_member_by_name(None).map(|m| m.key.clone()), Some(Key::Int(1)));
        assert_eq!(dim.find_member_by_name("named").map(|m| m.key.clone()), Some(Key::Int(2)));
        assert!(dim.find_member_by_name("other").is_none());
    }
}
