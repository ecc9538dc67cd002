//! Pivot data request body for `/api/1.0/data/pivot/`.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::types::{Key, PivotItem};

use super::common::JsonRequest;

/// One axis selection in a pivot request.
///
/// Only the time axis carries a UI display mode, and only `Time` items write
/// the `UiMode` key (as `null` when no mode is set).
#[derive(Debug, Clone, PartialEq)]
pub enum PivotAxisItem {
    Plain(PivotItem),
    Time {
        item: PivotItem,
        ui_mode: Option<String>,
    },
}

impl PivotAxisItem {
    pub fn plain(dimension_id: &str, members: impl IntoIterator<Item = impl Into<Key>>) -> Self {
        PivotAxisItem::Plain(PivotItem::new(dimension_id, members))
    }

    pub fn time(
        dimension_id: &str,
        members: impl IntoIterator<Item = impl Into<Key>>,
        ui_mode: Option<&str>,
    ) -> Self {
        PivotAxisItem::Time {
            item: PivotItem::new(dimension_id, members),
            ui_mode: ui_mode.map(str::to_string),
        }
    }

    /// The dimension and member selection, whatever the variant.
    pub fn item(&self) -> &PivotItem {
        match self {
            PivotAxisItem::Plain(item) => item,
            PivotAxisItem::Time { item, .. } => item,
        }
    }

    pub fn is_time(&self) -> bool {
        matches!(self, PivotAxisItem::Time { .. })
    }
}

impl From<PivotItem> for PivotAxisItem {
    fn from(item: PivotItem) -> Self {
        PivotAxisItem::Plain(item)
    }
}

impl Serialize for PivotAxisItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let item = self.item();
        let len = if self.is_time() { 3 } else { 2 };
        let mut state = serializer.serialize_struct("PivotItem", len)?;
        state.serialize_field("DimensionId", &item.dimension_id)?;
        state.serialize_field("Members", &item.members)?;
        if let PivotAxisItem::Time { ui_mode, .. } = self {
            state.serialize_field("UiMode", ui_mode)?;
        }
        state.end()
    }
}

/// Tabular data query shaped by header, stub and filter axes.
///
/// Empty axes are sent as `[]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PivotRequest {
    pub dataset: String,
    pub header: Vec<PivotAxisItem>,
    pub filter: Vec<PivotAxisItem>,
    pub stub: Vec<PivotAxisItem>,
    pub frequencies: Vec<String>,
}

impl JsonRequest for PivotRequest {}

impl PivotRequest {
    pub fn new(dataset: &str) -> Self {
        Self {
            dataset: dataset.to_string(),
            header: Vec::new(),
            filter: Vec::new(),
            stub: Vec::new(),
            frequencies: Vec::new(),
        }
    }

    pub fn with_header(mut self, item: impl Into<PivotAxisItem>) -> Self {
        self.header.push(item.into());
        self
    }

    pub fn with_stub(mut self, item: impl Into<PivotAxisItem>) -> Self {
        self.stub.push(item.into());
        self
    }

    pub fn with_filter(mut self, item: impl Into<PivotAxisItem>) -> Self {
        self.filter.push(item.into());
        self
    }

    /// Adds a frequency code such as `A`, `Q` or `M`.
    pub fn with_frequency(mut self, frequency: &str) -> Self {
        self.frequencies.push(frequency.to_string());
        self
    }
}
