use knoema_api::types::{
    DateRange, Dataset, DatasetUploadResponse, DatasetVerifyResponse, DimensionMember, ErrorList,
    PivotResponse,
};
use tabled::builder::Builder;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled)]
struct DimensionRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

#[derive(Tabled)]
struct MemberRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Level")]
    level: i64,
    #[tabled(rename = "Has Data")]
    has_data: bool,
}

#[derive(Tabled)]
struct DateRangeRow {
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
    #[tabled(rename = "Frequencies")]
    frequencies: String,
}

#[derive(Tabled)]
struct UploadRow {
    #[tabled(rename = "Submit Id")]
    submit_id: String,
    #[tabled(rename = "Dataset")]
    dataset: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Errors")]
    errors: String,
}

// -- Row builders --

fn build_dimension_rows(dataset: &Dataset) -> Vec<DimensionRow> {
    dataset
        .dimensions
        .iter()
        .map(|d| DimensionRow {
            key: d.key.to_string(),
            id: d.id.clone().unwrap_or_default(),
            name: d.name.clone().unwrap_or_default(),
        })
        .collect()
}

fn build_member_rows(members: &[&DimensionMember]) -> Vec<MemberRow> {
    members
        .iter()
        .map(|m| MemberRow {
            key: m.key.to_string(),
            id: m.field_id().unwrap_or_default(),
            name: m.name.clone().unwrap_or_default(),
            level: m.level,
            has_data: m.has_data,
        })
        .collect()
}

fn build_date_range_row(range: &DateRange) -> DateRangeRow {
    DateRangeRow {
        start: range.start_date.date().to_string(),
        end: range.end_date.date().to_string(),
        frequencies: range.frequencies.join(", "),
    }
}

fn build_upload_row(resp: &DatasetUploadResponse) -> UploadRow {
    UploadRow {
        submit_id: resp
            .submit_id
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        dataset: resp.dataset.clone().unwrap_or_default(),
        status: resp.status.clone(),
        errors: format_errors(resp.errors.as_ref()),
    }
}

/// Lays the data tuples out as a table, one column per attribute in order of
/// first appearance.
fn build_tuple_table(resp: &PivotResponse) -> Table {
    let mut columns: Vec<String> = Vec::new();
    for tuple in &resp.tuples {
        if let Some(obj) = tuple.as_object() {
            for name in obj.keys() {
                if !columns.contains(name) {
                    columns.push(name.clone());
                }
            }
        }
    }

    let mut builder = Builder::default();
    builder.push_record(columns.clone());
    for tuple in &resp.tuples {
        builder.push_record(columns.iter().map(|c| format_cell(tuple.get(c))));
    }
    builder.build()
}

// -- Printers --

pub fn print_dimensions_table(dataset: &Dataset) {
    println!("{}", Table::new(build_dimension_rows(dataset)));
}

pub fn print_members_table(members: &[&DimensionMember]) {
    println!("{}", Table::new(build_member_rows(members)));
}

pub fn print_date_range_table(range: &DateRange) {
    println!("{}", Table::new([build_date_range_row(range)]));
}

pub fn print_tuples_table(resp: &PivotResponse) {
    if resp.tuples.is_empty() {
        eprintln!("No data");
        return;
    }
    println!("{}", build_tuple_table(resp));
}

pub fn print_upload_table(resp: &DatasetUploadResponse) {
    println!("{}", Table::new([build_upload_row(resp)]));
}

pub fn print_verify_result(resp: &DatasetVerifyResponse) {
    println!("Status: {}", resp.status);
    if resp.errors.is_some() {
        println!("Errors: {}", format_errors(resp.errors.as_ref()));
    }
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn format_cell(value: Option<&serde_json::Value>) -> String {
    match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn format_errors(errors: Option<&ErrorList>) -> String {
    errors
        .map(|list| {
            list.iter()
                .map(|e| format_cell(Some(e)))
                .collect::<Vec<_>>()
                .join("; ")
        })
        .unwrap_or_default()
}
