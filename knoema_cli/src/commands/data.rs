use anyhow::Result;
use clap::Args;
use knoema_api::types::PivotItem;
use knoema_api::{Client, PivotAxisItem, PivotRequest};

use crate::commands::parse_key;
use crate::output::{print_json, print_tuples_table, OutputFormat};

#[derive(Args)]
pub struct DataArgs {
    /// Dataset id
    pub dataset: String,

    /// Header axis selection as Dimension=member1,member2 (repeatable)
    #[arg(long, value_parser = parse_axis)]
    pub header: Vec<PivotItem>,

    /// Stub axis selection as Dimension=member1,member2 (repeatable)
    #[arg(long, value_parser = parse_axis)]
    pub stub: Vec<PivotItem>,

    /// Filter axis selection as Dimension=member1,member2 (repeatable)
    #[arg(long, value_parser = parse_axis)]
    pub filter: Vec<PivotItem>,

    /// Time selection added to the header, e.g. Time=2010-2015
    #[arg(long, value_parser = parse_axis)]
    pub time: Option<PivotItem>,

    /// Display mode for the time selection (e.g. range, allData)
    #[arg(long, requires = "time")]
    pub ui_mode: Option<String>,

    /// Frequency code: A, Q, M, ... (repeatable)
    #[arg(long)]
    pub frequency: Vec<String>,
}

/// Parses `Dimension=member1,member2`. Members may be omitted (`Dimension=`).
pub fn parse_axis(raw: &str) -> Result<PivotItem, String> {
    let (dimension, members) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected Dimension=member1,member2, got '{}'", raw))?;
    let dimension = dimension.trim();
    if dimension.is_empty() {
        return Err(format!("missing dimension in '{}'", raw));
    }
    let members = members
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(parse_key);
    Ok(PivotItem::new(dimension, members))
}

fn build_request(args: &DataArgs) -> PivotRequest {
    let mut request = PivotRequest::new(&args.dataset);
    if let Some(time) = &args.time {
        request = request.with_header(PivotAxisItem::Time {
            item: time.clone(),
            ui_mode: args.ui_mode.clone(),
        });
    }
    for item in &args.header {
        request = request.with_header(item.clone());
    }
    for item in &args.stub {
        request = request.with_stub(item.clone());
    }
    for item in &args.filter {
        request = request.with_filter(item.clone());
    }
    for frequency in &args.frequency {
        request = request.with_frequency(frequency);
    }
    request
}

pub fn run(args: &DataArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let resp = client.get_data(&build_request(args))?;

    eprintln!("{} rows from {}", resp.tuples.len(), resp.dataset);

    match format {
        OutputFormat::Table => print_tuples_table(&resp),
        OutputFormat::Json => print_json(&resp),
    }

    Ok(())
}
