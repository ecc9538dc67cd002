use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use knoema_api::{Client, DatasetVerifyRequest};

use crate::output::{print_json, print_verify_result, OutputFormat};

#[derive(Args)]
pub struct VerifyArgs {
    /// Dataset id
    pub dataset: String,

    /// Publication date (YYYY-MM-DD)
    #[arg(long)]
    pub publication_date: NaiveDate,

    /// Data source
    #[arg(long)]
    pub source: String,

    /// Reference URL for the source
    #[arg(long)]
    pub ref_url: String,
}

pub fn run(args: &VerifyArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let request = DatasetVerifyRequest::new(
        &args.dataset,
        args.publication_date,
        &args.source,
        &args.ref_url,
    );
    let resp = client.verify_dataset(&request)?;
    match format {
        OutputFormat::Table => print_verify_result(&resp),
        OutputFormat::Json => print_json(&resp),
    }
    Ok(())
}
