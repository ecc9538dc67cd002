use anyhow::Result;
use clap::Args;
use knoema_api::types::DatasetUploadResponse;
use knoema_api::Client;

use crate::commands::parse_key;
use crate::output::{print_json, print_upload_table, OutputFormat};

#[derive(Args)]
pub struct StatusArgs {
    /// Submit id returned by `upload`
    pub id: String,
}

pub fn run(args: &StatusArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let status = client.upload_status(parse_key(&args.id))?;
    match format {
        OutputFormat::Table => print_upload_table(&DatasetUploadResponse::from(status)),
        OutputFormat::Json => print_json(&status),
    }
    Ok(())
}
