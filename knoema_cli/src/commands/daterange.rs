use anyhow::Result;
use clap::Args;
use knoema_api::Client;

use crate::output::{print_date_range_table, print_json, OutputFormat};

#[derive(Args)]
pub struct DateRangeArgs {
    /// Dataset id
    pub dataset: String,
}

pub fn run(args: &DateRangeArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let range = client.get_daterange(&args.dataset)?;
    match format {
        OutputFormat::Table => print_date_range_table(&range),
        OutputFormat::Json => print_json(&range),
    }
    Ok(())
}
