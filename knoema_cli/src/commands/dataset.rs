use anyhow::Result;
use clap::Args;
use knoema_api::Client;

use crate::output::{print_dimensions_table, print_json, OutputFormat};

#[derive(Args)]
pub struct DatasetArgs {
    /// Dataset id (e.g. IMFWEO2017Apr)
    pub dataset: String,
}

pub fn run(args: &DatasetArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let dataset = client.get_dataset(&args.dataset)?;

    eprintln!("{} ({} dimensions)", dataset.id, dataset.dimensions.len());

    match format {
        OutputFormat::Table => print_dimensions_table(&dataset),
        OutputFormat::Json => print_json(&dataset),
    }

    Ok(())
}
