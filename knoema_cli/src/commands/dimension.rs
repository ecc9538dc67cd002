use anyhow::{bail, Result};
use clap::Args;
use knoema_api::Client;

use crate::commands::parse_key;
use crate::output::{print_json, print_members_table, OutputFormat};

#[derive(Args)]
pub struct DimensionArgs {
    /// Dataset id
    pub dataset: String,

    /// Dimension id (e.g. country)
    pub dimension: String,

    /// Show only the member with this key
    #[arg(long, conflicts_with_all = ["find_id", "find_name"])]
    pub find_key: Option<String>,

    /// Show only the member whose id field matches (case-insensitive)
    #[arg(long, conflicts_with = "find_name")]
    pub find_id: Option<String>,

    /// Show only the member whose name matches (case-insensitive)
    #[arg(long)]
    pub find_name: Option<String>,
}

pub fn run(args: &DimensionArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let dim = client.get_dimension(&args.dataset, &args.dimension)?;

    let found = if let Some(key) = &args.find_key {
        Some(("key", key, dim.find_member_by_key(parse_key(key))))
    } else if let Some(id) = &args.find_id {
        Some(("id", id, dim.find_member_by_id(id.as_str())))
    } else {
        args.find_name
            .as_ref()
            .map(|name| ("name", name, dim.find_member_by_name(name.as_str())))
    };

    let members = match found {
        Some((_, _, Some(member))) => vec![member],
        Some((field, value, None)) => {
            bail!(
                "No member with {} '{}' in dimension {}",
                field,
                value,
                dim.id().unwrap_or(&args.dimension)
            )
        }
        None => {
            eprintln!(
                "{}: {} members",
                dim.name().unwrap_or(&args.dimension),
                dim.items.len()
            );
            dim.items.iter().collect()
        }
    };

    match format {
        OutputFormat::Table => print_members_table(&members),
        OutputFormat::Json => print_json(&members),
    }

    Ok(())
}
