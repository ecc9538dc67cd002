use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use knoema_api::types::DatasetUploadResponse;
use knoema_api::{Client, Transport};

use crate::output::{print_json, print_upload_table, OutputFormat};

#[derive(Args)]
pub struct UploadArgs {
    /// File to upload (CSV or Excel)
    pub file: PathBuf,

    /// Existing dataset to update instead of creating a new one
    #[arg(long)]
    pub dataset: Option<String>,

    /// Make the dataset public
    #[arg(long)]
    pub public: bool,

    /// Poll the upload status until processing finishes
    #[arg(long)]
    pub wait: bool,

    /// Seconds between status polls
    #[arg(long, default_value = "5")]
    pub poll_secs: u64,

    /// Give up waiting after this many status polls
    #[arg(long, default_value = "120", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_polls: u32,
}

pub fn run(args: &UploadArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    tracing::info!("Uploading {}", args.file.display());
    let mut resp = client
        .upload_dataset(&args.file, args.dataset.as_deref(), args.public)
        .with_context(|| format!("upload of {} failed", args.file.display()))?;

    if args.wait {
        resp = wait_for(
            client,
            resp,
            Duration::from_secs(args.poll_secs),
            args.max_polls,
        )?;
    }

    match format {
        OutputFormat::Table => print_upload_table(&resp),
        OutputFormat::Json => print_json(&resp),
    }

    Ok(())
}

fn wait_for<T: Transport>(
    client: &Client<T>,
    resp: DatasetUploadResponse,
    interval: Duration,
    max_polls: u32,
) -> Result<DatasetUploadResponse> {
    let Some(id) = resp.submit_id.clone() else {
        return Ok(resp);
    };
    for attempt in 1..=max_polls {
        let status = client.upload_status(id.clone())?;
        if !status.is_pending() {
            return Ok(status.into());
        }
        if attempt < max_polls {
            tracing::info!("Upload {} is {}, checking again in {:?}", id, status.status, interval);
            thread::sleep(interval);
        }
    }
    bail!("Upload {} still processing after {} status checks", id, max_polls)
}
