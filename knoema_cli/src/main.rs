mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use knoema_api::{Client, ClientConfig};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "knoema")]
#[command(about = "Query and upload statistical data through the Knoema API")]
struct Cli {
    /// Output format: table or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// API host (overrides KNOEMA_HOST)
    #[arg(long, global = true)]
    host: Option<String>,

    /// Application id (overrides KNOEMA_APP_ID)
    #[arg(long, global = true)]
    app_id: Option<String>,

    /// Application secret (overrides KNOEMA_APP_SECRET)
    #[arg(long, global = true)]
    app_secret: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a dataset and its dimensions
    Dataset(commands::dataset::DatasetArgs),
    /// List or look up members of a dimension
    Dimension(commands::dimension::DimensionArgs),
    /// Show the date range and frequencies of a dataset
    Daterange(commands::daterange::DateRangeArgs),
    /// Query data with a pivot selection
    Data(commands::data::DataArgs),
    /// Upload a file as a new or existing dataset
    Upload(commands::upload::UploadArgs),
    /// Check the status of a submitted upload
    Status(commands::status::StatusArgs),
    /// Verify dataset metadata
    Verify(commands::verify::VerifyArgs),
}

fn build_config(cli: &Cli) -> ClientConfig {
    let mut config = ClientConfig::from_env();
    if let Some(host) = &cli.host {
        config = config.with_host(host);
    }
    if let Some(app_id) = &cli.app_id {
        config.app_id = Some(app_id.clone());
    }
    if let Some(app_secret) = &cli.app_secret {
        config.app_secret = Some(app_secret.clone());
    }
    config
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("knoema=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Table,
    };

    let config = build_config(&cli);
    tracing::debug!("Using {:?}", config);
    let client = Client::from_config(&config)?;

    match &cli.command {
        Commands::Dataset(args) => commands::dataset::run(args, &client, &format)?,
        Commands::Dimension(args) => commands::dimension::run(args, &client, &format)?,
        Commands::Daterange(args) => commands::daterange::run(args, &client, &format)?,
        Commands::Data(args) => commands::data::run(args, &client, &format)?,
        Commands::Upload(args) => commands::upload::run(args, &client, &format)?,
        Commands::Status(args) => commands::status::run(args, &client, &format)?,
        Commands::Verify(args) => commands::verify::run(args, &client, &format)?,
    }

    Ok(())
}
