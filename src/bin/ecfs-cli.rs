use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use ecfs_comment::config::{BackoffConfig, Credentials, ObservabilityConfig};
use ecfs_comment::ecfs::{
    Address, AddressEntity, EcfsClient, EcfsFiling, FilingInfo, InternationalAddress,
};
use ecfs_comment::observability::logging;
use ecfs_comment::Backoff;

#[derive(Parser)]
#[command(name = "ecfs-cli")]
#[command(about = "Look up FCC proceedings and file express comments", long_about = None)]
struct Cli {
    /// JSON file holding the API key
    #[arg(short, long, default_value = "conf.json")]
    credentials: PathBuf,

    #[arg(long, default_value = "https://publicapi.fcc.gov/ecfs/")]
    base_url: String,

    /// Give up once the retry delay would exceed this
    #[arg(long, default_value_t = 10_000)]
    max_delay_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a proceeding record
    Proceeding {
        /// Docket number, e.g. 17-108
        name: String,
    },
    /// File an express comment
    File(FileArgs),
}

#[derive(Args)]
struct FileArgs {
    /// Docket to file on (repeatable; defaults to 17-108)
    #[arg(long = "proceeding")]
    proceedings: Vec<String>,

    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long, required_unless_present = "international")]
    address: Option<String>,

    #[arg(long)]
    address2: Option<String>,

    #[arg(long, required_unless_present = "international")]
    city: Option<String>,

    #[arg(long, required_unless_present = "international")]
    state: Option<String>,

    #[arg(long, required_unless_present = "international")]
    zip: Option<String>,

    #[arg(long)]
    zip4: Option<String>,

    /// Free-form address for filers outside the US
    #[arg(long, conflicts_with_all = ["address", "address2", "city", "state", "zip", "zip4"])]
    international: Option<String>,

    #[arg(long)]
    comment: String,
}

impl FileArgs {
    fn filing_info(&self) -> FilingInfo {
        let address = match &self.international {
            Some(text) => AddressEntity::International(InternationalAddress { text: text.clone() }),
            None => AddressEntity::Postal(Address {
                line1: self.address.clone().unwrap_or_default(),
                line2: self.address2.clone(),
                city: self.city.clone().unwrap_or_default(),
                state: self.state.clone().unwrap_or_default().to_ascii_uppercase(),
                zip: self.zip.clone().unwrap_or_default(),
                zip4: self.zip4.clone().unwrap_or_default(),
            }),
        };

        FilingInfo {
            name: self.name.clone(),
            email: self.email.clone(),
            address,
            text: self.comment.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_tracing(&ObservabilityConfig::default());

    let credentials = Credentials::load(&cli.credentials)?;
    let client = EcfsClient::new(&cli.base_url, credentials)?;

    // One driver for the whole run, so delays keep growing across steps.
    let mut backoff = Backoff::from_config(&BackoffConfig {
        max_delay_ms: cli.max_delay_ms,
        ..BackoffConfig::default()
    });

    match cli.command {
        Commands::Proceeding { name } => {
            let proceeding = backoff.run(|| client.proceeding(&name)).await?;
            println!("{}", serde_json::to_string_pretty(&proceeding)?);
        }
        Commands::File(args) => {
            let names = if args.proceedings.is_empty() {
                vec!["17-108".to_string()]
            } else {
                args.proceedings.clone()
            };

            let mut proceedings = Vec::with_capacity(names.len());
            for name in &names {
                tracing::info!(name = %name, "Retrieving proceeding");
                proceedings.push(backoff.run(|| client.proceeding(name)).await?);
            }

            let filing = EcfsFiling::build(args.filing_info(), proceedings)?;
            tracing::info!("Submitting filing");
            let confirmation = backoff.run(|| client.submit(&filing)).await?;
            println!("Submission successful: {confirmation}");
        }
    }

    Ok(())
}
