mod snapshot;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "folio-cli")]
#[command(about = "Folio portfolio service command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the live portfolio snapshot from the content source and print it
    Snapshot {
        /// Content source origin
        #[arg(long, env = "FOLIO_CMS_URL", default_value = "http://localhost:1337")]
        cms_url: String,

        /// Per-request timeout in seconds
        #[arg(long, env = "FOLIO_CMS_TIMEOUT_SECS", default_value_t = 10)]
        timeout_secs: u64,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print the canned fallback snapshot served when the source is down
    Fallback {
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Snapshot {
            cms_url,
            timeout_secs,
            pretty,
        } => snapshot::run_snapshot(&cms_url, timeout_secs, pretty).await,
        Commands::Fallback { pretty } => snapshot::run_fallback(pretty),
    }
}
