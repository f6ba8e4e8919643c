mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use notebook::config::NotebookConfig;
use notebook::menu::{run_menu, MenuVariant};
use notebook::rpc::client::RpcClient;

#[derive(Parser)]
#[command(name = "notebook", version, about = "Topic notebook server and client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the notebook server (JSON-RPC at /rpc, MCP at /mcp)
    Serve,
    /// Run the interactive menu client against a running server
    Client {
        /// Offer Wikipedia lookup instead of retrieval by topic
        #[arg(long)]
        lookup: bool,
    },
    /// Print the notes of one topic straight from the document
    Show {
        /// Exact topic name
        topic: String,
    },
    /// Print document statistics
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for log level)
    let config = NotebookConfig::load()?;

    // Log to stderr so stdout stays clean for the menu and CLI output.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve => {
            notebook::server::serve(config).await?;
        }
        Command::Client { lookup } => {
            let variant = if lookup {
                MenuVariant::Lookup
            } else {
                MenuVariant::Plain
            };
            let client = RpcClient::new(config.rpc_url());
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut output = std::io::stdout();
            run_menu(&client, variant, &mut input, &mut output).await?;
        }
        Command::Show { topic } => cli::show::show(&config, &topic, &mut std::io::stdout())?,
        Command::Stats => cli::stats::stats(&config, &mut std::io::stdout())?,
    }

    Ok(())
}
