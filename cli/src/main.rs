use agent::handlers::{get_agent_messages, get_next_agent, process_agent};
use agent::{ChainWalker, HandlerResponse};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::Config;
use graph::{seed_demo_chain, Neo4jStore};
use providers::Provider;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str =
    "chainwalk=info,agent=info,graph=info,providers=info,config=info,warn";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a chainwalk.yml, instead of searching the working directory and ~/.config
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Walk the chain starting at an agent and print the final response
    Walk {
        /// Element id of the first agent
        #[arg(required = true)]
        node_id: String,

        /// Response to carry into the first agent's prompt
        #[arg(long, default_value = "")]
        prev: String,
    },

    /// Fetch one agent's instructions (event: {"node_id"})
    Messages {
        /// JSON event; read from stdin when omitted
        #[arg(short, long)]
        event: Option<String>,
    },

    /// Find the agent after a given one (event: {"node_id"})
    Next {
        /// JSON event; read from stdin when omitted
        #[arg(short, long)]
        event: Option<String>,
    },

    /// Run a single agent step (event: {"node_id", "agent_data", "prev_response"})
    Invoke {
        /// JSON event; read from stdin when omitted
        #[arg(short, long)]
        event: Option<String>,
    },

    /// Replace the graph with the three-agent demo chain
    Seed,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = config::load_config(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Walk { node_id, prev } => walk(&config, &node_id, &prev).await,
        Commands::Messages { event } => {
            let event = read_event(event)?;
            let response = match Neo4jStore::connect(&config.graph) {
                Ok(store) => {
                    let response = get_agent_messages(&store, &event).await;
                    store.close();
                    response
                }
                Err(e) => HandlerResponse::configuration_failure(&e),
            };
            print_response(&response)
        }
        Commands::Next { event } => {
            let event = read_event(event)?;
            let response = match Neo4jStore::connect(&config.graph) {
                Ok(store) => {
                    let response = get_next_agent(&store, &event).await;
                    store.close();
                    response
                }
                Err(e) => HandlerResponse::configuration_failure(&e),
            };
            print_response(&response)
        }
        Commands::Invoke { event } => {
            let event = read_event(event)?;
            let response = match Provider::try_from(&config) {
                Ok(provider) => process_agent(&provider, &event).await,
                Err(e) => HandlerResponse::configuration_failure(&e),
            };
            print_response(&response)
        }
        Commands::Seed => seed(&config).await,
    }
}

async fn walk(config: &Config, node_id: &str, prev: &str) -> Result<ExitCode> {
    let provider = Provider::try_from(config)?;
    let store = Neo4jStore::connect(&config.graph)?;
    info!(provider = %provider.provider_type(), node_id, "Starting chain walk");

    let walker = ChainWalker::new(store, provider).with_max_hops(config.walk.max_hops);
    let result = walker.walk(node_id, prev).await;

    let (store, _) = walker.into_parts();
    store.close();

    println!("{}", result?);
    Ok(ExitCode::SUCCESS)
}

async fn seed(config: &Config) -> Result<ExitCode> {
    let store = Neo4jStore::connect(&config.graph)?;
    let result = seed_demo_chain(&store).await;
    store.close();

    match result? {
        Some(start_agent_id) => {
            println!("{}", start_agent_id);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("Demo chain created but no start agent id was returned");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn read_event(event: Option<String>) -> Result<serde_json::Value> {
    let raw = match event {
        Some(raw) => raw,
        None => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read event from stdin")?;
            raw
        }
    };
    serde_json::from_str(&raw).context("Event is not valid JSON")
}

fn print_response(response: &HandlerResponse) -> Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(if response.status_code == 200 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
