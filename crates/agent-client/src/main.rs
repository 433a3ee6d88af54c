//! Test client for the Investment Strategy Agent
//!
//! Fetches the agent card and streams the agent's answer to one query, or
//! reads queries from stdin until `quit`.

mod client;
mod sse;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::client::{AgentClient, is_connect_error};

const DEFAULT_URL: &str = "http://localhost:8000/";
const RULE_WIDTH: usize = 70;

#[derive(Debug, Parser)]
#[command(
    name = "investment-client",
    about = "Test client for the Investment Strategy Agent",
    after_help = "Examples:\n  investment-client --query \"How should I diversify?\"\n  investment-client --url http://localhost:9000/"
)]
struct Cli {
    #[arg(long, default_value = DEFAULT_URL, help = "URL of the investment agent server")]
    url: String,

    #[arg(long, help = "Single query to send. If not provided, runs in interactive mode")]
    query: Option<String>,

    #[arg(long, help = "Run in interactive mode (default if no --query provided)")]
    interactive: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match single_query(&cli) {
        Some(query) => run_query(&cli.url, query).await,
        None => run_interactive(&cli.url).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if is_connect_error(&err) {
                println!("✗ Error: Could not connect to agent at {}", cli.url);
                println!("  Make sure the agent server is running.");
                println!("  Start it with: cargo run -p agent-server");
            } else {
                println!("✗ Error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

/// The query to run once; `--query` takes precedence over `--interactive`
fn single_query(cli: &Cli) -> Option<&str> {
    let query = cli.query.as_deref()?;
    if cli.interactive {
        tracing::warn!("--query given, running it once instead of starting interactive mode");
    }
    Some(query)
}

fn rule(ch: char) -> String {
    std::iter::repeat_n(ch, RULE_WIDTH).collect()
}

/// Send one query and print the streamed answer
async fn run_query(agent_url: &str, query: &str) -> anyhow::Result<()> {
    println!("\n{}", rule('='));
    println!("Testing Investment Agent");
    println!("Agent URL: {agent_url}");
    println!("Query: {query}");
    println!("{}\n", rule('='));

    let client = AgentClient::new(agent_url)?;

    println!("Fetching agent card...");
    let card = client.get_agent_card().await?;
    println!("✓ Connected to: {}", card.name);
    println!("  Description: {}", card.description);
    println!("  Version: {}", card.version);
    println!("\n  Available Skills:");
    for skill in &card.skills {
        println!("    - {}: {}", skill.name, skill.description);
    }
    println!();

    println!("Sending query to agent...\n");
    println!("Response:");
    println!("{}", rule('-'));

    let full_response = client
        .stream_message(query, |text| {
            print!("{text}");
            let _ = std::io::stdout().flush();
        })
        .await?;
    tracing::debug!(chars = full_response.len(), "Response complete");

    println!("\n{}\n", rule('-'));
    println!("✓ Query completed successfully");
    Ok(())
}

fn is_exit_command(input: &str) -> bool {
    matches!(input.to_lowercase().as_str(), "quit" | "exit" | "q")
}

/// Read queries from stdin until an exit command or end of input
async fn run_interactive(agent_url: &str) -> anyhow::Result<()> {
    println!("Investment Strategy Agent - Interactive Client");
    println!("{}", rule('='));
    println!("Connected to: {agent_url}");
    println!("Type 'quit' or 'exit' to end the session");
    println!("{}", rule('='));
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("Your question: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let query = line.trim();

        if is_exit_command(query) {
            println!("\nGoodbye!");
            break;
        }
        if query.is_empty() {
            continue;
        }

        run_query(agent_url, query).await?;
    }
    Ok(())
}
