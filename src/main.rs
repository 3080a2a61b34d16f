use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use agent_chat_widget::agent::{AgentConfig, DEFAULT_AGENT_ENDPOINT};
use agent_chat_widget::{ChatWidget, KeyOutcome, KeyPress, WidgetConfig};

#[derive(Debug, thiserror::Error)]
enum HostError {
    #[error("config error: {0}")]
    Config(#[from] agent_chat_widget::agent::ConfigError),
    #[error("agent client error: {0}")]
    Agent(#[from] agent_chat_widget::AgentError),
    #[error("stdin read failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "agent-chat", about = "Terminal host for the agent chat widget")]
struct Cli {
    /// Agent server address; overrides AGENT_BASE_URL for this widget.
    #[arg(long)]
    base_url: Option<String>,

    #[arg(long, env = "AGENT_ENDPOINT", default_value = DEFAULT_AGENT_ENDPOINT)]
    agent: String,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    subtitle: Option<String>,

    /// Start with the widget closed.
    #[arg(long)]
    closed: bool,

    /// Show a toggle button instead of the panel while closed.
    #[arg(long)]
    toggle_button: bool,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("agent-chat: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), HostError> {
    let agent_config = AgentConfig::from_env()?;

    let mut config = WidgetConfig::default()
        .with_agent_endpoint(cli.agent)
        .with_initially_open(!cli.closed)
        .with_toggle_button(cli.toggle_button);
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(agent_chat_widget::agent::config::validate_base_url(&base_url)?);
    }
    if cli.title.is_some() || cli.subtitle.is_some() {
        let title = cli.title.unwrap_or_else(|| config.title.clone());
        let subtitle = cli.subtitle.unwrap_or_else(|| config.subtitle.clone());
        config = config.with_title(title, subtitle);
    }

    let widget = ChatWidget::new(config, &agent_config)?;
    tracing::info!(instance = %widget.id(), "agent-chat: ready, type /toggle or /quit");
    print!("{}", widget.render());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "/quit" => break,
            "/toggle" => {
                widget.toggle_visibility();
            }
            _ => {
                widget.set_input(&line);
                let widget = widget.clone();
                tokio::spawn(async move {
                    match widget.key_press(KeyPress::Enter { shift: false }).await {
                        KeyOutcome::Submitted(Ok(_)) => print!("{}", widget.render()),
                        KeyOutcome::Submitted(Err(reason)) => {
                            tracing::debug!(%reason, "agent-chat: submission dropped");
                        }
                        KeyOutcome::Edited | KeyOutcome::Ignored => {}
                    }
                });
                continue;
            }
        }
        print!("{}", widget.render());
    }

    widget.teardown();
    Ok(())
}
