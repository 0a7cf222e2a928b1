use anyhow::Result;
use chat_build_notifier::chat;
use chat_build_notifier::card::Message;
use chat_build_notifier::config::{self, Config, Severity};
use chat_build_notifier::notify::{self, Action, NotifyContent, DEFAULT_ACTION_LABEL};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "chat-build-notifier")]
#[command(about = "Send a build notification card to a chat webhook", long_about = None)]
struct Cli {
    /// The MESSAGE to send via webhook
    #[arg(long, default_value = "")]
    message: String,

    /// The TYPE of the message to send: [yes, info, error, warning]
    #[arg(long = "type", default_value = "info")]
    message_type: String,

    /// The webhook URL to send the message to, falls back to CHAT_WEBHOOK
    #[arg(long)]
    webhook: Option<String>,

    /// An optional link URL for the user to click
    #[arg(long)]
    link: Option<String>,

    /// The action link NAME
    #[arg(long = "link-name", default_value = DEFAULT_ACTION_LABEL)]
    link_name: String,

    /// JSON5 file overriding the header image of each message type
    #[arg(long)]
    images: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let (config, message) = prepare(cli)?;

    chat::send_message(&config.webhook, &message)?;

    tracing::info!("Message sent");

    Ok(())
}

/// Everything up to the network call: the message type is checked first, then the
/// configuration is resolved, then the card is built.
fn prepare(cli: Cli) -> Result<(Config, Message)> {
    let severity: Severity = cli.message_type.parse()?;
    let config = config::get_config(cli.webhook, cli.images.as_deref())?;

    tracing::info!(
        "Building message from type='{}', message='{}'",
        severity,
        cli.message
    );

    let message = notify::build_message(
        &config.images,
        NotifyContent {
            message: cli.message,
            severity,
            action: cli.link.filter(|l| !l.is_empty()).map(|link| Action {
                link,
                label: cli.link_name,
            }),
        },
    );

    Ok((config, message))
}
