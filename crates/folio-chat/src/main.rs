use anyhow::{anyhow, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use folio_chat::chat::{render, IgnoreReason, SubmitOutcome, EVENT_COMPOSING, EVENT_MESSAGE};
use folio_chat::config::ResponderMode;
use folio_chat::trigger::{self, ChatTrigger};
use folio_chat::{ChatConfig, EventEmitter, KnowledgeBase, TurnController};

#[derive(Parser)]
#[command(name = "folio-chat")]
#[command(about = "Chat with the portfolio assistant from a terminal", long_about = None)]
struct Args {
    /// JSON config file (defaults to ~/.config/folio-chat/config.json when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use the remote completion proxy at this URL instead of the local engine
    #[arg(long)]
    remote: Option<String>,

    /// JSON knowledge file replacing the built-in dataset
    #[arg(short, long)]
    knowledge: Option<PathBuf>,
}

/// Prints bot messages and the thinking indicator to stdout.
struct TerminalEmitter;

impl EventEmitter for TerminalEmitter {
    fn emit(&self, event: &str, data: serde_json::Value) {
        match event {
            EVENT_MESSAGE if data["sender"] == "bot" => {
                let text = data["text"].as_str().unwrap_or_default();
                println!("\r🤖 {}\n", render::to_ansi(text));
            }
            EVENT_COMPOSING if data["composing"] == true => {
                print!("Thinking...");
                let _ = std::io::stdout().flush();
            }
            _ => {}
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match args.config.or_else(ChatConfig::default_path) {
        Some(path) => ChatConfig::from_file(&path).map_err(|e| anyhow!(e))?,
        None => ChatConfig::default(),
    };
    if let Some(endpoint) = args.remote {
        config.responder = ResponderMode::Remote;
        config.remote.endpoint = endpoint;
    }
    if let Some(path) = args.knowledge {
        config.knowledge_path = Some(path);
    }
    config.validate().map_err(|e| anyhow!(e))?;

    let knowledge = match &config.knowledge_path {
        Some(path) => KnowledgeBase::from_file(path)?,
        None => KnowledgeBase::portfolio(),
    };

    let chat = Arc::new(TurnController::from_config(
        &config,
        Arc::new(knowledge),
        Arc::new(TerminalEmitter),
    )?);

    let (triggers, receiver) = trigger::channel(16);
    let listener = tokio::spawn({
        let chat = chat.clone();
        async move { chat.listen(receiver).await }
    });

    println!("Commands: /skill <name>, /role <company>, /quit\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line == "/quit" {
            break;
        } else if let Some(label) = line.strip_prefix("/skill ") {
            triggers.ask(ChatTrigger::skill(label.trim())).await?;
        } else if let Some(company) = line.strip_prefix("/role ") {
            triggers.ask(ChatTrigger::role(company.trim())).await?;
        } else if let SubmitOutcome::Ignored(IgnoreReason::Busy) = chat.submit(line).await {
            println!("(still answering the previous question)");
        }
    }

    chat.close();
    drop(triggers);
    listener.await?;
    Ok(())
}
