use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{DemoSession, EnvAssistantBootstrap, ViewRouter};
use shared::domain::UserId;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod render;

use commands::{dispatch, parse_command, ShellCommand, USAGE};
use config::{load_settings, DEFAULT_CONFIG_PATH};
use render::render_frame;

#[derive(Parser, Debug)]
#[command(about = "Terminal client for the hackathon collaboration app")]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// JSON file with `users` and `projects` to seed the session store.
    #[arg(long)]
    seed: Option<PathBuf>,
    /// Resume a session for this account on startup.
    #[arg(long)]
    user: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(&args.config)?;
    if args.seed.is_some() {
        settings.seed_path = args.seed;
    }
    if args.user.is_some() {
        settings.auto_login = args.user;
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .with_writer(std::io::stderr)
        .init();

    let session = Arc::new(match &settings.seed_path {
        Some(path) => DemoSession::from_seed_file(path)?,
        None => DemoSession::with_demo_accounts()?,
    });
    if let Some(user_id) = &settings.auto_login {
        session
            .resume(UserId::from(user_id.as_str()))
            .with_context(|| format!("cannot resume session for '{user_id}'"))?;
    }
    let assistant = Arc::new(EnvAssistantBootstrap::new(settings.assistant_api_key.clone()));

    let mut router = ViewRouter::new(session.clone(), assistant);
    router.start();
    info!(view = %router.view(), "client ready");
    print!("{}", render_frame(&router.frame(), &session));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let cmd = match parse_command(&line) {
            Ok(cmd) => cmd,
            Err(err) => {
                println!("{err}\n{USAGE}");
                continue;
            }
        };

        match cmd {
            ShellCommand::Quit => break,
            ShellCommand::Help => {
                println!("{USAGE}");
                continue;
            }
            ShellCommand::Accounts => {
                for user in session.accounts() {
                    println!("  {:<10} {}", user.id, user.name);
                }
                continue;
            }
            cmd => {
                if let Some(status) = dispatch(&mut router, cmd).await {
                    println!("-- {status}");
                }
            }
        }
        print!("{}", render_frame(&router.frame(), &session));
    }

    Ok(())
}
