//! MongoDB database and user provisioning tool.
//!
//! Connects with an administrator connection string, then either runs the
//! interactive menu or a single subcommand.
//!
//! # Security Guarantees
//! - The administrator connection string is never logged or echoed
//! - Passwords are read without echo on a terminal
//! - The session is closed on every exit path after connecting

use anyhow::{Context, anyhow};
use clap::Parser;
use mongoadmin::cli::{Cli, Command};
use mongoadmin::commands;
use mongoadmin::console::Console;
use mongoadmin::menu::run_menu;
use mongoadmin::source::{UrlSource, configured_url, validate_connection_url};
use mongoadmin_core::{
    AdminSession, ConnectOptions, MongoSession, ProvisioningWorkflow, init_logging, resolve,
};
use std::io::{BufRead, Write};
use tracing::{debug, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.quiet)?;

    let mut console = Console::stdio();

    let (url, source) = match configured_url(
        cli.connection.connection_url.as_deref(),
        cli.connection.connection_url_file.as_deref(),
    )? {
        Some(found) => found,
        None => {
            let typed = console
                .ask_secret("MongoDB connection URL: ")?
                .ok_or_else(|| anyhow!("No connection URL provided"))?;
            let url = validate_connection_url(&typed, "interactive prompt")?;
            (url, UrlSource::Prompt)
        }
    };

    let target = resolve(&url);
    debug!("Connection URL taken from {}", source);
    debug!("Resolved target: {}", target.redacted_url());

    if let Some(Command::Resolve(args)) = &cli.command {
        commands::resolve(&target, args, &mut console)?;
        return Ok(());
    }

    let options =
        ConnectOptions::default().with_connect_timeout(cli.connection.connect_timeout());
    options.validate()?;

    info!("Connecting to {}...", target);
    let session = MongoSession::connect(&url, &options)
        .await
        .with_context(|| format!("Could not connect to MongoDB at {}", target))?;
    info!("✓ Connected to {}", target);

    let workflow = ProvisioningWorkflow::new(session, target);
    let result = dispatch(&workflow, cli.command.as_ref(), &mut console).await;
    workflow.close().await;

    Ok(result?)
}

async fn dispatch<S, R, W>(
    workflow: &ProvisioningWorkflow<S>,
    command: Option<&Command>,
    console: &mut Console<R, W>,
) -> mongoadmin_core::Result<()>
where
    S: AdminSession,
    R: BufRead,
    W: Write,
{
    match command {
        None | Some(Command::Menu) => run_menu(workflow, console).await,
        Some(Command::Resolve(args)) => commands::resolve(workflow.target(), args, console),
        Some(Command::List(args)) => commands::list(workflow, args, console).await,
        Some(Command::CreateDatabase(args)) => {
            commands::create_database(workflow, args, console).await
        }
        Some(Command::CreateUser(args)) => commands::create_user(workflow, args, console).await,
    }
}
