//! Non-interactive subcommands.
//!
//! Each command writes its result to the console's output stream; logs go to
//! stderr through `tracing`.

use crate::cli::{CreateDatabaseArgs, CreateUserArgs, OutputArgs};
use crate::console::Console;
use mongoadmin_core::error::AdminError;
use mongoadmin_core::session::AdminSession;
use mongoadmin_core::{
    ConnectionTarget, Credentials, ProvisioningRequest, ProvisioningWorkflow, Result, parse_roles,
};
use serde::Serialize;
use std::io::{BufRead, Write};

fn to_json<T: Serialize>(value: &T, context: &str) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| AdminError::Serialization {
        context: context.to_string(),
        source: e,
    })
}

/// JSON shape of a newly created user.
#[derive(Debug, Serialize)]
struct CreatedUser<'a> {
    database: &'a str,
    username: &'a str,
    roles: &'a [String],
    created_database: bool,
    connection_string: &'a str,
}

/// Prints the resolved target. Never connects.
pub fn resolve<R: BufRead, W: Write>(
    target: &ConnectionTarget,
    args: &OutputArgs,
    console: &mut Console<R, W>,
) -> Result<()> {
    if args.json {
        return console.say(to_json(target, "connection target")?);
    }

    console.say(format!("Scheme: {}", target.scheme()))?;
    console.say(format!("Host:   {}", target.host()))?;
    console.say(format!("Port:   {}", target.port().unwrap_or("(none)")))
}

/// Lists every database.
pub async fn list<S, R, W>(
    workflow: &ProvisioningWorkflow<S>,
    args: &OutputArgs,
    console: &mut Console<R, W>,
) -> Result<()>
where
    S: AdminSession,
    R: BufRead,
    W: Write,
{
    let databases = workflow.list_databases().await?;

    if args.json {
        return console.say(to_json(&databases, "database listing")?);
    }
    for db in databases {
        if db.is_system {
            console.say(format!("{} (system)", db.name))?;
        } else {
            console.say(db.name)?;
        }
    }
    Ok(())
}

/// Creates a database.
pub async fn create_database<S, R, W>(
    workflow: &ProvisioningWorkflow<S>,
    args: &CreateDatabaseArgs,
    console: &mut Console<R, W>,
) -> Result<()>
where
    S: AdminSession,
    R: BufRead,
    W: Write,
{
    if args.name.trim().is_empty() {
        return Err(AdminError::configuration("database name cannot be empty"));
    }
    workflow.create_database(&args.name).await?;
    console.say(format!("✓ Database '{}' created", args.name))
}

/// Creates a user, prompting for the password, and prints its
/// connection string.
pub async fn create_user<S, R, W>(
    workflow: &ProvisioningWorkflow<S>,
    args: &CreateUserArgs,
    console: &mut Console<R, W>,
) -> Result<()>
where
    S: AdminSession,
    R: BufRead,
    W: Write,
{
    let mut password = console
        .ask_secret("Password: ")?
        .ok_or_else(|| AdminError::configuration("no password provided"))?;

    let request = ProvisioningRequest::new(
        args.database.as_str(),
        Credentials::new(args.username.clone(), std::mem::take(&mut *password)),
        parse_roles(&args.roles.join(",")),
    );
    request.validate()?;

    let created_database = if args.create_database {
        workflow.ensure_database(request.database()).await?
    } else {
        false
    };

    let rendered = workflow.create_user(&request).await?;

    if args.json {
        let report = CreatedUser {
            database: request.database(),
            username: request.credentials().username(),
            roles: request.roles(),
            created_database,
            connection_string: rendered.as_str(),
        };
        return console.say(to_json(&report, "created user")?);
    }

    if created_database {
        console.say(format!("✓ Database '{}' created", request.database()))?;
    }
    console.say(format!(
        "✓ User '{}' created in database '{}' (roles: {})",
        request.credentials().username(),
        request.database(),
        request.roles().join(", ")
    ))?;
    console.say(rendered)
}
