//! Taskdesk CLI - Database migrations and account management.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! taskdesk-cli migrate
//!
//! # Create the default admin if no admin exists
//! taskdesk-cli admin seed --password 'a-strong-password'
//!
//! # Create an employee
//! taskdesk-cli employee create -u bob -e bob@company.com -n "Bob Builder" -p 'pw'
//! ```
//!
//! # Environment Variables
//!
//! - `TASKDESK_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "taskdesk-cli")]
#[command(author, version, about = "Taskdesk CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage the admin account
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Manage employee accounts
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create the default `admin` account if no admin exists
    Seed {
        /// Password for the new admin (default: `TASKDESK_DEFAULT_ADMIN_PASSWORD` or admin123)
        #[arg(short, long)]
        password: Option<String>,
    },
}

#[derive(Subcommand)]
enum EmployeeAction {
    /// Create a new employee account
    Create {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short = 'n', long)]
        full_name: String,

        /// Initial password
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Seed { password } => {
                commands::accounts::seed_admin(password).await?;
            }
        },
        Commands::Employee { action } => match action {
            EmployeeAction::Create {
                username,
                email,
                full_name,
                password,
            } => {
                commands::accounts::create_employee(&username, &email, &full_name, &password)
                    .await?;
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_employee_create() {
        let cli = Cli::try_parse_from([
            "taskdesk-cli",
            "employee",
            "create",
            "-u",
            "bob",
            "-e",
            "bob@company.com",
            "-n",
            "Bob Builder",
            "-p",
            "pw",
        ]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Employee {
                action: EmployeeAction::Create { .. }
            })
        ));
    }
}
