// CLI module for administrative operations requiring server access

pub mod accounts;
pub mod content;
pub mod seed;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::app_data::AppData;
use crate::types::internal::Role;

/// NewsHub CLI
#[derive(Parser)]
#[command(name = "newshub")]
#[command(about = "NewsHub backend server and administration CLI", long_about = None)]
pub struct Cli {
    /// Defaults to `serve` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve,

    /// Load sample articles and ads into an empty database
    Seed {
        /// Also create the published demo logins (never do this in production)
        #[arg(long)]
        demo_accounts: bool,
    },

    /// Create an account
    CreateAccount {
        #[arg(long)]
        username: String,

        #[arg(long, value_enum, default_value_t = RoleArg::Editor)]
        role: RoleArg,

        /// Phone number used for one-time codes
        #[arg(long)]
        phone: Option<String>,

        /// Password to set; a random one is generated and printed when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Import articles from a CSV file
    Import {
        file: PathBuf,
    },

    /// Print or save the CSV import template
    Template {
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Export the account list in the legacy storage encoding
    ExportAccounts {
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Import accounts from a legacy browser storage snapshot
    ImportLegacy {
        /// File holding the encoded account list
        #[arg(long)]
        users: PathBuf,

        /// File holding the encoded username to password map
        #[arg(long)]
        passwords: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum RoleArg {
    Admin,
    Editor,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Admin => Role::Admin,
            RoleArg::Editor => Role::Editor,
        }
    }
}

/// Execute a non-server CLI command
///
/// `serve` is handled by main.rs and is a no-op here.
///
/// # Returns
/// * `Ok(())` - Command executed successfully
/// * `Err(...)` - Command execution failed
pub async fn execute_command(command: Commands, app_data: &AppData) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Serve => {}
        Commands::Seed { demo_accounts } => {
            seed::seed(app_data, demo_accounts).await?;
        }
        Commands::CreateAccount {
            username,
            role,
            phone,
            password,
        } => {
            accounts::create_account(app_data, &username, role.into(), phone.as_deref(), password).await?;
        }
        Commands::Import { file } => {
            content::import(app_data, &file).await?;
        }
        Commands::Template { output } => {
            content::template(output.as_deref())?;
        }
        Commands::ExportAccounts { output } => {
            accounts::export_accounts(app_data, output.as_deref()).await?;
        }
        Commands::ImportLegacy { users, passwords } => {
            accounts::import_legacy(app_data, &users, &passwords).await?;
        }
    }

    Ok(())
}
