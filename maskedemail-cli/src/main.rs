mod output;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use maskedemail_client::{
    MaskedEmailClient, Session, UpdateFields, MASKED_EMAIL_CAPABILITY,
};
use output::{masked_email_table, print_success};

const DEFAULT_APP_NAME: &str = "maskedemail-cli";

const ENV_TOKEN: &str = "MASKEDEMAIL_TOKEN";
const ENV_APP_NAME: &str = "MASKEDEMAIL_APPNAME";
const ENV_ACCOUNT_ID: &str = "MASKEDEMAIL_ACCOUNTID";

#[derive(Parser)]
#[command(name = "maskedemail")]
#[command(version)]
#[command(about = "Manage Fastmail masked emails", long_about = None)]
struct Cli {
    /// API token to authenticate with (or MASKEDEMAIL_TOKEN env)
    #[arg(long, global = true)]
    token: Option<String>,
    /// Fastmail account id (or MASKEDEMAIL_ACCOUNTID env)
    #[arg(long = "accountid", global = true)]
    account_id: Option<String>,
    /// App name identifying the creator (or MASKEDEMAIL_APPNAME env)
    #[arg(long, global = true)]
    appname: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show accounts available in the session
    Session,
    /// Create a masked email
    Create {
        /// Domain for the masked email (optional)
        #[arg(long)]
        domain: Option<String>,
        /// Description for the masked email (optional)
        #[arg(long = "desc")]
        description: Option<String>,
        /// Is masked email enabled (true|false)
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        enabled: bool,
    },
    /// List masked emails
    List {
        /// Show deleted masked emails
        #[arg(long = "show-deleted")]
        show_deleted: bool,
        /// Show all masked email fields
        #[arg(long = "all-fields")]
        all_fields: bool,
    },
    /// Enable a masked email
    Enable {
        /// Masked email ID
        id: String,
    },
    /// Disable a masked email
    Disable {
        /// Masked email ID
        id: String,
    },
    /// Delete a masked email
    Delete {
        /// Masked email ID
        id: String,
    },
    /// Update domain and/or description of a masked email
    Update {
        /// Masked email ID
        id: String,
        /// New domain (only updated if passed; "" clears it)
        #[arg(long)]
        domain: Option<String>,
        /// New description (only updated if passed; "" clears it)
        #[arg(long = "desc")]
        description: Option<String>,
    },
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Flags take precedence over env variables.
    let token = cli
        .token
        .clone()
        .filter(|t| !t.is_empty())
        .or_else(|| env_non_empty(ENV_TOKEN))
        .with_context(|| format!("missing API token: pass --token or set {}", ENV_TOKEN))?;
    let app_name = cli
        .appname
        .clone()
        .filter(|a| !a.is_empty())
        .or_else(|| env_non_empty(ENV_APP_NAME))
        .unwrap_or_else(|| DEFAULT_APP_NAME.to_string());
    let account_id = cli
        .account_id
        .clone()
        .or_else(|| env_non_empty(ENV_ACCOUNT_ID));
    let account_id = account_id.as_deref();

    let client = MaskedEmailClient::new(token, app_name);

    match cli.command {
        Commands::Session => {
            let session = client.session().await.context("fetching session")?;
            print_session(&session, account_id);
        }
        Commands::Create {
            domain,
            description,
            enabled,
        } => {
            let domain = domain.unwrap_or_default().trim().to_string();
            let description = description.unwrap_or_default().trim().to_string();

            let session = client.session().await.context("fetching session")?;
            let created = client
                .create(&session, account_id, &domain, enabled, &description)
                .await
                .context("creating masked email")?;

            // Plain address on stdout so scripts can capture it.
            println!("{}", created.email);
        }
        Commands::List {
            show_deleted,
            all_fields,
        } => {
            let session = client.session().await.context("fetching session")?;
            let emails = client
                .get_all(&session, account_id)
                .await
                .context("listing masked emails")?;
            print!("{}", masked_email_table(&emails, show_deleted, all_fields));
        }
        Commands::Enable { id } => {
            let session = client.session().await.context("fetching session")?;
            client
                .enable(&session, account_id, &id)
                .await
                .context("enabling masked email")?;
            print_success(&format!("enabled masked email: {}", id));
        }
        Commands::Disable { id } => {
            let session = client.session().await.context("fetching session")?;
            client
                .disable(&session, account_id, &id)
                .await
                .context("disabling masked email")?;
            print_success(&format!("disabled masked email: {}", id));
        }
        Commands::Delete { id } => {
            let session = client.session().await.context("fetching session")?;
            client
                .delete(&session, account_id, &id)
                .await
                .context("deleting masked email")?;
            print_success(&format!("deleted masked email: {}", id));
        }
        Commands::Update {
            id,
            domain,
            description,
        } => {
            let fields = UpdateFields::new(
                domain.map(|d| d.trim().to_string()),
                description.map(|d| d.trim().to_string()),
            );

            let session = client.session().await.context("fetching session")?;
            client
                .update_info(&session, account_id, &id, &fields)
                .await
                .context("updating masked email")?;
            print_success(&format!("updated {}", id));
        }
    }

    Ok(())
}

/// Accounts as `Name [id] (primary: bool, enabled: bool)`, primary account
/// first, the rest sorted by id. An explicit account id narrows the listing
/// to that account.
fn print_session(session: &Session, explicit_account: Option<&str>) {
    let primary = session
        .default_account_for_capability(MASKED_EMAIL_CAPABILITY)
        .unwrap_or_default();

    let mut account_ids: Vec<&str> = session
        .accounts
        .keys()
        .map(String::as_str)
        .filter(|id| explicit_account.map_or(true, |explicit| explicit == *id))
        .collect();
    account_ids.sort_by(|a, b| {
        if *a == primary {
            std::cmp::Ordering::Less
        } else if *b == primary {
            std::cmp::Ordering::Greater
        } else {
            a.cmp(b)
        }
    });

    for id in account_ids {
        let is_primary = id == primary;
        let is_enabled = session.account_has_capability(id, MASKED_EMAIL_CAPABILITY);
        println!(
            "{} [{}] (primary: {}, enabled: {})",
            session.accounts[id].name, id, is_primary, is_enabled
        );
    }
}
