#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Command-line composer for bulk email campaigns

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::{anyhow, Context, Result};
use bulk_mailer::{
    domain::{
        campaigns::{CampaignHistory, DashboardStats},
        compose::{ComposeSession, FileBlob, SubmitError, TextField},
        configuration::ConfigurationService,
    },
    infrastructure::{
        configuration::{ConfigurationFileConfig, FileConfiguration},
        http::{BackendClient, BackendConfig},
        recipient_files::CsvRecipientParser,
    },
};
use clap::{Parser, Subcommand};

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The backend connection
    #[clap(flatten)]
    pub backend: BackendConfig,

    /// Where the mailbox configuration is kept
    #[clap(flatten)]
    pub configuration: ConfigurationFileConfig,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Composer commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compose and send a campaign
    Send(SendArgs),

    /// Verify mailbox credentials and remember the mailbox
    Configure {
        /// Mailbox address
        #[arg(long)]
        email: String,

        /// App password issued by the mail provider
        #[arg(long, env = "APP_PASSWORD")]
        app_password: String,
    },

    /// Show recent campaigns and totals
    History,

    /// Show campaign totals only
    Stats,
}

/// Campaign contents
#[derive(Debug, clap::Args)]
pub struct SendArgs {
    /// Recipient address, repeatable
    #[arg(long = "to")]
    pub to: Vec<String>,

    /// Spreadsheet or CSV file of recipients
    #[arg(long)]
    pub to_file: Option<PathBuf>,

    /// Subject line
    #[arg(long)]
    pub subject: String,

    /// HTML body
    #[arg(long, conflicts_with = "body_file")]
    pub body: Option<String>,

    /// File containing the HTML body
    #[arg(long)]
    pub body_file: Option<PathBuf>,

    /// Comma-separated Cc addresses
    #[arg(long, default_value = "")]
    pub cc: String,

    /// Comma-separated Bcc addresses
    #[arg(long, default_value = "")]
    pub bcc: String,

    /// File to attach, repeatable
    #[arg(long = "attach")]
    pub attachments: Vec<PathBuf>,

    /// Signature appended below the body
    #[arg(long)]
    pub signature: Option<String>,

    /// Send after this many seconds instead of now
    #[arg(long)]
    pub schedule_secs: Option<u64>,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let backend = Arc::new(BackendClient::new(&args.backend)?);
    let configuration = Arc::new(FileConfiguration::new(&args.configuration.path));

    match args.command {
        Command::Send(send_args) => send(send_args, backend, configuration).await,
        Command::Configure {
            email,
            app_password,
        } => {
            let service = ConfigurationService::new(backend, Arc::clone(&configuration));
            let message = service.configure(&email, &app_password).await?;

            println!("{} (saved to {})", message, configuration.path().display());

            Ok(())
        }
        Command::History => history(backend).await,
        Command::Stats => {
            print_stats(&DashboardStats::load(backend).await?);

            Ok(())
        }
    }
}

#[mutants::skip]
async fn send(
    args: SendArgs,
    backend: Arc<BackendClient>,
    configuration: Arc<FileConfiguration>,
) -> Result<()> {
    let parser = Arc::new(CsvRecipientParser::new(Arc::clone(&backend)));
    let mut session = ComposeSession::new(backend, parser, configuration);

    if !args.to.is_empty() {
        if let Err(err) = session.set_recipients_from_list(&args.to) {
            eprintln!("{}", err);
        }
    }

    if let Some(path) = &args.to_file {
        if let Err(err) = session.set_recipients_from_file(read_file(path).await?).await {
            eprintln!("{}", err);
        }

        if let Some(warning) = session.recipient_warning() {
            eprintln!("{}", warning);
        }
    }

    session.set_field(TextField::Subject, &args.subject);
    session.set_field(TextField::Cc, &args.cc);
    session.set_field(TextField::Bcc, &args.bcc);

    let markup = match (&args.body, &args.body_file) {
        (Some(body), _) => body.clone(),
        (None, Some(path)) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => String::new(),
    };
    session.update_body(&markup);

    let mut files = Vec::with_capacity(args.attachments.len());
    for path in &args.attachments {
        files.push(read_file(path).await?);
    }
    if let Err(err) = session.add_attachments(files) {
        eprintln!("{}", err);
    }

    if let Some(signature) = &args.signature {
        session.set_signature(signature);
    }

    let result = match args.schedule_secs {
        Some(secs) => match session.schedule_submit(Duration::from_secs(secs)) {
            Ok(()) => {
                println!("Email scheduled to be sent in {} seconds, Ctrl-C cancels", secs);

                let completed = tokio::select! {
                    result = session.complete_scheduled() => Some(result),
                    _ = tokio::signal::ctrl_c() => None,
                };

                match completed {
                    Some(result) => result,
                    None => {
                        session.cancel_scheduled();
                        session.discard();

                        println!("Scheduled email cancelled");

                        return Ok(());
                    }
                }
            }
            Err(err) => Err(err),
        },
        None => session.submit().await,
    };

    match result {
        Ok(report) => {
            println!("{}", report.summary());

            for failed in &report.failed_emails {
                eprintln!("  {}: {}", failed.email, failed.error);
            }

            Ok(())
        }
        Err(SubmitError::Invalid(errors)) => {
            for message in errors.messages() {
                eprintln!("{}", message);
            }

            Err(anyhow!("the email has validation errors"))
        }
        Err(err) if err.requires_configuration() => Err(anyhow!(
            "no email account is configured, run `composer configure` first"
        )),
        Err(err) => Err(anyhow!(session
            .submission_error()
            .map(str::to_string)
            .unwrap_or_else(|| err.to_string()))),
    }
}

#[mutants::skip]
async fn history(backend: Arc<BackendClient>) -> Result<()> {
    let campaigns = backend.recent_campaigns().await?;

    if campaigns.is_empty() {
        println!("No campaigns yet");

        return Ok(());
    }

    for campaign in &campaigns {
        let sent_at = campaign
            .sent_at()
            .map(|time| time.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{}  {}  from {}  {} recipients, {} sent, {} failed",
            sent_at,
            campaign.display_subject(),
            campaign.sender_email,
            campaign.recipient_count(),
            campaign.success_count,
            campaign.failed_count,
        );
    }

    println!();
    print_stats(&DashboardStats::from_campaigns(&campaigns));

    Ok(())
}

fn print_stats(stats: &DashboardStats) {
    println!(
        "{} campaigns, {} sent, {} failed, {}% success rate",
        stats.campaigns,
        stats.sent,
        stats.failed,
        stats.success_rate()
    );
}

async fn read_file(path: &Path) -> Result<FileBlob> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow!("{} is not a file", path.display()))?;

    Ok(FileBlob::from_name(&name, data))
}
