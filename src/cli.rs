//! Command-line front-end: argument parsing and dispatch to [`SmsService`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bulksms::{
    config::Config,
    domain::{ReportLimit, SendResult},
    extract::extract_phone_numbers,
    format::{format_balance, format_delivery_reports, format_send_result, format_send_summary},
    service::{SendSummary, SmsService},
    web,
};
use clap::{Args, Parser, Subcommand};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "bulksms", version, about = "Send bulk SMS and inspect delivery")]
pub struct Cli {
    /// Configuration file (defaults to ./sms.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send one message to a list of recipients
    Send(SendArgs),
    /// Show the account balance
    Balance,
    /// List recent delivery reports
    Reports(ReportsArgs),
    /// Run the JSON API server
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
pub struct SendArgs {
    /// Recipients, comma separated
    #[arg(short = 't', long = "to", value_delimiter = ',', value_name = "NUMBERS")]
    pub to: Vec<String>,

    /// Text or CSV file with one number per line
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Message text
    #[arg(short, long)]
    pub message: String,

    /// Sender id overriding the configured one
    #[arg(short, long)]
    pub sender: Option<String>,

    /// Print a per-recipient report
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ReportsArgs {
    #[arg(long)]
    pub bulk_id: Option<String>,

    #[arg(long)]
    pub message_id: Option<String>,

    /// Reports requested from the provider
    #[arg(long, default_value_t = ReportLimit::DEFAULT)]
    pub limit: u32,

    /// Reports printed
    #[arg(long, default_value_t = 10)]
    pub show: usize,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Bind address, overrides the configured host
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port, overrides the configured port
    #[arg(long)]
    pub port: Option<u16>,
}

pub async fn run() -> Result<()> {
    dispatch(Cli::parse()).await
}

async fn dispatch(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    info!(
        base_url = %config.base_url,
        api_key = %config.api_key_masked(),
        sender_id = %config.sender_id,
        "configuration loaded"
    );
    let service = SmsService::new(config.build_client()?);

    match cli.command {
        Command::Send(args) => send(&service, args).await,
        Command::Balance => {
            let balance = service.check_balance().await?;
            println!("{}", format_balance(&balance));
            Ok(())
        }
        Command::Reports(args) => {
            let reports = service
                .fetch_reports(
                    args.bulk_id.as_deref(),
                    args.message_id.as_deref(),
                    Some(args.limit),
                )
                .await?;
            println!("{}", format_delivery_reports(&reports, args.show));
            Ok(())
        }
        Command::Serve(args) => {
            if let Some(host) = args.host {
                config.host = host;
            }
            if let Some(port) = args.port {
                config.port = port;
            }
            let addr = config.server_addr()?;
            web::serve(service, addr)
                .await
                .with_context(|| format!("server on {addr} failed"))
        }
    }
}

async fn send(service: &SmsService, args: SendArgs) -> Result<()> {
    let mut recipients = args.to;
    if let Some(path) = args.file.as_deref() {
        recipients.extend(read_phone_file(path)?);
    }

    let summary = service
        .send_sms(recipients, &args.message, args.sender.as_deref())
        .await?;
    let SendSummary {
        bulk_id,
        duration,
        messages,
        ..
    } = summary;
    let result = SendResult { bulk_id, messages };

    if args.verbose {
        print!("{}", format_send_result(&result, true));
    } else {
        println!("{}", format_send_summary(&result));
    }
    println!("Completed in {:.3} seconds", duration.as_secs_f64());
    Ok(())
}

fn read_phone_file(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read phone number file {}", path.display()))?;
    let numbers: Vec<String> = extract_phone_numbers(&text).collect();
    info!(count = numbers.len(), file = %path.display(), "phone numbers loaded from file");
    Ok(numbers)
}
