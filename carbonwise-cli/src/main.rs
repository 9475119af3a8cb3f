use anyhow::{bail, Context, Result};
use carbonwise_advice::AdviceClient;
use carbonwise_ingest::{load_statement, AmountPolicy, LoadedStatement, StatementFormat};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{error, info};

mod config;
mod logger;
mod secrets;
mod state;

#[derive(Parser, Debug)]
#[command(
    name = "carbonwise",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CARBONWISE_BUILD_SHA"), ")"),
    about = "Turn a bank statement into spending and carbon-footprint advice"
)]
struct Cli {
    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a statement and print the JSON payload that would be sent for advice
    Parse {
        /// Statement file (.pdf or .csv)
        file: PathBuf,

        #[command(flatten)]
        ingest: IngestArgs,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Parse a statement and ask the advice endpoint about it
    Advise {
        /// Statement file (.pdf or .csv)
        file: PathBuf,

        #[command(flatten)]
        ingest: IngestArgs,

        /// Override the configured model
        #[arg(long)]
        model: Option<String>,

        /// Print the request body instead of sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// Manage ~/.carbonwise/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(clap::Args, Debug)]
struct IngestArgs {
    /// Statement format (default: from the file extension)
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Skip PDF lines whose last token is not a number instead of failing
    #[arg(long, conflicts_with = "abort_on_bad_amount")]
    skip_bad_amounts: bool,

    /// Fail on the first PDF line with a bad amount, even if the config says skip
    #[arg(long)]
    abort_on_bad_amount: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Pdf,
    Csv,
}

impl From<FormatArg> for StatementFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Pdf => StatementFormat::Pdf,
            FormatArg::Csv => StatementFormat::Csv,
        }
    }
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
    /// Print the config file location
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::setup_logger(cli.verbose);

    match cli.command {
        Command::Parse { file, ingest, pretty } => {
            let cfg = config::load_config()?;
            let loaded = load(&file, &ingest, cfg.ingest.skip_bad_amounts)?;
            let json = if pretty {
                serde_json::to_string_pretty(&loaded.payload)?
            } else {
                loaded.payload.to_json()?
            };
            println!("{json}");
        }

        Command::Advise {
            file,
            ingest,
            model,
            dry_run,
        } => {
            let cfg = config::load_config()?;
            let loaded = load(&file, &ingest, cfg.ingest.skip_bad_amounts)?;
            let payload_json = loaded.payload.to_json()?;

            let mut advice_cfg = cfg.advice.to_advice_config();
            if let Some(m) = model {
                advice_cfg.model = m;
            }
            // Read once, handed to the advice client explicitly.
            let api_key = secrets::load_api_key();
            let client = AdviceClient::new(api_key, advice_cfg).context("build advice client")?;

            if dry_run {
                let body = client.chat_request(&payload_json);
                println!("{}", serde_json::to_string_pretty(&body)?);
                return Ok(());
            }

            match client.request_advice(&payload_json).await {
                Ok(advice) => println!("{advice}"),
                Err(e) => {
                    error!("{e}");
                    bail!(e.legacy_message());
                }
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
            ConfigCommand::Path => println!("{}", config::config_path()?.display()),
        },
    }

    Ok(())
}

/// Command-line flags win over `ingest.skip_bad_amounts`.
fn amount_policy(args: &IngestArgs, configured_skip: bool) -> AmountPolicy {
    if args.abort_on_bad_amount {
        AmountPolicy::Abort
    } else if args.skip_bad_amounts || configured_skip {
        AmountPolicy::Skip
    } else {
        AmountPolicy::Abort
    }
}

fn load(file: &Path, args: &IngestArgs, configured_skip: bool) -> Result<LoadedStatement> {
    if !file.exists() {
        bail!("statement not found: {}", file.display());
    }

    let policy = amount_policy(args, configured_skip);
    let loaded = load_statement(file, args.format.map(Into::into), policy)
        .with_context(|| format!("loading {}", file.display()))?;

    for r in &loaded.rejected {
        eprintln!("skipped line {}: {:?} (amount {:?})", r.line, r.text, r.token);
    }
    info!(
        "Parsed {} items from {} ({} lines skipped)",
        loaded.payload.len(),
        file.display(),
        loaded.rejected.len()
    );

    Ok(loaded)
}
