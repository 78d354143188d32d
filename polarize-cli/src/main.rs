use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use polarize_core::PlayerLevel;
use polarize_finance::{BatchReport, CurrencyNormalizer, SessionPayload, analyze_batch, write_csv_file};
use polarize_ingest::SummaryParser;

mod api;
mod config;
mod report;
mod state;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("POLARIZE_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(name = "polarize", version = VERSION, about = "Split tournament results into normal deal and automatic sale")]
struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct AnalyzeArgs {
    /// Summary files or directories (searched recursively for .txt)
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Override the normal cap (USD)
    #[arg(long)]
    normal_limit: Option<f64>,

    /// Override the phase cap (USD)
    #[arg(long)]
    phase_limit: Option<f64>,

    /// Skip the tracker and live exchange rates
    #[arg(long)]
    offline: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse summaries and print the split per tournament plus totals
    Analyze {
        #[command(flatten)]
        args: AnalyzeArgs,

        /// Also write a CSV export
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Analyze and upload the session to the tracker
    Submit {
        #[command(flatten)]
        args: AnalyzeArgs,
    },

    /// Show the player level the caps come from
    Level {
        #[arg(long)]
        offline: bool,
    },

    /// Config file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write ~/.polarize/config.toml with defaults
    Init,
    /// Print the effective config
    Show,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Analyze { args, csv, json } => {
            let cfg = config::load_config()?;
            let (report, level) = run_analysis(&cfg, &args).await?;

            if let Some(path) = csv {
                write_csv_file(&path, &report.tournaments)
                    .with_context(|| format!("exporting {}", path.display()))?;
                log::info!("wrote {}", path.display());
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report::render(&report, &level));
            }
        }

        Command::Submit { args } => {
            let cfg = config::load_config()?;
            let (report, level) = run_analysis(&cfg, &args).await?;
            if report.tournaments.is_empty() {
                bail!("no tournament summaries found; nothing to submit");
            }
            if !report.pending.is_empty() {
                bail!(
                    "conversion pending for {}; rerun when rates are available",
                    report.pending.join(", ")
                );
            }

            let payload = SessionPayload::new(&report.summary, &report.tournaments);
            let session_id = api::TrackerClient::from_config(&cfg)
                .submit_session(&payload)
                .await?;
            print!("{}", report::render(&report, &level));
            println!("\nSubmitted session {session_id}");
        }

        Command::Level { offline } => {
            let cfg = config::load_config()?;
            let level = api::resolve_player_level(&cfg, offline).await;
            println!("Level:       {}", level.level);
            println!("Progress:    {:.0}%", level.level_progress * 100.0);
            println!("Normal cap:  ${:.2}", level.normal_limit);
            println!("Phase cap:   ${:.2}", level.phase_limit);
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

async fn run_analysis(cfg: &config::Config, args: &AnalyzeArgs) -> Result<(BatchReport, PlayerLevel)> {
    let files = state::collect_summary_files(&args.paths)?;
    if files.is_empty() {
        bail!("no .txt files found");
    }
    let (docs, unreadable) = state::read_documents(&files);
    log::info!("read {} of {} files", docs.len(), files.len());

    let mut level = api::resolve_player_level(cfg, args.offline).await;
    if let Some(v) = args.normal_limit {
        level.normal_limit = v;
    }
    if let Some(v) = args.phase_limit {
        level.phase_limit = v;
    }

    let normalizer = if args.offline || !cfg.currency.live {
        CurrencyNormalizer::offline()
    } else {
        CurrencyNormalizer::with_live_rates(&cfg.currency.rates_url, Duration::from_secs(cfg.api.timeout_secs.max(1)))
            .await
    };

    let parser = SummaryParser::new()?;
    let mut report = analyze_batch(&parser, &docs, &normalizer, &level)?;
    report.skipped.extend(unreadable);
    Ok((report, level))
}
