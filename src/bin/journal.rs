//! Command-line front end for the CoinPNL journal.
//!
//! Reads and writes the same data directory as the desktop app.

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use coinpnl::application::bootstrap;
use coinpnl::application::exchange_link::ExchangeLinker;
use coinpnl::application::journal::Journal;
use coinpnl::application::report::JournalReport;
use coinpnl::config::Config;
use coinpnl::domain::exchange::{LinkRequest, SUPPORTED_EXCHANGES};
use coinpnl::domain::journal::{EntryDraft, Side};
use coinpnl::domain::market::MarketIndicators;
use coinpnl::domain::ports::{ExchangeRateProvider, KeyValueStore};
use coinpnl::infrastructure::coingecko::CoinGeckoClient;
use coinpnl::infrastructure::export::{
    Workbook, default_csv_dir_name, default_file_name, write_csv_dir, write_xlsx,
};
use coinpnl::infrastructure::http_client_factory::HttpClientFactory;
use coinpnl::interfaces::format::{
    format_amount, format_percent, format_signed, net_equity_line, summary_line,
};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(author, version, about = "CoinPNL trading journal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a trade outcome
    Add {
        /// Ticker, e.g. BTC/USDT or eth-usdt
        #[arg(short, long)]
        symbol: String,

        /// Realized PnL in the base currency
        #[arg(short, long, allow_hyphen_values = true)]
        pnl: String,

        /// LONG or SHORT
        #[arg(long, default_value = "LONG")]
        side: String,

        /// Trade date (YYYY-MM-DD), today when omitted
        #[arg(short, long)]
        date: Option<String>,

        /// Free-text note
        #[arg(short, long, default_value = "")]
        reason: String,
    },
    /// Delete an entry by id
    Remove { id: String },
    /// Print all entries ordered by date
    List,
    /// Print equity, return and max drawdown
    Summary {
        /// Fetch the USDT→KRW rate and show KRW figures
        #[arg(long)]
        krw: bool,
    },
    /// Show or change base currency and initial equity
    Settings {
        #[arg(long)]
        currency: Option<String>,

        #[arg(long)]
        initial_equity: Option<String>,
    },
    /// Write the report as .xlsx (or a directory of CSV files)
    Export {
        /// Output path; defaults to a dated name under EXPORT_DIR
        #[arg(short, long)]
        out: Option<PathBuf>,

        #[arg(long)]
        csv: bool,

        #[arg(long)]
        krw: bool,
    },
    /// Create a local account and log into it
    Signup {
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm: String,
    },
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    /// Print the logged-in user
    Whoami,
    /// Demo exchange link: checks the keys and records the exchange as linked
    Link {
        exchange: String,
        #[arg(long)]
        key: String,
        #[arg(long)]
        secret: String,
        #[arg(long, default_value = "")]
        passphrase: String,
    },
    /// Fetch the header indicators once
    Indicators,
    /// Poll the indicators until Ctrl-C
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Indicators => return print_indicators_once(&config).await,
        Commands::Watch => return watch(&config).await,
        _ => {}
    }

    let mut journal = bootstrap::open_journal(&config)?;

    match cli.command {
        Commands::Add {
            symbol,
            pnl,
            side,
            date,
            reason,
        } => {
            let draft = EntryDraft {
                date: date.unwrap_or_else(|| Local::now().date_naive().format("%Y-%m-%d").to_string()),
                preset: String::new(),
                symbol,
                side: Side::from_str(&side)?,
                pnl,
                reason,
            };
            let entry = journal.add_entry(draft)?;
            println!(
                "Added {} {} {} {} ({})",
                entry.date,
                entry.symbol,
                entry.side,
                format_signed(entry.pnl),
                entry.id
            );
        }
        Commands::Remove { id } => match journal.remove_entry(&id)? {
            Some(entry) => println!("Removed {} {} {}", entry.date, entry.symbol, entry.id),
            None => println!("No entry with id {}", id),
        },
        Commands::List => print_entries(&journal.report(None)),
        Commands::Summary { krw } => {
            let rate = maybe_rate(&config, &journal, krw).await;
            print_summary(&journal.report(rate));
        }
        Commands::Settings {
            currency,
            initial_equity,
        } => {
            if currency.is_some() || initial_equity.is_some() {
                let equity = match initial_equity {
                    Some(v) => v,
                    None => journal.settings().initial_equity.to_string(),
                };
                journal.save_settings(currency.as_deref().unwrap_or(""), &equity)?;
            }
            let settings = journal.settings();
            println!("Currency:       {}", settings.ccy);
            println!(
                "Initial equity: {}",
                format_amount(settings.initial_equity, Some(&settings.ccy))
            );
        }
        Commands::Export { out, csv, krw } => {
            let rate = maybe_rate(&config, &journal, krw).await;
            let workbook = Workbook::from_report(&journal.report(rate));
            let today = Local::now().date_naive();
            if csv {
                let dir = out.unwrap_or_else(|| config.export_dir.join(default_csv_dir_name(today)));
                let files = write_csv_dir(&workbook, &dir)?;
                println!("Wrote {} files to {}", files.len(), dir.display());
            } else {
                let path = out.unwrap_or_else(|| config.export_dir.join(default_file_name(today)));
                write_xlsx(&workbook, &path)?;
                println!("Exported {}", path.display());
            }
        }
        Commands::Signup {
            username,
            password,
            confirm,
        } => {
            let session = journal.signup(&username, &password, &confirm)?;
            println!("Signed up and logged in as {}", session.name);
        }
        Commands::Login { username, password } => {
            let session = journal.login(&username, &password)?;
            println!("Logged in as {}", session.name);
        }
        Commands::Logout => {
            journal.logout()?;
            println!("Logged out");
        }
        Commands::Whoami => match journal.session() {
            Some(session) => println!("{} <{}>", session.name, session.email),
            None => println!("Not logged in"),
        },
        Commands::Link {
            exchange,
            key,
            secret,
            passphrase,
        } => {
            let exchange = SUPPORTED_EXCHANGES
                .iter()
                .find(|ex| ex.eq_ignore_ascii_case(exchange.trim()))
                .map(|ex| ex.to_string())
                .unwrap_or(exchange);
            let request = LinkRequest::new(&exchange, &key, &secret, &passphrase);
            let record = ExchangeLinker::default().link(&mut journal, request).await?;
            println!("{} linked at {}", exchange, record.at.format("%Y-%m-%d %H:%M:%S"));
        }
        Commands::Indicators | Commands::Watch => unreachable!("handled before opening the journal"),
    }

    Ok(())
}

/// One-off rate lookup for KRW figures; only meaningful for USDT journals
async fn maybe_rate<S: KeyValueStore>(
    config: &Config,
    journal: &Journal<S>,
    wanted: bool,
) -> Option<Decimal> {
    if !wanted {
        return None;
    }
    if !journal.settings().is_usdt() {
        warn!("KRW figures are only shown for USDT journals");
        return None;
    }
    let client = HttpClientFactory::create_client(config.indicators.http_timeout);
    let coingecko = CoinGeckoClient::new(client, config.indicators.coingecko_base_url.clone());
    match coingecko.usdt_krw().await {
        Ok(rate) => Some(rate),
        Err(e) => {
            error!("Failed to fetch USDT/KRW: {:#}", e);
            None
        }
    }
}

fn print_entries(report: &JournalReport) {
    let rows = report.table_rows();
    if rows.is_empty() {
        println!("No entries yet.");
        return;
    }
    println!(
        "{:<10}  {:<12}  {:<5}  {:>12}  {:<36}  Reason",
        "Date", "Symbol", "Side", "PnL", "Id"
    );
    for entry in rows {
        println!(
            "{:<10}  {:<12}  {:<5}  {:>12}  {:<36}  {}",
            if entry.has_date() { entry.date.as_str() } else { "-" },
            entry.symbol,
            entry.side.to_string(),
            format_signed(entry.pnl),
            entry.id,
            entry.reason
        );
    }
}

fn print_summary(report: &JournalReport) {
    let summary = &report.analysis.summary;
    println!("{}", "=".repeat(60));
    println!("Net equity:     {}", net_equity_line(report));
    println!(
        "Initial equity: {}",
        format_amount(summary.initial_equity, Some(&report.settings.ccy))
    );
    println!(
        "Entries:        {} over {} trading days",
        summary.trade_count, summary.trading_days
    );
    println!("{}", summary_line(report));
    println!("{}", "=".repeat(60));

    for (eq, dd) in report
        .analysis
        .series
        .equity
        .iter()
        .zip(&report.analysis.series.drawdown)
    {
        println!(
            "{}  equity {:>14}  dd {:>8}",
            eq.date,
            format_amount(eq.equity, None),
            format_percent(dd.drawdown)
        );
    }
}

fn print_market(indicators: &MarketIndicators) {
    let rate = indicators
        .krw_per_usdt
        .map(|r| format_amount(r, Some("KRW")))
        .unwrap_or_else(|| "--".to_string());
    println!("USDT/KRW:      {}", rate);
    println!(
        "BTC dominance: {}",
        indicators.dominance_label().unwrap_or_else(|| "--".to_string())
    );
    println!(
        "Fear & Greed:  {}",
        indicators.fear_greed_label().unwrap_or_else(|| "--".to_string())
    );
}

async fn print_indicators_once(config: &Config) -> Result<()> {
    let service = bootstrap::indicator_service(&config.indicators);
    let updated = service.refresh_once().await;
    let snapshot = service.shared().read().await.clone();
    print_market(&snapshot);
    if updated == 0 {
        anyhow::bail!("All indicator lookups failed");
    }
    Ok(())
}

async fn watch(config: &Config) -> Result<()> {
    let service = bootstrap::indicator_service(&config.indicators);
    let shared = service.shared();
    let interval = config.indicators.poll_interval;
    let handle = service.spawn();
    info!("Watching indicators every {:?}, Ctrl-C to stop", interval);

    let mut last_seen = None;
    let mut ticker = tokio::time::interval(std::time::Duration::from_secs(1));
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = ticker.tick() => {
                let snapshot = shared.read().await.clone();
                if snapshot.updated_at.is_some() && snapshot.updated_at != last_seen {
                    last_seen = snapshot.updated_at;
                    println!("--- {} ---", Local::now().format("%H:%M:%S"));
                    print_market(&snapshot);
                }
            }
        }
    }

    handle.abort();
    Ok(())
}
