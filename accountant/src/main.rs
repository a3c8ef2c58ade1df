use accountant::presentation::export;
use accountant::presentation::rest::midnight;
use accountant::{Accountant, AccountantConfig, ImportCategory, ReportQuery, WalletImport};
use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use trading_core::{Timestamp, TradingProviderId};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "accountant",
    about = "Imports exchange trading data per wallet and exports order and funding history",
    long_about = None
)]
struct Cli {
    /// Load configuration from JSON file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the REST API (and the periodic sync when enabled)
    Serve,
    /// Register a wallet for accounting
    RegisterWallet {
        #[arg(long)]
        address: String,
        #[arg(long)]
        provider: TradingProviderId,
    },
    ImportOpenOrders {
        #[arg(long)]
        provider: TradingProviderId,
    },
    ImportOrderFills(ImportArgs),
    ImportPositions(ImportArgs),
    ImportFundings(ImportArgs),
    ImportPortfolio {
        #[arg(long)]
        provider: TradingProviderId,
    },
    /// Every import category, in dependency order
    Sync {
        #[arg(long)]
        provider: TradingProviderId,
    },
    /// Write the order history report as CSV
    OrderHistory(ReportArgs),
    /// Write the funding history report as CSV
    FundingHistory(ReportArgs),
}

#[derive(Args)]
struct ImportArgs {
    #[arg(long)]
    provider: TradingProviderId,
    /// RFC 3339 timestamp, e.g. 2024-03-01T00:00:00Z
    #[arg(long)]
    from: Option<Timestamp>,
    #[arg(long)]
    to: Option<Timestamp>,
}

#[derive(Args)]
struct ReportArgs {
    #[arg(long)]
    address: String,
    #[arg(long)]
    provider: TradingProviderId,
    /// YYYY-MM-DD
    #[arg(long)]
    from: NaiveDate,
    #[arg(long)]
    to: NaiveDate,
    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ReportArgs {
    fn query(&self) -> ReportQuery {
        ReportQuery::new(
            self.address.clone(),
            self.provider,
            Some(midnight(self.from)),
            Some(midnight(self.to)),
        )
    }

    fn writer(&self) -> anyhow::Result<Box<dyn Write>> {
        Ok(match &self.output {
            Some(path) => Box::new(
                File::create(path).with_context(|| format!("creating {}", path.display()))?,
            ),
            None => Box::new(io::stdout().lock()),
        })
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AccountantConfig> {
    let config = match path {
        Some(path) => {
            tracing::info!("Loading config from {}", path.display());
            AccountantConfig::from_file(path)?
        }
        None => AccountantConfig::default(),
    };
    let config = config.with_env_overrides()?;
    config.validate()?;
    Ok(config)
}

fn report_imports(imports: &[WalletImport]) {
    for import in imports {
        println!(
            "{} {} {:?} fetched={} created={} refreshed={} deleted={} skipped={}",
            import.wallet_address,
            import.category,
            import.summary.status,
            import.summary.fetched,
            import.summary.created,
            import.summary.refreshed,
            import.summary.deleted,
            import.summary.skipped,
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "accountant=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    let accountant = Accountant::new(config);
    accountant.load_snapshot()?;

    match cli.command {
        Command::Serve => {
            accountant
                .run()
                .await
                .map_err(|e| anyhow::anyhow!("server error: {}", e))?;
            return Ok(());
        }
        Command::RegisterWallet { address, provider } => {
            let result = accountant.register_wallet(&address, provider).await?;
            let verb = if result.created { "Registered" } else { "Already registered" };
            println!("{} wallet {} on {} (id {})", verb, result.wallet.address, provider, result.wallet.id);
        }
        Command::ImportOpenOrders { provider } => {
            let imports = accountant
                .import_all(ImportCategory::OpenOrders, provider, None, None)
                .await?;
            report_imports(&imports);
        }
        Command::ImportOrderFills(args) => {
            let imports = accountant
                .import_all(ImportCategory::OrderFills, args.provider, args.from, args.to)
                .await?;
            report_imports(&imports);
        }
        Command::ImportPositions(args) => {
            let imports = accountant
                .import_all(ImportCategory::Positions, args.provider, args.from, args.to)
                .await?;
            report_imports(&imports);
        }
        Command::ImportFundings(args) => {
            let imports = accountant
                .import_all(ImportCategory::FundingPayments, args.provider, args.from, args.to)
                .await?;
            report_imports(&imports);
        }
        Command::ImportPortfolio { provider } => {
            let imports = accountant
                .import_all(ImportCategory::Portfolio, provider, None, None)
                .await?;
            report_imports(&imports);
        }
        Command::Sync { provider } => {
            let imports = accountant.sync_provider(provider).await?;
            report_imports(&imports);
        }
        Command::OrderHistory(args) => {
            let rows = accountant.order_history(&args.query()).await?;
            let mut writer = export::write_order_history(args.writer()?, &rows)?;
            writer.flush()?;
        }
        Command::FundingHistory(args) => {
            let rows = accountant.funding_history(&args.query()).await?;
            let mut writer = export::write_funding_history(args.writer()?, &rows)?;
            writer.flush()?;
        }
    }

    accountant.save_snapshot()?;
    Ok(())
}
