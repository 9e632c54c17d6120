use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter
use std::path::PathBuf;

use techshop_datagen::{
    AppError, AppResult, Config,
    models::all_table_schemas,
    storage::TableStore,
    tasks::{self, Counts, RunSettings},
};

#[derive(Parser, Debug)]
#[command(name = "techshop-datagen", version, about = "Synthetic TechShop commerce dataset generator")]
struct Cli {
    /// TOML config file (defaults to $CONFIG_PATH or datagen.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    seed: Option<u64>,

    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[arg(long, global = true)]
    year: Option<i32>,

    /// Date campaign statuses are computed against (YYYY-MM-DD)
    #[arg(long, global = true)]
    reference_date: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Customers {
        #[arg(long)]
        count: Option<i64>,
    },
    Products {
        #[arg(long)]
        count: Option<i64>,
    },
    Campaigns {
        #[arg(long)]
        count: Option<i64>,
    },
    /// Requires customers.csv and products.csv in the output directory
    Orders {
        /// Candidate orders before the seasonal filter
        #[arg(long)]
        count: Option<i64>,
    },
    /// Customers, products and campaigns in parallel, then orders
    All,
    /// Check cross-table integrity of an existing dataset
    Verify,
    /// Print the warehouse table schemas as JSON
    Schema,
}

fn init_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();
}

fn load_config(cli: &Cli) -> AppResult<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(&path.to_string_lossy())?,
        None => Config::load()?,
    };
    if let Some(seed) = cli.seed {
        config.generation.seed = seed;
    }
    if let Some(dir) = &cli.output_dir {
        config.output.dir = dir.clone();
    }
    if let Some(year) = cli.year {
        config.generation.year = year;
    }
    if let Some(date) = cli.reference_date {
        config.generation.reference_date = Some(date);
    }
    Ok(config)
}

async fn run(cli: Cli) -> AppResult<()> {
    if let Command::Schema = cli.command {
        println!("{}", serde_json::to_string_pretty(&all_table_schemas())?);
        return Ok(());
    }

    let config = load_config(&cli)?;
    config.validate()?;
    let settings = RunSettings::from_config(&config);
    let counts = Counts::from_config(&config);
    let store = TableStore::new(config.output.dir.clone());
    log::info!(
        "seed={} year={} reference_date={} output={}",
        settings.seed,
        settings.year,
        settings.reference_date,
        store.dir().display()
    );

    match cli.command {
        Command::Customers { count } => {
            tasks::generate_customers(&store, settings, count.unwrap_or(counts.customers))?;
        }
        Command::Products { count } => {
            tasks::generate_products(&store, settings, count.unwrap_or(counts.products))?;
        }
        Command::Campaigns { count } => {
            tasks::generate_campaigns(&store, settings, count.unwrap_or(counts.campaigns))?;
        }
        Command::Orders { count } => {
            tasks::generate_orders(&store, settings, count.unwrap_or(counts.orders))?;
        }
        Command::All => tasks::generate_all(store, settings, counts).await?,
        Command::Verify => {
            let report = tasks::verify(&store)?;
            if !report.is_ok() {
                return Err(AppError::ValidationError(format!(
                    "{} integrity violations",
                    report.violations.len()
                )));
            }
        }
        Command::Schema => {}
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    if let Err(e) = run(cli).await {
        log::error!("{e}");
        std::process::exit(e.exit_code());
    }
    Ok(())
}
