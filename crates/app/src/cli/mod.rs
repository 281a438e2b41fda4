use clap::{Args, Parser, Subcommand};
use stockroom_app::{config::PolicyConfig, context::AppContext, logging::LoggingConfig};

mod db;
mod product;
mod stock;

#[derive(Debug, Parser)]
#[command(name = "stockroom-app", about = "Stockroom CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Product(product::ProductCommand),
    Stock(stock::StockCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Product(command) => product::run(command).await,
            Commands::Stock(command) => stock::run(command).await,
        }
    }
}

/// Database and policy settings shared by commands that touch the store.
#[derive(Debug, Args)]
pub(crate) struct StoreArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[command(flatten)]
    policies: PolicyConfig,
}

impl StoreArgs {
    pub(crate) async fn connect(&self) -> Result<AppContext, String> {
        AppContext::from_database_url(&self.database_url, self.policies.policies())
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))
    }
}
