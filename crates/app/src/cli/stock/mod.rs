use clap::{Args, Subcommand};

mod bulk;
mod get;
mod set;
mod summary;

#[derive(Debug, Args)]
pub(crate) struct StockCommand {
    #[command(subcommand)]
    command: StockSubcommand,
}

#[derive(Debug, Subcommand)]
enum StockSubcommand {
    /// Print one product's stock
    Get(get::GetStockArgs),

    /// Overwrite one product's stock
    Set(set::SetStockArgs),

    /// Apply one operation to many products
    Bulk(bulk::BulkStockArgs),

    /// Print stock status counts across the catalog
    Summary(summary::StockSummaryArgs),
}

pub(crate) async fn run(command: StockCommand) -> Result<(), String> {
    match command.command {
        StockSubcommand::Get(args) => get::run(args).await,
        StockSubcommand::Set(args) => set::run(args).await,
        StockSubcommand::Bulk(args) => bulk::run(args).await,
        StockSubcommand::Summary(args) => summary::run(args).await,
    }
}
