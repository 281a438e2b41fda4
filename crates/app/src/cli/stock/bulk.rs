use clap::Args;
use stockroom_app::domain::{
    inventory::models::{BulkOperation, BulkRowOutcome, BulkStockUpdate},
    products::models::ProductUuid,
};

use crate::cli::StoreArgs;

#[derive(Debug, Args)]
pub(crate) struct BulkStockArgs {
    #[command(flatten)]
    store: StoreArgs,

    /// Operation applied to every product
    #[arg(long, value_enum)]
    operation: BulkOperation,

    /// Amount to set, add or subtract
    #[arg(long, allow_negative_numbers = true)]
    amount: i64,

    /// Products to update
    #[arg(required = true)]
    products: Vec<ProductUuid>,
}

pub(crate) async fn run(args: BulkStockArgs) -> Result<(), String> {
    let app = args.store.connect().await?;

    let report = app
        .inventory
        .apply_bulk_update(BulkStockUpdate {
            products: args.products,
            operation: args.operation,
            amount: args.amount,
        })
        .await
        .map_err(|error| format!("failed to apply bulk update: {error}"))?;

    for row in &report.rows {
        match &row.outcome {
            BulkRowOutcome::Updated { stock } => {
                println!("{}: {stock}", row.product_uuid);
            }
            BulkRowOutcome::Failed { reason } => {
                println!("{}: failed ({reason})", row.product_uuid);
            }
        }
    }

    report
        .ensure_complete()
        .map(|_report| ())
        .map_err(|error| error.to_string())
}
