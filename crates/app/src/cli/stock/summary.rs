use clap::Args;

use crate::cli::StoreArgs;

#[derive(Debug, Args)]
pub(crate) struct StockSummaryArgs {
    #[command(flatten)]
    store: StoreArgs,
}

pub(crate) async fn run(args: StockSummaryArgs) -> Result<(), String> {
    let app = args.store.connect().await?;

    let counts = app
        .inventory
        .stock_summary()
        .await
        .map_err(|error| format!("failed to count stock: {error}"))?;

    println!("total: {}", counts.total);
    println!("in_stock: {}", counts.in_stock);
    println!("low_stock: {}", counts.low_stock);
    println!("out_of_stock: {}", counts.out_of_stock);

    Ok(())
}
