use clap::Args;
use stockroom_app::domain::products::models::ProductUuid;

use crate::cli::StoreArgs;

#[derive(Debug, Args)]
pub(crate) struct GetStockArgs {
    #[command(flatten)]
    store: StoreArgs,

    /// Product UUID
    product_uuid: ProductUuid,
}

pub(crate) async fn run(args: GetStockArgs) -> Result<(), String> {
    let app = args.store.connect().await?;

    let stock = app
        .inventory
        .read_stock(args.product_uuid)
        .await
        .map_err(|error| format!("failed to read stock: {error}"))?;

    println!("product_uuid: {}", args.product_uuid);
    println!("stock_quantity: {stock}");

    Ok(())
}
