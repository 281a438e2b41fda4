use clap::Args;
use stockroom_app::domain::products::models::ProductUuid;

use crate::cli::StoreArgs;

#[derive(Debug, Args)]
pub(crate) struct SetStockArgs {
    #[command(flatten)]
    store: StoreArgs,

    /// Product UUID
    product_uuid: ProductUuid,

    /// New stock value
    #[arg(allow_negative_numbers = true)]
    stock: i64,
}

pub(crate) async fn run(args: SetStockArgs) -> Result<(), String> {
    let app = args.store.connect().await?;

    let stock = app
        .inventory
        .set_single_stock(args.product_uuid, args.stock)
        .await
        .map_err(|error| format!("failed to set stock: {error}"))?;

    println!("product_uuid: {}", args.product_uuid);
    println!("stock_quantity: {stock}");

    Ok(())
}
