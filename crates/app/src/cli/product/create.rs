use clap::Args;
use rust_decimal::Decimal;
use stockroom_app::domain::products::models::{NewProduct, ProductUuid};

use crate::cli::StoreArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    #[command(flatten)]
    store: StoreArgs,

    /// Unit price in base currency
    #[arg(long)]
    price: Decimal,

    /// Opening stock
    #[arg(long, default_value_t = 0)]
    stock: u32,

    /// Optional product UUID; generated when omitted
    #[arg(long)]
    product_uuid: Option<ProductUuid>,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    let app = args.store.connect().await?;

    let product = app
        .products
        .create_product(NewProduct {
            uuid: args.product_uuid.unwrap_or_default(),
            price: args.price,
            stock_quantity: args.stock,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("price: {}", product.price);
    println!("stock_quantity: {}", product.stock_quantity);

    Ok(())
}
