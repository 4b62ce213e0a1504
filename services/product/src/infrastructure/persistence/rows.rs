//! 数据库行映射

use rust_decimal::Decimal;

use crate::domain::entities::{Product, ProductId};

#[derive(Debug, sqlx::FromRow)]
pub(super) struct ProductRow {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub status: bool,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product::new(row.sku, row.name, row.description, row.price, row.status)
            .with_id(ProductId(row.id))
    }
}
