//! PostgreSQL repository implementation

use async_trait::async_trait;
use crud_errors::{AppError, AppResult};
use sqlx::PgPool;
use tracing::info;

use crate::domain::entities::{Product, ProductId};
use crate::domain::repositories::ProductRepository;

use super::rows::ProductRow;

const CREATE_PRODUCTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id          BIGSERIAL PRIMARY KEY,
        sku         VARCHAR(255) NOT NULL,
        name        VARCHAR(255) NOT NULL,
        description TEXT,
        price       NUMERIC NOT NULL,
        status      BOOLEAN NOT NULL DEFAULT FALSE
    )
"#;

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 确保 products 表存在（幂等）
    pub async fn ensure_schema(&self) -> AppResult<()> {
        sqlx::query(CREATE_PRODUCTS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create products table: {}", e)))?;

        info!("Products table ready");
        Ok(())
    }

    async fn insert(&self, product: &Product) -> AppResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (sku, name, description, price, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, sku, name, description, price, status
            "#,
        )
        .bind(&product.sku)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert product: {}", e)))?;

        Ok(row.into())
    }

    async fn update(&self, id: ProductId, product: &Product) -> AppResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            UPDATE products SET
                sku = $1,
                name = $2,
                description = $3,
                price = $4,
                status = $5
            WHERE id = $6
            RETURNING id, sku, name, description, price, status
            "#,
        )
        .bind(&product.sku)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.status)
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update product: {}", e)))?;

        row.map(Product::from)
            .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn find_all(&self) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, sku, name, description, price, status
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list products: {}", e)))?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn find_by_id(&self, id: ProductId) -> AppResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, sku, name, description, price, status
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to query product: {}", e)))?;

        Ok(row.map(Product::from))
    }

    async fn save(&self, product: Product) -> AppResult<Product> {
        match product.id {
            Some(id) => self.update(id, &product).await,
            None => self.insert(&product).await,
        }
    }

    async fn delete_by_id(&self, id: ProductId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete product: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::database(format!(
                "No product row with id {} exists",
                id
            )));
        }

        Ok(())
    }
}
