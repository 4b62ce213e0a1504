//! product-service 入口

use std::sync::Arc;

use crud_bootstrap::{Infrastructure, run_http_server};
use tracing::info;

use product_service::api::product_routes;
use product_service::application::ProductService;
use product_service::infrastructure::persistence::PostgresProductRepository;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    run_http_server(&config_dir, |infra: Infrastructure| async move {
        info!("Initializing product service...");

        let repo = PostgresProductRepository::new(infra.postgres_pool());
        if infra.config().database.auto_create_schema {
            repo.ensure_schema().await?;
        }
        info!("Repository initialized");

        let service = Arc::new(ProductService::new(Arc::new(repo)));
        Ok(product_routes(service))
    })
    .await
}
