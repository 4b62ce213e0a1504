//! 商品路由

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, put};

use super::handlers;
use crate::application::ProductService;

pub fn product_routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route(
            "/api/products",
            get(handlers::get_products).post(handlers::create_product),
        )
        .route(
            "/api/products/{id}",
            put(handlers::modify_product).delete(handlers::delete_product),
        )
        .with_state(service)
}
