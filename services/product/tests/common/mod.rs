//! 集成测试公共设施

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use crud_errors::{AppError, AppResult};
use tokio::sync::RwLock;
use tower::ServiceExt;

use product_service::api::product_routes;
use product_service::application::ProductService;
use product_service::domain::{Product, ProductId, ProductRepository};

/// 内存仓储，ID 从 1 开始递增
#[derive(Default)]
pub struct InMemoryProductRepository {
    rows: RwLock<BTreeMap<i64, Product>>,
    next_id: AtomicI64,
}

impl InMemoryProductRepository {
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> AppResult<Vec<Product>> {
        Ok(self.rows.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: ProductId) -> AppResult<Option<Product>> {
        Ok(self.rows.read().await.get(&id.0).cloned())
    }

    async fn save(&self, product: Product) -> AppResult<Product> {
        let mut rows = self.rows.write().await;
        match product.id {
            Some(id) => {
                let slot = rows
                    .get_mut(&id.0)
                    .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))?;
                *slot = product.clone();
                Ok(product)
            }
            None => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
                let saved = product.with_id(ProductId(id));
                rows.insert(id, saved.clone());
                Ok(saved)
            }
        }
    }

    async fn delete_by_id(&self, id: ProductId) -> AppResult<()> {
        self.rows
            .write()
            .await
            .remove(&id.0)
            .map(|_| ())
            .ok_or_else(|| AppError::database(format!("No product row with id {} exists", id)))
    }
}

/// 所有操作均失败的仓储
pub struct FailingProductRepository;

#[async_trait]
impl ProductRepository for FailingProductRepository {
    async fn find_all(&self) -> AppResult<Vec<Product>> {
        Err(AppError::database("connection refused"))
    }

    async fn find_by_id(&self, _id: ProductId) -> AppResult<Option<Product>> {
        Err(AppError::database("connection refused"))
    }

    async fn save(&self, _product: Product) -> AppResult<Product> {
        Err(AppError::database("connection refused"))
    }

    async fn delete_by_id(&self, _id: ProductId) -> AppResult<()> {
        Err(AppError::database("connection refused"))
    }
}

pub fn app(repo: Arc<dyn ProductRepository>) -> Router {
    product_routes(Arc::new(ProductService::new(repo)))
}

pub fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// 发送请求并返回状态码与响应体文本
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

pub async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let (status, body) = send(app, request).await;
    (status, serde_json::from_str(&body).unwrap())
}
