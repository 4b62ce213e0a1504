//! 商品请求处理器

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use crud_errors::{AppError, AppResult};
use tracing::debug;

use crate::application::{ProductOutcome, ProductService};
use crate::domain::entities::{Product, ProductDraft, ProductId};

/// 解析请求体
///
/// 超出大小限制时保留 413，其余解析失败按字段错误返回 400
fn draft(body: Result<Json<ProductDraft>, JsonRejection>) -> AppResult<ProductDraft> {
    body.map(|Json(draft)| draft).map_err(|rejection| {
        debug!(error = %rejection, "Rejected product payload");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::payload_too_large(rejection.body_text())
        } else {
            AppError::invalid_fields([rejection.body_text()])
        }
    })
}

/// 解析并校验请求体
fn validated(body: Result<Json<ProductDraft>, JsonRejection>) -> AppResult<Product> {
    draft(body)?.validate().map_err(AppError::InvalidFields)
}

fn product_id(path: Result<Path<ProductId>, PathRejection>) -> AppResult<ProductId> {
    path.map(|Path(id)| id)
        .map_err(|rejection| AppError::validation(rejection.body_text()))
}

pub async fn get_products(
    State(service): State<Arc<ProductService>>,
) -> AppResult<Json<Vec<Product>>> {
    service.get_products().await.map(Json)
}

pub async fn create_product(
    State(service): State<Arc<ProductService>>,
    body: Result<Json<ProductDraft>, JsonRejection>,
) -> AppResult<ProductOutcome> {
    let product = validated(body)?;
    service.add_product(product).await
}

pub async fn delete_product(
    State(service): State<Arc<ProductService>>,
    path: Result<Path<ProductId>, PathRejection>,
) -> AppResult<ProductOutcome> {
    let id = product_id(path)?;
    service.delete_product(id).await
}

pub async fn modify_product(
    State(service): State<Arc<ProductService>>,
    path: Result<Path<ProductId>, PathRejection>,
    body: Result<Json<ProductDraft>, JsonRejection>,
) -> AppResult<ProductOutcome> {
    let id = product_id(path)?;
    let draft = draft(body)?;
    service.modify_product(id, draft).await
}
