//! 商品应用服务

use std::sync::Arc;

use crud_errors::{AppError, AppResult};
use metrics::counter;
use tracing::{info, warn};

use crate::domain::entities::{Product, ProductDraft, ProductId};
use crate::domain::repositories::ProductRepository;

/// 写操作的业务结果
///
/// 由服务决定响应消息与状态码，API 层只负责渲染
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductOutcome {
    Created,
    Deleted,
    Modified,
    NotFound,
}

impl ProductOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Created => "product created",
            Self::Deleted => "product deleted",
            Self::Modified => "product modified",
            Self::NotFound => "product not found",
        }
    }

    /// HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::Created | Self::Deleted | Self::Modified => 200,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Deleted => "deleted",
            Self::Modified => "modified",
            Self::NotFound => "not_found",
        }
    }
}

fn record_outcome(operation: &'static str, outcome: ProductOutcome) {
    counter!(
        "product_operations_total",
        "operation" => operation,
        "outcome" => outcome.label()
    )
    .increment(1);
}

pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    /// 查询全部商品
    pub async fn get_products(&self) -> AppResult<Vec<Product>> {
        self.repo.find_all().await
    }

    /// 新建商品，不做 SKU 重复检查
    pub async fn add_product(&self, mut product: Product) -> AppResult<ProductOutcome> {
        product.id = None;

        let saved = self.repo.save(product).await?;
        info!(
            product_id = ?saved.id,
            sku = %saved.sku,
            "Product created"
        );

        record_outcome("create", ProductOutcome::Created);
        Ok(ProductOutcome::Created)
    }

    /// 删除商品
    ///
    /// 不预先检查存在性，行不存在时仓储返回的错误直接向上传播
    pub async fn delete_product(&self, id: ProductId) -> AppResult<ProductOutcome> {
        self.repo.delete_by_id(id).await?;
        info!(product_id = %id, "Product deleted");

        record_outcome("delete", ProductOutcome::Deleted);
        Ok(ProductOutcome::Deleted)
    }

    /// 全量更新商品
    ///
    /// 先确认商品存在再校验请求体，不存在时无论请求体内容均返回 NotFound
    pub async fn modify_product(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> AppResult<ProductOutcome> {
        let Some(mut existing) = self.repo.find_by_id(id).await? else {
            warn!(product_id = %id, "Product to modify not found");
            record_outcome("modify", ProductOutcome::NotFound);
            return Ok(ProductOutcome::NotFound);
        };

        let product = draft.validate().map_err(AppError::InvalidFields)?;
        existing.overwrite_with(product);
        self.repo.save(existing).await?;
        info!(product_id = %id, "Product modified");

        record_outcome("modify", ProductOutcome::Modified);
        Ok(ProductOutcome::Modified)
    }
}
