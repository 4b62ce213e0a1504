//! 商品仓储接口

use async_trait::async_trait;
use crud_errors::AppResult;

use crate::domain::entities::{Product, ProductId};

/// 商品仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// 按存储顺序（插入顺序）返回全部商品
    async fn find_all(&self) -> AppResult<Vec<Product>>;

    /// 根据 ID 查找商品
    async fn find_by_id(&self, id: ProductId) -> AppResult<Option<Product>>;

    /// 保存商品：无 `id` 时新增并返回分配的 ID，有 `id` 时覆盖该行
    async fn save(&self, product: Product) -> AppResult<Product>;

    /// 删除商品，行不存在时返回存储层错误
    async fn delete_by_id(&self, id: ProductId) -> AppResult<()>;
}
