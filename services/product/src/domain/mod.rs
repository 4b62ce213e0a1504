//! 领域层
//!
//! 商品实体、校验规则与仓储接口

pub mod entities;
pub mod repositories;

pub use entities::*;
pub use repositories::*;
