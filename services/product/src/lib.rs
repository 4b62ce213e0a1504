//! product-service - 商品 CRUD 服务

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
