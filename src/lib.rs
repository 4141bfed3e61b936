//! # 产品存储服务
//!
//! 内存中的产品 CRUD 服务，包括：
//! - 产品存储 (`ProductStore`)：唯一 ID 分配、字段校验、部分更新
//! - 基于 Axum 的 HTTP 边界层
//! - 配置加载与日志初始化

pub mod app;
pub mod core;
pub mod infrastructure;

pub use app::product::{
    InvalidInput, NewProduct, Product, ProductId, ProductPatch, ProductStore, StoreError,
};
