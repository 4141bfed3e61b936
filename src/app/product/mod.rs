//! 产品资源：模型、存储、请求转换与 HTTP 处理器

mod error;
pub mod handler;
pub mod model;
pub mod request;
pub mod service;

pub use error::*;
pub use model::{NewProduct, Product, ProductId, ProductPatch};
pub use service::ProductStore;
