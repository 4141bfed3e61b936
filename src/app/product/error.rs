use thiserror::Error;

use super::model::ProductId;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("product {0} not found")]
    NotFound(ProductId),
    #[error("{0}")]
    InvalidInput(InvalidInput),
}

/// 校验失败的字段或条件
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("field 'name' is required and must be a non-empty string")]
    Name,
    #[error("field 'price' is required and must be a number >= 0")]
    Price,
    #[error("field 'category' must be a string")]
    Category,
    #[error("field 'description' must be a string")]
    Description,
    #[error("no fields to update")]
    NoFields,
    #[error("duplicate product id")]
    DuplicateId,
}

impl From<InvalidInput> for StoreError {
    fn from(invalid: InvalidInput) -> Self {
        StoreError::InvalidInput(invalid)
    }
}
