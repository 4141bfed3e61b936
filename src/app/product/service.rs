//! 产品存储服务
//!
//! `ProductStore` 是唯一允许修改产品集合的组件。集合保存在进程内存中，
//! 按插入顺序排列；所有操作都在同一把读写锁下完成，保证 ID 分配与更新串行化。

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

use super::error::{InvalidInput, StoreError};
use super::model::{
    sample_products, NewProduct, Product, ProductId, ProductPatch, DEFAULT_CATEGORY,
};

/// 默认 ID 长度
pub const DEFAULT_ID_LENGTH: usize = 6;
pub const MIN_ID_LENGTH: usize = 4;
/// UUID simple 格式的十六进制字符数
pub const MAX_ID_LENGTH: usize = 32;

#[derive(Debug, Clone)]
pub struct ProductStore {
    products: Arc<RwLock<Vec<Product>>>,
    id_length: usize,
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new(DEFAULT_ID_LENGTH)
    }
}

impl ProductStore {
    /// 创建空存储，`id_length` 会被限制在 [`MIN_ID_LENGTH`, `MAX_ID_LENGTH`] 内
    pub fn new(id_length: usize) -> Self {
        Self {
            products: Arc::new(RwLock::new(Vec::new())),
            id_length: id_length.clamp(MIN_ID_LENGTH, MAX_ID_LENGTH),
        }
    }

    /// 创建存储并加载示例产品
    pub fn seeded(id_length: usize) -> Self {
        let store = Self::new(id_length);
        for input in sample_products() {
            if let Err(e) = store.create(input) {
                warn!(error = %e, "示例产品加载失败");
            }
        }
        info!(count = store.len(), "已初始化示例产品");
        store
    }

    /// 用给定的产品列表初始化存储
    ///
    /// 名称会去除首尾空白，并按创建时的规则校验名称和价格；ID 重复时返回错误。
    pub fn with_products(
        mut products: Vec<Product>,
        id_length: usize,
    ) -> Result<Self, StoreError> {
        for product in products.iter_mut() {
            let candidate = NewProduct::new(product.name.trim(), product.price);
            check_fields(&candidate, Some(candidate.price))?;
            product.name = candidate.name;
        }

        let unique = {
            let mut seen = HashSet::new();
            products.iter().all(|p| seen.insert(p.id.as_str()))
        };
        if !unique {
            return Err(InvalidInput::DuplicateId.into());
        }

        let store = Self::new(id_length);
        *store.write() = products;
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// 按插入顺序返回全部产品
    pub fn list(&self) -> Vec<Product> {
        self.read().clone()
    }

    pub fn get_by_id(&self, id: &str) -> Result<Product, StoreError> {
        self.read()
            .iter()
            .find(|p| p.id.as_str() == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(ProductId::new(id)))
    }

    pub fn create(&self, input: NewProduct) -> Result<Product, StoreError> {
        let input = NewProduct {
            name: input.name.trim().to_string(),
            ..input
        };
        check_fields(&input, Some(input.price))?;

        let mut products = self.write();
        let product = Product {
            id: self.next_id(&products),
            name: input.name,
            price: input.price,
            category: input
                .category
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            description: input.description.unwrap_or_default(),
            stock: input.stock.unwrap_or(0),
        };
        products.push(product.clone());

        info!(product_id = %product.id, name = %product.name, "产品已创建");
        Ok(product)
    }

    /// 部分更新：未提供的字段保持原值，校验失败时产品不变
    pub fn update(&self, id: &str, patch: ProductPatch) -> Result<Product, StoreError> {
        let mut products = self.write();
        let product = products
            .iter_mut()
            .find(|p| p.id.as_str() == id)
            .ok_or_else(|| StoreError::NotFound(ProductId::new(id)))?;

        if patch.is_empty() {
            return Err(InvalidInput::NoFields.into());
        }

        let patch = ProductPatch {
            name: patch.name.map(|name| name.trim().to_string()),
            ..patch
        };
        check_fields(&patch, patch.price)?;

        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(category) = patch.category {
            product.category = category;
        }
        if let Some(description) = patch.description {
            product.description = description;
        }
        if let Some(stock) = patch.stock {
            product.stock = stock;
        }

        info!(product_id = %product.id, "产品已更新");
        Ok(product.clone())
    }

    /// 删除产品并返回被删除的记录
    pub fn delete(&self, id: &str) -> Result<Product, StoreError> {
        let mut products = self.write();
        let index = products
            .iter()
            .position(|p| p.id.as_str() == id)
            .ok_or_else(|| StoreError::NotFound(ProductId::new(id)))?;
        let removed = products.remove(index);

        info!(product_id = %removed.id, remaining = products.len(), "产品已删除");
        Ok(removed)
    }

    fn next_id(&self, products: &[Product]) -> ProductId {
        loop {
            let mut token = Uuid::new_v4().simple().to_string();
            token.truncate(self.id_length);
            if !products.iter().any(|p| p.id.as_str() == token) {
                return ProductId::new(token);
            }
            debug!(token = %token, "ID 冲突，重新生成");
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Product>> {
        self.products.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Product>> {
        self.products.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// 先校验 name，再校验 price
fn check_fields(input: &impl Validate, price: Option<f64>) -> Result<(), InvalidInput> {
    if let Err(errors) = input.validate() {
        let fields = errors.field_errors();
        if fields.contains_key("name") {
            return Err(InvalidInput::Name);
        }
        if fields.contains_key("price") {
            return Err(InvalidInput::Price);
        }
    }
    match price {
        Some(price) if !price.is_finite() => Err(InvalidInput::Price),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_length_is_clamped() {
        let store = ProductStore::new(1);
        let product = store.create(NewProduct::new("A", 1.0)).unwrap();
        assert_eq!(product.id.as_str().len(), MIN_ID_LENGTH);

        let store = ProductStore::new(100);
        let product = store.create(NewProduct::new("A", 1.0)).unwrap();
        assert_eq!(product.id.as_str().len(), MAX_ID_LENGTH);
    }

    #[test]
    fn test_non_finite_price_rejected() {
        let store = ProductStore::default();
        assert_eq!(
            store.create(NewProduct::new("A", f64::NAN)),
            Err(StoreError::InvalidInput(InvalidInput::Price))
        );
        assert_eq!(
            store.create(NewProduct::new("A", f64::INFINITY)),
            Err(StoreError::InvalidInput(InvalidInput::Price))
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_name_checked_before_price() {
        let store = ProductStore::default();
        assert_eq!(
            store.create(NewProduct::new("   ", -1.0)),
            Err(StoreError::InvalidInput(InvalidInput::Name))
        );
    }

    #[test]
    fn test_seeded_store_has_samples() {
        let store = ProductStore::seeded(DEFAULT_ID_LENGTH);
        let names: Vec<_> = store.list().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["iPhone 17", "MacBook Air", "AirPods Pro"]);
    }
}
