//! 产品数据模型

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 未提供分类时使用的默认分类
pub const DEFAULT_CATEGORY: &str = "general";

/// 产品标识：由存储分配的短随机字符串
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub description: String,
    pub stock: u32,
}

impl Product {
    /// 构造一个带固定 ID 的产品，用于初始化数据
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
            price,
            category: DEFAULT_CATEGORY.to_string(),
            description: String::new(),
            stock: 0,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }
}

/// 创建产品的输入
///
/// `name` 在校验前会去除首尾空白；`price` 必须是非负的有限数值。
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct NewProduct {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub category: Option<String>,
    pub description: Option<String>,
    pub stock: Option<u32>,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            ..Self::default()
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn stock(mut self, stock: u32) -> Self {
        self.stock = Some(stock);
        self
    }
}

/// 部分更新：只有 `Some` 的字段会被覆盖
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ProductPatch {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub stock: Option<u32>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.stock.is_none()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn stock(mut self, stock: u32) -> Self {
        self.stock = Some(stock);
        self
    }
}

/// 启动时加载的示例产品
pub fn sample_products() -> Vec<NewProduct> {
    vec![
        NewProduct::new("iPhone 17", 90000.0)
            .category("Electronics")
            .description("New smartphone")
            .stock(10),
        NewProduct::new("MacBook Air", 170000.0)
            .category("Laptops")
            .description("Lightweight laptop")
            .stock(5),
        NewProduct::new("AirPods Pro", 20000.0)
            .category("Accessories")
            .description("Headphones")
            .stock(20),
    ]
}
