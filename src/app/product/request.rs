//! 请求体到存储输入的显式转换
//!
//! 所有 JSON 类型检查与数值转换都在这里完成，存储层只接收强类型输入。
//! `null` 视为未提供该字段。

use serde::Deserialize;
use serde_json::Value;

use super::error::InvalidInput;
use super::model::{NewProduct, ProductPatch};

/// 创建与部分更新共用的请求体
#[derive(Debug, Default, Deserialize)]
pub struct ProductRequest {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub category: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub stock: Option<Value>,
}

impl TryFrom<ProductRequest> for NewProduct {
    type Error = InvalidInput;

    fn try_from(req: ProductRequest) -> Result<Self, Self::Error> {
        let name = string_field(req.name, InvalidInput::Name)?
            .ok_or(InvalidInput::Name)?;
        let price = number_field(req.price)?.ok_or(InvalidInput::Price)?;

        Ok(NewProduct {
            name,
            price,
            category: string_field(req.category, InvalidInput::Category)?,
            description: string_field(req.description, InvalidInput::Description)?,
            stock: req.stock.and_then(present).map(coerce_stock),
        })
    }
}

impl TryFrom<ProductRequest> for ProductPatch {
    type Error = InvalidInput;

    fn try_from(req: ProductRequest) -> Result<Self, Self::Error> {
        Ok(ProductPatch {
            name: string_field(req.name, InvalidInput::Name)?,
            price: number_field(req.price)?,
            category: string_field(req.category, InvalidInput::Category)?,
            description: string_field(req.description, InvalidInput::Description)?,
            stock: req.stock.and_then(present).map(coerce_stock),
        })
    }
}

fn present(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        other => Some(other),
    }
}

fn string_field(
    value: Option<Value>,
    invalid: InvalidInput,
) -> Result<Option<String>, InvalidInput> {
    match value.and_then(present) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(invalid),
    }
}

/// price 只接受 JSON 数值，字符串不做隐式转换
fn number_field(value: Option<Value>) -> Result<Option<f64>, InvalidInput> {
    match value.and_then(present) {
        None => Ok(None),
        Some(Value::Number(n)) => n.as_f64().map(Some).ok_or(InvalidInput::Price),
        Some(_) => Err(InvalidInput::Price),
    }
}

/// stock 接受数值或数字字符串：小数截断，负数记为 0，无法解析时为 0
pub fn coerce_stock(value: Value) -> u32 {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(n) if n.is_finite() && n > 0.0 => n.trunc().min(u32::MAX as f64) as u32,
        _ => 0,
    }
}
