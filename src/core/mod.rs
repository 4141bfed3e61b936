//! 核心层：错误处理

pub mod error;
