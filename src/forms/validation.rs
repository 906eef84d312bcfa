//! 字段验证规则

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Value, json};

use super::value::FieldValue;
use crate::errors::Result;

/// 常用的验证表达式
pub mod patterns {
    use super::*;

    /// 非负小数，如 "0.1"、"100"
    pub static DECIMAL: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^\d+(\.\d+)?$").expect("decimal pattern is valid"));

    /// 整数，允许负号
    pub static INTEGER: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^-?\d+$").expect("integer pattern is valid"));
}

/// 验证规则
#[derive(Debug, Clone)]
pub enum ValidationRule {
    Required,
    StringLength { min: usize, max: usize },
    RegularExpression(Regex),
    Range { min: f64, max: f64 },
}

impl ValidationRule {
    pub fn string_length(min: usize, max: usize) -> Self {
        ValidationRule::StringLength { min, max }
    }

    /// 编译正则表达式，模式无效时返回配置错误
    pub fn pattern(pattern: &str) -> Result<Self> {
        Ok(ValidationRule::RegularExpression(Regex::new(pattern)?))
    }

    pub fn range(min: f64, max: f64) -> Self {
        ValidationRule::Range { min, max }
    }

    /// 验证字段值，失败时返回错误消息
    ///
    /// 除 `Required` 外的规则不检查空值。
    pub fn validate(&self, display_name: &str, value: &FieldValue) -> std::result::Result<(), String> {
        if let ValidationRule::Required = self {
            return if value.is_empty() {
                Err(format!("{} is required", display_name))
            } else {
                Ok(())
            };
        }
        if value.is_empty() {
            return Ok(());
        }

        let text = value.to_string();
        match self {
            ValidationRule::Required => Ok(()),
            ValidationRule::StringLength { min, max } => {
                let len = text.trim().chars().count();
                if len < *min {
                    Err(format!(
                        "Length of {} must be at least {} characters",
                        display_name, min
                    ))
                } else if len > *max {
                    Err(format!(
                        "Length of {} must not exceed {} characters",
                        display_name, max
                    ))
                } else {
                    Ok(())
                }
            }
            ValidationRule::RegularExpression(regex) => {
                if regex.is_match(&text) {
                    Ok(())
                } else {
                    Err(format!("Format of {} is invalid", display_name))
                }
            }
            ValidationRule::Range { min, max } => match text.trim().parse::<f64>() {
                Ok(n) if n >= *min && n <= *max => Ok(()),
                _ => Err(format!(
                    "{} must be between {} and {}",
                    display_name, min, max
                )),
            },
        }
    }

    /// 提供给模板的规则描述
    pub fn describe(&self) -> Value {
        match self {
            ValidationRule::Required => json!({ "type": "required" }),
            ValidationRule::StringLength { min, max } => {
                json!({ "type": "string_length", "min": min, "max": max })
            }
            ValidationRule::RegularExpression(regex) => {
                json!({ "type": "regular_expression", "pattern": regex.as_str() })
            }
            ValidationRule::Range { min, max } => json!({ "type": "range", "min": min, "max": max }),
        }
    }
}
