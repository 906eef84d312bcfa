//! 字段值以及字段值和模型属性之间的转换

use std::fmt;

use serde::Serialize;

/// 绑定到字段上的值
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Empty,
    Text(String),
    Integer(i64),
    Decimal(f64),
    Bool(bool),
}

impl FieldValue {
    /// 空值或只包含空白的文本
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Empty => Ok(()),
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Decimal(d) => write!(f, "{}", d),
            FieldValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

/// 可以绑定到表单字段的属性类型
///
/// `from_field_value` 转换失败时返回 `None`，调用方保留属性原值。
pub trait FieldProperty: Sized {
    fn to_field_value(&self) -> FieldValue;
    fn from_field_value(value: &FieldValue) -> Option<Self>;
}

impl FieldProperty for String {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Text(self.clone())
    }

    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Empty => None,
            other => Some(other.to_string()),
        }
    }
}

impl<T: FieldProperty> FieldProperty for Option<T> {
    fn to_field_value(&self) -> FieldValue {
        self.as_ref()
            .map(FieldProperty::to_field_value)
            .unwrap_or(FieldValue::Empty)
    }

    fn from_field_value(value: &FieldValue) -> Option<Self> {
        T::from_field_value(value).map(Some)
    }
}

impl FieldProperty for bool {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Bool(*self)
    }

    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Bool(b) => Some(*b),
            FieldValue::Integer(i) => Some(*i != 0),
            FieldValue::Text(s) => match s.trim().to_lowercase().as_str() {
                "true" | "on" | "1" | "yes" => Some(true),
                "false" | "off" | "0" | "no" => Some(false),
                _ => None,
            },
            FieldValue::Empty | FieldValue::Decimal(_) => None,
        }
    }
}

impl FieldProperty for f64 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Decimal(*self)
    }

    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Decimal(d) => Some(*d),
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Text(s) => s.trim().parse().ok().filter(|d: &f64| d.is_finite()),
            FieldValue::Empty | FieldValue::Bool(_) => None,
        }
    }
}

macro_rules! integer_field_property {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldProperty for $ty {
                fn to_field_value(&self) -> FieldValue {
                    i64::try_from(*self)
                        .map(FieldValue::Integer)
                        .unwrap_or_else(|_| FieldValue::Text(self.to_string()))
                }

                fn from_field_value(value: &FieldValue) -> Option<Self> {
                    match value {
                        FieldValue::Integer(i) => <$ty>::try_from(*i).ok(),
                        FieldValue::Text(s) => s.trim().parse().ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

integer_field_property!(i32, i64, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_empty() {
        assert!(FieldValue::Empty.is_empty());
        assert!(FieldValue::from("   ").is_empty());
        assert!(!FieldValue::from("x").is_empty());
        assert!(!FieldValue::Bool(false).is_empty());
    }

    #[test]
    fn test_string_conversion_skips_empty() {
        assert_eq!(String::from_field_value(&FieldValue::Empty), None);
        assert_eq!(
            String::from_field_value(&FieldValue::Integer(12)),
            Some("12".to_string())
        );
    }

    #[test]
    fn test_decimal_conversion() {
        assert_eq!(f64::from_field_value(&FieldValue::from(" 0.25 ")), Some(0.25));
        assert_eq!(f64::from_field_value(&FieldValue::from("abc")), None);
        assert_eq!(f64::from_field_value(&FieldValue::from("NaN")), None);
    }

    #[test]
    fn test_integer_conversion_failure_returns_none() {
        assert_eq!(i64::from_field_value(&FieldValue::from("42")), Some(42));
        assert_eq!(u32::from_field_value(&FieldValue::Integer(-1)), None);
        assert_eq!(i32::from_field_value(&FieldValue::from("4.2")), None);
    }

    #[test]
    fn test_bool_conversion() {
        assert_eq!(bool::from_field_value(&FieldValue::from("on")), Some(true));
        assert_eq!(bool::from_field_value(&FieldValue::from("off")), Some(false));
        assert_eq!(bool::from_field_value(&FieldValue::from("maybe")), None);
    }

    #[test]
    fn test_option_wraps_inner_conversion() {
        let value: Option<Option<String>> = FieldProperty::from_field_value(&FieldValue::from("a"));
        assert_eq!(value, Some(Some("a".to_string())));
        assert_eq!(None::<String>.to_field_value(), FieldValue::Empty);
    }
}
