use serde::Serialize;
use serde_json::{Value, json};

use super::attribute::{FieldAttribute, FieldKind};
use super::validation::ValidationRule;
use super::value::FieldValue;
use crate::services::ListItem;

/// 字段标识，由 `FormBuilder` 在添加字段时分配
///
/// 字段到模型属性的映射以它为键，同名字段也不会混淆。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FieldId(pub(crate) usize);

/// 表单字段
#[derive(Debug, Clone)]
pub struct FormField {
    id: FieldId,
    pub attribute: FieldAttribute,
    pub validators: Vec<ValidationRule>,
    pub value: FieldValue,
    /// 下拉列表的选项，绑定时填充
    pub options: Vec<ListItem>,
}

impl FormField {
    pub(crate) fn new(id: FieldId, attribute: FieldAttribute, validators: Vec<ValidationRule>) -> Self {
        Self {
            id,
            attribute,
            validators,
            value: FieldValue::Empty,
            options: Vec::new(),
        }
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.attribute.name
    }

    pub fn is_required(&self) -> bool {
        self.validators
            .iter()
            .any(|rule| matches!(rule, ValidationRule::Required))
    }

    /// 密码和验证码不回显
    pub fn display_value(&self) -> FieldValue {
        match self.attribute.kind {
            FieldKind::Password | FieldKind::Captcha { .. } => FieldValue::Empty,
            _ => self.value.clone(),
        }
    }

    pub fn to_template_value(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.attribute.name,
            "placeholder": self.attribute.placeholder,
            "kind": self.attribute.kind,
            "value": self.display_value(),
            "required": self.is_required(),
            "validators": self.validators.iter().map(ValidationRule::describe).collect::<Vec<_>>(),
            "options": self.options,
        })
    }
}
