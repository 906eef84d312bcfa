//! 通用表单构建器
//!
//! 保存有序的字段列表，负责解析和验证提交的值。

use std::collections::HashMap;

use serde_json::{Value, json};
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use super::attribute::{FieldAttribute, FieldKind, FormAttribute};
use super::field::{FieldId, FormField};
use super::validation::ValidationRule;
use super::value::FieldValue;
use super::CSRF_TOKEN_FIELD;
use crate::config::get_config;
use crate::errors::{Result, SuiteError};
use crate::services::RequestContext;

#[derive(Debug, Clone, Default)]
pub struct FormBuilder {
    pub attribute: FormAttribute,
    fields: Vec<FormField>,
    next_id: usize,
    csrf_token: Option<String>,
}

impl FormBuilder {
    pub fn new(attribute: FormAttribute) -> Self {
        Self {
            attribute,
            ..Default::default()
        }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut [FormField] {
        &mut self.fields
    }

    /// 添加字段并返回分配的标识
    pub fn add_field(&mut self, attribute: FieldAttribute, validators: Vec<ValidationRule>) -> FieldId {
        let id = FieldId(self.next_id);
        self.next_id += 1;
        self.fields.push(FormField::new(id, attribute, validators));
        id
    }

    /// 清空字段，已分配的标识不会被复用
    pub fn clear_fields(&mut self) {
        self.fields.clear();
    }

    pub fn field(&self, id: FieldId) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id() == id)
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }

    pub fn set_csrf_token(&mut self, token: Option<String>) {
        self.csrf_token = token;
    }

    /// 表单是否需要校验 CSRF 令牌
    pub fn csrf_required(&self) -> bool {
        self.attribute.enable_csrf_token && get_config().forms.enable_csrf
    }

    /// 绑定时填充下拉列表选项
    pub fn load_options(&mut self, ctx: &RequestContext) {
        for field in &mut self.fields {
            if let FieldKind::DropdownList { source } = &field.attribute.kind {
                field.options = ctx.services().list_items.items(source).unwrap_or_default();
            }
        }
    }

    /// 解析并验证提交的值
    ///
    /// 返回字段名到字段值的映射；只读字段不会出现在结果中。
    /// 所有字段的错误会合并到一个 `Validation` 错误中。
    pub fn parse_values(
        &self,
        submitted: &HashMap<String, String>,
        ctx: &RequestContext,
    ) -> Result<HashMap<String, FieldValue>> {
        self.verify_csrf_token(submitted, ctx)?;

        let mut values = HashMap::with_capacity(self.fields.len());
        let mut errors = Vec::new();

        for field in &self.fields {
            if !field.attribute.accepts_input() {
                continue;
            }
            let value = normalize(&field.attribute.kind, submitted.get(field.name()));
            let display_name = ctx.translate(field.name());
            match check_field(field, &display_name, &value, ctx) {
                Ok(()) => {
                    values.insert(field.name().to_string(), value);
                }
                Err(message) => errors.push(message),
            }
        }

        if !errors.is_empty() {
            warn!(
                "Form '{}' rejected with {} validation error(s)",
                self.attribute.name,
                errors.len()
            );
            return Err(SuiteError::Validation(errors));
        }

        debug!("Form '{}' parsed {} value(s)", self.attribute.name, values.len());
        Ok(values)
    }

    /// 双令牌校验：提交的令牌必须和请求携带的 cookie 令牌一致
    fn verify_csrf_token(&self, submitted: &HashMap<String, String>, ctx: &RequestContext) -> Result<()> {
        if !self.csrf_required() {
            return Ok(());
        }

        let valid = match (ctx.csrf_token(), submitted.get(CSRF_TOKEN_FIELD)) {
            (Some(expected), Some(provided)) if !expected.is_empty() => {
                bool::from(expected.as_bytes().ct_eq(provided.as_bytes()))
            }
            _ => false,
        };

        if valid {
            Ok(())
        } else {
            warn!("CSRF validation failed for form '{}'", self.attribute.name);
            Err(SuiteError::forbidden("CSRF token missing or invalid"))
        }
    }

    /// 提供给模板的表单描述
    pub fn to_template_value(&self) -> Value {
        json!({
            "attribute": self.attribute,
            "csrf_token": if self.csrf_required() { self.csrf_token.clone() } else { None },
            "fields": self.fields.iter().map(FormField::to_template_value).collect::<Vec<_>>(),
        })
    }
}

fn normalize(kind: &FieldKind, raw: Option<&String>) -> FieldValue {
    match kind {
        FieldKind::CheckBox => FieldValue::Bool(matches!(
            raw.map(|s| s.trim().to_lowercase()).as_deref(),
            Some("on" | "true" | "1")
        )),
        _ => raw.map(|s| FieldValue::Text(s.clone())).unwrap_or_default(),
    }
}

fn check_field(
    field: &FormField,
    display_name: &str,
    value: &FieldValue,
    ctx: &RequestContext,
) -> std::result::Result<(), String> {
    for rule in &field.validators {
        rule.validate(display_name, value)?;
    }
    if value.is_empty() {
        return Ok(());
    }

    let text = value.to_string();
    match &field.attribute.kind {
        FieldKind::DropdownList { source } => {
            let listed = ctx
                .services()
                .list_items
                .items(source)
                .is_some_and(|items| items.iter().any(|item| item.value == text));
            if listed {
                Ok(())
            } else {
                Err(format!("{} has an invalid selection", display_name))
            }
        }
        FieldKind::Captcha { key } => {
            if ctx.services().captcha.verify(ctx.session_id(), key, &text) {
                Ok(())
            } else {
                Err(ctx.translate("Incorrect captcha"))
            }
        }
        _ => Ok(()),
    }
}
