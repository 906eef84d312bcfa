//! 表单和字段的描述属性

use serde::Serialize;

/// 表单属性
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormAttribute {
    pub name: String,
    /// 空字符串表示提交回当前地址
    pub action: String,
    pub method: String,
    pub submit_button_text: String,
    pub enable_csrf_token: bool,
}

impl FormAttribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            action: String::new(),
            method: "POST".to_string(),
            submit_button_text: "Submit".to_string(),
            enable_csrf_token: true,
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_submit_button_text(mut self, text: impl Into<String>) -> Self {
        self.submit_button_text = text.into();
        self
    }

    pub fn without_csrf_token(mut self) -> Self {
        self.enable_csrf_token = false;
        self
    }
}

impl Default for FormAttribute {
    fn default() -> Self {
        Self::new("Form")
    }
}

/// 字段类型
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    TextBox,
    Password,
    TextArea { rows: u32 },
    /// 只读显示，提交时忽略
    Label,
    Hidden,
    CheckBox,
    /// `source` 是列表项提供器的名称
    DropdownList { source: String },
    /// `key` 区分不同表单的验证码
    Captcha { key: String },
}

/// 字段属性
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldAttribute {
    /// 提交时使用的键名
    pub name: String,
    pub placeholder: Option<String>,
    pub kind: FieldKind,
}

impl FieldAttribute {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            placeholder: None,
            kind,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn text_box(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::TextBox)
    }

    pub fn password(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Password)
    }

    pub fn text_area(name: impl Into<String>, rows: u32) -> Self {
        Self::new(name, FieldKind::TextArea { rows })
    }

    pub fn label(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Label)
    }

    pub fn hidden(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Hidden)
    }

    pub fn check_box(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::CheckBox)
    }

    pub fn dropdown_list(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(
            name,
            FieldKind::DropdownList {
                source: source.into(),
            },
        )
    }

    pub fn captcha(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Captcha { key: key.into() })
    }

    /// 提交的值是否参与解析
    pub fn accepts_input(&self) -> bool {
        !matches!(self.kind, FieldKind::Label)
    }
}
