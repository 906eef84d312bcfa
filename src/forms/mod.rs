//! 表单
//!
//! - `FormBuilder`: 有序字段列表、提交值的解析和验证、HTML 描画
//! - `FormModel` / `FieldRegistry`: 模型显式登记字段
//! - `ModelFormBuilder`: 从模型构建表单，绑定默认值并在提交时写回模型

mod attribute;
mod builder;
mod field;
mod model;
mod model_builder;
mod render;
mod validation;
mod value;

pub use attribute::{FieldAttribute, FieldKind, FormAttribute};
pub use builder::FormBuilder;
pub use field::{FieldId, FormField};
pub use model::{FieldDeclaration, FieldRegistry, FormModel};
pub use model_builder::{FormHandler, ModelFormBuilder};
pub use validation::{ValidationRule, patterns};
pub use value::{FieldProperty, FieldValue};

/// 表单中 CSRF 令牌的字段名
pub const CSRF_TOKEN_FIELD: &str = "csrf_token";
