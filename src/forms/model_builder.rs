//! 从模型构建表单
//!
//! ```ignore
//! struct TestForm { field_a: String, field_b: String }
//!
//! impl FormModel for TestForm {
//!     fn declare(fields: &mut FieldRegistry<Self>) {
//!         fields
//!             .add(FieldAttribute::text_box("FieldA"), vec![ValidationRule::Required],
//!                  |m| &m.field_a, |m| &mut m.field_a)
//!             .add(FieldAttribute::text_box("FieldB"), vec![],
//!                  |m| &m.field_b, |m| &mut m.field_b);
//!     }
//! }
//!
//! #[async_trait]
//! impl FormHandler for TestForm {
//!     async fn on_bind(&mut self, _ctx: &RequestContext) -> Result<()> {
//!         self.field_a = "Default value".to_string();
//!         Ok(())
//!     }
//!     async fn on_submit(&mut self, _ctx: &RequestContext) -> Result<Value> {
//!         Ok(json!({ "message": format!("{}, {}", self.field_a, self.field_b) }))
//!     }
//! }
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, trace};

use super::attribute::FormAttribute;
use super::builder::FormBuilder;
use super::field::FieldId;
use super::model::{FieldDeclaration, FormModel};
use super::value::FieldValue;
use crate::errors::Result;
use crate::services::RequestContext;

/// 表单绑定和提交时的处理
#[async_trait]
pub trait FormHandler: FormModel + Sync {
    /// 绑定时的处理，在模型值复制到字段之前调用
    async fn on_bind(&mut self, ctx: &RequestContext) -> Result<()>;

    /// 提交时的处理，模型已写入提交的值，返回处理结果
    async fn on_submit(&mut self, ctx: &RequestContext) -> Result<Value>;
}

/// 通过 `add_fields_from` 加入的扩展对象
trait ErasedModel: Send + Sync {
    fn read(&self, slot: usize) -> FieldValue;
    fn write(&mut self, slot: usize, value: &FieldValue) -> bool;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

struct Extension<E> {
    model: E,
    declarations: Vec<FieldDeclaration<E>>,
}

impl<E: FormModel + Sync> ErasedModel for Extension<E> {
    fn read(&self, slot: usize) -> FieldValue {
        self.declarations
            .get(slot)
            .map(|d| d.read(&self.model))
            .unwrap_or_default()
    }

    fn write(&mut self, slot: usize, value: &FieldValue) -> bool {
        match self.declarations.get(slot) {
            Some(d) => d.write(&mut self.model, value),
            None => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        &self.model
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        &mut self.model
    }
}

/// 字段对应的属性所在位置
enum Binding {
    Model(usize),
    Extension { index: usize, slot: usize },
}

pub struct ModelFormBuilder<M: FormHandler> {
    form: FormBuilder,
    model: M,
    declarations: Vec<FieldDeclaration<M>>,
    extensions: Vec<Box<dyn ErasedModel>>,
    field_to_property: HashMap<FieldId, Binding>,
}

impl<M: FormHandler> ModelFormBuilder<M> {
    pub fn new(model: M) -> Self {
        let attribute = M::form_attribute()
            .unwrap_or_else(|| FormAttribute::new(short_type_name::<M>()));
        Self::with_form(FormBuilder::new(attribute), model)
    }

    /// 使用已有的表单构建器，原有字段会被清空
    ///
    /// 模型声明了表单属性时才覆盖原有属性。
    pub fn with_form(mut form: FormBuilder, model: M) -> Self {
        if let Some(attribute) = M::form_attribute() {
            form.attribute = attribute;
        }
        form.clear_fields();

        let mut builder = Self {
            form,
            model,
            declarations: Vec::new(),
            extensions: Vec::new(),
            field_to_property: HashMap::new(),
        };
        for declaration in M::field_declarations() {
            let id = builder
                .form
                .add_field(declaration.attribute.clone(), declaration.validators.clone());
            builder
                .field_to_property
                .insert(id, Binding::Model(builder.declarations.len()));
            builder.declarations.push(declaration);
        }
        trace!(
            "Built form '{}' with {} field(s)",
            builder.form.attribute.name,
            builder.form.fields().len()
        );
        builder
    }

    /// 从其他对象添加字段，这些字段同样参与绑定和提交
    pub fn add_fields_from<E: FormModel + Sync>(&mut self, extension: E) -> &mut Self {
        let index = self.extensions.len();
        let declarations = E::field_declarations();
        for (slot, declaration) in declarations.iter().enumerate() {
            let id = self
                .form
                .add_field(declaration.attribute.clone(), declaration.validators.clone());
            self.field_to_property
                .insert(id, Binding::Extension { index, slot });
        }
        self.extensions.push(Box::new(Extension {
            model: extension,
            declarations,
        }));
        self
    }

    pub fn form(&self) -> &FormBuilder {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormBuilder {
        &mut self.form
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn into_model(self) -> M {
        self.model
    }

    /// 取回通过 `add_fields_from` 加入的对象
    pub fn extension<E: 'static>(&self) -> Option<&E> {
        self.extensions
            .iter()
            .find_map(|ext| ext.as_any().downcast_ref::<E>())
    }

    pub fn extension_mut<E: 'static>(&mut self) -> Option<&mut E> {
        self.extensions
            .iter_mut()
            .find_map(|ext| ext.as_any_mut().downcast_mut::<E>())
    }

    pub fn form_attribute(&self) -> &FormAttribute {
        &self.form.attribute
    }

    /// 绑定表单：先调用模型的绑定处理，再把模型中的值设置到字段
    pub async fn bind(&mut self, ctx: &RequestContext) -> Result<()> {
        self.model.on_bind(ctx).await?;

        let Self {
            form,
            model,
            declarations,
            extensions,
            field_to_property,
        } = self;

        for field in form.fields_mut() {
            let Some(binding) = field_to_property.get(&field.id()) else {
                continue;
            };
            field.value = match *binding {
                Binding::Model(i) => declarations[i].read(model),
                Binding::Extension { index, slot } => extensions[index].read(slot),
            };
        }
        form.set_csrf_token(ctx.csrf_token().map(str::to_string));
        form.load_options(ctx);

        debug!("Bound form '{}'", form.attribute.name);
        Ok(())
    }

    /// 提交表单：验证并把提交的值设置到模型，然后返回提交处理的结果
    pub async fn submit(
        &mut self,
        ctx: &RequestContext,
        submitted: &HashMap<String, String>,
    ) -> Result<Value> {
        let values = self.form.parse_values(submitted, ctx)?;

        let Self {
            form,
            model,
            declarations,
            extensions,
            field_to_property,
        } = self;

        for field in form.fields() {
            let (Some(value), Some(binding)) = (
                values.get(field.name()),
                field_to_property.get(&field.id()),
            ) else {
                continue;
            };
            let assigned = match *binding {
                Binding::Model(i) => declarations[i].write(model, value),
                Binding::Extension { index, slot } => extensions[index].write(slot, value),
            };
            if !assigned {
                trace!("Field '{}' left unchanged", field.name());
            }
        }

        debug!("Submitting form '{}'", form.attribute.name);
        self.model.on_submit(ctx).await
    }

    pub fn to_template_value(&self) -> Value {
        self.form.to_template_value()
    }
}

impl<M: FormHandler> fmt::Display for ModelFormBuilder<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.form, f)
    }
}

fn short_type_name<T>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::config::StaticConfig;
    use crate::errors::SuiteError;
    use crate::forms::{FieldAttribute, FieldRegistry, ValidationRule};
    use crate::services::MemoryServices;

    #[derive(Default)]
    struct Contact {
        name: String,
    }

    impl FormModel for Contact {
        fn declare(fields: &mut FieldRegistry<Self>) {
            fields.add(
                FieldAttribute::text_box("Name"),
                vec![ValidationRule::Required],
                |m| &m.name,
                |m| &mut m.name,
            );
        }
    }

    #[derive(Default)]
    struct Profile {
        contact: Contact,
        age: u32,
        note: Option<String>,
    }

    impl FormModel for Profile {
        fn form_attribute() -> Option<FormAttribute> {
            Some(FormAttribute::new("ProfileForm").without_csrf_token())
        }

        fn declare(fields: &mut FieldRegistry<Self>) {
            fields
                .include(|m| &m.contact, |m| &mut m.contact)
                .add(
                    FieldAttribute::text_box("Age"),
                    vec![ValidationRule::range(0.0, 150.0)],
                    |m| &m.age,
                    |m| &mut m.age,
                )
                .add(
                    FieldAttribute::text_area("Note", 3),
                    vec![],
                    |m| &m.note,
                    |m| &mut m.note,
                );
        }
    }

    #[async_trait]
    impl FormHandler for Profile {
        async fn on_bind(&mut self, _ctx: &RequestContext) -> Result<()> {
            self.contact.name = "Default name".into();
            self.age = 18;
            Ok(())
        }

        async fn on_submit(&mut self, _ctx: &RequestContext) -> Result<Value> {
            Ok(json!({ "name": self.contact.name, "age": self.age, "note": self.note }))
        }
    }

    #[derive(Default)]
    struct Newsletter {
        subscribe: bool,
    }

    impl FormModel for Newsletter {
        fn declare(fields: &mut FieldRegistry<Self>) {
            fields.add(
                FieldAttribute::check_box("Subscribe"),
                vec![],
                |m| &m.subscribe,
                |m| &mut m.subscribe,
            );
        }
    }

    fn context() -> RequestContext {
        let services = MemoryServices::from_config(&StaticConfig::default());
        RequestContext::new(Arc::clone(&services.services))
    }

    fn submitted(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_base_fields_come_first() {
        let builder = ModelFormBuilder::new(Profile::default());
        let names: Vec<_> = builder.form().fields().iter().map(|f| f.name()).collect();
        assert_eq!(names, ["Name", "Age", "Note"]);
        assert_eq!(builder.form_attribute().name, "ProfileForm");
    }

    #[test]
    fn test_with_form_replaces_existing_fields() {
        let mut form = FormBuilder::default();
        form.add_field(FieldAttribute::text_box("Stale"), vec![]);
        let builder = ModelFormBuilder::with_form(form, Profile::default());
        assert!(builder.form().field_by_name("Stale").is_none());
        assert_eq!(builder.form().fields().len(), 3);
    }

    #[test]
    fn test_with_form_keeps_attribute_without_declared_one() {
        struct Plain;

        impl FormModel for Plain {
            fn declare(_fields: &mut FieldRegistry<Self>) {}
        }

        #[async_trait]
        impl FormHandler for Plain {
            async fn on_bind(&mut self, _ctx: &RequestContext) -> Result<()> {
                Ok(())
            }

            async fn on_submit(&mut self, _ctx: &RequestContext) -> Result<Value> {
                Ok(Value::Null)
            }
        }

        let form = FormBuilder::new(FormAttribute::new("Existing"));
        let builder = ModelFormBuilder::with_form(form, Plain);
        assert_eq!(builder.form_attribute().name, "Existing");

        let form = FormBuilder::new(FormAttribute::new("Existing"));
        let builder = ModelFormBuilder::with_form(form, Profile::default());
        assert_eq!(builder.form_attribute().name, "ProfileForm");
    }

    #[tokio::test]
    async fn test_bind_copies_defaults_into_fields() {
        let ctx = context();
        let mut builder = ModelFormBuilder::new(Profile::default());
        builder.bind(&ctx).await.unwrap();

        let form = builder.form();
        assert_eq!(
            form.field_by_name("Name").map(|f| f.value.clone()),
            Some(FieldValue::from("Default name"))
        );
        assert_eq!(
            form.field_by_name("Age").map(|f| f.value.clone()),
            Some(FieldValue::Integer(18))
        );
        assert_eq!(
            form.field_by_name("Note").map(|f| f.value.clone()),
            Some(FieldValue::Empty)
        );
    }

    #[tokio::test]
    async fn test_submit_assigns_converted_values() {
        let ctx = context();
        let mut builder = ModelFormBuilder::new(Profile::default());
        builder.bind(&ctx).await.unwrap();

        let result = builder
            .submit(&ctx, &submitted(&[("Name", "Alice"), ("Age", "30")]))
            .await
            .unwrap();
        assert_eq!(result, json!({ "name": "Alice", "age": 30, "note": null }));
    }

    #[tokio::test]
    async fn test_submit_validation_errors_leave_model_untouched() {
        let ctx = context();
        let mut builder = ModelFormBuilder::new(Profile::default());
        builder.bind(&ctx).await.unwrap();

        let err = builder
            .submit(&ctx, &submitted(&[("Name", ""), ("Age", "200")]))
            .await
            .unwrap_err();
        match err {
            SuiteError::Validation(messages) => assert_eq!(messages.len(), 2),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(builder.model().contact.name, "Default name");
        assert_eq!(builder.model().age, 18);
    }

    #[tokio::test]
    async fn test_unconvertible_value_keeps_previous() {
        let ctx = context();
        let mut builder = ModelFormBuilder::new(Profile::default());
        builder.bind(&ctx).await.unwrap();

        // 12.5 在范围内但无法转换为 u32
        builder
            .submit(&ctx, &submitted(&[("Name", "Bob"), ("Age", "12.5")]))
            .await
            .unwrap();
        assert_eq!(builder.model().age, 18);
        assert_eq!(builder.model().contact.name, "Bob");
    }

    #[tokio::test]
    async fn test_extension_fields_bind_and_submit() {
        let ctx = context();
        let mut builder = ModelFormBuilder::new(Profile::default());
        builder.add_fields_from(Newsletter { subscribe: true });
        assert_eq!(builder.form().fields().len(), 4);

        builder.bind(&ctx).await.unwrap();
        assert_eq!(
            builder.form().field_by_name("Subscribe").map(|f| f.value.clone()),
            Some(FieldValue::Bool(true))
        );

        builder
            .submit(&ctx, &submitted(&[("Name", "Carol")]))
            .await
            .unwrap();
        assert_eq!(builder.extension::<Newsletter>().map(|n| n.subscribe), Some(false));
        assert!(builder.extension::<Contact>().is_none());
    }

    #[test]
    fn test_default_attribute_uses_type_name() {
        struct Anonymous;

        impl FormModel for Anonymous {
            fn declare(_fields: &mut FieldRegistry<Self>) {}
        }

        #[async_trait]
        impl FormHandler for Anonymous {
            async fn on_bind(&mut self, _ctx: &RequestContext) -> Result<()> {
                Ok(())
            }

            async fn on_submit(&mut self, _ctx: &RequestContext) -> Result<Value> {
                Ok(Value::Null)
            }
        }

        let builder = ModelFormBuilder::new(Anonymous);
        assert_eq!(builder.form_attribute().name, "Anonymous");
        assert!(builder.to_string().contains("name=\"Anonymous\""));
    }
}
