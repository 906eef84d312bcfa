//! 模型字段声明
//!
//! 模型通过 `FormModel::declare` 显式登记字段以及读写属性的函数，
//! 基础模型用 `FieldRegistry::include` 组合进来，其字段排在前面。

use std::sync::Arc;

use super::attribute::{FieldAttribute, FormAttribute};
use super::validation::ValidationRule;
use super::value::{FieldProperty, FieldValue};

pub(crate) type Getter<M> = Arc<dyn Fn(&M) -> FieldValue + Send + Sync>;
/// 返回值表示是否成功赋值
pub(crate) type Setter<M> = Arc<dyn Fn(&mut M, &FieldValue) -> bool + Send + Sync>;

/// 可以生成表单的模型
pub trait FormModel: Send + Sized + 'static {
    /// 表单属性，未提供时使用以模型类型命名的默认属性
    fn form_attribute() -> Option<FormAttribute> {
        None
    }

    /// 登记字段
    ///
    /// 组合的基础模型应当先于自身字段登记。
    fn declare(fields: &mut FieldRegistry<Self>);

    /// 按声明顺序收集字段
    fn field_declarations() -> Vec<FieldDeclaration<Self>> {
        let mut registry = FieldRegistry::new();
        Self::declare(&mut registry);
        registry.into_declarations()
    }
}

/// 一个字段声明：字段属性、验证规则和属性读写函数
pub struct FieldDeclaration<M> {
    pub attribute: FieldAttribute,
    pub validators: Vec<ValidationRule>,
    pub(crate) get: Getter<M>,
    pub(crate) set: Setter<M>,
}

impl<M> FieldDeclaration<M> {
    pub fn read(&self, model: &M) -> FieldValue {
        (self.get)(model)
    }

    /// 转换并写入属性，转换失败时保留原值并返回 false
    pub fn write(&self, model: &mut M, value: &FieldValue) -> bool {
        (self.set)(model, value)
    }
}

pub struct FieldRegistry<M> {
    declarations: Vec<FieldDeclaration<M>>,
}

impl<M: 'static> FieldRegistry<M> {
    pub fn new() -> Self {
        Self {
            declarations: Vec::new(),
        }
    }

    /// 登记一个绑定到属性的字段
    ///
    /// ```ignore
    /// fields.add(
    ///     FieldAttribute::text_box("Username"),
    ///     vec![ValidationRule::Required],
    ///     |m| &m.username,
    ///     |m| &mut m.username,
    /// );
    /// ```
    pub fn add<T>(
        &mut self,
        attribute: FieldAttribute,
        validators: Vec<ValidationRule>,
        get: fn(&M) -> &T,
        get_mut: fn(&mut M) -> &mut T,
    ) -> &mut Self
    where
        T: FieldProperty + 'static,
    {
        self.declarations.push(FieldDeclaration {
            attribute,
            validators,
            get: Arc::new(move |model: &M| get(model).to_field_value()),
            set: Arc::new(move |model: &mut M, value: &FieldValue| {
                match T::from_field_value(value) {
                    Some(converted) => {
                        *get_mut(model) = converted;
                        true
                    }
                    None => false,
                }
            }),
        });
        self
    }

    /// 组合基础模型，登记它的全部字段
    pub fn include<B: FormModel>(
        &mut self,
        get: fn(&M) -> &B,
        get_mut: fn(&mut M) -> &mut B,
    ) -> &mut Self {
        for base in B::field_declarations() {
            let FieldDeclaration {
                attribute,
                validators,
                get: base_get,
                set: base_set,
            } = base;
            self.declarations.push(FieldDeclaration {
                attribute,
                validators,
                get: Arc::new(move |model: &M| base_get(get(model))),
                set: Arc::new(move |model: &mut M, value: &FieldValue| {
                    base_set(get_mut(model), value)
                }),
            });
        }
        self
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn into_declarations(self) -> Vec<FieldDeclaration<M>> {
        self.declarations
    }
}

impl<M: 'static> Default for FieldRegistry<M> {
    fn default() -> Self {
        Self::new()
    }
}
