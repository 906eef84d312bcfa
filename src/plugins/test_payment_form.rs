//! 用于测试支付接口是否可以正常使用的表单

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::{Result, SuiteError};
use crate::forms::{
    FieldAttribute, FieldRegistry, FormAttribute, FormHandler, FormModel, ValidationRule,
    patterns,
};
use crate::scaffolding::check_privileges;
use crate::services::{CURRENCY_LIST_PROVIDER, PaymentApi, RequestContext, UserTypesGroup};

/// 默认的测试金额
const DEFAULT_TEST_AMOUNT: f64 = 0.1;

#[derive(Debug, Clone, Default)]
pub struct TestPaymentForm {
    pub api_name: String,
    pub amount: f64,
    pub currency: String,
    pub description: String,
}

impl TestPaymentForm {
    /// 从请求中获取支付接口，不存在时返回 404
    ///
    /// 只有管理员可以访问，未登录返回 401，其他用户类型返回 403。
    async fn api_from_request(ctx: &RequestContext) -> Result<PaymentApi> {
        check_privileges(ctx.user(), UserTypesGroup::ADMIN, &[])?;
        let not_found = || SuiteError::not_found(ctx.translate("Payment api not exist"));
        let id: i64 = ctx.param_as("id").ok_or_else(not_found)?;
        ctx.services()
            .payment_apis
            .get_by_id(id)
            .await?
            .ok_or_else(not_found)
    }
}

impl FormModel for TestPaymentForm {
    fn form_attribute() -> Option<FormAttribute> {
        Some(FormAttribute::new("TestPaymentForm"))
    }

    fn declare(fields: &mut FieldRegistry<Self>) {
        fields
            .add(
                FieldAttribute::label("ApiName"),
                vec![],
                |m| &m.api_name,
                |m| &mut m.api_name,
            )
            .add(
                FieldAttribute::text_box("Amount"),
                vec![
                    ValidationRule::Required,
                    ValidationRule::RegularExpression(patterns::DECIMAL.clone()),
                ],
                |m| &m.amount,
                |m| &mut m.amount,
            )
            .add(
                FieldAttribute::dropdown_list("Currency", CURRENCY_LIST_PROVIDER),
                vec![ValidationRule::Required],
                |m| &m.currency,
                |m| &mut m.currency,
            )
            .add(
                FieldAttribute::text_area("Description", 5),
                vec![ValidationRule::Required],
                |m| &m.description,
                |m| &mut m.description,
            );
    }
}

#[async_trait]
impl FormHandler for TestPaymentForm {
    async fn on_bind(&mut self, ctx: &RequestContext) -> Result<()> {
        let api = Self::api_from_request(ctx).await?;
        self.api_name = api.name;
        self.amount = DEFAULT_TEST_AMOUNT;
        self.currency = ctx.services().currency.default_currency.clone();
        self.description = ctx.translate("Test Payment Api");
        Ok(())
    }

    async fn on_submit(&mut self, ctx: &RequestContext) -> Result<Value> {
        let api = Self::api_from_request(ctx).await?;
        Err(SuiteError::not_implemented(format!(
            "Test payment through '{}' is not implemented",
            api.name
        )))
    }
}
