//! 用户注册表单

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::info;

use crate::errors::{Result, SuiteError};
use crate::forms::{
    FieldAttribute, FieldRegistry, FormAttribute, FormHandler, FormModel, ValidationRule,
};
use crate::services::RequestContext;

/// 注册表单使用的验证码键
pub const USER_REG_CAPTCHA_KEY: &str = "Common.Admin.UserReg";

/// 用户注册，成功后自动登录
#[derive(Debug, Clone, Default)]
pub struct UserRegForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub captcha: String,
}

impl FormModel for UserRegForm {
    fn form_attribute() -> Option<FormAttribute> {
        Some(FormAttribute::new("UserRegForm").with_submit_button_text("Register"))
    }

    fn declare(fields: &mut FieldRegistry<Self>) {
        fields
            .add(
                FieldAttribute::text_box("Username").with_placeholder("Please enter username"),
                vec![ValidationRule::Required, ValidationRule::string_length(3, 100)],
                |m| &m.username,
                |m| &mut m.username,
            )
            .add(
                FieldAttribute::password("Password").with_placeholder("Please enter password"),
                vec![ValidationRule::Required, ValidationRule::string_length(5, 100)],
                |m| &m.password,
                |m| &mut m.password,
            )
            .add(
                FieldAttribute::password("ConfirmPassword")
                    .with_placeholder("Please repeat the password exactly"),
                vec![ValidationRule::Required, ValidationRule::string_length(5, 100)],
                |m| &m.confirm_password,
                |m| &mut m.confirm_password,
            )
            .add(
                FieldAttribute::captcha("Captcha", USER_REG_CAPTCHA_KEY)
                    .with_placeholder("Please enter captcha"),
                vec![ValidationRule::Required],
                |m| &m.captcha,
                |m| &mut m.captcha,
            );
    }
}

#[async_trait]
impl FormHandler for UserRegForm {
    async fn on_bind(&mut self, _ctx: &RequestContext) -> Result<()> {
        Ok(())
    }

    async fn on_submit(&mut self, ctx: &RequestContext) -> Result<Value> {
        if self.password != self.confirm_password {
            return Err(SuiteError::bad_request(
                ctx.translate("Please repeat the password exactly"),
            ));
        }

        let users = &ctx.services().users;
        users.register(&self.username, &self.password).await?;
        let session = users.login(&self.username, &self.password, false).await?;
        info!("User '{}' registered and logged in", session.username);
        ctx.set_login(session);

        Ok(json!({
            "message": ctx.translate(
                "You have registered successfully, thanks for you registration"
            ),
        }))
    }
}
