//! 基于表单和列表脚手架构建的具体页面

mod test_payment_form;
mod user_reg_form;
mod user_sessions_list;

pub use test_payment_form::TestPaymentForm;
pub use user_reg_form::{USER_REG_CAPTCHA_KEY, UserRegForm};
pub use user_sessions_list::{SessionRow, UserSessionsList, UserSessionsSource, user_sessions_list};
