pub mod captcha;
pub mod forms;
pub mod health;
pub mod lists;

pub use captcha::captcha_image;
pub use forms::{get_form, post_form};
pub use health::{AppStartTime, HealthService, health_routes};
pub use lists::{list_page, user_menu};
