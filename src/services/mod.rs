//! Services used by forms and pages
//!
//! The host's user system, persistence and localization are reached through
//! the narrow traits here. The `Memory*` types are in-process implementations
//! used by the bundled server and tests.

mod captcha;
mod context;
mod currency;
mod list_items;
mod localize;
mod payment;
mod users;

pub use captcha::{CaptchaVerifier, MemoryCaptchaStore};
pub use context::{MemoryServices, RequestContext, Services};
pub use currency::{CURRENCY_LIST_PROVIDER, CurrencyListItemProvider, CurrencySettings};
pub use list_items::{ListItem, ListItemProvider, ListItemProviders};
pub use localize::{NoTranslation, TableTranslator, Translator};
pub use payment::{MemoryPaymentApiRepository, PaymentApi, PaymentApiRepository};
pub use users::{
    MemoryUserManager, Session, User, UserManager, UserTypes, UserTypesGroup,
};
